//////////////////////////////////////////////////////////////////////
// the cutting plane: dims, basis and offset
//
// basis[0] and basis[1] span the 2D view plane inside n-space and
// offset translates that plane relative to the integer lattice.
// validate() restores the orthonormal-basis / unit-offset invariants
// after arbitrary edits.

use std::f64::consts::PI;
use std::f64::EPSILON;

use crate::errors::*;
use crate::vector;
use crate::{Vec2d, VecNd};

pub const MIN_DIMS: usize = 3;

// largest lattice the generators will walk; also the size of the
// fixed lattice keys used by the cut-and-project vertex cache
pub const MAX_DIMS: usize = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct TilingState {
    dims: usize,
    basis: [VecNd; 2],
    offset: VecNd,
}

fn check_dims(dims: usize) -> Result<()> {
    if dims < MIN_DIMS || dims > MAX_DIMS {
        bail!(ErrorKind::UnsupportedDims(dims));
    }
    Ok(())
}

fn check_len(what: &'static str, dims: usize, v: &[f64]) -> Result<()> {
    if v.len() != dims {
        bail!(ErrorKind::LengthMismatch(what, dims, v.len()));
    }
    Ok(())
}

impl TilingState {

    // new state with the canonical basis and offset
    pub fn new(dims: usize) -> Result<Self> {

        check_dims(dims)?;

        let mut state = TilingState {
            dims,
            basis: [vector::zero(dims), vector::zero(dims)],
            offset: vector::zero(dims),
        };

        state.reset_basis();
        state.reset_offset();

        Ok(state)

    }

    // new state from raw components, without validating them
    pub fn from_parts(basis0: &[f64], basis1: &[f64], offset: &[f64]) -> Result<Self> {

        let dims = basis0.len();

        check_dims(dims)?;
        check_len("basis1", dims, basis1)?;
        check_len("offset", dims, offset)?;

        Ok(TilingState {
            dims,
            basis: [VecNd::from_column_slice(basis0), VecNd::from_column_slice(basis1)],
            offset: VecNd::from_column_slice(offset),
        })

    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn basis(&self) -> &[VecNd; 2] {
        &self.basis
    }

    pub fn offset(&self) -> &VecNd {
        &self.offset
    }

    // projection of lattice direction i onto the view plane
    pub fn axis(&self, i: usize) -> Vec2d {
        Vec2d::new(self.basis[0][i], self.basis[1][i])
    }

    pub fn set_basis(&mut self, basis0: &[f64], basis1: &[f64]) -> Result<()> {
        check_len("basis0", self.dims, basis0)?;
        check_len("basis1", self.dims, basis1)?;
        self.basis = [VecNd::from_column_slice(basis0), VecNd::from_column_slice(basis1)];
        Ok(())
    }

    pub fn set_offset(&mut self, offset: &[f64]) -> Result<()> {
        check_len("offset", self.dims, offset)?;
        self.offset = VecNd::from_column_slice(offset);
        Ok(())
    }

    // symmetric orthonormal pair giving Penrose (dims = 5) and the
    // analogous quasiperiodic tilings for other dims
    pub fn reset_basis(&mut self) {

        let n = self.dims as f64;
        let f = (2.0 / n).sqrt();
        let g = ((self.dims % 2) + 1) as f64 * PI / n;

        self.basis = [
            VecNd::from_fn(self.dims, |i, _| f * (g * i as f64).cos()),
            VecNd::from_fn(self.dims, |i, _| f * (g * i as f64).sin()),
        ];

    }

    pub fn reset_offset(&mut self) {
        // 0.3 gives the Penrose "sun" at the origin
        let gamma = if self.dims == 5 { 0.3 } else { 0.0 };
        self.offset = VecNd::from_element(self.dims, gamma);
    }

    // project a point in space onto the view plane
    pub fn project(&self, v: &VecNd) -> Vec2d {
        let d = v - &self.offset;
        Vec2d::new(vector::dot(&d, &self.basis[0]),
                   vector::dot(&d, &self.basis[1]))
    }

    // same as project() for an integer lattice point
    pub fn project_lattice(&self, coords: &[i32]) -> Vec2d {

        assert_eq!(coords.len(), self.dims, "project_lattice: mismatched vector lengths");

        let mut p = Vec2d::zeros();

        for (i, &c) in coords.iter().enumerate() {
            let d = c as f64 - self.offset[i];
            p.x += d * self.basis[0][i];
            p.y += d * self.basis[1][i];
        }

        p

    }

    // take a point on the view plane to the corresponding point in space
    pub fn unproject(&self, p: &Vec2d) -> VecNd {
        vector::combine(p.x, &self.basis[0], p.y, &self.basis[1]) + &self.offset
    }

    // pan the view: move the plane within itself and wrap the offset
    // back into [0, 1)
    pub fn translate_offset(&mut self, dx: f64, dy: f64) {

        let moved = &self.offset + vector::combine(dx, &self.basis[0], dy, &self.basis[1]);

        self.offset = moved.map(|x| {
            let w = x - x.floor();
            // x - floor(x) rounds up to 1.0 for tiny negative x
            if w >= 1.0 { 0.0 } else { w }
        });

    }

    // drag lattice axis k so that its projection lands on (x, y),
    // keeping the basis orthonormal. targets outside the unit disk are
    // pulled back onto the unit circle.
    pub fn move_axis(&mut self, k: usize, x: f64, y: f64) {

        assert!(k < self.dims, "move_axis: axis {} out of range", k);

        let mut target = Vec2d::new(x, y);
        let mut len = x.hypot(y);

        if len > 1.0 {
            target /= len;
            len = 1.0;
        } else if len <= EPSILON {
            len = 0.0;
        }

        let dir = if len != 0.0 { target / len } else { Vec2d::new(1.0, 0.0) };

        let (u0, v0) = (&self.basis[0], &self.basis[1]);

        // rotate u and v so that u is nearly aligned with the change axis
        let u = vector::combine(dir.x, u0, dir.y, v0);
        let mut v = vector::combine(-dir.y, u0, dir.x, v0);

        // re-normalize v orthogonal to the change axis
        vector::renormalize(&mut v, k, 0.0);

        // make u orthogonal to v, then re-normalize it fully aligned
        // with the change axis
        let mut u = vector::make_ortho(&u, &v);
        vector::renormalize(&mut u, k, len);

        // rotate back to the requested direction
        let u1 = vector::combine(dir.x, &u, -dir.y, &v);
        let v1 = vector::combine(dir.y, &u, dir.x, &v);

        self.basis = [u1, v1];

    }

    // restore the invariants: orthonormal basis, offset in [0, 1]
    pub fn validate(&mut self) {

        vector::normalize(&mut self.basis[0]);

        let mut b1 = vector::make_ortho(&self.basis[1], &self.basis[0]);
        vector::normalize(&mut b1);
        self.basis[1] = b1;

        if vector::norm(&self.basis[0]) == 0.0 || vector::norm(&self.basis[1]) == 0.0 {
            warn!("degenerate basis, resetting to canonical basis for dims {}", self.dims);
            self.reset_basis();
        }

        self.offset = self.offset.map(|x| x.max(0.0).min(1.0));

    }

}

//////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use super::*;

    const TOL: f64 = 1e-9;

    fn assert_orthonormal(state: &TilingState) {
        let u = &state.basis()[0];
        let v = &state.basis()[1];
        assert!((vector::norm(u) - 1.0).abs() < TOL, "|u| = {}", vector::norm(u));
        assert!((vector::norm(v) - 1.0).abs() < TOL, "|v| = {}", vector::norm(v));
        assert!(vector::dot(u, v).abs() < TOL, "u.v = {}", vector::dot(u, v));
    }

    #[test]
    fn canonical_basis_is_orthonormal() {
        for dims in 3..=7 {
            let state = TilingState::new(dims).unwrap();
            assert_orthonormal(&state);
        }
    }

    #[test]
    fn canonical_offset() {
        let five = TilingState::new(5).unwrap();
        assert!(five.offset().iter().all(|&o| o == 0.3));
        let six = TilingState::new(6).unwrap();
        assert!(six.offset().iter().all(|&o| o == 0.0));
    }

    #[test]
    fn rejects_bad_dims_and_lengths() {
        assert!(TilingState::new(2).is_err());
        assert!(TilingState::new(MAX_DIMS + 1).is_err());
        assert!(TilingState::from_parts(&[1.0, 0.0, 0.0], &[0.0, 1.0], &[0.0; 3]).is_err());
        let mut state = TilingState::new(4).unwrap();
        assert!(state.set_offset(&[0.1; 5]).is_err());
        assert!(state.set_offset(&[0.1; 4]).is_ok());
    }

    #[test]
    fn project_unproject() {
        let state = TilingState::new(5).unwrap();
        let p = Vec2d::new(1.25, -0.5);
        let q = state.project(&state.unproject(&p));
        assert!((p - q).norm() < TOL);

        let lattice = [1, 0, -2, 3, 0];
        let v = VecNd::from_iterator(5, lattice.iter().map(|&c| c as f64));
        assert!((state.project(&v) - state.project_lattice(&lattice)).norm() < TOL);
    }

    #[test]
    fn translate_offset_round_trip() {
        let mut state = TilingState::new(5).unwrap();
        let orig = state.offset().clone();
        state.translate_offset(0.73, 0.0);
        assert!(state.offset().iter().all(|&o| o >= 0.0 && o < 1.0));
        state.translate_offset(-0.73, 0.0);
        for (a, b) in orig.iter().zip(state.offset().iter()) {
            let d = (a - b).abs();
            assert!(d.min(1.0 - d) < TOL);
        }
    }

    #[test]
    fn move_axis_hits_target() {
        for dims in 3..=7 {
            for &(k, x, y) in &[(0, 0.3, 0.4), (1, 0.0, 0.0), (dims - 1, -0.5, 0.1), (0, 1.0, 0.0)] {
                let mut state = TilingState::new(dims).unwrap();
                state.move_axis(k, x, y);
                let a = state.axis(k);
                assert!((a.x - x).abs() < TOL && (a.y - y).abs() < TOL,
                        "dims {} axis {} at {:?}", dims, k, a);
                assert_orthonormal(&state);
            }
        }
    }

    #[test]
    fn move_axis_clamps_to_unit_disk() {
        let mut state = TilingState::new(5).unwrap();
        state.move_axis(2, 2.0, 2.0);
        let a = state.axis(2);
        let h = std::f64::consts::FRAC_1_SQRT_2;
        assert!((a.x - h).abs() < TOL && (a.y - h).abs() < TOL);
        assert_orthonormal(&state);
    }

    #[test]
    fn validate_restores_invariants() {
        let mut state = TilingState::from_parts(
            &[2.0, 0.0, 0.0, 1.0], &[1.0, 1.0, 0.0, 0.0], &[-0.5, 0.25, 1.5, 1.0]).unwrap();
        state.validate();
        assert_orthonormal(&state);
        assert_eq!(state.offset().as_slice(), &[0.0, 0.25, 1.0, 1.0]);

        let once = state.clone();
        state.validate();
        assert_eq!(state.offset(), once.offset());
        for i in 0..2 {
            assert!((&state.basis()[i] - &once.basis()[i]).norm() < 1e-15);
        }
    }

    #[test]
    fn validate_replaces_zero_basis() {
        let mut state = TilingState::from_parts(&[0.0; 5], &[1.0, 0.0, 0.0, 0.0, 0.0], &[0.3; 5]).unwrap();
        state.validate();
        assert_eq!(state, TilingState::new(5).unwrap());

        // parallel vectors leave nothing orthogonal
        let mut state = TilingState::from_parts(&[1.0, 1.0, 0.0], &[2.0, 2.0, 0.0], &[0.0; 3]).unwrap();
        state.validate();
        assert_eq!(state, TilingState::new(3).unwrap());
    }

}
