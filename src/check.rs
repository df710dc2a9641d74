//////////////////////////////////////////////////////////////////////
// cut-membership oracle
//
// every triple of axes (i, j, k) gives a normal to the cutting plane
// inside the 3-space spanned by those axes. a lattice point is in the
// cut when its dot product with each normal falls inside the range
// swept by the offset unit hypercube.

use std::f64::EPSILON;

use crate::state::TilingState;
use crate::vector;
use crate::VecNd;

// half-open interval test tolerance
pub const CUT_CHECK_EPS: f64 = 1e3 * EPSILON;

#[derive(Debug, Clone)]
pub struct CheckAxes {
    axes: Vec<VecNd>,
    min: Vec<f64>,
    max: Vec<f64>,
}

// all 2^n vertices of the unit hypercube centered at the origin
pub fn hypercube_vertices(n: usize) -> Vec<VecNd> {
    (0..(1usize << n)).map(|bits| {
        VecNd::from_fn(n, |d, _| if (bits >> d) & 1 == 1 { 0.5 } else { -0.5 })
    }).collect()
}

// zero components that are only rounding noise
fn snap(x: f64) -> f64 {
    if x.abs() <= EPSILON { 0.0 } else { x }
}

impl CheckAxes {

    pub fn new(state: &TilingState) -> Self {

        let dims = state.dims();
        let b0 = &state.basis()[0];
        let b1 = &state.basis()[1];

        let mut axes = Vec::new();

        for i in 0..dims - 2 {
            for j in i + 1..dims - 1 {
                for k in j + 1..dims {

                    let mut a = vector::zero(dims);

                    a[i] = snap(b0[k] * b1[j] - b0[j] * b1[k]);
                    a[j] = snap(b0[i] * b1[k] - b0[k] * b1[i]);
                    a[k] = snap(b0[j] * b1[i] - b0[i] * b1[j]);

                    vector::normalize(&mut a);

                    // degenerate triple: plane contains a direction of it
                    if vector::norm(&a) != 0.0 {
                        axes.push(a);
                    }

                }
            }
        }

        let cube: Vec<VecNd> = hypercube_vertices(dims).into_iter()
            .map(|v| v + state.offset())
            .collect();

        let mut min = Vec::with_capacity(axes.len());
        let mut max = Vec::with_capacity(axes.len());

        for a in &axes {

            let (lo, hi) = cube.iter()
                .map(|v| vector::dot(v, a))
                .fold((f64::INFINITY, f64::NEG_INFINITY),
                      |(lo, hi), d| (lo.min(d), hi.max(d)));

            min.push(lo);
            max.push(hi);

        }

        CheckAxes { axes, min, max }

    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    pub fn axes(&self) -> &[VecNd] {
        &self.axes
    }

    // bounds [min, max] for check axis idx
    pub fn bounds(&self, idx: usize) -> (f64, f64) {
        (self.min[idx], self.max[idx])
    }

    fn dot_coords(a: &VecNd, coords: &[f64]) -> f64 {
        assert_eq!(a.len(), coords.len(), "cut check: mismatched vector lengths");
        a.iter().zip(coords.iter()).map(|(x, y)| x * y).sum()
    }

    // is the point in the cut? min < d <= max, with the low side strict
    // so points exactly on a window boundary are only claimed once
    pub fn contains(&self, coords: &[f64]) -> bool {

        self.axes.iter().enumerate().all(|(i, a)| {
            let d = Self::dot_coords(a, coords);
            d - self.min[i] > CUT_CHECK_EPS && self.max[i] - d >= -CUT_CHECK_EPS
        })

    }

    pub fn contains_lattice(&self, coords: &[i32]) -> bool {
        let v: Vec<f64> = coords.iter().map(|&c| c as f64).collect();
        self.contains(&v)
    }

    // one character per check axis, for debugging seams:
    // '+' on max boundary, '-' on min boundary, '=' inside, '_' outside
    pub fn status(&self, coords: &[f64]) -> String {

        self.axes.iter().enumerate().map(|(i, a)| {
            let d = Self::dot_coords(a, coords);
            if (self.max[i] - d).abs() <= CUT_CHECK_EPS {
                '+'
            } else if (d - self.min[i]).abs() <= CUT_CHECK_EPS {
                '-'
            } else if self.min[i] < d && d < self.max[i] {
                '='
            } else {
                '_'
            }
        }).collect()

    }

}

//////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn hypercube_has_all_sign_patterns() {
        let verts = hypercube_vertices(3);
        assert_eq!(verts.len(), 8);
        let sum: f64 = verts.iter().map(|v| v.sum()).sum();
        assert_eq!(sum, 0.0);
        assert!(verts.iter().all(|v| v.iter().all(|x| x.abs() == 0.5)));
    }

    #[test]
    fn canonical_penrose_checks() {
        let state = TilingState::new(5).unwrap();
        let checks = CheckAxes::new(&state);
        assert_eq!(checks.len(), 10);
        for (i, a) in checks.axes().iter().enumerate() {
            assert!((vector::norm(a) - 1.0).abs() < 1e-12);
            // normals are orthogonal to the cutting plane
            assert!(vector::dot(a, &state.basis()[0]).abs() < 1e-12);
            assert!(vector::dot(a, &state.basis()[1]).abs() < 1e-12);
            let (lo, hi) = checks.bounds(i);
            assert!(lo < hi);
        }
    }

    #[test]
    fn degenerate_triples_are_dropped() {
        // plane spanned by lattice axes 0 and 1
        let state = TilingState::from_parts(
            &[1.0, 0.0, 0.0, 0.0], &[0.0, 1.0, 0.0, 0.0], &[0.0; 4]).unwrap();
        let checks = CheckAxes::new(&state);
        // only triples containing both 0 and 1 give a nonzero normal
        assert_eq!(checks.len(), 2);
    }

    #[test]
    fn seed_cell_membership() {
        let state = TilingState::new(5).unwrap();
        let checks = CheckAxes::new(&state);
        // the origin lies inside the window around offset 0.3
        let origin = [0.0; 5];
        assert!(checks.contains(&origin));
        assert!(checks.contains_lattice(&[0; 5]));
        assert!(checks.status(&origin).chars().all(|c| c == '='));
        // far from the plane in the perpendicular direction
        assert!(!checks.contains_lattice(&[3, -3, 3, -3, 3]));
    }

}
