//////////////////////////////////////////////////////////////////////
// rhombic faces of the tiling

use crate::state::TilingState;
use crate::{Point2d, Vec2d};

// one tile: spanned by lattice axes axis1 < axis2, anchored at the
// projection of its lowest lattice corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub axis1: usize,
    pub axis2: usize,
    pub key_vert: Vec2d,
}

// number of distinct face types (unordered axis pairs)
pub fn num_face_types(dims: usize) -> usize {
    dims * (dims - 1) / 2
}

// dense index of the unordered pair {i, j}: pairs are numbered
// (0,1), (0,2), ..., (0,n-1), (1,2), ...
pub fn face_type_index(dims: usize, i: usize, j: usize) -> usize {

    let (i, j) = if i < j { (i, j) } else { (j, i) };

    assert!(i != j && j < dims, "face_type_index: bad axis pair ({}, {})", i, j);

    i * (2 * dims - i - 1) / 2 + (j - i - 1)

}

impl Face {

    pub fn new(axis1: usize, axis2: usize, key_vert: Vec2d) -> Self {
        debug_assert!(axis1 < axis2);
        Face { axis1, axis2, key_vert }
    }

    pub fn face_type(&self, dims: usize) -> usize {
        face_type_index(dims, self.axis1, self.axis2)
    }

    // corners in drawing order
    pub fn corners(&self, state: &TilingState) -> [Point2d; 4] {

        let a1 = state.axis(self.axis1);
        let a2 = state.axis(self.axis2);
        let p = Point2d::from(self.key_vert);

        [p, p + a1, p + a1 + a2, p + a2]

    }

    pub fn midpoint(&self, state: &TilingState) -> Point2d {
        Point2d::from(self.key_vert + 0.5 * (state.axis(self.axis1) + state.axis(self.axis2)))
    }

}

//////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn type_indices_are_dense() {
        for dims in 3..=7 {
            let mut seen = vec![false; num_face_types(dims)];
            let mut expected = 0;
            for i in 0..dims - 1 {
                for j in i + 1..dims {
                    let t = face_type_index(dims, i, j);
                    assert_eq!(t, expected);
                    assert_eq!(face_type_index(dims, j, i), t);
                    seen[t] = true;
                    expected += 1;
                }
            }
            assert!(seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn corners_close_the_rhombus() {
        let state = TilingState::new(5).unwrap();
        let face = Face::new(1, 3, Vec2d::new(0.5, -0.25));
        let c = face.corners(&state);
        assert_eq!(c[0], Point2d::new(0.5, -0.25));
        let diag = (c[2] - c[0]) - (state.axis(1) + state.axis(3));
        assert!(diag.norm() < 1e-12);
        let mid = face.midpoint(&state);
        assert!((mid - (c[0] + 0.5 * (c[2] - c[0]))).norm() < 1e-12);
        assert_eq!(face.face_type(5), 5);
    }

}
