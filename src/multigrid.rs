//////////////////////////////////////////////////////////////////////
// multigrid (de Bruijn) generator
//
// each lattice axis contributes a family of parallel grid lines in the
// view plane. every intersection of a line from family i with a line
// from family j is one face of type (i, j); its key vertex is found by
// rounding the unprojected intersection point to the lattice.

use std::f64::EPSILON;
use std::f64::consts::FRAC_1_SQRT_2;

use crate::face::Face;
use crate::generator::Generator;
use crate::state::TilingState;
use crate::{Vec2d, VecNd};

// fractional parts this close to 1/2 mean a third grid line passes
// through the intersection
const SINGULAR_EPS: f64 = 1e-10;

#[derive(Debug, Clone, Copy, Default)]
pub struct MultigridGenerator;

//////////////////////////////////////////////////////////////////////
// per-call precomputation

struct Multigrid<'a> {
    state: &'a TilingState,
    axis: Vec<Vec2d>,      // projection of each lattice axis
    cross: Vec<Vec<f64>>,  // cross[i][j] = axis[i] x axis[j]
}

impl<'a> Multigrid<'a> {

    fn new(state: &'a TilingState) -> Self {

        let dims = state.dims();
        let axis: Vec<Vec2d> = (0..dims).map(|i| state.axis(i)).collect();

        let mut cross = vec![vec![0.0; dims]; dims];

        for i in 1..dims {
            for j in 0..i {
                cross[i][j] = axis[i].x * axis[j].y - axis[j].x * axis[i].y;
                cross[j][i] = -cross[i][j];
            }
        }

        Multigrid { state, axis, cross }

    }

    // inclusive range of grid line indices per axis needed to cover
    // the box [-hbound, hbound] x [-vbound, vbound]
    fn grid_ranges(&self, hbound: f64, vbound: f64) -> (Vec<i32>, Vec<i32>) {

        let dims = self.state.dims();

        let corners = [
            self.state.unproject(&Vec2d::new(-hbound, -vbound)),
            self.state.unproject(&Vec2d::new(-hbound,  vbound)),
            self.state.unproject(&Vec2d::new( hbound, -vbound)),
            self.state.unproject(&Vec2d::new( hbound,  vbound)),
        ];

        let mut grid_min = vec![i32::MAX; dims];
        let mut grid_max = vec![i32::MIN; dims];

        for corner in &corners {
            for (i, x) in corner.iter().enumerate() {
                grid_min[i] = grid_min[i].min(x.floor() as i32);
                grid_max[i] = grid_max[i].max(x.ceil() as i32);
            }
        }

        (grid_min, grid_max)

    }

    // lattice coordinates of the key vertex of the face at the
    // intersection of grid line k1 of axis a1 and line k2 of axis a2
    fn face_vertex(&self, a1: usize, a2: usize, k1: i32, k2: i32) -> VecNd {

        let offset = self.state.offset();
        let d = self.cross[a1][a2];

        // intersection (a, b) in view plane coordinates
        let u = k1 as f64 + 0.5 - offset[a1];
        let v = k2 as f64 + 0.5 - offset[a2];
        let a = (u * self.axis[a2].y - v * self.axis[a1].y) / d;
        let b = (v * self.axis[a1].x - u * self.axis[a2].x) / d;

        let p = self.state.unproject(&Vec2d::new(a, b));

        VecNd::from_fn(p.len(), |ax, _| {

            let x = p[ax];

            if ax == a1 {
                k1 as f64
            } else if ax == a2 {
                k2 as f64
            } else if (x - x.floor() - 0.5).abs() > SINGULAR_EPS {
                x.round()
            } else if self.axis_between(a1, a2, ax) {
                // a grid line of ax also passes through here, so the
                // rounding direction picks which side of it we are on
                x.ceil()
            } else {
                x.floor()
            }

        })

    }

    // does axis ax lie between axes a1 and a2 on the cutting plane?
    // a1 and a2 are assumed non-parallel and distinct from ax.
    fn axis_between(&self, a1: usize, a2: usize, ax: usize) -> bool {

        if self.cross[a1][ax].abs() < EPSILON {
            // a1 and ax parallel: between if same direction and ax first
            self.axis[a1].dot(&self.axis[ax]) > 0.0 && ax < a1
        } else if self.cross[ax][a2].abs() < EPSILON {
            // ax and a2 parallel: between if same direction and ax first
            self.axis[ax].dot(&self.axis[a2]) > 0.0 && ax < a2
        } else {
            // rotation from a1 to a2 agrees with a1 to ax and ax to a2
            self.cross[a1][a2] * self.cross[a1][ax] > 0.0
                && self.cross[a1][a2] * self.cross[ax][a2] > 0.0
        }

    }

}

//////////////////////////////////////////////////////////////////////

impl Generator for MultigridGenerator {

    fn generate(&self, state: &TilingState, view_width: f64, view_height: f64) -> Vec<Face> {

        let dims = state.dims();
        let grid = Multigrid::new(state);

        let hbound = view_width / 2.0 + FRAC_1_SQRT_2;
        let vbound = view_height / 2.0 + FRAC_1_SQRT_2;
        let (grid_min, grid_max) = grid.grid_ranges(hbound, vbound);

        let mut faces = Vec::new();
        let mut skipped_pairs = 0;

        for i in 0..dims - 1 {
            for j in i + 1..dims {

                if grid.cross[i][j].abs() < EPSILON {
                    // parallel axes span zero-area faces
                    skipped_pairs += 1;
                    continue;
                }

                let half_diag = 0.5 * (grid.axis[i] + grid.axis[j]);

                for ki in grid_min[i]..=grid_max[i] {
                    for kj in grid_min[j]..=grid_max[j] {

                        let vert = grid.face_vertex(i, j, ki, kj);
                        let key_vert = state.project(&vert);

                        let mid = key_vert + half_diag;
                        if mid.x.abs() > hbound || mid.y.abs() > vbound {
                            continue;
                        }

                        faces.push(Face::new(i, j, key_vert));

                    }
                }

            }
        }

        debug!("multigrid: {} faces, {} parallel axis pairs skipped",
               faces.len(), skipped_pairs);

        faces

    }

}

//////////////////////////////////////////////////////////////////////
