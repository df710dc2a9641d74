//////////////////////////////////////////////////////////////////////
// cut-and-project generator
//
// walk the lattice outward from the cell containing the offset,
// keeping in-cut vertices whose projections land near the view, then
// emit a face for every unit square of kept vertices whose four corners
// are all in the cut.

use std::collections::HashMap;
use std::collections::hash_map::Entry::{Occupied, Vacant};

use crate::check::CheckAxes;
use crate::face::Face;
use crate::generator::Generator;
use crate::state::{TilingState, MAX_DIMS};
use crate::Vec2d;

// stop walking after this many kept vertices
pub const VERTEX_LIMIT: usize = 20000;

// how far past the view edges vertices are still kept
const VIEW_MARGIN: f64 = 1.5;

//////////////////////////////////////////////////////////////////////
// memoized lattice vertices for a single generation pass

// integer lattice coordinates; components past dims stay zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct LatticeKey([i32; MAX_DIMS]);

#[derive(Debug)]
struct Vertex {
    key: LatticeKey,
    pcoord: Vec2d,
    in_cut: bool,
    seen: bool,
}

struct VertexCache<'a> {
    state: &'a TilingState,
    checks: CheckAxes,
    index: HashMap<LatticeKey, usize>,
    verts: Vec<Vertex>,
}

impl<'a> VertexCache<'a> {

    fn new(state: &'a TilingState) -> Self {
        VertexCache {
            state,
            checks: CheckAxes::new(state),
            index: HashMap::new(),
            verts: Vec::new(),
        }
    }

    // index of the vertex at key, testing cut membership the first
    // time it is seen
    fn get(&mut self, key: LatticeKey) -> usize {

        match self.index.entry(key) {

            Occupied(o) => *o.get(),

            Vacant(v) => {

                let coords = &key.0[..self.state.dims()];

                let vidx = self.verts.len();

                self.verts.push(Vertex {
                    key,
                    pcoord: self.state.project_lattice(coords),
                    in_cut: self.checks.contains_lattice(coords),
                    seen: false,
                });

                v.insert(vidx);

                vidx

            }

        }

    }

    fn neighbor(&mut self, vidx: usize, axis: usize, delta: i32) -> usize {
        let mut key = self.verts[vidx].key;
        key.0[axis] += delta;
        self.get(key)
    }

    fn in_cut(&self, vidx: usize) -> bool {
        self.verts[vidx].in_cut
    }

}

//////////////////////////////////////////////////////////////////////

// everything one walk produces
#[derive(Debug, Clone)]
pub struct WalkResult {
    pub faces: Vec<Face>,
    pub edges: Vec<(Vec2d, Vec2d)>,
    pub visited: usize,
    pub kept: usize,
    pub truncated: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct CutProjectGenerator {
    pub vertex_limit: usize,
}

impl Default for CutProjectGenerator {
    fn default() -> Self {
        CutProjectGenerator { vertex_limit: VERTEX_LIMIT }
    }
}

impl CutProjectGenerator {

    pub fn with_vertex_limit(vertex_limit: usize) -> Self {
        CutProjectGenerator { vertex_limit }
    }

    pub fn generate_with_edges(&self,
                               state: &TilingState,
                               view_width: f64,
                               view_height: f64) -> WalkResult {

        let dims = state.dims();
        let mut cache = VertexCache::new(state);

        let hbound = view_width / 2.0 + VIEW_MARGIN;
        let vbound = view_height / 2.0 + VIEW_MARGIN;

        // start with all vertices of the hypercube containing the offset
        let mut corner = LatticeKey([0; MAX_DIMS]);
        for (i, o) in state.offset().iter().enumerate() {
            corner.0[i] = o.floor() as i32;
        }

        let mut start = vec![cache.get(corner)];
        for i in 0..dims {
            for j in 0..start.len() {
                let n = cache.neighbor(start[j], i, 1);
                start.push(n);
            }
        }

        let mut stack: Vec<usize> = start.into_iter()
            .filter(|&vidx| cache.in_cut(vidx))
            .collect();

        // depth-first traversal of the in-cut lattice points
        let mut kept = Vec::new();
        let mut visited = 0;

        while kept.len() < self.vertex_limit {

            let vidx = match stack.pop() {
                Some(vidx) => vidx,
                None => break,
            };

            visited += 1;

            if cache.verts[vidx].seen {
                continue;
            }
            cache.verts[vidx].seen = true;

            let vert = &cache.verts[vidx];

            if !vert.in_cut
                || vert.pcoord.x.abs() > hbound
                || vert.pcoord.y.abs() > vbound {
                continue;
            }

            kept.push(vidx);

            for i in 0..dims {
                for &delta in &[-1, 1] {
                    let n = cache.neighbor(vidx, i, delta);
                    if !cache.verts[n].seen {
                        stack.push(n);
                    }
                }
            }

        }

        let truncated = kept.len() >= self.vertex_limit;

        if truncated {
            warn!("cut-and-project walk hit the {} vertex limit, tiling may be incomplete",
                  self.vertex_limit);
        }

        // close up edges and faces among the kept vertices
        let mut faces = Vec::new();
        let mut edges = Vec::new();

        for &vidx in &kept {

            let p0 = cache.verts[vidx].pcoord;

            for i in 0..dims {

                let n1 = cache.neighbor(vidx, i, 1);

                if !cache.in_cut(n1) {
                    continue;
                }

                edges.push((p0, cache.verts[n1].pcoord));

                for j in i + 1..dims {

                    let n2 = cache.neighbor(vidx, j, 1);
                    let n3 = cache.neighbor(n1, j, 1);

                    if cache.in_cut(n2) && cache.in_cut(n3) {
                        faces.push(Face::new(i, j, p0));
                    }

                }

            }

        }

        debug!("cut-and-project: visited {}, cached {}, kept {} vertices, {} edges, {} faces",
               visited, cache.verts.len(), kept.len(), edges.len(), faces.len());

        WalkResult {
            faces,
            edges,
            visited,
            kept: kept.len(),
            truncated,
        }

    }

}

impl Generator for CutProjectGenerator {

    fn generate(&self, state: &TilingState, view_width: f64, view_height: f64) -> Vec<Face> {
        self.generate_with_edges(state, view_width, view_height).faces
    }

}

//////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use super::*;
    use std::collections::HashSet;

    fn canonical_walk(dims: usize, w: f64, h: f64) -> WalkResult {
        let state = TilingState::new(dims).unwrap();
        CutProjectGenerator::default().generate_with_edges(&state, w, h)
    }

    #[test]
    fn penrose_golden_count() {
        let walk = canonical_walk(5, 800.0 / 60.0, 600.0 / 60.0);
        assert!(!walk.truncated);
        assert_eq!(walk.kept, 656);
        assert_eq!(walk.faces.len(), 652);

        let pairs: HashSet<(usize, usize)> = walk.faces.iter()
            .map(|f| (f.axis1, f.axis2))
            .collect();
        assert_eq!(pairs.len(), 10);
        assert!(walk.faces.iter().all(|f| f.axis1 < f.axis2));
    }

    #[test]
    fn faces_are_unique() {
        let walk = canonical_walk(7, 8.0, 8.0);
        let mut seen = HashSet::new();
        for f in &walk.faces {
            let key = (f.axis1, f.axis2,
                       (f.key_vert.x * 1e6).round() as i64,
                       (f.key_vert.y * 1e6).round() as i64);
            assert!(seen.insert(key), "duplicate face {:?}", f);
        }
    }

    #[test]
    fn every_vertex_tested_once() {
        let state = TilingState::new(6).unwrap();
        let mut cache = VertexCache::new(&state);
        let a = cache.get(LatticeKey([0; MAX_DIMS]));
        let b = cache.neighbor(a, 3, 1);
        let c = cache.neighbor(b, 3, -1);
        assert_eq!(a, c);
        assert_eq!(cache.verts.len(), 2);
    }

    #[test]
    fn vertex_limit_truncates_quietly() {
        let state = TilingState::new(5).unwrap();
        let walk = CutProjectGenerator::with_vertex_limit(50)
            .generate_with_edges(&state, 20.0, 20.0);
        assert!(walk.truncated);
        assert_eq!(walk.kept, 50);
        assert!(!walk.faces.is_empty());
    }

    #[test]
    fn edges_join_unit_neighbors() {
        let state = TilingState::new(5).unwrap();
        let walk = CutProjectGenerator::default().generate_with_edges(&state, 4.0, 4.0);
        assert!(!walk.edges.is_empty());
        for (a, b) in &walk.edges {
            assert!(((b - a).norm() - (0.4f64).sqrt()).abs() < 1e-9);
        }
    }

}
