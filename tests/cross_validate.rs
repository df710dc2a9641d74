// the cut-and-project and multigrid generators describe the same
// tiling, so away from the view border they must produce exactly the
// same faces

use std::collections::HashSet;

use quasitile::config::TilingSpec;
use quasitile::{
    num_face_types, CutProjectGenerator, Face, Generator, Method,
    MultigridGenerator, TilingState,
};

const VIEW_W: f64 = 800.0 / 60.0;
const VIEW_H: f64 = 600.0 / 60.0;

type FaceKey = (usize, usize, i64, i64);

// faces whose midpoint lies inside the view, keyed by type and
// (rounded) key vertex
fn inner_faces(state: &TilingState, faces: &[Face]) -> HashSet<FaceKey> {

    let mut keys = HashSet::new();

    for f in faces {
        let mid = f.midpoint(state);
        if mid.x.abs() <= VIEW_W / 2.0 && mid.y.abs() <= VIEW_H / 2.0 {
            let key = (f.axis1, f.axis2,
                       (f.key_vert.x * 1e5).round() as i64,
                       (f.key_vert.y * 1e5).round() as i64);
            assert!(keys.insert(key), "duplicate face {:?}", f);
        }
    }

    keys

}

fn compare(state: &TilingState) -> usize {

    let cp = CutProjectGenerator::default().generate(state, VIEW_W, VIEW_H);
    let mg = MultigridGenerator.generate(state, VIEW_W, VIEW_H);

    let a = inner_faces(state, &cp);
    let b = inner_faces(state, &mg);

    assert_eq!(a.difference(&b).count(), 0, "faces only from cut-and-project");
    assert_eq!(b.difference(&a).count(), 0, "faces only from multigrid");

    a.len()

}

#[test]
fn generators_agree_on_canonical_states() {

    let expected = [222, 334, 412, 502, 576];

    for (dims, &count) in (3..=7).zip(expected.iter()) {
        let state = TilingState::new(dims).unwrap();
        assert_eq!(compare(&state), count, "dims {}", dims);
    }

}

#[test]
fn generators_agree_after_edits() {

    let mut state = TilingState::new(5).unwrap();
    state.move_axis(1, 0.2, -0.45);
    state.set_offset(&[0.1, 0.7, 0.25, 0.9, 0.4]).unwrap();

    assert!(compare(&state) > 0);

}

#[test]
fn cut_project_totals() {

    let expected = [399, 487, 652, 801, 947];

    for (dims, &count) in (3..=7).zip(expected.iter()) {
        let state = TilingState::new(dims).unwrap();
        let walk = CutProjectGenerator::default().generate_with_edges(&state, VIEW_W, VIEW_H);
        assert!(!walk.truncated);
        assert_eq!(walk.faces.len(), count, "dims {}", dims);
    }

}

#[test]
fn every_face_type_appears() {

    for dims in 3..=7 {

        let state = TilingState::new(dims).unwrap();

        for method in &[Method::CutProject, Method::Multigrid] {

            let faces = method.generator().generate(&state, VIEW_W, VIEW_H);

            let types: HashSet<usize> = faces.iter()
                .map(|f| f.face_type(dims))
                .collect();

            assert_eq!(types.len(), num_face_types(dims),
                       "dims {} with {}", dims, method.name());

        }

    }

}

#[test]
fn description_file_drives_generation() {

    let text = "
        dims 5
        method cutproject
        view 800 600
        scale 60
    ";

    let ts = TilingSpec::parse("penrose.tiling", &mut text.as_bytes()).unwrap();
    let (state, _style) = ts.build().unwrap();
    let view = ts.view();

    let faces = ts.method().generator().generate(&state, view.width(), view.height());
    assert_eq!(faces.len(), 652);

}
