#[macro_use]
extern crate error_chain;

#[macro_use]
extern crate log;

use std::fs::File;
use std::io::BufReader;

use quasitile::config::{TilingSpec, View};
use quasitile::errors::*;
use quasitile::statecode;
use quasitile::{face_type_index, num_face_types, Face, Generator, Style, TilingState};

//////////////////////////////////////////////////////////////////////

// face count per type, in face type order
fn type_histogram(dims: usize, faces: &[Face]) -> Vec<usize> {

    let mut counts = vec![0; num_face_types(dims)];

    for face in faces {
        counts[face.face_type(dims)] += 1;
    }

    counts

}

#[cfg(feature = "render")]
fn write_output(filename: &str,
                state: &TilingState,
                style: &Style,
                faces: &[Face],
                view: &View) -> Result<()> {

    quasitile::render::render(filename, state, style, faces, view)
        .chain_err(|| format!("error writing {:}", filename))?;

    println!("wrote {:}", filename);

    Ok(())

}

#[cfg(not(feature = "render"))]
fn write_output(filename: &str,
                _state: &TilingState,
                _style: &Style,
                _faces: &[Face],
                _view: &View) -> Result<()> {

    warn!("built without the render feature, not writing {:}", filename);

    Ok(())

}

//////////////////////////////////////////////////////////////////////

fn run() -> Result<()> {

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() != 2 {
        eprintln!("usage: {:} DESCRIPTION_FILE", args[0]);
        std::process::exit(1);
    }

    let f = File::open(&args[1]).chain_err(|| format!("can't open {:}", args[1]))?;
    let mut reader = BufReader::new(f);

    let ts = TilingSpec::parse(&args[1], &mut reader)?;

    let (state, style) = ts.build()?;
    let view = ts.view();
    let method = ts.method();
    let dims = state.dims();

    info!("{:} tiling, dims {:}, view {:.3} x {:.3}",
          method.name(), dims, view.width(), view.height());

    let faces = method.generator().generate(&state, view.width(), view.height());

    info!("generated {:} faces", faces.len());

    let counts = type_histogram(dims, &faces);

    for i in 0..dims - 1 {
        for j in i + 1..dims {
            info!("  type ({:}, {:}): {:}", i, j, counts[face_type_index(dims, i, j)]);
        }
    }

    match statecode::to_code(&state, &style) {
        Ok(code) => println!("{:}", code),
        Err(e) => warn!("no state code for this tiling: {:}", e),
    }

    if let Some(ref output) = ts.output {
        write_output(output, &state, &style, &faces, &view)?;
    }

    Ok(())

}

quick_main!(run);
