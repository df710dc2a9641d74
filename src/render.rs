//////////////////////////////////////////////////////////////////////
// draw a list of faces with cairo, to PNG or PDF
//
// the view plane origin sits at the center of the image and one
// lattice unit is view.scale pixels (or points, for PDF).

use std::fs::File;
use std::path::Path;

use crate::config::View;
use crate::errors::*;
use crate::face::Face;
use crate::state::TilingState;
use crate::style::{Rgb, Style};
use crate::Point2d;

//////////////////////////////////////////////////////////////////////

trait CairoVecOps {
    fn setcolor(&self, c: &Rgb);
    fn drawpoly(&self, poly: &[Point2d]);
}

impl CairoVecOps for cairo::Context {

    fn setcolor(&self, c: &Rgb) {
        self.set_source_rgb(c[0] as f64 / 255.0,
                            c[1] as f64 / 255.0,
                            c[2] as f64 / 255.0);
    }

    fn drawpoly(&self, poly: &[Point2d]) {
        for (i, p) in poly.iter().enumerate() {
            if i == 0 {
                self.move_to(p[0], p[1]);
            } else {
                self.line_to(p[0], p[1]);
            }
        }
        self.close_path();
    }

}

//////////////////////////////////////////////////////////////////////

fn draw_tiling(ctx: &cairo::Context,
               state: &TilingState,
               style: &Style,
               faces: &[Face],
               view: &View) {

    ctx.set_source_rgb(1.0, 1.0, 1.0);
    ctx.paint();

    ctx.save();

    ctx.translate(0.5 * view.width_px, 0.5 * view.height_px);
    ctx.scale(view.scale, view.scale);

    ctx.set_line_width(2.0 / view.scale);
    ctx.set_line_join(cairo::LineJoin::Bevel);

    let dims = state.dims();

    for face in faces {

        ctx.drawpoly(&face.corners(state));

        let (r, g, b) = style.fill_rgb(face.face_type(dims));
        ctx.set_source_rgb(r, g, b);
        ctx.fill_preserve();

        ctx.setcolor(&style.line_color);
        ctx.stroke();

    }

    ctx.restore();

}

pub fn render_png(filename: &str,
                  state: &TilingState,
                  style: &Style,
                  faces: &[Face],
                  view: &View) -> Result<()> {

    let surface = cairo::ImageSurface::create(
        cairo::Format::Rgb24,
        view.width_px.round() as i32,
        view.height_px.round() as i32)?;

    let ctx = cairo::Context::new(&surface);

    draw_tiling(&ctx, state, style, faces, view);

    let mut file = File::create(filename)
        .chain_err(|| format!("can't create {:}", filename))?;

    surface.write_to_png(&mut file)?;

    Ok(())

}

pub fn render_pdf(filename: &str,
                  state: &TilingState,
                  style: &Style,
                  faces: &[Face],
                  view: &View) -> Result<()> {

    let surface = cairo::PdfSurface::new(view.width_px, view.height_px, filename)?;

    let ctx = cairo::Context::new(&surface);

    draw_tiling(&ctx, state, style, faces, view);

    ctx.show_page();

    Ok(())

}

// pick the output format from the file extension
pub fn render(filename: &str,
              state: &TilingState,
              style: &Style,
              faces: &[Face],
              view: &View) -> Result<()> {

    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => render_png(filename, state, style, faces, view),
        Some("pdf") => render_pdf(filename, state, style, faces, view),
        _ => bail!("don't know how to write {:} (expected .png or .pdf)", filename),
    }

}

//////////////////////////////////////////////////////////////////////
