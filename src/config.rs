//////////////////////////////////////////////////////////////////////
// tiling description files
//
// one keyword per line followed by its arguments; '#' starts a
// comment. for example:
//
//   dims 5
//   method cutproject
//   view 800 600
//   scale 60
//   move_axis 0 0.5 0.1
//   color 0 #ff8000
//   output penrose.png

use std::io::BufRead;

use crate::errors::*;
use crate::generator::Method;
use crate::state::TilingState;
use crate::statecode;
use crate::style::{parse_color, Rgb, Style};

pub const DEFAULT_DIMS: usize = 5;

// view defaults, in pixels and pixels per lattice unit
pub const VIEW_WIDTH: f64 = 800.0;
pub const VIEW_HEIGHT: f64 = 600.0;
pub const GRID_SCALE: f64 = 60.0;
pub const GRID_SCALE_MIN: f64 = 30.0;
pub const GRID_SCALE_MAX: f64 = 290.0;

// interactive edits, applied in file order after the base state is set
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    MoveAxis(usize, f64, f64),
    Pan(f64, f64),
}

// an overall tiling description
#[derive(Debug, Clone, PartialEq)]
pub struct TilingSpec {
    pub dims: usize,                 // lattice dimension
    pub method: Option<Method>,      // which generator to run
    pub view: Option<(f64, f64)>,    // viewport size in pixels
    pub scale: f64,                  // pixels per lattice unit
    pub offset: Option<Vec<f64>>,    // one value, or one per axis
    pub basis0: Option<Vec<f64>>,
    pub basis1: Option<Vec<f64>>,
    pub line_color: Option<Rgb>,
    pub colors: Vec<(usize, Rgb)>,   // face type overrides
    pub code: Option<String>,        // base64 state code to start from
    pub output: Option<String>,      // rendered image path
    pub edits: Vec<Edit>,
}

// viewport in lattice units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub width_px: f64,
    pub height_px: f64,
    pub scale: f64,
}

impl View {

    pub fn width(&self) -> f64 {
        self.width_px / self.scale
    }

    pub fn height(&self) -> f64 {
        self.height_px / self.scale
    }

}

//////////////////////////////////////////////////////////////////////
// macros for merging individual fields of TilingSpec

macro_rules! copy_field {

    ($dst:ident, $src:ident, $field:ident, $null:expr) => (
        if $src.$field != $null {
            if $dst.$field != $null {
                bail!("{:} is already set", stringify!($field));
            }
            $dst.$field = $src.$field;
        }
    );

    ($dst:ident, $src:ident, $field:ident) => (
        if $src.$field.is_some() {
            if $dst.$field.is_some() {
                bail!("{:} is already set", stringify!($field));
            }
            $dst.$field = $src.$field;
        }
    )

}

//////////////////////////////////////////////////////////////////////

fn parse_values<T: std::str::FromStr>(tokens: &[&str]) -> Result<Vec<T>> {

    let mut rval = Vec::new();

    for value in tokens {
        if let Ok(x) = value.parse::<T>() {
            rval.push(x);
        } else {
            bail!("invalid value: {:}", value);
        }
    }

    Ok(rval)

}

fn expect_count(keyword: &str, rest: &[&str], count: usize) -> Result<()> {
    if rest.len() != count {
        bail!("{:} takes {:} argument(s), got {:}", keyword, count, rest.len());
    }
    Ok(())
}

impl Default for TilingSpec {
    fn default() -> Self {
        TilingSpec::new()
    }
}

impl TilingSpec {

    pub fn new() -> TilingSpec {
        TilingSpec {
            dims: usize::MAX,
            method: None,
            view: None,
            scale: -1.0,
            offset: None,
            basis0: None,
            basis1: None,
            line_color: None,
            colors: Vec::new(),
            code: None,
            output: None,
            edits: Vec::new(),
        }
    }

    fn update(&mut self, other: TilingSpec) -> Result<()> {

        copy_field!(self, other, dims, usize::MAX);
        copy_field!(self, other, method);
        copy_field!(self, other, view);
        copy_field!(self, other, scale, -1.0);
        copy_field!(self, other, offset);
        copy_field!(self, other, basis0);
        copy_field!(self, other, basis1);
        copy_field!(self, other, line_color);
        copy_field!(self, other, code);
        copy_field!(self, other, output);

        self.colors.extend(other.colors);
        self.edits.extend(other.edits);

        Ok(())

    }

    fn parse_keyword(keyword: &str, rest: &[&str]) -> Result<TilingSpec> {

        let mut update = TilingSpec::new();

        match keyword {

            "dims" => {
                expect_count(keyword, rest, 1)?;
                update.dims = parse_values::<usize>(rest)?[0];
            },

            "method" => {
                expect_count(keyword, rest, 1)?;
                match Method::from_name(rest[0]) {
                    Some(m) => update.method = Some(m),
                    None => bail!("unexpected value \"{:}\" for method, expected one of: {{\"{:}\"}}",
                                  rest[0], Method::names().join("\", \"")),
                }
            },

            "view" => {
                expect_count(keyword, rest, 2)?;
                let wh: Vec<f64> = parse_values(rest)?;
                if wh[0] <= 0.0 || wh[1] <= 0.0 {
                    bail!("view size must be positive");
                }
                update.view = Some((wh[0], wh[1]));
            },

            "scale" => {
                expect_count(keyword, rest, 1)?;
                let scale = parse_values::<f64>(rest)?[0];
                update.scale = scale.max(GRID_SCALE_MIN).min(GRID_SCALE_MAX);
            },

            "offset" => {
                update.offset = Some(parse_values(rest)?);
            },

            "basis0" => {
                update.basis0 = Some(parse_values(rest)?);
            },

            "basis1" => {
                update.basis1 = Some(parse_values(rest)?);
            },

            "move_axis" => {
                expect_count(keyword, rest, 3)?;
                let axis = parse_values::<usize>(&rest[0..1])?[0];
                let xy: Vec<f64> = parse_values(&rest[1..])?;
                update.edits.push(Edit::MoveAxis(axis, xy[0], xy[1]));
            },

            "pan" => {
                expect_count(keyword, rest, 2)?;
                let d: Vec<f64> = parse_values(rest)?;
                update.edits.push(Edit::Pan(d[0], d[1]));
            },

            "line_color" => {
                expect_count(keyword, rest, 1)?;
                update.line_color = Some(parse_color(rest[0])?);
            },

            "color" => {
                expect_count(keyword, rest, 2)?;
                let face_type = parse_values::<usize>(&rest[0..1])?[0];
                update.colors.push((face_type, parse_color(rest[1])?));
            },

            "code" => {
                expect_count(keyword, rest, 1)?;
                update.code = Some(rest[0].to_string());
            },

            "output" => {
                expect_count(keyword, rest, 1)?;
                update.output = Some(rest[0].to_string());
            },

            _ => { bail!("unrecognized keyword: {:}", keyword); }

        };

        Ok(update)

    }

    fn update_from(&mut self, line: &str) -> Result<()> {

        // '#' also opens a color, so any token starting with '#' that
        // is not a color begins a comment
        let tokens: Vec<&str> = line.split_whitespace()
            .take_while(|t| !t.starts_with('#') || parse_color(t).is_ok())
            .collect();

        if tokens.is_empty() {
            return Ok(());
        }

        let keyword = tokens[0];
        let rest = &tokens[1..];

        let update = Self::parse_keyword(keyword, rest).chain_err(
            || format!("while parsing keyword {:}", keyword))?;

        self.update(update)

    }

    pub fn parse(filename: &str, istr: &mut impl BufRead) -> Result<TilingSpec> {

        let mut ts = TilingSpec::new();
        let mut lineno = 0;

        loop {

            let mut line = String::new();

            lineno += 1;

            let len = istr.read_line(&mut line).chain_err(|| format!("{:}:{:}: read error", filename, lineno))?;

            if len == 0 {
                break;
            }

            ts.update_from(line.as_str()).chain_err(|| format!("{:}:{:}: parse error", filename, lineno))?;

        }

        Ok(ts)

    }

    pub fn method(&self) -> Method {
        self.method.unwrap_or_default()
    }

    pub fn view(&self) -> View {
        let (width_px, height_px) = self.view.unwrap_or((VIEW_WIDTH, VIEW_HEIGHT));
        let scale = if self.scale < 0.0 { GRID_SCALE } else { self.scale };
        View { width_px, height_px, scale }
    }

    // construct the state and style described by the file
    pub fn build(&self) -> Result<(TilingState, Style)> {

        let (mut state, mut style) = match self.code {

            Some(ref code) => {
                let saved = statecode::from_code(code).chain_err(|| "invalid state code")?;
                if self.dims != usize::MAX && self.dims != saved.state.dims() {
                    bail!("dims {:} conflicts with state code dims {:}",
                          self.dims, saved.state.dims());
                }
                (saved.state, saved.style)
            },

            None => {
                let dims = if self.dims == usize::MAX { DEFAULT_DIMS } else { self.dims };
                (TilingState::new(dims)?, Style::for_dims(dims))
            }

        };

        let dims = state.dims();

        match (&self.basis0, &self.basis1) {
            (Some(b0), Some(b1)) => state.set_basis(b0, b1)?,
            (None, None) => {},
            _ => bail!("basis0 and basis1 must be given together"),
        }

        if let Some(ref offset) = self.offset {
            if offset.len() == 1 {
                state.set_offset(&vec![offset[0]; dims])?;
            } else {
                state.set_offset(offset)?;
            }
        }

        state.validate();

        for edit in &self.edits {
            match *edit {
                Edit::MoveAxis(axis, x, y) => {
                    if axis >= dims {
                        bail!("move_axis: axis {:} out of range for dims {:}", axis, dims);
                    }
                    state.move_axis(axis, x, y);
                },
                Edit::Pan(dx, dy) => state.translate_offset(dx, dy),
            }
        }

        if let Some(c) = self.line_color {
            style.line_color = c;
        }

        for &(face_type, c) in &self.colors {
            style.set_color(face_type, c).chain_err(|| format!("color {:}", face_type))?;
        }

        Ok((state, style))

    }

}

//////////////////////////////////////////////////////////////////////
