//////////////////////////////////////////////////////////////////////
// compact binary snapshot of a tiling (state plus style)
//
// layout, little-endian:
//
//   version: u8 (= 1)
//   dims: u8 (3..=7)
//   basis[0], basis[1]: dims x i16 each, x * 32767
//   offset: dims x u8, o * 200
//   line color: 3 x u8
//   face colors: dims*(dims-1)/2 x 3 x u8, in face type order
//
// the bytes travel as base64 "state codes".

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;

use crate::errors::*;
use crate::face::num_face_types;
use crate::state::TilingState;
use crate::style::{Rgb, Style};

pub const FORMAT_VERSION: u8 = 1;

pub const CODEC_MIN_DIMS: usize = 3;
pub const CODEC_MAX_DIMS: usize = 7;

const BASIS_SCALE: f64 = 32767.0;
const OFFSET_SCALE: f64 = 200.0;

// a decoded snapshot; state is exactly as stored, not validated
#[derive(Debug, Clone, PartialEq)]
pub struct SavedState {
    pub state: TilingState,
    pub style: Style,
}

// total encoded size for dims
pub fn encoded_len(dims: usize) -> usize {
    2 + 2 * 2 * dims + dims + 3 + 3 * num_face_types(dims)
}

//////////////////////////////////////////////////////////////////////
// bounds-checked little-endian reader

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.pos + n > self.buf.len() {
            bail!(ErrorKind::Truncated(self.pos + n, self.buf.len()));
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn i16(&mut self) -> Result<i16> {
        let b = self.take(2)?;
        Ok(i16::from_le_bytes([b[0], b[1]]))
    }

    fn rgb(&mut self) -> Result<Rgb> {
        let b = self.take(3)?;
        Ok([b[0], b[1], b[2]])
    }

}

//////////////////////////////////////////////////////////////////////

pub fn encode(state: &TilingState, style: &Style) -> Result<Vec<u8>> {

    let dims = state.dims();

    if dims < CODEC_MIN_DIMS || dims > CODEC_MAX_DIMS {
        bail!(ErrorKind::UnsupportedDims(dims));
    }

    if !style.dims_match(dims) {
        bail!(ErrorKind::LengthMismatch("palette", num_face_types(dims), style.colors.len()));
    }

    let mut buf = Vec::with_capacity(encoded_len(dims));

    buf.push(FORMAT_VERSION);
    buf.push(dims as u8);

    // float to int casts saturate, so out-of-range values clamp
    for v in state.basis() {
        for x in v.iter() {
            buf.extend_from_slice(&((x * BASIS_SCALE).round() as i16).to_le_bytes());
        }
    }

    for o in state.offset().iter() {
        buf.push((o * OFFSET_SCALE).round() as u8);
    }

    buf.extend_from_slice(&style.line_color);

    for c in &style.colors {
        buf.extend_from_slice(c);
    }

    debug_assert_eq!(buf.len(), encoded_len(dims));

    Ok(buf)

}

pub fn decode(buf: &[u8]) -> Result<SavedState> {

    let mut r = Reader { buf, pos: 0 };

    let version = r.u8()?;
    if version != FORMAT_VERSION {
        bail!(ErrorKind::UnsupportedVersion(version));
    }

    let dims = r.u8()? as usize;
    if dims < CODEC_MIN_DIMS || dims > CODEC_MAX_DIMS {
        bail!(ErrorKind::UnsupportedDims(dims));
    }

    let mut basis = [Vec::with_capacity(dims), Vec::with_capacity(dims)];
    for v in basis.iter_mut() {
        for _ in 0..dims {
            v.push(r.i16()? as f64 / BASIS_SCALE);
        }
    }

    let mut offset = Vec::with_capacity(dims);
    for _ in 0..dims {
        offset.push(r.u8()? as f64 / OFFSET_SCALE);
    }

    let line_color = r.rgb()?;

    let mut colors = Vec::with_capacity(num_face_types(dims));
    for _ in 0..num_face_types(dims) {
        colors.push(r.rgb()?);
    }

    let state = TilingState::from_parts(&basis[0], &basis[1], &offset)?;

    Ok(SavedState { state, style: Style { line_color, colors } })

}

//////////////////////////////////////////////////////////////////////
// base64 state codes

pub fn to_code(state: &TilingState, style: &Style) -> Result<String> {
    Ok(URL_SAFE.encode(encode(state, style)?))
}

// decode a state code and restore the state invariants
pub fn from_code(code: &str) -> Result<SavedState> {

    let code = code.trim();

    let bytes = URL_SAFE.decode(code)
        .or_else(|_| STANDARD.decode(code))?;

    let mut saved = decode(&bytes).map_err(|e| {
        warn!("failed decoding state code: {}", e);
        e
    })?;

    saved.state.validate();

    Ok(saved)

}

//////////////////////////////////////////////////////////////////////
