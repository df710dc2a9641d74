//////////////////////////////////////////////////////////////////////
// presentation record: face fill colors and the outline color
//
// kept apart from TilingState; renderers take both side by side.

use phf::phf_map;

use crate::errors::*;
use crate::face::num_face_types;

pub type Rgb = [u8; 3];

pub const LINE_COLOR: Rgb = [0, 0, 0];

const WHITE: Rgb = [255, 255, 255];

// dims 3 gets one color per face type
const PALETTE_3: &str = "#808080 #e8e8ff #c0c0c0";

// for other dims face type (i, i+1+j) takes color j, so the palette
// depends only on the angle between the two axes
static PALETTES: phf::Map<u8, &'static str> = phf_map! {
    4u8 => "#e8e8ff #808080 #e8e8ff",
    5u8 => "#e8e8ff #808080 #808080 #e8e8ff",
    6u8 => "#808080 #c0c0c0 #e8e8ff #c0c0c0 #808080",
    7u8 => "#c0c0c0 #e8e8ff #808080 #808080 #e8e8ff #c0c0c0",
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    pub line_color: Rgb,
    pub colors: Vec<Rgb>,   // indexed by face type
}

fn hex_byte(s: &str) -> Option<u8> {
    u8::from_str_radix(s, 16).ok()
}

// parse "#rrggbb"
pub fn parse_color(s: &str) -> Result<Rgb> {

    let digits = match s.strip_prefix('#') {
        Some(d) if d.len() == 6 && d.is_ascii() => d,
        _ => bail!(ErrorKind::InvalidColor(s.to_string())),
    };

    match (hex_byte(&digits[0..2]), hex_byte(&digits[2..4]), hex_byte(&digits[4..6])) {
        (Some(r), Some(g), Some(b)) => Ok([r, g, b]),
        _ => bail!(ErrorKind::InvalidColor(s.to_string())),
    }

}

pub fn format_color(c: &Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", c[0], c[1], c[2])
}

fn parse_palette(palette: &str) -> Result<Vec<Rgb>> {
    palette.split_whitespace().map(parse_color).collect()
}

impl Style {

    // default colors for a lattice of the given dimension
    pub fn for_dims(dims: usize) -> Self {

        let colors = if dims == 3 {
            parse_palette(PALETTE_3).unwrap_or_else(|_| vec![WHITE; 3])
        } else {

            let palette = PALETTES.get(&(dims as u8))
                .and_then(|p| parse_palette(p).ok());

            let mut colors = Vec::with_capacity(num_face_types(dims));

            for i in 0..dims - 1 {
                for j in 0..dims - i - 1 {
                    colors.push(match palette {
                        Some(ref p) => p[j],
                        None => WHITE,
                    });
                }
            }

            colors

        };

        Style { line_color: LINE_COLOR, colors }

    }

    pub fn dims_match(&self, dims: usize) -> bool {
        self.colors.len() == num_face_types(dims)
    }

    pub fn set_color(&mut self, face_type: usize, color: Rgb) -> Result<()> {
        if face_type >= self.colors.len() {
            bail!(ErrorKind::LengthMismatch("palette", face_type + 1, self.colors.len()));
        }
        self.colors[face_type] = color;
        Ok(())
    }

    // fill color for a face type as cairo-style floats
    pub fn fill_rgb(&self, face_type: usize) -> (f64, f64, f64) {
        let c = self.colors.get(face_type).unwrap_or(&WHITE);
        (c[0] as f64 / 255.0, c[1] as f64 / 255.0, c[2] as f64 / 255.0)
    }

}

//////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use super::*;
    use crate::face::face_type_index;

    #[test]
    fn colors_parse_and_format() {
        assert_eq!(parse_color("#E8e8FF").unwrap(), [0xe8, 0xe8, 0xff]);
        assert_eq!(format_color(&[0, 128, 255]), "#0080ff");
        assert!(parse_color("e8e8ff").is_err());
        assert!(parse_color("#e8e8f").is_err());
        assert!(parse_color("#gg0000").is_err());
    }

    #[test]
    fn default_palettes_cover_every_type() {
        for dims in 3..=9 {
            let style = Style::for_dims(dims);
            assert!(style.dims_match(dims));
            assert_eq!(style.line_color, LINE_COLOR);
        }
        assert_eq!(Style::for_dims(8).colors[0], WHITE);
    }

    #[test]
    fn penrose_palette_follows_axis_gap() {
        let style = Style::for_dims(5);
        let thick = [0xe8, 0xe8, 0xff];
        let thin = [0x80, 0x80, 0x80];
        // adjacent axes (gap 1) and gap 4 share a color
        assert_eq!(style.colors[face_type_index(5, 0, 1)], thick);
        assert_eq!(style.colors[face_type_index(5, 2, 3)], thick);
        assert_eq!(style.colors[face_type_index(5, 0, 4)], thick);
        assert_eq!(style.colors[face_type_index(5, 1, 3)], thin);
    }

    #[test]
    fn set_color_checks_range() {
        let mut style = Style::for_dims(4);
        assert!(style.set_color(5, [1, 2, 3]).is_ok());
        assert!(style.set_color(6, [1, 2, 3]).is_err());
        assert_eq!(style.fill_rgb(5), (1.0 / 255.0, 2.0 / 255.0, 3.0 / 255.0));
    }

}
