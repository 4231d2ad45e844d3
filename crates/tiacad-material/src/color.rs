//! Color parsing across the several shapes a document may use: a hex
//! string, a named CSS-style color, an `[r, g, b]`/`[r, g, b, a]` array, or
//! an `{r, g, b, a}` map.

use serde::Deserialize;

use crate::error::{MaterialError, MaterialErrorKind, MaterialResult};

/// A resolved linear RGBA color, each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    pub fn as_rgba_bytes(&self) -> [u8; 4] {
        [
            to_byte(self.r),
            to_byte(self.g),
            to_byte(self.b),
            to_byte(self.a),
        ]
    }
}

fn to_byte(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// A color field as it appears in a document, before resolution.
///
/// Deserialization tries each shape in turn and keeps whichever matches;
/// [`ColorSpec::resolve`] does the actual parsing work.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Text(String),
    Triplet([f32; 3]),
    Quad([f32; 4]),
    Map(ColorMap),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColorMap {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "default_alpha")]
    pub a: f32,
}

fn default_alpha() -> f32 {
    1.0
}

impl ColorSpec {
    /// Resolve this spec into a concrete [`Color`].
    pub fn resolve(&self) -> MaterialResult<Color> {
        match self {
            ColorSpec::Text(text) => parse_text(text),
            ColorSpec::Triplet([r, g, b]) => Ok(Color::rgb(*r, *g, *b)),
            ColorSpec::Quad([r, g, b, a]) => Ok(Color::rgba(*r, *g, *b, *a)),
            ColorSpec::Map(map) => Ok(Color::rgba(map.r, map.g, map.b, map.a)),
        }
    }
}

fn parse_text(text: &str) -> MaterialResult<Color> {
    let trimmed = text.trim();
    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(color) = named_color(trimmed) {
        return Ok(color);
    }
    Err(MaterialError::new(
        MaterialErrorKind::InvalidColor,
        format!("'{text}' is not a recognized hex or named color"),
    ))
}

fn parse_hex(hex: &str) -> MaterialResult<Color> {
    let parse_pair = |slice: &str| -> MaterialResult<f32> {
        u8::from_str_radix(slice, 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| {
                MaterialError::new(
                    MaterialErrorKind::InvalidColor,
                    format!("'{hex}' is not valid hexadecimal"),
                )
            })
    };

    match hex.len() {
        6 => Ok(Color::rgb(
            parse_pair(&hex[0..2])?,
            parse_pair(&hex[2..4])?,
            parse_pair(&hex[4..6])?,
        )),
        8 => Ok(Color::rgba(
            parse_pair(&hex[0..2])?,
            parse_pair(&hex[2..4])?,
            parse_pair(&hex[4..6])?,
            parse_pair(&hex[6..8])?,
        )),
        _ => Err(MaterialError::new(
            MaterialErrorKind::InvalidColor,
            format!("'#{hex}' must have 6 or 8 hex digits"),
        )),
    }
}

const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::rgb(0.0, 0.0, 0.0)),
    ("white", Color::rgb(1.0, 1.0, 1.0)),
    ("red", Color::rgb(1.0, 0.0, 0.0)),
    ("green", Color::rgb(0.0, 0.502, 0.0)),
    ("blue", Color::rgb(0.0, 0.0, 1.0)),
    ("yellow", Color::rgb(1.0, 1.0, 0.0)),
    ("orange", Color::rgb(1.0, 0.647, 0.0)),
    ("purple", Color::rgb(0.502, 0.0, 0.502)),
    ("cyan", Color::rgb(0.0, 1.0, 1.0)),
    ("magenta", Color::rgb(1.0, 0.0, 1.0)),
    ("gray", Color::rgb(0.502, 0.502, 0.502)),
    ("grey", Color::rgb(0.502, 0.502, 0.502)),
    ("silver", Color::rgb(0.753, 0.753, 0.753)),
    ("gold", Color::rgb(1.0, 0.843, 0.0)),
    ("navy", Color::rgb(0.0, 0.0, 0.502)),
    ("teal", Color::rgb(0.0, 0.502, 0.502)),
    ("maroon", Color::rgb(0.502, 0.0, 0.0)),
    ("olive", Color::rgb(0.502, 0.502, 0.0)),
    ("lime", Color::rgb(0.0, 1.0, 0.0)),
    ("brown", Color::rgb(0.647, 0.165, 0.165)),
    ("tan", Color::rgb(0.824, 0.706, 0.549)),
    ("beige", Color::rgb(0.961, 0.961, 0.863)),
    ("ivory", Color::rgb(1.0, 1.0, 0.941)),
    ("coral", Color::rgb(1.0, 0.498, 0.314)),
    ("salmon", Color::rgb(0.980, 0.502, 0.447)),
    ("khaki", Color::rgb(0.941, 0.902, 0.549)),
    ("plum", Color::rgb(0.867, 0.627, 0.867)),
    ("orchid", Color::rgb(0.855, 0.439, 0.839)),
    ("steelblue", Color::rgb(0.275, 0.510, 0.706)),
    ("indigo", Color::rgb(0.294, 0.0, 0.510)),
];

fn named_color(name: &str) -> Option<Color> {
    let lower = name.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == lower)
        .map(|(_, c)| *c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        let color = parse_text("#ff8000").unwrap();
        assert!((color.r - 1.0).abs() < 1e-6);
        assert!((color.g - (0x80 as f32 / 255.0)).abs() < 1e-6);
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn parses_eight_digit_hex_with_alpha() {
        let color = parse_text("#00000080").unwrap();
        assert!((color.a - (0x80 as f32 / 255.0)).abs() < 1e-6);
    }

    #[test]
    fn parses_named_color_case_insensitively() {
        let color = parse_text("SteelBlue").unwrap();
        assert!((color.b - 0.706).abs() < 1e-3);
    }

    #[test]
    fn rejects_unknown_text() {
        let err = parse_text("not-a-color").unwrap_err();
        assert_eq!(err.kind, MaterialErrorKind::InvalidColor);
    }

    #[test]
    fn triplet_defaults_to_opaque() {
        let spec = ColorSpec::Triplet([0.1, 0.2, 0.3]);
        let color = spec.resolve().unwrap();
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn map_shape_resolves() {
        let spec = ColorSpec::Map(ColorMap {
            r: 0.1,
            g: 0.2,
            b: 0.3,
            a: 0.4,
        });
        let color = spec.resolve().unwrap();
        assert_eq!(color.a, 0.4);
    }
}
