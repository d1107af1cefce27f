//! RGB colors for diagram markup.

use crate::error::SchemaDocError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An RGB color, written as an uppercase `#RRGGBB` triplet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    /// Creates a color from its channels
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#RRGGBB` hex triplet.
    ///
    /// # Errors
    /// Returns an invalid argument error unless the text is exactly a `#`
    /// followed by six hex digits
    pub fn from_hex_triplet(text: &str) -> crate::Result<Self> {
        let invalid = || SchemaDocError::invalid_argument(format!("Bad color, {:?}", text));

        let digits = text.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            digits
                .get(range)
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .ok_or_else(invalid)
        };
        Ok(Self::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Converts hue, saturation and value to a color.
    ///
    /// Hue wraps around the unit interval; channels that fall outside
    /// 0..=255 are clamped.
    #[allow(clippy::cast_possible_truncation, clippy::many_single_char_names)]
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let normalized_hue = hue - hue.floor();
        let sector = (normalized_hue * 6.0) as i32;
        let f = normalized_hue * 6.0 - sector as f32;
        let p = value * (1.0 - saturation);
        let q = value * (1.0 - f * saturation);
        let t = value * (1.0 - (1.0 - f) * saturation);

        match sector {
            0 => Self::from_unit_rgb(value, t, p),
            1 => Self::from_unit_rgb(q, value, p),
            2 => Self::from_unit_rgb(p, value, t),
            3 => Self::from_unit_rgb(p, q, value),
            4 => Self::from_unit_rgb(t, p, value),
            _ => Self::from_unit_rgb(value, p, q),
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_unit_rgb(r: f32, g: f32, b: f32) -> Self {
        let channel = |unit: f32| (unit * 255.0 + 0.5).trunc().clamp(0.0, 255.0) as u8;
        Self::from_rgb(channel(r), channel(g), channel(b))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::from_rgb(0x88, 0x88, 0x88)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = SchemaDocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_triplet(s)
    }
}

impl TryFrom<String> for Color {
    type Error = SchemaDocError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex_triplet(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hsv() {
        let cases = [
            ((0.0, 0.0, 0.0), "#000000"),
            ((0.0, 1.0, 0.0), "#000000"),
            ((0.0, -1.0, 0.0), "#000000"),
            ((0.0, 0.0, 1.0), "#FFFFFF"),
            ((0.0, 0.0, -1.0), "#000000"),
            ((1.0, 1.0, 0.0), "#000000"),
            ((1.0, 1.0, 0.2), "#330000"),
            ((1.0, 0.2, 0.2), "#332929"),
            ((0.2, 0.2, 0.2), "#313329"),
            ((-0.2, 0.2, 0.2), "#312933"),
            ((0.2, -0.2, 0.2), "#35333D"),
            ((0.2, 0.2, -0.2), "#000000"),
        ];

        for ((h, s, v), expected) in cases {
            assert_eq!(
                Color::from_hsv(h, s, v).to_string(),
                expected,
                "hsv({}, {}, {})",
                h,
                s,
                v
            );
        }
    }

    #[test]
    fn test_from_hex_triplet() {
        assert_eq!(
            Color::from_hex_triplet("#010203").unwrap().to_string(),
            "#010203"
        );
        assert_eq!(
            Color::from_hex_triplet("#abcdef").unwrap().to_string(),
            "#ABCDEF"
        );

        for bad in ["", " ", "123456", "#1234567", "#12345", "#12345G"] {
            assert!(
                matches!(
                    Color::from_hex_triplet(bad),
                    Err(SchemaDocError::InvalidArgument { .. })
                ),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_default_is_label_gray() {
        assert_eq!(Color::default().to_string(), "#888888");
    }

    #[test]
    fn test_serde_as_string() {
        let color: Color = serde_json::from_str(r##""#FF8000""##).unwrap();
        assert_eq!(color, Color::from_rgb(0xFF, 0x80, 0x00));
        assert_eq!(serde_json::to_string(&color).unwrap(), r##""#FF8000""##);
        assert!(serde_json::from_str::<Color>(r#""orange""#).is_err());
    }
}
