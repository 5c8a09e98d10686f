//! Xournal color parsing.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::{Result, XojError};

/// An RGB color with an opacity channel.
///
/// Channels are 8-bit as stored in the source format; opacity is a fraction
/// in `[0.0, 1.0]`. Colors carry no identity and are copied by value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub opacity: f64,
}

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8, opacity: f64) -> Self {
        Self {
            red,
            green,
            blue,
            opacity,
        }
    }

    /// The RGB triple without the opacity channel.
    pub const fn rgb(&self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// Parse a Xournal color token.
    ///
    /// Accepts either one of the fixed color names (case-insensitive) or an
    /// 8-hex-digit literal `#RRGGBBAA`, where the trailing byte is
    /// normalized to opacity = AA/255. Named colors take `default_opacity`.
    /// Anything else is a fatal invalid-color error.
    pub fn parse(code: &str, default_opacity: f64) -> Result<Self> {
        if let Some((r, g, b)) = NAMED_COLORS.get(code.to_ascii_lowercase().as_str()) {
            return Ok(Self::new(*r, *g, *b, default_opacity));
        }
        if let Some(hex) = code.strip_prefix('#') {
            if hex.len() == 8 && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap();
                let alpha = byte(6);
                return Ok(Self::new(byte(0), byte(2), byte(4), f64::from(alpha) / 255.0));
            }
        }
        Err(XojError::InvalidColor(code.to_string()))
    }
}

/// The fixed color names the source format uses, with their exact triples.
static NAMED_COLORS: LazyLock<HashMap<&'static str, (u8, u8, u8)>> = LazyLock::new(|| {
    HashMap::from([
        ("black", (0, 0, 0)),
        ("blue", (51, 51, 204)),
        ("red", (255, 0, 0)),
        ("green", (0, 128, 0)),
        ("gray", (128, 128, 128)),
        ("lightblue", (0, 192, 255)),
        ("lightgreen", (0, 255, 0)),
        ("magenta", (255, 0, 255)),
        ("orange", (255, 128, 0)),
        ("yellow", (255, 255, 0)),
        ("white", (255, 255, 255)),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_color_is_case_insensitive() {
        let lower = Color::parse("orange", 1.0).unwrap();
        let mixed = Color::parse("Orange", 1.0).unwrap();
        assert_eq!(lower, mixed);
        assert_eq!(lower.rgb(), (255, 128, 0));
    }

    #[test]
    fn hex_literal_carries_its_own_opacity() {
        let c = Color::parse("#FF000080", 1.0).unwrap();
        assert_eq!(c.rgb(), (255, 0, 0));
        assert!((c.opacity - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn short_hex_is_rejected() {
        assert!(Color::parse("#FF0000", 1.0).is_err());
    }
}
