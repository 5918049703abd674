//! Color interchange between `#RRGGBB` strings, RGB triples and color names.

use crate::common::{Error, Result};
use phf::{Map, phf_map};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named colors understood by [`rgb_to_hex`] and [`RGBColor::from_name`].
static NAMED_COLORS: Map<&'static str, RGBColor> = phf_map! {
    "black" => RGBColor::new(0, 0, 0),
    "blue" => RGBColor::new(0, 0, 255),
    "brown" => RGBColor::new(165, 42, 42),
    "cyan" => RGBColor::new(0, 255, 255),
    "green" => RGBColor::new(0, 255, 0),
    "grey" => RGBColor::new(190, 190, 190),
    "magenta" => RGBColor::new(255, 0, 255),
    "orange" => RGBColor::new(255, 165, 0),
    "pink" => RGBColor::new(255, 192, 203),
    "red" => RGBColor::new(255, 0, 0),
    "violet" => RGBColor::new(238, 130, 238),
    "white" => RGBColor::new(255, 255, 255),
    "yellow" => RGBColor::new(255, 255, 0),
};

/// RGB color representation.
///
/// Represents a color using red, green, and blue components, each in the range 0-255.
///
/// # Examples
///
/// ```rust
/// use odfdoc::common::RGBColor;
///
/// let violet = RGBColor::from_hex("#EE82EE").unwrap();
/// assert_eq!(violet, RGBColor::new(238, 130, 238));
/// assert_eq!(violet.to_hex(), "#EE82EE");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RGBColor {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl RGBColor {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` string.
    ///
    /// The string must be exactly seven characters: a leading `#` followed by
    /// six hexadecimal digits.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor(hex.to_string());
        let code = hex.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 7 || !code.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&code[range], 16).map_err(|_| invalid())
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Look up one of the named colors (`black`, `blue`, ... `yellow`).
    pub fn from_name(name: &str) -> Result<Self> {
        NAMED_COLORS
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownColor(name.to_string()))
    }

    /// Convert to the `#RRGGBB` form, upper-case.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// The color as an `(r, g, b)` triple.
    #[inline]
    pub const fn to_tuple(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for RGBColor {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl FromStr for RGBColor {
    type Err = Error;

    /// Accepts either `#RRGGBB` or a color name.
    fn from_str(s: &str) -> Result<Self> {
        if s.starts_with('#') {
            Self::from_hex(s)
        } else {
            Self::from_name(s)
        }
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A color given either by name or as an RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpec<'a> {
    /// One of the named colors
    Name(&'a str),
    /// Explicit components
    Rgb(RGBColor),
}

impl<'a> From<&'a str> for ColorSpec<'a> {
    fn from(name: &'a str) -> Self {
        ColorSpec::Name(name)
    }
}

impl From<(u8, u8, u8)> for ColorSpec<'_> {
    fn from(rgb: (u8, u8, u8)) -> Self {
        ColorSpec::Rgb(rgb.into())
    }
}

impl From<RGBColor> for ColorSpec<'_> {
    fn from(rgb: RGBColor) -> Self {
        ColorSpec::Rgb(rgb)
    }
}

/// Turn a `#RRGGBB` string into an `(r, g, b)` triple.
///
/// ```
/// use odfdoc::common::hex_to_rgb;
/// assert_eq!(hex_to_rgb("#EE82EE").unwrap(), (238, 130, 238));
/// assert!(hex_to_rgb("EE82EE").is_err());
/// ```
pub fn hex_to_rgb(color: &str) -> Result<(u8, u8, u8)> {
    RGBColor::from_hex(color).map(|c| c.to_tuple())
}

/// Turn a color name or an `(r, g, b)` triple into `#RRGGBB`.
///
/// ```
/// use odfdoc::common::rgb_to_hex;
/// assert_eq!(rgb_to_hex("yellow").unwrap(), "#FFFF00");
/// assert_eq!(rgb_to_hex((238, 130, 238)).unwrap(), "#EE82EE");
/// ```
pub fn rgb_to_hex<'a>(color: impl Into<ColorSpec<'a>>) -> Result<String> {
    let rgb = match color.into() {
        ColorSpec::Name(name) => RGBColor::from_name(name)?,
        ColorSpec::Rgb(rgb) => rgb,
    };
    Ok(rgb.to_hex())
}
