use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Palette the default track colors are drawn from.
pub const DEFAULT_PALETTE: [&str; 9] = [
    "#FF5733", // red-orange
    "#33FF57", // green
    "#3357FF", // blue
    "#FF33A8", // pink
    "#33A8FF", // light blue
    "#A833FF", // purple
    "#FFD133", // yellow
    "#33FFD1", // cyan
    "#D133FF", // magenta
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid color \"{0}\"")]
    Invalid(String),
}

/// A line color, always stored as upper-case `#RRGGBB`.
///
/// Accepted input forms are `#RGB`, `#RRGGBB` and `rgb(r, g, b)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    pub fn parse(value: &str) -> Result<Color, ColorError> {
        let trimmed = value.trim();
        let rgb = if let Some(hex) = trimmed.strip_prefix('#') {
            parse_hex(hex)
        } else if let Some(args) = trimmed
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            parse_rgb_function(args)
        } else {
            None
        };
        rgb.map(|(r, g, b)| Color::from_rgb(r, g, b))
            .ok_or_else(|| ColorError::Invalid(value.to_string()))
    }

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Color {
        Color(format!("#{r:02X}{g:02X}{b:02X}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
            Some((digit(0)?, digit(1)?, digit(2)?))
        }
        6 => {
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some((byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}

fn parse_rgb_function(args: &str) -> Option<(u8, u8, u8)> {
    let channels = args
        .split(',')
        .map(|part| part.trim().parse::<u8>().ok())
        .collect::<Option<Vec<u8>>>()?;
    match channels.as_slice() {
        [r, g, b] => Some((*r, *g, *b)),
        _ => None,
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

/// Returns the default palette as parsed colors.
pub fn default_palette() -> Vec<Color> {
    DEFAULT_PALETTE
        .iter()
        .filter_map(|hex| Color::parse(hex).ok())
        .collect()
}
