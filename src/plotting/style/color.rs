//! Color definitions and the publication palette.

use std::fmt;

/// Represents a color for plotting elements.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    /// RGB color with values 0-255
    Rgb(u8, u8, u8),
    /// RGBA color with alpha 0.0-1.0
    Rgba(u8, u8, u8, f64),
    /// Named color (e.g., "red", "blue", "C0")
    Named(String),
}

impl Color {
    /// Create a new RGB color.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb(r, g, b)
    }

    /// Create a new RGBA color.
    pub fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Color::Rgba(r, g, b, a.clamp(0.0, 1.0))
    }

    /// Create a color from a hex string (e.g., "#FF0000" or "FF0000").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Color::Rgba(
                channel(0)?,
                channel(2)?,
                channel(4)?,
                channel(6)? as f64 / 255.0,
            )),
            _ => None,
        }
    }

    /// Convert the color to an SVG-compatible string.
    pub fn to_svg_string(&self) -> String {
        match self {
            Color::Rgb(r, g, b) => format!("rgb({},{},{})", r, g, b),
            Color::Rgba(r, g, b, a) => format!("rgba({},{},{},{})", r, g, b, a),
            Color::Named(name) => resolve_named_color(name),
        }
    }

    // Predefined colors
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const GRAY: Color = Color::Rgb(128, 128, 128);
    pub const TRANSPARENT: Color = Color::Rgba(0, 0, 0, 0.0);

    // Publication palette
    pub const PUB_BLUE: Color = Color::Rgb(0x48, 0x78, 0xcf);
    pub const PUB_GREEN: Color = Color::Rgb(0x6a, 0xcc, 0x65);
    pub const PUB_RED: Color = Color::Rgb(0xd6, 0x5f, 0x5f);
    pub const PUB_PURPLE: Color = Color::Rgb(0xb4, 0x7c, 0xc7);
    pub const PUB_YELLOW: Color = Color::Rgb(0xc4, 0xad, 0x66);
    pub const PUB_LIGHTBLUE: Color = Color::Rgb(0x77, 0xbe, 0xdb);
}

impl Default for Color {
    fn default() -> Self {
        Color::PUB_BLUE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_svg_string())
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        if let Some(color) = publication_color(s) {
            color
        } else if s.starts_with('#') {
            Color::from_hex(s).unwrap_or_else(|| Color::Named(s.to_string()))
        } else {
            Color::Named(s.to_string())
        }
    }
}

impl From<String> for Color {
    fn from(s: String) -> Self {
        Color::from(s.as_str())
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::Rgb(r, g, b)
    }
}

/// The publication palette in cycle order, with the names used to look colors up.
pub const PUBLICATION_PALETTE: [(&str, Color); 6] = [
    ("blue", Color::PUB_BLUE),
    ("green", Color::PUB_GREEN),
    ("red", Color::PUB_RED),
    ("purple", Color::PUB_PURPLE),
    ("yellow", Color::PUB_YELLOW),
    ("lightblue", Color::PUB_LIGHTBLUE),
];

/// Look up a publication palette color by name ("blue", "lightblue", ...).
pub fn publication_color(name: &str) -> Option<Color> {
    PUBLICATION_PALETTE
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, c)| c.clone())
}

/// Get a color from the publication color cycle by index.
pub fn cycle_color(index: usize) -> Color {
    PUBLICATION_PALETTE[index % PUBLICATION_PALETTE.len()].1.clone()
}

/// Resolve a named color to an SVG color value.
fn resolve_named_color(name: &str) -> String {
    match name.to_lowercase().as_str() {
        // Single-letter shortcuts (matplotlib style)
        "k" => "#000000".to_string(),
        "w" => "#FFFFFF".to_string(),
        "r" => "#FF0000".to_string(),
        "g" => "#008000".to_string(),
        "b" => "#0000FF".to_string(),
        // Anything else is passed through as a CSS color name
        _ => name.to_string(),
    }
}
