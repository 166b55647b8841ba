//! Text element for labels and annotations.

use crate::plotting::style::TextStyle;

/// A text element. Its position meaning depends on the owner
/// (axes-fraction coordinates for annotations, pixels once laid out).
#[derive(Debug, Clone)]
pub struct Text {
    /// The text content
    pub content: String,
    /// X position
    pub x: f64,
    /// Y position
    pub y: f64,
    /// Style configuration
    pub style: TextStyle,
}

impl Text {
    /// Create a new text element.
    pub fn new(content: impl Into<String>, x: f64, y: f64) -> Self {
        Text {
            content: content.into(),
            x,
            y,
            style: TextStyle::default(),
        }
    }

    /// Set the style for this text.
    pub fn style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Generate SVG for this text element at pixel position (`px`, `py`).
    pub fn to_svg_at(&self, px: f64, py: f64, px_per_pt: f64) -> String {
        let transform = if self.style.rotation != 0.0 {
            format!(
                " transform=\"rotate({},{:.2},{:.2})\"",
                self.style.rotation, px, py
            )
        } else {
            String::new()
        };

        format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" {}{}>{}</text>",
            px,
            py,
            self.style.to_svg_attrs(px_per_pt),
            transform,
            escape_xml(&self.content)
        )
    }
}

/// Escape special XML characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
