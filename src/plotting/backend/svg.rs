//! SVG rendering backend.

use crate::plotting::element::text::escape_xml;
use crate::plotting::style::{Color, LineStyle, TextStyle};

/// SVG rendering backend.
///
/// Drawing happens in pixel user units; the document carries the physical
/// size in inches so the figure keeps its size when placed in a document.
#[derive(Debug)]
pub struct SvgBackend {
    /// Image width in inches
    pub width_in: f64,
    /// Image height in inches
    pub height_in: f64,
    /// Dots per inch
    pub dpi: f64,
    /// SVG content accumulated during rendering
    content: Vec<String>,
    /// SVG defs section (clip paths, gradients)
    defs: Vec<String>,
}

impl SvgBackend {
    /// Create a new SVG backend for a canvas of the given physical size.
    pub fn new(width_in: f64, height_in: f64, dpi: f64) -> Self {
        SvgBackend {
            width_in,
            height_in,
            dpi,
            content: Vec::new(),
            defs: Vec::new(),
        }
    }

    /// Width in pixels.
    pub fn width_px(&self) -> f64 {
        self.width_in * self.dpi
    }

    /// Height in pixels.
    pub fn height_px(&self) -> f64 {
        self.height_in * self.dpi
    }

    /// Pixels per typographic point.
    pub fn px_per_pt(&self) -> f64 {
        self.dpi / 72.0
    }

    /// Add raw SVG content.
    pub fn add_content(&mut self, content: String) {
        self.content.push(content);
    }

    /// Fill the whole canvas.
    pub fn fill_background(&mut self, color: &Color) {
        self.content.push(format!(
            "<rect width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>",
            self.width_px(),
            self.height_px(),
            color.to_svg_string()
        ));
    }

    /// Draw a line between two points.
    pub fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &LineStyle) {
        self.content.push(format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" {}/>",
            x1,
            y1,
            x2,
            y2,
            style.to_svg_style(self.px_per_pt())
        ));
    }

    /// Draw text.
    pub fn draw_text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle) {
        let transform = if style.rotation != 0.0 {
            format!(" transform=\"rotate({},{:.2},{:.2})\"", style.rotation, x, y)
        } else {
            String::new()
        };

        self.content.push(format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" {}{}>{}</text>",
            x,
            y,
            style.to_svg_attrs(self.px_per_pt()),
            transform,
            escape_xml(text)
        ));
    }

    /// Start a clip path.
    pub fn start_clip(&mut self, id: &str, x: f64, y: f64, width: f64, height: f64) {
        self.defs.push(format!(
            "<clipPath id=\"{}\"><rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"/></clipPath>",
            id, x, y, width, height
        ));
        self.content.push(format!("<g clip-path=\"url(#{})\">", id));
    }

    /// End the current clip.
    pub fn end_clip(&mut self) {
        self.content.push("</g>".to_string());
    }

    /// Render the final SVG string.
    pub fn render(self) -> String {
        let defs_section = if self.defs.is_empty() {
            String::new()
        } else {
            format!("  <defs>\n    {}\n  </defs>\n", self.defs.join("\n    "))
        };

        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{:.4}in" height="{:.4}in" viewBox="0 0 {:.2} {:.2}">
{}  {}
</svg>
"#,
            self.width_in,
            self.height_in,
            self.width_in * self.dpi,
            self.height_in * self.dpi,
            defs_section,
            self.content.join("\n  ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_carries_physical_size() {
        let backend = SvgBackend::new(3.5, 2.0, 100.0);
        assert_eq!(backend.width_px(), 350.0);
        let svg = backend.render();
        assert!(svg.contains("width=\"3.5000in\""));
        assert!(svg.contains("viewBox=\"0 0 350.00 200.00\""));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut backend = SvgBackend::new(1.0, 1.0, 72.0);
        backend.draw_text(1.0, 2.0, "a<b & c", &TextStyle::new());
        let svg = backend.render();
        assert!(svg.contains("a&lt;b &amp; c"));
    }
}
