//! Line styling options.

use super::color::Color;

/// Dash pattern for lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DashPattern {
    /// Solid line
    #[default]
    Solid,
    /// Dashed line (default dash length)
    Dashed,
    /// Dotted line
    Dotted,
    /// Alternating dash-dot pattern
    DashDot,
    /// Custom dash array in points [dash_length, gap_length, ...]
    Custom(Vec<f64>),
}

impl DashPattern {
    /// Dash lengths in points, or `None` for a solid line.
    fn lengths(&self) -> Option<Vec<f64>> {
        match self {
            DashPattern::Solid => None,
            DashPattern::Dashed => Some(vec![3.7, 1.6]),
            DashPattern::Dotted => Some(vec![1.0, 1.65]),
            DashPattern::DashDot => Some(vec![6.4, 1.6, 1.0, 1.6]),
            DashPattern::Custom(arr) if arr.is_empty() => None,
            DashPattern::Custom(arr) => Some(arr.clone()),
        }
    }

    /// Convert to an SVG stroke-dasharray value, scaled like the line width.
    pub fn to_svg_dasharray(&self, width_px: f64) -> Option<String> {
        self.lengths().map(|lengths| {
            lengths
                .iter()
                .map(|v| format!("{:.2}", v * width_px))
                .collect::<Vec<_>>()
                .join(",")
        })
    }

    /// Parse a matplotlib-style line style string ("-", "--", "-.", ":").
    pub fn from_format_str(s: &str) -> Option<Self> {
        // Check longest patterns first
        if s.starts_with("--") {
            Some(DashPattern::Dashed)
        } else if s.starts_with("-.") {
            Some(DashPattern::DashDot)
        } else if s.starts_with(':') {
            Some(DashPattern::Dotted)
        } else if s.starts_with('-') {
            Some(DashPattern::Solid)
        } else {
            None
        }
    }
}

/// Style configuration for lines. Widths are in points.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    /// Line color
    pub color: Color,
    /// Line width in points
    pub width: f64,
    /// Dash pattern
    pub dash: DashPattern,
    /// Line cap style
    pub cap: LineCap,
    /// Opacity (0.0 - 1.0)
    pub opacity: f64,
}

impl LineStyle {
    /// Create a new line style with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line color.
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the line width in points.
    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Set the dash pattern.
    pub fn dash(mut self, dash: DashPattern) -> Self {
        self.dash = dash;
        self
    }

    /// Set the line cap style.
    pub fn cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    /// Set the opacity.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Generate SVG stroke attributes. `px_per_pt` converts point widths to user units.
    pub fn to_svg_style(&self, px_per_pt: f64) -> String {
        let width_px = self.width * px_per_pt;
        let mut attrs = vec![
            format!("stroke=\"{}\"", self.color.to_svg_string()),
            format!("stroke-width=\"{:.3}\"", width_px),
            format!("stroke-linecap=\"{}\"", self.cap.to_svg_string()),
            "stroke-linejoin=\"round\"".to_string(),
            "fill=\"none\"".to_string(),
        ];

        if self.opacity < 1.0 {
            attrs.push(format!("stroke-opacity=\"{}\"", self.opacity));
        }

        if let Some(dasharray) = self.dash.to_svg_dasharray(width_px) {
            attrs.push(format!("stroke-dasharray=\"{}\"", dasharray));
        }

        attrs.join(" ")
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle {
            color: Color::default(),
            width: 1.5,
            dash: DashPattern::Solid,
            cap: LineCap::Round,
            opacity: 1.0,
        }
    }
}

/// Line cap styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    /// Flat end at the exact endpoint
    Butt,
    /// Rounded end
    #[default]
    Round,
    /// Square end extending past the endpoint
    Square,
}

impl LineCap {
    pub fn to_svg_string(&self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_str_prefers_longest_match() {
        assert_eq!(DashPattern::from_format_str("--"), Some(DashPattern::Dashed));
        assert_eq!(DashPattern::from_format_str("-."), Some(DashPattern::DashDot));
        assert_eq!(DashPattern::from_format_str("-"), Some(DashPattern::Solid));
        assert_eq!(DashPattern::from_format_str("o"), None);
    }

    #[test]
    fn test_svg_style_scales_width() {
        let style = LineStyle::new().width(2.0).dash(DashPattern::Dashed);
        let svg = style.to_svg_style(0.5);
        assert!(svg.contains("stroke-width=\"1.000\""));
        assert!(svg.contains("stroke-dasharray=\"3.70,1.60\""));
    }
}
