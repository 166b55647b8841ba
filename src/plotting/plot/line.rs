//! Line plot implementation.

use crate::plotting::element::Bounds;
use crate::plotting::plot::{Plot, RenderContext};
use crate::plotting::style::{Color, DashPattern, LineStyle};

/// A line plot connecting data points.
#[derive(Debug, Clone)]
pub struct LinePlot {
    /// X coordinates
    pub x: Vec<f64>,
    /// Y coordinates
    pub y: Vec<f64>,
    /// Line style
    pub line_style: LineStyle,
}

impl LinePlot {
    /// Create a new line plot from x and y data.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        LinePlot {
            x,
            y,
            line_style: LineStyle::default(),
        }
    }

    /// Set the line color.
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.line_style.color = color.into();
        self
    }

    /// Set the line width in points.
    pub fn linewidth(mut self, width: f64) -> Self {
        self.line_style.width = width;
        self
    }

    /// Set the line style (dash pattern).
    pub fn linestyle(mut self, dash: DashPattern) -> Self {
        self.line_style.dash = dash;
        self
    }

    /// Parse matplotlib-style format string (e.g., "r-", "b--", "k:")
    pub fn format(mut self, fmt: &str) -> Self {
        let mut rest = fmt;
        if let Some(c) = rest.chars().next() {
            if let Some(color) = parse_color_char(c) {
                self.line_style.color = color;
                rest = &rest[c.len_utf8()..];
            }
        }
        if let Some(dash) = DashPattern::from_format_str(rest) {
            self.line_style.dash = dash;
        }
        self
    }
}

/// Map a matplotlib single-letter color code to a color.
fn parse_color_char(c: char) -> Option<Color> {
    match c {
        'b' => Some(Color::PUB_BLUE),
        'g' => Some(Color::PUB_GREEN),
        'r' => Some(Color::PUB_RED),
        'm' => Some(Color::PUB_PURPLE),
        'y' => Some(Color::PUB_YELLOW),
        'c' => Some(Color::PUB_LIGHTBLUE),
        'k' => Some(Color::BLACK),
        'w' => Some(Color::WHITE),
        _ => None,
    }
}

impl Plot for LinePlot {
    fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.x, &self.y)
    }

    fn render_svg(&self, ctx: &RenderContext<'_>) -> String {
        let mut svg = String::new();
        let style = self.line_style.to_svg_style(ctx.px_per_pt);

        // Break the polyline at points the scales cannot place (NaN, log of <= 0).
        let mut segment: Vec<String> = Vec::new();
        let flush = |segment: &mut Vec<String>, svg: &mut String| {
            if segment.len() > 1 {
                svg.push_str(&format!(
                    "<polyline points=\"{}\" {}/>\n",
                    segment.join(" "),
                    style
                ));
            }
            segment.clear();
        };

        for (&x, &y) in self.x.iter().zip(&self.y) {
            let (px, py) = ctx.transform(x, y);
            if px.is_finite() && py.is_finite() {
                segment.push(format!("{:.2},{:.2}", px, py));
            } else {
                flush(&mut segment, &mut svg);
            }
        }
        flush(&mut segment, &mut svg);

        svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::scale::{LinearScale, LogScale};

    #[test]
    fn test_format_string() {
        let plot = LinePlot::new(vec![], vec![]).format("r--");
        assert_eq!(plot.line_style.color, Color::PUB_RED);
        assert_eq!(plot.line_style.dash, DashPattern::Dashed);

        let plot = LinePlot::new(vec![], vec![]).format(":");
        assert_eq!(plot.line_style.dash, DashPattern::Dotted);
    }

    #[test]
    fn test_render_breaks_at_unplaceable_points() {
        let plot = LinePlot::new(vec![1.0, 2.0, 3.0, 4.0, 5.0], vec![1.0, 10.0, -1.0, 10.0, 100.0]);
        let x_scale = LinearScale::new(0.0, 6.0).unwrap();
        let y_scale = LogScale::new(1.0, 100.0).unwrap();
        let ctx = RenderContext {
            x_scale: &x_scale,
            y_scale: &y_scale,
            pixel_bounds: Bounds::new(0.0, 100.0, 0.0, 100.0),
            px_per_pt: 1.0,
        };
        let svg = plot.render_svg(&ctx);
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert!(svg.contains("<polyline points=\"16.67,100.00 33.33,50.00\""));
    }
}
