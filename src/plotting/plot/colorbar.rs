//! Color scale drawn inside a colorbar axes.

use crate::plotting::element::Bounds;
use crate::plotting::plot::{Plot, RenderContext};
use crate::plotting::style::Color;

/// A vertical gradient spanning `min..max` on the y axis.
#[derive(Debug, Clone)]
pub struct ColorbarPlot {
    pub min: f64,
    pub max: f64,
    /// Colors evenly spaced from `min` (first) to `max` (last)
    pub colors: Vec<Color>,
}

impl ColorbarPlot {
    pub fn new(min: f64, max: f64, colors: Vec<Color>) -> Self {
        ColorbarPlot { min, max, colors }
    }
}

impl Plot for ColorbarPlot {
    fn bounds(&self) -> Option<Bounds> {
        Some(Bounds::new(0.0, 1.0, self.min, self.max))
    }

    fn render_svg(&self, ctx: &RenderContext<'_>) -> String {
        let (x0, y_top) = ctx.transform(0.0, self.max);
        let (x1, y_bottom) = ctx.transform(1.0, self.min);
        let id = format!("cbar-{:.0}-{:.0}", x0, y_top);

        let last = self.colors.len().saturating_sub(1).max(1) as f64;
        let stops: String = self
            .colors
            .iter()
            .enumerate()
            .map(|(i, color)| {
                format!(
                    "<stop offset=\"{:.1}%\" stop-color=\"{}\"/>",
                    i as f64 / last * 100.0,
                    color.to_svg_string()
                )
            })
            .collect();

        // The gradient runs bottom (min) to top (max).
        format!(
            "<defs><linearGradient id=\"{}\" x1=\"0\" y1=\"1\" x2=\"0\" y2=\"0\">{}</linearGradient></defs>\n\
             <rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"url(#{})\"/>\n",
            id,
            stops,
            x0.min(x1),
            y_top.min(y_bottom),
            (x1 - x0).abs(),
            (y_bottom - y_top).abs(),
            id
        )
    }
}
