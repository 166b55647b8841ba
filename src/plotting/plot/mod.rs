//! Plot types drawn inside an axes.

mod colorbar;
mod line;

pub use colorbar::ColorbarPlot;
pub use line::LinePlot;

use crate::plotting::element::Bounds;
use crate::plotting::scale::Scale;

/// Everything a plot needs to map data into the SVG.
pub struct RenderContext<'a> {
    pub x_scale: &'a dyn Scale,
    pub y_scale: &'a dyn Scale,
    /// Plot area in pixels (SVG coordinates, y grows downward)
    pub pixel_bounds: Bounds,
    /// Pixels per point at the figure dpi
    pub px_per_pt: f64,
}

impl RenderContext<'_> {
    /// Transform a data point to pixel coordinates.
    pub fn transform(&self, x: f64, y: f64) -> (f64, f64) {
        let px = self.pixel_bounds.x_min + self.x_scale.transform(x) * self.pixel_bounds.width();
        // Flip Y axis since SVG has Y increasing downward
        let py = self.pixel_bounds.y_max - self.y_scale.transform(y) * self.pixel_bounds.height();
        (px, py)
    }
}

/// Trait for plot types that can be rendered.
pub trait Plot: std::fmt::Debug {
    /// Get the data bounds for this plot.
    fn bounds(&self) -> Option<Bounds>;

    /// Render this plot to SVG, returning the SVG elements as a string.
    fn render_svg(&self, ctx: &RenderContext<'_>) -> String;
}
