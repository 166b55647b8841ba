//! Visual elements for plots.

mod axis;
mod spine;
pub mod text;

pub use axis::AxisConfig;
pub use spine::{Side, Spine, Spines};
pub use text::{escape_xml, Text};

/// Bounding box for elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    /// Create a new bounds with the given values.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Bounds {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Get the width of the bounds.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Get the height of the bounds.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Expand bounds to include another bounds.
    pub fn include_bounds(&mut self, other: &Bounds) {
        self.x_min = self.x_min.min(other.x_min);
        self.x_max = self.x_max.max(other.x_max);
        self.y_min = self.y_min.min(other.y_min);
        self.y_max = self.y_max.max(other.y_max);
    }

    /// Build the smallest bounds containing all finite points, if any.
    pub fn from_points(x: &[f64], y: &[f64]) -> Option<Bounds> {
        let mut points = x
            .iter()
            .zip(y)
            .filter(|(px, py)| px.is_finite() && py.is_finite());
        let (&x0, &y0) = points.next()?;
        let mut bounds = Bounds::new(x0, x0, y0, y0);
        for (&px, &py) in points {
            bounds.include_bounds(&Bounds::new(px, px, py, py));
        }
        Some(bounds)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::new(0.0, 1.0, 0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_skips_non_finite() {
        let bounds = Bounds::from_points(&[1.0, f64::NAN, 3.0], &[-2.0, 0.0, 4.0]).unwrap();
        assert_eq!(bounds, Bounds::new(1.0, 3.0, -2.0, 4.0));
        assert_eq!(Bounds::from_points(&[], &[]), None);
    }
}
