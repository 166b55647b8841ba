//! Axis scaling and transformation.

mod linear;
mod log;

pub use self::linear::LinearScale;
pub use self::log::LogScale;

use crate::plotting::error::PlotResult;

/// Kinds of scale an axis can be switched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleKind {
    #[default]
    Linear,
    Log,
}

/// Trait for axis scale transformations.
pub trait Scale: std::fmt::Debug {
    /// Transform a data value to normalized coordinates (0.0 - 1.0).
    fn transform(&self, value: f64) -> f64;

    /// Set the data range for this scale.
    fn set_range(&mut self, min: f64, max: f64) -> PlotResult<()>;

    /// Get the current data range.
    fn range(&self) -> (f64, f64);

    /// Generate nice tick values for this scale.
    fn ticks(&self, num_ticks: usize) -> Vec<f64>;

    /// The current range widened by `fraction` of its extent on each side.
    fn pad(&self, fraction: f64) -> (f64, f64);

    /// Clone the scale into a boxed trait object.
    fn clone_box(&self) -> Box<dyn Scale>;
}

impl Clone for Box<dyn Scale> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Compute "nice" numbers for axis ticks.
pub fn nice_number(range: f64, round: bool) -> f64 {
    let exponent = range.log10().floor();
    let fraction = range / 10_f64.powf(exponent);

    let nice_fraction = if round {
        if fraction < 1.5 {
            1.0
        } else if fraction < 3.0 {
            2.0
        } else if fraction < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice_fraction * 10_f64.powf(exponent)
}

/// Generate nice tick positions for a given range.
///
/// Ticks are computed as `index * spacing` rather than by repeated addition,
/// so labels like 0.3 do not pick up accumulated rounding error.
pub fn nice_ticks(min: f64, max: f64, num_ticks: usize) -> Vec<f64> {
    if num_ticks < 2 || !(max > min) {
        return vec![(min + max) / 2.0];
    }

    let range = nice_number(max - min, false);
    let tick_spacing = nice_number(range / (num_ticks - 1) as f64, true);
    let first = (min / tick_spacing).floor() as i64;
    let last = (max / tick_spacing).ceil() as i64;

    (first..=last)
        .map(|i| i as f64 * tick_spacing)
        .filter(|tick| {
            *tick >= min - tick_spacing * 0.001 && *tick <= max + tick_spacing * 0.001
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_ticks_unit_range() {
        let ticks = nice_ticks(0.0, 1.0, 5);
        let expected = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0];
        assert_eq!(ticks.len(), expected.len());
        for (tick, want) in ticks.iter().zip(expected) {
            assert!((tick - want).abs() < 1e-12);
        }
    }

    #[test]
    fn test_nice_ticks_integer_range() {
        assert_eq!(nice_ticks(1.0, 3.0, 5), vec![1.0, 1.5, 2.0, 2.5, 3.0]);
    }

    #[test]
    fn test_degenerate_range() {
        assert_eq!(nice_ticks(2.0, 2.0, 5), vec![2.0]);
    }
}
