//! Logarithmic (base 10) scale transformation.

use super::Scale;
use crate::plotting::error::{PlotError, PlotResult};

/// A base-10 logarithmic scale. Only positive values are representable.
#[derive(Debug, Clone)]
pub struct LogScale {
    min: f64,
    max: f64,
}

impl LogScale {
    /// Create a new log scale with the given (positive) range.
    pub fn new(min: f64, max: f64) -> PlotResult<Self> {
        if min <= 0.0 || min >= max {
            return Err(PlotError::InvalidConfig(
                "Log scale needs 0 < minimum < maximum".to_string(),
            ));
        }
        Ok(LogScale { min, max })
    }

    /// Create a log scale spanning one decade (to be set later).
    pub fn auto() -> Self {
        LogScale { min: 1.0, max: 10.0 }
    }
}

impl Default for LogScale {
    fn default() -> Self {
        LogScale::auto()
    }
}

impl Scale for LogScale {
    fn transform(&self, value: f64) -> f64 {
        if value <= 0.0 {
            return f64::NAN;
        }
        let (lo, hi) = (self.min.log10(), self.max.log10());
        if hi == lo {
            return 0.5;
        }
        (value.log10() - lo) / (hi - lo)
    }

    fn set_range(&mut self, min: f64, max: f64) -> PlotResult<()> {
        if max <= 0.0 {
            return Err(PlotError::InvalidData(
                "Log scale range has no positive values".to_string(),
            ));
        }
        // Non-positive minimums are clipped to two decades below the maximum.
        let min = if min <= 0.0 { max / 100.0 } else { min };
        if min >= max {
            self.min = min / 10.0;
            self.max = max * 10.0;
        } else {
            self.min = min;
            self.max = max;
        }
        Ok(())
    }

    fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    fn ticks(&self, _num_ticks: usize) -> Vec<f64> {
        let first = self.min.log10().ceil() as i32;
        let last = self.max.log10().floor() as i32;
        (first..=last).map(|e| 10f64.powi(e)).collect()
    }

    fn pad(&self, fraction: f64) -> (f64, f64) {
        let (lo, hi) = (self.min.log10(), self.max.log10());
        let pad = (hi - lo) * fraction;
        (10f64.powf(lo - pad), 10f64.powf(hi + pad))
    }

    fn clone_box(&self) -> Box<dyn Scale> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decade_ticks() {
        let scale = LogScale::new(0.5, 2000.0).unwrap();
        assert_eq!(scale.ticks(5), vec![1.0, 10.0, 100.0, 1000.0]);
    }

    #[test]
    fn test_transform_is_logarithmic() {
        let scale = LogScale::new(1.0, 100.0).unwrap();
        assert!((scale.transform(10.0) - 0.5).abs() < 1e-12);
        assert!(scale.transform(-1.0).is_nan());
    }

    #[test]
    fn test_rejects_non_positive_range() {
        assert!(LogScale::new(0.0, 10.0).is_err());
        assert!(LogScale::auto().set_range(-5.0, -1.0).is_err());
    }
}
