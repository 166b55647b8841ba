//! Data handling traits and utilities.

/// Trait for types that can be converted into plot data.
pub trait IntoPlotData {
    /// Convert into a vector of f64 values.
    fn into_plot_data(self) -> Vec<f64>;
}

impl<T: Copy + Into<f64>> IntoPlotData for Vec<T> {
    fn into_plot_data(self) -> Vec<f64> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Copy + Into<f64>> IntoPlotData for &Vec<T> {
    fn into_plot_data(self) -> Vec<f64> {
        self.iter().map(|&x| x.into()).collect()
    }
}

impl<T: Copy + Into<f64>> IntoPlotData for &[T] {
    fn into_plot_data(self) -> Vec<f64> {
        self.iter().map(|&x| x.into()).collect()
    }
}

impl<T: Copy + Into<f64>, const N: usize> IntoPlotData for [T; N] {
    fn into_plot_data(self) -> Vec<f64> {
        self.iter().map(|&x| x.into()).collect()
    }
}

/// `n` evenly spaced values from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + i as f64 * step).collect()
        }
    }
}

/// The x values `0, 1, 2, ...` matching a y series, as `plot(y)` uses.
pub fn index_of(y: &[f64]) -> Vec<f64> {
    (0..y.len()).map(|i| i as f64).collect()
}
