//! Axis configuration: ticks and their labels.

use crate::plotting::style::Color;
use crate::plotting::ticker::{ScalarFormatter, TickFormatter};

/// Configuration for one axis (x or y) of an axes.
#[derive(Debug, Clone)]
pub struct AxisConfig {
    /// Whether ticks and tick labels are drawn
    pub visible: bool,
    /// Tick mark color
    pub tick_color: Color,
    /// Length of tick marks in points
    pub tick_length: f64,
    /// Width of tick marks in points
    pub tick_width: f64,
    /// Padding between tick marks and labels in points
    pub tick_padding: f64,
    /// Number of ticks to aim for
    pub num_ticks: usize,
    /// Custom tick positions (overrides automatic generation)
    pub tick_positions: Option<Vec<f64>>,
    /// Formatter turning tick positions into labels
    pub formatter: Box<dyn TickFormatter>,
}

impl AxisConfig {
    /// Create a new axis configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tick mark width in points.
    pub fn set_tick_width(&mut self, width: f64) {
        self.tick_width = width;
    }

    /// Replace the tick label formatter.
    pub fn set_formatter(&mut self, formatter: impl TickFormatter + 'static) {
        self.formatter = Box::new(formatter);
    }

    /// Format the given tick positions with the current formatter.
    pub fn format_ticks(&self, ticks: &[f64]) -> Vec<String> {
        self.formatter.format_ticks(ticks)
    }
}

impl Default for AxisConfig {
    fn default() -> Self {
        AxisConfig {
            visible: true,
            tick_color: Color::BLACK,
            tick_length: 3.5,
            tick_width: 0.8,
            tick_padding: 3.5,
            num_ticks: 5,
            tick_positions: None,
            formatter: Box::new(ScalarFormatter::new()),
        }
    }
}
