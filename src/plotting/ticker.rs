//! Tick label formatters.
//!
//! A formatter turns the tick locations of one axis into label strings. The
//! whole set of ticks is formatted at once so the formatter can choose a
//! shared precision, additive offset and order of magnitude.

use std::fmt;

use crate::plotting::error::{PlotError, PlotResult};
use crate::plotting::style::rc_params;

/// Unicode minus sign used for negative labels outside math text.
pub const UNICODE_MINUS: char = '\u{2212}';

/// Narrow typeset hyphen used for negative labels in math text.
pub const NARROW_MINUS: char = '\u{2010}';

/// Trait for tick label formatters.
pub trait TickFormatter: fmt::Debug {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Format every tick location into a label.
    fn format_ticks(&self, ticks: &[f64]) -> Vec<String>;

    /// Text drawn next to the axis (offset and/or multiplier), if any.
    fn offset_text(&self, _ticks: &[f64]) -> Option<String> {
        None
    }

    /// Whether an additive offset may be used. `None` if not applicable.
    fn use_offset(&self) -> Option<bool> {
        None
    }

    /// Enable or disable the additive offset.
    fn set_use_offset(&mut self, _use_offset: bool) -> PlotResult<()> {
        Err(PlotError::Unsupported(format!(
            "{} formatter has no offset",
            self.name()
        )))
    }

    /// Clone the formatter into a boxed trait object.
    fn clone_box(&self) -> Box<dyn TickFormatter>;
}

impl Clone for Box<dyn TickFormatter> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Shared layout computed for a set of ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ScalarLayout {
    offset: f64,
    order: i32,
    decimals: usize,
}

/// Default numeric formatter for linear axes.
#[derive(Debug, Clone)]
pub struct ScalarFormatter {
    use_offset: bool,
    /// Minimum gap in orders of magnitude between values and their span before an offset kicks in
    offset_threshold: i32,
    /// Orders of magnitude outside `(lo, hi)` switch to a `1eN` multiplier
    power_limits: (i32, i32),
}

impl ScalarFormatter {
    pub fn new() -> Self {
        ScalarFormatter {
            use_offset: true,
            offset_threshold: 4,
            power_limits: (-5, 6),
        }
    }

    fn layout(&self, ticks: &[f64]) -> ScalarLayout {
        let finite: Vec<f64> = ticks.iter().copied().filter(|t| t.is_finite()).collect();
        let mut layout = ScalarLayout {
            offset: 0.0,
            order: 0,
            decimals: 0,
        };
        if finite.is_empty() {
            return layout;
        }

        let lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if self.use_offset && hi > lo && (lo > 0.0 || hi < 0.0) {
            let oom_span = (hi - lo).log10().floor() as i32;
            let oom_mag = lo.abs().max(hi.abs()).log10().floor() as i32;
            if oom_mag - oom_span >= self.offset_threshold {
                let step = 10f64.powi(oom_span + 1);
                layout.offset = if lo > 0.0 {
                    (lo / step).floor() * step
                } else {
                    (hi / step).ceil() * step
                };
            }
        }

        let largest = finite
            .iter()
            .map(|t| (t - layout.offset).abs())
            .fold(0.0, f64::max);
        if largest > 0.0 {
            let oom = largest.log10().floor() as i32;
            if oom <= self.power_limits.0 || oom >= self.power_limits.1 {
                layout.order = oom;
            }
        }

        let scale = 10f64.powi(layout.order);
        let scaled: Vec<f64> = finite.iter().map(|t| (t - layout.offset) / scale).collect();
        let spacing = scaled
            .windows(2)
            .map(|w| (w[1] - w[0]).abs())
            .filter(|d| *d > 0.0)
            .fold(f64::INFINITY, f64::min);
        let tolerance = if spacing.is_finite() { spacing * 1e-6 } else { 1e-9 };
        layout.decimals = (0..=10)
            .find(|&d| {
                let factor = 10f64.powi(d as i32);
                scaled
                    .iter()
                    .all(|s| ((s * factor).round() / factor - s).abs() <= tolerance)
            })
            .unwrap_or(10);
        layout
    }

    fn format_with(&self, value: f64, layout: &ScalarLayout) -> String {
        let scaled = (value - layout.offset) / 10f64.powi(layout.order);
        let threshold = 0.5 * 10f64.powi(-(layout.decimals as i32));
        // Avoid "-0" and "-0.00" for values that round to zero.
        let scaled = if scaled.abs() < threshold { 0.0 } else { scaled };
        format!("{:.*}", layout.decimals, scaled)
    }
}

impl Default for ScalarFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace ASCII minus signs the way the active style asks for.
fn fix_minus(label: String) -> String {
    let rc = rc_params();
    if rc.unicode_minus && !rc.math_text {
        label.replace('-', &UNICODE_MINUS.to_string())
    } else {
        label
    }
}

impl TickFormatter for ScalarFormatter {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn format_ticks(&self, ticks: &[f64]) -> Vec<String> {
        let layout = self.layout(ticks);
        ticks
            .iter()
            .map(|t| fix_minus(self.format_with(*t, &layout)))
            .collect()
    }

    fn offset_text(&self, ticks: &[f64]) -> Option<String> {
        let layout = self.layout(ticks);
        let mut parts = Vec::new();
        if layout.order != 0 {
            parts.push(format!("1e{}", layout.order));
        }
        if layout.offset != 0.0 {
            let sign = if layout.offset > 0.0 { "+" } else { "-" };
            parts.push(format!("{}{}", sign, layout.offset.abs()));
        }
        if parts.is_empty() {
            None
        } else {
            Some(fix_minus(parts.join(" ")))
        }
    }

    fn use_offset(&self) -> Option<bool> {
        Some(self.use_offset)
    }

    fn set_use_offset(&mut self, use_offset: bool) -> PlotResult<()> {
        self.use_offset = use_offset;
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn TickFormatter> {
        Box::new(self.clone())
    }
}

/// Formatter for logarithmic axes: powers of ten as `10` plus a superscript exponent.
///
/// Has no notion of an additive offset.
#[derive(Debug, Clone, Default)]
pub struct LogFormatter;

fn superscript(exponent: i32) -> String {
    exponent
        .to_string()
        .chars()
        .map(|c| match c {
            '-' => '\u{207B}',
            '0' => '\u{2070}',
            '1' => '\u{00B9}',
            '2' => '\u{00B2}',
            '3' => '\u{00B3}',
            d => char::from_u32(0x2070 + d.to_digit(10).unwrap_or(0)).unwrap_or(d),
        })
        .collect()
}

impl TickFormatter for LogFormatter {
    fn name(&self) -> &'static str {
        "log"
    }

    fn format_ticks(&self, ticks: &[f64]) -> Vec<String> {
        ticks
            .iter()
            .map(|&t| {
                if t <= 0.0 || !t.is_finite() {
                    return String::new();
                }
                let exponent = t.log10().round();
                if (10f64.powf(exponent) - t).abs() <= t * 1e-9 {
                    format!("10{}", superscript(exponent as i32))
                } else {
                    fix_minus(format!("{}", t))
                }
            })
            .collect()
    }

    fn clone_box(&self) -> Box<dyn TickFormatter> {
        Box::new(self.clone())
    }
}

/// Rewrite one tick label for publication: under math text every ASCII
/// hyphen-minus becomes the narrow typeset hyphen, and a single trailing
/// `".0"` is dropped ("2.0" becomes "2", "3.50" is left alone).
pub fn publication_label(label: &str, math_text: bool) -> String {
    let label = if math_text {
        label.replace('-', &NARROW_MINUS.to_string())
    } else {
        label.to_string()
    };
    match label.strip_suffix(".0") {
        Some(stripped) => stripped.to_string(),
        None => label,
    }
}

/// Scalar formatter whose labels go through [`publication_label`].
#[derive(Debug, Clone, Default)]
pub struct PublicationFormatter {
    inner: ScalarFormatter,
}

impl PublicationFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Formatter with the additive offset switched off.
    pub fn without_offset() -> Self {
        PublicationFormatter {
            inner: ScalarFormatter {
                use_offset: false,
                ..ScalarFormatter::new()
            },
        }
    }
}

impl TickFormatter for PublicationFormatter {
    fn name(&self) -> &'static str {
        "publication"
    }

    fn format_ticks(&self, ticks: &[f64]) -> Vec<String> {
        let math_text = rc_params().math_text;
        self.inner
            .format_ticks(ticks)
            .iter()
            .map(|label| publication_label(label, math_text))
            .collect()
    }

    fn offset_text(&self, ticks: &[f64]) -> Option<String> {
        self.inner.offset_text(ticks)
    }

    fn use_offset(&self) -> Option<bool> {
        self.inner.use_offset()
    }

    fn set_use_offset(&mut self, use_offset: bool) -> PlotResult<()> {
        self.inner.set_use_offset(use_offset)
    }

    fn clone_box(&self) -> Box<dyn TickFormatter> {
        Box::new(self.clone())
    }
}
