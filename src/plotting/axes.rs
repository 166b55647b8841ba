//! Axes (subplot) implementation.

use log::warn;

use crate::plotting::backend::SvgBackend;
use crate::plotting::data::IntoPlotData;
use crate::plotting::element::{AxisConfig, Bounds, Side, Spines, Text};
use crate::plotting::plot::{LinePlot, Plot, RenderContext};
use crate::plotting::scale::{LinearScale, LogScale, Scale, ScaleKind};
use crate::plotting::style::{
    cycle_color, Color, DashPattern, LineCap, LineStyle, TextAnchor, TextStyle,
};
use crate::plotting::ticker::LogFormatter;

/// Gap in points between tick labels and axis labels.
const LABEL_PAD: f64 = 4.0;

/// Cell of a subplot grid, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSlot {
    pub rows: usize,
    pub cols: usize,
    pub row: usize,
    pub col: usize,
}

/// Space taken by ticks, labels and title outside the plot area, in points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Extents {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// An axes object representing a single plot area.
#[derive(Debug)]
pub struct Axes {
    /// Position within figure (figure-fraction coordinates, y up)
    pub position: Bounds,
    /// Border lines
    pub spines: Spines,
    /// X-axis ticks and labels
    pub x_axis: AxisConfig,
    /// Y-axis ticks and labels
    pub y_axis: AxisConfig,
    /// Marks an axes hosting a color scale. `None` when never set.
    pub is_colorbar: Option<bool>,
    /// Title
    pub title: Option<Text>,
    /// X-axis label
    pub x_label: Option<Text>,
    /// Y-axis label
    pub y_label: Option<Text>,
    /// Fraction of the data range added on each side when autoscaling
    pub margins: f64,
    /// Draw y ticks and labels on the right (colorbars)
    pub y_ticks_right: bool,
    pub(crate) grid_slot: Option<GridSlot>,
    pub(crate) colorbar_of: Option<usize>,
    x_scale: Box<dyn Scale>,
    y_scale: Box<dyn Scale>,
    x_scale_kind: ScaleKind,
    y_scale_kind: ScaleKind,
    plots: Vec<Box<dyn Plot>>,
    /// Annotations in axes-fraction coordinates
    texts: Vec<Text>,
    data_bounds: Option<Bounds>,
    x_lim: Option<(f64, f64)>,
    y_lim: Option<(f64, f64)>,
    color_index: usize,
    text_style: TextStyle,
}

impl Axes {
    /// Create a new axes whose text uses `text_style`.
    pub fn new(text_style: TextStyle) -> Self {
        Axes {
            position: Bounds::new(0.125, 0.9, 0.11, 0.88),
            spines: Spines::default(),
            x_axis: AxisConfig::default(),
            y_axis: AxisConfig::default(),
            is_colorbar: None,
            title: None,
            x_label: None,
            y_label: None,
            margins: 0.05,
            y_ticks_right: false,
            grid_slot: None,
            colorbar_of: None,
            x_scale: Box::new(LinearScale::auto()),
            y_scale: Box::new(LinearScale::auto()),
            x_scale_kind: ScaleKind::Linear,
            y_scale_kind: ScaleKind::Linear,
            plots: Vec::new(),
            texts: Vec::new(),
            data_bounds: None,
            x_lim: None,
            y_lim: None,
            color_index: 0,
            text_style,
        }
    }

    /// Add a line plot.
    pub fn plot(&mut self, x: impl IntoPlotData, y: impl IntoPlotData) -> LinePlotBuilder<'_> {
        LinePlotBuilder {
            axes: self,
            x: x.into_plot_data(),
            y: y.into_plot_data(),
            color: None,
            linewidth: None,
            linestyle: None,
            format: None,
        }
    }

    /// Place text at (`x`, `y`) in axes-fraction coordinates (0..1 on both axes).
    pub fn text(&mut self, x: f64, y: f64, content: impl Into<String>) -> &mut Self {
        self.texts
            .push(Text::new(content, x, y).style(self.text_style.clone()));
        self
    }

    /// Set the title.
    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        let style = self
            .text_style
            .clone()
            .font_size(self.text_style.font_size * 1.2)
            .anchor(TextAnchor::Middle);
        self.title = Some(Text::new(title, 0.0, 0.0).style(style));
        self
    }

    /// Set the x-axis label.
    pub fn set_xlabel(&mut self, label: impl Into<String>) -> &mut Self {
        let style = self.text_style.clone().anchor(TextAnchor::Middle);
        self.x_label = Some(Text::new(label, 0.0, 0.0).style(style));
        self
    }

    /// Set the y-axis label.
    pub fn set_ylabel(&mut self, label: impl Into<String>) -> &mut Self {
        let style = self
            .text_style
            .clone()
            .anchor(TextAnchor::Middle)
            .rotation(-90.0);
        self.y_label = Some(Text::new(label, 0.0, 0.0).style(style));
        self
    }

    /// Set the x-axis limits.
    pub fn set_xlim(&mut self, min: f64, max: f64) -> &mut Self {
        self.x_lim = Some((min, max));
        self
    }

    /// Set the y-axis limits.
    pub fn set_ylim(&mut self, min: f64, max: f64) -> &mut Self {
        self.y_lim = Some((min, max));
        self
    }

    /// Switch the x axis scale. A log scale also installs a log formatter.
    pub fn set_xscale(&mut self, kind: ScaleKind) -> &mut Self {
        self.x_scale_kind = kind;
        self.x_scale = new_scale(kind);
        if kind == ScaleKind::Log {
            self.x_axis.set_formatter(LogFormatter);
        }
        self
    }

    /// Switch the y axis scale. A log scale also installs a log formatter.
    pub fn set_yscale(&mut self, kind: ScaleKind) -> &mut Self {
        self.y_scale_kind = kind;
        self.y_scale = new_scale(kind);
        if kind == ScaleKind::Log {
            self.y_axis.set_formatter(LogFormatter);
        }
        self
    }

    pub fn x_scale_kind(&self) -> ScaleKind {
        self.x_scale_kind
    }

    pub fn y_scale_kind(&self) -> ScaleKind {
        self.y_scale_kind
    }

    /// Number of plots drawn in this axes.
    pub fn plot_count(&self) -> usize {
        self.plots.len()
    }

    /// Grid cell this axes was created in, if it came from `add_subplot`.
    pub fn grid_slot(&self) -> Option<GridSlot> {
        self.grid_slot
    }

    /// Add a plot to this axes.
    pub(crate) fn add_plot(&mut self, plot: Box<dyn Plot>) {
        if let Some(plot_bounds) = plot.bounds() {
            if let Some(ref mut bounds) = self.data_bounds {
                bounds.include_bounds(&plot_bounds);
            } else {
                self.data_bounds = Some(plot_bounds);
            }
        }
        self.plots.push(plot);
    }

    /// Get the next color from the cycle.
    pub(crate) fn next_color(&mut self) -> Color {
        let color = cycle_color(self.color_index);
        self.color_index += 1;
        color
    }

    /// Scales fitted to the limits (or data, padded by `margins`).
    fn fitted_scales(&self) -> (Box<dyn Scale>, Box<dyn Scale>) {
        let data = self.data_bounds.unwrap_or_default();
        let fit = |scale: &dyn Scale, lim: Option<(f64, f64)>, auto: (f64, f64), axis: char| -> Box<dyn Scale> {
            let mut fitted = scale.clone_box();
            match lim {
                Some((min, max)) => {
                    if let Err(err) = fitted.set_range(min, max) {
                        warn!(
                            "Ignoring {} limits ({}, {}): {}",
                            axis, min, max, err
                        );
                    }
                }
                None => {
                    // Unplaceable data (e.g. all non-positive on a log axis) keeps the default range.
                    if fitted.set_range(auto.0, auto.1).is_ok() && self.margins > 0.0 {
                        let (lo, hi) = fitted.pad(self.margins);
                        let _ = fitted.set_range(lo, hi);
                    }
                }
            }
            fitted
        };
        (
            fit(self.x_scale.as_ref(), self.x_lim, (data.x_min, data.x_max), 'x'),
            fit(self.y_scale.as_ref(), self.y_lim, (data.y_min, data.y_max), 'y'),
        )
    }

    fn visible_ticks(axis: &AxisConfig, scale: &dyn Scale) -> Vec<f64> {
        let (lo, hi) = scale.range();
        let tolerance = (hi - lo).abs() * 1e-9;
        let ticks = match axis.tick_positions {
            Some(ref positions) => positions.clone(),
            None => scale.ticks(axis.num_ticks),
        };
        ticks
            .into_iter()
            .filter(|t| *t >= lo - tolerance && *t <= hi + tolerance)
            .collect()
    }

    /// Tick positions and labels currently produced for (x, y).
    pub fn tick_labels(&self) -> (Vec<String>, Vec<String>) {
        let (x_scale, y_scale) = self.fitted_scales();
        let x_ticks = Self::visible_ticks(&self.x_axis, x_scale.as_ref());
        let y_ticks = Self::visible_ticks(&self.y_axis, y_scale.as_ref());
        (
            self.x_axis.format_ticks(&x_ticks),
            self.y_axis.format_ticks(&y_ticks),
        )
    }

    /// Estimate how far ticks, labels and title reach outside the plot area.
    pub fn decoration_extents(&self) -> Extents {
        let font = self.text_style.font_size;
        let (x_labels, y_labels) = self.tick_labels();
        let mut extents = Extents {
            top: font * 0.5,
            ..Extents::default()
        };

        if self.x_axis.visible {
            extents.bottom = self.x_axis.tick_length + self.x_axis.tick_padding + font;
            let widest = x_labels
                .iter()
                .map(|l| self.text_style.estimate_width(l))
                .fold(0.0, f64::max);
            extents.right = extents.right.max(widest / 2.0);
            extents.left = extents.left.max(widest / 2.0);
        }
        if self.x_label.is_some() {
            extents.bottom += LABEL_PAD + font * 1.2;
        }

        let mut y_side = 0.0;
        if self.y_axis.visible {
            let widest = y_labels
                .iter()
                .map(|l| self.text_style.estimate_width(l))
                .fold(0.0, f64::max);
            y_side = self.y_axis.tick_length + self.y_axis.tick_padding + widest;
        }
        if self.y_label.is_some() {
            y_side += LABEL_PAD + font * 1.2;
        }
        if self.y_ticks_right {
            extents.right = extents.right.max(y_side);
        } else {
            extents.left = extents.left.max(y_side);
        }

        if let Some(ref title) = self.title {
            extents.top = title.style.font_size * 1.2 + LABEL_PAD;
        }
        extents
    }

    /// Render the axes into the backend.
    pub fn render_svg(&self, backend: &mut SvgBackend) {
        let (width_px, height_px) = (backend.width_px(), backend.height_px());
        let ppp = backend.px_per_pt();
        let font = self.text_style.font_size;

        let pixel_bounds = Bounds::new(
            self.position.x_min * width_px,
            self.position.x_max * width_px,
            (1.0 - self.position.y_max) * height_px,
            (1.0 - self.position.y_min) * height_px,
        );

        let (x_scale, y_scale) = self.fitted_scales();
        let ctx = RenderContext {
            x_scale: x_scale.as_ref(),
            y_scale: y_scale.as_ref(),
            pixel_bounds,
            px_per_pt: ppp,
        };

        // Plots (clipped to plot area)
        let clip_id = format!(
            "plot-clip-{:.0}-{:.0}",
            pixel_bounds.x_min, pixel_bounds.y_min
        );
        backend.start_clip(
            &clip_id,
            pixel_bounds.x_min,
            pixel_bounds.y_min,
            pixel_bounds.width(),
            pixel_bounds.height(),
        );
        for plot in &self.plots {
            backend.add_content(plot.render_svg(&ctx));
        }
        backend.end_clip();

        // Spines
        for side in Side::ALL {
            let spine = self.spines.get(side);
            if !spine.visible {
                continue;
            }
            let (x1, y1, x2, y2) = match side {
                Side::Top => (pixel_bounds.x_min, pixel_bounds.y_min, pixel_bounds.x_max, pixel_bounds.y_min),
                Side::Bottom => (pixel_bounds.x_min, pixel_bounds.y_max, pixel_bounds.x_max, pixel_bounds.y_max),
                Side::Left => (pixel_bounds.x_min, pixel_bounds.y_min, pixel_bounds.x_min, pixel_bounds.y_max),
                Side::Right => (pixel_bounds.x_max, pixel_bounds.y_min, pixel_bounds.x_max, pixel_bounds.y_max),
            };
            backend.draw_line(x1, y1, x2, y2, &spine.line_style);
        }

        // X ticks along the bottom
        if self.x_axis.visible {
            let ticks = Self::visible_ticks(&self.x_axis, x_scale.as_ref());
            let labels = self.x_axis.format_ticks(&ticks);
            let tick_style = tick_line_style(&self.x_axis);
            let label_style = self.text_style.clone().anchor(TextAnchor::Middle);
            let label_y = pixel_bounds.y_max
                + (self.x_axis.tick_length + self.x_axis.tick_padding + font * 0.8) * ppp;
            for (tick, label) in ticks.iter().zip(&labels) {
                let (px, _) = ctx.transform(*tick, y_scale.range().0);
                backend.draw_line(
                    px,
                    pixel_bounds.y_max,
                    px,
                    pixel_bounds.y_max + self.x_axis.tick_length * ppp,
                    &tick_style,
                );
                backend.draw_text(px, label_y, label, &label_style);
            }
            if let Some(offset) = self.x_axis.formatter.offset_text(&ticks) {
                let style = self.text_style.clone().anchor(TextAnchor::End);
                backend.draw_text(pixel_bounds.x_max, label_y + font * 1.1 * ppp, &offset, &style);
            }
        }

        // Y ticks on the left (or right for colorbars)
        if self.y_axis.visible {
            let ticks = Self::visible_ticks(&self.y_axis, y_scale.as_ref());
            let labels = self.y_axis.format_ticks(&ticks);
            let tick_style = tick_line_style(&self.y_axis);
            let (edge, direction, anchor) = if self.y_ticks_right {
                (pixel_bounds.x_max, 1.0, TextAnchor::Start)
            } else {
                (pixel_bounds.x_min, -1.0, TextAnchor::End)
            };
            let label_style = self.text_style.clone().anchor(anchor);
            let label_x =
                edge + direction * (self.y_axis.tick_length + self.y_axis.tick_padding) * ppp;
            for (tick, label) in ticks.iter().zip(&labels) {
                let (_, py) = ctx.transform(x_scale.range().0, *tick);
                backend.draw_line(
                    edge,
                    py,
                    edge + direction * self.y_axis.tick_length * ppp,
                    py,
                    &tick_style,
                );
                // Shift the baseline down so the label is centred on the tick.
                backend.draw_text(label_x, py + font * 0.35 * ppp, label, &label_style);
            }
            if let Some(offset) = self.y_axis.formatter.offset_text(&ticks) {
                let style = self.text_style.clone().anchor(TextAnchor::Start);
                backend.draw_text(edge, pixel_bounds.y_min - LABEL_PAD * ppp, &offset, &style);
            }
        }

        let extents = self.decoration_extents();
        let center_x = (pixel_bounds.x_min + pixel_bounds.x_max) / 2.0;
        let center_y = (pixel_bounds.y_min + pixel_bounds.y_max) / 2.0;

        if let Some(ref title) = self.title {
            backend.add_content(title.to_svg_at(center_x, pixel_bounds.y_min - LABEL_PAD * ppp, ppp));
        }
        if let Some(ref label) = self.x_label {
            backend.add_content(label.to_svg_at(center_x, pixel_bounds.y_max + extents.bottom * ppp, ppp));
        }
        if let Some(ref label) = self.y_label {
            let reach = if self.y_ticks_right { extents.right } else { extents.left };
            let x = if self.y_ticks_right {
                pixel_bounds.x_max + (reach - font * 0.2) * ppp
            } else {
                pixel_bounds.x_min - (reach - font) * ppp
            };
            backend.add_content(label.to_svg_at(x, center_y, ppp));
        }
        for text in &self.texts {
            let px = pixel_bounds.x_min + text.x * pixel_bounds.width();
            let py = pixel_bounds.y_max - text.y * pixel_bounds.height();
            backend.add_content(text.to_svg_at(px, py, ppp));
        }
    }
}

fn new_scale(kind: ScaleKind) -> Box<dyn Scale> {
    match kind {
        ScaleKind::Linear => Box::new(LinearScale::auto()),
        ScaleKind::Log => Box::new(LogScale::auto()),
    }
}

fn tick_line_style(axis: &AxisConfig) -> LineStyle {
    LineStyle::new()
        .color(axis.tick_color.clone())
        .width(axis.tick_width)
        .cap(LineCap::Butt)
}

/// Builder for line plots.
pub struct LinePlotBuilder<'a> {
    axes: &'a mut Axes,
    x: Vec<f64>,
    y: Vec<f64>,
    color: Option<Color>,
    linewidth: Option<f64>,
    linestyle: Option<DashPattern>,
    format: Option<String>,
}

impl<'a> LinePlotBuilder<'a> {
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn linewidth(mut self, width: f64) -> Self {
        self.linewidth = Some(width);
        self
    }

    pub fn linestyle(mut self, style: DashPattern) -> Self {
        self.linestyle = Some(style);
        self
    }

    pub fn format(mut self, fmt: impl Into<String>) -> Self {
        self.format = Some(fmt.into());
        self
    }

    pub fn build(self) -> &'a mut Axes {
        let color = self.color.unwrap_or_else(|| self.axes.next_color());

        let mut plot = LinePlot::new(self.x, self.y).color(color);

        if let Some(fmt) = self.format {
            plot = plot.format(&fmt);
        }
        if let Some(width) = self.linewidth {
            plot = plot.linewidth(width);
        }
        if let Some(style) = self.linestyle {
            plot = plot.linestyle(style);
        }

        self.axes.add_plot(Box::new(plot));
        self.axes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::error::PlotError;

    #[test]
    fn test_plot_builder_cycles_colors() {
        let mut axes = Axes::new(TextStyle::new());
        axes.plot(vec![0.0, 1.0], vec![0.0, 1.0]).build();
        axes.plot(vec![0.0, 1.0], vec![1.0, 0.0]).color("red").build();
        axes.plot(vec![0.0, 1.0], vec![0.5, 0.5]).build();
        assert_eq!(axes.plot_count(), 3);
        assert_eq!(axes.next_color(), Color::PUB_RED);
    }

    #[test]
    fn test_tick_labels_follow_limits() {
        let mut axes = Axes::new(TextStyle::new());
        axes.set_xlim(0.0, 2.0).set_ylim(-1.0, 1.0);
        let (x, y) = axes.tick_labels();
        assert_eq!(x, vec!["0.0", "0.5", "1.0", "1.5", "2.0"]);
        assert_eq!(y.len(), 5);
    }

    #[test]
    fn test_log_scale_installs_log_formatter() {
        let mut axes = Axes::new(TextStyle::new());
        axes.set_yscale(ScaleKind::Log);
        assert_eq!(axes.y_scale_kind(), ScaleKind::Log);
        assert_eq!(axes.y_axis.formatter.name(), "log");
        assert!(matches!(
            axes.y_axis.formatter.set_use_offset(false),
            Err(PlotError::Unsupported(_))
        ));
    }

    #[test]
    fn test_rejected_log_limits_keep_default_range() {
        let mut axes = Axes::new(TextStyle::new());
        axes.set_yscale(ScaleKind::Log).set_ylim(-5.0, -1.0);
        let (_, y_scale) = axes.fitted_scales();
        assert_eq!(y_scale.range(), (1.0, 10.0));

        axes.set_ylim(0.5, 50.0);
        let (_, y_scale) = axes.fitted_scales();
        assert_eq!(y_scale.range(), (0.5, 50.0));
    }

    #[test]
    fn test_extents_grow_with_labels() {
        let mut axes = Axes::new(TextStyle::new().font_size(10.0));
        axes.plot(vec![0.0, 1.0], vec![0.0, 1.0]).build();
        let bare = axes.decoration_extents();
        axes.set_xlabel("time").set_ylabel("flux").set_title("light curve");
        let labelled = axes.decoration_extents();
        assert!(labelled.bottom > bare.bottom);
        assert!(labelled.left > bare.left);
        assert!(labelled.top > bare.top);
    }
}
