//! The figure presenter: wraps a drawing callback with publication sizing,
//! style and tick formatting.
//!
//! [`present`] validates the configuration, resolves the physical figure
//! size, installs the publication style for the duration of the call, runs
//! the callback on a fresh [`Figure`], post-processes every axes, and finally
//! shows or saves the figure.

use std::error::Error;
use std::io::{self, Write};

use log::{debug, info, warn};
use serde_json::Value;

use crate::config::{RenderConfig, SizeOverride};
use crate::plotting::element::AxisConfig;
use crate::plotting::error::{PlotError, PlotResult};
use crate::plotting::figure::Figure;
use crate::plotting::style::{rc_context, RcParams};
use crate::plotting::ticker::{PublicationFormatter, TickFormatter};

/// Displays a figure when no output file is configured.
pub trait Viewer {
    fn show(&mut self, figure: &Figure) -> PlotResult<()>;
}

/// Writes the SVG document to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutViewer;

impl Viewer for StdoutViewer {
    fn show(&mut self, figure: &Figure) -> PlotResult<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(figure.render().as_bytes())?;
        handle.write_all(b"\n")?;
        handle.flush()?;
        Ok(())
    }
}

/// Runs drawing callbacks on publication-sized figures.
#[derive(Debug, Default)]
pub struct FigurePresenter<V: Viewer = StdoutViewer> {
    viewer: V,
}

impl FigurePresenter<StdoutViewer> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V: Viewer> FigurePresenter<V> {
    /// Presenter that hands unsaved figures to `viewer`.
    pub fn with_viewer(viewer: V) -> Self {
        FigurePresenter { viewer }
    }

    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    /// Draw one figure with `callback` and show or save it according to `config`.
    ///
    /// The publication style is active from canvas creation until the figure
    /// has been shown or saved, and the previous style is back in place when
    /// this returns or unwinds.
    pub fn present<F, E>(&mut self, callback: F, config: &RenderConfig) -> PlotResult<()>
    where
        F: FnOnce(&mut Figure, &RenderConfig) -> Result<(), E>,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        config.validate()?;
        if config.verbose {
            info!("Render config: {}", serde_json::to_string(config)?);
        }

        let (width, height) = resolve_size(config);
        let _style = rc_context(RcParams::publication());

        let mut figure = Figure::with_dpi(width, height, f64::from(config.dpi));
        debug!(
            "created {:.3}x{:.3} in canvas at {} dpi",
            width, height, config.dpi
        );
        callback(&mut figure, config).map_err(PlotError::callback)?;

        style_axes(&mut figure, config);

        match config.save_path {
            Some(ref path) => figure.save(path),
            None => self.viewer.show(&figure),
        }
    }

    /// Parse `value` into a [`RenderConfig`] and present with it.
    ///
    /// Nothing is drawn when the configuration does not parse.
    pub fn present_json<F, E>(&mut self, callback: F, value: Value) -> PlotResult<()>
    where
        F: FnOnce(&mut Figure, &RenderConfig) -> Result<(), E>,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        let config = RenderConfig::from_value(value)?;
        self.present(callback, &config)
    }
}

/// Present with the default viewer.
pub fn present<F, E>(callback: F, config: &RenderConfig) -> PlotResult<()>
where
    F: FnOnce(&mut Figure, &RenderConfig) -> Result<(), E>,
    E: Into<Box<dyn Error + Send + Sync>>,
{
    FigurePresenter::new().present(callback, config)
}

/// Physical figure size (width, height) in inches for `config`.
pub fn resolve_size(config: &RenderConfig) -> (f64, f64) {
    match config.explicit_size {
        Some(SizeOverride(Some(width), height)) => (width, height),
        Some(SizeOverride(None, factor)) => {
            let width = config.preset().width_in();
            (width, factor * width)
        }
        None => config.preset().size(),
    }
}

/// Apply line widths, tight layout and tick formatting to every axes.
pub fn style_axes(figure: &mut Figure, config: &RenderConfig) {
    let line_width = config.axis_line_width;
    for axes in figure.axes_mut() {
        axes.spines.set_linewidth(line_width);
        axes.x_axis.set_tick_width(line_width / 2.0);
        axes.y_axis.set_tick_width(line_width / 2.0);
    }

    if config.apply_tight_layout {
        figure.tight_layout(config.tight_layout_padding);
    }

    if !config.format_axis_ticks {
        return;
    }
    if config.format_y_axis {
        for (i, axes) in figure.axes_mut().iter_mut().enumerate() {
            disable_offset(&mut axes.y_axis, i, 'y');
            disable_offset(&mut axes.x_axis, i, 'x');
            // An axes never marked either way is formatted like a colorbar.
            let publish = match axes.is_colorbar {
                Some(true) => config.format_colorbar_axis,
                Some(false) => false,
                None => true,
            };
            if publish {
                axes.y_axis.set_formatter(PublicationFormatter::without_offset());
            }
        }
    }
    if config.format_x_axis {
        for axes in figure.axes_mut() {
            axes.x_axis.set_formatter(PublicationFormatter::without_offset());
        }
    }
}

fn disable_offset(axis: &mut AxisConfig, index: usize, which: char) {
    if let Err(err) = axis.formatter.set_use_offset(false) {
        warn!(
            "Cannot remove offset from {} axis of axes {} ({}), maybe using log axis?",
            which, index, err
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutPreset;
    use crate::plotting::scale::ScaleKind;
    use crate::plotting::style::rc::tests::serial;
    use crate::plotting::style::{rc_params, Color};
    use serde_json::json;
    use std::panic::{self, AssertUnwindSafe};

    /// What a viewer saw of one figure.
    struct Shown {
        width: f64,
        /// (spine width, x tick width, y tick width) per axes
        lines: Vec<(f64, f64, f64)>,
        /// (x formatter, y formatter) per axes
        formatters: Vec<(&'static str, &'static str)>,
    }

    #[derive(Default)]
    struct RecordingViewer {
        shown: Vec<Shown>,
    }

    impl Viewer for RecordingViewer {
        fn show(&mut self, figure: &Figure) -> PlotResult<()> {
            let lines = figure
                .axes()
                .iter()
                .map(|a| (a.spines.left.line_style.width, a.x_axis.tick_width, a.y_axis.tick_width))
                .collect();
            let formatters = figure
                .axes()
                .iter()
                .map(|a| (a.x_axis.formatter.name(), a.y_axis.formatter.name()))
                .collect();
            self.shown.push(Shown {
                width: figure.width,
                lines,
                formatters,
            });
            Ok(())
        }
    }

    fn simple_line(fig: &mut Figure, _config: &RenderConfig) -> Result<(), PlotError> {
        fig.add_subplot(1, 1, 1)
            .plot(vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 3.0])
            .build();
        Ok(())
    }

    #[test]
    fn test_preset_sizes() {
        for preset in LayoutPreset::ALL {
            let config = RenderConfig::default().with_preset(preset.name());
            let (w, h) = resolve_size(&config);
            assert_eq!(w, preset.width_in());
            assert!((h - 0.75 * w).abs() < 1e-12);
        }
    }

    #[test]
    fn test_explicit_size_wins_for_any_preset() {
        for name in ["one-column", "two-column", "margin", "main", "nonsense"] {
            let config = RenderConfig::default()
                .with_preset(name)
                .with_size(Some(3.0), 2.0);
            assert_eq!(resolve_size(&config), (3.0, 2.0));
        }
    }

    #[test]
    fn test_height_factor_override() {
        let config = RenderConfig::default()
            .with_preset("A&AFullWidth")
            .with_size(None, 0.4);
        let (w, h) = resolve_size(&config);
        assert_eq!(w, 7.2712643025);
        assert!((h - 0.4 * 7.2712643025).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_preset_falls_back_to_one_column() {
        let config = RenderConfig::default().with_preset("poster");
        assert_eq!(resolve_size(&config), LayoutPreset::OneColumn.size());
    }

    #[test]
    fn test_style_restored_on_every_exit_path() {
        let _serial = serial();
        let before = rc_params();
        let mut presenter = FigurePresenter::with_viewer(RecordingViewer::default());

        presenter
            .present(simple_line, &RenderConfig::default())
            .unwrap();
        assert_eq!(rc_params(), before);

        let err = presenter
            .present(|_, _| Err("no data"), &RenderConfig::default())
            .unwrap_err();
        assert!(matches!(err, PlotError::Callback(_)));
        assert_eq!(rc_params(), before);

        let bad_save = RenderConfig::default().with_save_path("/nonexistent-dir/fig.svg");
        assert!(matches!(
            presenter.present(simple_line, &bad_save),
            Err(PlotError::Io(_))
        ));
        assert_eq!(rc_params(), before);

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            presenter.present(
                |_: &mut Figure, _: &RenderConfig| -> Result<(), PlotError> {
                    panic!("callback exploded")
                },
                &RenderConfig::default(),
            )
        }));
        assert!(result.is_err());
        assert_eq!(rc_params(), before);
    }

    #[test]
    fn test_callback_sees_publication_style() {
        let _serial = serial();
        let mut presenter = FigurePresenter::with_viewer(RecordingViewer::default());
        presenter
            .present(
                |fig: &mut Figure, _: &RenderConfig| -> Result<(), PlotError> {
                    assert!(rc_params().math_text);
                    assert_eq!(fig.text_style().font_size, 8.0);
                    Ok(())
                },
                &RenderConfig::default(),
            )
            .unwrap();
    }

    #[test]
    fn test_callback_sees_unstyled_axes() {
        let _serial = serial();
        let config = RenderConfig {
            axis_line_width: 1.5,
            ..RenderConfig::default()
        };
        let mut presenter = FigurePresenter::with_viewer(RecordingViewer::default());
        presenter
            .present(
                |fig: &mut Figure, _: &RenderConfig| -> Result<(), PlotError> {
                    let axes = fig.add_subplot(1, 1, 1);
                    axes.plot(vec![0.0, 1.0], vec![0.0, 1.0]).build();
                    assert_eq!(axes.x_axis.formatter.name(), "scalar");
                    assert_eq!(axes.x_axis.formatter.use_offset(), Some(true));
                    assert_eq!(axes.y_axis.formatter.use_offset(), Some(true));
                    assert_eq!(axes.spines.left.line_style.width, 0.8);
                    assert_eq!(axes.x_axis.tick_width, 0.8);
                    Ok(())
                },
                &config,
            )
            .unwrap();
        let shown = &presenter.viewer().shown[0];
        assert_eq!(shown.formatters, vec![("publication", "publication")]);
        assert_eq!(shown.lines, vec![(1.5, 0.75, 0.75)]);
    }

    #[test]
    fn test_axis_line_widths() {
        let _serial = serial();
        let config = RenderConfig {
            axis_line_width: 2.0,
            ..RenderConfig::default()
        };
        let mut presenter = FigurePresenter::with_viewer(RecordingViewer::default());
        presenter
            .present(
                |fig: &mut Figure, _: &RenderConfig| -> Result<(), PlotError> {
                    fig.add_subplot(1, 2, 1).plot(vec![0.0, 1.0], vec![0.0, 1.0]).build();
                    fig.add_subplot(1, 2, 2).plot(vec![0.0, 1.0], vec![1.0, 0.0]).build();
                    Ok(())
                },
                &config,
            )
            .unwrap();
        let shown = &presenter.viewer().shown;
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].lines, vec![(2.0, 1.0, 1.0); 2]);
    }

    #[test]
    fn test_styling_of_a_drawn_figure() {
        let _serial = serial();
        let _ctx = rc_context(RcParams::publication());
        let mut fig = Figure::with_dpi(3.5, 2.6, 100.0);
        fig.add_subplot(1, 1, 1)
            .plot(vec![-2.0, 0.0, 2.0], vec![100000.0, 100000.5, 100001.0])
            .build();
        fig.colorbar(0, 0.0, 2.0, vec![Color::PUB_BLUE, Color::PUB_RED])
            .unwrap();
        let config = RenderConfig {
            axis_line_width: 0.4,
            ..RenderConfig::default()
        };
        style_axes(&mut fig, &config);

        let main = &fig.axes()[0];
        assert_eq!(main.spines.bottom.line_style.width, 0.4);
        assert_eq!(main.x_axis.tick_width, 0.2);
        assert_eq!(main.x_axis.formatter.name(), "publication");
        assert_eq!(main.y_axis.formatter.name(), "publication");
        assert_eq!(main.y_axis.formatter.use_offset(), Some(false));
        let (x_labels, y_labels) = main.tick_labels();
        assert!(x_labels.iter().any(|l| l.starts_with('\u{2010}')));
        assert!(y_labels.iter().all(|l| !l.ends_with(".0")));

        let bar = &fig.axes()[1];
        assert_eq!(bar.y_axis.formatter.name(), "publication");
    }

    #[test]
    fn test_colorbar_marker_controls_y_formatting() {
        let config = RenderConfig {
            format_colorbar_axis: false,
            format_x_axis: false,
            apply_tight_layout: false,
            ..RenderConfig::default()
        };
        let mut fig = Figure::new(4.0, 3.0);
        fig.add_subplot(1, 3, 1).is_colorbar = Some(true);
        fig.add_subplot(1, 3, 2).is_colorbar = Some(false);
        fig.add_subplot(1, 3, 3);
        style_axes(&mut fig, &config);

        let names: Vec<_> = fig.axes().iter().map(|a| a.y_axis.formatter.name()).collect();
        assert_eq!(names, vec!["scalar", "scalar", "publication"]);
        // Offsets are switched off everywhere, formatter swapped or not.
        for axes in fig.axes() {
            assert_eq!(axes.y_axis.formatter.use_offset(), Some(false));
            assert_eq!(axes.x_axis.formatter.use_offset(), Some(false));
            assert_eq!(axes.x_axis.formatter.name(), "scalar");
        }
    }

    #[test]
    fn test_log_axis_offset_is_only_a_warning() {
        let mut fig = Figure::new(4.0, 3.0);
        let axes = fig.add_subplot(1, 1, 1);
        axes.set_yscale(ScaleKind::Log);
        axes.is_colorbar = Some(false);
        axes.plot(vec![1.0, 2.0, 3.0], vec![1.0, 10.0, 100.0]).build();
        style_axes(&mut fig, &RenderConfig::default());
        assert_eq!(fig.axes()[0].y_axis.formatter.name(), "log");
        assert_eq!(fig.axes()[0].x_axis.formatter.name(), "publication");
    }

    #[test]
    fn test_tick_formatting_switch() {
        let config = RenderConfig {
            format_axis_ticks: false,
            ..RenderConfig::default()
        };
        let mut fig = Figure::new(4.0, 3.0);
        fig.add_subplot(1, 1, 1);
        style_axes(&mut fig, &config);
        assert_eq!(fig.axes()[0].y_axis.formatter.name(), "scalar");
        assert_eq!(fig.axes()[0].y_axis.formatter.use_offset(), Some(true));
    }

    #[test]
    fn test_save_or_show() {
        let _serial = serial();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.svg");
        let mut presenter = FigurePresenter::with_viewer(RecordingViewer::default());

        let config = RenderConfig::default().with_save_path(path.to_string_lossy());
        presenter.present(simple_line, &config).unwrap();
        assert!(path.exists());
        assert!(presenter.viewer().shown.is_empty());

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<svg"));

        presenter
            .present(simple_line, &RenderConfig::default())
            .unwrap();
        assert_eq!(presenter.viewer().shown.len(), 1);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_save_png_skips_viewer() {
        let _serial = serial();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let mut presenter = FigurePresenter::with_viewer(RecordingViewer::default());

        let config = RenderConfig::default().with_save_path(path.to_string_lossy());
        presenter.present(simple_line, &config).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        assert!(presenter.viewer().shown.is_empty());
    }

    #[test]
    fn test_unsupported_extension() {
        let _serial = serial();
        let dir = tempfile::tempdir().unwrap();
        let config = RenderConfig::default()
            .with_save_path(dir.path().join("fig.pdf").to_string_lossy());
        let err = FigurePresenter::with_viewer(RecordingViewer::default())
            .present(simple_line, &config)
            .unwrap_err();
        assert!(matches!(err, PlotError::UnsupportedFormat(ref ext) if ext == "pdf"));
    }

    #[test]
    fn test_bad_json_config_never_draws() {
        let mut presenter = FigurePresenter::with_viewer(RecordingViewer::default());
        let mut called = false;
        let err = presenter
            .present_json(
                |_: &mut Figure, _: &RenderConfig| -> Result<(), PlotError> {
                    called = true;
                    Ok(())
                },
                json!({ "save_path": 42 }),
            )
            .unwrap_err();
        assert!(matches!(err, PlotError::InvalidConfig(_)));
        assert!(!called);
        assert!(presenter.viewer().shown.is_empty());
    }

    #[test]
    fn test_invalid_values_rejected_before_drawing() {
        let mut presenter = FigurePresenter::with_viewer(RecordingViewer::default());
        let mut called = false;
        let config = RenderConfig {
            dpi: 0,
            ..RenderConfig::default()
        };
        let err = presenter
            .present(
                |_: &mut Figure, _: &RenderConfig| -> Result<(), PlotError> {
                    called = true;
                    Ok(())
                },
                &config,
            )
            .unwrap_err();
        assert!(matches!(err, PlotError::InvalidConfig(_)));
        assert!(!called);
    }

    #[test]
    fn test_extra_keys_reach_the_callback() {
        let _serial = serial();
        let mut presenter = FigurePresenter::with_viewer(RecordingViewer::default());
        let mut seen = None;
        presenter
            .present_json(
                |fig: &mut Figure, config: &RenderConfig| -> Result<(), PlotError> {
                    seen = config.extra.get("label").cloned();
                    fig.gca();
                    Ok(())
                },
                json!({ "type": "margin", "label": "flux" }),
            )
            .unwrap();
        assert_eq!(seen, Some(json!("flux")));
        let shown = &presenter.viewer().shown[0];
        assert_eq!(shown.width, LayoutPreset::Margin.width_in());
        assert_eq!(shown.lines.len(), 1);
    }
}
