//! Demo figures for the command line and for trying out layouts.

use std::fmt;

use crate::config::RenderConfig;
use crate::plotting::data::{index_of, linspace};
use crate::plotting::error::PlotResult;
use crate::plotting::figure::Figure;
use crate::plotting::style::{publication_color, Color, PUBLICATION_PALETTE};

/// The built-in demo figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    /// Three points on a straight line
    Line,
    /// A sine wave over 0..10
    Sine,
    /// An empty axes with a text note, for sizing placeholders
    Empty,
    /// Lines colored along a parameter, with a colorbar
    Colorbar,
}

impl Demo {
    pub const ALL: [Demo; 4] = [Demo::Line, Demo::Sine, Demo::Empty, Demo::Colorbar];

    pub fn name(self) -> &'static str {
        match self {
            Demo::Line => "line",
            Demo::Sine => "sine",
            Demo::Empty => "empty",
            Demo::Colorbar => "colorbar",
        }
    }

    /// Draw this demo into `fig`.
    ///
    /// A string `title` in the config's extra keys becomes the figure title.
    pub fn draw(self, fig: &mut Figure, config: &RenderConfig) -> PlotResult<()> {
        match self {
            Demo::Line => line(fig),
            Demo::Sine => sine(fig),
            Demo::Empty => empty(fig),
            Demo::Colorbar => colorbar(fig)?,
        }
        if let Some(title) = config.extra.get("title").and_then(|v| v.as_str()) {
            fig.suptitle(title);
        }
        Ok(())
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn line(fig: &mut Figure) {
    let y = vec![1.0, 2.0, 3.0];
    fig.add_subplot(1, 1, 1)
        .plot(index_of(&y), y)
        .build()
        .set_xlabel("margin fig [s\u{207B}\u{00B9}]")
        .set_ylabel("y label [m]");
}

fn sine(fig: &mut Figure) {
    let x = linspace(0.0, 10.0, 50);
    let y: Vec<f64> = x.iter().map(|v| v.sin()).collect();
    fig.add_subplot(1, 1, 1)
        .plot(x, y)
        .build()
        .set_xlabel("full width fig [s\u{207B}\u{00B9}]")
        .set_ylabel("sine [M\u{2295}]");
}

fn empty(fig: &mut Figure) {
    fig.add_subplot(1, 1, 1).text(0.31, 0.5, "I am empty");
}

fn colorbar(fig: &mut Figure) -> PlotResult<()> {
    let x = linspace(0.0, 1.0, 40);
    let axes = fig.add_subplot(1, 1, 1);
    axes.is_colorbar = Some(false);
    for (i, (_, color)) in PUBLICATION_PALETTE.iter().enumerate() {
        let slope = -1.0 + i as f64 * 0.4;
        let y: Vec<f64> = x.iter().map(|v| slope * v * v).collect();
        axes.plot(x.clone(), y).color(color.clone()).linewidth(1.0).build();
    }
    axes.set_xlabel("time [s]").set_ylabel("offset [km]");

    let colors: Vec<Color> = PUBLICATION_PALETTE.iter().map(|(_, c)| c.clone()).collect();
    fig.colorbar(0, -1.0, 1.0, colors)?
        .set_ylabel("slope");
    // Highlight the zero slope.
    fig.axes_mut()[0]
        .plot(vec![0.0, 1.0], vec![0.0, 0.0])
        .color(publication_color("lightblue").unwrap_or(Color::GRAY))
        .linewidth(0.5)
        .build();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_demo_draws() {
        for demo in Demo::ALL {
            let mut fig = Figure::new(3.5, 2.6);
            demo.draw(&mut fig, &RenderConfig::default()).unwrap();
            assert!(!fig.axes().is_empty(), "{} drew nothing", demo);
            assert!(fig.render().contains("</svg>"));
        }
    }

    #[test]
    fn test_colorbar_demo_marks_axes() {
        let mut fig = Figure::new(3.5, 2.6);
        Demo::Colorbar.draw(&mut fig, &RenderConfig::default()).unwrap();
        let marks: Vec<_> = fig.axes().iter().map(|a| a.is_colorbar).collect();
        assert_eq!(marks, vec![Some(false), Some(true)]);
        assert_eq!(fig.axes()[0].plot_count(), PUBLICATION_PALETTE.len() + 1);
    }

    #[test]
    fn test_title_from_extra_keys() {
        let config = RenderConfig::from_value(json!({ "title": "Demo" })).unwrap();
        let mut fig = Figure::new(3.5, 2.6);
        Demo::Empty.draw(&mut fig, &config).unwrap();
        assert_eq!(fig.title.as_deref(), Some("Demo"));
    }
}
