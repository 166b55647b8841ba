//! Publication-ready figures.
//!
//! [`presenter::present`] runs a drawing callback on a figure sized for a
//! journal or thesis layout, with the publication style active, then fixes up
//! axis line widths and tick labels before showing or saving the figure.

pub mod config;
pub mod demo;
pub mod plotting;
pub mod presenter;

pub use config::{LayoutPreset, RenderConfig, SizeOverride};
pub use presenter::{present, FigurePresenter, StdoutViewer, Viewer};
