//! Internal minimal plotting module
//! Provides a matplotlib-like figure/axes API with SVG output, sized in
//! physical units so figures can be dropped into a document at their
//! nominal width.

pub mod axes;
pub mod backend;
pub mod data;
pub mod element;
pub mod error;
pub mod figure;
pub mod plot;
pub mod scale;
pub mod style;
pub mod ticker;

pub use axes::Axes;
pub use data::IntoPlotData;
pub use element::Bounds;
pub use error::{PlotError, PlotResult};
pub use figure::Figure;
pub use plot::{ColorbarPlot, LinePlot, Plot};
pub use scale::{LinearScale, LogScale, Scale, ScaleKind};
pub use style::{rc_context, rc_params, Color, DashPattern, LineStyle, RcParams, TextStyle};
pub use ticker::{publication_label, PublicationFormatter, TickFormatter};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::plotting::axes::Axes;
    pub use crate::plotting::data::{linspace, IntoPlotData};
    pub use crate::plotting::error::{PlotError, PlotResult};
    pub use crate::plotting::figure::Figure;
    pub use crate::plotting::scale::ScaleKind;
    pub use crate::plotting::style::{publication_color, Color, DashPattern};
}
