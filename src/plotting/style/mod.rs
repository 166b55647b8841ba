//! Styling module.
//!
//! Colors and the publication palette, line and text styles, and the global
//! style parameters with their scoped override.

pub mod color;
pub mod line_style;
pub mod rc;
pub mod text_style;

pub use color::{cycle_color, publication_color, Color, PUBLICATION_PALETTE};
pub use line_style::{DashPattern, LineCap, LineStyle};
pub use rc::{rc_context, rc_params, RcContext, RcParams};
pub use text_style::{FontWeight, TextAnchor, TextStyle};
