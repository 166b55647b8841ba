//! Error types for the plotting engine and the figure presenter.

use std::error::Error;
use std::fmt;
use std::io;

/// The main error type for plotting and presenting operations.
#[derive(Debug)]
pub enum PlotError {
    /// Error during IO operations (file writing, etc.)
    Io(io::Error),
    /// Invalid data provided for plotting
    InvalidData(String),
    /// Invalid configuration or parameters
    InvalidConfig(String),
    /// The user drawing callback failed
    Callback(Box<dyn Error + Send + Sync>),
    /// The operation is not supported by this object (e.g. offset on a log formatter)
    Unsupported(String),
    /// No encoder for the requested output file extension
    UnsupportedFormat(String),
    /// Rasterizing the figure failed
    RenderError(String),
}

impl PlotError {
    /// Wrap an error returned by a drawing callback.
    pub fn callback(err: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        PlotError::Callback(err.into())
    }
}

impl fmt::Display for PlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotError::Io(err) => write!(f, "IO error: {}", err),
            PlotError::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
            PlotError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            PlotError::Callback(err) => write!(f, "Drawing callback failed: {}", err),
            PlotError::Unsupported(msg) => write!(f, "Unsupported operation: {}", msg),
            PlotError::UnsupportedFormat(ext) => {
                write!(f, "Unsupported output format '{}'", ext)
            }
            PlotError::RenderError(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl Error for PlotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PlotError::Io(err) => Some(err),
            PlotError::Callback(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<io::Error> for PlotError {
    fn from(err: io::Error) -> Self {
        PlotError::Io(err)
    }
}

impl From<serde_json::Error> for PlotError {
    fn from(err: serde_json::Error) -> Self {
        PlotError::InvalidConfig(err.to_string())
    }
}

/// Result type alias for plotting operations.
pub type PlotResult<T> = Result<T, PlotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_error_keeps_source() {
        let err = PlotError::callback("axes missing");
        assert_eq!(err.to_string(), "Drawing callback failed: axes missing");
        assert_eq!(err.source().unwrap().to_string(), "axes missing");
    }

    #[test]
    fn test_json_error_is_invalid_config() {
        let json_err = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        assert!(matches!(PlotError::from(json_err), PlotError::InvalidConfig(_)));
    }
}
