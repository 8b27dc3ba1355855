//! Error types for the chart core.
//!
//! Rendering, flattening and interaction never fail; errors only arise
//! while building a forest from external input.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for chart operations.
#[derive(Debug, Error)]
pub enum ChartError {
    /// A colour string was not `#rgb` or `#rrggbb`.
    #[error("Invalid color '{value}': expected #rgb or #rrggbb")]
    InvalidColor { value: String },

    /// The forest file could not be read.
    #[error("Failed to read task forest at {path}: {source}")]
    ReadForest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The forest JSON was malformed.
    #[error("Failed to parse task forest: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type alias for chart operations.
pub type ChartResult<T> = Result<T, ChartError>;
