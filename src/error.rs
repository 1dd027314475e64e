//! Error types for relayout.

use std::io;
use thiserror::Error;

/// Result type alias for relayout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during structure reconstruction.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading recorded page input.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Recorded page input is not valid JSON for the expected shape.
    #[error("Invalid page input JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A page's fragments or line boxes are structurally malformed.
    #[error("Malformed input on page {page}: {reason}")]
    InputShape {
        /// 1-indexed page number
        page: u32,
        /// What was wrong with the page
        reason: String,
    },

    /// An option is out of its allowed range.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The run was cancelled between pages.
    #[error("Reconstruction cancelled after {completed} page(s)")]
    Cancelled {
        /// Pages fully processed before cancellation
        completed: u32,
    },

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Create an input shape error for a page.
    pub fn input_shape(page: u32, reason: impl Into<String>) -> Self {
        Error::InputShape {
            page,
            reason: reason.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }
}
