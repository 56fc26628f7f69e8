//! Error types for sb2md library.

use std::io;
use thiserror::Error;

/// Result type alias for sb2md operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading an export or writing Markdown.
///
/// Markup ambiguity and link resolution failures are never reported here;
/// they degrade to literal text or unresolved links.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid JSON or does not match the export layout.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON is well-formed but is not a project export.
    #[error("Invalid export: {0}")]
    InvalidExport(String),

    /// A page could not be rendered.
    #[error("Rendering error: {0}")]
    Render(String),

    /// A UTC offset outside the range chrono accepts.
    #[error("Invalid UTC offset: {0} seconds")]
    InvalidOffset(i32),

    /// The HTTP client for link probing could not be built.
    #[cfg(feature = "http")]
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
