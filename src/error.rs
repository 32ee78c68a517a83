//! Error types for response rendering.
//!
//! This module provides [`RenderError`], the primary error type for all
//! rendering operations. It abstracts over the underlying template engine's
//! errors, providing a stable public API.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for rendering operations.
///
/// Construction-time failures (a template that does not parse) and
/// per-request failures (encode or execute errors) both surface through this
/// type. The [`Render`](crate::Render) façade converts per-request failures
/// into a written 500 response; [`RenderError::Partial`] is the one exception,
/// reported when the response body had already started streaming and a
/// follow-up error response would corrupt it further.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template syntax error or execution failure.
    #[error("template error: {0}")]
    Template(String),

    /// Template not found in the compiled set.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// XML serialization failed.
    #[error("XML serialization failed: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// Failed to read template source during compilation.
    #[error("failed to read template \"{path}\": {message}")]
    Read {
        /// Path or asset name that failed to read.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },

    /// I/O error writing to the response sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A write failed after body bytes were already flushed to the sink.
    ///
    /// No error response can be written at this point; the body is malformed.
    #[error("response write failed after body started: {0}")]
    Partial(String),

    /// Other operational error.
    #[error("{0}")]
    Operation(String),
}

impl RenderError {
    pub(crate) fn partial(err: impl std::fmt::Display) -> Self {
        RenderError::Partial(err.to_string())
    }
}

// Conversion from minijinja::Error - this keeps internal compatibility
impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        match err.kind() {
            ErrorKind::TemplateNotFound => RenderError::TemplateNotFound(err.to_string()),
            ErrorKind::SyntaxError
            | ErrorKind::BadEscape
            | ErrorKind::UndefinedError
            | ErrorKind::UnknownTest
            | ErrorKind::UnknownFunction
            | ErrorKind::UnknownFilter
            | ErrorKind::UnknownMethod => RenderError::Template(err.to_string()),
            _ => RenderError::Operation(err.to_string()),
        }
    }
}
