//! # Error Types
//!
//! This module defines error types used throughout the skyreport library.

use thiserror::Error;

/// Main error type for report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Degenerate page geometry (zero/negative dimensions, margin overflow).
    /// Fatal to the layout call; no partial document is produced.
    #[error("Invalid page geometry: {0}")]
    Geometry(String),

    /// PDF backend failure (font registration, document serialization)
    #[error("Render error: {0}")]
    Render(String),

    /// Malformed input record at a binary boundary (CLI file, HTTP body)
    #[error("Record error: {0}")]
    Record(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
