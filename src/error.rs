//! # Error Types
//!
//! This module defines error types used throughout the recibo library.
//! Barcode validation failures keep their own [`EncodingError`] so callers
//! can tell an invalid checksum from an invalid character.

use thiserror::Error;

use crate::barcode::EncodingError;

/// Main error type for recibo operations
#[derive(Debug, Error)]
pub enum ReciboError {
    /// Barcode data rejected by its symbology
    #[error("Barcode error: {0}")]
    Encoding(#[from] EncodingError),

    /// Symbology name not recognised
    #[error("Unsupported symbology: {0}")]
    UnsupportedSymbology(String),

    /// A structured data object is missing a field the template uses
    #[error("Template binding error: {0}")]
    TemplateBinding(String),

    /// Template could not be parsed or rendered
    #[error("Template error: {0}")]
    Template(String),

    /// Unknown style flag or malformed directive argument
    #[error("Malformed directive: {0}")]
    MalformedDirective(String),

    /// Image could not be loaded or decoded
    #[error("Image error: {0}")]
    ImageDecode(String),

    /// External renderer exited unsuccessfully
    #[error("External renderer failed: {command}\n{output}")]
    ExternalRenderer { command: String, output: String },

    /// External renderer did not finish in time
    #[error("External renderer timed out after {0} seconds")]
    Timeout(u64),

    /// Template data file is not valid JSON
    #[error("Invalid data: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
