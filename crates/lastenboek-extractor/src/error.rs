//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur while processing a document
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Bytes are not a parseable PDF
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// Model response is not a JSON object with exactly the expected fields
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// Extraction model call failed
    #[error("Model error: {0}")]
    Model(String),

    /// Blob store listing or download failed
    #[error("Blob store error: {0}")]
    Blob(String),

    /// Document store write or read failed
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
