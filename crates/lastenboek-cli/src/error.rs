//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pipeline error
    #[error(transparent)]
    Extractor(#[from] lastenboek_extractor::ExtractorError),

    /// Document store error
    #[error("Store error: {0}")]
    Store(#[from] lastenboek_store::StoreError),

    /// Blob store error
    #[error("Blob store error: {0}")]
    Blob(#[from] lastenboek_store::BlobError),

    /// Model client error
    #[error("Model error: {0}")]
    Llm(#[from] lastenboek_llm::LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// No record with the given id
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
