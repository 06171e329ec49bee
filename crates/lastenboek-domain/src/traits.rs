//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and its
//! collaborators. Infrastructure implementations live in other crates.

use crate::{BlobInfo, DocumentRecord};

/// Trait for listing and downloading source documents
///
/// Implemented by the infrastructure layer (lastenboek-store)
pub trait BlobStore {
    /// Error type for blob operations
    type Error;

    /// List every blob in the store
    fn list_blobs(&self) -> Result<Vec<BlobInfo>, Self::Error>;

    /// Download the full content of a blob
    fn download_blob(&self, name: &str) -> Result<Vec<u8>, Self::Error>;
}

/// Trait for persisting extracted document records
///
/// Implemented by the infrastructure layer (lastenboek-store)
pub trait DocumentStore {
    /// Error type for store operations
    type Error;

    /// Insert the record, or replace the item with the same `id`
    ///
    /// The write must be atomic per item: either the whole record is stored
    /// or nothing changes.
    fn upsert_item(&mut self, record: &DocumentRecord) -> Result<(), Self::Error>;

    /// Get a record by id
    fn get_item(&self, id: &str) -> Result<Option<DocumentRecord>, Self::Error>;

    /// List records ordered by id, optionally capped
    fn list_items(&self, limit: Option<usize>) -> Result<Vec<DocumentRecord>, Self::Error>;

    /// Number of stored records
    fn count_items(&self) -> Result<usize, Self::Error>;
}

/// Output mode requested from the extraction model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    /// Free-form text
    Text,
    /// A single JSON object
    #[default]
    JsonObject,
}

/// A single request to the extraction model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    /// Instruction establishing the assistant's task (system role)
    pub system_prompt: String,

    /// Task input (user role)
    pub user_prompt: String,

    /// Sampling temperature, 0.0 - 2.0
    pub temperature: f32,

    /// Ceiling on generated tokens
    pub max_output_tokens: u32,

    /// Requested output mode
    pub response_mode: ResponseMode,
}

/// Raw reply of the extraction model
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModelResponse {
    /// Message content; empty when the model returned none
    pub content: String,
}

impl ModelResponse {
    /// Wrap a content string
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Trait for language model operations
///
/// Implemented by the infrastructure layer (lastenboek-llm)
pub trait ExtractionModel {
    /// Error type for model operations
    type Error;

    /// Run one completion
    fn complete(&self, request: &ModelRequest) -> Result<ModelResponse, Self::Error>;

    /// Name of the model or deployment, for logs and reports
    fn model_name(&self) -> &str;
}
