//! Lastenboek Domain Layer
//!
//! This crate contains the data model and collaborator interfaces of the
//! lastenboek ingestion pipeline. It performs no I/O; every external
//! interaction is expressed as a trait implemented by another crate.
//!
//! ## Key Concepts
//!
//! - **DocumentId**: Content-addressed identity derived from file name + bytes
//! - **ExtractedFields**: The five-field object returned by the extraction model
//! - **DocumentRecord**: The item persisted per document, keyed by `id`
//! - **BlobInfo**: A named binary object listed by the blob store
//!
//! ## Architecture
//!
//! - Pure data types and the identity function only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod identity;
pub mod traits;

// Re-exports for convenience
pub use document::{is_pdf_name, BlobInfo, DocumentRecord, ExtractedFields, FIELD_NAMES};
pub use identity::{compute_document_id, DocumentId, DIGEST_PREFIX_LEN};
pub use traits::{ModelRequest, ModelResponse, ResponseMode};
