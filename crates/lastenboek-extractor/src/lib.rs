//! Lastenboek Extractor
//!
//! Turns PDF construction specifications into structured document records.
//!
//! # Overview
//!
//! Each PDF in the blob store is downloaded, identified by a content hash,
//! converted to page-delimited text and sent to the extraction model with a
//! narrow JSON-only prompt. The validated response becomes a
//! [`DocumentRecord`](lastenboek_domain::DocumentRecord) that is upserted into
//! the document store under its identity.
//!
//! # Architecture
//!
//! ```text
//! BlobStore → bytes → DocumentId
//!                   → PDF text → ExtractionModel → ExtractedFields
//!                                                → DocumentRecord → DocumentStore
//! ```
//!
//! # Key Features
//!
//! - **Content-addressed identity**: Re-running over unchanged files overwrites
//!   the same records
//! - **Page headers**: Every non-empty page is prefixed with `--- PAGE n ---`
//! - **Strict schema**: Responses with missing or extra keys are rejected
//! - **Per-document isolation**: One failing document never stops the run
//! - **Dry runs**: Full extraction without writes
//!
//! # Example Usage
//!
//! ```no_run
//! use lastenboek_extractor::{ExtractorConfig, Pipeline};
//! use lastenboek_llm::MockModel;
//! use lastenboek_store::{DirBlobStore, SqliteStore};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let blobs = DirBlobStore::new("./lastenboeken")?;
//! let store = SqliteStore::new("./lastenboek.db")?;
//! let model = MockModel::new(
//!     r#"{"architect":null,"client":null,"date":null,"address":null,"extractionConfidence":0.0}"#,
//! );
//!
//! let mut pipeline = Pipeline::new(blobs, store, model, ExtractorConfig::default())?;
//! let report = pipeline.run()?;
//!
//! println!("Upserted: {} documents", report.records.len());
//! println!("Failures: {} documents", report.failures.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod pipeline;
mod prompt;
mod text;
mod types;

#[cfg(test)]
mod fixtures;


pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::FieldExtractor;
pub use parser::parse_model_response;
pub use pipeline::Pipeline;
pub use prompt::{PromptBuilder, SYSTEM_PROMPT};
pub use text::{join_pages, pdf_bytes_to_text, pdf_pages};
pub use types::{DocumentFailure, PageText, PipelineEvent, RunReport};
