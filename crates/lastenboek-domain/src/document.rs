//! Document module - extracted fields and the persisted record

use crate::identity::DocumentId;
use serde::{Deserialize, Serialize};

/// JSON keys of the extraction schema, in prompt order
///
/// A model response is only accepted when its keys are exactly this set.
pub const FIELD_NAMES: [&str; 5] = [
    "architect",
    "client",
    "date",
    "address",
    "extractionConfidence",
];

/// Metadata fields extracted from a lastenboek by the extraction model
///
/// Values are taken as reported; nothing here is validated or normalized.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFields {
    /// The architect of the project
    pub architect: Option<String>,

    /// The commissioning party (opdrachtgever / bouwheer)
    pub client: Option<String>,

    /// Document or project date, ISO `YYYY-MM-DD` when the model could derive one
    pub date: Option<String>,

    /// The project address
    pub address: Option<String>,

    /// Model-reported confidence, not independently verified
    pub extraction_confidence: f64,
}

/// The item persisted in the document store, one per document
///
/// `id` and `document_id` carry the same value; the duplicate exists for
/// stores that partition or look up on a separate key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Primary key (= `document_id`)
    pub id: String,

    /// Content-addressed document id
    pub document_id: String,

    /// Original blob name
    pub file_name: String,

    /// The architect of the project
    pub architect: Option<String>,

    /// The commissioning party
    pub client: Option<String>,

    /// Document or project date
    pub date: Option<String>,

    /// The project address
    pub address: Option<String>,

    /// Model-reported confidence
    pub extraction_confidence: f64,
}

impl DocumentRecord {
    /// Assemble a record from a document id, its file name and the extracted fields
    ///
    /// # Examples
    ///
    /// ```
    /// use lastenboek_domain::{compute_document_id, DocumentRecord, ExtractedFields};
    ///
    /// let id = compute_document_id("spec1.pdf", b"%PDF-1.4");
    /// let fields = ExtractedFields {
    ///     architect: Some("Jane Doe".to_string()),
    ///     extraction_confidence: 0.8,
    ///     ..Default::default()
    /// };
    /// let record = DocumentRecord::new(&id, "spec1.pdf", fields);
    /// assert_eq!(record.id, record.document_id);
    /// assert_eq!(record.architect.as_deref(), Some("Jane Doe"));
    /// ```
    pub fn new(document_id: &DocumentId, file_name: impl Into<String>, fields: ExtractedFields) -> Self {
        Self {
            id: document_id.to_string(),
            document_id: document_id.to_string(),
            file_name: file_name.into(),
            architect: fields.architect,
            client: fields.client,
            date: fields.date,
            address: fields.address,
            extraction_confidence: fields.extraction_confidence,
        }
    }

    /// The extracted fields carried by this record
    pub fn fields(&self) -> ExtractedFields {
        ExtractedFields {
            architect: self.architect.clone(),
            client: self.client.clone(),
            date: self.date.clone(),
            address: self.address.clone(),
            extraction_confidence: self.extraction_confidence,
        }
    }
}

/// A named binary object listed by a blob store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobInfo {
    /// Blob name, unique within the store
    pub name: String,

    /// Size in bytes, when the store reports it
    pub size: Option<u64>,
}

impl BlobInfo {
    /// Create a blob descriptor without size information
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: None,
        }
    }

    /// Whether this blob should be fed to the pipeline (`.pdf`, any case)
    pub fn is_pdf(&self) -> bool {
        is_pdf_name(&self.name)
    }
}

/// Whether a blob name ends in `.pdf`, compared case-insensitively
pub fn is_pdf_name(name: &str) -> bool {
    name.to_lowercase().ends_with(".pdf")
}
