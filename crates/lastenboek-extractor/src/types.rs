//! Report and event types for pipeline runs

use lastenboek_domain::DocumentRecord;
use serde::Serialize;

/// Text of a single PDF page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// 1-based page number in document order
    pub number: u32,

    /// Trimmed page text; empty when the page has none
    pub text: String,
}

/// A document that could not be processed
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFailure {
    /// Blob name
    pub file_name: String,

    /// Error message
    pub reason: String,
}

/// Outcome of a pipeline run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// Blobs returned by the listing
    pub listed: usize,

    /// Blobs skipped because they are not PDFs
    pub skipped: usize,

    /// Records written, or that would have been written in a dry run
    pub records: Vec<DocumentRecord>,

    /// Documents that failed, in processing order
    pub failures: Vec<DocumentFailure>,

    /// Whether upserts were skipped
    pub dry_run: bool,

    /// Model used for extraction
    pub model_name: String,

    /// Wall-clock duration of the run
    pub elapsed_ms: u64,
}

impl RunReport {
    /// Number of PDF candidates attempted
    pub fn attempted(&self) -> usize {
        self.records.len() + self.failures.len()
    }

    /// Whether every attempted document succeeded
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Progress notifications emitted while a pipeline runs
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// Blob listing finished
    Listed {
        /// Number of blobs in the store
        count: usize,
    },

    /// A non-PDF blob was passed over
    Skipped {
        /// Blob name
        file_name: String,
    },

    /// Processing of a PDF started
    Started {
        /// Blob name
        file_name: String,
    },

    /// A record was written (or assembled, in a dry run)
    Upserted {
        /// Blob name
        file_name: String,
        /// Record id
        document_id: String,
        /// Whether the write was skipped
        dry_run: bool,
    },

    /// A document failed; the run continues
    Failed {
        /// Blob name
        file_name: String,
        /// Error message
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serializes_camel_case() {
        let report = RunReport {
            listed: 2,
            skipped: 1,
            records: Vec::new(),
            failures: vec![DocumentFailure {
                file_name: "broken.pdf".to_string(),
                reason: "Malformed document".to_string(),
            }],
            dry_run: true,
            model_name: "mock".to_string(),
            elapsed_ms: 5,
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["elapsedMs"], 5);
        assert_eq!(json["dryRun"], true);
        assert_eq!(json["modelName"], "mock");
        assert_eq!(json["failures"][0]["fileName"], "broken.pdf");
        assert!(json.get("elapsed_ms").is_none());
        assert!(json["failures"][0].get("file_name").is_none());
    }
}
