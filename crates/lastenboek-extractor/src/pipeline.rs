//! Pipeline orchestration: list, download, identify, extract, upsert

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::extractor::FieldExtractor;
use crate::text::pdf_bytes_to_text;
use crate::types::{DocumentFailure, PipelineEvent, RunReport};
use lastenboek_domain::traits::{BlobStore, DocumentStore, ExtractionModel};
use lastenboek_domain::{compute_document_id, DocumentRecord};
use std::fmt::Display;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Drives documents from a blob store through extraction into a document store
///
/// Collaborators are passed in at construction and owned for the lifetime of
/// the pipeline. Documents are processed one at a time, in listing order; a
/// failure on one document is recorded and the run moves on.
pub struct Pipeline<B, S, M>
where
    B: BlobStore,
    S: DocumentStore,
    M: ExtractionModel,
{
    blobs: B,
    store: S,
    extractor: FieldExtractor<M>,
    config: ExtractorConfig,
}

impl<B, S, M> Pipeline<B, S, M>
where
    B: BlobStore,
    S: DocumentStore,
    M: ExtractionModel,
    B::Error: Display,
    S::Error: Display,
    M::Error: Display,
{
    /// Create a new Pipeline
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::Config`] if the configuration is invalid.
    pub fn new(blobs: B, store: S, model: M, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;

        Ok(Self {
            blobs,
            store,
            extractor: FieldExtractor::new(model, config.clone()),
            config,
        })
    }

    /// The blob store
    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    /// The document store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The field extractor
    pub fn extractor(&self) -> &FieldExtractor<M> {
        &self.extractor
    }

    /// Tear the pipeline down into its collaborators
    pub fn into_parts(self) -> (B, S, M) {
        (self.blobs, self.store, self.extractor.into_model())
    }

    /// Process every PDF in the blob store
    pub fn run(&mut self) -> Result<RunReport, ExtractorError> {
        self.run_with(|_| {})
    }

    /// Process every PDF in the blob store, reporting progress to `on_event`
    ///
    /// # Errors
    ///
    /// Only a failed blob listing aborts the run. Per-document failures are
    /// returned in [`RunReport::failures`].
    pub fn run_with<F>(&mut self, mut on_event: F) -> Result<RunReport, ExtractorError>
    where
        F: FnMut(&PipelineEvent),
    {
        let start = Instant::now();

        let blobs = self
            .blobs
            .list_blobs()
            .map_err(|e| ExtractorError::Blob(e.to_string()))?;

        info!("Listed {} blobs", blobs.len());
        on_event(&PipelineEvent::Listed { count: blobs.len() });

        let mut report = RunReport {
            listed: blobs.len(),
            skipped: 0,
            records: Vec::new(),
            failures: Vec::new(),
            dry_run: self.config.dry_run,
            model_name: self.extractor.model().model_name().to_string(),
            elapsed_ms: 0,
        };

        for blob in &blobs {
            if !blob.is_pdf() {
                debug!("Skipping non-PDF blob {}", blob.name);
                report.skipped += 1;
                on_event(&PipelineEvent::Skipped {
                    file_name: blob.name.clone(),
                });
                continue;
            }

            // Past the cap PDFs are left alone; non-PDFs are still counted
            if let Some(max) = self.config.max_documents {
                if report.attempted() >= max {
                    debug!("Document limit of {} reached, leaving {}", max, blob.name);
                    continue;
                }
            }

            on_event(&PipelineEvent::Started {
                file_name: blob.name.clone(),
            });

            match self.process_blob(&blob.name) {
                Ok(record) => {
                    on_event(&PipelineEvent::Upserted {
                        file_name: blob.name.clone(),
                        document_id: record.id.clone(),
                        dry_run: self.config.dry_run,
                    });
                    report.records.push(record);
                }
                Err(e) => {
                    warn!("Failed to process {}: {}", blob.name, e);
                    let failure = DocumentFailure {
                        file_name: blob.name.clone(),
                        reason: e.to_string(),
                    };
                    on_event(&PipelineEvent::Failed {
                        file_name: failure.file_name.clone(),
                        reason: failure.reason.clone(),
                    });
                    report.failures.push(failure);
                }
            }
        }

        report.elapsed_ms = start.elapsed().as_millis() as u64;

        info!(
            "Run complete: {} upserted, {} failed, {} skipped",
            report.records.len(),
            report.failures.len(),
            report.skipped
        );

        Ok(report)
    }

    /// Run one document through the pipeline and upsert its record
    ///
    /// The record is assembled in full before the single upsert call; on any
    /// error nothing is written.
    pub fn process_blob(&mut self, name: &str) -> Result<DocumentRecord, ExtractorError> {
        info!("Processing {}", name);

        let bytes = self
            .blobs
            .download_blob(name)
            .map_err(|e| ExtractorError::Blob(e.to_string()))?;

        let document_id = compute_document_id(name, &bytes);
        debug!("Document id {} ({} bytes)", document_id, bytes.len());

        let text = pdf_bytes_to_text(&bytes)?;
        if text.is_empty() {
            debug!("{} has no extractable text", name);
        }

        let fields = self.extractor.extract(&text)?;
        let record = DocumentRecord::new(&document_id, name, fields);

        if self.config.dry_run {
            info!("Dry run: not upserting {}", record.id);
            return Ok(record);
        }

        self.store
            .upsert_item(&record)
            .map_err(|e| ExtractorError::Store(e.to_string()))?;

        info!("Upserted documentId={}", record.id);
        Ok(record)
    }
}
