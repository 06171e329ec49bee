//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use lastenboek_domain::{BlobInfo, DocumentRecord};
use lastenboek_extractor::RunReport;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const MISSING: &str = "-";

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format stored records.
    pub fn format_records(&self, records: &[DocumentRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
            OutputFormat::Table => Ok(self.format_records_table(records)),
            OutputFormat::Quiet => Ok(ids(records)),
        }
    }

    /// Format a single record as a field/value listing.
    pub fn format_record(&self, record: &DocumentRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
            OutputFormat::Quiet => Ok(record.id.clone()),
            OutputFormat::Table => {
                let confidence = format!("{:.2}", record.extraction_confidence);
                let rows = [
                    ("id", record.id.as_str()),
                    ("documentId", record.document_id.as_str()),
                    ("fileName", record.file_name.as_str()),
                    ("architect", opt(&record.architect)),
                    ("client", opt(&record.client)),
                    ("date", opt(&record.date)),
                    ("address", opt(&record.address)),
                    ("extractionConfidence", confidence.as_str()),
                ];
                Ok(key_value_table(&rows))
            }
        }
    }

    fn format_records_table(&self, records: &[DocumentRecord]) -> String {
        if records.is_empty() {
            return self.colorize("No records found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Architect", "Client", "Date", "Address", "Confidence"]);

        for record in records {
            let confidence = format!("{:.2}", record.extraction_confidence);
            builder.push_record([
                record.id.as_str(),
                opt(&record.architect),
                opt(&record.client),
                opt(&record.date),
                opt(&record.address),
                confidence.as_str(),
            ]);
        }

        styled(builder)
    }

    /// Format the outcome of a pipeline run.
    pub fn format_report(&self, report: &RunReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Quiet => Ok(ids(&report.records)),
            OutputFormat::Table => {
                let verb = if report.dry_run { "Extracted" } else { "Upserted" };
                let mut out = format!(
                    "{} {} of {} PDF(s) with {}; {} non-PDF blob(s) skipped in {} ms",
                    verb,
                    report.records.len(),
                    report.attempted(),
                    report.model_name,
                    report.skipped,
                    report.elapsed_ms
                );

                if !report.failures.is_empty() {
                    let mut builder = Builder::default();
                    builder.push_record(["File", "Reason"]);
                    for failure in &report.failures {
                        builder.push_record([failure.file_name.as_str(), failure.reason.as_str()]);
                    }
                    out.push('\n');
                    out.push_str(&self.warning(&format!(
                        "{} document(s) failed",
                        report.failures.len()
                    )));
                    out.push('\n');
                    out.push_str(&styled(builder));
                }

                Ok(out)
            }
        }
    }

    /// Format a blob listing.
    pub fn format_blobs(&self, blobs: &[BlobInfo]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = blobs
                    .iter()
                    .map(|b| {
                        serde_json::json!({
                            "name": b.name,
                            "size": b.size,
                            "pdf": b.is_pdf(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Quiet => Ok(blobs
                .iter()
                .filter(|b| b.is_pdf())
                .map(|b| b.name.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if blobs.is_empty() {
                    return Ok(self.colorize("No blobs found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Name", "Size", "PDF"]);
                for blob in blobs {
                    let size = blob
                        .size
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| MISSING.to_string());
                    let pdf = if blob.is_pdf() { "yes" } else { "no" };
                    builder.push_record([blob.name.as_str(), size.as_str(), pdf]);
                }
                Ok(styled(builder))
            }
        }
    }

    /// Format the id and text of a local PDF.
    pub fn format_inspection(&self, document_id: &str, file_name: &str, text: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "id": document_id,
                "fileName": file_name,
                "characters": text.chars().count(),
                "text": text,
            }))?),
            OutputFormat::Quiet => Ok(document_id.to_string()),
            OutputFormat::Table => {
                let characters = text.chars().count().to_string();
                let mut out = key_value_table(&[
                    ("id", document_id),
                    ("fileName", file_name),
                    ("characters", characters.as_str()),
                ]);
                out.push('\n');
                if text.is_empty() {
                    out.push_str(&self.warning("No extractable text"));
                } else {
                    out.push_str(text);
                }
                Ok(out)
            }
        }
    }

    /// Progress line when a document starts.
    pub fn processing(&self, file_name: &str) -> String {
        self.info(&format!("Processing: {}", file_name))
    }

    /// Progress line when a record is written.
    pub fn upserted(&self, document_id: &str, dry_run: bool) -> String {
        if dry_run {
            self.success(&format!("Extracted documentId={} (dry run)", document_id))
        } else {
            self.success(&format!("Upserted documentId={}", document_id))
        }
    }

    /// Progress line when a document fails.
    pub fn failed(&self, file_name: &str, reason: &str) -> String {
        self.error(&format!("Failed: {}: {}", file_name, reason))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(MISSING)
}

fn ids(records: &[DocumentRecord]) -> String {
    records
        .iter()
        .map(|r| r.id.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn key_value_table(rows: &[(&str, &str)]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, value) in rows {
        builder.push_record([*key, *value]);
    }
    styled(builder)
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lastenboek_domain::{DocumentId, ExtractedFields};
    use lastenboek_extractor::DocumentFailure;

    fn create_test_record() -> DocumentRecord {
        let id = DocumentId::derive("spec1.pdf", b"%PDF-1.7");
        let fields = ExtractedFields {
            architect: Some("Jane Doe".to_string()),
            client: None,
            date: Some("2023-05-17".to_string()),
            address: None,
            extraction_confidence: 0.8,
        };
        DocumentRecord::new(&id, "spec1.pdf", fields)
    }

    fn create_test_report() -> RunReport {
        RunReport {
            listed: 3,
            skipped: 1,
            records: vec![create_test_record()],
            failures: vec![DocumentFailure {
                file_name: "broken.pdf".to_string(),
                reason: "Malformed document: invalid file header".to_string(),
            }],
            dry_run: false,
            model_name: "gpt-5-chat".to_string(),
            elapsed_ms: 42,
        }
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_records(&[create_test_record()]).unwrap();
        assert!(output.contains("\"fileName\": \"spec1.pdf\""));
        assert!(output.contains("\"extractionConfidence\": 0.8"));
        assert!(output.contains("\"client\": null"));
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let record = create_test_record();
        let output = formatter.format_records(&[record.clone()]).unwrap();
        assert_eq!(output, record.id);
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_records(&[create_test_record()]).unwrap();
        assert!(output.contains("Architect"));
        assert!(output.contains("Jane Doe"));
        assert!(output.contains("0.80"));
    }

    #[test]
    fn test_empty_records() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_records(&[]).unwrap();
        assert!(output.contains("No records found"));
    }

    #[test]
    fn test_single_record_listing() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_record(&create_test_record()).unwrap();
        assert!(output.contains("documentId"));
        assert!(output.contains("2023-05-17"));
    }

    #[test]
    fn test_report_table_lists_failures() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_report(&create_test_report()).unwrap();
        assert!(output.starts_with("Upserted 1 of 2 PDF(s) with gpt-5-chat"));
        assert!(output.contains("1 document(s) failed"));
        assert!(output.contains("broken.pdf"));
    }

    #[test]
    fn test_report_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_report(&create_test_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["listed"], 3);
        assert_eq!(value["failures"][0]["fileName"], "broken.pdf");
        assert_eq!(value["elapsedMs"], 42);
    }

    #[test]
    fn test_blobs_quiet_lists_pdfs_only() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let blobs = vec![BlobInfo::new("notes.txt"), BlobInfo::new("spec1.pdf")];
        assert_eq!(formatter.format_blobs(&blobs).unwrap(), "spec1.pdf");
    }

    #[test]
    fn test_inspection_without_text() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_inspection("scan.pdf-0011223344556677", "scan.pdf", "").unwrap();
        assert!(output.contains("No extractable text"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(
            formatter.upserted("spec1.pdf-0011223344556677", false),
            "✓ Upserted documentId=spec1.pdf-0011223344556677"
        );
    }
}
