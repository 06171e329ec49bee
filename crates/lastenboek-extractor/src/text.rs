//! PDF to text conversion
//!
//! Pages are read in document order and each non-empty page is preceded by a
//! `--- PAGE n ---` header, so the model sees which page a value came from.

use crate::error::ExtractorError;
use crate::types::PageText;
use lopdf::Document;
use tracing::{debug, warn};

/// Extract the trimmed text of every page, numbered from 1
///
/// A page whose content cannot be decoded is reported with empty text rather
/// than failing the document.
///
/// # Errors
///
/// Returns [`ExtractorError::MalformedDocument`] if the bytes are not a PDF.
pub fn pdf_pages(pdf_bytes: &[u8]) -> Result<Vec<PageText>, ExtractorError> {
    let doc = Document::load_mem(pdf_bytes)
        .map_err(|e| ExtractorError::MalformedDocument(e.to_string()))?;

    let mut pages = Vec::new();
    for (number, _page_id) in doc.get_pages() {
        let text = match doc.extract_text(&[number]) {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!("Could not extract text from page {}: {}", number, e);
                String::new()
            }
        };
        pages.push(PageText { number, text });
    }

    debug!("Read {} pages", pages.len());
    Ok(pages)
}

/// Render pages as one string with a header before each non-empty page
pub fn join_pages(pages: &[PageText]) -> String {
    let joined: String = pages
        .iter()
        .filter(|page| !page.text.is_empty())
        .map(|page| format!("\n\n--- PAGE {} ---\n{}", page.number, page.text))
        .collect();

    joined.trim().to_string()
}

/// Convert raw PDF bytes into page-delimited text
///
/// Returns an empty string when no page has text; that is not an error.
///
/// # Errors
///
/// Returns [`ExtractorError::MalformedDocument`] if the bytes are not a PDF.
pub fn pdf_bytes_to_text(pdf_bytes: &[u8]) -> Result<String, ExtractorError> {
    let pages = pdf_pages(pdf_bytes)?;
    Ok(join_pages(&pages))
}
