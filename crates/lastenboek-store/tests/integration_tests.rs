//! Integration tests for lastenboek-store
//!
//! These tests cover the upsert cycle for document records and the
//! directory-backed blob store.

use lastenboek_domain::traits::{BlobStore, DocumentStore};
use lastenboek_domain::{DocumentId, DocumentRecord, ExtractedFields};
use lastenboek_store::{BlobError, DirBlobStore, SqliteStore};
use std::fs;
use tempfile::TempDir;

fn record(file_name: &str, content: &[u8], architect: Option<&str>) -> DocumentRecord {
    let id = DocumentId::derive(file_name, content);
    let fields = ExtractedFields {
        architect: architect.map(str::to_string),
        client: Some("Stad Antwerpen".to_string()),
        date: None,
        address: Some("Grote Markt 1".to_string()),
        extraction_confidence: 0.75,
    };
    DocumentRecord::new(&id, file_name, fields)
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
}

#[test]
fn test_upsert_and_get_record() {
    let mut store = SqliteStore::in_memory().unwrap();
    let rec = record("spec1.pdf", b"%PDF-1.7 one", Some("Jane Doe"));

    store.upsert_item(&rec).unwrap();

    let retrieved = store.get_item(&rec.id).unwrap();
    assert_eq!(retrieved, Some(rec));
}

#[test]
fn test_upsert_is_idempotent() {
    let mut store = SqliteStore::in_memory().unwrap();
    let rec = record("spec1.pdf", b"%PDF-1.7 one", Some("Jane Doe"));

    store.upsert_item(&rec).unwrap();
    store.upsert_item(&rec).unwrap();

    assert_eq!(store.count_items().unwrap(), 1);
}

#[test]
fn test_last_write_wins() {
    let mut store = SqliteStore::in_memory().unwrap();
    let first = record("spec1.pdf", b"%PDF-1.7 one", Some("Jane Doe"));
    let mut second = first.clone();
    second.architect = None;
    second.extraction_confidence = 0.2;

    store.upsert_item(&first).unwrap();
    store.upsert_item(&second).unwrap();

    let stored = store.get_item(&first.id).unwrap().unwrap();
    assert!(stored.architect.is_none());
    assert_eq!(stored.extraction_confidence, 0.2);
}

#[test]
fn test_list_is_ordered_and_limited() {
    let mut store = SqliteStore::in_memory().unwrap();
    for name in ["c.pdf", "a.pdf", "b.pdf"] {
        store.upsert_item(&record(name, name.as_bytes(), None)).unwrap();
    }

    let all = store.list_items(None).unwrap();
    let names: Vec<&str> = all.iter().map(|r| r.file_name.as_str()).collect();
    assert_eq!(names, vec!["a.pdf", "b.pdf", "c.pdf"]);

    assert_eq!(store.list_items(Some(2)).unwrap().len(), 2);
}

#[test]
fn test_get_missing_record() {
    let store = SqliteStore::in_memory().unwrap();
    assert!(store.get_item("nope.pdf-0000000000000000").unwrap().is_none());
}

#[test]
fn test_file_store_persists_across_connections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lastenboek.db");
    let rec = record("spec1.pdf", b"%PDF-1.7 one", Some("Jane Doe"));

    {
        let mut store = SqliteStore::new(&path).unwrap();
        store.upsert_item(&rec).unwrap();
    }

    let store = SqliteStore::new(&path).unwrap();
    assert_eq!(store.count_items().unwrap(), 1);
    assert_eq!(store.get_item(&rec.id).unwrap().unwrap().file_name, "spec1.pdf");
}

#[test]
fn test_dir_blob_store_lists_and_downloads() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("2024")).unwrap();
    fs::write(dir.path().join("spec1.pdf"), b"%PDF one").unwrap();
    fs::write(dir.path().join("notes.txt"), b"notes").unwrap();
    fs::write(dir.path().join("2024").join("spec2.PDF"), b"%PDF two").unwrap();

    let blobs = DirBlobStore::new(dir.path()).unwrap();
    let listed = blobs.list_blobs().unwrap();

    let names: Vec<&str> = listed.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["2024/spec2.PDF", "notes.txt", "spec1.pdf"]);

    let pdfs: Vec<&str> = listed
        .iter()
        .filter(|b| b.is_pdf())
        .map(|b| b.name.as_str())
        .collect();
    assert_eq!(pdfs, vec!["2024/spec2.PDF", "spec1.pdf"]);

    assert_eq!(blobs.download_blob("2024/spec2.PDF").unwrap(), b"%PDF two");
    assert_eq!(listed[2].size, Some(8));
}

#[test]
fn test_dir_blob_store_rejects_escape() {
    let dir = TempDir::new().unwrap();
    let blobs = DirBlobStore::new(dir.path()).unwrap();

    assert!(matches!(
        blobs.download_blob("../etc/passwd"),
        Err(BlobError::InvalidName(_))
    ));
    assert!(matches!(
        blobs.download_blob("missing.pdf"),
        Err(BlobError::NotFound(_))
    ));
}
