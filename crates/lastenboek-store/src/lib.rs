//! Lastenboek Storage Layer
//!
//! Implements the `DocumentStore` and `BlobStore` traits from
//! `lastenboek-domain`.
//!
//! # Architecture
//!
//! - SQLite for extracted document records, keyed by document id
//! - In-memory document and blob stores for tests and dry runs
//! - A directory-backed blob store: every regular file below a root directory
//!   is a blob named by its relative path
//!
//! # Examples
//!
//! ```no_run
//! use lastenboek_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for upserts
//! ```

#![warn(missing_docs)]

pub mod blob;
pub mod memory;

use lastenboek_domain::traits::DocumentStore;
use lastenboek_domain::DocumentRecord;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;

pub use blob::{BlobError, DirBlobStore, MemoryBlobStore};
pub use memory::MemoryStore;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Record rejected before writing
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of DocumentStore
///
/// Upserts are a single `INSERT .. ON CONFLICT(id) DO UPDATE` statement, so a
/// record is either fully written or not at all. Concurrent writers are not
/// coordinated: the last write for an id wins.
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

const SELECT_COLUMNS: &str = "SELECT id, document_id, file_name, architect, client, date, address, extraction_confidence
     FROM documents";

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use lastenboek_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("lastenboek.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Create a store backed by a private in-memory database
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::new(":memory:")
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<DocumentRecord> {
        Ok(DocumentRecord {
            id: row.get(0)?,
            document_id: row.get(1)?,
            file_name: row.get(2)?,
            architect: row.get(3)?,
            client: row.get(4)?,
            date: row.get(5)?,
            address: row.get(6)?,
            extraction_confidence: row.get(7)?,
        })
    }
}

impl DocumentStore for SqliteStore {
    type Error = StoreError;

    fn upsert_item(&mut self, record: &DocumentRecord) -> Result<(), Self::Error> {
        if record.id.is_empty() {
            return Err(StoreError::InvalidData("record id is empty".to_string()));
        }

        self.conn.execute(
            "INSERT INTO documents (id, document_id, file_name, architect, client, date, address, extraction_confidence)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(id) DO UPDATE SET
             document_id = excluded.document_id,
             file_name = excluded.file_name,
             architect = excluded.architect,
             client = excluded.client,
             date = excluded.date,
             address = excluded.address,
             extraction_confidence = excluded.extraction_confidence",
            params![
                &record.id,
                &record.document_id,
                &record.file_name,
                &record.architect,
                &record.client,
                &record.date,
                &record.address,
                record.extraction_confidence,
            ],
        )?;

        Ok(())
    }

    fn get_item(&self, id: &str) -> Result<Option<DocumentRecord>, Self::Error> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        let record = self
            .conn
            .query_row(&sql, params![id], Self::row_to_record)
            .optional()?;

        Ok(record)
    }

    fn list_items(&self, limit: Option<usize>) -> Result<Vec<DocumentRecord>, Self::Error> {
        // SQLite treats a negative LIMIT as "no limit"
        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        let sql = format!("{} ORDER BY id LIMIT ?1", SELECT_COLUMNS);

        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map(params![limit], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn count_items(&self) -> Result<usize, Self::Error> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
