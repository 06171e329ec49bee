//! Blob store implementations
//!
//! `DirBlobStore` serves files below a local directory; `MemoryBlobStore`
//! holds blobs in memory and records downloads for tests.

use lastenboek_domain::traits::BlobStore;
use lastenboek_domain::BlobInfo;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// Errors that can occur during blob operations
#[derive(Error, Debug)]
pub enum BlobError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal error
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Blob store root missing or not a directory
    #[error("Blob root not found: {0}")]
    RootNotFound(String),

    /// No blob with that name
    #[error("Blob not found: {0}")]
    NotFound(String),

    /// Name escapes the store or is otherwise unusable
    #[error("Invalid blob name: {0}")]
    InvalidName(String),

    /// Simulated or backend-specific failure
    #[error("Blob error: {0}")]
    Other(String),
}

/// Blob store backed by a local directory
///
/// Every regular file below `root` is a blob. Names are relative paths with
/// `/` separators, listed in lexicographic order.
#[derive(Debug, Clone)]
pub struct DirBlobStore {
    root: PathBuf,
}

impl DirBlobStore {
    /// Open a directory as a blob store
    ///
    /// # Errors
    ///
    /// Returns [`BlobError::RootNotFound`] if `root` is not an existing directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, BlobError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(BlobError::RootNotFound(root.display().to_string()));
        }
        Ok(Self { root })
    }

    /// The directory this store serves
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a blob name to a path inside the root
    fn resolve(&self, name: &str) -> Result<PathBuf, BlobError> {
        let relative = Path::new(name);
        let safe = !name.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(BlobError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl BlobStore for DirBlobStore {
    type Error = BlobError;

    fn list_blobs(&self) -> Result<Vec<BlobInfo>, Self::Error> {
        let mut blobs = Vec::new();

        for entry in WalkDir::new(&self.root) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(&self.root).unwrap_or(path);
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            let size = entry.metadata().ok().map(|m| m.len());
            blobs.push(BlobInfo { name, size });
        }

        // Sort for deterministic ordering
        blobs.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("Listed {} blobs under {}", blobs.len(), self.root.display());

        Ok(blobs)
    }

    fn download_blob(&self, name: &str) -> Result<Vec<u8>, Self::Error> {
        let path = self.resolve(name)?;
        if !path.is_file() {
            return Err(BlobError::NotFound(name.to_string()));
        }
        Ok(std::fs::read(path)?)
    }
}

/// Blob store held in memory
///
/// Clones share state, so a test can keep a handle after moving the store into
/// a pipeline and inspect which blobs were downloaded.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
    failing: Arc<Mutex<Vec<String>>>,
    downloads: Arc<Mutex<Vec<String>>>,
}

impl MemoryBlobStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a blob
    pub fn insert(&self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.blobs.lock().unwrap().insert(name.into(), bytes.into());
    }

    /// Make downloads of `name` fail
    pub fn fail_download(&self, name: impl Into<String>) {
        self.failing.lock().unwrap().push(name.into());
    }

    /// Names passed to `download_blob`, oldest first
    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

impl BlobStore for MemoryBlobStore {
    type Error = BlobError;

    fn list_blobs(&self) -> Result<Vec<BlobInfo>, Self::Error> {
        let blobs = self.blobs.lock().unwrap();
        Ok(blobs
            .iter()
            .map(|(name, bytes)| BlobInfo {
                name: name.clone(),
                size: Some(bytes.len() as u64),
            })
            .collect())
    }

    fn download_blob(&self, name: &str) -> Result<Vec<u8>, Self::Error> {
        self.downloads.lock().unwrap().push(name.to_string());

        if self.failing.lock().unwrap().iter().any(|n| n == name) {
            return Err(BlobError::Other(format!("download of {} failed", name)));
        }

        self.blobs
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| BlobError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_dir_store_missing_root() {
        let result = DirBlobStore::new("/definitely/not/here");
        assert!(matches!(result, Err(BlobError::RootNotFound(_))));
    }

    #[test]
    fn test_dir_store_lists_nested_files_sorted() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b.pdf"), b"bbb").unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        fs::write(dir.path().join("sub").join("c.PDF"), b"cc").unwrap();

        let store = DirBlobStore::new(dir.path()).unwrap();
        let blobs = store.list_blobs().unwrap();
        let names: Vec<&str> = blobs.iter().map(|b| b.name.as_str()).collect();

        assert_eq!(names, vec!["a.txt", "b.pdf", "sub/c.PDF"]);
        assert_eq!(blobs[1].size, Some(3));
    }

    #[test]
    fn test_dir_store_download() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("x.pdf"), b"%PDF").unwrap();

        let store = DirBlobStore::new(dir.path()).unwrap();
        assert_eq!(store.download_blob("sub/x.pdf").unwrap(), b"%PDF");
        assert!(matches!(
            store.download_blob("missing.pdf"),
            Err(BlobError::NotFound(_))
        ));
    }

    #[test]
    fn test_dir_store_rejects_escaping_names() {
        let dir = TempDir::new().unwrap();
        let store = DirBlobStore::new(dir.path()).unwrap();

        for name in ["../etc/passwd", "/etc/passwd", "", "a/../../b"] {
            assert!(
                matches!(store.download_blob(name), Err(BlobError::InvalidName(_))),
                "{} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_memory_store_records_downloads() {
        let store = MemoryBlobStore::new();
        store.insert("a.pdf", b"a".to_vec());
        let handle = store.clone();

        assert_eq!(store.download_blob("a.pdf").unwrap(), b"a");
        assert!(store.download_blob("b.pdf").is_err());
        assert_eq!(handle.downloads(), vec!["a.pdf", "b.pdf"]);
    }

    #[test]
    fn test_memory_store_failure_injection() {
        let store = MemoryBlobStore::new();
        store.insert("a.pdf", b"a".to_vec());
        store.fail_download("a.pdf");

        assert!(matches!(store.download_blob("a.pdf"), Err(BlobError::Other(_))));
        assert_eq!(store.list_blobs().unwrap().len(), 1);
    }
}
