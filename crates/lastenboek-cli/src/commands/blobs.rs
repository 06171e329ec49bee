//! Blobs command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use lastenboek_domain::traits::BlobStore;
use lastenboek_store::DirBlobStore;

/// Execute the blobs command.
pub fn execute_blobs(config: &Config, formatter: &Formatter) -> Result<()> {
    let store = DirBlobStore::new(&config.blob.root)?;
    let blobs = store.list_blobs()?;

    println!("{}", formatter.format_blobs(&blobs)?);

    Ok(())
}
