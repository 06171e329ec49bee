//! Show command implementation.

use crate::cli::ShowArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use lastenboek_domain::traits::DocumentStore;
use lastenboek_store::SqliteStore;

/// Execute the show command.
pub fn execute_show(args: ShowArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let store = SqliteStore::new(&config.store.path)?;

    let record = store
        .get_item(&args.id)?
        .ok_or(CliError::NotFound(args.id))?;

    println!("{}", formatter.format_record(&record)?);

    Ok(())
}
