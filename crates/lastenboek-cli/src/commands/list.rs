//! List command implementation.

use crate::cli::ListArgs;
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use lastenboek_domain::traits::DocumentStore;
use lastenboek_store::SqliteStore;

/// Execute the list command.
pub fn execute_list(args: ListArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    if args.limit == 0 {
        return Err(CliError::InvalidInput(
            "limit must be greater than 0".to_string(),
        ));
    }

    let store = SqliteStore::new(&config.store.path)?;
    let total = store.count_items()?;
    let records = store.list_items(Some(args.limit))?;

    if formatter.format() == OutputFormat::Table {
        println!(
            "{}",
            formatter.info(&format!("Showing {} of {} record(s)", records.len(), total))
        );
    }
    println!("{}", formatter.format_records(&records)?);

    Ok(())
}
