//! Inspect command implementation.

use crate::cli::InspectArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use lastenboek_domain::DocumentId;
use lastenboek_extractor::pdf_bytes_to_text;
use std::fs;
use std::path::Path;

/// Execute the inspect command.
pub fn execute_inspect(args: InspectArgs, formatter: &Formatter) -> Result<()> {
    let bytes = fs::read(&args.file)?;
    let name = match args.name {
        Some(name) => name,
        None => file_name(&args.file)?,
    };

    let document_id = DocumentId::derive(&name, &bytes);
    let text = pdf_bytes_to_text(&bytes)?;

    println!(
        "{}",
        formatter.format_inspection(document_id.as_str(), &name, &text)?
    );

    Ok(())
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| CliError::InvalidInput(format!("{} has no file name", path.display())))
}
