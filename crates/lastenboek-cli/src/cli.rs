//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Lastenboek - Extract project metadata from construction specification PDFs.
#[derive(Debug, Parser)]
#[command(name = "lastenboek")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "LASTENBOEK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract every PDF in the blob store and upsert the records
    Run(RunArgs),

    /// List blobs and whether they will be processed
    Blobs,

    /// List stored records
    List(ListArgs),

    /// Show a single stored record
    Show(ShowArgs),

    /// Compute the id and text of a local PDF without calling the model
    Inspect(InspectArgs),

    /// Send a minimal request to the model to check connectivity
    Ping,
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// Extract without writing records
    #[arg(long)]
    pub dry_run: bool,

    /// Stop after this many PDFs
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the list command.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Maximum number of records
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Record id (`<file name>-<16 hex>`)
    pub id: String,
}

/// Arguments for the inspect command.
#[derive(Debug, Parser)]
pub struct InspectArgs {
    /// Path to a PDF file
    pub file: PathBuf,

    /// Blob name to derive the id from (defaults to the file name)
    #[arg(short, long)]
    pub name: Option<String>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
