//! Run command implementation.

use crate::cli::RunArgs;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use lastenboek_extractor::{ExtractorConfig, Pipeline, PipelineEvent};
use lastenboek_llm::OpenAiModel;
use lastenboek_store::{DirBlobStore, SqliteStore};
use tracing::info;

/// Execute the run command.
pub fn execute_run(args: RunArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let extraction = extraction_config(&args, &config.extraction);

    let blobs = DirBlobStore::new(&config.blob.root)?;
    let store = SqliteStore::new(&config.store.path)?;
    let model = OpenAiModel::new(config.model_settings()?)?;

    info!(
        "Starting run over {} into {}",
        config.blob.root.display(),
        config.store.path.display()
    );

    let mut pipeline = Pipeline::new(blobs, store, model, extraction)?;

    // Progress lines would corrupt JSON and quiet output
    let show_progress = formatter.format() == OutputFormat::Table;
    let report = pipeline.run_with(|event| {
        if !show_progress {
            return;
        }
        match event {
            PipelineEvent::Started { file_name } => println!("{}", formatter.processing(file_name)),
            PipelineEvent::Upserted {
                document_id,
                dry_run,
                ..
            } => println!("{}", formatter.upserted(document_id, *dry_run)),
            PipelineEvent::Failed { file_name, reason } => {
                println!("{}", formatter.failed(file_name, reason))
            }
            PipelineEvent::Listed { .. } | PipelineEvent::Skipped { .. } => {}
        }
    })?;

    let summary = formatter.format_report(&report)?;
    if !summary.is_empty() {
        println!("{}", summary);
    }
    if show_progress {
        println!("Done.");
    }

    Ok(())
}

/// Combine file settings with command-line flags; flags win.
fn extraction_config(args: &RunArgs, base: &ExtractorConfig) -> ExtractorConfig {
    let mut config = base.clone();
    config.dry_run |= args.dry_run;
    if args.limit.is_some() {
        config.max_documents = args.limit;
    }
    config
}
