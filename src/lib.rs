pub mod cli;
pub mod core;

use crate::cli::export::ExportFormat;
use crate::core::LedgerEdit;
use crate::core::config::AppConfig;
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

pub enum AppCommand {
    /// Print the ledger table and the value series
    Summary { edits: Vec<LedgerEdit> },
    /// Write the ledger to a file
    Export {
        edits: Vec<LedgerEdit>,
        output: PathBuf,
        format: ExportFormat,
    },
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Stock ledger starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Summary { edits } => cli::summary::run(&config, &edits),
        AppCommand::Export {
            edits,
            output,
            format,
        } => cli::export::run(&config, &edits, &output, format),
    }
}
