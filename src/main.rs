use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use stockledger::cli::export::ExportFormat;
use stockledger::core::LedgerEdit;
use stockledger::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct EditArgs {
    /// Override the warning threshold
    #[arg(short, long)]
    threshold: Option<Decimal>,

    /// What-if edit applied before reporting, e.g. `set:Lobster:3:10:4`,
    /// `add:Crab:4`, `cost:Salmon:2.5`, `remove:Shrimp`, `threshold:200`
    #[arg(short, long = "edit")]
    edits: Vec<LedgerEdit>,
}

impl EditArgs {
    fn into_edits(self) -> Vec<LedgerEdit> {
        self.threshold
            .map(|value| LedgerEdit::SetThreshold { value })
            .into_iter()
            .chain(self.edits)
            .collect()
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the weekly ledger and inventory value
    Summary(EditArgs),
    /// Export the ledger as CSV or JSON
    Export {
        #[command(flatten)]
        edits: EditArgs,

        /// Destination file
        #[arg(short, long)]
        output: PathBuf,

        #[arg(short, long, value_enum, default_value_t)]
        format: ExportFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config_path = cli.config_path.as_deref();
    let result = match cli.command {
        Some(Commands::Setup) => stockledger::cli::setup::setup(),
        Some(Commands::Summary(args)) => stockledger::run_command(
            stockledger::AppCommand::Summary {
                edits: args.into_edits(),
            },
            config_path,
        ),
        Some(Commands::Export {
            edits,
            output,
            format,
        }) => stockledger::run_command(
            stockledger::AppCommand::Export {
                edits: edits.into_edits(),
                output,
                format,
            },
            config_path,
        ),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
