//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Compute completion for one product/version and merge it into the dataset
//! - `chart`: Write the chart dataset consumed by the dashboard
//! - `export`: Write one product's history as CSV
//! - `import-legacy`: Merge legacy per-version stats files into the dataset
//! - `init`: Initialize the configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::core::Product;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Chart(cmd)) => cmd.common.verbose,
            Some(Command::Export(cmd)) => cmd.common.verbose,
            Some(Command::ImportLegacy(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Product source checkout (overrides config file)
    #[arg(long, env = "L10N_STATS_SOURCE_ROOT")]
    pub source_root: Option<PathBuf>,

    /// Localization tree with one directory per locale (overrides config file)
    #[arg(long, env = "L10N_STATS_L10N_ROOT")]
    pub l10n_root: Option<PathBuf>,

    /// Aggregated dataset file (overrides config file)
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Product to extract
    #[arg(long, value_enum)]
    pub product: Product,

    /// Version checked out in the source root (MAJOR or MAJOR.MINOR)
    #[arg(long)]
    pub version: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ChartCommand {
    /// Newest version to include (default: newest recorded)
    #[arg(long)]
    pub version: Option<String>,

    /// Output file (overrides config file)
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Product to export
    #[arg(long, value_enum)]
    pub product: Product,

    /// Output file (default: <csvDir>/<product>_completion.csv)
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ImportLegacyCommand {
    /// Directory holding <product>_<MAJOR>_<MINOR>.json files
    pub dir: PathBuf,

    /// Only import files of this product
    #[arg(long, value_enum)]
    pub product: Option<Product>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute localization completion for a product version and merge it into the dataset
    Extract(ExtractCommand),
    /// Write the chart dataset (locale -> product -> version -> ratio)
    Chart(ChartCommand),
    /// Export a product's completion history as CSV
    Export(ExportCommand),
    /// Import legacy per-version stats files into the dataset
    ImportLegacy(ImportLegacyCommand),
    /// Initialize a new .l10nstatsrc.json configuration file
    Init,
}
