use std::path::PathBuf;

use crate::{
    cli::exit_status::ExitStatus,
    core::{Product, legacy::ImportSummary, pipeline::RunSummary},
};

#[derive(Debug)]
pub enum CommandSummary {
    Extract(RunSummary),
    Chart(ChartSummary),
    Export(ExportSummary),
    ImportLegacy(LegacyImportSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ChartSummary {
    pub path: PathBuf,
    pub locale_count: usize,
}

#[derive(Debug)]
pub struct ExportSummary {
    pub product: Product,
    pub path: PathBuf,
    pub row_count: usize,
}

#[derive(Debug)]
pub struct LegacyImportSummary {
    pub import: ImportSummary,
    pub dataset_path: PathBuf,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
    /// Set when the file already existed and was left untouched.
    pub error: Option<String>,
}

/// Result of running a command
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Non-fatal problems collected while running.
    pub warning_count: usize,
    /// True when the command ran but produced nothing usable.
    pub failed: bool,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        let (warning_count, failed) = match &summary {
            CommandSummary::Extract(run) => (
                run.reference_warnings.len()
                    + run.records.iter().map(|r| r.warnings.len()).sum::<usize>(),
                !run.has_usable_data(),
            ),
            CommandSummary::Chart(chart) => (0, chart.locale_count == 0),
            CommandSummary::Export(export) => (0, export.row_count == 0),
            CommandSummary::ImportLegacy(legacy) => (
                legacy.import.warnings.len(),
                legacy.import.entries == 0,
            ),
            CommandSummary::Init(init) => (0, init.error.is_some()),
        };
        Self {
            summary,
            warning_count,
            failed,
        }
    }

    pub fn exit_status(&self) -> ExitStatus {
        if self.failed {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
