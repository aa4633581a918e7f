use anyhow::{Context, Result};

use crate::cli::{args::ExportCommand, context::StatsContext};
use crate::core::{
    export::{csv_file_name, export_csv},
    store::{load_dataset, write_atomic},
};

use super::{CommandResult, CommandSummary, ExportSummary};

pub fn export(cmd: ExportCommand) -> Result<CommandResult> {
    let ctx = StatsContext::new(&cmd.common)?;
    let dataset = load_dataset(&ctx.dataset_path)?;

    let export = export_csv(&dataset, cmd.product);
    let row_count = export.rows;

    let path = cmd.output.clone().unwrap_or_else(|| {
        ctx.config_path(&ctx.config.csv_dir)
            .join(csv_file_name(cmd.product))
    });
    write_atomic(&path, &export.content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("exported {} {} rows to {}", row_count, cmd.product, path.display());

    Ok(CommandResult::new(CommandSummary::Export(ExportSummary {
        product: cmd.product,
        path,
        row_count,
    })))
}
