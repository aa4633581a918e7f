use anyhow::{Context, Result};

use crate::cli::{args::ChartCommand, context::StatsContext};
use crate::core::{
    Version,
    chart::{ChartOptions, build_chart},
    store::{load_dataset, write_atomic},
};

use super::{ChartSummary, CommandResult, CommandSummary};

pub fn chart(cmd: ChartCommand) -> Result<CommandResult> {
    let ctx = StatsContext::new(&cmd.common)?;
    let current = cmd.version.as_deref().map(Version::parse).transpose()?;

    let dataset = load_dataset(&ctx.dataset_path)?;
    let chart = build_chart(
        &dataset,
        &ChartOptions {
            current,
            max_versions: ctx.config.max_versions,
            locale_names: &ctx.config.locale_names,
        },
    );

    let path = cmd
        .output
        .clone()
        .unwrap_or_else(|| ctx.config_path(&ctx.config.chart_path));
    let mut json = serde_json::to_string_pretty(&chart)?;
    json.push('\n');
    write_atomic(&path, &json).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("wrote chart data for {} locales to {}", dataset.len(), path.display());

    Ok(CommandResult::new(CommandSummary::Chart(ChartSummary {
        path,
        locale_count: dataset.len(),
    })))
}
