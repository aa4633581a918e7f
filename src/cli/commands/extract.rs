use anyhow::{Context, Result};

use crate::cli::{args::ExtractCommand, context::StatsContext};
use crate::core::{
    Version,
    pipeline::{RunRequest, run},
};

use super::{CommandResult, CommandSummary};

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let ctx = StatsContext::new(&cmd.common)?;
    let version = Version::parse(&cmd.version)?;

    let roots = ctx.extraction_roots()?;
    let extractor = cmd.product.load_extractor(roots)?;

    let request = RunRequest {
        version,
        dataset_path: ctx.dataset_path.clone(),
        locale_names: ctx.config.locale_names.clone(),
    };
    let summary = run(extractor.as_ref(), &request, &ctx.sink)
        .with_context(|| format!("{} {} extraction failed", cmd.product, version))?;

    Ok(CommandResult::new(CommandSummary::Extract(summary)))
}
