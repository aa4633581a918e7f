use anyhow::Result;

use crate::cli::{args::ImportLegacyCommand, context::StatsContext};
use crate::core::{legacy::import_legacy as import_files, store::SnapshotStore};

use super::{CommandResult, CommandSummary, LegacyImportSummary};

pub fn import_legacy(cmd: ImportLegacyCommand) -> Result<CommandResult> {
    let ctx = StatsContext::new(&cmd.common)?;

    let mut store = SnapshotStore::open(&ctx.dataset_path)?;
    let import = import_files(
        store.dataset_mut(),
        &cmd.dir,
        cmd.product,
        &ctx.config.locale_names,
    )?;
    for warning in &import.warnings {
        tracing::debug!("{}", warning);
    }
    if import.entries > 0 {
        store.commit()?;
    }

    Ok(CommandResult::new(CommandSummary::ImportLegacy(
        LegacyImportSummary {
            import,
            dataset_path: ctx.dataset_path,
        },
    )))
}
