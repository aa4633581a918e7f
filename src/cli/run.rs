/// Dispatches to the appropriate command handler based on the parsed arguments.
///
/// # Returns
/// - `Ok(CommandResult)` with the command summary and exit behavior
/// - `Err` if the command fails (e.g., invalid config, locked dataset, unreadable reference)
use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, chart::chart, export::export, extract::extract,
        import_legacy::import_legacy, init::init,
    },
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Chart(cmd)) => chart(cmd),
        Some(Command::Export(cmd)) => export(cmd),
        Some(Command::ImportLegacy(cmd)) => import_legacy(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
