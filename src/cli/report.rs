//! Report formatting and printing utilities.
//!
//! Everything goes to stdout except warnings about the run itself, which go to
//! stderr next to the log output.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    ChartSummary, CommandResult, CommandSummary, ExportSummary, InitSummary, LegacyImportSummary,
};
use crate::core::{CompletionRecord, pipeline::RunSummary};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print a command result to stdout (and its warning hint to stderr).
pub fn print(result: &CommandResult, verbose: bool) {
    print_to(result, &mut io::stdout().lock());
    print_warning_hint_to(result.warning_count, verbose, &mut io::stderr().lock());
}

/// Print a command result to a custom writer.
pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) {
    match &result.summary {
        CommandSummary::Extract(summary) => print_extract(summary, writer),
        CommandSummary::Chart(summary) => print_chart(summary, writer),
        CommandSummary::Export(summary) => print_export(summary, writer),
        CommandSummary::ImportLegacy(summary) => print_import(summary, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

/// Point at `-v` when warnings were only logged at debug level.
pub fn print_warning_hint_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} warning(s) (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

fn print_extract<W: Write>(summary: &RunSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {} ({} reference {})",
        summary.product.bold(),
        summary.version.to_string().bold(),
        summary.reference_count,
        if summary.reference_count == 1 { "string" } else { "strings" }
    );

    print_record_table(&summary.records, &summary.skipped_locales(), writer);

    let counts = format!(
        "{} {} processed, {} skipped",
        summary.processed(),
        if summary.processed() == 1 { "locale" } else { "locales" },
        summary.skipped.len()
    );
    if summary.has_usable_data() {
        let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), counts.green());
    } else {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!("No usable data ({})", counts).red()
        );
    }

    for skipped in &summary.skipped {
        let _ = writeln!(writer, "  {} {}", "skipped:".yellow(), skipped);
    }
    let _ = writeln!(
        writer,
        "Dataset written to {}",
        summary.dataset_path.display()
    );
}

fn print_record_table<W: Write>(records: &[CompletionRecord], skipped: &[&str], writer: &mut W) {
    let locale_width = records
        .iter()
        .map(|r| UnicodeWidthStr::width(r.locale.as_str()))
        .max()
        .unwrap_or(0);
    let counts: Vec<String> = records
        .iter()
        .map(|r| format!("{}/{}", r.translated_count, r.total_count))
        .collect();
    let count_width = counts.iter().map(|c| c.len()).max().unwrap_or(0);

    for (record, count) in records.iter().zip(&counts) {
        let padding = locale_width - UnicodeWidthStr::width(record.locale.as_str());
        let completion = match record.percentage() {
            Some(pct) => format!("{:>7.2}%", pct),
            None => format!("{:>8}", "no data"),
        };
        let note = if skipped.contains(&record.locale.as_str()) {
            format!("  {}", "skipped".dimmed())
        } else {
            String::new()
        };
        let _ = writeln!(
            writer,
            "  {}{:padding$}  {:>count_width$}  {}{}",
            record.locale,
            "",
            count,
            completion,
            note,
            padding = padding,
            count_width = count_width
        );
    }
}

fn print_chart<W: Write>(summary: &ChartSummary, writer: &mut W) {
    if summary.locale_count == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!("Dataset is empty, wrote {}", summary.path.display()).red()
        );
        return;
    }
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Wrote chart data for {} {} to {}",
            summary.locale_count,
            if summary.locale_count == 1 { "locale" } else { "locales" },
            summary.path.display()
        )
        .green()
    );
}

fn print_export<W: Write>(summary: &ExportSummary, writer: &mut W) {
    let message = format!(
        "Exported {} {} {} to {}",
        summary.row_count,
        summary.product,
        if summary.row_count == 1 { "row" } else { "rows" },
        summary.path.display()
    );
    if summary.row_count == 0 {
        let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), message.red());
    } else {
        let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), message.green());
    }
}

fn print_import<W: Write>(summary: &LegacyImportSummary, writer: &mut W) {
    let import = &summary.import;
    if import.entries == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            "No legacy entries imported".red()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Imported {} entries from {} {} into {}",
                import.entries,
                import.files,
                if import.files == 1 { "file" } else { "files" },
                summary.dataset_path.display()
            )
            .green()
        );
    }
    for warning in &import.warnings {
        let _ = writeln!(writer, "  {}", warning.yellow());
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    match &summary.error {
        Some(error) => {
            let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), error.red());
        }
        None => {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Created {}", summary.path.display()).green()
            );
        }
    }
}
