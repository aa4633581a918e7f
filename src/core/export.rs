//! CSV export of one product's history.
//!
//! Long format, one row per (locale, version):
//!
//! ```text
//! locale,version,completion
//! de,146.0,98.25
//! ```

use std::fmt::Write;

use crate::core::{Product, store::Dataset};

pub const CSV_HEADER: &str = "locale,version,completion";

/// Rendered CSV and the number of data rows in it (header excluded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub content: String,
    pub rows: usize,
}

/// Render `product`'s ratios as CSV. Completion is a percentage with two
/// decimals; "no data" entries have no row.
pub fn export_csv(dataset: &Dataset, product: Product) -> CsvExport {
    let mut csv = String::new();
    csv.push_str(CSV_HEADER);
    csv.push('\n');
    let mut rows = 0;

    for (locale, series) in dataset.iter() {
        let Some(versions) = series.product(product.name()) else {
            continue;
        };
        for (version, ratio) in versions {
            if let Some(ratio) = ratio {
                let _ = writeln!(csv, "{},{},{:.2}", escape_field(locale), version, ratio * 100.0);
                rows += 1;
            }
        }
    }
    CsvExport { content: csv, rows }
}

/// Default file name for a product's export, e.g. `firefox_completion.csv`.
pub fn csv_file_name(product: Product) -> String {
    format!("{}_completion.csv", product.name())
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
