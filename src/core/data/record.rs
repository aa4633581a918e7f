use std::fmt;

use crate::core::Version;

/// One (locale, product, version) completion measurement.
///
/// Created per extraction run, consumed by the snapshot store, then dropped;
/// only the ratio survives in the aggregated dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRecord {
    pub locale: String,
    pub product: String,
    pub version: Version,
    pub translated_count: usize,
    /// Size of the reference key set, not of the locale's own list.
    pub total_count: usize,
    /// `None` when the reference is empty ("no data").
    pub ratio: Option<f64>,
    pub warnings: Vec<String>,
}

impl CompletionRecord {
    /// True when the reference had no keys for this product/version.
    pub fn is_no_data(&self) -> bool {
        self.ratio.is_none()
    }

    /// Completion as a percentage, for display.
    pub fn percentage(&self) -> Option<f64> {
        self.ratio.map(|r| r * 100.0)
    }
}

impl fmt::Display for CompletionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.percentage() {
            Some(pct) => write!(
                f,
                "{} {} {}: {}/{} ({:.2}%)",
                self.product, self.version, self.locale, self.translated_count, self.total_count, pct
            ),
            None => write!(
                f,
                "{} {} {}: no data",
                self.product, self.version, self.locale
            ),
        }
    }
}
