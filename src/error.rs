//! Error taxonomy for the extraction and aggregation pipeline.
//!
//! Run-scoped failures are [`StatsError`] values and abort an invocation before
//! anything is merged. File-scoped failures are [`ParseError`] values and
//! locale-scoped failures are [`LocaleWarning`] values; both are converted into
//! warnings on the completion record so the run can continue.

use std::{fmt, path::PathBuf};

use thiserror::Error;

/// Fatal errors for a single invocation.
#[derive(Debug, Error)]
pub enum StatsError {
    /// Invalid or incomplete configuration (e.g. a root that does not exist).
    #[error("configuration error: {0}")]
    Config(String),

    /// The reference string list could not be built, so no ratio is computable.
    #[error("cannot extract reference strings for {product}: {reason}")]
    ReferenceExtraction { product: String, reason: String },

    /// Another writer holds the dataset lock.
    #[error("dataset {} is locked by another writer", path.display())]
    MergeConflict { path: PathBuf },

    /// The persisted dataset exists but cannot be read back.
    #[error("dataset {} is unreadable: {reason}", path.display())]
    InvalidDataset { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StatsError {
    pub fn config(message: impl Into<String>) -> Self {
        StatsError::Config(message.into())
    }

    pub fn reference(product: impl Into<String>, reason: impl fmt::Display) -> Self {
        StatsError::ReferenceExtraction {
            product: product.into(),
            reason: reason.to_string(),
        }
    }
}

/// A resource file exists but its structure cannot be interpreted.
///
/// The file contributes no entries at all when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("failed to parse {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("unsupported resource format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to read {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },
}

impl ParseError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        ParseError::Malformed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, ParseError::UnsupportedFormat { .. })
    }
}

/// A locale could not be extracted; it is recorded as absent for this version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleWarning {
    pub locale: String,
    pub message: String,
}

impl LocaleWarning {
    pub fn new(locale: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LocaleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.locale, self.message)
    }
}
