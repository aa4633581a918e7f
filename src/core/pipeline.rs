//! One extraction run: reference, every locale in parallel, then a serialized
//! merge into the dataset.

use std::{collections::BTreeMap, path::PathBuf};

use rayon::prelude::*;

use crate::{
    core::{
        CompletionRecord, Version, completion::compute, products::ProductExtractor,
        sink::LogSink, store::SnapshotStore,
    },
    error::{LocaleWarning, StatsError},
};

/// Inputs of a run besides the extractor.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub version: Version,
    pub dataset_path: PathBuf,
    /// Display names attached to locales the dataset has not seen yet.
    pub locale_names: BTreeMap<String, String>,
}

/// What a run did, for the report.
#[derive(Debug)]
pub struct RunSummary {
    pub product: String,
    pub version: Version,
    /// Keys in the reference list (the denominator of every ratio).
    pub reference_count: usize,
    pub reference_warnings: Vec<String>,
    /// One record per locale, in locale order. Skipped locales are included
    /// with a ratio of 0.
    pub records: Vec<CompletionRecord>,
    /// Locales absent for this version, with the reason.
    pub skipped: Vec<LocaleWarning>,
    pub dataset_path: PathBuf,
}

impl RunSummary {
    /// Locales that had resources for this version.
    pub fn processed(&self) -> usize {
        self.records.len() - self.skipped.len()
    }

    pub fn skipped_locales(&self) -> Vec<&str> {
        self.skipped.iter().map(|s| s.locale.as_str()).collect()
    }

    /// True when at least one locale produced a ratio.
    pub fn has_usable_data(&self) -> bool {
        self.processed() > 0 && self.reference_count > 0
    }
}

/// Extract, compute and merge every locale of `extractor` for one version.
///
/// The dataset lock is taken first, so a concurrent writer is rejected before
/// any work is done. A reference failure aborts before anything is merged; a
/// locale failure only produces warnings.
pub fn run(
    extractor: &dyn ProductExtractor,
    request: &RunRequest,
    sink: &dyn LogSink,
) -> Result<RunSummary, StatsError> {
    let product = extractor.product_name();
    let version = request.version;

    let mut store = SnapshotStore::open(&request.dataset_path)?;

    let reference = extractor.extract_reference()?;
    for warning in &reference.warnings {
        sink.warn(&format!("{} {} reference: {}", product, version, warning));
    }
    sink.info(&format!(
        "{} {}: {} reference strings, {} locales",
        product,
        version,
        reference.strings.len(),
        extractor.locales().len()
    ));

    let mut locales = extractor.locales().to_vec();
    locales.sort();
    locales.dedup();

    let results: Vec<(CompletionRecord, Option<LocaleWarning>)> = locales
        .par_iter()
        .map(|locale| {
            let extraction = extractor.extract_string_list(locale);
            let skipped = extraction.absent.then(|| {
                LocaleWarning::new(
                    locale.as_str(),
                    extraction.warnings.first().cloned().unwrap_or_default(),
                )
            });
            let record = compute(
                product,
                version,
                locale,
                &reference.strings,
                &extraction.strings,
                extraction.warnings,
            );
            sink.debug(&record.to_string());
            (record, skipped)
        })
        .collect();

    let mut records = Vec::with_capacity(results.len());
    let mut skipped = Vec::new();
    for (record, skip) in results {
        for warning in &record.warnings {
            sink.debug(&format!("{} {} {}: {}", product, version, record.locale, warning));
        }
        if let Some(skip) = &skip {
            sink.warn(&format!("{} {}: skipped {}", product, version, skip));
        }
        store.merge(&record, request.locale_names.get(&record.locale).map(String::as_str));
        records.push(record);
        skipped.extend(skip);
    }

    let dataset_path = store.path().to_path_buf();
    store.commit()?;
    sink.info(&format!(
        "merged {} records into {}",
        records.len(),
        dataset_path.display()
    ));

    Ok(RunSummary {
        product: product.to_string(),
        version,
        reference_count: reference.strings.len(),
        reference_warnings: reference.warnings,
        records,
        skipped,
        dataset_path,
    })
}
