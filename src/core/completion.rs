//! Completion ratio of a locale against the reference string list.

use crate::core::{CompletionRecord, StringList, Version};

/// Compare `locale` against `reference`.
///
/// Only reference keys count: a locale key the reference does not have is
/// ignored, and a reference key missing from the locale is untranslated.
/// An empty reference yields a "no data" record instead of a ratio.
pub fn compute(
    product: &str,
    version: Version,
    locale: &str,
    reference: &StringList,
    localized: &StringList,
    warnings: Vec<String>,
) -> CompletionRecord {
    let total_count = reference.len();
    let translated_count = reference
        .keys()
        .filter(|key| localized.get(key).is_some_and(|entry| entry.is_translated))
        .count();

    let ratio = (total_count > 0).then(|| translated_count as f64 / total_count as f64);

    CompletionRecord {
        locale: locale.to_string(),
        product: product.to_string(),
        version,
        translated_count,
        total_count,
        ratio,
        warnings,
    }
}
