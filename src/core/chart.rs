//! Consumer-facing chart dataset.
//!
//! Output shape:
//!
//! ```json
//! { "de": { "name": "German", "firefox": { "146.0": 0.98 }, "fenix": { "146.0": 0.91 } } }
//! ```

use std::collections::BTreeMap;

use serde_json::{Map, Value, json};

use crate::core::{Product, Version, store::Dataset};

#[derive(Debug, Clone)]
pub struct ChartOptions<'a> {
    /// Newest version to show; defaults to the newest recorded one.
    pub current: Option<Version>,
    /// How many versions per product to keep, counting back from `current`.
    pub max_versions: usize,
    /// Display names overriding the ones stored in the dataset.
    pub locale_names: &'a BTreeMap<String, String>,
}

/// Reshape the dataset for the chart frontend.
///
/// Locales come out sorted, versions in numeric order. "No data" entries are
/// left out so the chart shows a gap rather than a zero.
pub fn build_chart(dataset: &Dataset, options: &ChartOptions<'_>) -> Value {
    let windows: Vec<(Product, Vec<Version>)> = Product::ALL
        .into_iter()
        .map(|product| (product, version_window(dataset, product, options)))
        .collect();

    let mut chart = Map::new();
    for (locale, series) in dataset.iter() {
        let name = options
            .locale_names
            .get(locale)
            .cloned()
            .unwrap_or_else(|| series.name.clone());

        let mut entry = Map::new();
        entry.insert("name".to_string(), Value::String(name));
        for (product, versions) in &windows {
            let mut ratios = Map::new();
            if let Some(recorded) = series.product(product.name()) {
                for version in versions {
                    if let Some(Some(ratio)) = recorded.get(version) {
                        ratios.insert(version.to_string(), json!(ratio));
                    }
                }
            }
            entry.insert(product.name().to_string(), Value::Object(ratios));
        }
        chart.insert(locale.clone(), Value::Object(entry));
    }
    Value::Object(chart)
}

fn version_window(dataset: &Dataset, product: Product, options: &ChartOptions<'_>) -> Vec<Version> {
    let versions: Vec<Version> = dataset
        .versions(product.name())
        .into_iter()
        .filter(|version| options.current.is_none_or(|current| *version <= current))
        .collect();
    let skip = versions.len().saturating_sub(options.max_versions);
    versions[skip..].to_vec()
}
