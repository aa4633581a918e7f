//! Extraction and aggregation engine.
//!
//! ## Module Structure
//!
//! - `parsers`: one parser per resource-file family
//! - `project`: `l10n.toml` project files
//! - `products`: Firefox desktop and Fenix extractors
//! - `completion`: ratio of a locale against the reference
//! - `store`: aggregated dataset, lock and atomic persistence
//! - `pipeline`: one extraction run end to end
//! - `chart`, `export`, `legacy`: readers and writers around the dataset

pub mod chart;
pub mod completion;
mod data;
pub mod export;
pub mod legacy;
pub mod parsers;
pub mod pipeline;
pub mod products;
pub mod project;
pub mod sink;
pub mod store;
mod version;

pub use data::{CompletionRecord, StringEntry, StringList, qualify_key};
pub use products::{ExtractionRoots, Product, ProductExtractor};
pub use version::Version;
