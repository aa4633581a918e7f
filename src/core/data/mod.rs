//! Data model shared by parsers, extractors and the aggregator.

mod record;
mod string_list;

pub use record::CompletionRecord;
pub use string_list::{StringEntry, StringList, qualify_key};
