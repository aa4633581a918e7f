//! l10n-build-stats - localization completion stats for Firefox and Fenix
//!
//! Extracts every locale's strings for one product version, computes the
//! completion ratio against the en-US reference, and merges the result into a
//! time-series dataset that feeds the localization dashboard.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Parsers, extractors, completion and the aggregated dataset
//! - `error`: Error taxonomy shared by the library
//! - `logging`: `tracing` subscriber setup

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
