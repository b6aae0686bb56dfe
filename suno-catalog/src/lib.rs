//! suno-catalog library - catalog.json generation
//!
//! Derives track metadata from the filenames of the audio samples stored
//! under `data/styles/<style>/` and aggregates them into a single catalog
//! document consumed by the web client.

pub mod catalog;
pub mod classifier;
pub mod scanner;

pub use catalog::{Catalog, Track, CATEGORIES};
pub use classifier::{classify, Classification};
pub use scanner::{CatalogScanner, ScanError, ScanOutcome, DEFAULT_BASE_URL};
