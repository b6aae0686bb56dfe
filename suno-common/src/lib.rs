//! # SunoMaker Common Library
//!
//! Shared code for the SunoMaker data services:
//! - Error and result types
//! - Data root resolution and on-disk layout
//! - Timestamp formatting
//! - JSON file helpers

pub mod config;
pub mod error;
pub mod json_file;
pub mod time;

pub use config::DataLayout;
pub use error::{Error, Result};
