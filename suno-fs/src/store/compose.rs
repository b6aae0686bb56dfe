//! Project record composition
//!
//! A project is stored as several independent files. Reading one back merges
//! whichever of them exist into a single JSON object; a missing file leaves its
//! key out of the result instead of failing the read.

use serde_json::{Map, Value};

/// Key holding the raw lyrics text
pub const RAW_LYRICS_KEY: &str = "rawLyrics";

/// Key holding the enhanced lyrics text
pub const ENHANCED_LYRICS_KEY: &str = "enhancedLyrics";

/// Key holding the list of generation records
pub const GENERATIONS_KEY: &str = "generations";

/// The on-disk pieces of one project, each present only if its file exists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectParts {
    /// Decoded `config.json`
    pub config: Option<Map<String, Value>>,
    /// Contents of `raw-lyrics.txt`
    pub raw_lyrics: Option<String>,
    /// Contents of `enhanced-lyrics.txt`
    pub enhanced_lyrics: Option<String>,
    /// Decoded generation records in filename order; `None` when the
    /// `generations/` directory itself is missing
    pub generations: Option<Vec<Value>>,
}

/// Merge project parts into one response object
///
/// Config keys come first, followed by `rawLyrics`, `enhancedLyrics` and
/// `generations`. These keys overwrite same-named config entries.
pub fn compose_project(parts: ProjectParts) -> Map<String, Value> {
    let mut project = parts.config.unwrap_or_default();

    if let Some(text) = parts.raw_lyrics {
        project.insert(RAW_LYRICS_KEY.to_string(), Value::String(text));
    }
    if let Some(text) = parts.enhanced_lyrics {
        project.insert(ENHANCED_LYRICS_KEY.to_string(), Value::String(text));
    }
    if let Some(records) = parts.generations {
        project.insert(GENERATIONS_KEY.to_string(), Value::Array(records));
    }

    project
}

/// Prefix `id` to a decoded metadata object
///
/// Used for project summaries and style listings. A same-named key inside
/// `body` wins over the directory-derived id.
pub fn with_id(id: &str, body: Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::with_capacity(body.len() + 1);
    out.insert("id".to_string(), Value::String(id.to_string()));
    out.extend(body);
    out
}
