//! Style metadata listing

use serde_json::{Map, Value};
use suno_common::json_file::read_json_optional;
use suno_common::Result;
use tracing::debug;

use super::{compose, sorted_subdirs, ProjectStore};

/// Metadata file expected in every style folder
pub const STYLE_METADATA_FILE: &str = "metadata.json";

impl ProjectStore {
    /// `{id, ...metadata}` for every style folder with a `metadata.json`,
    /// ordered by id
    ///
    /// Folders without metadata (for example audio-only folders) are skipped.
    pub fn list_styles(&self) -> Result<Vec<Map<String, Value>>> {
        let mut styles = Vec::new();
        for (id, dir) in sorted_subdirs(&self.layout().styles_dir)? {
            match read_json_optional::<Map<String, Value>>(&dir.join(STYLE_METADATA_FILE))? {
                Some(metadata) => styles.push(compose::with_id(&id, metadata)),
                None => debug!("Style folder {} has no metadata, skipping", id),
            }
        }
        Ok(styles)
    }
}
