//! Filesystem-backed project store
//!
//! Each project is one directory under `projects/`:
//!
//! ```text
//! projects/<id>/config.json
//! projects/<id>/raw-lyrics.txt
//! projects/<id>/enhanced-lyrics.txt
//! projects/<id>/generations/attempt-<n>.json
//! ```
//!
//! All operations are synchronous; the HTTP layer runs them on the blocking
//! thread pool.

pub mod compose;
pub mod styles;
pub mod templates;

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use suno_common::json_file::{
    read_json_optional, read_text_optional, write_json_new, write_json_pretty,
};
use suno_common::{time, DataLayout, Error, Result};
use tracing::{debug, info};

pub use compose::{compose_project, ProjectParts};

pub const CONFIG_FILE: &str = "config.json";
pub const RAW_LYRICS_FILE: &str = "raw-lyrics.txt";
pub const ENHANCED_LYRICS_FILE: &str = "enhanced-lyrics.txt";
pub const GENERATIONS_DIR: &str = "generations";

const DEFAULT_PROJECT_NAME: &str = "Untitled Project";
const DEFAULT_UPDATED_NAME: &str = "Untitled";

/// Message reported for every operation on a missing project
pub const PROJECT_NOT_FOUND: &str = "Project not found";

/// Body of `POST /projects`
///
/// `name` and `style` are stored as given, whatever their JSON type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProjectRequest {
    pub id: Option<String>,
    pub name: Option<Value>,
    pub style: Option<Value>,
}

/// Body of `PUT /projects/{id}`
///
/// Lyrics files are only written for keys present in the body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub name: Option<Value>,
    pub style: Option<Value>,
    pub raw_lyrics: Option<String>,
    pub enhanced_lyrics: Option<String>,
}

/// Decoded `config.json`
///
/// Kept as a plain JSON object so updates leave unknown keys, key order and
/// value types exactly as they were stored.
pub type ProjectConfig = Map<String, Value>;

/// Project, style and template storage rooted at a [`DataLayout`]
#[derive(Debug, Clone)]
pub struct ProjectStore {
    layout: DataLayout,
}

impl ProjectStore {
    pub fn new(layout: DataLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    /// Summaries of every project directory that has a `config.json`,
    /// ordered by id
    pub fn list_projects(&self) -> Result<Vec<Map<String, Value>>> {
        let mut projects = Vec::new();
        for (id, dir) in sorted_subdirs(&self.layout.projects_dir)? {
            if let Some(config) = read_json_optional::<ProjectConfig>(&dir.join(CONFIG_FILE))? {
                projects.push(compose::with_id(&id, config));
            }
        }
        debug!("Listed {} projects", projects.len());
        Ok(projects)
    }

    /// Read every stored piece of a project without merging
    pub fn read_parts(&self, id: &str) -> Result<ProjectParts> {
        let dir = self.existing_project_dir(id)?;

        let generations_dir = dir.join(GENERATIONS_DIR);
        let generations = if generations_dir.is_dir() {
            let mut records = Vec::new();
            for path in sorted_files(&generations_dir, |name| name.ends_with(".json"))? {
                if let Some(record) = read_json_optional::<Value>(&path)? {
                    records.push(record);
                }
            }
            Some(records)
        } else {
            None
        };

        Ok(ProjectParts {
            config: read_json_optional(&dir.join(CONFIG_FILE))?,
            raw_lyrics: read_text_optional(&dir.join(RAW_LYRICS_FILE))?,
            enhanced_lyrics: read_text_optional(&dir.join(ENHANCED_LYRICS_FILE))?,
            generations,
        })
    }

    /// Merged view of a project
    pub fn get_project(&self, id: &str) -> Result<Map<String, Value>> {
        let parts = self.read_parts(id)?;
        debug!("Read project {}", id);
        Ok(compose_project(parts))
    }

    /// Create (or re-initialize) a project directory and its config
    pub fn create_project(&self, request: CreateProjectRequest) -> Result<ProjectConfig> {
        let id = match request.id.filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => time::default_project_id(),
        };
        validate_project_id(&id)?;

        let dir = self.layout.project_dir(&id);
        fs::create_dir_all(dir.join(GENERATIONS_DIR))?;

        let now = time::iso_timestamp();
        let mut config = ProjectConfig::new();
        config.insert("id".to_string(), Value::String(id.clone()));
        config.insert(
            "name".to_string(),
            request.name.unwrap_or_else(|| Value::from(DEFAULT_PROJECT_NAME)),
        );
        config.insert(
            "style".to_string(),
            request.style.unwrap_or_else(|| Value::from("")),
        );
        config.insert("createdAt".to_string(), Value::String(now.clone()));
        config.insert("updatedAt".to_string(), Value::String(now));
        write_json_pretty(&dir.join(CONFIG_FILE), &config)?;

        info!("Created project {}", id);
        Ok(config)
    }

    /// Merge `name`/`style` into the config, refresh `updatedAt`, and write
    /// whichever lyrics the request carries
    ///
    /// Existing keys keep their position; keys the config lacked are appended.
    pub fn update_project(
        &self,
        id: &str,
        request: UpdateProjectRequest,
    ) -> Result<ProjectConfig> {
        let dir = self.existing_project_dir(id)?;
        let config_path = dir.join(CONFIG_FILE);

        let mut config = match read_json_optional::<ProjectConfig>(&config_path)? {
            Some(config) => config,
            None => {
                let mut fresh = ProjectConfig::new();
                fresh.insert("id".to_string(), Value::String(id.to_string()));
                fresh
            }
        };

        let name = request
            .name
            .or_else(|| config.get("name").cloned())
            .unwrap_or_else(|| Value::from(DEFAULT_UPDATED_NAME));
        let style = request
            .style
            .or_else(|| config.get("style").cloned())
            .unwrap_or_else(|| Value::from(""));
        config.insert("name".to_string(), name);
        config.insert("style".to_string(), style);
        config.insert("updatedAt".to_string(), Value::String(time::iso_timestamp()));
        write_json_pretty(&config_path, &config)?;

        if let Some(text) = &request.raw_lyrics {
            fs::write(dir.join(RAW_LYRICS_FILE), text)?;
        }
        if let Some(text) = &request.enhanced_lyrics {
            fs::write(dir.join(ENHANCED_LYRICS_FILE), text)?;
        }

        info!(
            "Updated project {} (raw lyrics: {}, enhanced lyrics: {})",
            id,
            request.raw_lyrics.is_some(),
            request.enhanced_lyrics.is_some()
        );
        Ok(config)
    }

    /// Record a generation attempt and return its number
    ///
    /// The first candidate is one more than the number of existing attempt
    /// files. Files are created exclusively, so a candidate already on disk
    /// (a concurrent append, or a gap left by a deleted attempt) is skipped
    /// rather than overwritten.
    pub fn append_generation(&self, id: &str, fields: Map<String, Value>) -> Result<u32> {
        let dir = self.existing_project_dir(id)?;
        let generations_dir = dir.join(GENERATIONS_DIR);
        fs::create_dir_all(&generations_dir)?;

        let existing = sorted_files(&generations_dir, is_attempt_file)?.len();
        let mut attempt = u32::try_from(existing)
            .map_err(|_| Error::Internal(format!("Too many generations in project {}", id)))?
            + 1;

        loop {
            let record = generation_record(attempt, time::iso_timestamp(), &fields);
            let path = generations_dir.join(attempt_file_name(attempt));
            if write_json_new(&path, &record)? {
                info!("Saved generation attempt {} for project {}", attempt, id);
                return Ok(attempt);
            }
            debug!("{} already exists, trying next attempt number", path.display());
            attempt += 1;
        }
    }

    /// Directory of an existing project
    fn existing_project_dir(&self, id: &str) -> Result<PathBuf> {
        validate_project_id(id)?;
        let dir = self.layout.project_dir(id);
        if dir.exists() {
            Ok(dir)
        } else {
            Err(Error::NotFound(PROJECT_NOT_FOUND.to_string()))
        }
    }
}

/// Reject ids that would address anything other than a direct child of the
/// projects directory
pub fn validate_project_id(id: &str) -> Result<()> {
    let mut components = Path::new(id).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if id.is_empty() || !single_normal || id.contains(['/', '\\', '\0']) {
        return Err(Error::InvalidInput(format!("Invalid project id: {:?}", id)));
    }
    Ok(())
}

/// `attempt-<n>.json`
pub fn attempt_file_name(attempt: u32) -> String {
    format!("attempt-{}.json", attempt)
}

fn is_attempt_file(name: &str) -> bool {
    name.starts_with("attempt-") && name.ends_with(".json")
}

/// `{attempt, timestamp, ...fields}`
///
/// Caller fields that reuse `attempt` or `timestamp` replace the value but
/// keep the key's leading position.
fn generation_record(
    attempt: u32,
    timestamp: String,
    fields: &Map<String, Value>,
) -> Map<String, Value> {
    let mut record = Map::with_capacity(fields.len() + 2);
    record.insert("attempt".to_string(), Value::from(attempt));
    record.insert("timestamp".to_string(), Value::String(timestamp));
    for (key, value) in fields {
        record.insert(key.clone(), value.clone());
    }
    record
}

/// `(name, path)` of the subdirectories of `dir`, sorted by name
///
/// A missing `dir` has no subdirectories.
pub(crate) fn sorted_subdirs(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push((entry.file_name().to_string_lossy().into_owned(), path));
        }
    }
    dirs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(dirs)
}

/// Regular files in `dir` whose name satisfies `keep`, sorted by name
fn sorted_files(dir: &Path, keep: impl Fn(&str) -> bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && keep(&entry.file_name().to_string_lossy()) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_project_id() {
        assert!(validate_project_id("20250101_120000").is_ok());
        assert!(validate_project_id("my song").is_ok());
        assert!(validate_project_id("canción").is_ok());

        for bad in ["", ".", "..", "../etc", "a/b", "a\\b", "/abs"] {
            assert!(
                matches!(validate_project_id(bad), Err(Error::InvalidInput(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_attempt_file_matching() {
        assert!(is_attempt_file("attempt-1.json"));
        assert!(is_attempt_file("attempt-12.json"));
        assert!(!is_attempt_file("notes.json"));
        assert!(!is_attempt_file("attempt-1.json.bak"));
    }

    #[test]
    fn test_generation_record_key_order() {
        let fields = json!({"prompt": "p", "attempt": 99}).as_object().cloned().unwrap();
        let record = generation_record(3, "ts".to_string(), &fields);

        let keys: Vec<_> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, ["attempt", "timestamp", "prompt"]);
        assert_eq!(record["attempt"], 99);
        assert_eq!(record["timestamp"], "ts");
    }

    #[test]
    fn test_update_keeps_config_key_order_and_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProjectStore::new(DataLayout::new(dir.path().to_path_buf()));
        let project_dir = store.layout().project_dir("p");
        fs::create_dir_all(&project_dir).unwrap();
        fs::write(
            project_dir.join(CONFIG_FILE),
            r#"{"name":"n","id":"p","bpm":96,"style":"s","createdAt":null}"#,
        )
        .unwrap();

        let config = store
            .update_project(
                "p",
                UpdateProjectRequest {
                    style: Some(json!("rap")),
                    ..Default::default()
                },
            )
            .unwrap();

        let keys: Vec<_> = config.keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "id", "bpm", "style", "createdAt", "updatedAt"]);
        assert_eq!(config["createdAt"], Value::Null);
        assert_eq!(config["style"], "rap");

        let stored: ProjectConfig =
            serde_json::from_str(&fs::read_to_string(project_dir.join(CONFIG_FILE)).unwrap())
                .unwrap();
        assert_eq!(stored, config);
    }

    #[test]
    fn test_fresh_config_has_no_created_at() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProjectStore::new(DataLayout::new(dir.path().to_path_buf()));
        fs::create_dir_all(store.layout().project_dir("p")).unwrap();

        let config = store.update_project("p", UpdateProjectRequest::default()).unwrap();
        let keys: Vec<_> = config.keys().map(String::as_str).collect();
        assert_eq!(keys, ["id", "name", "style", "updatedAt"]);
        assert_eq!(config["name"], "Untitled");
        assert_eq!(config["style"], "");
    }
}
