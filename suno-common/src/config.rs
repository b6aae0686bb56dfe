//! Configuration loading, data root resolution and on-disk layout

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming the data root
pub const DATA_DIR_ENV: &str = "SUNO_DATA_DIR";

/// Environment variable naming an explicit TOML config file
pub const CONFIG_FILE_ENV: &str = "SUNO_CONFIG";

/// Logging section of the TOML config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing level when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Catalog section of the TOML config
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Public base URL prefixed to every track URL
    pub base_url: Option<String>,
}

/// Contents of `config.toml`
///
/// Every field is optional; a missing or unreadable file is equivalent to
/// `TomlConfig::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub data_dir: Option<PathBuf>,
    pub logging: LoggingConfig,
    pub catalog: CatalogConfig,
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
    }

    /// Load the config file from its default location
    ///
    /// Missing files are normal and yield defaults. A file that exists but
    /// cannot be parsed logs a warning and also yields defaults.
    pub fn load() -> Self {
        let Some(path) = config_file_path() else {
            debug!("No config file found, using defaults");
            return Self::default();
        };

        match Self::from_file(&path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{} (using defaults)", e);
                Self::default()
            }
        }
    }
}

/// Locate the TOML config file
///
/// `$SUNO_CONFIG` wins when set; otherwise `<config_dir>/sunomaker/config.toml`
/// is used if it exists.
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
        return Some(PathBuf::from(path));
    }

    dirs::config_dir()
        .map(|d| d.join("sunomaker").join("config.toml"))
        .filter(|p| p.exists())
}

/// Compiled-in default data root: `data/` at the workspace root
pub fn default_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("data")
}

/// Data root resolution in priority order:
/// 1. Command-line argument (highest priority)
/// 2. `SUNO_DATA_DIR` environment variable
/// 3. `data_dir` in the TOML config file
/// 4. Compiled default (fallback)
#[derive(Debug, Clone)]
pub struct DataRootResolver {
    module_name: String,
    cli_arg: Option<PathBuf>,
    toml: Option<TomlConfig>,
}

impl DataRootResolver {
    pub fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
            cli_arg: None,
            toml: None,
        }
    }

    /// Command-line override, if the user gave one
    pub fn with_cli_arg(mut self, path: Option<PathBuf>) -> Self {
        self.cli_arg = path;
        self
    }

    /// Use an already-loaded TOML config instead of reading it from disk
    pub fn with_toml(mut self, config: TomlConfig) -> Self {
        self.toml = Some(config);
        self
    }

    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            debug!("{}: data root from command line", self.module_name);
            return path.clone();
        }

        if let Ok(path) = std::env::var(DATA_DIR_ENV) {
            if !path.trim().is_empty() {
                debug!("{}: data root from {}", self.module_name, DATA_DIR_ENV);
                return PathBuf::from(path);
            }
        }

        let toml_dir = match &self.toml {
            Some(config) => config.data_dir.clone(),
            None => TomlConfig::load().data_dir,
        };
        if let Some(path) = toml_dir {
            debug!("{}: data root from config file", self.module_name);
            return path;
        }

        default_data_dir()
    }
}

/// Paths of everything stored under the data root
///
/// ```text
/// <root>/projects/<id>/config.json
/// <root>/projects/<id>/raw-lyrics.txt
/// <root>/projects/<id>/enhanced-lyrics.txt
/// <root>/projects/<id>/generations/attempt-<n>.json
/// <root>/styles/<id>/metadata.json
/// <root>/styles/catalog.json
/// <root>/templates/gpt-prompt.txt
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    pub root: PathBuf,
    pub projects_dir: PathBuf,
    pub styles_dir: PathBuf,
    pub templates_dir: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            projects_dir: root.join("projects"),
            styles_dir: root.join("styles"),
            templates_dir: root.join("templates"),
            root,
        }
    }

    /// Create the projects, styles and templates directories if missing
    pub fn ensure_directories_exist(&self) -> Result<()> {
        for dir in [&self.projects_dir, &self.styles_dir, &self.templates_dir] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    pub fn project_dir(&self, id: &str) -> PathBuf {
        self.projects_dir.join(id)
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.styles_dir.join("catalog.json")
    }

    pub fn prompt_template_path(&self) -> PathBuf {
        self.templates_dir.join("gpt-prompt.txt")
    }
}
