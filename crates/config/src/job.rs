// Job configuration
// Loaded from ~/.config/stocksync/config.toml (or --config), then environment overrides

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stocksync_recon::{ReconLayout, ReconOptions, SuffixPolicy, DEFAULT_KEY_FIELD};
use thiserror::Error;

/// Folder holding the latest snapshot.
pub const ENV_LATEST_DIR: &str = "INPUT_FOLDER_1";
/// Folder holding the older snapshot.
pub const ENV_OLDER_DIR: &str = "INPUT_FOLDER_2";
/// Folder receiving the output artifacts.
pub const ENV_OUTPUT_DIR: &str = "OUTPUT_PATH";
pub const ENV_KEY_FIELD: &str = "STOCKSYNC_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("config validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    /// Folder with the single latest extract.
    pub latest_dir: PathBuf,
    /// Folder with the single older extract.
    pub older_dir: PathBuf,
    pub output_dir: PathBuf,
    pub key_field: String,
    pub suffix: SuffixPolicy,
    /// Accepted source file extensions, without the dot.
    pub extensions: Vec<String>,
    /// Create missing input/output folders before discovery.
    pub create_dirs: bool,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub data_file: String,
    pub common_file: String,
    pub label_column: String,
    pub status_column: String,
}

impl Default for JobConfig {
    fn default() -> Self {
        let base = std::env::temp_dir();
        Self {
            latest_dir: base.join("input").join("file1"),
            older_dir: base.join("input").join("file2"),
            output_dir: base.join("output"),
            key_field: DEFAULT_KEY_FIELD.to_string(),
            suffix: SuffixPolicy::default(),
            extensions: vec!["xlsx".to_string()],
            create_dirs: true,
            output: OutputConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        let layout = ReconLayout::default();
        Self {
            data_file: "Data.xlsx".to_string(),
            common_file: "common.xlsx".to_string(),
            label_column: layout.label_column,
            status_column: layout.status_column,
        }
    }
}

impl JobConfig {
    /// Default config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stocksync")
            .join("config.toml")
    }

    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load from `path`, or from the default path if it exists, else defaults.
    ///
    /// An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = Self::config_path();
                if !default.exists() {
                    log::debug!("no config at {}, using defaults", default.display());
                    return Ok(Self::default());
                }
                default
            }
        };

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        log::debug!("loaded config from {}", path.display());
        Self::from_toml(&contents)
    }

    /// Apply overrides from an environment lookup. Blank values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_LATEST_DIR) {
            self.latest_dir = PathBuf::from(v);
        }
        if let Some(v) = get(ENV_OLDER_DIR) {
            self.older_dir = PathBuf::from(v);
        }
        if let Some(v) = get(ENV_OUTPUT_DIR) {
            self.output_dir = PathBuf::from(v);
        }
        if let Some(v) = get(ENV_KEY_FIELD) {
            self.key_field = v;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Validation(msg));

        if self.key_field.trim().is_empty() {
            return invalid("key_field must not be empty".into());
        }
        if self.extensions.iter().all(|e| e.trim_start_matches('.').trim().is_empty()) {
            return invalid("extensions must list at least one file extension".into());
        }
        if self.latest_dir == self.older_dir {
            return invalid(format!(
                "latest_dir and older_dir must differ (both {})",
                self.latest_dir.display()
            ));
        }

        let out = &self.output;
        for (field, name) in [("output.data_file", &out.data_file), ("output.common_file", &out.common_file)] {
            let p = Path::new(name);
            if p.extension().is_none() || p.file_stem().is_none() {
                return invalid(format!("{field} needs a file name with an extension, got '{name}'"));
            }
        }
        if out.data_file == out.common_file {
            return invalid(format!(
                "output.data_file and output.common_file must differ (both '{}')",
                out.data_file
            ));
        }
        if out.label_column.trim().is_empty() || out.status_column.trim().is_empty() {
            return invalid("output.label_column and output.status_column must not be empty".into());
        }
        if out.label_column == out.status_column {
            return invalid(format!(
                "output.label_column and output.status_column must differ (both '{}')",
                out.label_column
            ));
        }

        Ok(())
    }

    pub fn recon_options(&self) -> ReconOptions {
        ReconOptions {
            key_field: self.key_field.clone(),
            suffix: self.suffix,
        }
    }

    pub fn layout(&self) -> ReconLayout {
        ReconLayout {
            label_column: self.output.label_column.clone(),
            status_column: self.output.status_column.clone(),
        }
    }

    pub fn data_path(&self) -> PathBuf {
        self.output_dir.join(&self.output.data_file)
    }

    pub fn common_path(&self) -> PathBuf {
        self.output_dir.join(&self.output.common_file)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
