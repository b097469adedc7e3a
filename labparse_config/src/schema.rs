use labparse_core::{DEFAULT_MAX_GAP, ExtractionConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

use crate::loader::{
    DEFAULT_ALIASES_FILE, DEFAULT_DATA_DIR, DEFAULT_SCHEMA_FILE, DataPaths, load_json_or,
};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub extraction: ExtractionSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DataConfig {
    #[serde(default = "DataConfig::default_dir")]
    pub dir: PathBuf,
    #[serde(default = "DataConfig::default_schema_file")]
    pub schema_file: String,
    #[serde(default = "DataConfig::default_aliases_file")]
    pub aliases_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
            schema_file: Self::default_schema_file(),
            aliases_file: Self::default_aliases_file(),
        }
    }
}

impl DataConfig {
    fn default_dir() -> PathBuf {
        PathBuf::from(DEFAULT_DATA_DIR)
    }

    fn default_schema_file() -> String {
        DEFAULT_SCHEMA_FILE.to_string()
    }

    fn default_aliases_file() -> String {
        DEFAULT_ALIASES_FILE.to_string()
    }

    /// Resolve file locations, optionally under another data directory.
    #[must_use]
    pub fn paths(&self, dir_override: Option<&std::path::Path>) -> DataPaths {
        let dir = dir_override.unwrap_or(self.dir.as_path());
        DataPaths {
            schema: dir.join(&self.schema_file),
            aliases: dir.join(&self.aliases_file),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExtractionSettings {
    #[serde(default = "ExtractionSettings::default_max_gap")]
    pub max_gap: usize,
    #[serde(default = "ExtractionSettings::default_exclude_core_fields")]
    pub exclude_core_fields: bool,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            max_gap: Self::default_max_gap(),
            exclude_core_fields: Self::default_exclude_core_fields(),
        }
    }
}

impl ExtractionSettings {
    const fn default_max_gap() -> usize {
        DEFAULT_MAX_GAP
    }

    const fn default_exclude_core_fields() -> bool {
        true
    }

    #[must_use]
    pub fn to_extraction_config(&self) -> ExtractionConfig {
        let config = ExtractionConfig::default().with_max_gap(self.max_gap);
        if self.exclude_core_fields {
            config
        } else {
            config.without_exclusions()
        }
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("labparse"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load `~/labparse/config.json`, using defaults if it is missing or invalid.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;
        let loaded = load_json_or(&config_path, Self::default());

        if loaded.is_defaulted() {
            info!("Using default settings ({} not loaded)", config_path.display());
        } else {
            info!("Loaded settings from {}", config_path.display());
        }

        Ok(loaded.into_inner())
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let template = serde_json::to_string_pretty(&Self::default())?;
        std::fs::write(&config_path, template)?;

        Ok(config_path)
    }
}
