//! Permissive JSON loading for the extended schema and alias tables.
//!
//! Missing or malformed files never fail extraction: the caller's default is
//! used instead, and [`Loaded`] records that it happened.

use labparse_core::{AliasMap, FieldSchema};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_SCHEMA_FILE: &str = "extended_schema.json";
pub const DEFAULT_ALIASES_FILE: &str = "alias_maps.json";

/// Outcome of a permissive load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loaded<T> {
    /// The file existed and parsed.
    Found(T),
    /// The file was missing or unreadable; this is the caller's default.
    Defaulted(T),
}

impl<T> Loaded<T> {
    #[must_use]
    pub fn into_inner(self) -> T {
        match self {
            Self::Found(value) | Self::Defaulted(value) => value,
        }
    }

    #[must_use]
    pub const fn get(&self) -> &T {
        match self {
            Self::Found(value) | Self::Defaulted(value) => value,
        }
    }

    #[must_use]
    pub const fn is_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted(_))
    }
}

/// Read and parse `path`, falling back to `default` on any failure.
pub fn load_json_or<T: DeserializeOwned>(path: &Path, default: T) -> Loaded<T> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file not found, using default");
        return Loaded::Defaulted(default);
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read config file, using default");
            return Loaded::Defaulted(default);
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => Loaded::Found(value),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to parse config file, using default");
            Loaded::Defaulted(default)
        }
    }
}

/// Contents of `alias_maps.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AliasMaps {
    #[serde(default)]
    pub field_aliases: AliasMap,

    /// Present in the file format but not used by the extended parser.
    #[serde(default)]
    pub value_aliases_pnv: Map<String, Value>,
}

/// Locations of the schema and alias files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPaths {
    pub schema: PathBuf,
    pub aliases: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::in_dir(DEFAULT_DATA_DIR)
    }
}

impl DataPaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            schema: dir.join(DEFAULT_SCHEMA_FILE),
            aliases: dir.join(DEFAULT_ALIASES_FILE),
        }
    }

    /// Load both files, defaulting each independently.
    #[must_use]
    pub fn load(&self) -> ExtendedData {
        let schema = load_json_or(&self.schema, FieldSchema::new());
        let aliases = load_json_or(&self.aliases, AliasMaps::default());

        info!(
            schema = %self.schema.display(),
            fields = schema.get().len(),
            schema_defaulted = schema.is_defaulted(),
            aliases = aliases.get().field_aliases.len(),
            aliases_defaulted = aliases.is_defaulted(),
            "Loaded extended parser data"
        );

        ExtendedData { schema, aliases }
    }
}

/// Schema and alias tables as loaded from disk.
#[derive(Debug, Clone)]
pub struct ExtendedData {
    pub schema: Loaded<FieldSchema>,
    pub aliases: Loaded<AliasMaps>,
}

impl ExtendedData {
    /// Whether either file fell back to its default.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.schema.is_defaulted() || self.aliases.is_defaulted()
    }

    #[must_use]
    pub const fn schema(&self) -> &FieldSchema {
        self.schema.get()
    }

    #[must_use]
    pub const fn field_aliases(&self) -> &AliasMap {
        &self.aliases.get().field_aliases
    }
}
