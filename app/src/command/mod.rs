//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type, dispatched
//! statically from `main`.

use labparse_config::{Config, DataPaths, ExtendedData};
use labparse_core::ExtendedParser;
use std::path::PathBuf;
use tracing::{info, warn};

mod eval;
mod fields;
mod init;
mod parse;
mod version;

pub use eval::{EvalInput, EvalStrategy};
pub use fields::{FieldsInput, FieldsStrategy};
pub use init::InitStrategy;
pub use parse::{ParseInput, ParseStrategy};
pub use version::VersionStrategy;

/// Where to find the schema and alias files.
///
/// Unset values fall back to the settings file, then to `data/`.
#[derive(Debug, Clone, Default)]
pub struct DataSource {
    pub data_dir: Option<PathBuf>,
    pub schema: Option<PathBuf>,
    pub aliases: Option<PathBuf>,
}

impl DataSource {
    fn resolve(&self, config: &Config) -> DataPaths {
        let mut paths = config.data.paths(self.data_dir.as_deref());
        if let Some(schema) = &self.schema {
            paths.schema.clone_from(schema);
        }
        if let Some(aliases) = &self.aliases {
            paths.aliases.clone_from(aliases);
        }
        paths
    }
}

/// Load settings and data files, then build the extraction engine.
fn build_parser(source: &DataSource) -> anyhow::Result<(ExtendedParser, ExtendedData)> {
    let config = Config::load()?;
    let paths = source.resolve(&config);
    let data = paths.load();

    if data.is_degraded() {
        warn!(
            "Extended parser data incomplete (schema: {}, aliases: {})",
            paths.schema.display(),
            paths.aliases.display()
        );
    }

    let parser = ExtendedParser::new(
        data.schema(),
        data.field_aliases(),
        config.extraction.to_extraction_config(),
    )?;
    info!(
        "Extended parser ready: {} fields, max_gap={}",
        parser.fields().count(),
        parser.config().max_gap
    );

    Ok((parser, data))
}

/// Core trait defining the contract for all command strategies.
///
/// # Design Principles
/// - **Static dispatch**: All calls are monomorphized at compile time
/// - **Type safety**: Each strategy defines its own input type via associated type
/// - **Extensibility**: Adding new commands requires only implementing this trait
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}
