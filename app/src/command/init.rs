use labparse_config::Config;

/// Strategy for initializing the configuration.
///
/// This strategy creates the default settings file at `~/labparse/config.json`.
///
/// # Design
/// - Static dispatch: All method calls are monomorphized
/// - Stateless: No internal state, simplest form of strategy
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config_path = Config::create_config()?;

        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Configuration options:");
        println!("   - data.dir: directory holding extended_schema.json and alias_maps.json");
        println!("   - extraction.max_gap: characters allowed between a test name and its result");
        println!("   - extraction.exclude_core_fields: never report core-parser fields");
        Ok(())
    }
}
