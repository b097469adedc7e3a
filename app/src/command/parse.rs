use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::debug;

use super::DataSource;

/// Input parameters for the Parse command strategy.
#[derive(Debug, Clone)]
pub struct ParseInput {
    /// Text given on the command line
    pub text: Option<String>,
    /// File to read the text from
    pub file: Option<PathBuf>,
    /// Pretty-print the JSON result
    pub pretty: bool,
    pub source: DataSource,
}

/// Strategy for extracting extended test results from text.
///
/// Text comes from the argument, a file, or stdin (in that order). The
/// result is written to stdout as JSON.
#[derive(Debug, Clone, Copy)]
pub struct ParseStrategy;

impl ParseStrategy {
    async fn read_text(input: &ParseInput) -> anyhow::Result<String> {
        if let Some(text) = &input.text {
            return Ok(text.clone());
        }
        if let Some(path) = &input.file {
            debug!("Reading text from {}", path.display());
            return Ok(tokio::fs::read_to_string(path).await?);
        }

        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        Ok(text)
    }
}

impl super::CommandStrategy for ParseStrategy {
    type Input = ParseInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let text = Self::read_text(&input).await?;
        let (parser, _data) = super::build_parser(&input.source)?;

        let result = parser.parse(&text);
        let json = if input.pretty {
            serde_json::to_string_pretty(&result)?
        } else {
            serde_json::to_string(&result)?
        };
        println!("{json}");

        Ok(())
    }
}
