#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod command;

use command::{
    CommandStrategy, DataSource, EvalInput, EvalStrategy, FieldsInput, FieldsStrategy,
    InitStrategy, ParseInput, ParseStrategy, VersionStrategy,
};

#[derive(Parser)]
#[command(name = "labparse")]
#[command(about = "Extract extended lab test results from free text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct DataArgs {
    /// Directory holding extended_schema.json and alias_maps.json
    #[arg(short = 'd', long)]
    data_dir: Option<PathBuf>,

    /// Schema file (overrides --data-dir)
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Alias file (overrides --data-dir)
    #[arg(long)]
    aliases: Option<PathBuf>,
}

impl From<DataArgs> for DataSource {
    fn from(args: DataArgs) -> Self {
        Self {
            data_dir: args.data_dir,
            schema: args.schema,
            aliases: args.aliases,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse text and print the extracted fields as JSON
    Parse {
        /// Text to parse (reads stdin when neither TEXT nor --file is given)
        text: Option<String>,

        /// Read the text from a file
        #[arg(short = 'f', long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(short = 'p', long)]
        pretty: bool,

        #[command(flatten)]
        data: DataArgs,
    },
    /// List schema fields and their aliases
    Fields {
        #[command(flatten)]
        data: DataArgs,
    },
    /// Score the parser against a gold set
    Eval {
        /// Gold set JSON file
        #[arg(short = 'g', long)]
        gold: PathBuf,

        /// Write the full report as JSON
        #[arg(short = 'r', long)]
        report: Option<PathBuf>,

        #[command(flatten)]
        data: DataArgs,
    },
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            text,
            file,
            pretty,
            data,
        } => {
            ParseStrategy
                .execute(ParseInput {
                    text,
                    file,
                    pretty,
                    source: data.into(),
                })
                .await
        }
        Commands::Fields { data } => {
            FieldsStrategy
                .execute(FieldsInput {
                    source: data.into(),
                })
                .await
        }
        Commands::Eval { gold, report, data } => {
            EvalStrategy
                .execute(EvalInput {
                    gold,
                    report,
                    source: data.into(),
                })
                .await
        }
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
