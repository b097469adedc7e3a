use labparse_core::{evaluate, parse_gold_set};
use std::path::PathBuf;
use tracing::info;

use super::DataSource;

/// Input parameters for the Eval command strategy.
#[derive(Debug, Clone)]
pub struct EvalInput {
    /// Gold set: JSON array of `{name, input, expected}` cases
    pub gold: PathBuf,
    /// Where to write the full JSON report
    pub report: Option<PathBuf>,
    pub source: DataSource,
}

/// Strategy for scoring the extended parser against a gold set.
#[derive(Debug, Clone, Copy)]
pub struct EvalStrategy;

impl super::CommandStrategy for EvalStrategy {
    type Input = EvalInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let gold = tokio::fs::read_to_string(&input.gold).await?;
        let cases = parse_gold_set(&gold)?;
        info!("Loaded {} gold cases from {}", cases.len(), input.gold.display());

        let (parser, _data) = super::build_parser(&input.source)?;
        let summary = evaluate(&parser, &cases);

        println!("=== Extended parser evaluation ===\n");
        println!("Cases: {}", summary.n_tests);
        println!("Mean accuracy: {:.3}", summary.accuracy_mean);
        println!("Cases with errors: {}", summary.failures);
        println!();

        println!("Per field:");
        for (field, stats) in &summary.per_field_stats {
            println!("  {field}: {} correct, {} wrong", stats.correct, stats.wrong);
        }

        if !summary.extra_fields.is_empty() {
            println!();
            println!("Reported but not expected:");
            for (field, count) in &summary.extra_fields {
                println!("  {field}: {count}");
            }
        }

        if let Some(report) = &input.report {
            tokio::fs::write(report, serde_json::to_string_pretty(&summary)?).await?;
            println!();
            println!("Report written to {}", report.display());
        }

        Ok(())
    }
}
