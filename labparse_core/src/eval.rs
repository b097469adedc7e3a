//! Gold-set evaluation for the extended parser.
//!
//! A gold set is a JSON array of cases, each pairing an input description
//! with the field values a reader expects. Scoring compares expected and
//! parsed values after a light normalization so `+`, `pos` and `Positive`
//! count as the same answer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Result;
use crate::lexicon::Outcome;
use crate::scanner::{ExtendedParser, ParsedFields};

/// One labelled example.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldCase {
    #[serde(default = "GoldCase::default_name")]
    pub name: String,

    #[serde(default)]
    pub input: String,

    #[serde(default)]
    pub expected: BTreeMap<String, String>,
}

impl GoldCase {
    fn default_name() -> String {
        "Unnamed".to_string()
    }
}

/// Parse a gold set from JSON text.
///
/// # Errors
/// Returns an error if the text is not a JSON array of cases.
pub fn parse_gold_set(json: &str) -> Result<Vec<GoldCase>> {
    Ok(serde_json::from_str(json)?)
}

/// Score of a single case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseScore {
    pub name: String,
    pub correct: usize,
    pub wrong: usize,
    pub total: usize,
    pub accuracy: f64,
    /// Fields reported by the parser that the case does not expect.
    pub extra_fields: Vec<(String, String)>,
}

/// Comparison form of a value: blank or missing is `Unknown`, polarity
/// spellings collapse, anything else is compared trimmed.
fn comparable(value: Option<&str>) -> String {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Outcome::Unknown.to_string();
    };
    Outcome::from_polarity_token(&value.to_lowercase())
        .map_or_else(|| value.to_string(), |outcome| outcome.to_string())
}

/// Compare expected values with what the parser produced.
#[must_use]
pub fn score_case(
    name: &str,
    expected: &BTreeMap<String, String>,
    parsed: &ParsedFields,
) -> CaseScore {
    let mut correct = 0;
    let mut wrong = 0;

    for (field, value) in expected {
        let parsed_value = parsed.get(field).map(Outcome::as_str);
        if comparable(Some(value)) == comparable(parsed_value) {
            correct += 1;
        } else {
            wrong += 1;
        }
    }

    let extra_fields = parsed
        .iter()
        .filter(|(field, _)| !expected.contains_key(*field))
        .map(|(field, outcome)| (field.to_string(), outcome.to_string()))
        .collect();

    let total = expected.len().max(1);

    CaseScore {
        name: name.to_string(),
        correct,
        wrong,
        total,
        accuracy: correct as f64 / total as f64,
        extra_fields,
    }
}

/// Per-field tallies across a gold set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldStats {
    pub correct: usize,
    pub wrong: usize,
}

/// Aggregate results of a gold-set run.
#[derive(Debug, Clone, Serialize)]
pub struct EvalSummary {
    pub n_tests: usize,
    pub accuracy_mean: f64,
    pub failures: usize,
    pub per_field_stats: BTreeMap<String, FieldStats>,
    pub extra_fields: BTreeMap<String, usize>,
    pub timestamp: DateTime<Utc>,
    pub cases: Vec<CaseScore>,
}

/// Run the parser over every case and aggregate the scores.
#[must_use]
pub fn evaluate(parser: &ExtendedParser, cases: &[GoldCase]) -> EvalSummary {
    let mut per_field_stats: BTreeMap<String, FieldStats> = BTreeMap::new();
    let mut extra_fields: BTreeMap<String, usize> = BTreeMap::new();
    let mut scores = Vec::with_capacity(cases.len());

    for case in cases {
        let parsed = parser.parse(&case.input).parsed_fields;

        for (field, value) in &case.expected {
            let stats = per_field_stats.entry(field.clone()).or_default();
            if comparable(Some(value)) == comparable(parsed.get(field).map(Outcome::as_str)) {
                stats.correct += 1;
            } else {
                stats.wrong += 1;
            }
        }

        let score = score_case(&case.name, &case.expected, &parsed);
        for (field, _) in &score.extra_fields {
            *extra_fields.entry(field.clone()).or_default() += 1;
        }
        scores.push(score);
    }

    let accuracy_mean = if scores.is_empty() {
        0.0
    } else {
        scores.iter().map(|s| s.accuracy).sum::<f64>() / scores.len() as f64
    };
    let failures = scores.iter().filter(|s| s.accuracy < 1.0).count();

    EvalSummary {
        n_tests: scores.len(),
        accuracy_mean,
        failures,
        per_field_stats,
        extra_fields,
        timestamp: Utc::now(),
        cases: scores,
    }
}
