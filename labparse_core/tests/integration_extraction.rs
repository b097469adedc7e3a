//! Integration tests for the extended parser.
//!
//! These tests verify that:
//! - aliases and field names resolve to the canonical field
//! - values normalize to Positive/Negative/Variable
//! - the first match per field wins
//! - the alias/value window stops at 80 characters, newlines and periods
//! - results serialize to the `parsed_fields`/`source` shape

#![expect(clippy::expect_used, reason = "Test failure should panic with context")]

use labparse_core::{AliasMap, ExtendedParser, FieldSchema, Outcome, SOURCE_TAG, parse_text_extended};
use serde_json::json;

fn schema(json: &str) -> FieldSchema {
    serde_json::from_str(json).expect("schema JSON should parse")
}

fn aliases(json: &str) -> AliasMap {
    serde_json::from_str(json).expect("alias JSON should parse")
}

fn parser(schema_json: &str, aliases_json: &str) -> ExtendedParser {
    ExtendedParser::with_defaults(&schema(schema_json), &aliases(aliases_json))
        .expect("patterns should compile")
}

#[test]
fn test_alias_and_field_name_examples() {
    let result = parse_text_extended(
        "ALK gene mutation is variable; EGFR status: negative.",
        &schema(r#"{"ALK": {}, "EGFR": {}}"#),
        &aliases(r#"{"alk gene": "ALK"}"#),
    )
    .expect("patterns should compile");

    let value = serde_json::to_value(&result).expect("result should serialize");
    assert_eq!(
        value,
        json!({
            "parsed_fields": {"ALK": "Variable", "EGFR": "Negative"},
            "source": "extended_parser"
        })
    );
}

#[test]
fn test_alias_is_positive_resolves_to_canonical_field() {
    let p = parser(
        r#"{"Bile Solubility": {}, "Optochin": {}}"#,
        r#"{"bile sol": "Bile Solubility", "opto": "OPTOCHIN"}"#,
    );

    for (text, field) in [
        ("bile sol is positive", "Bile Solubility"),
        ("Bile Solubility is positive", "Bile Solubility"),
        ("opto is positive", "Optochin"),
    ] {
        let result = p.parse(text);
        assert_eq!(
            result.parsed_fields.get(field),
            Some(&Outcome::Positive),
            "text {text:?}"
        );
    }
}

#[test]
fn test_sensitivity_values() {
    let p = parser(r#"{"Optochin": {}, "Novobiocin": {}, "Bacitracin": {}}"#, "{}");
    let result = p.parse("Optochin susceptible; Novobiocin: resistant; Bacitracin SENSITIVE");

    assert_eq!(result.parsed_fields.get("Optochin"), Some(&Outcome::Positive));
    assert_eq!(result.parsed_fields.get("Novobiocin"), Some(&Outcome::Negative));
    assert_eq!(result.parsed_fields.get("Bacitracin"), Some(&Outcome::Positive));
}

#[test]
fn test_unmentioned_field_is_absent() {
    let p = parser(r#"{"PYR": {}, "CAMP": {}}"#, "{}");
    let result = p.parse("CAMP test was negative");

    assert!(!result.parsed_fields.contains("PYR"));
    assert_eq!(result.parsed_fields.len(), 1);

    let value = serde_json::to_value(&result).expect("result should serialize");
    assert!(value["parsed_fields"].get("PYR").is_none());
}

#[test]
fn test_first_mention_wins() {
    let p = parser(r#"{"EGFR": {}}"#, "{}");
    let result = p.parse("resistant to EGFR inhibitors, EGFR tested resistant");

    assert_eq!(result.parsed_fields.len(), 1);
    assert_eq!(result.parsed_fields.get("EGFR"), Some(&Outcome::Negative));

    let result = p.parse("EGFR positive, later EGFR negative");
    assert_eq!(result.parsed_fields.get("EGFR"), Some(&Outcome::Positive));
}

#[test]
fn test_gap_limit_is_80_characters() {
    let p = parser(r#"{"PYR": {}}"#, "{}");

    let within = format!("PYR {} positive", "x".repeat(78));
    assert_eq!(
        p.parse(&within).parsed_fields.get("PYR"),
        Some(&Outcome::Positive)
    );

    let beyond = format!("PYR {} positive", "x".repeat(80));
    assert!(p.parse(&beyond).parsed_fields.is_empty());
}

#[test]
fn test_window_stops_at_period_and_newline() {
    let p = parser(r#"{"PYR": {}}"#, "{}");

    assert!(p.parse("PYR was performed. Result positive").parsed_fields.is_empty());
    assert!(p.parse("PYR was performed\nResult positive").parsed_fields.is_empty());
}

#[test]
fn test_bounded_phrase_with_commas_matches() {
    let p = parser(r#"{"Hippurate": {}}"#, r#"{"hippurate hydrolysis": "Hippurate"}"#);
    let result = p.parse("Hippurate hydrolysis, performed twice, came back positive");

    assert_eq!(result.parsed_fields.get("Hippurate"), Some(&Outcome::Positive));
}

#[test]
fn test_fields_reported_in_schema_order() {
    let p = parser(r#"{"PYR": {}, "CAMP": {}, "Optochin": {}}"#, "{}");
    let result = p.parse("Optochin resistant, CAMP positive, PYR negative");

    let order: Vec<&str> = result.parsed_fields.iter().map(|(field, _)| field).collect();
    assert_eq!(order, vec!["PYR", "CAMP", "Optochin"]);
}

#[test]
fn test_empty_configuration_yields_empty_result() {
    let result = parse_text_extended(
        "PYR positive, CAMP negative",
        &FieldSchema::new(),
        &AliasMap::new(),
    )
    .expect("patterns should compile");

    let value = serde_json::to_value(&result).expect("result should serialize");
    assert_eq!(value, json!({"parsed_fields": {}, "source": SOURCE_TAG}));
}

#[test]
fn test_parsing_is_deterministic() {
    let p = parser(r#"{"PYR": {}, "CAMP": {}}"#, r#"{"pyrrolidonyl": "PYR"}"#);
    let text = "Pyrrolidonyl arylamidase positive; CAMP negative";

    assert_eq!(p.parse(text), p.parse(text));
}

#[test]
fn test_symbol_tokens_need_word_boundaries() {
    let p = parser(r#"{"PYR": {}, "CAMP": {}}"#, "{}");

    let result = p.parse("PYR+ve, CAMP -");
    assert_eq!(result.parsed_fields.get("PYR"), Some(&Outcome::Positive));
    assert!(!result.parsed_fields.contains("CAMP"));
}
