//! Extended field scanner.
//!
//! For every schema field the scanner searches the text for one of the
//! field's surface forms followed, within a bounded window on the same
//! sentence, by a qualitative value token. The first alias (longest first)
//! that matches decides the field's value.

use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::aliases::AliasMap;
use crate::error::{ExtractionError, Result};
use crate::lexicon::{Outcome, normalize_value};
use crate::schema::{CORE_FIELDS, FieldSchema};

/// Provenance tag attached to every result of this engine.
pub const SOURCE_TAG: &str = "extended_parser";

/// Maximum number of characters allowed between an alias and its value.
pub const DEFAULT_MAX_GAP: usize = 80;

/// Value tokens recognized after an alias.
const VALUE_TOKENS: &str = r"positive|negative|variable|\+|\-|susceptible|sensitive|resistant";

/// Configuration for the extraction engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Characters allowed between alias and value token (no newline, no period).
    #[serde(default = "ExtractionConfig::default_max_gap")]
    pub max_gap: usize,

    /// Fields never reported, even when the schema lists them.
    #[serde(default = "ExtractionConfig::default_excluded_fields")]
    pub excluded_fields: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_gap: Self::default_max_gap(),
            excluded_fields: Self::default_excluded_fields(),
        }
    }
}

impl ExtractionConfig {
    const fn default_max_gap() -> usize {
        DEFAULT_MAX_GAP
    }

    fn default_excluded_fields() -> Vec<String> {
        CORE_FIELDS.iter().map(ToString::to_string).collect()
    }

    /// Same gap, but no exclusions.
    #[must_use]
    pub fn without_exclusions(mut self) -> Self {
        self.excluded_fields.clear();
        self
    }

    #[must_use]
    pub fn with_max_gap(mut self, max_gap: usize) -> Self {
        self.max_gap = max_gap;
        self
    }

    fn excludes(&self, field: &str) -> bool {
        self.excluded_fields.iter().any(|f| f == field)
    }
}

/// Field name → outcome, in the order fields were scanned.
///
/// Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFields {
    entries: Vec<(String, Outcome)>,
}

impl ParsedFields {
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Outcome> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, outcome)| outcome)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Outcome)> {
        self.entries.iter().map(|(f, o)| (f.as_str(), o))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a value unless the field already has one.
    fn record(&mut self, field: &str, outcome: Outcome) {
        if !self.contains(field) {
            self.entries.push((field.to_string(), outcome));
        }
    }
}

impl Serialize for ParsedFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, outcome) in &self.entries {
            map.serialize_entry(field, outcome)?;
        }
        map.end()
    }
}

/// Output of one extraction call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    pub parsed_fields: ParsedFields,
    pub source: &'static str,
}

impl ExtractionResult {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            parsed_fields: ParsedFields::default(),
            source: SOURCE_TAG,
        }
    }
}

/// Compiled patterns for one field, longest alias first.
#[derive(Debug)]
struct FieldMatcher {
    field: String,
    patterns: Vec<(String, Regex)>,
}

impl FieldMatcher {
    fn build(field: &str, aliases: &AliasMap, max_gap: usize) -> Result<Self> {
        let patterns = aliases
            .aliases_for(field)
            .into_iter()
            .filter(|alias| !alias.trim().is_empty())
            .map(|alias| {
                let re = Regex::new(&alias_pattern(&alias, max_gap)).map_err(|source| {
                    ExtractionError::Pattern {
                        field: field.to_string(),
                        alias: alias.clone(),
                        source,
                    }
                })?;
                Ok((alias, re))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            field: field.to_string(),
            patterns,
        })
    }

    /// Value of the first alias whose pattern matches.
    fn find(&self, text: &str) -> Option<Outcome> {
        self.patterns.iter().find_map(|(alias, re)| {
            let token = re.captures(text)?.get(1)?.as_str();
            let outcome = normalize_value(token);
            debug!(field = %self.field, alias = %alias, token, value = %outcome, "Matched field");
            Some(outcome)
        })
    }
}

/// Regex for `alias`, a gap of at most `max_gap` characters without line
/// breaks or periods, and a value token. Both ends are word-bounded.
fn alias_pattern(alias: &str, max_gap: usize) -> String {
    format!(
        r"(?i)\b{}\b[^.\n]{{0,{max_gap}}}?\b({VALUE_TOKENS})\b",
        regex::escape(alias)
    )
}

/// Extraction engine for extended test fields.
///
/// Built once from the schema and alias table; `parse` is a pure function
/// of its input text.
#[derive(Debug)]
pub struct ExtendedParser {
    matchers: Vec<FieldMatcher>,
    config: ExtractionConfig,
}

impl ExtendedParser {
    /// Create a new engine.
    ///
    /// # Errors
    /// Returns an error if an alias pattern fails to compile.
    pub fn new(schema: &FieldSchema, aliases: &AliasMap, config: ExtractionConfig) -> Result<Self> {
        let mut matchers = Vec::with_capacity(schema.len());

        for field in schema.iter() {
            if config.excludes(field) {
                debug!(field, "Skipping excluded field");
                continue;
            }
            matchers.push(FieldMatcher::build(field, aliases, config.max_gap)?);
        }

        Ok(Self { matchers, config })
    }

    /// Create an engine with the default gap and core-field exclusions.
    ///
    /// # Errors
    /// Returns an error if an alias pattern fails to compile.
    pub fn with_defaults(schema: &FieldSchema, aliases: &AliasMap) -> Result<Self> {
        Self::new(schema, aliases, ExtractionConfig::default())
    }

    #[must_use]
    pub const fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Fields this engine scans for, in scan order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.matchers.iter().map(|m| m.field.as_str())
    }

    /// Extract field values from `text`.
    #[must_use]
    pub fn parse(&self, text: &str) -> ExtractionResult {
        let mut parsed_fields = ParsedFields::default();

        for matcher in &self.matchers {
            if let Some(outcome) = matcher.find(text) {
                parsed_fields.record(&matcher.field, outcome);
            }
        }

        ExtractionResult {
            parsed_fields,
            source: SOURCE_TAG,
        }
    }

    /// Like [`parse`](Self::parse); missing text is treated as empty.
    #[must_use]
    pub fn parse_opt(&self, text: Option<&str>) -> ExtractionResult {
        self.parse(text.unwrap_or_default())
    }
}

/// Build an engine with defaults and run it once.
///
/// # Errors
/// Returns an error if an alias pattern fails to compile.
pub fn parse_text_extended(
    text: &str,
    schema: &FieldSchema,
    aliases: &AliasMap,
) -> Result<ExtractionResult> {
    Ok(ExtendedParser::with_defaults(schema, aliases)?.parse(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn parser(fields: &[&str], aliases: &[(&str, &str)]) -> ExtendedParser {
        let schema = FieldSchema::from_fields(fields.iter().copied());
        let aliases: AliasMap = aliases.iter().copied().collect();
        ExtendedParser::with_defaults(&schema, &aliases).expect("patterns should compile")
    }

    #[test]
    fn test_alias_pattern_shape() {
        assert_eq!(
            alias_pattern("alk gene", 80),
            r"(?i)\balk gene\b[^.\n]{0,80}?\b(positive|negative|variable|\+|\-|susceptible|sensitive|resistant)\b"
        );
    }

    #[test]
    fn test_field_matched_case_insensitively() {
        let p = parser(&["PYR"], &[]);
        let result = p.parse("pyr test was POSITIVE");
        assert_eq!(result.parsed_fields.get("PYR"), Some(&Outcome::Positive));
    }

    #[test]
    fn test_alias_inside_word_does_not_match() {
        let p = parser(&["CAMP"], &[]);
        assert!(p.parse("campylobacter negative").parsed_fields.is_empty());
    }

    #[test]
    fn test_value_inside_word_does_not_match() {
        let p = parser(&["Optochin"], &[]);
        assert!(p.parse("Optochin nonsensitive").parsed_fields.is_empty());
    }

    #[test]
    fn test_longest_alias_tried_first() {
        let p = parser(
            &["Bile Solubility"],
            &[
                ("bile", "Bile Solubility"),
                ("bile solubility test", "Bile Solubility"),
            ],
        );
        // "bile" alone would pair with "negative"; the longer alias wins first.
        let result = p.parse("bile esculin negative; bile solubility test positive");
        assert_eq!(
            result.parsed_fields.get("Bile Solubility"),
            Some(&Outcome::Positive)
        );
    }

    #[test]
    fn test_excluded_core_field_is_not_scanned() {
        let p = parser(&["Catalase", "CAMP"], &[]);
        let result = p.parse("Catalase positive, CAMP negative");

        assert!(!result.parsed_fields.contains("Catalase"));
        assert_eq!(result.parsed_fields.get("CAMP"), Some(&Outcome::Negative));
        assert_eq!(p.fields().collect::<Vec<_>>(), vec!["CAMP"]);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_exclusions_can_be_cleared() {
        let schema = FieldSchema::from_fields(["Catalase"]);
        let config = ExtractionConfig::default().without_exclusions();
        let p = ExtendedParser::new(&schema, &AliasMap::new(), config)
            .expect("patterns should compile");

        assert_eq!(
            p.parse("Catalase positive").parsed_fields.get("Catalase"),
            Some(&Outcome::Positive)
        );
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_custom_gap() {
        let schema = FieldSchema::from_fields(["PYR"]);
        let config = ExtractionConfig::default().with_max_gap(5);
        let p = ExtendedParser::new(&schema, &AliasMap::new(), config)
            .expect("patterns should compile");

        assert!(p.parse("PYR was clearly positive").parsed_fields.is_empty());
        assert!(p.parse("PYR is positive").parsed_fields.contains("PYR"));
    }

    #[test]
    fn test_parse_opt_none_is_empty() {
        let p = parser(&["PYR"], &[]);
        assert_eq!(p.parse_opt(None), ExtractionResult::empty());
    }
}
