//! Field schema for the extended parser.
//!
//! The schema is the ordered list of canonical field names this engine may
//! report. It is read from a JSON object whose keys are the field names; the
//! values carry metadata for other tools and are ignored here.
//!
//! Field order is the key order of the source object and is a contract:
//! fields are scanned in that order.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Fields owned by the core parser. The extended parser never reports them,
/// even when an extended schema lists them by mistake.
pub const CORE_FIELDS: &[&str] = &[
    "Genus",
    "Species",
    "Gram Stain",
    "Shape",
    "Colony Morphology",
    "Haemolysis",
    "Haemolysis Type",
    "Motility",
    "Capsule",
    "Spore Formation",
    "Growth Temperature",
    "Oxygen Requirement",
    "Media Grown On",
    "Catalase",
    "Oxidase",
    "Coagulase",
    "DNase",
    "Urease",
    "Citrate",
    "Methyl Red",
    "VP",
    "H2S",
    "ONPG",
    "Nitrate Reduction",
    "Lipase Test",
    "NaCl Tolerant (>=6%)",
    "Lysine Decarboxylase",
    "Ornitihine Decarboxylase",
    "Arginine dihydrolase",
    "Gelatin Hydrolysis",
    "Esculin Hydrolysis",
    "Glucose Fermentation",
    "Lactose Fermentation",
    "Sucrose Fermentation",
    "Mannitol Fermentation",
    "Sorbitol Fermentation",
    "Maltose Fermentation",
    "Xylose Fermentation",
    "Rhamnose Fermentation",
    "Arabinose Fermentation",
    "Raffinose Fermentation",
    "Trehalose Fermentation",
    "Inositol Fermentation",
];

/// Returns true if `field` belongs to the core schema (exact, case-sensitive).
#[must_use]
pub fn is_core_field(field: &str) -> bool {
    CORE_FIELDS.contains(&field)
}

/// Ordered set of canonical field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct FieldSchema {
    fields: Vec<String>,
}

impl FieldSchema {
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Build a schema from field names, keeping the first occurrence of
    /// each name.
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut schema = Self::new();
        for field in fields {
            schema.push(field);
        }
        schema
    }

    /// Append a field unless it is already present.
    pub fn push(&mut self, field: impl Into<String>) {
        let field = field.into();
        if !self.contains(&field) {
            self.fields.push(field);
        }
    }

    /// Field names in iteration order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for FieldSchema {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            fields: map.into_iter().map(|(field, _)| field).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_schema_keeps_file_key_order() {
        let json = r#"{"PYR": {"type": "enum"}, "CAMP": {}, "Bacitracin": {}, "ALK": {}}"#;
        let schema: FieldSchema = serde_json::from_str(json).expect("valid schema should parse");

        assert_eq!(schema.fields(), ["PYR", "CAMP", "Bacitracin", "ALK"]);
    }

    #[test]
    fn test_from_fields_dedupes() {
        let schema = FieldSchema::from_fields(["EGFR", "ALK", "EGFR"]);
        assert_eq!(schema.len(), 2);
        assert!(schema.contains("ALK"));
        assert!(!schema.contains("alk"));
    }

    #[test]
    fn test_core_field_lookup_is_exact() {
        assert!(is_core_field("Catalase"));
        assert!(is_core_field("NaCl Tolerant (>=6%)"));
        assert!(!is_core_field("catalase"));
        assert!(!is_core_field("Optochin"));
    }
}
