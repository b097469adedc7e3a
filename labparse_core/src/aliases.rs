//! Alias table and alias expansion.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Mapping from alias (abbreviation, synonym) to canonical field name.
///
/// Many aliases may point at the same field; each alias points at one
/// field. Entries keep the order they were read in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct AliasMap {
    entries: Vec<(String, String)>,
}

impl AliasMap {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Map `alias` to `field`, replacing any earlier mapping for `alias`.
    pub fn insert(&mut self, alias: impl Into<String>, field: impl Into<String>) {
        let alias = alias.into();
        let field = field.into();
        match self.entries.iter_mut().find(|(a, _)| *a == alias) {
            Some(entry) => entry.1 = field,
            None => self.entries.push((alias, field)),
        }
    }

    /// Canonical field an alias resolves to.
    #[must_use]
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(a, _)| a == alias)
            .map(|(_, field)| field.as_str())
    }

    /// `(alias, field)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(a, f)| (a.as_str(), f.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Surface forms to search for `field`.
    ///
    /// Contains the field name itself plus every alias whose target equals
    /// `field` ignoring case, without duplicates, longest first. Equal
    /// lengths keep discovery order: the field name, then table order.
    #[must_use]
    pub fn aliases_for(&self, field: &str) -> Vec<String> {
        let target = field.to_lowercase();
        let mut forms = vec![field.to_string()];

        for (alias, canonical) in self.iter() {
            if canonical.to_lowercase() == target && !forms.iter().any(|f| f == alias) {
                forms.push(alias.to_string());
            }
        }

        forms.sort_by_key(|form| std::cmp::Reverse(form.chars().count()));
        forms
    }
}

impl<A, F> FromIterator<(A, F)> for AliasMap
where
    A: Into<String>,
    F: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (A, F)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (alias, field) in iter {
            map.insert(alias, field);
        }
        map
    }
}

impl From<Map<String, Value>> for AliasMap {
    fn from(map: Map<String, Value>) -> Self {
        let mut aliases = Self::new();
        for (alias, field) in map {
            match field {
                Value::String(field) => aliases.insert(alias, field),
                other => debug!(alias = %alias, value = %other, "Skipping non-string alias target"),
            }
        }
        aliases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_include_field_and_sort_longest_first() {
        let aliases: AliasMap = [
            ("opto", "Optochin"),
            ("optochin disk", "optochin"),
            ("bile sol", "Bile Solubility"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            aliases.aliases_for("Optochin"),
            vec!["optochin disk", "Optochin", "opto"]
        );
    }

    #[test]
    fn test_aliases_for_unaliased_field_is_just_the_field() {
        let aliases = AliasMap::new();
        assert_eq!(aliases.aliases_for("PYR"), vec!["PYR"]);
    }

    #[test]
    fn test_equal_length_keeps_discovery_order() {
        let aliases: AliasMap = [("pyrr", "PYR"), ("pyra", "PYR")].into_iter().collect();
        assert_eq!(aliases.aliases_for("PYR"), vec!["pyrr", "pyra", "PYR"]);
    }

    #[test]
    fn test_insert_replaces_existing_alias() {
        let mut aliases = AliasMap::new();
        aliases.insert("camp", "CAMP");
        aliases.insert("camp", "CAMP Test");
        assert_eq!(aliases.len(), 1);
        assert_eq!(aliases.get("camp"), Some("CAMP Test"));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_deserialize_skips_non_string_targets() {
        let aliases: AliasMap = serde_json::from_str(r#"{"alk gene": "ALK", "broken": 3}"#)
            .expect("alias object should parse");
        assert_eq!(aliases.len(), 1);
        assert_eq!(aliases.get("alk gene"), Some("ALK"));
    }
}
