//! Qualitative value lexicon.
//!
//! Two fixed lexicons map raw result tokens onto the closed set of canonical
//! outcomes: a generic polarity lexicon (`+`, `neg`, `variable`, ...) and a
//! sensitivity lexicon used by disk-diffusion tests (`susceptible`,
//! `resistant`, ...). Neither is configurable.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Canonical qualitative outcome of a test.
///
/// `Other` carries a token that neither lexicon recognizes, kept verbatim
/// (trimmed, original case) so callers can still see what was written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    Positive,
    Negative,
    Variable,
    Unknown,
    Other(String),
}

impl Outcome {
    /// Returns the string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Variable => "Variable",
            Self::Unknown => "Unknown",
            Self::Other(raw) => raw,
        }
    }

    /// Whether this is one of `Positive`, `Negative` or `Variable`.
    #[must_use]
    pub const fn is_canonical(&self) -> bool {
        matches!(self, Self::Positive | Self::Negative | Self::Variable)
    }

    /// Look up a lower-cased token in the generic polarity lexicon.
    #[must_use]
    pub fn from_polarity_token(token: &str) -> Option<Self> {
        match token {
            "+" | "positive" | "pos" => Some(Self::Positive),
            "-" | "negative" | "neg" => Some(Self::Negative),
            "variable" | "var" => Some(Self::Variable),
            _ => None,
        }
    }

    /// Look up a lower-cased token in the sensitivity lexicon.
    #[must_use]
    pub fn from_sensitivity_token(token: &str) -> Option<Self> {
        match token {
            "sensitive" | "susceptible" => Some(Self::Positive),
            "resistant" | "insensitive" => Some(Self::Negative),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(normalize_value(s))
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Outcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.trim() {
            "Unknown" => Self::Unknown,
            other => normalize_value(other),
        })
    }
}

/// Normalize a raw matched token to its canonical outcome.
///
/// The token is trimmed and lower-cased, then looked up in the polarity
/// lexicon and afterwards the sensitivity lexicon. Unrecognized tokens pass
/// through as [`Outcome::Other`] holding the trimmed, case-preserved text.
#[must_use]
pub fn normalize_value(token: &str) -> Outcome {
    let trimmed = token.trim();
    let lowered = trimmed.to_lowercase();

    Outcome::from_polarity_token(&lowered)
        .or_else(|| Outcome::from_sensitivity_token(&lowered))
        .unwrap_or_else(|| Outcome::Other(trimmed.to_string()))
}

/// Like [`normalize_value`], but a missing token yields [`Outcome::Unknown`].
#[must_use]
pub fn normalize_optional(token: Option<&str>) -> Outcome {
    token.map_or(Outcome::Unknown, normalize_value)
}
