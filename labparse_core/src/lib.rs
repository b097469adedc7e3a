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
    clippy::missing_errors_doc,
    clippy::cast_precision_loss
)]

//! Extraction of extended lab test results from free text.
//!
//! Given an ordered field schema and an alias table, [`ExtendedParser`]
//! reports a canonical outcome (`Positive`, `Negative`, `Variable`) for every
//! field it finds mentioned next to a result token.

pub mod aliases;
mod error;
pub mod eval;
pub mod lexicon;
pub mod scanner;
pub mod schema;

pub use aliases::AliasMap;
pub use error::{ExtractionError, Result};
pub use eval::{CaseScore, EvalSummary, FieldStats, GoldCase, evaluate, parse_gold_set};
pub use lexicon::{Outcome, normalize_optional, normalize_value};
pub use scanner::{
    DEFAULT_MAX_GAP, ExtendedParser, ExtractionConfig, ExtractionResult, ParsedFields, SOURCE_TAG,
    parse_text_extended,
};
pub use schema::{CORE_FIELDS, FieldSchema, is_core_field};
