use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractionError>;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to compile pattern for field {field:?} (alias {alias:?}): {source}")]
    Pattern {
        field: String,
        alias: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to read gold set: {0}")]
    GoldSet(#[from] serde_json::Error),
}
