use std::num::ParseIntError;
use thiserror::Error;

/// Errors raised while compiling filter expressions or field selections
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Empty filter expression")]
    EmptyExpression,

    #[error("Missing filter for field in '{0}'")]
    MissingFieldMatch(String),

    #[error("Could not parse field index '{index}' in '{expression}': {source}")]
    InvalidFieldIndex {
        index: String,
        expression: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Invalid index in '{0}': 0 is the timestamp and cannot be filtered")]
    TimestampNotFilterable(String),

    #[error("Nothing to match in '{0}'")]
    EmptyMatch(String),

    #[error("Missing value to compare against in '{0}'")]
    EmptyOperand(String),

    #[error("Invalid field '{0}': expected an integer such as 0, 2 or -1")]
    InvalidFieldNumber(String),

    #[error("Invalid field range '{0}': expected ascending non-negative bounds such as 2-4")]
    InvalidFieldRange(String),
}
