//! Error types for Tlink Core

use thiserror::Error;

use crate::relation::BaseRelation;

/// Result type alias using Tlink's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Tlink error types
///
/// Temporal contradictions are not errors; they surface as `false` from
/// [`ConstraintNetwork::add`](crate::ConstraintNetwork::add) or as a
/// [`Contradiction`](crate::Contradiction) from propagation.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown relation symbol: {0:?}")]
    UnknownRelation(String),

    #[error("Unknown relation symbol {symbol:?} on line {line}")]
    UnknownRelationAt { symbol: String, line: usize },

    #[error("Malformed composition record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Composition table is incomplete: no entry for ({0}, {1})")]
    IncompleteTable(BaseRelation, BaseRelation),

    #[error("Unknown TimeML relation type: {0}")]
    UnknownTimeMl(String),

    #[error("Malformed assertion on line {line}: {reason}")]
    MalformedAssertion { line: usize, reason: String },

    #[error("Validation error: {0}")]
    Validation(#[from] crate::limits::ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
