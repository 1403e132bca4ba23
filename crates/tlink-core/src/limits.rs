//! Input validation limits for assertion streams

use crate::relation::RelationSet;

/// Maximum length for event names (256 chars)
pub const MAX_EVENT_NAME_LEN: usize = 256;

/// Maximum assertions accepted from a single input (10000)
pub const MAX_ASSERTIONS: usize = 10_000;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyEventName,
    EmptyRelationSet,
    EventNameTooLong { len: usize, max: usize },
    TooManyAssertions { count: usize, max: usize },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyEventName => write!(f, "Event name cannot be empty"),
            Self::EmptyRelationSet => write!(f, "Asserted relation set cannot be empty"),
            Self::EventNameTooLong { len, max } => {
                write!(f, "Event name too long: {} chars (max {})", len, max)
            }
            Self::TooManyAssertions { count, max } => {
                write!(f, "Too many assertions: {} (max {})", count, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate event name
pub fn validate_event_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyEventName);
    }
    if name.len() > MAX_EVENT_NAME_LEN {
        return Err(ValidationError::EventNameTooLong {
            len: name.len(),
            max: MAX_EVENT_NAME_LEN,
        });
    }
    Ok(())
}

/// Validate an asserted relation set
pub fn validate_relation_set(relation: RelationSet) -> Result<(), ValidationError> {
    if relation.is_empty() {
        return Err(ValidationError::EmptyRelationSet);
    }
    Ok(())
}

/// Validate assertion count
pub fn validate_assertion_count(count: usize) -> Result<(), ValidationError> {
    if count > MAX_ASSERTIONS {
        return Err(ValidationError::TooManyAssertions {
            count,
            max: MAX_ASSERTIONS,
        });
    }
    Ok(())
}
