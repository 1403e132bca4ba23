//! TimeML TLINK relation types
//!
//! Extraction pipelines usually emit TimeML relation types rather than Allen
//! relations; each maps onto a single base relation.

use crate::error::{Error, Result};
use crate::relation::{BaseRelation, RelationSet};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeMlRelation {
    Before,
    After,
    Includes,
    IsIncluded,
    During,
    DuringInv,
    Simultaneous,
    Iafter,
    Ibefore,
    Identity,
    Begins,
    Ends,
    BegunBy,
    EndedBy,
}

impl TimeMlRelation {
    pub const ALL: [TimeMlRelation; 14] = [
        Self::Before,
        Self::After,
        Self::Includes,
        Self::IsIncluded,
        Self::During,
        Self::DuringInv,
        Self::Simultaneous,
        Self::Iafter,
        Self::Ibefore,
        Self::Identity,
        Self::Begins,
        Self::Ends,
        Self::BegunBy,
        Self::EndedBy,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Before => "BEFORE",
            Self::After => "AFTER",
            Self::Includes => "INCLUDES",
            Self::IsIncluded => "IS_INCLUDED",
            Self::During => "DURING",
            Self::DuringInv => "DURING_INV",
            Self::Simultaneous => "SIMULTANEOUS",
            Self::Iafter => "IAFTER",
            Self::Ibefore => "IBEFORE",
            Self::Identity => "IDENTITY",
            Self::Begins => "BEGINS",
            Self::Ends => "ENDS",
            Self::BegunBy => "BEGUN_BY",
            Self::EndedBy => "ENDED_BY",
        }
    }

    /// The Allen relation this TLINK type denotes
    pub const fn to_base(self) -> BaseRelation {
        match self {
            Self::Before => BaseRelation::Before,
            Self::After => BaseRelation::After,
            Self::Includes | Self::DuringInv => BaseRelation::DuringBy,
            Self::IsIncluded | Self::During => BaseRelation::During,
            Self::Simultaneous | Self::Identity => BaseRelation::Equal,
            Self::Iafter => BaseRelation::MetBy,
            Self::Ibefore => BaseRelation::Meets,
            Self::Begins => BaseRelation::Starts,
            Self::Ends => BaseRelation::Finishes,
            Self::BegunBy => BaseRelation::StartedBy,
            Self::EndedBy => BaseRelation::FinishedBy,
        }
    }

    pub const fn to_relation_set(self) -> RelationSet {
        RelationSet::of(self.to_base())
    }
}

impl std::fmt::Display for TimeMlRelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive
impl FromStr for TimeMlRelation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|rel| rel.as_str() == upper)
            .ok_or_else(|| Error::UnknownTimeMl(s.to_string()))
    }
}

impl From<TimeMlRelation> for RelationSet {
    fn from(rel: TimeMlRelation) -> Self {
        rel.to_relation_set()
    }
}
