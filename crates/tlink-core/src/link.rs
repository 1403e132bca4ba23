//! Link (directed constraint) between two nodes

use crate::node::Node;
use crate::relation::{BaseRelation, RelationSet};
use serde::{Deserialize, Serialize};

/// An asserted constraint: `source relation destination`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Source node
    pub source: Node,

    /// Destination node
    pub destination: Node,

    /// Relations that may hold from source to destination
    pub relation: RelationSet,
}

impl Link {
    /// Create a link constrained to `relation`
    pub fn new(source: Node, destination: Node, relation: impl Into<RelationSet>) -> Self {
        Self {
            source,
            destination,
            relation: relation.into(),
        }
    }

    /// Create a link that carries no information (every relation possible)
    pub fn unconstrained(source: Node, destination: Node) -> Self {
        Self::new(source, destination, RelationSet::ALL)
    }

    /// Create a link from a collection of base relations; `None` means [`RelationSet::ALL`]
    pub fn from_relations<I>(source: Node, destination: Node, relations: Option<I>) -> Self
    where
        I: IntoIterator<Item = BaseRelation>,
    {
        let relation = relations.map_or(RelationSet::ALL, RelationSet::combine);
        Self::new(source, destination, relation)
    }

    /// The same constraint seen from the destination
    pub fn reversed(&self) -> Self {
        Self {
            source: self.destination,
            destination: self.source,
            relation: self.relation.inverse(),
        }
    }
}
