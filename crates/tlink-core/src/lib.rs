//! Tlink Core - Temporal constraint reasoning over Allen's interval algebra
//!
//! This crate provides the relation-set algebra, the composition table and
//! the constraint network that checks a set of asserted temporal relations
//! for path consistency.

pub mod assertion;
pub mod composition;
pub mod error;
pub mod limits;
pub mod link;
pub mod network;
pub mod node;
pub mod relation;
pub mod timeml;

pub use assertion::{Assertion, EventIndex};
pub use composition::CompositionTable;
pub use error::{Error, Result};
pub use link::Link;
pub use network::{make_pairs, ConstraintNetwork, Contradiction, PropagationStats};
pub use node::Node;
pub use relation::{BaseRelation, RelationSet};
pub use timeml::TimeMlRelation;
