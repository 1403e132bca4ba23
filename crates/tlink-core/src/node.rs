//! Node (interval variable) identity

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GENERATED: AtomicU64 = AtomicU64::new(0);

/// Opaque handle for one interval or time-point variable
///
/// Two nodes are equal iff they carry the same identity. Identities handed
/// out by [`Node::new`] come from a process-wide counter and live in their
/// own namespace, so they never collide with caller-chosen ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    /// Identity supplied by the caller
    Explicit(u64),
    /// Identity drawn from the sequential counter
    Generated(u64),
}

impl Node {
    /// A node with a fresh identity, distinct from every other node
    pub fn new() -> Self {
        Self::Generated(NEXT_GENERATED.fetch_add(1, Ordering::Relaxed))
    }

    /// A node with a caller-supplied identity
    pub fn with_id(id: u64) -> Self {
        Self::Explicit(id)
    }

    pub fn id(&self) -> u64 {
        match self {
            Self::Explicit(id) | Self::Generated(id) => *id,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explicit(id) => write!(f, "n{}", id),
            Self::Generated(id) => write!(f, "#{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_nodes_are_distinct() {
        let a = Node::new();
        let b = Node::new();
        assert_ne!(a, b);
        assert!(a.is_generated());
    }

    #[test]
    fn test_explicit_identity() {
        assert_eq!(Node::with_id(7), Node::with_id(7));
        assert_ne!(Node::with_id(7), Node::with_id(8));
        assert_eq!(Node::with_id(7).id(), 7);
    }

    #[test]
    fn test_namespaces_do_not_collide() {
        let generated = Node::new();
        assert_ne!(generated, Node::with_id(generated.id()));
    }
}
