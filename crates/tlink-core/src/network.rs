//! Constraint network and path-consistency propagation

use crate::composition::CompositionTable;
use crate::link::Link;
use crate::node::Node;
use crate::relation::RelationSet;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

/// Statistics from one propagation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropagationStats {
    /// Unordered pairs queued before the first step
    pub initial_pairs: usize,
    /// Pairs taken off the worklist
    pub pairs_processed: usize,
    /// Edge tightenings (each removes at least one base relation)
    pub edges_tightened: usize,
}

/// An edge that collapsed to [`RelationSet::EMPTY`] during propagation
///
/// `source -> destination` could not be satisfied together with the path
/// `source -> via -> destination`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contradiction {
    pub source: Node,
    pub destination: Node,
    pub via: Node,
}

impl std::fmt::Display for Contradiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "no relation from {} to {} is compatible with the path through {}",
            self.source, self.destination, self.via
        )
    }
}

/// Graph of interval variables with the tightest known relation for every
/// ordered pair
///
/// Nodes are kept in an arena; edges live in a dense row-per-node matrix
/// indexed by arena position. `edge(a, b) == edge(b, a).inverse()` holds for
/// every pair between mutations.
#[derive(Debug, Clone)]
pub struct ConstraintNetwork {
    table: Arc<CompositionTable>,
    nodes: Vec<Node>,
    index: HashMap<Node, usize>,
    edges: Vec<Vec<RelationSet>>,
}

impl ConstraintNetwork {
    /// Create an empty network that composes with `table`
    pub fn new(table: Arc<CompositionTable>) -> Self {
        Self {
            table,
            nodes: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
        }
    }

    pub fn table(&self) -> &Arc<CompositionTable> {
        &self.table
    }

    /// Known nodes in order of first appearance
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node: &Node) -> bool {
        self.index.contains_key(node)
    }

    /// Current relation from `source` to `destination`, if both are known
    pub fn edge(&self, source: &Node, destination: &Node) -> Option<RelationSet> {
        let i = *self.index.get(source)?;
        let j = *self.index.get(destination)?;
        Some(self.edges[i][j])
    }

    /// Every ordered pair of distinct known nodes with its relation
    pub fn edges(&self) -> impl Iterator<Item = (Node, Node, RelationSet)> + '_ {
        self.nodes.iter().enumerate().flat_map(move |(i, &source)| {
            self.nodes
                .iter()
                .enumerate()
                .filter(move |(j, _)| *j != i)
                .map(move |(j, &destination)| (source, destination, self.edges[i][j]))
        })
    }

    /// Intersect the stored relation between the link's endpoints with the
    /// link's relation (and its inverse in the other direction)
    ///
    /// Endpoints seen for the first time are registered with unconstrained
    /// edges to every known node. Returns `false` if the asserted relation
    /// shares nothing with what is already stored; in that case no edge is
    /// modified, although newly seen endpoints stay registered.
    pub fn add(&mut self, link: Link) -> bool {
        let src = self.register(link.source);
        let dst = self.register(link.destination);

        let forward = self.edges[src][dst] & link.relation;
        let backward = self.edges[dst][src] & link.relation.inverse();

        if forward.is_empty() || backward.is_empty() {
            tracing::debug!(
                "Rejected {} -[{}]-> {}: stored relation is {}",
                link.source,
                link.relation,
                link.destination,
                self.edges[src][dst]
            );
            return false;
        }

        self.edges[src][dst] = forward;
        self.edges[dst][src] = backward;
        true
    }

    /// Add links in order, stopping at the first one [`add`](Self::add) rejects
    ///
    /// Returns the number of links added, or the position of the rejected link.
    pub fn add_all<I>(&mut self, links: I) -> Result<usize, usize>
    where
        I: IntoIterator<Item = Link>,
    {
        let mut added = 0;
        for (pos, link) in links.into_iter().enumerate() {
            if !self.add(link) {
                return Err(pos);
            }
            added += 1;
        }
        Ok(added)
    }

    /// Run path-consistency propagation and report whether it succeeded
    pub fn is_consistent(&mut self) -> bool {
        match self.propagate() {
            Ok(stats) => {
                tracing::debug!(
                    "Network of {} nodes is path-consistent ({} pairs processed, {} edges tightened)",
                    self.nodes.len(),
                    stats.pairs_processed,
                    stats.edges_tightened
                );
                true
            }
            Err(contradiction) => {
                tracing::debug!("Network is inconsistent: {}", contradiction);
                false
            }
        }
    }

    /// Tighten every edge until all triangles are consistent under composition
    ///
    /// On success every stored relation is the path-consistent closure of the
    /// input. On failure the collapsed edge is left [`RelationSet::EMPTY`] and
    /// the network should be discarded.
    pub fn propagate(&mut self) -> Result<PropagationStats, Contradiction> {
        let n = self.nodes.len();
        let mut queue: VecDeque<(usize, usize)> = VecDeque::new();
        let mut queued: HashSet<(usize, usize)> = HashSet::new();

        for i in 0..n {
            for j in (i + 1)..n {
                queue.push_back((i, j));
                queued.insert((i, j));
            }
        }

        let mut stats = PropagationStats {
            initial_pairs: queue.len(),
            ..Default::default()
        };

        while let Some((i, j)) = queue.pop_front() {
            queued.remove(&(i, j));
            stats.pairs_processed += 1;

            for k in 0..n {
                if k == i || k == j {
                    continue;
                }

                if self.revise(k, i, j)? {
                    stats.edges_tightened += 1;
                    enqueue(&mut queue, &mut queued, k, j);
                }

                if self.revise(k, j, i)? {
                    stats.edges_tightened += 1;
                    enqueue(&mut queue, &mut queued, k, i);
                }
            }
        }

        Ok(stats)
    }

    /// Tighten `edge(k, target)` with `edge(k, via) ∘ edge(via, target)`;
    /// returns whether the edge changed
    fn revise(&mut self, k: usize, via: usize, target: usize) -> Result<bool, Contradiction> {
        let candidate = self
            .table
            .compose(self.edges[k][via], self.edges[via][target]);
        let existing = self.edges[k][target];
        let tightened = existing & candidate;

        if tightened == existing {
            return Ok(false);
        }

        tracing::trace!(
            "{} -> {} tightened from [{}] to [{}] via {}",
            self.nodes[k],
            self.nodes[target],
            existing,
            tightened,
            self.nodes[via]
        );

        self.edges[k][target] = tightened;
        self.edges[target][k] = tightened.inverse();

        if tightened.is_empty() {
            return Err(Contradiction {
                source: self.nodes[k],
                destination: self.nodes[target],
                via: self.nodes[via],
            });
        }
        Ok(true)
    }

    /// Position of `node` in the arena, registering it with unconstrained
    /// edges to every known node on first sight
    fn register(&mut self, node: Node) -> usize {
        if let Some(&idx) = self.index.get(&node) {
            return idx;
        }

        let idx = self.nodes.len();
        for row in &mut self.edges {
            row.push(RelationSet::ALL);
        }
        let mut row = vec![RelationSet::ALL; idx + 1];
        row[idx] = RelationSet::EQUAL;
        self.edges.push(row);
        self.nodes.push(node);
        self.index.insert(node, idx);

        tracing::debug!("Registered node {} ({} known)", node, self.nodes.len());
        idx
    }
}

impl Default for ConstraintNetwork {
    fn default() -> Self {
        Self::new(Arc::new(CompositionTable::canonical()))
    }
}

fn enqueue(
    queue: &mut VecDeque<(usize, usize)>,
    queued: &mut HashSet<(usize, usize)>,
    a: usize,
    b: usize,
) {
    let pair = (a.min(b), a.max(b));
    if queued.insert(pair) {
        queue.push_back(pair);
    }
}

/// Every unordered pair of distinct nodes, each exactly once
///
/// Repeated nodes in the input are ignored.
pub fn make_pairs(nodes: &[Node]) -> Vec<(Node, Node)> {
    let mut seen = HashSet::new();
    let unique: Vec<Node> = nodes.iter().copied().filter(|n| seen.insert(*n)).collect();

    let mut pairs = Vec::with_capacity(unique.len() * unique.len().saturating_sub(1) / 2);
    for (i, &a) in unique.iter().enumerate() {
        for &b in &unique[i + 1..] {
            pairs.push((a, b));
        }
    }
    pairs
}
