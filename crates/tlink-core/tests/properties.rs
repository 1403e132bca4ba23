//! Property-based tests for the relation algebra and propagation.
//!
//! Soundness is checked against concrete interval models: every relation
//! that actually holds between two intervals must survive propagation.

use proptest::prelude::*;

use std::sync::Arc;
use tlink_core::{BaseRelation, CompositionTable, ConstraintNetwork, Link, Node, RelationSet};

fn relation_set() -> impl Strategy<Value = RelationSet> {
    any::<u16>().prop_map(RelationSet::from_bits)
}

/// Allen relation between `[a1, a2)` and `[b1, b2)`
fn relation_between((a1, a2): (i32, i32), (b1, b2): (i32, i32)) -> BaseRelation {
    use BaseRelation::*;
    if a2 < b1 {
        Before
    } else if b2 < a1 {
        After
    } else if a2 == b1 {
        Meets
    } else if b2 == a1 {
        MetBy
    } else if a1 == b1 && a2 == b2 {
        Equal
    } else if a1 == b1 {
        if a2 < b2 { Starts } else { StartedBy }
    } else if a2 == b2 {
        if a1 > b1 { Finishes } else { FinishedBy }
    } else if b1 < a1 && a2 < b2 {
        During
    } else if a1 < b1 && b2 < a2 {
        DuringBy
    } else if a1 < b1 {
        Overlap
    } else {
        OverlapBy
    }
}

fn intervals() -> impl Strategy<Value = Vec<(i32, i32)>> {
    prop::collection::vec((0i32..12, 1i32..6), 3..7)
        .prop_map(|v| v.into_iter().map(|(start, len)| (start, start + len)).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn inverse_is_involution(r in relation_set()) {
        prop_assert_eq!(r.inverse().inverse(), r);
        prop_assert_eq!(r.inverse().len(), r.len());
    }

    #[test]
    fn intersect_commutative_and_idempotent(r in relation_set(), s in relation_set()) {
        prop_assert_eq!(r.intersect(s), s.intersect(r));
        prop_assert_eq!(r.intersect(r), r);
        prop_assert_eq!(r.intersect(s).is_empty(), r.iter().all(|rel| !s.contains(rel)));
    }

    #[test]
    fn compose_is_monotonic(a in relation_set(), extra in relation_set(), b in relation_set()) {
        let table = CompositionTable::canonical();
        let wider = a | extra;
        prop_assert!(table.compose(a, b).is_subset_of(table.compose(wider, b)));
        prop_assert!(table.compose(b, a).is_subset_of(table.compose(b, wider)));
    }

    #[test]
    fn compose_respects_converse(a in relation_set(), b in relation_set()) {
        let table = CompositionTable::canonical();
        prop_assert_eq!(
            table.compose(a, b).inverse(),
            table.compose(b.inverse(), a.inverse())
        );
    }

    #[test]
    fn display_lists_members_in_canonical_order(r in relation_set()) {
        let rendered = r.to_string();
        let names: Vec<&str> = if rendered.is_empty() {
            Vec::new()
        } else {
            rendered.split(',').collect()
        };
        let expected: Vec<&str> = r.iter().map(BaseRelation::name).collect();
        prop_assert_eq!(names, expected);
    }

    #[test]
    fn propagation_keeps_every_true_relation(
        model in intervals(),
        noise in prop::collection::vec(any::<u16>(), 64),
    ) {
        let table = Arc::new(CompositionTable::canonical());
        let mut network = ConstraintNetwork::new(table);
        let nodes: Vec<Node> = (0..model.len() as u64).map(Node::with_id).collect();

        let mut noise = noise.into_iter().cycle();
        for i in 0..model.len() {
            for j in (i + 1)..model.len() {
                let truth = RelationSet::of(relation_between(model[i], model[j]));
                let mask = noise.next().unwrap_or_default();
                // Leave roughly a third of the pairs unconstrained
                if mask % 3 == 0 {
                    continue;
                }
                let asserted = truth | RelationSet::from_bits(mask);
                prop_assert!(network.add(Link::new(nodes[i], nodes[j], asserted)));
            }
        }

        prop_assert!(network.is_consistent());

        for (i, &a) in nodes.iter().enumerate() {
            for (j, &b) in nodes.iter().enumerate() {
                if i == j || !network.contains(&a) || !network.contains(&b) {
                    continue;
                }
                let truth = relation_between(model[i], model[j]);
                let edge = network.edge(&a, &b).unwrap();
                prop_assert!(edge.contains(truth), "{} -> {}: {} missing from {}", a, b, truth, edge);
                prop_assert_eq!(network.edge(&b, &a), Some(edge.inverse()));
            }
        }
    }

    #[test]
    fn fully_specified_model_is_fixpoint(model in intervals()) {
        let mut network = ConstraintNetwork::default();
        let nodes: Vec<Node> = (0..model.len() as u64).map(Node::with_id).collect();

        for i in 0..model.len() {
            for j in 0..model.len() {
                if i != j {
                    let truth = RelationSet::of(relation_between(model[i], model[j]));
                    prop_assert!(network.add(Link::new(nodes[i], nodes[j], truth)));
                }
            }
        }

        let stats = network.propagate().unwrap();
        prop_assert_eq!(stats.edges_tightened, 0);
    }

    #[test]
    fn contradicting_add_is_rejected(r in relation_set(), mask in any::<u16>()) {
        let s = RelationSet::from_bits(mask & !r.bits());
        prop_assume!(!r.is_empty() && !s.is_empty());

        let i = Node::new();
        let j = Node::new();
        let mut network = ConstraintNetwork::default();
        prop_assert!(network.add(Link::new(i, j, r)));
        prop_assert!(!network.add(Link::new(i, j, s)));
        prop_assert_eq!(network.edge(&i, &j), Some(r));
    }
}
