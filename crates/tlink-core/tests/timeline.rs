//! End-to-end reconciliation of extracted relations into a timeline.

use std::sync::Arc;
use tlink_core::{Assertion, CompositionTable, ConstraintNetwork, EventIndex, RelationSet};

fn build(text: &str) -> (ConstraintNetwork, EventIndex, Result<usize, usize>) {
    let assertions = Assertion::parse_lines(text).unwrap();
    let mut index = EventIndex::new();
    let links: Vec<_> = assertions.iter().map(|a| index.link(a)).collect();

    let mut network = ConstraintNetwork::new(Arc::new(CompositionTable::canonical()));
    let added = network.add_all(links);
    (network, index, added)
}

#[test]
fn test_timeml_relations_reconcile() {
    let text = "\
# article timeline
arrived,meeting,IBEFORE
meeting,lunch,BEFORE
speech,meeting,IS_INCLUDED
";
    let (mut network, index, added) = build(text);
    assert_eq!(added, Ok(3));
    assert!(network.is_consistent());

    let arrived = index.get("arrived").unwrap();
    let lunch = index.get("lunch").unwrap();
    let speech = index.get("speech").unwrap();

    assert_eq!(network.edge(&arrived, &lunch), Some(RelationSet::BEFORE));
    assert_eq!(network.edge(&speech, &lunch), Some(RelationSet::BEFORE));
    assert_eq!(network.edge(&arrived, &speech), Some(RelationSet::BEFORE));
}

#[test]
fn test_contradiction_found_by_propagation() {
    let text = "\
a,b,<
b,c,< m
c,a,d
";
    let (mut network, _, added) = build(text);
    // Every assertion is locally fine
    assert_eq!(added, Ok(3));

    let contradiction = network.propagate().unwrap_err();
    assert_ne!(contradiction.source, contradiction.destination);
}

#[test]
fn test_contradiction_found_on_add() {
    let text = "\
a,b,BEFORE
b,a,BEFORE
";
    let (_, _, added) = build(text);
    assert_eq!(added, Err(1));
}

#[test]
fn test_shared_table_across_threads() {
    let table = Arc::new(CompositionTable::canonical());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let table = Arc::clone(&table);
            std::thread::spawn(move || {
                let assertions = Assertion::parse_lines("x,y,<\ny,z,<\n").unwrap();
                let mut index = EventIndex::new();
                let mut network = ConstraintNetwork::new(table);
                for assertion in &assertions {
                    network.add(index.link(assertion));
                }
                network.is_consistent()
                    && network.edge(&index.get("x").unwrap(), &index.get("z").unwrap())
                        == Some(RelationSet::BEFORE)
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
