//! Asserted relations between named events
//!
//! Upstream extractors emit relations between events they know by name.
//! [`EventIndex`] turns those names into [`Node`]s so the assertions can be
//! fed to a [`ConstraintNetwork`](crate::ConstraintNetwork).

use crate::error::{Error, Result};
use crate::limits::{validate_assertion_count, validate_event_name, validate_relation_set};
use crate::link::Link;
use crate::node::Node;
use crate::relation::RelationSet;
use crate::timeml::TimeMlRelation;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `source relation target` between two named events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assertion {
    pub source: String,
    pub target: String,
    #[serde(rename = "relations")]
    pub relation: RelationSet,
}

impl Assertion {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        relation: impl Into<RelationSet>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relation: relation.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_event_name(&self.source)?;
        validate_event_name(&self.target)?;
        validate_relation_set(self.relation)?;
        Ok(())
    }

    /// Parse one `source,target,relations` line
    ///
    /// `relations` is either a space-separated list of Allen symbols or a
    /// TimeML relation type. Blank lines and `#` comments yield `None`.
    pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let fields: Vec<&str> = line.splitn(3, ',').map(str::trim).collect();
        if fields.len() != 3 {
            return Err(Error::MalformedAssertion {
                line: line_no,
                reason: "expected source,target,relations".to_string(),
            });
        }

        let relation = parse_relation(fields[2]).ok_or_else(|| Error::MalformedAssertion {
            line: line_no,
            reason: format!("unrecognized relation {:?}", fields[2]),
        })?;

        let assertion = Self::new(fields[0], fields[1], relation);
        assertion.validate().map_err(|err| Error::MalformedAssertion {
            line: line_no,
            reason: err.to_string(),
        })?;
        Ok(Some(assertion))
    }

    /// Parse every line of a text input
    pub fn parse_lines(text: &str) -> Result<Vec<Self>> {
        let mut assertions = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            if let Some(assertion) = Self::parse_line(line, idx + 1)? {
                assertions.push(assertion);
            }
        }
        validate_assertion_count(assertions.len())?;
        Ok(assertions)
    }

    /// Parse a JSON array of assertions
    pub fn from_json(text: &str) -> Result<Vec<Self>> {
        let assertions: Vec<Self> = serde_json::from_str(text)?;
        validate_assertion_count(assertions.len())?;
        for assertion in &assertions {
            assertion.validate()?;
        }
        Ok(assertions)
    }
}

fn parse_relation(field: &str) -> Option<RelationSet> {
    if let Ok(set) = field.parse::<RelationSet>() {
        if !set.is_empty() {
            return Some(set);
        }
    }
    field.parse::<TimeMlRelation>().ok().map(RelationSet::from)
}

/// Stable mapping from event names to nodes, in order of first appearance
#[derive(Debug, Clone, Default)]
pub struct EventIndex {
    nodes: HashMap<String, Node>,
    names: Vec<String>,
}

impl EventIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node for `name`, allocating the next identity on first sight
    pub fn node(&mut self, name: &str) -> Node {
        if let Some(&node) = self.nodes.get(name) {
            return node;
        }
        let node = Node::with_id(self.names.len() as u64);
        self.nodes.insert(name.to_string(), node);
        self.names.push(name.to_string());
        node
    }

    pub fn get(&self, name: &str) -> Option<Node> {
        self.nodes.get(name).copied()
    }

    /// Name of a node allocated by this index
    pub fn name(&self, node: &Node) -> Option<&str> {
        match node {
            Node::Explicit(id) => self.names.get(*id as usize).map(String::as_str),
            Node::Generated(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Link equivalent of an assertion
    pub fn link(&mut self, assertion: &Assertion) -> Link {
        let source = self.node(&assertion.source);
        let target = self.node(&assertion.target);
        Link::new(source, target, assertion.relation)
    }
}
