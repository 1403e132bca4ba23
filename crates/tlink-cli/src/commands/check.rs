//! Check command: load assertions, propagate, print the closure

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use crate::output::{to_json, OutputFormat};
use crate::AppContext;
use tlink_core::{Assertion, ConstraintNetwork, EventIndex, Node, PropagationStats, RelationSet};

#[derive(Args)]
pub struct CheckArgs {
    /// Assertion file (`-` for stdin)
    pub file: PathBuf,

    /// Read the input as a JSON array instead of `source,target,relations` lines
    #[arg(long)]
    pub json_input: bool,

    /// Also list pairs that remain unconstrained
    #[arg(long)]
    pub all: bool,
}

/// Relation between two events after propagation
#[derive(Debug, Serialize)]
pub struct PairReport {
    pub source: String,
    pub target: String,
    pub relations: RelationSet,
}

/// Assertion refused because it contradicts earlier ones
#[derive(Debug, Serialize)]
pub struct RejectedReport {
    /// 1-based position in the input
    pub position: usize,
    pub assertion: Assertion,
    pub stored: RelationSet,
}

/// Edge emptied during propagation
#[derive(Debug, Serialize)]
pub struct ContradictionReport {
    pub source: String,
    pub target: String,
    pub via: String,
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub consistent: bool,
    pub events: usize,
    pub assertions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected: Option<RejectedReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contradiction: Option<ContradictionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<PropagationStats>,
    pub relations: Vec<PairReport>,
}

fn read_input(file: &Path) -> anyhow::Result<String> {
    if file.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

/// Returns whether the assertions are consistent
pub fn run(args: &CheckArgs, ctx: &AppContext) -> anyhow::Result<bool> {
    let text = read_input(&args.file)?;
    let assertions = if args.json_input {
        Assertion::from_json(&text)?
    } else {
        Assertion::parse_lines(&text)?
    };
    tracing::info!("Loaded {} assertions from {}", assertions.len(), args.file.display());

    let report = evaluate(&assertions, ctx, args.all)?;

    match ctx.format {
        OutputFormat::Json => println!("{}", to_json(&report)),
        OutputFormat::Text => print_text(&report),
    }

    Ok(report.consistent)
}

fn evaluate(assertions: &[Assertion], ctx: &AppContext, all: bool) -> anyhow::Result<CheckReport> {
    let mut network = ConstraintNetwork::new(ctx.load_table()?);
    let mut index = EventIndex::new();

    let mut report = CheckReport {
        consistent: false,
        events: 0,
        assertions: assertions.len(),
        rejected: None,
        contradiction: None,
        stats: None,
        relations: Vec::new(),
    };

    for (pos, assertion) in assertions.iter().enumerate() {
        let link = index.link(assertion);
        if !network.add(link) {
            let stored = network
                .edge(&link.source, &link.destination)
                .unwrap_or(RelationSet::ALL);
            report.events = index.len();
            report.rejected = Some(RejectedReport {
                position: pos + 1,
                assertion: assertion.clone(),
                stored,
            });
            return Ok(report);
        }
    }
    report.events = index.len();

    match network.propagate() {
        Ok(stats) => {
            report.consistent = true;
            report.stats = Some(stats);
        }
        Err(contradiction) => {
            let name = |node: Node| index.name(&node).unwrap_or("?").to_string();
            report.contradiction = Some(ContradictionReport {
                source: name(contradiction.source),
                target: name(contradiction.destination),
                via: name(contradiction.via),
            });
            return Ok(report);
        }
    }

    let nodes = network.nodes();
    for (i, source) in nodes.iter().enumerate() {
        for target in &nodes[i + 1..] {
            let Some(relations) = network.edge(source, target) else {
                continue;
            };
            if relations.is_all() && !all {
                continue;
            }
            report.relations.push(PairReport {
                source: index.name(source).unwrap_or("?").to_string(),
                target: index.name(target).unwrap_or("?").to_string(),
                relations,
            });
        }
    }

    Ok(report)
}

fn print_text(report: &CheckReport) {
    if let Some(rejected) = &report.rejected {
        let a = &rejected.assertion;
        println!(
            "Inconsistent: assertion {} ({} -[{}]-> {}) contradicts earlier assertions",
            rejected.position, a.source, a.relation, a.target
        );
        println!("  already known: {} -[{}]-> {}", a.source, rejected.stored, a.target);
        return;
    }

    if let Some(c) = &report.contradiction {
        println!(
            "Inconsistent: no relation from {} to {} fits the path through {}",
            c.source, c.target, c.via
        );
        return;
    }

    println!(
        "Consistent: {} events, {} assertions",
        report.events, report.assertions
    );
    if let Some(stats) = &report.stats {
        println!(
            "  Processed {} pairs, tightened {} edges",
            stats.pairs_processed, stats.edges_tightened
        );
    }
    for pair in &report.relations {
        println!("  {} -[{}]-> {}", pair.source, pair.relations, pair.target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> AppContext {
        AppContext {
            format: OutputFormat::Text,
            table_path: None,
        }
    }

    #[test]
    fn test_evaluate_closure() {
        let assertions = Assertion::parse_lines("a,b,<\nb,c,<\n").unwrap();
        let report = evaluate(&assertions, &ctx(), false).unwrap();

        assert!(report.consistent);
        assert_eq!(report.events, 3);
        let ac = report
            .relations
            .iter()
            .find(|p| p.source == "a" && p.target == "c")
            .unwrap();
        assert_eq!(ac.relations, RelationSet::BEFORE);
    }

    #[test]
    fn test_evaluate_rejected() {
        let assertions = Assertion::parse_lines("a,b,<\nb,a,<\n").unwrap();
        let report = evaluate(&assertions, &ctx(), false).unwrap();

        assert!(!report.consistent);
        let rejected = report.rejected.unwrap();
        assert_eq!(rejected.position, 2);
        assert_eq!(rejected.stored, RelationSet::AFTER);
    }

    #[test]
    fn test_evaluate_contradiction() {
        let assertions = Assertion::parse_lines("a,b,<\nb,c,<\nc,a,<\n").unwrap();
        let report = evaluate(&assertions, &ctx(), false).unwrap();

        assert!(!report.consistent);
        assert!(report.contradiction.is_some());
        assert!(report.relations.is_empty());
    }

    #[test]
    fn test_unconstrained_pairs_hidden_by_default() {
        let assertions = Assertion::parse_lines("a,b,<\nc,d,>\n").unwrap();

        let report = evaluate(&assertions, &ctx(), false).unwrap();
        assert_eq!(report.relations.len(), 2);

        let report = evaluate(&assertions, &ctx(), true).unwrap();
        assert_eq!(report.relations.len(), 6);
    }
}
