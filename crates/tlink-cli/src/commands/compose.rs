//! Relation algebra commands: compose and inverse

use clap::Args;
use serde::Serialize;

use crate::output::{to_json, OutputFormat};
use crate::AppContext;
use tlink_core::RelationSet;

#[derive(Args)]
pub struct ComposeArgs {
    /// Relation from the first interval to the second (e.g. "< m")
    pub first: String,
    /// Relation from the second interval to the third
    pub second: String,
}

#[derive(Args)]
pub struct InverseArgs {
    /// Relation set (e.g. "d s f")
    pub relations: String,
}

#[derive(Serialize)]
struct ComposeOutput {
    first: RelationSet,
    second: RelationSet,
    composition: RelationSet,
}

#[derive(Serialize)]
struct InverseOutput {
    relations: RelationSet,
    inverse: RelationSet,
}

fn parse(text: &str) -> anyhow::Result<RelationSet> {
    let set: RelationSet = text.parse()?;
    if set.is_empty() {
        anyhow::bail!("Empty relation set: {:?}", text);
    }
    Ok(set)
}

pub fn run_compose(args: &ComposeArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let first = parse(&args.first)?;
    let second = parse(&args.second)?;
    let table = ctx.load_table()?;
    let composition = table.compose(first, second);

    tracing::info!("Composed [{}] with [{}]", first, second);

    match ctx.format {
        OutputFormat::Json => println!(
            "{}",
            to_json(&ComposeOutput {
                first,
                second,
                composition,
            })
        ),
        OutputFormat::Text => {
            println!("{}", composition.symbols());
            println!("  ({})", composition);
        }
    }
    Ok(())
}

pub fn run_inverse(args: &InverseArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let relations = parse(&args.relations)?;
    let inverse = relations.inverse();

    match ctx.format {
        OutputFormat::Json => println!("{}", to_json(&InverseOutput { relations, inverse })),
        OutputFormat::Text => {
            println!("{}", inverse.symbols());
            println!("  ({})", inverse);
        }
    }
    Ok(())
}
