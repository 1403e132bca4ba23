//! Composition table commands

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::output::{to_json, OutputFormat};
use crate::AppContext;
use tlink_core::{BaseRelation, RelationSet};

#[derive(Args)]
pub struct TableArgs {
    #[command(subcommand)]
    pub command: TableCommands,
}

#[derive(Subcommand)]
pub enum TableCommands {
    /// Load the configured table and report whether it is usable
    Validate,
    /// Print every entry of the configured table
    Show {
        /// Only entries whose first relation is this symbol
        #[arg(long)]
        first: Option<String>,
    },
}

#[derive(Serialize)]
struct TableEntry {
    first: BaseRelation,
    second: BaseRelation,
    composition: RelationSet,
}

pub fn run(args: &TableArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let table = ctx.load_table()?;

    match &args.command {
        TableCommands::Validate => match ctx.format {
            OutputFormat::Json => println!(
                "{}",
                to_json(&serde_json::json!({
                    "source": ctx.table_source(),
                    "entries": table.len(),
                }))
            ),
            OutputFormat::Text => println!(
                "Composition table OK: {} entries ({})",
                table.len(),
                ctx.table_source()
            ),
        },
        TableCommands::Show { first } => {
            let first: Option<BaseRelation> = first.as_deref().map(str::parse::<BaseRelation>).transpose()?;
            let entries: Vec<TableEntry> = table
                .entries()
                .filter(|(a, _, _)| first.map_or(true, |f| f == *a))
                .map(|(first, second, composition)| TableEntry {
                    first,
                    second,
                    composition,
                })
                .collect();

            match ctx.format {
                OutputFormat::Json => println!("{}", to_json(&entries)),
                OutputFormat::Text => {
                    for entry in &entries {
                        println!(
                            "{},{},{}",
                            entry.first,
                            entry.second,
                            entry.composition.symbols()
                        );
                    }
                }
            }
        }
    }
    Ok(())
}
