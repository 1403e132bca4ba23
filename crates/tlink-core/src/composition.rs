//! Transitive composition table for base relations
//!
//! The table is configuration: it is read once from a flat text file of
//! `relation1,relation2,list-of-relations` records and never mutated
//! afterwards. Share it between networks with an `Arc`.

use crate::error::{Error, Result};
use crate::relation::{BaseRelation, RelationSet};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;
use std::str::FromStr;

/// The table for Allen's 13 base relations
const CANONICAL_TABLE: &str = include_str!("../data/transitive_table.txt");

const BASE_COUNT: usize = BaseRelation::ALL.len();

/// Immutable 13x13 mapping from a pair of base relations to the relation set
/// that holds transitively
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionTable {
    entries: [[RelationSet; BASE_COUNT]; BASE_COUNT],
}

impl CompositionTable {
    /// The composition table of Allen's interval algebra shipped with this crate
    pub fn canonical() -> Self {
        // Safe: the embedded table is complete and checked by the tests below
        Self::from_str(CANONICAL_TABLE).expect("embedded composition table must be valid")
    }

    /// Load a table from a file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!("Loading composition table from {:?}", path);
        let file = File::open(path)?;
        Self::load(BufReader::new(file))
    }

    /// Load a table from a stream of records
    ///
    /// Blank lines are skipped. Every one of the 169 pairs must be present;
    /// a later record for the same pair replaces the earlier one.
    pub fn load<R: BufRead>(reader: R) -> Result<Self> {
        tracing::info!("Start to store base composition constraints");

        let mut entries = [[RelationSet::EMPTY; BASE_COUNT]; BASE_COUNT];
        let mut seen = [[false; BASE_COUNT]; BASE_COUNT];

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            if line.trim().is_empty() {
                continue;
            }

            let (first, second, derived) = parse_record(line.trim_end(), line_no)?;
            let (i, j) = (first.index(), second.index());
            if seen[i][j] {
                tracing::warn!(
                    "Duplicate composition record for ({}, {}) on line {}",
                    first,
                    second,
                    line_no
                );
            }
            entries[i][j] = derived;
            seen[i][j] = true;
        }

        for first in BaseRelation::ALL {
            for second in BaseRelation::ALL {
                if !seen[first.index()][second.index()] {
                    return Err(Error::IncompleteTable(first, second));
                }
            }
        }

        tracing::info!("Finished storing base composition constraints");
        Ok(Self { entries })
    }

    /// Composition of two base relations
    pub fn get(&self, first: BaseRelation, second: BaseRelation) -> RelationSet {
        self.entries[first.index()][second.index()]
    }

    /// Number of stored entries with at least one relation
    pub fn len(&self) -> usize {
        self.entries().filter(|(_, _, set)| !set.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Base relations the table is keyed by, in canonical order
    pub fn base_relations(&self) -> [BaseRelation; BASE_COUNT] {
        BaseRelation::ALL
    }

    /// Every `(first, second, composition)` entry in canonical order
    pub fn entries(&self) -> impl Iterator<Item = (BaseRelation, BaseRelation, RelationSet)> + '_ {
        BaseRelation::ALL.into_iter().flat_map(move |first| {
            BaseRelation::ALL
                .into_iter()
                .map(move |second| (first, second, self.get(first, second)))
        })
    }

    /// Lift the base table to disjunctions: the union of `table[a][b]` over
    /// every `a` in `first` and `b` in `second`
    pub fn compose(&self, first: RelationSet, second: RelationSet) -> RelationSet {
        let mut derived = RelationSet::EMPTY;
        for a in first {
            for b in second {
                let step = self.get(a, b);
                tracing::trace!("{},{} => {}", a.name(), b.name(), step);
                derived |= step;
            }
        }
        derived
    }
}

impl FromStr for CompositionTable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::load(Cursor::new(s))
    }
}

fn parse_record(line: &str, line_no: usize) -> Result<(BaseRelation, BaseRelation, RelationSet)> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 3 {
        return Err(Error::MalformedRecord {
            line: line_no,
            reason: format!("expected 3 comma-separated fields, found {}", fields.len()),
        });
    }

    let first = parse_base(fields[0].trim(), line_no)?;
    let second = parse_base(fields[1].trim(), line_no)?;

    let mut derived = RelationSet::EMPTY;
    for symbol in fields[2].split_whitespace() {
        derived |= if symbol == "all" {
            RelationSet::ALL
        } else {
            RelationSet::of(parse_base(symbol, line_no)?)
        };
    }
    if derived.is_empty() {
        return Err(Error::MalformedRecord {
            line: line_no,
            reason: "empty list of relations".to_string(),
        });
    }

    Ok((first, second, derived))
}

fn parse_base(symbol: &str, line_no: usize) -> Result<BaseRelation> {
    symbol.parse().map_err(|_| Error::UnknownRelationAt {
        symbol: symbol.to_string(),
        line: line_no,
    })
}
