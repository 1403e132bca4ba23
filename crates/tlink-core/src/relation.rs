//! Base relations of Allen's interval algebra and disjunctive relation sets

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};
use std::str::FromStr;

/// One of the 13 elementary relations between two intervals
///
/// Variants are declared in canonical order; that order fixes bit positions,
/// iteration order and rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BaseRelation {
    #[serde(rename = "<")]
    Before,
    #[serde(rename = ">")]
    After,
    #[serde(rename = "d")]
    During,
    #[serde(rename = "di")]
    DuringBy,
    #[serde(rename = "o")]
    Overlap,
    #[serde(rename = "oi")]
    OverlapBy,
    #[serde(rename = "s")]
    Starts,
    #[serde(rename = "si")]
    StartedBy,
    #[serde(rename = "f")]
    Finishes,
    #[serde(rename = "fi")]
    FinishedBy,
    #[serde(rename = "m")]
    Meets,
    #[serde(rename = "mi")]
    MetBy,
    #[serde(rename = "=")]
    Equal,
}

impl BaseRelation {
    /// All base relations in canonical order
    pub const ALL: [BaseRelation; 13] = [
        Self::Before,
        Self::After,
        Self::During,
        Self::DuringBy,
        Self::Overlap,
        Self::OverlapBy,
        Self::Starts,
        Self::StartedBy,
        Self::Finishes,
        Self::FinishedBy,
        Self::Meets,
        Self::MetBy,
        Self::Equal,
    ];

    /// Position in canonical order (0..13)
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Singleton bit of this relation
    pub const fn bit(self) -> u16 {
        1 << (self as u16)
    }

    /// Symbol used in composition table files
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Before => "<",
            Self::After => ">",
            Self::During => "d",
            Self::DuringBy => "di",
            Self::Overlap => "o",
            Self::OverlapBy => "oi",
            Self::Starts => "s",
            Self::StartedBy => "si",
            Self::Finishes => "f",
            Self::FinishedBy => "fi",
            Self::Meets => "m",
            Self::MetBy => "mi",
            Self::Equal => "=",
        }
    }

    /// Human-readable name for diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
            Self::During => "during",
            Self::DuringBy => "during_by",
            Self::Overlap => "overlap",
            Self::OverlapBy => "overlap_by",
            Self::Starts => "starts",
            Self::StartedBy => "started_by",
            Self::Finishes => "finishes",
            Self::FinishedBy => "finished_by",
            Self::Meets => "meets",
            Self::MetBy => "met_by",
            Self::Equal => "equal",
        }
    }

    /// The converse relation: if `a r b` then `b r.inverse() a`
    pub const fn inverse(self) -> Self {
        match self {
            Self::Before => Self::After,
            Self::After => Self::Before,
            Self::During => Self::DuringBy,
            Self::DuringBy => Self::During,
            Self::Overlap => Self::OverlapBy,
            Self::OverlapBy => Self::Overlap,
            Self::Starts => Self::StartedBy,
            Self::StartedBy => Self::Starts,
            Self::Finishes => Self::FinishedBy,
            Self::FinishedBy => Self::Finishes,
            Self::Meets => Self::MetBy,
            Self::MetBy => Self::Meets,
            Self::Equal => Self::Equal,
        }
    }
}

impl fmt::Display for BaseRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for BaseRelation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|rel| rel.symbol() == s)
            .ok_or_else(|| Error::UnknownRelation(s.to_string()))
    }
}

/// A disjunction of base relations, stored as a 13-bit mask
///
/// [`RelationSet::ALL`] means nothing is known; [`RelationSet::EMPTY`] means
/// the constraints contradict each other.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "Vec<BaseRelation>", from = "Vec<BaseRelation>")]
pub struct RelationSet(u16);

impl RelationSet {
    pub const EMPTY: RelationSet = RelationSet(0);
    pub const ALL: RelationSet = RelationSet((1 << 13) - 1);

    pub const BEFORE: RelationSet = Self::of(BaseRelation::Before);
    pub const AFTER: RelationSet = Self::of(BaseRelation::After);
    pub const DURING: RelationSet = Self::of(BaseRelation::During);
    pub const DURING_BY: RelationSet = Self::of(BaseRelation::DuringBy);
    pub const OVERLAP: RelationSet = Self::of(BaseRelation::Overlap);
    pub const OVERLAP_BY: RelationSet = Self::of(BaseRelation::OverlapBy);
    pub const STARTS: RelationSet = Self::of(BaseRelation::Starts);
    pub const STARTED_BY: RelationSet = Self::of(BaseRelation::StartedBy);
    pub const FINISHES: RelationSet = Self::of(BaseRelation::Finishes);
    pub const FINISHED_BY: RelationSet = Self::of(BaseRelation::FinishedBy);
    pub const MEETS: RelationSet = Self::of(BaseRelation::Meets);
    pub const MET_BY: RelationSet = Self::of(BaseRelation::MetBy);
    pub const EQUAL: RelationSet = Self::of(BaseRelation::Equal);

    /// Singleton set
    pub const fn of(relation: BaseRelation) -> Self {
        Self(relation.bit())
    }

    /// Build a set from raw bits; bits above the 13th are dropped
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Union of the singleton bits of every relation given
    pub fn combine<I>(relations: I) -> Self
    where
        I: IntoIterator<Item = BaseRelation>,
    {
        relations
            .into_iter()
            .fold(Self::EMPTY, |acc, rel| Self(acc.0 | rel.bit()))
    }

    /// Map every member to its converse
    pub fn inverse(self) -> Self {
        Self::combine(self.iter().map(BaseRelation::inverse))
    }

    pub const fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, relation: BaseRelation) -> bool {
        self.0 & relation.bit() != 0
    }

    pub const fn is_subset_of(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn is_all(self) -> bool {
        self.0 == Self::ALL.0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// The only member, if the set is a singleton
    pub fn single(self) -> Option<BaseRelation> {
        if self.len() == 1 {
            self.iter().next()
        } else {
            None
        }
    }

    /// Members in canonical order
    pub fn iter(self) -> RelationIter {
        RelationIter { bits: self.0, pos: 0 }
    }

    /// Space-separated symbols, the composition table notation
    pub fn symbols(self) -> String {
        self.iter()
            .map(BaseRelation::symbol)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Iterator over the members of a [`RelationSet`] in canonical order
#[derive(Debug, Clone)]
pub struct RelationIter {
    bits: u16,
    pos: usize,
}

impl Iterator for RelationIter {
    type Item = BaseRelation;

    fn next(&mut self) -> Option<BaseRelation> {
        while self.pos < BaseRelation::ALL.len() {
            let rel = BaseRelation::ALL[self.pos];
            self.pos += 1;
            if self.bits & rel.bit() != 0 {
                return Some(rel);
            }
        }
        None
    }
}

impl IntoIterator for RelationSet {
    type Item = BaseRelation;
    type IntoIter = RelationIter;

    fn into_iter(self) -> RelationIter {
        self.iter()
    }
}

impl FromIterator<BaseRelation> for RelationSet {
    fn from_iter<I: IntoIterator<Item = BaseRelation>>(iter: I) -> Self {
        Self::combine(iter)
    }
}

impl From<BaseRelation> for RelationSet {
    fn from(relation: BaseRelation) -> Self {
        Self::of(relation)
    }
}

impl From<Vec<BaseRelation>> for RelationSet {
    fn from(relations: Vec<BaseRelation>) -> Self {
        Self::combine(relations)
    }
}

impl From<RelationSet> for Vec<BaseRelation> {
    fn from(set: RelationSet) -> Self {
        set.iter().collect()
    }
}

impl BitAnd for RelationSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersect(rhs)
    }
}

impl BitAndAssign for RelationSet {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for RelationSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for RelationSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Comma-separated member names in canonical order; empty for [`RelationSet::EMPTY`]
impl fmt::Display for RelationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(BaseRelation::name).collect();
        f.write_str(&names.join(","))
    }
}

impl fmt::Debug for RelationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RelationSet({{{}}})", self.symbols())
    }
}

/// Parses a space-separated list of symbols; `all` stands for every relation
impl FromStr for RelationSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.split_whitespace().try_fold(Self::EMPTY, |acc, symbol| {
            if symbol == "all" {
                Ok(Self::ALL)
            } else {
                Ok(acc | Self::of(symbol.parse()?))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_layout() {
        assert_eq!(RelationSet::BEFORE.bits(), 0b1);
        assert_eq!(RelationSet::AFTER.bits(), 0b10);
        assert_eq!(RelationSet::EQUAL.bits(), 0b1_0000_0000_0000);
        assert_eq!(RelationSet::ALL.bits(), 0b1_1111_1111_1111);
        assert_eq!(RelationSet::ALL.len(), 13);
        assert!(RelationSet::EMPTY.is_empty());
    }

    #[test]
    fn test_parse_symbol_list() {
        let set: RelationSet = "< o m d s".parse().unwrap();
        assert_eq!(set.bits(), 0b100_0101_0101);
    }

    #[test]
    fn test_parse_all_keyword() {
        assert_eq!("all".parse::<RelationSet>().unwrap(), RelationSet::ALL);
        assert_eq!("< all".parse::<RelationSet>().unwrap(), RelationSet::ALL);
    }

    #[test]
    fn test_parse_unknown_symbol() {
        let err = "< x".parse::<RelationSet>().unwrap_err();
        assert!(matches!(err, Error::UnknownRelation(ref s) if s == "x"));
    }

    #[test]
    fn test_inverse_of_before_meets() {
        let set = RelationSet::combine([BaseRelation::Before, BaseRelation::Meets]);
        let inverse = set.inverse();

        assert_eq!(inverse, RelationSet::AFTER | RelationSet::MET_BY);
        for rel in BaseRelation::ALL {
            let expected = matches!(rel, BaseRelation::After | BaseRelation::MetBy);
            assert_eq!(inverse.contains(rel), expected, "{}", rel.name());
        }
    }

    #[test]
    fn test_inverse_is_involution_for_every_base_relation() {
        for rel in BaseRelation::ALL {
            assert_eq!(rel.inverse().inverse(), rel);
            assert_eq!(RelationSet::of(rel).inverse(), RelationSet::of(rel.inverse()));
        }
        assert_eq!(RelationSet::ALL.inverse(), RelationSet::ALL);
        assert_eq!(RelationSet::EMPTY.inverse(), RelationSet::EMPTY);
    }

    #[test]
    fn test_display_is_canonical() {
        let a = RelationSet::combine([BaseRelation::Meets, BaseRelation::Before]);
        let b = RelationSet::combine([BaseRelation::Before, BaseRelation::Meets]);

        assert_eq!(a.to_string(), "before,meets");
        assert_eq!(b.to_string(), "before,meets");
        assert_eq!(RelationSet::EMPTY.to_string(), "");
    }

    #[test]
    fn test_single() {
        assert_eq!(RelationSet::DURING.single(), Some(BaseRelation::During));
        assert_eq!((RelationSet::DURING | RelationSet::STARTS).single(), None);
        assert_eq!(RelationSet::EMPTY.single(), None);
    }

    #[test]
    fn test_subset() {
        let small = RelationSet::BEFORE;
        let large = RelationSet::BEFORE | RelationSet::MEETS;
        assert!(small.is_subset_of(large));
        assert!(!large.is_subset_of(small));
        assert!(RelationSet::EMPTY.is_subset_of(small));
    }

    #[test]
    fn test_from_bits_masks_high_bits() {
        assert_eq!(RelationSet::from_bits(u16::MAX), RelationSet::ALL);
    }

    #[test]
    fn test_serde_as_symbol_list() {
        let set = RelationSet::BEFORE | RelationSet::EQUAL;
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["<","="]"#);

        let back: RelationSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
