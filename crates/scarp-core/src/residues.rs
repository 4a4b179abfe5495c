//! Value types for bases, allele assignments and basis partitions.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{ErrorInfo, ScarpError};

fn residue_error(code: &str, message: impl Into<String>) -> ScarpError {
    ScarpError::Config(ErrorInfo::new(code, message.into()))
}

/// A base: a sorted tuple of distinct sequence positions analysed jointly.
///
/// The string form (`"0,2,5"`) doubles as the canonical JSON map key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MultiResidue(Box<[usize]>);

impl MultiResidue {
    /// Creates a base from arbitrary positions, sorting them and rejecting
    /// duplicates.
    pub fn new(mut positions: Vec<usize>) -> Result<Self, ScarpError> {
        if positions.is_empty() {
            return Err(residue_error("empty-base", "a base needs at least one position"));
        }
        positions.sort_unstable();
        if positions.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(residue_error(
                "duplicate-position",
                "base positions must be distinct",
            ));
        }
        Ok(Self(positions.into_boxed_slice()))
    }

    /// Creates the size-1 base for a single position.
    pub fn singleton(position: usize) -> Self {
        Self(Box::new([position]))
    }

    /// Wraps positions already known to be sorted and distinct.
    pub(crate) fn from_sorted(positions: Vec<usize>) -> Self {
        debug_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        Self(positions.into_boxed_slice())
    }

    /// Returns the positions in ascending order.
    pub fn positions(&self) -> &[usize] {
        &self.0
    }

    /// Returns the order (number of positions) of the base.
    pub fn order(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the base contains `position`.
    pub fn contains(&self, position: usize) -> bool {
        self.0.binary_search(&position).is_ok()
    }

    /// Returns the rank of `position` within the base, if present.
    pub fn rank_of(&self, position: usize) -> Option<usize> {
        self.0.binary_search(&position).ok()
    }

    /// Returns whether every position of `self` is contained in `other`.
    pub fn is_subset_of(&self, other: &MultiResidue) -> bool {
        self.0.iter().all(|&p| other.contains(p))
    }

    /// Returns the sorted union of two disjoint or overlapping bases.
    pub fn union(&self, other: &MultiResidue) -> MultiResidue {
        let mut merged: Vec<usize> = self.0.iter().chain(other.0.iter()).copied().collect();
        merged.sort_unstable();
        merged.dedup();
        Self(merged.into_boxed_slice())
    }
}

impl fmt::Display for MultiResidue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, position) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, ",")?;
            }
            write!(f, "{position}")?;
        }
        Ok(())
    }
}

impl FromStr for MultiResidue {
    type Err = ScarpError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let positions = raw
            .split(',')
            .map(|token| {
                token.trim().parse::<usize>().map_err(|err| {
                    residue_error("bad-base-key", format!("invalid position {token:?}: {err}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        MultiResidue::new(positions)
    }
}

impl Serialize for MultiResidue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MultiResidue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Symbols taken at a base's positions, in the base's sorted order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Assignment(Box<[char]>);

impl Assignment {
    /// Creates an assignment from symbols in base order.
    pub fn from_symbols(symbols: impl IntoIterator<Item = char>) -> Self {
        Self(symbols.into_iter().collect())
    }

    /// Returns the symbols in base order.
    pub fn symbols(&self) -> &[char] {
        &self.0
    }

    /// Returns the arity (number of symbols) of the assignment.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the assignment carries no symbols.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.0.iter() {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

impl FromStr for Assignment {
    type Err = ScarpError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.is_empty() {
            return Err(residue_error(
                "empty-assignment",
                "an assignment needs at least one symbol",
            ));
        }
        Ok(Self(raw.chars().collect()))
    }
}

impl Serialize for Assignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Assignment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// A basis choice: disjoint parts whose union is the partitioned base.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Partition(Box<[MultiResidue]>);

impl Partition {
    /// Creates a partition from disjoint parts, sorted by leading position.
    pub fn new(mut parts: Vec<MultiResidue>) -> Result<Self, ScarpError> {
        if parts.is_empty() {
            return Err(residue_error("empty-partition", "a partition needs at least one part"));
        }
        parts.sort();
        let mut seen = std::collections::BTreeSet::new();
        for part in &parts {
            for &position in part.positions() {
                if !seen.insert(position) {
                    return Err(residue_error(
                        "overlapping-parts",
                        format!("position {position} appears in more than one part"),
                    ));
                }
            }
        }
        Ok(Self(parts.into_boxed_slice()))
    }

    /// Wraps parts already known to be disjoint, sorting them.
    pub(crate) fn from_disjoint_parts(mut parts: Vec<MultiResidue>) -> Self {
        parts.sort();
        Self(parts.into_boxed_slice())
    }

    /// Returns the parts, sorted by leading position.
    pub fn parts(&self) -> &[MultiResidue] {
        &self.0
    }

    /// Returns the number of parts.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the partition has no parts (never true post-construction).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the base covered by the partition (union of all parts).
    pub fn base(&self) -> MultiResidue {
        let mut positions: Vec<usize> = self
            .0
            .iter()
            .flat_map(|part| part.positions().iter().copied())
            .collect();
        positions.sort_unstable();
        MultiResidue(positions.into_boxed_slice())
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, part) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, "+")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

impl FromStr for Partition {
    type Err = ScarpError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let parts = raw
            .split('+')
            .map(MultiResidue::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Partition::new(parts)
    }
}

impl Serialize for Partition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Partition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_positions_are_sorted_and_distinct() {
        let base = MultiResidue::new(vec![4, 0, 2]).expect("base");
        assert_eq!(base.positions(), &[0, 2, 4]);
        assert_eq!(base.rank_of(2), Some(1));
        assert!(MultiResidue::new(vec![1, 1]).is_err());
        assert!(MultiResidue::new(vec![]).is_err());
    }

    #[test]
    fn base_key_roundtrip() {
        let base = MultiResidue::new(vec![0, 3, 7]).expect("base");
        let parsed: MultiResidue = base.to_string().parse().expect("parse");
        assert_eq!(parsed, base);
    }

    #[test]
    fn subset_and_union() {
        let small = MultiResidue::new(vec![1, 3]).expect("base");
        let large = MultiResidue::new(vec![0, 1, 3]).expect("base");
        assert!(small.is_subset_of(&large));
        assert!(!large.is_subset_of(&small));
        assert_eq!(
            small.union(&MultiResidue::singleton(0)).positions(),
            large.positions()
        );
    }

    #[test]
    fn assignment_roundtrip_and_order() {
        let a: Assignment = "AT".parse().expect("assignment");
        let b = Assignment::from_symbols("TA".chars());
        assert_eq!(a.to_string(), "AT");
        assert!(a < b);
        assert!("".parse::<Assignment>().is_err());
    }

    #[test]
    fn partition_rejects_overlap() {
        let a = MultiResidue::new(vec![0, 1]).expect("base");
        let b = MultiResidue::singleton(1);
        assert!(Partition::new(vec![a, b]).is_err());
    }

    #[test]
    fn partition_display_roundtrip() {
        let partition = Partition::new(vec![
            MultiResidue::singleton(2),
            MultiResidue::new(vec![0, 1]).expect("base"),
        ])
        .expect("partition");
        assert_eq!(partition.to_string(), "0,1+2");
        let parsed: Partition = "0,1+2".parse().expect("parse");
        assert_eq!(parsed, partition);
        assert_eq!(partition.base().positions(), &[0, 1, 2]);
    }
}
