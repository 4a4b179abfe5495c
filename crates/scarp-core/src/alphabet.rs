//! Symbol alphabets for sequence datasets.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, ScarpError};

/// Ordered set of symbols a sequence position may take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alphabet(BTreeSet<char>);

impl Alphabet {
    /// Builds an alphabet from the distinct characters of `symbols`.
    pub fn from_symbols(symbols: &str) -> Result<Self, ScarpError> {
        let set: BTreeSet<char> = symbols.chars().collect();
        if set.is_empty() {
            return Err(ScarpError::Config(ErrorInfo::new(
                "empty-alphabet",
                "an alphabet requires at least one symbol",
            )));
        }
        Ok(Self(set))
    }

    /// Returns the number of symbols.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the alphabet has no symbols (never true post-construction).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns whether the alphabet contains `symbol`.
    pub fn contains(&self, symbol: char) -> bool {
        self.0.contains(&symbol)
    }

    /// Iterates symbols in order.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }

    /// Iterates every ordered pair of distinct symbols.
    pub fn substitution_pairs(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.0.iter().flat_map(move |&from| {
            self.0
                .iter()
                .filter(move |&&to| to != from)
                .map(move |&to| (from, to))
        })
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.0 {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}
