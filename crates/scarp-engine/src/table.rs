use std::collections::BTreeMap;

use scarp_core::{Assignment, ErrorInfo, MultiResidue, ScarpError};
use serde::{Deserialize, Serialize};

/// Finalized epistasis values: base → assignment → value (possibly NaN for
/// under-sampled entries). Entries are write-once; each base is inserted by
/// exactly one task and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpistasisTable {
    entries: BTreeMap<MultiResidue, BTreeMap<Assignment, f64>>,
}

impl EpistasisTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finalizes the entry for `base`. Inserting a base twice is an engine
    /// error, never an overwrite.
    pub fn insert(
        &mut self,
        base: MultiResidue,
        values: BTreeMap<Assignment, f64>,
    ) -> Result<(), ScarpError> {
        if self.entries.contains_key(&base) {
            return Err(ScarpError::Engine(
                ErrorInfo::new("duplicate-base", "table entries are write-once")
                    .with_context("base", base.to_string()),
            ));
        }
        self.entries.insert(base, values);
        Ok(())
    }

    /// Returns the finalized values for `base`, if present.
    pub fn get(&self, base: &MultiResidue) -> Option<&BTreeMap<Assignment, f64>> {
        self.entries.get(base)
    }

    /// Returns the finalized value for one assignment of `base`, if present.
    pub fn value(&self, base: &MultiResidue, assignment: &Assignment) -> Option<f64> {
        self.entries.get(base).and_then(|values| values.get(assignment)).copied()
    }

    /// Iterates entries in base order.
    pub fn iter(&self) -> impl Iterator<Item = (&MultiResidue, &BTreeMap<Assignment, f64>)> {
        self.entries.iter()
    }

    /// Iterates the finalized bases in order.
    pub fn bases(&self) -> impl Iterator<Item = &MultiResidue> {
        self.entries.keys()
    }

    /// Returns the number of finalized bases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no base has been finalized.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
