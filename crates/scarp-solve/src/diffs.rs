use std::collections::{BTreeMap, BTreeSet};

use scarp_core::Assignment;

#[derive(Debug, Clone, Copy, Default)]
struct Sample {
    total: f64,
    count: usize,
}

/// Accumulates fitness deltas per directed assignment pair; repeated
/// observations of the same pair are averaged when the accumulator finishes.
#[derive(Debug, Clone, Default)]
pub struct DiffObservations {
    samples: BTreeMap<(Assignment, Assignment), Sample>,
}

impl DiffObservations {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one observed delta for the directed pair `from → to`.
    pub fn record(&mut self, from: Assignment, to: Assignment, delta: f64) {
        let sample = self.samples.entry((from, to)).or_default();
        sample.total += delta;
        sample.count += 1;
    }

    /// Averages the observations into a [`PairDiffs`] set.
    pub fn finish(self) -> PairDiffs {
        let mut deltas = BTreeMap::new();
        let mut assignments = BTreeSet::new();
        for ((from, to), sample) in self.samples {
            assignments.insert(from.clone());
            assignments.insert(to.clone());
            deltas.insert((from, to), sample.total / sample.count as f64);
        }
        PairDiffs {
            deltas,
            assignments,
        }
    }
}

/// Averaged pairwise differences between assignments at one base, plus the
/// set of assignments that appear in any pair.
#[derive(Debug, Clone, Default)]
pub struct PairDiffs {
    deltas: BTreeMap<(Assignment, Assignment), f64>,
    assignments: BTreeSet<Assignment>,
}

impl PairDiffs {
    /// Returns whether no pair was observed.
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Returns the assignments that appear in at least one pair.
    pub fn assignments(&self) -> &BTreeSet<Assignment> {
        &self.assignments
    }

    /// Returns the averaged delta recorded for the directed pair, if any.
    pub fn delta(&self, from: &Assignment, to: &Assignment) -> Option<f64> {
        self.deltas.get(&(from.clone(), to.clone())).copied()
    }

    /// Iterates every directed pair with its averaged delta.
    pub fn iter(&self) -> impl Iterator<Item = (&(Assignment, Assignment), f64)> {
        self.deltas.iter().map(|(pair, &delta)| (pair, delta))
    }

    /// Returns the number of directed pairs.
    pub fn len(&self) -> usize {
        self.deltas.len()
    }
}
