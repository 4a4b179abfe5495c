use std::collections::{BTreeMap, BTreeSet};

use scarp_core::MultiResidue;
use serde::{Deserialize, Serialize};

use crate::minvar::BasisSelections;

/// Empirical probability that a sub-base explains higher-order bases, derived
/// from minimum-variance selection records: per base of order ≥ 2, a sub-base
/// is eligible when it appears as a part of any considered candidate and
/// selected when it appears in the winning candidate, each counted at most
/// once per base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BasisAttribution {
    /// How many bases each sub-base was eligible for.
    pub eligible: BTreeMap<MultiResidue, u64>,
    /// How many bases each sub-base was selected for.
    pub selected: BTreeMap<MultiResidue, u64>,
    /// selected / eligible per sub-base.
    pub probabilities: BTreeMap<MultiResidue, f64>,
}

/// Aggregates selection records into attribution probabilities.
pub fn attribute(selections: &BasisSelections) -> BasisAttribution {
    let mut eligible: BTreeMap<MultiResidue, u64> = BTreeMap::new();
    let mut selected: BTreeMap<MultiResidue, u64> = BTreeMap::new();

    for record in selections.values() {
        let mut eligible_parts: BTreeSet<MultiResidue> = BTreeSet::new();
        for candidate in &record.candidates {
            for part in candidate.partition.parts() {
                eligible_parts.insert(part.clone());
            }
        }
        for part in eligible_parts {
            *eligible.entry(part).or_insert(0) += 1;
        }
        if let Some(winner) = &record.winner {
            for part in winner.parts() {
                *selected.entry(part.clone()).or_insert(0) += 1;
            }
        }
    }

    let probabilities = eligible
        .iter()
        .map(|(part, &count)| {
            let hits = selected.get(part).copied().unwrap_or(0);
            (part.clone(), hits as f64 / count as f64)
        })
        .collect();

    BasisAttribution {
        eligible,
        selected,
        probabilities,
    }
}
