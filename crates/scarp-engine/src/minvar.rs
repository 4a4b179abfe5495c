use std::collections::BTreeMap;

use scarp_core::combin::{bases_of_order, candidate_partitions, part_subsets, project_assignment};
use scarp_core::{Assignment, MultiResidue, Partition, ScarpError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::{Decomposition, EpistasisEngine};
use crate::stat::nan_variance;
use crate::table::EpistasisTable;

/// Variance score of one candidate basis partition for a base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateOutcome {
    /// The candidate partition.
    pub partition: Partition,
    /// Population variance of the resulting values, NaNs ignored; NaN when
    /// every value was poisoned.
    pub variance: f64,
}

/// Outcome of basis selection for one base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRecord {
    /// Every candidate considered, in deterministic order.
    pub candidates: Vec<CandidateOutcome>,
    /// The winning partition; absent when every candidate scored NaN.
    pub winner: Option<Partition>,
}

/// Selection records per base of order ≥ 2.
pub type BasisSelections = BTreeMap<MultiResidue, SelectionRecord>;

type Values = BTreeMap<Assignment, f64>;

/// Minimum-variance decomposition: per base, evaluate every candidate basis
/// partition and finalize the lowest-variance values. Runs sequentially over
/// bases because the (base, partition) memo is shared and mutable.
pub(crate) fn calculate(engine: &EpistasisEngine) -> Result<Decomposition, ScarpError> {
    let length = engine.scenery().sequence_length();
    let mut memo: BTreeMap<(MultiResidue, Partition), Values> = BTreeMap::new();
    let mut table = EpistasisTable::new();
    let mut selections = BasisSelections::new();

    for order in 1..=engine.opts().max_order {
        for base in bases_of_order(length, order) {
            if order == 1 {
                let raw = engine.raw_potential(&base)?;
                table.insert(base, raw)?;
                continue;
            }

            let partitions = candidate_partitions(&base);
            let mut outcomes = Vec::with_capacity(partitions.len());
            let mut candidate_values = Vec::with_capacity(partitions.len());
            for partition in &partitions {
                let values = value_under(engine, &mut memo, &base, partition)?;
                outcomes.push(CandidateOutcome {
                    partition: partition.clone(),
                    variance: nan_variance(values.values().copied()),
                });
                candidate_values.push(values);
            }

            let mut winner: Option<usize> = None;
            for (index, outcome) in outcomes.iter().enumerate() {
                if outcome.variance.is_nan() {
                    continue;
                }
                let improves = match winner {
                    None => true,
                    Some(best) => outcome.variance < outcomes[best].variance,
                };
                if improves {
                    winner = Some(index);
                }
            }

            // With every candidate NaN-poisoned the base is undetermined; the
            // first candidate's (all-NaN) values are kept so the entry still
            // finalizes.
            let chosen = winner.unwrap_or(0);
            debug!(base = %base, partition = %outcomes[chosen].partition, "basis selected");
            table.insert(base.clone(), candidate_values.swap_remove(chosen))?;
            selections.insert(
                base,
                SelectionRecord {
                    winner: winner.map(|index| outcomes[index].partition.clone()),
                    candidates: outcomes,
                },
            );
        }
    }

    Ok(Decomposition {
        table,
        selections: Some(selections),
    })
}

/// The value of `base` decomposed against `partition`: the raw potential
/// minus, for every proper non-empty subset of the partition's parts, the
/// value of that subset's union-base under the sub-partition it forms.
/// Memoized per (base, partition); a single-part partition is the raw
/// potential of its base.
fn value_under(
    engine: &EpistasisEngine,
    memo: &mut BTreeMap<(MultiResidue, Partition), Values>,
    base: &MultiResidue,
    partition: &Partition,
) -> Result<Values, ScarpError> {
    let key = (base.clone(), partition.clone());
    if let Some(values) = memo.get(&key) {
        return Ok(values.clone());
    }

    let mut values = engine.raw_potential(base)?;
    for sub_partition in part_subsets(partition) {
        let sub_base = sub_partition.base();
        let lower = value_under(engine, memo, &sub_base, &sub_partition)?;
        for (assignment, value) in values.iter_mut() {
            let projected = project_assignment(&sub_base, base, assignment)?;
            match lower.get(&projected) {
                Some(contribution) => *value -= contribution,
                None => *value = f64::NAN,
            }
        }
    }

    memo.insert(key, values.clone());
    Ok(values)
}
