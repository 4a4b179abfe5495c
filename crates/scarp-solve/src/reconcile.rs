use std::collections::BTreeMap;

use scarp_core::{Assignment, ScarpError};
use serde::{Deserialize, Serialize};

use crate::bfs::GraphReconciler;
use crate::diffs::PairDiffs;
use crate::regression::RegressionReconciler;

/// Reconciled potential per assignment. Assignments that never appeared in a
/// pair are absent, not zero.
pub type Potentials = BTreeMap<Assignment, f64>;

/// A strategy turning pairwise differences into per-assignment potentials.
///
/// Contract: for every observed pair (u, v) with delta d on consistent data,
/// `potential[v] − potential[u] == d` up to numerical tolerance, and every
/// connected component is shifted to zero mean.
pub trait Reconciler: Send + Sync {
    /// Stable strategy name recorded in reports.
    fn name(&self) -> &'static str;

    /// Reconciles the differences into potentials.
    fn reconcile(&self, diffs: &PairDiffs) -> Result<Potentials, ScarpError>;
}

/// Selectable reconciliation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Spanning-tree propagation over connected components (default).
    #[default]
    Graph,
    /// Weighted least-squares regression, tolerant of inconsistent cycles.
    Regression,
}

impl Strategy {
    /// Instantiates the reconciler implementing this strategy.
    pub fn reconciler(self) -> Box<dyn Reconciler> {
        match self {
            Strategy::Graph => Box::new(GraphReconciler),
            Strategy::Regression => Box::new(RegressionReconciler::default()),
        }
    }
}

/// Undirected adjacency with signed deltas: `adjacency[u][v]` is the delta of
/// the observed direction when `u → v` was recorded, and the negated reverse
/// otherwise.
pub(crate) fn signed_adjacency(
    diffs: &PairDiffs,
) -> BTreeMap<Assignment, BTreeMap<Assignment, f64>> {
    let mut adjacency: BTreeMap<Assignment, BTreeMap<Assignment, f64>> = BTreeMap::new();
    for assignment in diffs.assignments() {
        adjacency.insert(assignment.clone(), BTreeMap::new());
    }
    for ((from, to), delta) in diffs.iter() {
        adjacency
            .entry(from.clone())
            .or_default()
            .insert(to.clone(), delta);
    }
    for ((from, to), delta) in diffs.iter() {
        adjacency
            .entry(to.clone())
            .or_default()
            .entry(from.clone())
            .or_insert(-delta);
    }
    adjacency
}

/// Connected components in deterministic (smallest-root-first) order; members
/// are listed in breadth-first visit order.
pub(crate) fn connected_components(
    adjacency: &BTreeMap<Assignment, BTreeMap<Assignment, f64>>,
) -> Vec<Vec<Assignment>> {
    let mut visited = std::collections::BTreeSet::new();
    let mut components = Vec::new();
    for root in adjacency.keys() {
        if !visited.insert(root.clone()) {
            continue;
        }
        let mut members = vec![root.clone()];
        let mut queue = std::collections::VecDeque::from([root.clone()]);
        while let Some(current) = queue.pop_front() {
            if let Some(edges) = adjacency.get(&current) {
                for next in edges.keys() {
                    if visited.insert(next.clone()) {
                        members.push(next.clone());
                        queue.push_back(next.clone());
                    }
                }
            }
        }
        components.push(members);
    }
    components
}

/// Shifts each component of `potentials` so its mean is zero.
pub(crate) fn center_components(potentials: &mut Potentials, components: &[Vec<Assignment>]) {
    for members in components {
        let mut total = 0.0;
        for member in members {
            total += potentials.get(member).copied().unwrap_or(0.0);
        }
        let mean = total / members.len() as f64;
        for member in members {
            if let Some(value) = potentials.get_mut(member) {
                *value -= mean;
            }
        }
    }
}
