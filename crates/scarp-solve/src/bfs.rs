use std::collections::{BTreeSet, VecDeque};

use scarp_core::ScarpError;

use crate::diffs::PairDiffs;
use crate::reconcile::{center_components, signed_adjacency, Potentials, Reconciler};

/// Spanning-tree reconciliation: per connected component, a breadth-first
/// traversal from the smallest assignment propagates potentials along tree
/// edges. Non-tree edges are never read, so a cycle whose deltas do not close
/// to zero is silently assumed consistent with the tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphReconciler;

impl Reconciler for GraphReconciler {
    fn name(&self) -> &'static str {
        "graph"
    }

    fn reconcile(&self, diffs: &PairDiffs) -> Result<Potentials, ScarpError> {
        let adjacency = signed_adjacency(diffs);
        let mut potentials = Potentials::new();
        let mut visited = BTreeSet::new();
        let mut components = Vec::new();

        for root in adjacency.keys() {
            if !visited.insert(root.clone()) {
                continue;
            }
            potentials.insert(root.clone(), 0.0);
            let mut members = vec![root.clone()];
            let mut queue = VecDeque::from([root.clone()]);
            while let Some(current) = queue.pop_front() {
                let current_potential = potentials.get(&current).copied().unwrap_or(0.0);
                if let Some(edges) = adjacency.get(&current) {
                    for (next, delta) in edges {
                        if visited.insert(next.clone()) {
                            potentials.insert(next.clone(), current_potential + delta);
                            members.push(next.clone());
                            queue.push_back(next.clone());
                        }
                    }
                }
            }
            components.push(members);
        }

        center_components(&mut potentials, &components);
        Ok(potentials)
    }
}
