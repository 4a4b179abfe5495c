use std::collections::BTreeMap;

use nalgebra::{DMatrix, DVector};
use scarp_core::{Assignment, ErrorInfo, ScarpError};

use crate::diffs::PairDiffs;
use crate::reconcile::{
    center_components, connected_components, signed_adjacency, Potentials, Reconciler,
};

fn solve_error(message: impl Into<String>) -> ScarpError {
    ScarpError::Solve(ErrorInfo::new("least-squares", message.into()))
}

/// Weighted least-squares reconciliation: per connected component, every
/// observed delta contributes one low-weight row (−1 on the source, +1 on the
/// target) and the component's smallest assignment is pinned to zero by one
/// high-weight anchor row. Inconsistent cycles are averaged instead of
/// assumed tree-consistent.
#[derive(Debug, Clone, Copy)]
pub struct RegressionReconciler {
    /// Weight applied to every observed-delta row.
    pub delta_weight: f64,
    /// Weight applied to the per-component anchor row.
    pub anchor_weight: f64,
}

impl Default for RegressionReconciler {
    fn default() -> Self {
        Self {
            delta_weight: 0.1,
            anchor_weight: 1.0,
        }
    }
}

impl Reconciler for RegressionReconciler {
    fn name(&self) -> &'static str {
        "regression"
    }

    fn reconcile(&self, diffs: &PairDiffs) -> Result<Potentials, ScarpError> {
        let adjacency = signed_adjacency(diffs);
        let components = connected_components(&adjacency);
        let mut potentials = Potentials::new();

        for members in &components {
            if members.len() == 1 {
                potentials.insert(members[0].clone(), 0.0);
                continue;
            }
            let mut columns: Vec<Assignment> = members.clone();
            columns.sort();
            let index: BTreeMap<&Assignment, usize> =
                columns.iter().enumerate().map(|(i, a)| (a, i)).collect();

            let rows: Vec<(&(Assignment, Assignment), f64)> = diffs
                .iter()
                .filter(|((from, _), _)| index.contains_key(from))
                .collect();

            let delta_scale = self.delta_weight.sqrt();
            let anchor_scale = self.anchor_weight.sqrt();
            let mut system = DMatrix::<f64>::zeros(rows.len() + 1, columns.len());
            let mut rhs = DVector::<f64>::zeros(rows.len() + 1);
            for (row, ((from, to), delta)) in rows.iter().enumerate() {
                system[(row, index[from])] = -delta_scale;
                system[(row, index[to])] = delta_scale;
                rhs[row] = delta_scale * delta;
            }
            // Anchor the component's reference (smallest) assignment at zero.
            system[(rows.len(), 0)] = anchor_scale;

            let solution = system
                .svd(true, true)
                .solve(&rhs, 1e-12)
                .map_err(solve_error)?;
            for (column, assignment) in columns.iter().enumerate() {
                potentials.insert(assignment.clone(), solution[column]);
            }
        }

        center_components(&mut potentials, &components);
        Ok(potentials)
    }
}

#[cfg(test)]
mod tests {
    use scarp_core::Assignment;

    use super::*;
    use crate::bfs::GraphReconciler;
    use crate::diffs::DiffObservations;

    fn assignment(raw: &str) -> Assignment {
        raw.parse().expect("assignment")
    }

    #[test]
    fn consistent_chain_matches_graph_strategy() {
        let mut observations = DiffObservations::new();
        observations.record(assignment("A"), assignment("C"), 1.0);
        observations.record(assignment("C"), assignment("G"), 0.5);
        let diffs = observations.finish();

        let regressed = RegressionReconciler::default().reconcile(&diffs).unwrap();
        let walked = GraphReconciler.reconcile(&diffs).unwrap();
        for (key, value) in &walked {
            assert!((regressed[key] - value).abs() < 1e-6, "{key}");
        }
    }

    #[test]
    fn inconsistent_triangle_stays_zero_mean_and_finite() {
        let mut observations = DiffObservations::new();
        observations.record(assignment("A"), assignment("C"), 1.0);
        observations.record(assignment("C"), assignment("G"), 1.0);
        // Closing the cycle with a delta that does not sum to zero.
        observations.record(assignment("G"), assignment("A"), 0.0);
        let potentials = RegressionReconciler::default()
            .reconcile(&observations.finish())
            .unwrap();
        let sum: f64 = potentials.values().sum();
        assert!(sum.abs() < 1e-9);
        assert!(potentials.values().all(|value| value.is_finite()));
        // The averaged solution splits the residual instead of favouring the
        // spanning tree: A→C and C→G keep equal reconstructed deltas.
        let a_c = potentials[&assignment("C")] - potentials[&assignment("A")];
        let c_g = potentials[&assignment("G")] - potentials[&assignment("C")];
        assert!((a_c - c_g).abs() < 1e-9);
    }

    #[test]
    fn isolated_pairs_and_singletons_center() {
        let mut observations = DiffObservations::new();
        observations.record(assignment("A"), assignment("T"), 0.8);
        observations.record(assignment("G"), assignment("C"), 0.2);
        let potentials = RegressionReconciler::default()
            .reconcile(&observations.finish())
            .unwrap();
        assert!((potentials[&assignment("T")] - potentials[&assignment("A")] - 0.8).abs() < 1e-9);
        assert!((potentials[&assignment("A")] + potentials[&assignment("T")]).abs() < 1e-9);
        assert!((potentials[&assignment("C")] - potentials[&assignment("G")] - 0.2).abs() < 1e-9);
    }
}
