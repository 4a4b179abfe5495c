use proptest::prelude::*;

use scarp_core::Assignment;
use scarp_solve::{DiffObservations, Strategy};

const NODES: [char; 8] = ['A', 'C', 'D', 'E', 'F', 'G', 'H', 'K'];

proptest! {
    /// On consistent data (deltas derived from hidden node values along a
    /// random spanning tree), both strategies must reproduce every observed
    /// delta and centre the component to zero mean.
    #[test]
    fn strategies_satisfy_the_reconciler_contract(
        values in proptest::collection::vec(-5.0f64..5.0, 2..8),
        parent_picks in proptest::collection::vec(0usize..8, 7),
        flips in proptest::collection::vec(any::<bool>(), 7),
    ) {
        let nodes: Vec<Assignment> = values
            .iter()
            .enumerate()
            .map(|(i, _)| Assignment::from_symbols([NODES[i]]))
            .collect();

        let mut observations = DiffObservations::new();
        let mut edges = Vec::new();
        for child in 1..values.len() {
            let parent = parent_picks[child - 1] % child;
            let delta = values[child] - values[parent];
            if flips[child - 1] {
                observations.record(nodes[child].clone(), nodes[parent].clone(), -delta);
                edges.push((child, parent, -delta));
            } else {
                observations.record(nodes[parent].clone(), nodes[child].clone(), delta);
                edges.push((parent, child, delta));
            }
        }
        let diffs = observations.finish();

        for strategy in [Strategy::Graph, Strategy::Regression] {
            let potentials = strategy.reconciler().reconcile(&diffs).unwrap();
            prop_assert_eq!(potentials.len(), values.len());
            for &(from, to, delta) in &edges {
                let reconstructed = potentials[&nodes[to]] - potentials[&nodes[from]];
                prop_assert!((reconstructed - delta).abs() < 1e-6);
            }
            let mean: f64 = potentials.values().sum::<f64>() / potentials.len() as f64;
            prop_assert!(mean.abs() < 1e-9);
        }
    }
}
