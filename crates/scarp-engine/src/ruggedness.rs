use std::collections::BTreeMap;

use scarp_core::Scenery;
use scarp_graph::NeighbourGraph;

use crate::stat::{mean, population_variance};

/// Pooled variance of recentered single-mutant fitness effects.
///
/// Deltas `fitness[target] − fitness[source]` are grouped by
/// (position, from-symbol, to-symbol). Each undirected neighbour pair
/// contributes exactly once (target row above source row), and the source
/// scan covers the first `min(N, L)` rows. Each group is recentered to zero
/// mean, the residuals are pooled across groups, and their population
/// variance is returned. No neighbour pairs at all yields NaN.
pub fn ruggedness(graph: &NeighbourGraph, scenery: &Scenery) -> f64 {
    let fitness = scenery.fitness_values();
    let mut groups: BTreeMap<(usize, char, char), Vec<f64>> = BTreeMap::new();

    let scan_rows = graph.sequence_count().min(graph.sequence_length());
    for source in 0..scan_rows {
        for edge in graph.neighbours(source) {
            if edge.target <= source {
                continue;
            }
            groups
                .entry((edge.position, edge.from_symbol, edge.to_symbol))
                .or_default()
                .push(fitness[edge.target] - fitness[edge.source]);
        }
    }

    let mut residuals = Vec::new();
    for deltas in groups.values() {
        let center = mean(deltas);
        residuals.extend(deltas.iter().map(|delta| delta - center));
    }
    population_variance(&residuals)
}
