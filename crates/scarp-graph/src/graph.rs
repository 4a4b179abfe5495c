use scarp_core::{Alphabet, Scenery};
use tracing::debug;

use crate::edge::NeighbourEdge;

/// Adjacency lists of every single-mutant neighbour relation present in a
/// dataset. Immutable once built; shared read-only by the decomposition
/// engine and the ruggedness estimator.
#[derive(Debug, Clone)]
pub struct NeighbourGraph {
    adjacency: Vec<Vec<NeighbourEdge>>,
    sequence_length: usize,
    edge_count: usize,
}

impl NeighbourGraph {
    /// Builds the graph by attempting every single-position substitution of
    /// every sequence. A substitution only yields an edge when the source
    /// actually carries the pair's `from` symbol at that position and the
    /// mutant sequence is present in the dataset; absent mutants are the
    /// normal case and are skipped silently.
    pub fn build(scenery: &Scenery, alphabet: &Alphabet) -> Self {
        let sequence_count = scenery.sequence_count();
        let sequence_length = scenery.sequence_length();
        let mut adjacency: Vec<Vec<NeighbourEdge>> = vec![Vec::new(); sequence_count];
        let mut edge_count = 0usize;

        let mut candidate = String::with_capacity(sequence_length);
        for source in 0..sequence_count {
            let row = scenery.row(source);
            for position in 0..sequence_length {
                let present = row[position];
                for (from_symbol, to_symbol) in alphabet.substitution_pairs() {
                    if present != from_symbol {
                        continue;
                    }
                    candidate.clear();
                    for (index, &symbol) in row.iter().enumerate() {
                        candidate.push(if index == position { to_symbol } else { symbol });
                    }
                    if let Some(target) = scenery.index_of(&candidate) {
                        adjacency[source].push(NeighbourEdge {
                            source,
                            target,
                            position,
                            from_symbol,
                            to_symbol,
                        });
                        edge_count += 1;
                    }
                }
            }
        }

        debug!(
            sequences = sequence_count,
            length = sequence_length,
            edges = edge_count,
            "neighbour graph built"
        );
        Self {
            adjacency,
            sequence_length,
            edge_count,
        }
    }

    /// Returns the edges leaving the sequence at `source`.
    pub fn neighbours(&self, source: usize) -> &[NeighbourEdge] {
        &self.adjacency[source]
    }

    /// Returns the number of sequences the graph was built over.
    pub fn sequence_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the shared sequence length L.
    pub fn sequence_length(&self) -> usize {
        self.sequence_length
    }

    /// Returns the total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Iterates every directed edge, source row order first.
    pub fn edges(&self) -> impl Iterator<Item = &NeighbourEdge> {
        self.adjacency.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube() -> Scenery {
        let sequences = ["AAA", "AAT", "ATA", "TAA", "ATT", "TAT", "TTA", "TTT"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let fitness = vec![0.1, 0.2, 0.4, 0.3, 0.3, 0.6, 0.8, 1.0];
        Scenery::new(sequences, fitness).expect("scenery")
    }

    #[test]
    fn full_cube_has_all_single_mutant_edges() {
        let graph = NeighbourGraph::build(&cube(), &Alphabet::from_symbols("AT").unwrap());
        assert_eq!(graph.edge_count(), 24);
        for source in 0..graph.sequence_count() {
            assert_eq!(graph.neighbours(source).len(), 3);
        }
        let first = graph.neighbours(0);
        assert!(first.contains(&NeighbourEdge {
            source: 0,
            target: 3,
            position: 0,
            from_symbol: 'A',
            to_symbol: 'T',
        }));
    }

    #[test]
    fn absent_mutants_yield_no_edges() {
        let scenery = Scenery::new(
            vec!["AAA".into(), "AAT".into(), "TTA".into()],
            vec![0.1, 0.2, 0.8],
        )
        .expect("scenery");
        let graph = NeighbourGraph::build(&scenery, &Alphabet::from_symbols("AT").unwrap());
        // AAA↔AAT is the only pair at Hamming distance one.
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.neighbours(2).is_empty());
        let edge = graph.neighbours(1)[0];
        assert_eq!(edge.target, 0);
        assert_eq!(edge.position, 2);
        assert_eq!(edge.from_symbol, 'T');
        assert_eq!(edge.to_symbol, 'A');
    }

    #[test]
    fn symbols_outside_the_alphabet_never_substitute() {
        let scenery = Scenery::new(vec!["GA".into(), "GT".into()], vec![0.0, 1.0])
            .expect("scenery");
        let graph = NeighbourGraph::build(&scenery, &Alphabet::from_symbols("AT").unwrap());
        // Position 0 carries G, which is not in the alphabet; only the A↔T
        // substitution at position 1 connects the rows.
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.edges().all(|edge| edge.position == 1));
    }
}
