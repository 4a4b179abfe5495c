use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scarp_core::{Alphabet, Scenery};
use scarp_graph::NeighbourGraph;

const SYMBOLS: [char; 4] = ['A', 'C', 'G', 'T'];

fn random_scenery(rows: usize, length: usize, seed: u64) -> Scenery {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut sequences = std::collections::BTreeSet::new();
    while sequences.len() < rows {
        let sequence: String = (0..length)
            .map(|_| SYMBOLS[rng.gen_range(0..SYMBOLS.len())])
            .collect();
        sequences.insert(sequence);
    }
    let sequences: Vec<String> = sequences.into_iter().collect();
    let fitness: Vec<f64> = (0..rows).map(|_| rng.gen::<f64>()).collect();
    Scenery::new(sequences, fitness).expect("scenery")
}

fn build_graph_bench(c: &mut Criterion) {
    let scenery = random_scenery(2_000, 10, 42);
    let alphabet = Alphabet::from_symbols("ACGT").expect("alphabet");
    c.bench_function("build_graph_2k_l10", |b| {
        b.iter(|| {
            let graph = NeighbourGraph::build(&scenery, &alphabet);
            black_box(graph);
        });
    });
}

criterion_group!(benches, build_graph_bench);
criterion_main!(benches);
