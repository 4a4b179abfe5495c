use scarp_core::{Alphabet, Scenery};
use scarp_engine::hash::stable_hash_string;
use scarp_engine::{EngineOpts, EpistasisEngine, SelectionPolicy, Strategy};

fn cube() -> (Scenery, Alphabet) {
    let sequences = ["AAA", "AAT", "ATA", "TAA", "ATT", "TAT", "TTA", "TTT"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let fitness = vec![0.1, 0.2, 0.4, 0.3, 0.3, 0.6, 0.8, 1.0];
    (
        Scenery::new(sequences, fitness).expect("scenery"),
        Alphabet::from_symbols("AT").expect("alphabet"),
    )
}

fn table_hash(concurrency: usize) -> String {
    let (scenery, alphabet) = cube();
    let engine = EpistasisEngine::new(
        scenery,
        alphabet,
        EngineOpts {
            max_order: 3,
            strategy: Strategy::Graph,
            selection: SelectionPolicy::Canonical,
            concurrency,
        },
    )
    .expect("engine");
    let decomposition = engine.calculate().expect("decomposition");
    stable_hash_string(&decomposition.table).expect("hash")
}

#[test]
fn recomputation_is_idempotent() {
    assert_eq!(table_hash(1), table_hash(1));
}

#[test]
fn concurrency_does_not_change_the_result() {
    assert_eq!(table_hash(1), table_hash(4));
}
