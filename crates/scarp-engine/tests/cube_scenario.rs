use scarp_core::{Alphabet, Assignment, MultiResidue, Scenery};
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

fn engine(strategy: Strategy) -> EpistasisEngine {
    let (scenery, alphabet) = cube();
    EpistasisEngine::new(
        scenery,
        alphabet,
        EngineOpts {
            max_order: 3,
            strategy,
            selection: SelectionPolicy::Canonical,
            concurrency: 1,
        },
    )
    .expect("engine")
}

fn base(positions: &[usize]) -> MultiResidue {
    MultiResidue::new(positions.to_vec()).expect("base")
}

fn assignment(raw: &str) -> Assignment {
    raw.parse().expect("assignment")
}

#[test]
fn one_entry_per_base_and_observed_singleton_assignments() {
    let decomposition = engine(Strategy::Graph).calculate().expect("decomposition");
    let table = &decomposition.table;
    assert_eq!(table.len(), 7);
    for position in 0..3 {
        let values = table.get(&MultiResidue::singleton(position)).expect("entry");
        let symbols: Vec<String> = values.keys().map(|a| a.to_string()).collect();
        assert_eq!(symbols, ["A", "T"]);
    }
}

#[test]
fn singleton_values_and_reference_ratios() {
    let decomposition = engine(Strategy::Graph).calculate().expect("decomposition");
    let table = &decomposition.table;

    let expected = [(0usize, 0.2125), (1, 0.1625), (2, 0.0625)];
    for (position, value) in expected {
        let entry = table.get(&MultiResidue::singleton(position)).expect("entry");
        assert!((entry[&assignment("A")] - value).abs() < 1e-9);
        assert!((entry[&assignment("T")] + value).abs() < 1e-9);
    }

    let reference = table.value(&base(&[0]), &assignment("A")).expect("value");
    let first = table.value(&base(&[1]), &assignment("A")).expect("value");
    let second = table.value(&base(&[2]), &assignment("A")).expect("value");
    assert!((first / reference - 0.7647).abs() < 5e-4);
    assert!((second / reference - 0.2941).abs() < 5e-4);
}

#[test]
fn pair_and_triple_interactions() {
    let decomposition = engine(Strategy::Graph).calculate().expect("decomposition");
    let table = &decomposition.table;

    let pair = table.get(&base(&[0, 1])).expect("entry");
    assert!((pair[&assignment("AA")] + 0.0625).abs() < 1e-9);
    assert!((pair[&assignment("AT")] - 0.0625).abs() < 1e-9);
    assert!((pair[&assignment("TA")] - 0.0625).abs() < 1e-9);
    assert!((pair[&assignment("TT")] + 0.0625).abs() < 1e-9);

    let skew = table.get(&base(&[1, 2])).expect("entry");
    assert!((skew[&assignment("AA")] - 0.0375).abs() < 1e-9);
    assert!((skew[&assignment("TT")] - 0.0375).abs() < 1e-9);

    let triple = table.get(&base(&[0, 1, 2])).expect("entry");
    assert_eq!(triple.len(), 8);
    assert!((triple[&assignment("AAA")] - 0.0125).abs() < 1e-9);
    assert!((triple[&assignment("TTT")] + 0.0125).abs() < 1e-9);
}

#[test]
fn finalized_components_are_zero_mean() {
    let decomposition = engine(Strategy::Graph).calculate().expect("decomposition");
    for (_, values) in decomposition.table.iter() {
        let mean: f64 = values.values().sum::<f64>() / values.len() as f64;
        assert!(mean.abs() < 1e-9);
    }
}

#[test]
fn strategies_agree_on_consistent_data() {
    let walked = engine(Strategy::Graph).calculate().expect("decomposition");
    let regressed = engine(Strategy::Regression).calculate().expect("decomposition");
    for (key, values) in walked.table.iter() {
        let other = regressed.table.get(key).expect("entry");
        for (assignment, value) in values {
            assert!((other[assignment] - value).abs() < 1e-6, "{key} {assignment}");
        }
    }
}

/// The raw potential difference between two assignments of a base must
/// telescope into the summed epistasis contributions of every subset base.
#[test]
fn raw_potentials_telescope_into_contributions() {
    let engine = engine(Strategy::Graph);
    let decomposition = engine.calculate().expect("decomposition");
    let table = &decomposition.table;

    let full = base(&[0, 1, 2]);
    let raw = engine.raw_potential(&full).expect("raw");
    let assignments: Vec<Assignment> = raw.keys().cloned().collect();
    let mut subsets = scarp_core::combin::proper_subsets(&full);
    subsets.push(full.clone());

    for a in &assignments {
        for b in &assignments {
            let mut summed = 0.0;
            for subset in &subsets {
                let pa = scarp_core::combin::project_assignment(subset, &full, a).expect("proj");
                let pb = scarp_core::combin::project_assignment(subset, &full, b).expect("proj");
                let entry = table.get(subset).expect("entry");
                summed += entry[&pb] - entry[&pa];
            }
            assert!((summed - (raw[b] - raw[a])).abs() < 1e-9);
        }
    }
}
