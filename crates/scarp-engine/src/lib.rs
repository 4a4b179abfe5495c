#![deny(missing_docs)]
#![doc = "Order-by-order epistasis decomposition of combinatorial fitness landscapes."]

/// Basis-attribution probabilities derived from selection records.
pub mod attribution;
/// Canonical JSON serialization helpers.
pub mod canonical;
/// The decomposition engine and its options.
pub mod engine;
/// Canonical hashing helpers.
pub mod hash;
mod link;
mod minvar;
/// Report assembly for analysis artifacts.
pub mod report;
/// Ruggedness estimation over the neighbour graph.
pub mod ruggedness;
/// Statistical aggregation primitives.
pub mod stat;
/// Write-once epistasis tables.
pub mod table;

pub use attribution::{attribute, BasisAttribution};
pub use engine::{Decomposition, EngineOpts, EpistasisEngine, SelectionPolicy};
pub use minvar::{BasisSelections, CandidateOutcome, SelectionRecord};
pub use report::AnalysisReport;
pub use ruggedness::ruggedness;
pub use scarp_solve::Strategy;
pub use table::EpistasisTable;
