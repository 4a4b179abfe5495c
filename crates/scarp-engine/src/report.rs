use std::collections::BTreeMap;

use scarp_core::{AnalysisProvenance, ScarpError, SchemaVersion};
use serde::Serialize;

use crate::attribution::BasisAttribution;
use crate::engine::{Decomposition, EpistasisEngine, SelectionPolicy};
use crate::hash::stable_hash_string;
use crate::minvar::BasisSelections;
use crate::table::EpistasisTable;

/// Serializable bundle of one analysis run: parameters, provenance, results
/// and a stable content hash. Written as canonical JSON by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Schema version of this payload.
    pub schema_version: SchemaVersion,
    /// Input provenance.
    pub provenance: AnalysisProvenance,
    /// Highest decomposed order.
    pub max_order: usize,
    /// Reconciliation strategy name.
    pub strategy: String,
    /// Lower-order subtraction policy.
    pub selection: SelectionPolicy,
    /// Ruggedness estimate, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ruggedness: Option<f64>,
    /// Finalized epistasis values.
    pub epistasis: EpistasisTable,
    /// Basis selection records (minimum-variance runs only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selections: Option<BasisSelections>,
    /// Basis attribution probabilities, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<BasisAttribution>,
    /// Stable hash of the epistasis table.
    pub table_hash: String,
}

impl AnalysisReport {
    /// Assembles the report for a finished run, computing the input and
    /// table hashes.
    pub fn assemble(
        engine: &EpistasisEngine,
        decomposition: Decomposition,
        ruggedness: Option<f64>,
        attribution: Option<BasisAttribution>,
    ) -> Result<Self, ScarpError> {
        let scenery = engine.scenery();
        let input_hash =
            stable_hash_string(&(scenery.sequences(), scenery.fitness_values()))?;
        let table_hash = stable_hash_string(&decomposition.table)?;

        let mut tool_versions = BTreeMap::new();
        tool_versions.insert(
            env!("CARGO_PKG_NAME").to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );

        Ok(Self {
            schema_version: SchemaVersion::default(),
            provenance: AnalysisProvenance {
                input_hash,
                sequence_count: scenery.sequence_count(),
                sequence_length: scenery.sequence_length(),
                alphabet: engine.alphabet().to_string(),
                tool_versions,
            },
            max_order: engine.opts().max_order,
            strategy: engine.strategy_name().to_string(),
            selection: engine.opts().selection,
            ruggedness,
            epistasis: decomposition.table,
            selections: decomposition.selections,
            attribution,
            table_hash,
        })
    }
}
