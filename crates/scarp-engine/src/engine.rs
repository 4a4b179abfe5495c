use std::collections::BTreeMap;
use std::fmt;

use rayon::prelude::*;
use scarp_core::combin::{bases_of_order, project_assignment, proper_subsets};
use scarp_core::{Alphabet, Assignment, ErrorInfo, MultiResidue, ScarpError, Scenery};
use scarp_graph::NeighbourGraph;
use scarp_solve::{DiffObservations, Reconciler, Strategy};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::link::LinkIndex;
use crate::minvar::{self, BasisSelections};
use crate::table::EpistasisTable;

fn engine_error(code: &str, message: impl Into<String>) -> ScarpError {
    ScarpError::Engine(ErrorInfo::new(code, message.into()))
}

/// Policy deciding which lower-order decomposition a base is subtracted
/// against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionPolicy {
    /// Subtract every proper subset base of the canonical decomposition.
    #[default]
    Canonical,
    /// Evaluate candidate basis partitions and keep the lowest-variance one.
    MinimumVariance,
}

/// Options governing a decomposition run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineOpts {
    /// Highest interaction order to decompose (1 ≤ max_order ≤ L).
    pub max_order: usize,
    /// Potential reconciliation strategy.
    pub strategy: Strategy,
    /// Lower-order subtraction policy.
    pub selection: SelectionPolicy,
    /// Number of worker threads for the within-order fan-out.
    pub concurrency: usize,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            max_order: 2,
            strategy: Strategy::default(),
            selection: SelectionPolicy::default(),
            concurrency: 1,
        }
    }
}

/// Result of a decomposition run: the finalized table and, under the
/// minimum-variance policy, the per-base selection records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decomposition {
    /// Finalized epistasis values per base.
    pub table: EpistasisTable,
    /// Basis selection records (minimum-variance policy only).
    pub selections: Option<BasisSelections>,
}

/// Order-by-order epistasis decomposition over a neighbour graph.
///
/// Orders run strictly sequentially; bases within an order fan out across a
/// worker pool, each reading the shared immutable graph and the finalized
/// lower orders and writing only its own table slot.
pub struct EpistasisEngine {
    scenery: Scenery,
    alphabet: Alphabet,
    graph: NeighbourGraph,
    links: LinkIndex,
    reconciler: Box<dyn Reconciler>,
    opts: EngineOpts,
}

impl fmt::Debug for EpistasisEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EpistasisEngine")
            .field("sequences", &self.scenery.sequence_count())
            .field("length", &self.scenery.sequence_length())
            .field("opts", &self.opts)
            .finish_non_exhaustive()
    }
}

impl EpistasisEngine {
    /// Validates the configuration, builds the neighbour graph and the
    /// base→edge link index. Fails fast before any computation when
    /// `max_order` is outside `1..=L`.
    pub fn new(scenery: Scenery, alphabet: Alphabet, opts: EngineOpts) -> Result<Self, ScarpError> {
        let length = scenery.sequence_length();
        if opts.max_order < 1 || opts.max_order > length {
            return Err(ScarpError::Config(
                ErrorInfo::new("max-order-range", "max_order must lie in 1..=sequence_length")
                    .with_context("max_order", opts.max_order.to_string())
                    .with_context("sequence_length", length.to_string()),
            ));
        }
        let graph = NeighbourGraph::build(&scenery, &alphabet);
        let links = LinkIndex::build(&graph, opts.max_order);
        let reconciler = opts.strategy.reconciler();
        Ok(Self {
            scenery,
            alphabet,
            graph,
            links,
            reconciler,
            opts,
        })
    }

    /// Returns the dataset the engine was built over.
    pub fn scenery(&self) -> &Scenery {
        &self.scenery
    }

    /// Returns the alphabet the engine was built over.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns the shared neighbour graph.
    pub fn graph(&self) -> &NeighbourGraph {
        &self.graph
    }

    /// Returns the run options.
    pub fn opts(&self) -> &EngineOpts {
        &self.opts
    }

    /// Returns the name of the active reconciliation strategy.
    pub fn strategy_name(&self) -> &'static str {
        self.reconciler.name()
    }

    /// Runs the full decomposition up to the configured order.
    pub fn calculate(&self) -> Result<Decomposition, ScarpError> {
        match self.opts.selection {
            SelectionPolicy::Canonical => self.calculate_canonical(),
            SelectionPolicy::MinimumVariance => minvar::calculate(self),
        }
    }

    /// Reconciles the raw (pre-subtraction) potential per assignment at
    /// `base`: every linked edge contributes the delta
    /// `fitness[source] − fitness[target]` between the base's assignments in
    /// the two sequences, deltas are averaged per directed assignment pair,
    /// and the reconciler resolves the gauge.
    pub fn raw_potential(&self, base: &MultiResidue) -> Result<BTreeMap<Assignment, f64>, ScarpError> {
        let mut observations = DiffObservations::new();
        for edge in self.links.edges_for(base) {
            let from = self.scenery.assignment_at(edge.source, base);
            let to = self.scenery.assignment_at(edge.target, base);
            let delta = self.scenery.fitness(edge.source) - self.scenery.fitness(edge.target);
            observations.record(from, to, delta);
        }
        self.reconciler.reconcile(&observations.finish())
    }

    fn calculate_canonical(&self) -> Result<Decomposition, ScarpError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.opts.concurrency.max(1))
            .build()
            .map_err(|err| engine_error("thread-pool", err.to_string()))?;

        let length = self.scenery.sequence_length();
        let mut table = EpistasisTable::new();
        for order in 1..=self.opts.max_order {
            let bases = bases_of_order(length, order);
            info!(order, bases = bases.len(), "reconciling order");
            let finalized: Result<Vec<_>, ScarpError> = pool.install(|| {
                bases
                    .par_iter()
                    .map(
                        |base| -> Result<(MultiResidue, BTreeMap<Assignment, f64>), ScarpError> {
                            let raw = self.raw_potential(base)?;
                            let values = subtract_lower(&table, base, raw)?;
                            Ok((base.clone(), values))
                        },
                    )
                    .collect()
            });
            for (base, values) in finalized? {
                table.insert(base, values)?;
            }
        }
        Ok(Decomposition {
            table,
            selections: None,
        })
    }
}

/// Subtracts every finalized proper-subset contribution from `raw`. A
/// projected assignment missing from a subset's table poisons that single
/// value with NaN; the rest of the base stays intact.
pub(crate) fn subtract_lower(
    table: &EpistasisTable,
    base: &MultiResidue,
    mut raw: BTreeMap<Assignment, f64>,
) -> Result<BTreeMap<Assignment, f64>, ScarpError> {
    for subset in proper_subsets(base) {
        let lower = table.get(&subset).ok_or_else(|| {
            engine_error("missing-lower-base", format!("subset {subset} not finalized yet"))
        })?;
        for (assignment, value) in raw.iter_mut() {
            let projected = project_assignment(&subset, base, assignment)?;
            match lower.get(&projected) {
                Some(contribution) => *value -= contribution,
                None => *value = f64::NAN,
            }
        }
    }
    Ok(raw)
}
