#![deny(missing_docs)]
#![doc = "Reconciliation of pairwise fitness differences into per-assignment potentials."]

mod bfs;
mod diffs;
mod reconcile;
mod regression;

pub use bfs::GraphReconciler;
pub use diffs::{DiffObservations, PairDiffs};
pub use reconcile::{Potentials, Reconciler, Strategy};
pub use regression::RegressionReconciler;
