#![deny(missing_docs)]
#![doc = "Core types and combinatorics for the scarp fitness-landscape engine."]

pub mod alphabet;
pub mod combin;
pub mod errors;
pub mod provenance;
pub mod residues;
pub mod scenery;

pub use alphabet::Alphabet;
pub use errors::{ErrorInfo, ScarpError};
pub use provenance::{AnalysisProvenance, SchemaVersion};
pub use residues::{Assignment, MultiResidue, Partition};
pub use scenery::Scenery;
