use serde::{Deserialize, Serialize};

/// A derived edge of the neighbour graph: mutating `source` at `position`
/// from `from_symbol` to `to_symbol` yields `target`, and `target` exists in
/// the dataset. The reverse substitution is a distinct edge recorded on the
/// target's adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighbourEdge {
    /// Row index of the sequence the substitution starts from.
    pub source: usize,
    /// Row index of the sequence the substitution produces.
    pub target: usize,
    /// Mutated position.
    pub position: usize,
    /// Symbol present at `position` in the source sequence.
    pub from_symbol: char,
    /// Symbol present at `position` in the target sequence.
    pub to_symbol: char,
}
