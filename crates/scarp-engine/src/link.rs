use std::collections::BTreeMap;

use scarp_core::combin::{all_bases, bases_containing};
use scarp_core::MultiResidue;
use scarp_graph::{NeighbourEdge, NeighbourGraph};

/// Maps every base up to the maximum order to the neighbour edges whose
/// mutated position it contains. Prefilled for every base, so unsampled bases
/// still finalize (empty) table entries. Built once, then shared read-only.
#[derive(Debug, Clone)]
pub(crate) struct LinkIndex {
    links: BTreeMap<MultiResidue, Vec<NeighbourEdge>>,
}

impl LinkIndex {
    pub(crate) fn build(graph: &NeighbourGraph, max_order: usize) -> Self {
        let length = graph.sequence_length();
        let mut links: BTreeMap<MultiResidue, Vec<NeighbourEdge>> = all_bases(length, max_order)
            .into_iter()
            .map(|base| (base, Vec::new()))
            .collect();
        for edge in graph.edges() {
            for base in bases_containing(&MultiResidue::singleton(edge.position), length, max_order)
            {
                if let Some(slot) = links.get_mut(&base) {
                    slot.push(*edge);
                }
            }
        }
        Self { links }
    }

    pub(crate) fn edges_for(&self, base: &MultiResidue) -> &[NeighbourEdge] {
        self.links.get(base).map(Vec::as_slice).unwrap_or(&[])
    }
}
