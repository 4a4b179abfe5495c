//! Combinatorial enumeration of bases, subsets and basis partitions.
//!
//! Every function here is pure and returns its results in a deterministic
//! order (ascending size, then lexicographic), so downstream iteration and
//! fan-out are reproducible.

use std::collections::BTreeSet;

use itertools::Itertools;

use crate::errors::{ErrorInfo, ScarpError};
use crate::residues::{Assignment, MultiResidue, Partition};

/// Enumerates every base of exactly `order` positions drawn from `[0, length)`,
/// lexicographically.
pub fn bases_of_order(length: usize, order: usize) -> Vec<MultiResidue> {
    (0..length)
        .combinations(order)
        .map(MultiResidue::from_sorted)
        .collect()
}

/// Enumerates every base of size `1..=max_order` drawn from `[0, length)`,
/// smallest orders first.
pub fn all_bases(length: usize, max_order: usize) -> Vec<MultiResidue> {
    (1..=max_order)
        .flat_map(|order| bases_of_order(length, order))
        .collect()
}

/// Enumerates every superset base of `fixed` reachable within `max_order`
/// orders: each subset of size `0..max_order` of the positions outside
/// `fixed`, unioned with `fixed` and re-sorted. Smallest results first.
pub fn bases_containing(fixed: &MultiResidue, length: usize, max_order: usize) -> Vec<MultiResidue> {
    let outside: Vec<usize> = (0..length).filter(|&p| !fixed.contains(p)).collect();
    let mut bases = Vec::new();
    for extra in 0..max_order {
        for addition in outside.iter().copied().combinations(extra) {
            let mut positions: Vec<usize> =
                fixed.positions().iter().copied().chain(addition).collect();
            positions.sort_unstable();
            bases.push(MultiResidue::from_sorted(positions));
        }
    }
    bases
}

/// Enumerates every non-empty proper subset of `base`, smallest first then
/// lexicographic.
pub fn proper_subsets(base: &MultiResidue) -> Vec<MultiResidue> {
    (1..base.order())
        .flat_map(|order| {
            base.positions()
                .iter()
                .copied()
                .combinations(order)
                .map(MultiResidue::from_sorted)
        })
        .collect()
}

/// Enumerates the candidate basis choices for `base`: the full singleton
/// partition plus every {base minus one element, that element} split,
/// deduplicated. Order-1 bases have no candidates.
pub fn candidate_partitions(base: &MultiResidue) -> Vec<Partition> {
    if base.order() < 2 {
        return Vec::new();
    }
    let mut candidates = BTreeSet::new();
    let singletons = base
        .positions()
        .iter()
        .map(|&p| MultiResidue::singleton(p))
        .collect();
    candidates.insert(Partition::from_disjoint_parts(singletons));
    for &held_out in base.positions() {
        let rest: Vec<usize> = base
            .positions()
            .iter()
            .copied()
            .filter(|&p| p != held_out)
            .collect();
        candidates.insert(Partition::from_disjoint_parts(vec![
            MultiResidue::from_sorted(rest),
            MultiResidue::singleton(held_out),
        ]));
    }
    candidates.into_iter().collect()
}

/// Enumerates every non-empty proper subset of a partition's parts as a
/// sub-partition, smallest first then lexicographic.
pub fn part_subsets(partition: &Partition) -> Vec<Partition> {
    (1..partition.len())
        .flat_map(|size| {
            partition
                .parts()
                .iter()
                .cloned()
                .combinations(size)
                .map(Partition::from_disjoint_parts)
        })
        .collect()
}

/// Restricts an assignment over `global`'s positions to `local`'s positions,
/// preserving `local`'s own sort order.
pub fn project_assignment(
    local: &MultiResidue,
    global: &MultiResidue,
    assignment: &Assignment,
) -> Result<Assignment, ScarpError> {
    if assignment.len() != global.order() {
        return Err(ScarpError::Engine(
            ErrorInfo::new("assignment-arity", "assignment arity must match its base")
                .with_context("base", global.to_string())
                .with_context("assignment", assignment.to_string()),
        ));
    }
    let symbols = local
        .positions()
        .iter()
        .map(|&position| {
            global
                .rank_of(position)
                .map(|rank| assignment.symbols()[rank])
                .ok_or_else(|| {
                    ScarpError::Engine(
                        ErrorInfo::new("projection-out-of-base", "local base must be a subset")
                            .with_context("local", local.to_string())
                            .with_context("global", global.to_string()),
                    )
                })
        })
        .collect::<Result<Vec<char>, ScarpError>>()?;
    Ok(Assignment::from_symbols(symbols))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(positions: &[usize]) -> MultiResidue {
        MultiResidue::new(positions.to_vec()).expect("base")
    }

    #[test]
    fn all_bases_order_then_lex() {
        let bases: Vec<String> = all_bases(3, 2).iter().map(|b| b.to_string()).collect();
        assert_eq!(bases, ["0", "1", "2", "0,1", "0,2", "1,2"]);
    }

    #[test]
    fn bases_containing_grows_around_fixed() {
        let around: Vec<String> = bases_containing(&MultiResidue::singleton(1), 3, 3)
            .iter()
            .map(|b| b.to_string())
            .collect();
        assert_eq!(around, ["1", "0,1", "1,2", "0,1,2"]);
    }

    #[test]
    fn proper_subsets_of_a_triple() {
        let subsets: Vec<String> = proper_subsets(&base(&[0, 1, 2]))
            .iter()
            .map(|b| b.to_string())
            .collect();
        assert_eq!(subsets, ["0", "1", "2", "0,1", "0,2", "1,2"]);
        assert!(proper_subsets(&MultiResidue::singleton(4)).is_empty());
    }

    #[test]
    fn candidate_partitions_dedupe() {
        let pair: Vec<String> = candidate_partitions(&base(&[0, 1]))
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(pair, ["0+1"]);

        let triple: Vec<String> = candidate_partitions(&base(&[0, 1, 2]))
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(triple, ["0+1+2", "0+1,2", "0,1+2", "0,2+1"]);
        assert!(candidate_partitions(&MultiResidue::singleton(0)).is_empty());
    }

    #[test]
    fn part_subsets_of_a_partition() {
        let partition: Partition = "0+1+2".parse().expect("partition");
        let subs: Vec<String> = part_subsets(&partition)
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(subs, ["0", "1", "2", "0+1", "0+2", "1+2"]);
    }

    #[test]
    fn projection_reindexes_by_rank() {
        let global = base(&[0, 2, 3]);
        let assignment = Assignment::from_symbols("ACE".chars());
        let projected =
            project_assignment(&base(&[0, 3]), &global, &assignment).expect("projection");
        assert_eq!(projected.to_string(), "AE");

        let identity =
            project_assignment(&global, &global, &assignment).expect("projection");
        assert_eq!(identity, assignment);

        let err = project_assignment(&base(&[1]), &global, &assignment).unwrap_err();
        assert_eq!(err.info().code, "projection-out-of-base");
    }
}
