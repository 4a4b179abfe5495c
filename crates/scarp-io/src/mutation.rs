use std::path::Path;

use csv::ReaderBuilder;
use scarp_core::{ErrorInfo, ScarpError, Scenery};

use crate::{column_index, field, parse_fitness, wrap_csv};

/// Column names and expansion parameters of a mutation-format dataset.
#[derive(Debug, Clone)]
pub struct MutationColumns {
    /// Column holding colon-separated mutation strings (empty = wild type).
    pub mutation: String,
    /// Column holding the numeric fitness of each variant.
    pub fitness: String,
    /// The wild-type sequence mutations are applied to.
    pub wild_type: String,
    /// Index offset of the dataset: 0 for 1-based mutation positions,
    /// 1 for 0-based.
    pub offset: i64,
}

/// Reads a mutation-format CSV (mutation strings applied to a wild type,
/// e.g. `A2T:G7C`) into a validated [`Scenery`].
pub fn read_mutation_csv(path: &Path, columns: &MutationColumns) -> Result<Scenery, ScarpError> {
    let mut reader = ReaderBuilder::new()
        .from_path(path)
        .map_err(|err| wrap_csv("open-csv", err))?;
    let headers = reader.headers().map_err(|err| wrap_csv("read-header", err))?;
    let mutation_index = column_index(headers, &columns.mutation)?;
    let fitness_index = column_index(headers, &columns.fitness)?;

    let mut sequences = Vec::new();
    let mut fitness = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|err| wrap_csv("read-row", err))?;
        let spec = field(&record, mutation_index, row)?.trim();
        sequences.push(apply_mutations(&columns.wild_type, spec, columns.offset, row)?);
        fitness.push(parse_fitness(field(&record, fitness_index, row)?, row)?);
    }
    Scenery::new(sequences, fitness)
}

/// Applies a colon-separated mutation string to the wild type. Each token is
/// `<from><position><to>`; the position is interpreted through the dataset
/// offset and the `from` symbol must match the sequence built so far.
fn apply_mutations(
    wild_type: &str,
    spec: &str,
    offset: i64,
    row: usize,
) -> Result<String, ScarpError> {
    if spec.is_empty() {
        return Ok(wild_type.to_string());
    }
    let mut symbols: Vec<char> = wild_type.chars().collect();
    for token in spec.split(':') {
        let token = token.trim();
        let mut chars = token.chars();
        let from = chars.next();
        let to = token.chars().last();
        let digits: String = token
            .chars()
            .skip(1)
            .take(token.chars().count().saturating_sub(2))
            .collect();
        let (Some(from), Some(to)) = (from, to) else {
            return Err(bad_token(token, row, "token too short"));
        };
        let position: i64 = digits
            .parse()
            .map_err(|_| bad_token(token, row, "position is not numeric"))?;
        let index = position + offset - 1;
        if index < 0 || index as usize >= symbols.len() {
            return Err(bad_token(token, row, "position outside the wild type"));
        }
        let index = index as usize;
        if symbols[index] != from {
            return Err(ScarpError::Parse(
                ErrorInfo::new(
                    "mutation-mismatch",
                    "mutation source symbol does not match the sequence",
                )
                .with_context("row", row.to_string())
                .with_context("token", token.to_string())
                .with_context("found", symbols[index].to_string()),
            ));
        }
        symbols[index] = to;
    }
    Ok(symbols.into_iter().collect())
}

fn bad_token(token: &str, row: usize, message: &str) -> ScarpError {
    ScarpError::Parse(
        ErrorInfo::new("bad-mutation", message)
            .with_context("row", row.to_string())
            .with_context("token", token.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_spec_is_the_wild_type() {
        assert_eq!(apply_mutations("AAA", "", 0, 0).unwrap(), "AAA");
    }

    #[test]
    fn chained_mutations_apply_in_order() {
        assert_eq!(apply_mutations("AAA", "A1T:A3T", 0, 0).unwrap(), "TAT");
        // Offset 1 means the dataset counts positions from zero.
        assert_eq!(apply_mutations("AAA", "A0T", 1, 0).unwrap(), "TAA");
    }

    #[test]
    fn mismatched_source_symbol_is_rejected() {
        let err = apply_mutations("AAA", "T1G", 0, 0).unwrap_err();
        assert_eq!(err.info().code, "mutation-mismatch");
    }

    #[test]
    fn out_of_range_position_is_rejected() {
        let err = apply_mutations("AAA", "A9T", 0, 0).unwrap_err();
        assert_eq!(err.info().code, "bad-mutation");
    }
}
