use std::path::Path;

use csv::ReaderBuilder;
use scarp_core::{ScarpError, Scenery};

use crate::{column_index, field, parse_fitness, wrap_csv};

/// Column names of a sequence-format dataset.
#[derive(Debug, Clone)]
pub struct SequenceColumns {
    /// Column holding the full sequence of each variant.
    pub sequence: String,
    /// Column holding the numeric fitness of each variant.
    pub fitness: String,
}

/// Reads a sequence-format CSV (one full sequence and one fitness value per
/// row) into a validated [`Scenery`].
pub fn read_sequence_csv(path: &Path, columns: &SequenceColumns) -> Result<Scenery, ScarpError> {
    let mut reader = ReaderBuilder::new()
        .from_path(path)
        .map_err(|err| wrap_csv("open-csv", err))?;
    let headers = reader.headers().map_err(|err| wrap_csv("read-header", err))?;
    let sequence_index = column_index(headers, &columns.sequence)?;
    let fitness_index = column_index(headers, &columns.fitness)?;

    let mut sequences = Vec::new();
    let mut fitness = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|err| wrap_csv("read-row", err))?;
        sequences.push(field(&record, sequence_index, row)?.trim().to_string());
        fitness.push(parse_fitness(field(&record, fitness_index, row)?, row)?);
    }
    Scenery::new(sequences, fitness)
}
