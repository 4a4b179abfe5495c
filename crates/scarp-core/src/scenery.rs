//! Validated sequence/fitness datasets.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, ScarpError};
use crate::residues::{Assignment, MultiResidue};

fn config_error(code: &str, message: impl Into<String>) -> ScarpError {
    ScarpError::Config(ErrorInfo::new(code, message.into()))
}

/// An immutable fitness landscape sample: unique, equal-length sequences and
/// one fitness value per sequence. Row order is preserved and the
/// sequence→index map stays bijective with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SceneryPayload", into = "SceneryPayload")]
pub struct Scenery {
    sequences: Vec<String>,
    fitness: Vec<f64>,
    rows: Vec<Box<[char]>>,
    index: HashMap<String, usize>,
    length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SceneryPayload {
    sequences: Vec<String>,
    fitness: Vec<f64>,
}

impl TryFrom<SceneryPayload> for Scenery {
    type Error = ScarpError;

    fn try_from(payload: SceneryPayload) -> Result<Self, Self::Error> {
        Scenery::new(payload.sequences, payload.fitness)
    }
}

impl From<Scenery> for SceneryPayload {
    fn from(scenery: Scenery) -> Self {
        Self {
            sequences: scenery.sequences,
            fitness: scenery.fitness,
        }
    }
}

impl Scenery {
    /// Validates and wraps a dataset. Fails fast on an empty dataset, a
    /// sequence/fitness length mismatch, unequal sequence lengths, or
    /// duplicate sequences.
    pub fn new(sequences: Vec<String>, fitness: Vec<f64>) -> Result<Self, ScarpError> {
        if sequences.is_empty() {
            return Err(config_error("empty-dataset", "a scenery needs at least one sequence"));
        }
        if sequences.len() != fitness.len() {
            return Err(ScarpError::Config(
                ErrorInfo::new(
                    "fitness-length-mismatch",
                    "every sequence needs exactly one fitness value",
                )
                .with_context("sequences", sequences.len().to_string())
                .with_context("fitness", fitness.len().to_string()),
            ));
        }

        let rows: Vec<Box<[char]>> = sequences
            .iter()
            .map(|sequence| sequence.chars().collect())
            .collect();
        let length = rows[0].len();
        if length == 0 {
            return Err(config_error("empty-sequence", "sequences must be non-empty"));
        }
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != length {
                return Err(ScarpError::Config(
                    ErrorInfo::new("ragged-sequences", "all sequences must share one length")
                        .with_context("expected", length.to_string())
                        .with_context("row", row_index.to_string())
                        .with_context("found", row.len().to_string()),
                ));
            }
        }

        let mut index = HashMap::with_capacity(sequences.len());
        for (row_index, sequence) in sequences.iter().enumerate() {
            if index.insert(sequence.clone(), row_index).is_some() {
                return Err(ScarpError::Config(
                    ErrorInfo::new("duplicate-sequence", "sequences must be unique")
                        .with_context("sequence", sequence.clone()),
                ));
            }
        }

        Ok(Self {
            sequences,
            fitness,
            rows,
            index,
            length,
        })
    }

    /// Returns the number of sequences.
    pub fn sequence_count(&self) -> usize {
        self.sequences.len()
    }

    /// Returns the shared sequence length L.
    pub fn sequence_length(&self) -> usize {
        self.length
    }

    /// Returns the sequence at `row`.
    pub fn sequence(&self, row: usize) -> &str {
        &self.sequences[row]
    }

    /// Returns all sequences in row order.
    pub fn sequences(&self) -> &[String] {
        &self.sequences
    }

    /// Returns the symbols of the sequence at `row`.
    pub fn row(&self, row: usize) -> &[char] {
        &self.rows[row]
    }

    /// Returns the fitness of the sequence at `row`.
    pub fn fitness(&self, row: usize) -> f64 {
        self.fitness[row]
    }

    /// Returns all fitness values in row order.
    pub fn fitness_values(&self) -> &[f64] {
        &self.fitness
    }

    /// Looks up the row index of a sequence, if present.
    pub fn index_of(&self, sequence: &str) -> Option<usize> {
        self.index.get(sequence).copied()
    }

    /// Reads the assignment of `base` in the sequence at `row`.
    pub fn assignment_at(&self, row: usize, base: &MultiResidue) -> Assignment {
        let symbols = base.positions().iter().map(|&p| self.rows[row][p]);
        Assignment::from_symbols(symbols)
    }
}
