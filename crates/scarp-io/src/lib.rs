#![deny(missing_docs)]
#![doc = "CSV ingestion producing validated sceneries."]

mod mutation;
mod seq;

pub use mutation::{read_mutation_csv, MutationColumns};
pub use seq::{read_sequence_csv, SequenceColumns};

use scarp_core::{ErrorInfo, ScarpError};

pub(crate) fn wrap_csv(code: &str, err: csv::Error) -> ScarpError {
    ScarpError::Parse(ErrorInfo::new(code, "CSV read failure").with_hint(err.to_string()))
}

pub(crate) fn column_index(
    headers: &csv::StringRecord,
    name: &str,
) -> Result<usize, ScarpError> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| {
            ScarpError::Parse(
                ErrorInfo::new("missing-column", "required column not found in header")
                    .with_context("column", name.to_string()),
            )
        })
}

pub(crate) fn parse_fitness(raw: &str, row: usize) -> Result<f64, ScarpError> {
    raw.trim().parse::<f64>().map_err(|err| {
        ScarpError::Parse(
            ErrorInfo::new("bad-fitness", "fitness value is not numeric")
                .with_context("row", row.to_string())
                .with_context("value", raw.to_string())
                .with_hint(err.to_string()),
        )
    })
}

pub(crate) fn field<'r>(
    record: &'r csv::StringRecord,
    index: usize,
    row: usize,
) -> Result<&'r str, ScarpError> {
    record.get(index).ok_or_else(|| {
        ScarpError::Parse(
            ErrorInfo::new("short-row", "row has fewer fields than the header")
                .with_context("row", row.to_string()),
        )
    })
}
