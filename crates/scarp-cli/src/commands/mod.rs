pub mod epistasis;
pub mod ruggedness;

use std::error::Error;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use scarp_core::{Alphabet, ErrorInfo, ScarpError, Scenery};
use scarp_io::{read_mutation_csv, read_sequence_csv, MutationColumns, SequenceColumns};

/// Layout of the input CSV.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum InputFormat {
    /// One full sequence per row.
    Seq,
    /// Mutation strings applied to a wild-type sequence.
    Mut,
}

/// Dataset selection flags shared by every subcommand.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// CSV dataset to analyse.
    #[arg(long)]
    pub input: PathBuf,
    /// Dataset layout.
    #[arg(long, value_enum, default_value = "seq")]
    pub format: InputFormat,
    /// Column holding full sequences (sequence format).
    #[arg(long, default_value = "Sequence")]
    pub sequence_col: String,
    /// Column holding mutation strings (mutation format).
    #[arg(long, default_value = "variant")]
    pub mutation_col: String,
    /// Column holding fitness values.
    #[arg(long, default_value = "Fitness")]
    pub fitness_col: String,
    /// Wild-type sequence (required for the mutation format).
    #[arg(long)]
    pub wild_type: Option<String>,
    /// Mutation index offset: 0 for 1-based positions, 1 for 0-based.
    #[arg(long, default_value_t = 0)]
    pub offset: i64,
    /// Symbols of the sequence alphabet.
    #[arg(long, default_value = "ACDEFGHIKLMNPQRSTVWY")]
    pub alphabet: String,
}

pub fn load_scenery(args: &InputArgs) -> Result<Scenery, Box<dyn Error>> {
    let scenery = match args.format {
        InputFormat::Seq => read_sequence_csv(
            &args.input,
            &SequenceColumns {
                sequence: args.sequence_col.clone(),
                fitness: args.fitness_col.clone(),
            },
        )?,
        InputFormat::Mut => {
            let wild_type = args.wild_type.clone().ok_or_else(|| {
                ScarpError::Config(ErrorInfo::new(
                    "missing-wild-type",
                    "the mutation format requires --wild-type",
                ))
            })?;
            read_mutation_csv(
                &args.input,
                &MutationColumns {
                    mutation: args.mutation_col.clone(),
                    fitness: args.fitness_col.clone(),
                    wild_type,
                    offset: args.offset,
                },
            )?
        }
    };
    Ok(scenery)
}

pub fn load_alphabet(args: &InputArgs) -> Result<Alphabet, Box<dyn Error>> {
    Ok(Alphabet::from_symbols(&args.alphabet)?)
}
