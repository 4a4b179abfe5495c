use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{epistasis, ruggedness};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "scarp", about = "Fitness landscape ruggedness and epistasis analysis")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate the ruggedness of a dataset.
    Ruggedness(ruggedness::RuggednessArgs),
    /// Decompose a dataset into epistasis terms up to a maximum order.
    Epistasis(epistasis::EpistasisArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Ruggedness(args) => ruggedness::run(&args),
        Command::Epistasis(args) => epistasis::run(&args),
    }
}
