use std::error::Error;

use clap::Args;
use scarp_engine::ruggedness;
use scarp_graph::NeighbourGraph;

use super::{load_alphabet, load_scenery, InputArgs};

/// Arguments of `scarp ruggedness`.
#[derive(Args, Debug)]
pub struct RuggednessArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

pub fn run(args: &RuggednessArgs) -> Result<(), Box<dyn Error>> {
    let scenery = load_scenery(&args.input)?;
    let alphabet = load_alphabet(&args.input)?;
    let graph = NeighbourGraph::build(&scenery, &alphabet);
    let value = ruggedness(&graph, &scenery);
    println!("Ruggedness: {value}");
    Ok(())
}
