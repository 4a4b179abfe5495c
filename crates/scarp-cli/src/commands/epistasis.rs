use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use scarp_engine::canonical::to_canonical_json_bytes;
use scarp_engine::{
    attribute, ruggedness, AnalysisReport, BasisAttribution, EngineOpts, EpistasisEngine,
    SelectionPolicy, Strategy,
};

use super::{load_alphabet, load_scenery, InputArgs};

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum StrategyArg {
    /// Spanning-tree propagation (default).
    Graph,
    /// Weighted least-squares regression.
    Regression,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SelectionArg {
    /// Canonical proper-subset subtraction (default).
    Canonical,
    /// Minimum-variance basis selection.
    MinVariance,
}

/// Arguments of `scarp epistasis`.
#[derive(Args, Debug)]
pub struct EpistasisArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Highest interaction order to decompose.
    #[arg(long)]
    pub max_order: usize,
    /// Potential reconciliation strategy.
    #[arg(long, value_enum, default_value = "graph")]
    pub strategy: StrategyArg,
    /// Lower-order subtraction policy.
    #[arg(long, value_enum, default_value = "canonical")]
    pub selection: SelectionArg,
    /// Also derive basis-attribution probabilities (min-variance only).
    #[arg(long)]
    pub attribution: bool,
    /// Worker threads for the within-order fan-out.
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,
    /// Write the canonical JSON report to this path.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &EpistasisArgs) -> Result<(), Box<dyn Error>> {
    let scenery = load_scenery(&args.input)?;
    let alphabet = load_alphabet(&args.input)?;

    let opts = EngineOpts {
        max_order: args.max_order,
        strategy: match args.strategy {
            StrategyArg::Graph => Strategy::Graph,
            StrategyArg::Regression => Strategy::Regression,
        },
        selection: match args.selection {
            SelectionArg::Canonical => SelectionPolicy::Canonical,
            SelectionArg::MinVariance => SelectionPolicy::MinimumVariance,
        },
        concurrency: args.concurrency,
    };
    let engine = EpistasisEngine::new(scenery, alphabet, opts)?;
    let decomposition = engine.calculate()?;
    let rug = ruggedness(engine.graph(), engine.scenery());

    let attribution: Option<BasisAttribution> = match (&decomposition.selections, args.attribution)
    {
        (Some(selections), true) => Some(attribute(selections)),
        (None, true) => {
            return Err(Box::from(
                "--attribution requires --selection min-variance".to_string(),
            ))
        }
        _ => None,
    };

    render_table(&decomposition.table);
    if let Some(attribution) = &attribution {
        render_attribution(attribution);
    }
    println!("Ruggedness: {rug}");

    if let Some(out) = &args.out {
        let report = AnalysisReport::assemble(&engine, decomposition, Some(rug), attribution)?;
        fs::write(out, to_canonical_json_bytes(&report)?)?;
        println!("Report: written to {}", out.display());
    }
    Ok(())
}

fn render_table(table: &scarp_engine::EpistasisTable) {
    println!("{:<12} {:<12} {:>14}", "base", "assignment", "epistasis");
    for (base, values) in table.iter() {
        for (assignment, value) in values {
            println!(
                "{:<12} {:<12} {:>14.6}",
                base.to_string(),
                assignment.to_string(),
                value
            );
        }
    }
}

fn render_attribution(attribution: &BasisAttribution) {
    println!("{:<12} {:>12}", "sub-base", "probability");
    for (base, probability) in &attribution.probabilities {
        println!("{:<12} {:>12.4}", base.to_string(), probability);
    }
}
