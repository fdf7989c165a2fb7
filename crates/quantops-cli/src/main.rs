//! QuantOps CLI - command-line interface for the analytics library.
//!
//! # Usage
//!
//! ```bash
//! # Price a bond from a yield
//! quantops bond --par 1000 --coupon 7.0 --maturity-years 30 --yield-value 6.5
//!
//! # Evaluate reorder policies over a SKU file
//! quantops inventory --file dc-skus.csv --reorder lead-time-cover
//!
//! # Simulate the replenishment pipeline
//! quantops replenish --mean 5777 --std-dev 3122 --lead-time 6 --trials 100
//!
//! # Efficient frontier from a price history
//! quantops frontier --file prices.csv --window 20 --points 50
//!
//! # Project monthly financial statements from a scenario
//! quantops project --file seasonal-plan.toml
//!
//! # Joint-event probability estimate
//! quantops simulate --trials 1000000 --event tweet=0.8 --event post=0.6
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = cli.format;

    match cli.command {
        Commands::Bond(args) => commands::bond::execute(args, format)?,
        Commands::Inventory(args) => commands::inventory::execute(args, format)?,
        Commands::Replenish(args) => commands::replenish::execute(args, format)?,
        Commands::Frontier(args) => commands::frontier::execute(args, format)?,
        Commands::Project(args) => commands::project::execute(args, format)?,
        Commands::Simulate(args) => commands::simulate::execute(args, format)?,
    }

    Ok(())
}
