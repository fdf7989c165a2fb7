//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    BondArgs, FrontierArgs, InventoryArgs, ProjectArgs, ReplenishArgs, SimulateArgs,
};

/// QuantOps - quantitative finance and operations analytics CLI
#[derive(Parser)]
#[command(name = "quantops")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Convert between bond price, yield, and coupon quotes
    Bond(BondArgs),

    /// Evaluate reorder policies over a SKU file
    Inventory(InventoryArgs),

    /// Simulate a replenishment pipeline under random demand
    Replenish(ReplenishArgs),

    /// Mean-variance portfolios and the efficient frontier
    Frontier(FrontierArgs),

    /// Project monthly financial statements from a scenario file
    Project(ProjectArgs),

    /// Estimate a joint-event probability by Monte Carlo
    Simulate(SimulateArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the values)
    Minimal,
}
