//! Replenish command implementation.
//!
//! Runs the replenishment pipeline simulation and prints the aggregate
//! stockout and pipeline statistics.

use anyhow::Result;
use clap::Args;

use quantops_inventory::replenishment::{run_replenishment, ReplenishmentConfig};

use crate::cli::OutputFormat;
use crate::commands::validate_probability;
use crate::output::{print_header, print_output, KeyValue};

/// Arguments for the replenish command.
#[derive(Args, Debug)]
pub struct ReplenishArgs {
    /// Mean weekly demand in units
    #[arg(short, long)]
    pub mean: f64,

    /// Standard deviation of weekly demand
    #[arg(short, long)]
    pub std_dev: f64,

    /// Replenishment lead time in weeks
    #[arg(short, long, default_value = "6")]
    pub lead_time: usize,

    /// Target stockout probability for the initial safety stock
    #[arg(long, default_value = "0.02")]
    pub tolerance: f64,

    /// Weeks simulated per trial
    #[arg(long, default_value = "52")]
    pub horizon: usize,

    /// Number of independent trials
    #[arg(short, long, default_value = "100")]
    pub trials: usize,

    /// RNG seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Execute the replenish command.
pub fn execute(args: ReplenishArgs, format: OutputFormat) -> Result<()> {
    validate_probability("tolerance", args.tolerance)?;

    let config = ReplenishmentConfig {
        mean_weekly_demand: args.mean,
        weekly_std_dev: args.std_dev,
        lead_time_weeks: args.lead_time,
        stockout_tolerance: args.tolerance,
        horizon_weeks: args.horizon,
        trials: args.trials,
        seed: args.seed,
    };

    let report = run_replenishment(&config)?;

    let results = vec![
        KeyValue::new("Trials", args.trials.to_string()),
        KeyValue::new("Horizon", format!("{} weeks", args.horizon)),
        KeyValue::new(
            "Initial Safety Stock",
            format!("{:.1} units", report.initial_safety_stock),
        ),
        KeyValue::new(
            "Average Pipeline Volume",
            format!("{:.1} units", report.average_pipeline_volume),
        ),
        KeyValue::new(
            "Stockout Probability",
            format!("{:.4}", report.stockout_probability),
        ),
    ];

    print_header("Replenishment Simulation", format);
    print_output(&results, format)
}
