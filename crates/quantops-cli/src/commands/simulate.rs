//! Simulate command implementation.
//!
//! Monte Carlo estimate of a joint-event probability, with the exact
//! closed form for comparison.

use anyhow::{bail, Result};
use clap::Args;

use quantops_sim::{
    estimate, estimate_batch, EstimatorConfig, EventSpec, JointEventExperiment,
};

use crate::cli::OutputFormat;
use crate::output::{print_header, print_output, KeyValue};

/// Arguments for the simulate command.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Rounds per trial
    #[arg(short, long, default_value = "2")]
    pub rounds: u32,

    /// Events as name=probability; repeat for each event.
    /// Defaults to the two-channel posting example (tweet=0.8, post=0.6).
    #[arg(short, long = "event")]
    pub events: Vec<String>,

    /// Number of trials per run
    #[arg(short, long, default_value = "1000000")]
    pub trials: u64,

    /// Record a convergence point every this many trials (0 disables)
    #[arg(long, default_value = "1000")]
    pub sample_every: u64,

    /// Number of runs to average
    #[arg(long, default_value = "1")]
    pub simulations: u32,

    /// RNG seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
}

fn parse_events(specs: &[String]) -> Result<Vec<EventSpec>> {
    if specs.is_empty() {
        return Ok(vec![
            EventSpec::new("tweet", 0.8),
            EventSpec::new("post", 0.6),
        ]);
    }

    let mut events = Vec::with_capacity(specs.len());
    for spec in specs {
        let Some((name, prob)) = spec.split_once('=') else {
            bail!("event '{spec}' is not in name=probability form");
        };
        let probability: f64 = prob
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("bad probability in '{spec}'"))?;
        events.push(EventSpec::new(name.trim(), probability));
    }
    Ok(events)
}

/// Execute the simulate command.
pub fn execute(args: SimulateArgs, format: OutputFormat) -> Result<()> {
    let events = parse_events(&args.events)?;
    let experiment = JointEventExperiment::new(args.rounds, events)?;

    let config = EstimatorConfig {
        trials: args.trials,
        sample_every: args.sample_every,
        seed: args.seed,
    };

    let mut results = vec![
        KeyValue::new("Rounds", args.rounds.to_string()),
        KeyValue::new(
            "Events",
            experiment
                .events()
                .iter()
                .map(|e| format!("{}={}", e.name, e.probability))
                .collect::<Vec<_>>()
                .join(", "),
        ),
        KeyValue::new(
            "Exact Probability",
            format!("{:.6}", experiment.exact_probability()),
        ),
    ];

    if args.simulations > 1 {
        let batch = estimate_batch(&experiment, args.simulations, &config)?;
        results.push(KeyValue::new("Runs", args.simulations.to_string()));
        results.push(KeyValue::new(
            "Trials per Run",
            args.trials.to_string(),
        ));
        results.push(KeyValue::new(
            "Estimated Probability",
            format!("{:.6}", batch.mean_probability),
        ));
    } else {
        let outcome = estimate(&experiment, &config)?;
        results.push(KeyValue::new("Trials", outcome.trials.to_string()));
        results.push(KeyValue::new("Successes", outcome.successes.to_string()));
        results.push(KeyValue::new(
            "Estimated Probability",
            format!("{:.6}", outcome.probability),
        ));
    }

    print_header("Joint-Event Simulation", format);
    print_output(&results, format)
}
