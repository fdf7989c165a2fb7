//! Frontier command implementation.
//!
//! Loads a price history, builds windowed returns, and prints the
//! minimum-variance portfolio, the tangency portfolio, and the efficient
//! frontier in annualized terms.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use quantops_core::types::Periodicity;
use quantops_portfolio::frontier::{
    efficient_frontier, max_sharpe_portfolio, min_variance_portfolio, FrontierConfig,
    PortfolioCandidate,
};
use quantops_portfolio::returns::load_price_history;

use crate::cli::OutputFormat;
use crate::output::{print_header, print_output, KeyValue};

/// Arguments for the frontier command.
#[derive(Args, Debug)]
pub struct FrontierArgs {
    /// Price history CSV (Date column plus one column per symbol)
    #[arg(long)]
    pub file: String,

    /// Observation window in trading days
    #[arg(short, long, default_value = "20")]
    pub window: u32,

    /// Annual risk-free rate (decimal)
    #[arg(long, default_value = "0.0021")]
    pub risk_free: f64,

    /// Number of frontier points
    #[arg(short, long, default_value = "50")]
    pub points: usize,

    /// Lowest annual target return on the frontier
    #[arg(long, default_value = "0.09")]
    pub min_target: f64,

    /// Highest annual target return on the frontier
    #[arg(long, default_value = "0.25")]
    pub max_target: f64,
}

/// One annualized frontier row.
#[derive(Debug, Serialize, Tabled)]
struct FrontierRow {
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Return")]
    expected_return: String,
    #[tabled(rename = "Volatility")]
    volatility: String,
    #[tabled(rename = "Sharpe")]
    sharpe: String,
}

fn describe_portfolio(
    label: &str,
    candidate: &PortfolioCandidate,
    symbols: &[String],
    periodicity: Periodicity,
    annual_risk_free: f64,
) -> Vec<KeyValue> {
    let annual = candidate.annualized(periodicity, annual_risk_free);
    let mut rows = vec![
        KeyValue::new(
            format!("{label} Return"),
            format!("{:.2}%", annual.expected_return * 100.0),
        ),
        KeyValue::new(
            format!("{label} Volatility"),
            format!("{:.2}%", annual.volatility * 100.0),
        ),
        KeyValue::new(format!("{label} Sharpe"), format!("{:.3}", annual.sharpe_ratio)),
    ];
    for (symbol, weight) in symbols.iter().zip(candidate.weights.iter()) {
        rows.push(KeyValue::new(
            format!("{label} weight {symbol}"),
            format!("{:.1}%", weight * 100.0),
        ));
    }
    rows
}

/// Execute the frontier command.
pub fn execute(args: FrontierArgs, format: OutputFormat) -> Result<()> {
    let history = load_price_history(&args.file)?;
    let periodicity = Periodicity::trading_days(args.window);

    let series = history.windowed(args.window).returns(periodicity)?;
    let means = series.mean_returns()?;
    let cov = series.covariance()?;

    let config = FrontierConfig {
        risk_free_rate: periodicity.deannualize_return(args.risk_free),
        ..FrontierConfig::default()
    };

    let min_var = min_variance_portfolio(&means, &cov, &config)?;
    let tangency = max_sharpe_portfolio(&means, &cov, &config)?;

    let mut summary = Vec::new();
    summary.push(KeyValue::new("Symbols", series.symbols().join(", ")));
    summary.push(KeyValue::new(
        "Observations",
        format!("{} ({periodicity})", series.len()),
    ));
    summary.extend(describe_portfolio(
        "Min Variance",
        &min_var,
        series.symbols(),
        periodicity,
        args.risk_free,
    ));
    summary.extend(describe_portfolio(
        "Max Sharpe",
        &tangency,
        series.symbols(),
        periodicity,
        args.risk_free,
    ));

    print_header("Portfolio Summary", format);
    print_output(&summary, format)?;

    // Frontier over an annual target grid, solved per period
    if args.points > 0 {
        let step = if args.points > 1 {
            (args.max_target - args.min_target) / (args.points - 1) as f64
        } else {
            0.0
        };
        let targets: Vec<f64> = (0..args.points)
            .map(|i| periodicity.deannualize_return(args.min_target + step * i as f64))
            .collect();

        let frontier = efficient_frontier(&means, &cov, &targets, &config)?;
        let rows: Vec<FrontierRow> = frontier
            .iter()
            .map(|point| {
                let annual = point.portfolio.annualized(periodicity, args.risk_free);
                FrontierRow {
                    target: format!(
                        "{:.2}%",
                        periodicity.annualize_return(point.target_return) * 100.0
                    ),
                    expected_return: format!("{:.2}%", annual.expected_return * 100.0),
                    volatility: format!("{:.2}%", annual.volatility * 100.0),
                    sharpe: format!("{:.3}", annual.sharpe_ratio),
                }
            })
            .collect();

        print_header("Efficient Frontier", format);
        print_output(&rows, format)?;
    }

    Ok(())
}
