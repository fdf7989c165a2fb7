//! Bond command implementation.
//!
//! Converts between the quotes of a level-coupon bond: price from yield,
//! yield from price, and the current-yield relationships.

use anyhow::{bail, Result};
use clap::Args;
use rust_decimal::Decimal;

use quantops_bonds::Bond;

use crate::cli::OutputFormat;
use crate::commands::{parse_frequency, percent_to_decimal};
use crate::output::{print_header, print_output, KeyValue};

/// Arguments for the bond command.
#[derive(Args, Debug)]
pub struct BondArgs {
    /// Par (face) amount
    #[arg(long, default_value = "1000")]
    pub par: f64,

    /// Annual coupon rate (as percentage, e.g. 7.0 for 7%)
    #[arg(short, long)]
    pub coupon: f64,

    /// Years to maturity
    #[arg(short, long)]
    pub maturity_years: f64,

    /// Coupon frequency: 1=Annual, 2=SemiAnnual, 4=Quarterly, 12=Monthly
    #[arg(long, default_value = "2")]
    pub frequency: u32,

    /// Yield to maturity (as percentage). If provided, calculates price.
    #[arg(short, long, group = "calc_mode")]
    pub yield_value: Option<f64>,

    /// Market price. If provided, calculates yield to maturity.
    #[arg(short, long, group = "calc_mode")]
    pub price: Option<f64>,

    /// Current yield (as percentage). If provided, calculates price.
    #[arg(long, group = "calc_mode")]
    pub current_yield: Option<f64>,
}

/// Execute the bond command.
pub fn execute(args: BondArgs, format: OutputFormat) -> Result<()> {
    let coupon = percent_to_decimal("coupon", args.coupon)?;
    let frequency = parse_frequency(args.frequency)?;

    let par = Decimal::from_f64_retain(args.par)
        .ok_or_else(|| anyhow::anyhow!("Invalid par amount"))?;

    let bond = Bond::builder()
        .par(par)
        .coupon_rate(coupon)
        .maturity_years(args.maturity_years)
        .frequency(frequency)
        .build()?;

    let mut results = vec![
        KeyValue::new("Par", format!("{}", bond.par())),
        KeyValue::new("Coupon", format!("{:.3}%", args.coupon)),
        KeyValue::new("Maturity", format!("{} years", args.maturity_years)),
        KeyValue::new("Frequency", frequency.to_string()),
    ];

    match (args.yield_value, args.price, args.current_yield) {
        (Some(ytm_pct), None, None) => {
            let ytm = percent_to_decimal("yield", ytm_pct)?;
            let price = bond.price_from_yield(ytm);
            let cy = bond.current_yield(price)?;
            results.push(KeyValue::new("Price", format!("{price:.4}")));
            results.push(KeyValue::new("Current Yield", format!("{:.4}%", cy * 100.0)));
        }
        (None, Some(price), None) => {
            let solution = bond.yield_to_maturity(price)?;
            let cy = bond.current_yield(price)?;
            results.push(KeyValue::new("Price", format!("{price:.4}")));
            results.push(KeyValue::new(
                "Yield to Maturity",
                format!("{:.4}%", solution.yield_value * 100.0),
            ));
            results.push(KeyValue::new("Current Yield", format!("{:.4}%", cy * 100.0)));
        }
        (None, None, Some(cy_pct)) => {
            let cy = percent_to_decimal("current yield", cy_pct)?;
            let price = bond.price_from_current_yield(cy)?;
            results.push(KeyValue::new("Price", format!("{price:.4}")));
            results.push(KeyValue::new("Current Yield", format!("{cy_pct:.4}%")));
        }
        _ => bail!("provide exactly one of --yield-value, --price, or --current-yield"),
    }

    print_header("Bond Analysis", format);
    print_output(&results, format)
}
