//! Project command implementation.
//!
//! Runs the financial-statement projection from a scenario file and
//! prints the monthly statements.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use quantops_projection::engine::project;
use quantops_projection::scenario::load_scenario;
use quantops_projection::statement::MonthStatement;

use crate::cli::OutputFormat;
use crate::output::{print_header, print_output};

/// Arguments for the project command.
#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Scenario TOML file
    #[arg(long)]
    pub file: String,
}

/// One projected month as an output row.
#[derive(Debug, Serialize, Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: usize,
    #[tabled(rename = "Sales")]
    sales: String,
    #[tabled(rename = "Net Profit")]
    net_profit: String,
    #[tabled(rename = "Cash")]
    cash: String,
    #[tabled(rename = "Receivables")]
    receivables: String,
    #[tabled(rename = "Inventory")]
    inventory: String,
    #[tabled(rename = "Notes Payable")]
    notes_payable: String,
    #[tabled(rename = "Equity")]
    equity: String,
}

impl From<&MonthStatement> for MonthRow {
    fn from(month: &MonthStatement) -> Self {
        Self {
            month: month.month_index,
            sales: month.income.net_sales.round_dp(1).to_string(),
            net_profit: month.income.net_profit.round_dp(1).to_string(),
            cash: month.balance.cash.round_dp(1).to_string(),
            receivables: month.balance.accounts_receivable.round_dp(1).to_string(),
            inventory: month.balance.inventory.round_dp(1).to_string(),
            notes_payable: month.balance.notes_payable.round_dp(1).to_string(),
            equity: month.balance.shareholders_equity.round_dp(1).to_string(),
        }
    }
}

/// Execute the project command.
pub fn execute(args: ProjectArgs, format: OutputFormat) -> Result<()> {
    let scenario = load_scenario(&args.file)?;
    let name = scenario.name.clone().unwrap_or_else(|| args.file.clone());

    let months = project(&scenario.into_input())?;
    let rows: Vec<MonthRow> = months.iter().map(MonthRow::from).collect();

    print_header(&format!("Projection: {name}"), format);
    print_output(&rows, format)
}
