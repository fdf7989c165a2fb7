//! Scenario files.
//!
//! A scenario is the full projection input in one TOML file: assumptions,
//! opening balance sheet, trailing sales, and the monthly plan.

use serde::{Deserialize, Serialize};
use std::path::Path;

use rust_decimal::Decimal;

use crate::assumptions::Assumptions;
use crate::engine::{MonthPlan, ProjectionInput};
use crate::error::{ProjectionError, ProjectionResult};
use crate::statement::BalanceSheet;

/// A projection scenario as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Optional scenario label.
    #[serde(default)]
    pub name: Option<String>,
    /// Operating and financing assumptions.
    pub assumptions: Assumptions,
    /// Opening balance sheet.
    pub opening_balance: BalanceSheet,
    /// Net sales of the months before the window, oldest first.
    pub sales_history: Vec<Decimal>,
    /// Monthly plans.
    pub months: Vec<MonthPlan>,
}

impl Scenario {
    /// Converts the scenario into engine input.
    #[must_use]
    pub fn into_input(self) -> ProjectionInput {
        ProjectionInput {
            assumptions: self.assumptions,
            opening_balance: self.opening_balance,
            sales_history: self.sales_history,
            months: self.months,
        }
    }
}

/// Loads a scenario from a TOML file.
pub fn load_scenario(path: impl AsRef<Path>) -> ProjectionResult<Scenario> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let text = std::fs::read_to_string(path)
        .map_err(|err| ProjectionError::scenario(&display, err.to_string()))?;
    let scenario: Scenario =
        toml::from_str(&text).map_err(|err| ProjectionError::scenario(&display, err.to_string()))?;

    log::debug!(
        "loaded scenario '{}' with {} months from {display}",
        scenario.name.as_deref().unwrap_or("unnamed"),
        scenario.months.len()
    );
    Ok(scenario)
}
