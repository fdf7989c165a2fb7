//! The month-by-month projection engine.
//!
//! Each month derives its income statement from the plan, rolls working
//! capital off the prior balance sheet, applies the tax and debt
//! calendars, and lets the notes-payable revolver plug the sheet while
//! holding cash at the minimum balance. The engine verifies the
//! accounting identity after every month.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::{ProjectionError, ProjectionResult};
use crate::statement::{BalanceSheet, IncomeStatement, MonthStatement};

/// Tolerance for the accounting identity check.
const BALANCE_TOLERANCE: Decimal = dec!(0.01);

/// The operating plan for one projected month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthPlan {
    /// Calendar month (1 = January).
    pub calendar_month: u32,
    /// Forecast net sales.
    pub net_sales: Decimal,
    /// Forecast cost of goods sold.
    pub cost_of_goods_sold: Decimal,
    /// Forecast operating expenses.
    pub operating_expenses: Decimal,
    /// Production for the month, at cost (adds to inventory).
    pub production: Decimal,
}

/// Everything the engine needs to run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionInput {
    /// Operating and financing assumptions.
    pub assumptions: Assumptions,
    /// The balance sheet the projection starts from.
    pub opening_balance: BalanceSheet,
    /// Net sales of the months before the projection window, oldest
    /// first. Must cover at least the collection lag.
    pub sales_history: Vec<Decimal>,
    /// The monthly plans, in order.
    pub months: Vec<MonthPlan>,
}

impl ProjectionInput {
    fn validate(&self) -> ProjectionResult<()> {
        self.assumptions.validate()?;

        if self.months.is_empty() {
            return Err(ProjectionError::invalid_plan("no months to project"));
        }
        for plan in &self.months {
            if plan.calendar_month < 1 || plan.calendar_month > 12 {
                return Err(ProjectionError::invalid_plan(format!(
                    "calendar month {} out of range",
                    plan.calendar_month
                )));
            }
        }
        if self.sales_history.len() < self.assumptions.collection_lag_months {
            return Err(ProjectionError::invalid_plan(format!(
                "sales history covers {} months but the collection lag is {}",
                self.sales_history.len(),
                self.assumptions.collection_lag_months
            )));
        }
        if !self.opening_balance.is_balanced(BALANCE_TOLERANCE) {
            return Err(ProjectionError::OpeningOutOfBalance {
                difference: self.opening_balance.imbalance(),
            });
        }
        Ok(())
    }
}

/// Projects the financial statements over the planned months.
pub fn project(input: &ProjectionInput) -> ProjectionResult<Vec<MonthStatement>> {
    input.validate()?;

    let assumptions = &input.assumptions;
    let lag = assumptions.collection_lag_months;

    // Sales indexed across history and forecast so the collection lag can
    // reach back before the projection start
    let mut all_sales: Vec<Decimal> = input.sales_history.clone();
    all_sales.extend(input.months.iter().map(|plan| plan.net_sales));
    let history_len = input.sales_history.len();

    // Accrued-tax balances by month, opening balance first; the prior-year
    // settlement looks back into this
    let mut accrued_history: Vec<Decimal> = vec![input.opening_balance.accrued_taxes];

    let mut previous = input.opening_balance.clone();
    let mut statements = Vec::with_capacity(input.months.len());

    for (index, plan) in input.months.iter().enumerate() {
        let month_index = index + 1;

        // Income statement
        let interest = assumptions.monthly_debt_rate * previous.notes_payable;
        let ebit = plan.net_sales - plan.cost_of_goods_sold - plan.operating_expenses;
        let taxes = assumptions.tax_rate * (ebit - interest);
        let net_profit = ebit - interest - taxes;

        let income = IncomeStatement {
            net_sales: plan.net_sales,
            cost_of_goods_sold: plan.cost_of_goods_sold,
            operating_expenses: plan.operating_expenses,
            ebit,
            interest,
            taxes,
            net_profit,
        };

        // Working capital
        let collected = all_sales[history_len + index - lag];
        let accounts_receivable = previous.accounts_receivable + plan.net_sales - collected;
        let inventory = previous.inventory + plan.production - plan.cost_of_goods_sold;
        let net_ppe = previous.net_ppe;
        let accounts_payable = assumptions.payables_pct_of_sales * plan.net_sales;

        // Tax ledger: accrue the provision, then pay what the calendar says
        let mut accrued_taxes = previous.accrued_taxes + taxes;
        if let Some(settlement) = assumptions.prior_year_tax_settlement {
            if plan.calendar_month == settlement.month {
                let lookback_index = month_index.saturating_sub(settlement.lookback_months);
                let settled = accrued_history[lookback_index.min(accrued_history.len() - 1)];
                accrued_taxes -= settled;
            }
        }
        accrued_taxes -= assumptions.estimated_taxes_due(plan.calendar_month);

        // Debt calendar
        let current_long_term_debt = previous.current_long_term_debt;
        let long_term_debt = previous.long_term_debt - assumptions.term_loan_due(plan.calendar_month);

        let shareholders_equity = previous.shareholders_equity + net_profit;

        // Cash before the revolver: every balance-sheet movement flows
        // through cash
        let provisional_cash = previous.cash
            - (accounts_receivable - previous.accounts_receivable)
            - (inventory - previous.inventory)
            - (net_ppe - previous.net_ppe)
            + (accounts_payable - previous.accounts_payable)
            + (accrued_taxes - previous.accrued_taxes)
            + (current_long_term_debt - previous.current_long_term_debt)
            + (long_term_debt - previous.long_term_debt)
            + (shareholders_equity - previous.shareholders_equity);

        // Revolver: repay from excess cash, borrow up to the cash floor
        let (cash, notes_payable) = if provisional_cash > assumptions.minimum_cash {
            let excess = provisional_cash - assumptions.minimum_cash;
            let repayment = excess.min(previous.notes_payable);
            (provisional_cash - repayment, previous.notes_payable - repayment)
        } else {
            let draw = assumptions.minimum_cash - provisional_cash;
            (assumptions.minimum_cash, previous.notes_payable + draw)
        };

        let balance = BalanceSheet {
            cash,
            accounts_receivable,
            inventory,
            net_ppe,
            accounts_payable,
            notes_payable,
            accrued_taxes,
            current_long_term_debt,
            long_term_debt,
            shareholders_equity,
        };

        if !balance.is_balanced(BALANCE_TOLERANCE) {
            return Err(ProjectionError::OutOfBalance {
                month: month_index,
                difference: balance.imbalance(),
            });
        }

        accrued_history.push(accrued_taxes);
        previous = balance.clone();
        statements.push(MonthStatement {
            month_index,
            calendar_month: plan.calendar_month,
            income,
            balance,
        });
    }

    log::debug!("projected {} months", statements.len());
    Ok(statements)
}
