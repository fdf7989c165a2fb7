//! Income statement and balance sheet types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One month's income statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatement {
    /// Net sales for the month.
    pub net_sales: Decimal,
    /// Cost of goods sold.
    pub cost_of_goods_sold: Decimal,
    /// Operating expenses.
    pub operating_expenses: Decimal,
    /// Earnings before interest and taxes.
    pub ebit: Decimal,
    /// Interest expense on short-term borrowing.
    pub interest: Decimal,
    /// Tax provision for the month.
    pub taxes: Decimal,
    /// Net profit.
    pub net_profit: Decimal,
}

/// End-of-month balance sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// Cash and equivalents.
    pub cash: Decimal,
    /// Accounts receivable.
    pub accounts_receivable: Decimal,
    /// Inventory at cost.
    pub inventory: Decimal,
    /// Net plant, property, and equipment.
    pub net_ppe: Decimal,
    /// Accounts payable.
    pub accounts_payable: Decimal,
    /// Notes payable (the revolver).
    pub notes_payable: Decimal,
    /// Accrued taxes.
    pub accrued_taxes: Decimal,
    /// Current portion of long-term debt.
    pub current_long_term_debt: Decimal,
    /// Long-term debt.
    pub long_term_debt: Decimal,
    /// Shareholders' equity.
    pub shareholders_equity: Decimal,
}

impl BalanceSheet {
    /// Total assets.
    #[must_use]
    pub fn total_assets(&self) -> Decimal {
        self.cash + self.accounts_receivable + self.inventory + self.net_ppe
    }

    /// Total liabilities plus shareholders' equity.
    #[must_use]
    pub fn total_liabilities_and_equity(&self) -> Decimal {
        self.accounts_payable
            + self.notes_payable
            + self.accrued_taxes
            + self.current_long_term_debt
            + self.long_term_debt
            + self.shareholders_equity
    }

    /// Assets minus liabilities and equity.
    #[must_use]
    pub fn imbalance(&self) -> Decimal {
        self.total_assets() - self.total_liabilities_and_equity()
    }

    /// True when the accounting identity holds within `tolerance`.
    #[must_use]
    pub fn is_balanced(&self, tolerance: Decimal) -> bool {
        self.imbalance().abs() <= tolerance
    }
}

/// One projected month: income statement plus closing balance sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthStatement {
    /// 1-based index within the projection.
    pub month_index: usize,
    /// Calendar month (1 = January).
    pub calendar_month: u32,
    /// The month's income statement.
    pub income: IncomeStatement,
    /// The closing balance sheet.
    pub balance: BalanceSheet,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_balance_identity() {
        let sheet = BalanceSheet {
            cash: dec!(175),
            accounts_receivable: dec!(530),
            inventory: dec!(45),
            net_ppe: dec!(255),
            accounts_payable: dec!(180),
            notes_payable: dec!(140),
            accrued_taxes: dec!(70),
            current_long_term_debt: dec!(50),
            long_term_debt: dec!(150),
            shareholders_equity: dec!(415),
        };

        assert_eq!(sheet.total_assets(), dec!(1005));
        assert_eq!(sheet.total_liabilities_and_equity(), dec!(1005));
        assert!(sheet.is_balanced(dec!(0.01)));
    }

    #[test]
    fn test_imbalance_detected() {
        let mut sheet = BalanceSheet::default();
        sheet.cash = dec!(100);
        assert_eq!(sheet.imbalance(), dec!(100));
        assert!(!sheet.is_balanced(dec!(0.01)));
    }
}
