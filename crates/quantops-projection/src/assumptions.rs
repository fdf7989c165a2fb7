//! Operating and financing assumptions.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{ProjectionError, ProjectionResult};

/// A fixed payment due in a given calendar month, every year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPayment {
    /// Calendar month (1 = January).
    pub month: u32,
    /// Payment amount.
    pub amount: Decimal,
}

/// Settlement of the prior year's accrued taxes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxSettlement {
    /// Calendar month in which the settlement is paid (1 = January).
    pub month: u32,
    /// How many months back the settled balance was struck (3 pays the
    /// December balance in March).
    pub lookback_months: usize,
}

/// The assumptions driving a projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    /// Corporate tax rate applied to pre-tax income.
    pub tax_rate: Decimal,
    /// Monthly interest rate on notes payable.
    pub monthly_debt_rate: Decimal,
    /// Accounts payable carried as a fraction of the month's net sales.
    pub payables_pct_of_sales: Decimal,
    /// Months between a sale and its cash collection.
    pub collection_lag_months: usize,
    /// Cash floor maintained by the revolver.
    pub minimum_cash: Decimal,
    /// Settlement of the prior year's accrued taxes, if any.
    #[serde(default)]
    pub prior_year_tax_settlement: Option<TaxSettlement>,
    /// Estimated tax payments by calendar month.
    #[serde(default)]
    pub estimated_tax_payments: Vec<ScheduledPayment>,
    /// Term-loan principal payments by calendar month.
    #[serde(default)]
    pub term_loan_payments: Vec<ScheduledPayment>,
}

impl Default for Assumptions {
    /// The toy-manufacturer case calendar: March settlement of the
    /// December tax balance, estimated payments in April, June,
    /// September, and December, term-loan payments in June and December,
    /// a 175 cash floor, and two-month collections.
    fn default() -> Self {
        Self {
            tax_rate: dec!(0.34),
            monthly_debt_rate: dec!(0.0075),
            payables_pct_of_sales: dec!(0.30),
            collection_lag_months: 2,
            minimum_cash: dec!(175),
            prior_year_tax_settlement: Some(TaxSettlement {
                month: 3,
                lookback_months: 3,
            }),
            estimated_tax_payments: vec![
                ScheduledPayment {
                    month: 4,
                    amount: dec!(31),
                },
                ScheduledPayment {
                    month: 6,
                    amount: dec!(32),
                },
                ScheduledPayment {
                    month: 9,
                    amount: dec!(31),
                },
                ScheduledPayment {
                    month: 12,
                    amount: dec!(32),
                },
            ],
            term_loan_payments: vec![
                ScheduledPayment {
                    month: 6,
                    amount: dec!(25),
                },
                ScheduledPayment {
                    month: 12,
                    amount: dec!(25),
                },
            ],
        }
    }
}

impl Assumptions {
    /// Validates the assumption set.
    pub fn validate(&self) -> ProjectionResult<()> {
        if self.tax_rate < Decimal::ZERO || self.tax_rate >= Decimal::ONE {
            return Err(ProjectionError::invalid_assumptions(
                "tax rate must lie in [0, 1)",
            ));
        }
        if self.monthly_debt_rate < Decimal::ZERO {
            return Err(ProjectionError::invalid_assumptions(
                "debt rate cannot be negative",
            ));
        }
        if self.payables_pct_of_sales < Decimal::ZERO || self.payables_pct_of_sales > Decimal::ONE
        {
            return Err(ProjectionError::invalid_assumptions(
                "payables fraction must lie in [0, 1]",
            ));
        }
        if self.minimum_cash < Decimal::ZERO {
            return Err(ProjectionError::invalid_assumptions(
                "minimum cash cannot be negative",
            ));
        }

        let scheduled = self
            .estimated_tax_payments
            .iter()
            .chain(self.term_loan_payments.iter());
        for payment in scheduled {
            if payment.month < 1 || payment.month > 12 {
                return Err(ProjectionError::invalid_assumptions(format!(
                    "scheduled payment month {} out of range",
                    payment.month
                )));
            }
            if payment.amount < Decimal::ZERO {
                return Err(ProjectionError::invalid_assumptions(
                    "scheduled payments cannot be negative",
                ));
            }
        }

        if let Some(settlement) = self.prior_year_tax_settlement {
            if settlement.month < 1 || settlement.month > 12 {
                return Err(ProjectionError::invalid_assumptions(format!(
                    "settlement month {} out of range",
                    settlement.month
                )));
            }
            if settlement.lookback_months == 0 {
                return Err(ProjectionError::invalid_assumptions(
                    "settlement lookback must be at least one month",
                ));
            }
        }

        Ok(())
    }

    /// Total estimated tax payments scheduled for a calendar month.
    #[must_use]
    pub fn estimated_taxes_due(&self, calendar_month: u32) -> Decimal {
        self.estimated_tax_payments
            .iter()
            .filter(|p| p.month == calendar_month)
            .map(|p| p.amount)
            .sum()
    }

    /// Total term-loan principal due in a calendar month.
    #[must_use]
    pub fn term_loan_due(&self, calendar_month: u32) -> Decimal {
        self.term_loan_payments
            .iter()
            .filter(|p| p.month == calendar_month)
            .map(|p| p.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_validates() {
        assert!(Assumptions::default().validate().is_ok());
    }

    #[test]
    fn test_bad_tax_rate_rejected() {
        let mut assumptions = Assumptions::default();
        assumptions.tax_rate = dec!(1.2);
        assert!(assumptions.validate().is_err());
    }

    #[test]
    fn test_bad_payment_month_rejected() {
        let mut assumptions = Assumptions::default();
        assumptions.term_loan_payments.push(ScheduledPayment {
            month: 13,
            amount: dec!(10),
        });
        assert!(assumptions.validate().is_err());
    }

    #[test]
    fn test_payment_lookups() {
        let assumptions = Assumptions::default();
        assert_eq!(assumptions.estimated_taxes_due(6), dec!(32));
        assert_eq!(assumptions.estimated_taxes_due(5), Decimal::ZERO);
        assert_eq!(assumptions.term_loan_due(12), dec!(25));
    }
}
