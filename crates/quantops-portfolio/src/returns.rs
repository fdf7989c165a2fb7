//! Price histories and return series.
//!
//! A price history is a dated table of closing prices, one column per
//! symbol. Sampling every n-th row and differencing produces the simple
//! return series the optimizer consumes. The windowing step matters: a
//! 20-day window turns daily closes into roughly monthly observations
//! and scales every annualization factor with it.

use chrono::NaiveDate;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use std::path::Path;

use quantops_core::types::Periodicity;
use quantops_math::stats;

use crate::error::{PortfolioError, PortfolioResult};

/// A dated table of prices, one column per symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceHistory {
    symbols: Vec<String>,
    dates: Vec<NaiveDate>,
    rows: Vec<Vec<f64>>,
}

impl PriceHistory {
    /// Creates a price history from parallel arrays.
    ///
    /// Every row must carry one price per symbol and dates must be
    /// strictly increasing.
    pub fn new(
        symbols: Vec<String>,
        dates: Vec<NaiveDate>,
        rows: Vec<Vec<f64>>,
    ) -> PortfolioResult<Self> {
        if symbols.is_empty() {
            return Err(PortfolioError::empty_history("no symbols"));
        }
        if dates.len() != rows.len() {
            return Err(PortfolioError::invalid_input(format!(
                "{} dates for {} rows",
                dates.len(),
                rows.len()
            )));
        }
        for (date, row) in dates.iter().zip(rows.iter()) {
            if row.len() != symbols.len() {
                return Err(PortfolioError::invalid_input(format!(
                    "row at {date} has {} prices for {} symbols",
                    row.len(),
                    symbols.len()
                )));
            }
        }
        if dates.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(PortfolioError::invalid_input(
                "dates must be strictly increasing",
            ));
        }

        Ok(Self {
            symbols,
            dates,
            rows,
        })
    }

    /// Symbols in column order.
    #[must_use]
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Observation dates.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the history has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keeps every `window`-th row, starting from the first.
    #[must_use]
    pub fn windowed(&self, window: u32) -> Self {
        let step = window.max(1) as usize;
        let dates = self.dates.iter().step_by(step).copied().collect();
        let rows = self.rows.iter().step_by(step).cloned().collect();
        Self {
            symbols: self.symbols.clone(),
            dates,
            rows,
        }
    }

    /// Simple period-over-period returns.
    ///
    /// Needs at least two rows; rejects non-positive prices, which would
    /// produce meaningless returns.
    pub fn returns(&self, periodicity: Periodicity) -> PortfolioResult<ReturnSeries> {
        if self.rows.len() < 2 {
            return Err(PortfolioError::empty_history(format!(
                "need at least 2 price rows, got {}",
                self.rows.len()
            )));
        }

        let assets = self.symbols.len();
        let periods = self.rows.len() - 1;
        let mut observations = DMatrix::zeros(periods, assets);

        for t in 0..periods {
            for a in 0..assets {
                let previous = self.rows[t][a];
                let current = self.rows[t + 1][a];
                if previous <= 0.0 || current <= 0.0 {
                    return Err(PortfolioError::invalid_input(format!(
                        "non-positive price for {} at row {t}",
                        self.symbols[a]
                    )));
                }
                observations[(t, a)] = (current - previous) / previous;
            }
        }

        Ok(ReturnSeries {
            symbols: self.symbols.clone(),
            observations,
            periodicity,
        })
    }
}

/// A return observation matrix with its sampling periodicity.
#[derive(Debug, Clone)]
pub struct ReturnSeries {
    symbols: Vec<String>,
    observations: DMatrix<f64>,
    periodicity: Periodicity,
}

impl ReturnSeries {
    /// Symbols in column order.
    #[must_use]
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Number of return observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.nrows()
    }

    /// True when the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.nrows() == 0
    }

    /// Number of assets.
    #[must_use]
    pub fn n_assets(&self) -> usize {
        self.observations.ncols()
    }

    /// Sampling periodicity of the observations.
    #[must_use]
    pub fn periodicity(&self) -> Periodicity {
        self.periodicity
    }

    /// Raw observation matrix (rows are periods, columns assets).
    #[must_use]
    pub fn observations(&self) -> &DMatrix<f64> {
        &self.observations
    }

    /// Per-period mean return of each asset.
    pub fn mean_returns(&self) -> PortfolioResult<DVector<f64>> {
        Ok(stats::mean_vector(&self.observations)?)
    }

    /// Sample covariance matrix of the per-period returns.
    pub fn covariance(&self) -> PortfolioResult<DMatrix<f64>> {
        Ok(stats::covariance_matrix(&self.observations)?)
    }
}

/// Loads a price history from a CSV file.
///
/// The first column must be a `Date` in ISO format; every further column
/// is one symbol's closing price.
pub fn load_price_history(path: impl AsRef<Path>) -> PortfolioResult<PriceHistory> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let mut reader = csv::Reader::from_path(path)
        .map_err(|err| PortfolioError::dataset(&display, err.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|err| PortfolioError::dataset(&display, err.to_string()))?
        .clone();
    if headers.len() < 2 {
        return Err(PortfolioError::dataset(
            &display,
            "need a date column and at least one symbol column",
        ));
    }
    let symbols: Vec<String> = headers.iter().skip(1).map(ToString::to_string).collect();

    let mut dates = Vec::new();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| PortfolioError::dataset(&display, err.to_string()))?;
        let date_field = record
            .get(0)
            .ok_or_else(|| PortfolioError::dataset(&display, "missing date field"))?;
        let date = NaiveDate::parse_from_str(date_field, "%Y-%m-%d")
            .map_err(|err| PortfolioError::dataset(&display, format!("{date_field}: {err}")))?;

        let mut row = Vec::with_capacity(symbols.len());
        for field in record.iter().skip(1) {
            let price: f64 = field
                .trim()
                .parse()
                .map_err(|_| PortfolioError::dataset(&display, format!("bad price '{field}'")))?;
            row.push(price);
        }

        dates.push(date);
        rows.push(row);
    }

    log::debug!("loaded {} price rows from {display}", rows.len());
    PriceHistory::new(symbols, dates, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_history() -> PriceHistory {
        PriceHistory::new(
            vec!["AAA".into(), "BBB".into()],
            vec![
                date(2024, 1, 2),
                date(2024, 1, 3),
                date(2024, 1, 4),
                date(2024, 1, 5),
            ],
            vec![
                vec![100.0, 50.0],
                vec![110.0, 49.0],
                vec![121.0, 51.45],
                vec![133.1, 50.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_returns_values() {
        let series = sample_history().returns(Periodicity::DAILY).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.n_assets(), 2);
        // First asset compounds at exactly 10% per period
        for t in 0..3 {
            assert_relative_eq!(series.observations()[(t, 0)], 0.10, epsilon = 1e-12);
        }
        assert_relative_eq!(series.observations()[(0, 1)], -0.02, epsilon = 1e-12);
        assert_relative_eq!(series.observations()[(1, 1)], 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_and_covariance_shapes() {
        let series = sample_history().returns(Periodicity::DAILY).unwrap();
        let means = series.mean_returns().unwrap();
        let cov = series.covariance().unwrap();

        assert_eq!(means.len(), 2);
        assert_eq!(cov.shape(), (2, 2));
        assert_relative_eq!(means[0], 0.10, epsilon = 1e-12);
        // Constant return series has zero variance
        assert_relative_eq!(cov[(0, 0)], 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_windowed_sampling() {
        let history = sample_history();
        let every_other = history.windowed(2);

        assert_eq!(every_other.len(), 2);
        assert_eq!(every_other.dates()[1], date(2024, 1, 4));
    }

    #[test]
    fn test_rejects_unsorted_dates() {
        let result = PriceHistory::new(
            vec!["AAA".into()],
            vec![date(2024, 1, 3), date(2024, 1, 2)],
            vec![vec![1.0], vec![2.0]],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let result = PriceHistory::new(
            vec!["AAA".into(), "BBB".into()],
            vec![date(2024, 1, 2)],
            vec![vec![1.0]],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_nonpositive_prices() {
        let history = PriceHistory::new(
            vec!["AAA".into()],
            vec![date(2024, 1, 2), date(2024, 1, 3)],
            vec![vec![100.0], vec![0.0]],
        )
        .unwrap();
        assert!(history.returns(Periodicity::DAILY).is_err());
    }

    #[test]
    fn test_too_short_history_rejected() {
        let history = PriceHistory::new(
            vec!["AAA".into()],
            vec![date(2024, 1, 2)],
            vec![vec![100.0]],
        )
        .unwrap();
        assert!(history.returns(Periodicity::DAILY).is_err());
    }
}
