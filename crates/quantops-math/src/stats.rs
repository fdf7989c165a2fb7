//! Sample moments for observation matrices.
//!
//! Observations are laid out one row per period and one column per series,
//! the natural shape of a return history loaded from a price file.

use nalgebra::{DMatrix, DVector};

use crate::error::{MathError, MathResult};

/// Column means of an observation matrix.
pub fn mean_vector(observations: &DMatrix<f64>) -> MathResult<DVector<f64>> {
    let rows = observations.nrows();
    if rows == 0 {
        return Err(MathError::insufficient_data(1, 0));
    }

    let n = rows as f64;
    let means = observations
        .column_iter()
        .map(|col| col.sum() / n)
        .collect::<Vec<_>>();
    Ok(DVector::from_vec(means))
}

/// Sample covariance matrix of an observation matrix.
///
/// Uses the unbiased `n - 1` denominator, so at least two observations are
/// required.
pub fn covariance_matrix(observations: &DMatrix<f64>) -> MathResult<DMatrix<f64>> {
    let rows = observations.nrows();
    let cols = observations.ncols();
    if rows < 2 {
        return Err(MathError::insufficient_data(2, rows));
    }

    let means = mean_vector(observations)?;
    let mut centered = observations.clone();
    for mut row in centered.row_iter_mut() {
        for (j, value) in row.iter_mut().enumerate() {
            *value -= means[j];
        }
    }

    let mut cov = DMatrix::zeros(cols, cols);
    let denom = (rows - 1) as f64;
    for i in 0..cols {
        for j in i..cols {
            let mut acc = 0.0;
            for k in 0..rows {
                acc += centered[(k, i)] * centered[(k, j)];
            }
            let value = acc / denom;
            cov[(i, j)] = value;
            cov[(j, i)] = value;
        }
    }
    Ok(cov)
}
