//! Closed-form ridge regression via the normal equations.

use nalgebra::{DMatrix, DVector};

use crate::trainer::TrainError;

/// Solve `(X'X + lambda*I) w = X'y` by Cholesky factorization.
///
/// The bias column is regularized like every other coordinate. With
/// `lambda > 0` the system is symmetric positive definite, so the
/// factorization only fails on degenerate input (lambda of 0 with rank
/// deficiency, or non-finite entries).
pub(crate) fn fit(rows: &[Vec<f64>], y: &[f64], lambda: f64) -> Result<Vec<f64>, TrainError> {
    let n = rows.len();
    let p = rows.first().map(Vec::len).unwrap_or(0);

    let x = DMatrix::from_row_iterator(n, p, rows.iter().flatten().copied());
    let y = DVector::from_column_slice(y);

    let mut xtx = x.transpose() * &x;
    for i in 0..p {
        xtx[(i, i)] += lambda;
    }
    let xty = x.transpose() * y;

    let chol = xtx.cholesky().ok_or(TrainError::IllConditioned)?;
    Ok(chol.solve(&xty).iter().copied().collect())
}
