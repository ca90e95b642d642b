//! Ordinary least squares via SVD.
//!
//! Purpose
//! -------
//! Solve `min_β ‖y − Xβ‖²` for a tall design `X` held in `ndarray`, rejecting
//! designs that are singular or too ill-conditioned to give a meaningful
//! answer instead of returning a minimum-norm solution silently.
//!
//! Key behaviors
//! -------------
//! - Copy `X` into a `nalgebra::DMatrix`, scale every column to unit 2-norm
//!   and take the thin SVD of the scaled matrix.
//! - Compute the reciprocal condition number `σ_min / σ_max` of the scaled
//!   design and fail with [`RegressionError::SingularDesign`] when it does not
//!   exceed the caller's tolerance.
//! - Undo the column scaling on the coefficients.
//! - Return coefficients, in-sample fitted values and residuals as `ndarray`
//!   vectors.
//!
//! Invariants & assumptions
//! ------------------------
//! - `X` has at least as many rows as columns; shorter designs are rejected
//!   with [`RegressionError::TooFewObservations`].
//! - `y.len() == X.nrows()`; a mismatch is a programming error upstream.
//! - Column scaling does not change the least-squares fit, only the
//!   conditioning check: a constant next to a regressor of magnitude `1e11`
//!   is well posed.
//!
//! Conventions
//! -----------
//! - No normal equations and no explicit inverse are formed.
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2};

use crate::regression::errors::{RegressionError, RegressionResult};

/// Default reciprocal-condition tolerance for design matrices.
pub const DEFAULT_RCOND: f64 = 1e-10;

/// Result of a least-squares solve.
#[derive(Debug, Clone, PartialEq)]
pub struct OlsSolution {
    /// Estimated coefficients, one per design column.
    pub coefficients: Array1<f64>,
    /// `Xβ̂` over the design rows.
    pub fitted: Array1<f64>,
    /// `y − Xβ̂`.
    pub residuals: Array1<f64>,
    /// `σ_min / σ_max` of the column-equilibrated design.
    pub rcond: f64,
}

/// Solve the least-squares problem `y ≈ Xβ`.
///
/// Parameters
/// ----------
/// - `design`: `&Array2<f64>`
///   `n × k` regressor matrix.
/// - `target`: `&Array1<f64>`
///   Length-`n` response.
/// - `tolerance`: `f64`
///   Minimum accepted reciprocal condition number.
///
/// Returns
/// -------
/// `RegressionResult<OlsSolution>`
///
/// Errors
/// ------
/// - `RegressionError::TooFewObservations` if `n < k`.
/// - `RegressionError::SingularDesign` if a column is identically zero, if
///   `σ_min / σ_max ≤ tolerance` after column scaling, or if the solve
///   produces non-finite coefficients.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_linear_forecast::regression::core::ols::solve_least_squares;
/// let x = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0]];
/// let y = array![2.0, 5.0, 8.0];
/// let sol = solve_least_squares(&x, &y, 1e-10).unwrap();
/// assert!((sol.coefficients[1] - 3.0).abs() < 1e-10);
/// ```
pub fn solve_least_squares(
    design: &Array2<f64>, target: &Array1<f64>, tolerance: f64,
) -> RegressionResult<OlsSolution> {
    let (n, k) = design.dim();
    if n < k || k == 0 {
        return Err(RegressionError::TooFewObservations { observations: n, regressors: k });
    }

    let mut x = to_dmatrix(design);
    let scales = equilibrate_columns(&mut x);
    if scales.iter().any(|s| !(*s > 0.0) || !s.is_finite()) {
        return Err(RegressionError::SingularDesign { rcond: 0.0, tolerance });
    }
    let y = DVector::from_iterator(n, target.iter().copied());
    let svd = x.svd(true, true);

    let sigma_max = svd.singular_values.max();
    let sigma_min = svd.singular_values.min();
    let rcond = if sigma_max > 0.0 { sigma_min / sigma_max } else { 0.0 };
    // NaN must fail too, hence the negated comparison.
    if !(rcond > tolerance) {
        return Err(RegressionError::SingularDesign { rcond, tolerance });
    }

    let beta = svd
        .solve(&y, tolerance * sigma_max)
        .map_err(|_| RegressionError::SingularDesign { rcond, tolerance })?;

    let coefficients = Array1::from_iter(beta.iter().zip(&scales).map(|(b, s)| b / s));
    if coefficients.iter().any(|b| !b.is_finite()) {
        return Err(RegressionError::SingularDesign { rcond, tolerance });
    }
    let fitted = design.dot(&coefficients);
    let residuals = target - &fitted;
    Ok(OlsSolution { coefficients, fitted, residuals, rcond })
}

/// Copy an `ndarray` matrix into a column-major `DMatrix`.
fn to_dmatrix(source: &Array2<f64>) -> DMatrix<f64> {
    let (n, k) = source.dim();
    DMatrix::from_fn(n, k, |i, j| source[[i, j]])
}

/// Divide every column of `x` by its 2-norm in place; returns the norms.
fn equilibrate_columns(x: &mut DMatrix<f64>) -> Vec<f64> {
    x.column_iter_mut()
        .map(|mut col| {
            let norm = col.norm();
            if norm > 0.0 && norm.is_finite() {
                col /= norm;
            }
            norm
        })
        .collect()
}
