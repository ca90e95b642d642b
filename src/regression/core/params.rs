//! Fitted regression parameters — the state a predictor keeps after `fit`.
//!
//! Purpose
//! -------
//! Hold everything needed to forecast after estimation: the variable
//! specifications, the estimated coefficients and their regressor labels, the
//! estimation window, and in-sample diagnostics (fitted values, residuals).
//!
//! Key behaviors
//! -------------
//! - Coefficient lookup by regressor label ([`FittedParams::coefficient`]),
//!   intercept and slope accessors.
//! - [`FittedParams::linear_prediction`] evaluates `β̂ · row` for one
//!   assembled regressor row.
//!
//! Invariants & assumptions
//! ------------------------
//! - `coefficients.len() == regressors.len()`.
//! - When `include_constant` is set, the intercept is the first coefficient and
//!   its label is [`CONSTANT_NAME`].
//! - `fitted_values`, `residuals` and the window `first..=last` all describe
//!   the same `observations` rows.
use ndarray::{Array1, ArrayView1};

use crate::regression::core::{period::Month, spec::VariableSpec};

/// Label of the intercept column.
pub const CONSTANT_NAME: &str = "const";

/// FittedParams — estimated linear predictor.
///
/// Fields
/// ------
/// - `endogenous`: specification of the target.
/// - `exogenous`: regressor specifications, in design order after the
///   optional intercept.
/// - `include_constant`: whether column 0 is the intercept.
/// - `regressors`: design column labels (`const` and transformed names).
/// - `coefficients`: OLS estimates aligned with `regressors`.
/// - `first`, `last`: estimation window (inclusive).
/// - `observations`: number of rows in the window.
/// - `fitted_values`, `residuals`: in-sample diagnostics on the transformed
///   scale of the target.
/// - `rcond`: reciprocal condition number of the design.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedParams {
    pub endogenous: VariableSpec,
    pub exogenous: Vec<VariableSpec>,
    pub include_constant: bool,
    pub regressors: Vec<String>,
    pub coefficients: Array1<f64>,
    pub first: Month,
    pub last: Month,
    pub observations: usize,
    pub fitted_values: Array1<f64>,
    pub residuals: Array1<f64>,
    pub rcond: f64,
}

impl FittedParams {
    /// Estimated intercept, if the model has one.
    pub fn intercept(&self) -> Option<f64> {
        if self.include_constant { self.coefficients.first().copied() } else { None }
    }

    /// Coefficients of the exogenous regressors, in specification order.
    pub fn slopes(&self) -> ArrayView1<'_, f64> {
        let offset = usize::from(self.include_constant);
        self.coefficients.slice(ndarray::s![offset..])
    }

    /// Coefficient for regressor label `name` (`"const"` or a transformed
    /// name such as `"log(x)(d1)"`).
    pub fn coefficient(&self, name: &str) -> Option<f64> {
        self.regressors.iter().position(|r| r == name).map(|i| self.coefficients[i])
    }

    /// Labelled coefficients, in design order.
    pub fn named_coefficients(&self) -> impl Iterator<Item = (&str, f64)> {
        self.regressors.iter().map(String::as_str).zip(self.coefficients.iter().copied())
    }

    /// Residual sum of squares over the estimation window.
    pub fn sum_squared_residuals(&self) -> f64 {
        self.residuals.dot(&self.residuals)
    }

    /// `β̂ · row` for one assembled regressor row.
    ///
    /// Panics
    /// ------
    /// - If `row.len() != coefficients.len()`.
    pub fn linear_prediction(&self, row: &[f64]) -> f64 {
        self.coefficients.dot(&ArrayView1::from(row))
    }
}
