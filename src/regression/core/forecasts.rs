//! Recursive multi-step forecasting for linear predictors.
//!
//! Purpose
//! -------
//! Roll a fitted linear predictor forward month by month, writing each
//! forecast back into a working copy of the data so that the next month's
//! lagged regressors see it.
//!
//! Key behaviors
//! -------------
//! - [`forecast_recursion`] evaluates the transformed target for a month,
//!   maps it back to a raw level with
//!   [`reverse_transform_value`], and stores that level in the working frame.
//! - Results are collected in a [`Forecast`] holding the months, the raw
//!   levels and the transformed-scale predictions.
//!
//! Invariants & assumptions
//! ------------------------
//! - The working frame is owned by the recursion; the caller's frame is never
//!   modified.
//! - Regressors are rebuilt from the working frame every step, so any
//!   transformed variable that reaches into a forecast month uses the
//!   forecast level.
//! - Regressors on series other than the target are not forecast: their
//!   future values must already be present.
//!
//! Conventions
//! -----------
//! - `forecast.values()[i]` is the level for `forecast.months()[i]`; months
//!   are consecutive.
use ndarray::Array1;

use crate::regression::{
    core::{
        frame::TimeFrame,
        params::FittedParams,
        period::Month,
        spec::VariableSpec,
        transform::{reverse_transform_value, transform_value},
    },
    errors::RegressionResult,
};

/// Forecast — one recursive forecast path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Forecast {
    months: Vec<Month>,
    values: Vec<f64>,
    transformed: Vec<f64>,
}

impl Forecast {
    pub fn with_capacity(horizon: usize) -> Forecast {
        Forecast {
            months: Vec::with_capacity(horizon),
            values: Vec::with_capacity(horizon),
            transformed: Vec::with_capacity(horizon),
        }
    }

    pub(crate) fn push(&mut self, month: Month, value: f64, transformed: f64) {
        self.months.push(month);
        self.values.push(value);
        self.transformed.push(transformed);
    }

    /// Forecast months in order.
    pub fn months(&self) -> &[Month] {
        &self.months
    }

    /// Forecast levels of the target series (original scale).
    pub fn values(&self) -> Array1<f64> {
        Array1::from(self.values.clone())
    }

    /// Forecasts on the transformed scale of the target.
    pub fn transformed(&self) -> Array1<f64> {
        Array1::from(self.transformed.clone())
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// `(month, level)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Month, f64)> + '_ {
        self.months.iter().copied().zip(self.values.iter().copied())
    }

    /// Level forecast for `month`, if it is on the path.
    pub fn get(&self, month: Month) -> Option<f64> {
        self.months.iter().position(|m| *m == month).map(|i| self.values[i])
    }
}

/// Assemble the design row of `month`: `1.0` first when `include_constant`,
/// then one transformed value per exogenous spec.
///
/// Errors
/// ------
/// - Any transform error of an exogenous variable at `month`.
pub fn regressor_row(
    include_constant: bool, exogenous: &[VariableSpec], frame: &TimeFrame, month: Month,
) -> RegressionResult<Vec<f64>> {
    let mut row = Vec::with_capacity(exogenous.len() + usize::from(include_constant));
    if include_constant {
        row.push(1.0);
    }
    for spec in exogenous {
        row.push(transform_value(spec, frame, month)?);
    }
    Ok(row)
}

/// Roll the predictor over `months`, returning the forecast path.
///
/// Parameters
/// ----------
/// - `params`: fitted model.
/// - `frame`: working copy of the data; forecast levels are written into it.
/// - `months`: consecutive months to forecast, oldest first.
///
/// Errors
/// ------
/// - Transform errors while building regressors (e.g. a missing future value
///   of an exogenous series).
/// - Reverse-transform errors (e.g. missing history for undoing a difference).
pub fn forecast_recursion<I>(params: &FittedParams, frame: &mut TimeFrame, months: I) -> RegressionResult<Forecast>
where
    I: IntoIterator<Item = Month>,
{
    let months = months.into_iter();
    let mut forecast = Forecast::with_capacity(months.size_hint().0);
    let target = &params.endogenous;
    for month in months {
        let row = regressor_row(params.include_constant, &params.exogenous, frame, month)?;
        let transformed = params.linear_prediction(&row);
        let level = reverse_transform_value(target, frame, month, transformed)?;
        frame.set_value(&target.name, month, level)?;
        tracing::trace!(%month, transformed, level, "forecast step");
        forecast.push(month, level, transformed);
    }
    Ok(forecast)
}
