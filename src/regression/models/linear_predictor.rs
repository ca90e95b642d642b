//! LinearPredictor — OLS on transformed variables with recursive forecasting.
//!
//! Purpose
//! -------
//! Fit `z_y(t) = β₀ + Σ_j β_j z_j(t) + ε_t` over a window of months ending at
//! a cutoff, where `z_y` and `z_j` are transformed versions (log, difference,
//! lag) of columns of a [`TimeFrame`], and then forecast the target's raw
//! level month by month after the cutoff.
//!
//! Key behaviors
//! -------------
//! - [`LinearPredictor::fit`] assembles the design row by row with
//!   [`transform_value`], solves it with [`solve_least_squares`], and stores
//!   a [`FittedParams`] snapshot.
//! - [`LinearPredictor::predict`] / [`LinearPredictor::predict_range`] run
//!   [`forecast_recursion`] on a clone of the frame; each forecast level is
//!   written into the clone so later steps lag against it.
//! - [`LinearPredictor::predict_transformed`] exposes the one-step prediction
//!   on the transformed scale for an arbitrary frame.
//!
//! Invariants & assumptions
//! ------------------------
//! - The endogenous spec has `lag_order == 0`; its transformed value at `t`
//!   is a function of the level at `t` and earlier levels only.
//! - Transforms never look forward, so rows at or before the cutoff use only
//!   data at or before the cutoff.
//! - Every month in the estimation window must have all transformed values
//!   available; gaps inside the window are reported, not dropped.
//! - The predictor's own frame is never modified after construction.
//!
//! Conventions
//! -----------
//! - Regressor labels are `const` (if requested) followed by
//!   [`VariableSpec::transformed_name`] of each exogenous spec, in order.
//! - Fit summaries and forecast runs are logged with `tracing::debug!`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover exact coefficient recovery, default window selection,
//!   forecast horizon and month alignment, recursive consistency with lagged
//!   targets (levels and log-differences), and every fit / predict error path.
use ndarray::{Array1, Array2, ArrayView1};

use crate::regression::{
    core::{
        forecasts::{Forecast, forecast_recursion, regressor_row},
        frame::TimeFrame,
        ols::solve_least_squares,
        options::FitOptions,
        params::{CONSTANT_NAME, FittedParams},
        period::Month,
        spec::VariableSpec,
        transform::transform_value,
        validation::{validate_endogenous, validate_spec},
    },
    errors::{RegressionError, RegressionResult},
};

/// LinearPredictor — linear model of transformed monthly series.
///
/// Fields
/// ------
/// - `frame`: raw historical data; read-only after construction.
/// - `fitted_params`: populated by [`LinearPredictor::fit`].
#[derive(Debug, Clone)]
pub struct LinearPredictor {
    frame: TimeFrame,
    /// Fitted parameters (populated after `fit`).
    pub fitted_params: Option<FittedParams>,
}

impl LinearPredictor {
    /// Wrap `frame` in an unfitted predictor.
    pub fn new(frame: TimeFrame) -> LinearPredictor {
        LinearPredictor { frame, fitted_params: None }
    }

    /// Raw data the predictor was built from.
    pub fn frame(&self) -> &TimeFrame {
        &self.frame
    }

    /// Whether a successful `fit` has stored parameters.
    pub fn is_fitted(&self) -> bool {
        self.fitted_params.is_some()
    }

    /// Fitted parameters, or `ModelNotFitted`.
    pub fn fitted(&self) -> RegressionResult<&FittedParams> {
        self.fitted_params.as_ref().ok_or(RegressionError::ModelNotFitted)
    }

    /// Estimate the regression of `endogenous` on `exogenous` up to
    /// `options.last`.
    ///
    /// Steps
    /// -----
    /// 1. Validate the specs and options; the target must not be lagged and
    ///    there must be at least one regressor (an intercept counts).
    /// 2. Check that the cutoff lies inside the frame.
    /// 3. Resolve the first month: `options.first`, or the earliest month at
    ///    which every transformed variable is available.
    /// 4. Build `y` and `X` for `first..=last`, intercept column first.
    /// 5. Solve by SVD least squares and store the snapshot.
    ///
    /// Parameters
    /// ----------
    /// - `endogenous`: [`VariableSpec`] of the target.
    /// - `exogenous`: regressor specs; a spec on the target's own column with
    ///   `lag_order ≥ 1` gives an autoregressive term.
    /// - `options`: [`FitOptions`] (cutoff, first month, intercept, `rcond`).
    ///
    /// Returns
    /// -------
    /// `RegressionResult<&FittedParams>`
    ///   The stored snapshot. A failed fit leaves any previous fit in place.
    ///
    /// Errors
    /// ------
    /// - `EndogenousLag`, `InvalidDiffSpan`, `LookbackTooLong`,
    ///   `InvalidTolerance`, `NoRegressors` for invalid inputs.
    /// - `MonthOutOfRange` if the cutoff is outside the frame.
    /// - `NoCompleteObservation` if no month up to the cutoff has every
    ///   transformed value.
    /// - `EmptyWindow` if `first > last`; `TooFewObservations` if the window
    ///   has fewer rows than regressors.
    /// - Transform errors for any month inside the window.
    /// - `SingularDesign` from the solver.
    pub fn fit(
        &mut self, endogenous: VariableSpec, exogenous: Vec<VariableSpec>, options: FitOptions,
    ) -> RegressionResult<&FittedParams> {
        validate_endogenous(&endogenous)?;
        for spec in &exogenous {
            validate_spec(spec)?;
        }
        options.validate()?;
        let k = exogenous.len() + usize::from(options.include_constant);
        if k == 0 {
            return Err(RegressionError::NoRegressors);
        }

        let last = options.last;
        if self.frame.position(last).is_none() {
            return Err(RegressionError::MonthOutOfRange {
                month: last,
                start: self.frame.start(),
                end: self.frame.end(),
            });
        }
        let first = match options.first {
            Some(first) => first,
            None => self.first_complete_month(&endogenous, &exogenous, last)?,
        };
        if first > last {
            return Err(RegressionError::EmptyWindow { first, last });
        }
        let n = (first.months_until(last) + 1) as usize;
        if n < k {
            return Err(RegressionError::TooFewObservations { observations: n, regressors: k });
        }

        let mut design = Array2::<f64>::zeros((n, k));
        let mut target = Array1::<f64>::zeros(n);
        for i in 0..n {
            let month = first.offset(i as i64)?;
            target[i] = transform_value(&endogenous, &self.frame, month)?;
            let row = regressor_row(options.include_constant, &exogenous, &self.frame, month)?;
            design.row_mut(i).assign(&ArrayView1::from(&row));
        }

        let solution = solve_least_squares(&design, &target, options.rcond)?;

        let mut regressors = Vec::with_capacity(k);
        if options.include_constant {
            regressors.push(CONSTANT_NAME.to_string());
        }
        regressors.extend(exogenous.iter().map(VariableSpec::transformed_name));

        tracing::debug!(
            endogenous = %endogenous.transformed_name(),
            %first,
            %last,
            observations = n,
            regressors = k,
            rcond = solution.rcond,
            "fitted linear predictor"
        );

        let params = FittedParams {
            endogenous,
            exogenous,
            include_constant: options.include_constant,
            regressors,
            coefficients: solution.coefficients,
            first,
            last,
            observations: n,
            fitted_values: solution.fitted,
            residuals: solution.residuals,
            rcond: solution.rcond,
        };
        Ok(&*self.fitted_params.insert(params))
    }

    /// One-step prediction of the transformed target at `month`, with
    /// regressors read from `frame`.
    ///
    /// Errors
    /// ------
    /// - `ModelNotFitted` before a successful fit.
    /// - Transform errors of the exogenous specs at `month`.
    pub fn predict_transformed(&self, frame: &TimeFrame, month: Month) -> RegressionResult<f64> {
        let params = self.fitted()?;
        let row = regressor_row(params.include_constant, &params.exogenous, frame, month)?;
        Ok(params.linear_prediction(&row))
    }

    /// Forecast `steps_ahead` months starting the month after the cutoff.
    ///
    /// Returns
    /// -------
    /// `RegressionResult<Forecast>`
    ///   Exactly `steps_ahead` consecutive months; empty for `0`.
    ///
    /// Errors
    /// ------
    /// - `ModelNotFitted` before a successful fit.
    /// - See [`LinearPredictor::predict_range`].
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_linear_forecast::regression::prelude::*;
    /// let start = Month::new(2021, 1).unwrap();
    /// let y = vec![10.0, 6.0, 4.0, 3.0, 2.5, 2.25];
    /// let frame = TimeFrame::new(start, [("y", y)]).unwrap();
    /// let mut model = LinearPredictor::new(frame);
    /// let opts = FitOptions::new(Month::new(2021, 6).unwrap()).with_constant(true);
    /// model.fit(VariableSpec::new("y"), vec![VariableSpec::new("y").lag(1)], opts).unwrap();
    ///
    /// let forecast = model.predict(2).unwrap();
    /// assert_eq!(forecast.months()[0], Month::new(2021, 7).unwrap());
    /// assert!((forecast.values()[0] - 2.125).abs() < 1e-9);
    /// ```
    pub fn predict(&self, steps_ahead: usize) -> RegressionResult<Forecast> {
        let params = self.fitted()?;
        if steps_ahead == 0 {
            return Ok(Forecast::default());
        }
        let start = params.last.succ()?;
        let end = start.offset(steps_ahead as i64 - 1)?;
        self.predict_range(start, end)
    }

    /// Forecast every month in `start..=end`.
    ///
    /// Months between the cutoff and `start` are taken from the frame as-is.
    ///
    /// Errors
    /// ------
    /// - `ModelNotFitted` before a successful fit.
    /// - `ForecastStartBeforeCutoff` if `start` is not after the cutoff.
    /// - `MissingValue` if a regressor on another series has no value for a
    ///   forecast month, or a needed target value between the cutoff and
    ///   `start` is missing.
    pub fn predict_range(&self, start: Month, end: Month) -> RegressionResult<Forecast> {
        let params = self.fitted()?;
        if start <= params.last {
            return Err(RegressionError::ForecastStartBeforeCutoff { start, last: params.last });
        }
        if end < start {
            return Ok(Forecast::default());
        }
        let months = (0..=start.months_until(end))
            .map(|h| start.offset(h))
            .collect::<RegressionResult<Vec<Month>>>()?;
        tracing::debug!(%start, %end, steps = months.len(), "forecasting");

        let mut working = self.frame.clone();
        forecast_recursion(params, &mut working, months)
    }

    /// Earliest month `≤ last` at which the target and every regressor have
    /// a transformed value.
    fn first_complete_month(
        &self, endogenous: &VariableSpec, exogenous: &[VariableSpec], last: Month,
    ) -> RegressionResult<Month> {
        let candidates = self.frame.months().into_iter().take_while(|m| *m <= last);
        for month in candidates {
            if self.is_complete(endogenous, exogenous, month)? {
                return Ok(month);
            }
        }
        Err(RegressionError::NoCompleteObservation)
    }

    fn is_complete(
        &self, endogenous: &VariableSpec, exogenous: &[VariableSpec], month: Month,
    ) -> RegressionResult<bool> {
        for spec in std::iter::once(endogenous).chain(exogenous) {
            match transform_value(spec, &self.frame, month) {
                Ok(_) => {}
                Err(RegressionError::InsufficientHistory { .. })
                | Err(RegressionError::MissingValue { .. }) => return Ok(false),
                Err(err) => return Err(err),
            }
        }
        Ok(true)
    }
}
