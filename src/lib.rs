//! rust_linear_forecast — linear regression on transformed monthly series with
//! recursive forecasting, plus optional Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the regression stack to Python via the `_rust_linear_forecast` extension
//! module. When the `python-bindings` feature is enabled, this module defines
//! the Python-facing `VariableSpec` and `LinearPredictor` classes.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust module ([`regression`]) as the public crate
//!   surface.
//! - Define `#[pyclass]` wrappers and the `#[pymodule]` initializer for the
//!   `_rust_linear_forecast` Python extension.
//! - Register the `regression` submodule in `sys.modules` so dotted imports
//!   work from Python.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in [`regression`]; this file performs only FFI
//!   glue, input conversion, and error mapping.
//! - Months cross the boundary as `"YYYY-MM"` strings; columns as 1-D float
//!   arrays with `NaN` for missing observations.
//!
//! Conventions
//! -----------
//! - Errors from core Rust code are [`regression::RegressionError`] values and
//!   become Python `ValueError`s at the boundary.
//! - Forecasts are returned to Python as `(months, values)` lists.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on [`regression`] (or its prelude) and can
//!   ignore the items guarded by the `python-bindings` feature.

pub mod regression;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyDict};

#[cfg(feature = "python-bindings")]
use crate::{
    regression::{
        core::{forecasts::Forecast, spec::VariableSpec, validation::validate_spec},
        models::linear_predictor::LinearPredictor,
    },
    utils::{extract_fit_options, extract_frame, extract_month},
};

#[cfg(feature = "python-bindings")]
fn forecast_to_lists(forecast: &Forecast) -> (Vec<String>, Vec<f64>) {
    forecast.iter().map(|(month, value)| (month.to_string(), value)).unzip()
}

/// VariableSpec — Python-facing transformation recipe for one column.
///
/// Constructed from Python via
/// `VariableSpec(name, diff_order=0, log_transform=False, lag_order=0, diff_span=1)`.
/// All fields are read-only properties; `transformed_name` gives the label used
/// for the fitted coefficient.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "VariableSpec", module = "rust_linear_forecast.regression")]
#[derive(Clone)]
pub struct PyVariableSpec {
    pub inner: VariableSpec,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyVariableSpec {
    #[new]
    #[pyo3(
        signature = (name, diff_order = 0, log_transform = false, lag_order = 0, diff_span = 1),
        text_signature = "(name, /, diff_order=0, log_transform=False, lag_order=0, diff_span=1)"
    )]
    pub fn new(
        name: String, diff_order: usize, log_transform: bool, lag_order: usize, diff_span: usize,
    ) -> PyResult<Self> {
        let inner =
            VariableSpec::with_orders(name, diff_order, log_transform, lag_order).span(diff_span);
        validate_spec(&inner)?;
        Ok(PyVariableSpec { inner })
    }

    #[getter]
    pub fn name(&self) -> String {
        self.inner.name.clone()
    }

    #[getter]
    pub fn diff_order(&self) -> usize {
        self.inner.diff_order
    }

    #[getter]
    pub fn diff_span(&self) -> usize {
        self.inner.diff_span
    }

    #[getter]
    pub fn log_transform(&self) -> bool {
        self.inner.log_transform
    }

    #[getter]
    pub fn lag_order(&self) -> usize {
        self.inner.lag_order
    }

    #[getter]
    pub fn transformed_name(&self) -> String {
        self.inner.transformed_name()
    }

    fn __repr__(&self) -> String {
        format!(
            "VariableSpec(name={:?}, diff_order={}, log_transform={}, lag_order={}, diff_span={})",
            self.inner.name,
            self.inner.diff_order,
            if self.inner.log_transform { "True" } else { "False" },
            self.inner.lag_order,
            self.inner.diff_span,
        )
    }
}

/// LinearPredictor — Python-facing wrapper around
/// [`regression::models::linear_predictor::LinearPredictor`].
///
/// Parameters
/// ----------
/// Constructed from Python via `LinearPredictor(columns, start)`:
/// - `columns`: `dict[str, array-like]`
///   Raw monthly series of equal length; `NaN` marks missing values.
/// - `start`: `str`
///   Month of the first row, `"YYYY-MM"` or `"YYYY-MM-DD"`.
///
/// Notes
/// -----
/// - `fit` mirrors the Rust signature with months as strings; `predict` and
///   `predict_range` return `(months, values)`.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "LinearPredictor", module = "rust_linear_forecast.regression")]
pub struct PyLinearPredictor {
    pub inner: LinearPredictor,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyLinearPredictor {
    #[new]
    #[pyo3(signature = (columns, start), text_signature = "(columns, start, /)")]
    pub fn new<'py>(py: Python<'py>, columns: &Bound<'py, PyDict>, start: &str) -> PyResult<Self> {
        let frame = extract_frame(py, columns, start)?;
        Ok(PyLinearPredictor { inner: LinearPredictor::new(frame) })
    }

    #[pyo3(
        signature = (
            endogenous,
            exogenous,
            last_month,
            first_month = None,
            include_constant = None,
            rcond = None,
        ),
        text_signature = "(endogenous, exogenous, last_month, /, first_month=None, \
                          include_constant=None, rcond=None)"
    )]
    pub fn fit(
        &mut self, endogenous: PyVariableSpec, exogenous: Vec<PyVariableSpec>, last_month: &str,
        first_month: Option<&str>, include_constant: Option<bool>, rcond: Option<f64>,
    ) -> PyResult<()> {
        let opts = extract_fit_options(last_month, first_month, include_constant, rcond)?;
        let exogenous = exogenous.into_iter().map(|spec| spec.inner).collect();
        self.inner.fit(endogenous.inner, exogenous, opts)?;
        Ok(())
    }

    #[pyo3(signature = (steps_ahead = 12), text_signature = "(steps_ahead=12)")]
    pub fn predict(&self, steps_ahead: usize) -> PyResult<(Vec<String>, Vec<f64>)> {
        Ok(forecast_to_lists(&self.inner.predict(steps_ahead)?))
    }

    #[pyo3(signature = (start, end), text_signature = "(start, end, /)")]
    pub fn predict_range(&self, start: &str, end: &str) -> PyResult<(Vec<String>, Vec<f64>)> {
        let forecast = self.inner.predict_range(extract_month(start)?, extract_month(end)?)?;
        Ok(forecast_to_lists(&forecast))
    }

    #[getter]
    pub fn is_fitted(&self) -> bool {
        self.inner.is_fitted()
    }

    /// `[(label, estimate), ...]` in design order.
    #[getter]
    pub fn coefficients(&self) -> PyResult<Vec<(String, f64)>> {
        let params = self.inner.fitted()?;
        Ok(params.named_coefficients().map(|(name, value)| (name.to_string(), value)).collect())
    }

    #[getter]
    pub fn residuals(&self) -> PyResult<Vec<f64>> {
        Ok(self.inner.fitted()?.residuals.to_vec())
    }

    #[getter]
    pub fn fitted_values(&self) -> PyResult<Vec<f64>> {
        Ok(self.inner.fitted()?.fitted_values.to_vec())
    }

    /// `(first, last)` months of the estimation window.
    #[getter]
    pub fn window(&self) -> PyResult<(String, String)> {
        let params = self.inner.fitted()?;
        Ok((params.first.to_string(), params.last.to_string()))
    }
}

/// _rust_linear_forecast — PyO3 module initializer for the Python extension.
///
/// Creates the `regression` submodule, attaches it to the parent module, and
/// registers it in `sys.modules` so that
/// `from rust_linear_forecast.regression import LinearPredictor` works.
///
/// Errors
/// ------
/// - `PyErr` if creating the submodule or editing `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_linear_forecast<'py>(py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let regression_mod = PyModule::new(py, "regression")?;
    regression_mod.add_class::<PyVariableSpec>()?;
    regression_mod.add_class::<PyLinearPredictor>()?;
    m.add_submodule(&regression_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    py.import("sys")?
        .getattr("modules")?
        .set_item("rust_linear_forecast.regression", regression_mod)?;
    Ok(())
}

#[cfg(all(test, feature = "python-bindings"))]
mod tests {
    use super::*;
    use crate::regression::core::period::Month;

    #[test]
    fn forecast_lists_use_month_labels() {
        let mut forecast = Forecast::default();
        forecast.push(Month::new(2024, 11).unwrap(), 1.5, 1.5);
        forecast.push(Month::new(2024, 12).unwrap(), 2.5, 2.5);

        let (months, values) = forecast_to_lists(&forecast);

        assert_eq!(months, vec!["2024-11", "2024-12"]);
        assert_eq!(values, vec![1.5, 2.5]);
    }
}
