//! Errors for transformed-variable regression (frame validation, transform
//! lookbacks, estimation windows, least-squares conditioning, and forecasting).
//!
//! This module defines a single error type, [`RegressionError`], used across
//! the Rust core and the optional Python-facing API. It implements
//! `Display`/`Error` and converts to `PyErr` when `python-bindings` is enabled.
//!
//! ## Conventions
//! - Months are reported in `YYYY-MM` form.
//! - `NaN` in a frame means "not observed"; it is never an error by itself,
//!   only when a transform or fit actually needs the value.
//! - Nothing is silently corrected: missing history, non-positive values under
//!   a log transform, and rank-deficient designs all surface here.
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*};

use crate::regression::core::period::Month;

/// Crate-wide result alias for regression operations.
pub type RegressionResult<T> = Result<T, RegressionError>;

/// Unified error type for transformed-variable regression.
#[derive(Debug, Clone, PartialEq)]
pub enum RegressionError {
    // ---- Frame construction ----
    /// A frame must have at least one column and one row.
    EmptyFrame,

    /// All columns of a frame must share the index length.
    ColumnLengthMismatch { name: String, expected: usize, actual: usize },

    /// A data point is ±inf (`NaN` is allowed and means missing).
    NonFiniteData { name: String, index: usize, value: f64 },

    /// A column name was inserted twice.
    DuplicateColumn { name: String },

    // ---- Lookups ----
    /// Column is not present in the frame.
    UnknownColumn { name: String },

    /// Month lies before the start or after the end of the frame index.
    MonthOutOfRange { month: Month, start: Month, end: Month },

    /// A month string could not be parsed.
    InvalidMonth { input: String },

    /// Month arithmetic left the representable calendar.
    MonthOverflow { month: Month, offset: i64 },

    // ---- Transforms ----
    /// The transform needs history before the first month of the frame.
    InsufficientHistory { name: String, month: Month, lookback: usize },

    /// A source value required by the transform is missing (`NaN`).
    MissingValue { name: String, month: Month },

    /// Log transform applied to a value that is not strictly positive.
    NonPositiveLog { name: String, month: Month, value: f64 },

    /// Difference span must be at least one month.
    InvalidDiffSpan { name: String },

    /// `diff_order · diff_span + lag_order` exceeds the calendar range.
    LookbackTooLong { name: String, limit: usize },

    /// A value to be inverse-transformed is `NaN` or ±inf.
    NonFiniteTransformed { name: String, month: Month, value: f64 },

    // ---- Estimation ----
    /// The endogenous specification must not be lagged.
    EndogenousLag { name: String, lag_order: usize },

    /// Neither a constant nor any exogenous regressor was requested.
    NoRegressors,

    /// First month of the estimation window lies after the cutoff.
    EmptyWindow { first: Month, last: Month },

    /// No month in the frame has every transformed variable available.
    NoCompleteObservation,

    /// Fewer observations than regressors.
    TooFewObservations { observations: usize, regressors: usize },

    /// Design matrix is singular or too ill-conditioned to solve.
    SingularDesign { rcond: f64, tolerance: f64 },

    /// Reciprocal-condition tolerance must be finite and in `[0, 1)`.
    InvalidTolerance { value: f64 },

    // ---- Forecasting ----
    /// Model hasn't been fitted yet.
    ModelNotFitted,

    /// Forecasts must start strictly after the estimation cutoff.
    ForecastStartBeforeCutoff { start: Month, last: Month },
}

impl std::error::Error for RegressionError {}

impl std::fmt::Display for RegressionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Frame construction ----
            RegressionError::EmptyFrame => {
                write!(f, "Frame must contain at least one column and one row.")
            }
            RegressionError::ColumnLengthMismatch { name, expected, actual } => {
                write!(f, "Column '{name}' has length {actual}; expected {expected}.")
            }
            RegressionError::NonFiniteData { name, index, value } => {
                write!(f, "Column '{name}' has a non-finite value at index {index}: {value}")
            }
            RegressionError::DuplicateColumn { name } => {
                write!(f, "Column '{name}' already exists in the frame.")
            }
            // ---- Lookups ----
            RegressionError::UnknownColumn { name } => {
                write!(f, "Column '{name}' is not present in the frame.")
            }
            RegressionError::MonthOutOfRange { month, start, end } => {
                write!(f, "Month {month} lies outside the frame index [{start}, {end}].")
            }
            RegressionError::InvalidMonth { input } => {
                write!(f, "Cannot parse '{input}' as a month; expected YYYY-MM or YYYY-MM-DD.")
            }
            RegressionError::MonthOverflow { month, offset } => {
                write!(f, "Offsetting month {month} by {offset} months leaves the calendar range.")
            }
            // ---- Transforms ----
            RegressionError::InsufficientHistory { name, month, lookback } => {
                write!(
                    f,
                    "Transform of '{name}' at {month} needs {lookback} months of history before the frame start."
                )
            }
            RegressionError::MissingValue { name, month } => {
                write!(f, "Missing required value of '{name}' at {month}.")
            }
            RegressionError::NonPositiveLog { name, month, value } => {
                write!(
                    f,
                    "Log transform of '{name}' requires strictly positive values; got {value} at {month}."
                )
            }
            RegressionError::NonFiniteTransformed { name, month, value } => {
                write!(f, "Cannot reverse-transform NaN or infinite value {value} of '{name}' at {month}.")
            }
            RegressionError::InvalidDiffSpan { name } => {
                write!(f, "Difference span of '{name}' must be at least 1.")
            }
            RegressionError::LookbackTooLong { name, limit } => {
                write!(
                    f,
                    "Lookback of '{name}' (diff_order * diff_span + lag_order) exceeds {limit} months."
                )
            }
            // ---- Estimation ----
            RegressionError::EndogenousLag { name, lag_order } => {
                write!(
                    f,
                    "Endogenous variable '{name}' must have lag order 0; got {lag_order}."
                )
            }
            RegressionError::NoRegressors => {
                write!(f, "At least one exogenous variable or a constant is required.")
            }
            RegressionError::EmptyWindow { first, last } => {
                write!(f, "Estimation window is empty: first month {first} is after last month {last}.")
            }
            RegressionError::NoCompleteObservation => {
                write!(f, "No month up to the cutoff has all transformed variables available.")
            }
            RegressionError::TooFewObservations { observations, regressors } => {
                write!(
                    f,
                    "Estimation needs at least {regressors} observations; the window has {observations}."
                )
            }
            RegressionError::SingularDesign { rcond, tolerance } => {
                write!(
                    f,
                    "Design matrix is singular or ill-conditioned: reciprocal condition {rcond:e} < {tolerance:e}."
                )
            }
            RegressionError::InvalidTolerance { value } => {
                write!(f, "rcond tolerance must be finite and in [0, 1); got {value}")
            }
            // ---- Forecasting ----
            RegressionError::ModelNotFitted => {
                write!(f, "Model hasn't been fitted yet.")
            }
            RegressionError::ForecastStartBeforeCutoff { start, last } => {
                write!(f, "Forecast start {start} must come after the estimation cutoff {last}.")
            }
        }
    }
}

/// Convert a [`RegressionError`] into a Python `ValueError` with the error message.
///
/// This is used at the Rust↔Python boundary to surface domain errors cleanly.
#[cfg(feature = "python-bindings")]
impl std::convert::From<RegressionError> for PyErr {
    fn from(err: RegressionError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
