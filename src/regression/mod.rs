//! regression — transformed-variable linear prediction for monthly series.
//!
//! Purpose
//! -------
//! Provide a compact forecasting stack: declare how each series is
//! transformed (log, differences, lag), estimate a linear relationship by OLS
//! up to a cutoff month, and forecast the target recursively so that lagged
//! copies of the target pick up earlier forecasts.
//!
//! Key behaviors
//! -------------
//! - [`core`] holds data containers, transforms, the least-squares solver and
//!   the forecast recursion.
//! - [`models`] exposes [`LinearPredictor`].
//! - [`errors`] defines [`RegressionError`] and the [`RegressionResult`]
//!   alias used across the stack, plus the conversion into Python exceptions
//!   when the `python-bindings` feature is on.
//!
//! Conventions
//! -----------
//! - Logging goes through `tracing`: `debug` for fit summaries and forecast
//!   runs, `trace` for individual forecast steps. Installing a subscriber is
//!   left to the caller.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use rust_linear_forecast::regression::prelude::*;
//!
//! let start = Month::new(2020, 1).unwrap();
//! let x: Vec<f64> = (0..30).map(|i| i as f64).collect();
//! let y: Vec<f64> = x.iter().map(|v| 2.0 + 3.0 * v).collect();
//! let frame = TimeFrame::new(start, [("x", x), ("y", y)]).unwrap();
//!
//! let mut model = LinearPredictor::new(frame);
//! let cutoff = Month::new(2021, 12).unwrap();
//! model
//!     .fit(VariableSpec::new("y"), vec![VariableSpec::new("x")], FitOptions::new(cutoff).with_constant(true))
//!     .unwrap();
//! let forecast = model.predict(3).unwrap();
//! assert_eq!(forecast.len(), 3);
//! ```

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{FitOptions, FittedParams, Forecast, Month, TimeFrame, VariableSpec};
pub use self::errors::{RegressionError, RegressionResult};
pub use self::models::LinearPredictor;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_linear_forecast::regression::prelude::*;
//
// to import the main forecasting surface in a single line.

pub mod prelude {
    pub use super::{
        FitOptions, FittedParams, Forecast, LinearPredictor, Month, RegressionError,
        RegressionResult, TimeFrame, VariableSpec,
    };
}
