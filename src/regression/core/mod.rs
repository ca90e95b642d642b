//! core — monthly data, variable transforms, and least-squares numerics.
//!
//! Purpose
//! -------
//! Collect the building blocks of transformed-variable linear prediction: a
//! gap-free monthly [`TimeFrame`], [`VariableSpec`] recipes and their forward
//! and reverse transforms, the SVD least-squares solver, fitted parameters and
//! the recursive forecast loop. [`models`](crate::regression::models) wires
//! these into the user-facing predictor.
//!
//! Key behaviors
//! -------------
//! - Validate raw data once, at [`TimeFrame`] construction.
//! - Compute transformed values lazily per `(spec, month)` with
//!   [`transform_value`] and invert them with [`reverse_transform_value`].
//! - Solve OLS with an explicit singularity check ([`solve_least_squares`]).
//! - Roll forecasts forward on a working copy of the data
//!   ([`forecast_recursion`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - `NaN` in a frame means "not observed"; ±inf is rejected.
//! - Months are calendar months ([`Month`]); the frame index has no gaps.
//!
//! Conventions
//! -----------
//! - This layer does no I/O. Forecast steps emit `tracing` events at trace
//!   level; everything else reports through [`RegressionResult`](crate::regression::errors::RegressionResult).

pub mod forecasts;
pub mod frame;
pub mod ols;
pub mod options;
pub mod params;
pub mod period;
pub mod spec;
pub mod transform;
pub mod validation;

// ---- Re-exports -----------------------------------------------------------

pub use self::forecasts::{Forecast, forecast_recursion, regressor_row};
pub use self::frame::TimeFrame;
pub use self::ols::{DEFAULT_RCOND, OlsSolution, solve_least_squares};
pub use self::options::FitOptions;
pub use self::params::{CONSTANT_NAME, FittedParams};
pub use self::period::Month;
pub use self::spec::VariableSpec;
pub use self::transform::{reverse_transform_value, transform_column, transform_value};
pub use self::validation::{validate_column, validate_endogenous, validate_rcond, validate_spec};

pub mod prelude {
    pub use super::{FitOptions, FittedParams, Forecast, Month, TimeFrame, VariableSpec};
}
