//! models — user-facing linear predictors.
//!
//! Purpose
//! -------
//! Expose [`LinearPredictor`], which owns a [`TimeFrame`](crate::regression::core::TimeFrame),
//! fits an OLS regression of a transformed target on transformed regressors,
//! and produces recursive multi-step forecasts.
//!
//! Downstream usage
//! ----------------
//! - Build a frame, construct `LinearPredictor::new(frame)`, call `fit` with
//!   the target spec, regressor specs and [`FitOptions`](crate::regression::core::FitOptions),
//!   then `predict(steps)` or `predict_range(start, end)`.

pub mod linear_predictor;

pub use self::linear_predictor::LinearPredictor;

pub mod prelude {
    pub use super::linear_predictor::LinearPredictor;
}
