//! Fit options — configuration of the estimation window and solver.
//!
//! Purpose
//! -------
//! Collect the knobs of [`LinearPredictor::fit`](crate::regression::models::linear_predictor::LinearPredictor::fit)
//! in one validated value: the cutoff month, an optional first month, whether
//! to add an intercept, and the reciprocal-condition tolerance of the
//! least-squares solve.
//!
//! Key behaviors
//! -------------
//! - [`FitOptions::new`] takes the only required setting (the cutoff) and fills
//!   documented defaults for the rest.
//! - Builder-style setters (`with_first`, `with_constant`, `with_rcond`) return
//!   updated copies; `with_rcond` validates its input.
//! - Serializable with serde so a run can be described in a config file.
//!
//! Invariants & assumptions
//! ------------------------
//! - `rcond ∈ [0, 1)` and finite.
//! - Cross-checks against the data (cutoff inside the frame, `first ≤ last`)
//!   happen at fit time, where the frame is known.
use serde::{Deserialize, Serialize};

use crate::regression::{
    core::{ols::DEFAULT_RCOND, period::Month, validation::validate_rcond},
    errors::RegressionResult,
};

fn default_rcond() -> f64 {
    DEFAULT_RCOND
}

/// FitOptions — estimation-time configuration for a linear predictor.
///
/// Fields
/// ------
/// - `last`: [`Month`]
///   Last month used for estimation (the training cutoff). Forecasts start
///   the month after.
/// - `first`: `Option<Month>`
///   First month of the estimation window. `None` selects the first month at
///   which every transformed variable is available.
/// - `include_constant`: `bool`
///   Prepend an intercept column named `const`. Defaults to `false`.
/// - `rcond`: `f64`
///   Designs whose smallest-to-largest singular value ratio does not exceed
///   this are rejected as singular. Defaults to [`DEFAULT_RCOND`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitOptions {
    pub last: Month,
    #[serde(default)]
    pub first: Option<Month>,
    #[serde(default)]
    pub include_constant: bool,
    #[serde(default = "default_rcond")]
    pub rcond: f64,
}

impl FitOptions {
    /// Options with cutoff `last` and default settings otherwise.
    pub fn new(last: Month) -> FitOptions {
        FitOptions { last, first: None, include_constant: false, rcond: DEFAULT_RCOND }
    }

    pub fn with_first(mut self, first: Month) -> FitOptions {
        self.first = Some(first);
        self
    }

    pub fn with_constant(mut self, include_constant: bool) -> FitOptions {
        self.include_constant = include_constant;
        self
    }

    /// Set the singularity tolerance.
    ///
    /// Errors
    /// ------
    /// - `RegressionError::InvalidTolerance` unless `rcond` is finite and in
    ///   `[0, 1)`.
    pub fn with_rcond(mut self, rcond: f64) -> RegressionResult<FitOptions> {
        validate_rcond(rcond)?;
        self.rcond = rcond;
        Ok(self)
    }

    /// Re-check fields that may have been set directly or deserialized.
    pub fn validate(&self) -> RegressionResult<()> {
        validate_rcond(self.rcond)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regression::errors::RegressionError;

    #[test]
    // Purpose
    // -------
    // `new` fills the documented defaults and setters only touch their field.
    //
    // Given
    // -----
    // - Cutoff 2023-06, then `with_first(2020-01)` and `with_constant(true)`.
    //
    // Expect
    // ------
    // - Defaults: no first month, no constant, `rcond == DEFAULT_RCOND`.
    // - After the setters: first and constant set, cutoff unchanged.
    fn new_sets_defaults_and_setters_update() {
        let last = Month::new(2023, 6).unwrap();
        let first = Month::new(2020, 1).unwrap();

        let defaults = FitOptions::new(last);
        let tuned = defaults.with_first(first).with_constant(true);

        assert_eq!(defaults.first, None);
        assert!(!defaults.include_constant);
        assert_eq!(defaults.rcond, DEFAULT_RCOND);
        assert_eq!(tuned.first, Some(first));
        assert!(tuned.include_constant);
        assert_eq!(tuned.last, last);
    }

    #[test]
    fn with_rcond_rejects_out_of_range() {
        let opts = FitOptions::new(Month::new(2023, 6).unwrap());
        assert_eq!(opts.with_rcond(1.5).unwrap_err(), RegressionError::InvalidTolerance { value: 1.5 });
        assert_eq!(opts.with_rcond(1e-8).unwrap().rcond, 1e-8);
    }

    #[test]
    // Purpose
    // -------
    // Options deserialize from a sparse JSON document.
    //
    // Given
    // -----
    // - `{"last": "2023-06", "include_constant": true}`.
    //
    // Expect
    // ------
    // - `first` is `None` and `rcond` takes its default.
    fn deserialize_from_sparse_json() {
        let opts: FitOptions =
            serde_json::from_str(r#"{"last": "2023-06", "include_constant": true}"#).unwrap();

        assert_eq!(opts.last, Month::new(2023, 6).unwrap());
        assert_eq!(opts.first, None);
        assert!(opts.include_constant);
        assert_eq!(opts.rcond, DEFAULT_RCOND);
        assert!(opts.validate().is_ok());
    }
}
