//! Input validation shared by frames, specifications and fit options.
//!
//! Every check here returns the first violation it finds as a typed
//! [`RegressionError`]; none of them repair the input.
use chrono::NaiveDate;
use ndarray::ArrayView1;

use crate::regression::{
    core::{period::Month, spec::VariableSpec},
    errors::{RegressionError, RegressionResult},
};

/// Check one frame column: expected length and no ±inf (`NaN` is allowed).
pub fn validate_column(name: &str, values: ArrayView1<f64>, expected_len: usize) -> RegressionResult<()> {
    if values.len() != expected_len {
        return Err(RegressionError::ColumnLengthMismatch {
            name: name.to_string(),
            expected: expected_len,
            actual: values.len(),
        });
    }
    match values.iter().position(|v| v.is_infinite()) {
        Some(index) => Err(RegressionError::NonFiniteData {
            name: name.to_string(),
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

/// Number of months between the first and last month chrono can represent.
pub fn max_lookback() -> usize {
    let span = Month::from_date(NaiveDate::MIN).months_until(Month::from_date(NaiveDate::MAX));
    usize::try_from(span).unwrap_or(0)
}

/// Check the structural invariants of a [`VariableSpec`].
///
/// Orders are `usize` so non-negativity holds by construction. The difference
/// span must be at least 1, and the total lookback
/// `diff_order · diff_span + lag_order` must stay within [`max_lookback`] so
/// that every history month is representable.
pub fn validate_spec(spec: &VariableSpec) -> RegressionResult<()> {
    if spec.diff_span == 0 {
        return Err(RegressionError::InvalidDiffSpan { name: spec.name.clone() });
    }
    let limit = max_lookback();
    let lookback = spec
        .diff_order
        .checked_mul(spec.diff_span)
        .and_then(|months| months.checked_add(spec.lag_order));
    match lookback {
        Some(months) if months <= limit => Ok(()),
        _ => Err(RegressionError::LookbackTooLong { name: spec.name.clone(), limit }),
    }
}

/// Check the endogenous specification used by a fit.
pub fn validate_endogenous(spec: &VariableSpec) -> RegressionResult<()> {
    validate_spec(spec)?;
    if spec.lag_order > 0 {
        return Err(RegressionError::EndogenousLag {
            name: spec.name.clone(),
            lag_order: spec.lag_order,
        });
    }
    Ok(())
}

/// Reciprocal-condition tolerance must be finite and in `[0, 1)`.
pub fn validate_rcond(value: f64) -> RegressionResult<()> {
    if !value.is_finite() || !(0.0..1.0).contains(&value) {
        return Err(RegressionError::InvalidTolerance { value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // `NaN` marks missing data and passes; infinities are rejected with the
    // first offending index.
    //
    // Given
    // -----
    // - `[1.0, NaN, 3.0]` and `[1.0, -inf, +inf]`, both with expected length 3.
    //
    // Expect
    // ------
    // - The first is accepted.
    // - The second fails with `NonFiniteData { index: 1 }`.
    fn validate_column_allows_nan_rejects_infinity() {
        let with_gap = array![1.0, f64::NAN, 3.0];
        let with_inf = array![1.0, f64::NEG_INFINITY, f64::INFINITY];

        assert!(validate_column("x", with_gap.view(), 3).is_ok());
        assert_eq!(
            validate_column("x", with_inf.view(), 3).unwrap_err(),
            RegressionError::NonFiniteData {
                name: "x".to_string(),
                index: 1,
                value: f64::NEG_INFINITY
            }
        );
    }

    #[test]
    fn validate_column_rejects_wrong_length() {
        let values = array![1.0, 2.0];
        assert_eq!(
            validate_column("x", values.view(), 3).unwrap_err(),
            RegressionError::ColumnLengthMismatch { name: "x".to_string(), expected: 3, actual: 2 }
        );
    }

    #[test]
    // Purpose
    // -------
    // The endogenous spec may be differenced and logged but not lagged, and no
    // spec may use a zero difference span.
    //
    // Given
    // -----
    // - `y` with lag 1, and `y` with diff span 0.
    //
    // Expect
    // ------
    // - `EndogenousLag` and `InvalidDiffSpan` respectively.
    fn validate_endogenous_rejects_lag_and_zero_span() {
        let lagged = VariableSpec::new("y").lag(1);
        let zero_span = VariableSpec::new("y").diff(1).span(0);

        assert_eq!(
            validate_endogenous(&lagged).unwrap_err(),
            RegressionError::EndogenousLag { name: "y".to_string(), lag_order: 1 }
        );
        assert_eq!(
            validate_endogenous(&zero_span).unwrap_err(),
            RegressionError::InvalidDiffSpan { name: "y".to_string() }
        );
        assert!(validate_endogenous(&VariableSpec::new("y").diff(1).log()).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Lookbacks that overflow `usize` or leave the calendar are rejected with a
    // typed error instead of wrapping during month arithmetic.
    //
    // Given
    // -----
    // - A span of `2^63`, a doubled span past `usize::MAX`, and a lag equal to
    //   the calendar range plus one.
    // - A twelve-month seasonal difference for contrast.
    //
    // Expect
    // ------
    // - `LookbackTooLong` for the first three, `Ok` for the last.
    fn validate_spec_rejects_unrepresentable_lookback() {
        let limit = max_lookback();
        let huge_span = VariableSpec::new("v").diff(1).span(1usize << 63);
        let wrapping = VariableSpec::new("v").diff(2).span(usize::MAX / 2 + 1);
        let long_lag = VariableSpec::new("v").lag(limit + 1);

        for spec in [&huge_span, &wrapping, &long_lag] {
            assert_eq!(
                validate_spec(spec).unwrap_err(),
                RegressionError::LookbackTooLong { name: "v".to_string(), limit }
            );
        }
        assert!(limit > 12 * 100_000);
        assert!(validate_spec(&VariableSpec::new("v").diff(1).span(12)).is_ok());
    }

    #[test]
    fn validate_rcond_bounds() {
        assert!(validate_rcond(0.0).is_ok());
        assert!(validate_rcond(1e-10).is_ok());
        assert!(validate_rcond(1.0).is_err());
        assert!(validate_rcond(-1e-3).is_err());
        assert!(validate_rcond(f64::NAN).is_err());
    }
}
