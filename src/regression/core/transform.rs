//! Forward and inverse variable transforms on a [`TimeFrame`].
//!
//! Purpose
//! -------
//! Evaluate the recipe carried by a [`VariableSpec`] at a single month, build a
//! whole transformed column, and map a transformed-scale value back to the raw
//! scale using known history.
//!
//! Key behaviors
//! -------------
//! - Forward: `g(u) = ln x_u` (or `x_u`), `D(u) = Σ_{k=0..d} (−1)^k C(d,k) g(u − kS)`,
//!   `z(t) = D(t − L)` with `d = diff_order`, `S = diff_span`, `L = lag_order`.
//! - Inverse: given `y = z(t)`, solve the same identity for `g(t − L)` using
//!   the other `d` history terms, then undo the log with `exp`. The lag is
//!   undone by re-indexing: the reconstructed raw value belongs to `t − L`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every history term must lie inside the frame and be observed (not `NaN`).
//! - Under a log transform every touched value must be strictly positive.
//! - History terms may be actual data or values written by an earlier
//!   forecast step; the transform does not distinguish them.
//!
//! Conventions
//! -----------
//! - Failures are typed: [`RegressionError::InsufficientHistory`] when a term
//!   precedes the frame start, [`RegressionError::MissingValue`] for `NaN` or a
//!   month after the frame end, [`RegressionError::NonPositiveLog`] for
//!   `x ≤ 0` under log.
//! - [`transform_column`] turns only the first two into `NaN` so that a full
//!   column can be inspected; all other errors still propagate.
//!
//! Testing notes
//! -------------
//! - Unit tests pin single-value results for log, difference, seasonal
//!   difference and lag on the series `1, 2, 3, …`, the failure modes at the
//!   start of the series, and the inverse on a quadratic series for every
//!   combination of difference, log and lag.
use ndarray::Array1;

use crate::regression::{
    core::{frame::TimeFrame, period::Month, spec::VariableSpec, validation::validate_spec},
    errors::{RegressionError, RegressionResult},
};

/// Signed binomial weights `(−1)^k C(d, k)` for `k = 0..=d`.
fn difference_weights(order: usize) -> Vec<f64> {
    let mut weights = Vec::with_capacity(order + 1);
    let mut binom = 1.0;
    for k in 0..=order {
        if k > 0 {
            binom = binom * (order - k + 1) as f64 / k as f64;
        }
        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
        weights.push(sign * binom);
    }
    weights
}

/// Source value at `month` after the optional log, with history checks.
fn level(spec: &VariableSpec, frame: &TimeFrame, month: Month, target: Month) -> RegressionResult<f64> {
    frame.column(&spec.name)?;
    if month < frame.start() {
        return Err(RegressionError::InsufficientHistory {
            name: spec.name.clone(),
            month: target,
            lookback: spec.lookback(),
        });
    }
    if month > frame.end() {
        return Err(RegressionError::MissingValue { name: spec.name.clone(), month });
    }
    let value = frame.value(&spec.name, month)?;
    if value.is_nan() {
        return Err(RegressionError::MissingValue { name: spec.name.clone(), month });
    }
    if spec.log_transform {
        if value <= 0.0 {
            return Err(RegressionError::NonPositiveLog { name: spec.name.clone(), month, value });
        }
        return Ok(value.ln());
    }
    Ok(value)
}

/// History term `k` (`k ≥ 0`) of the difference ending at `base`.
fn history_month(spec: &VariableSpec, base: Month, k: usize) -> RegressionResult<Month> {
    base.offset(-((k * spec.diff_span) as i64))
}

/// Transformed value of `spec` at `month`.
///
/// Parameters
/// ----------
/// - `spec`: `&VariableSpec`
///   Recipe to apply.
/// - `frame`: `&TimeFrame`
///   Source data; may include previously forecast values.
/// - `month`: `Month`
///   Month of the transformed observation.
///
/// Returns
/// -------
/// `RegressionResult<f64>`
///   `D(month − lag_order)`.
///
/// Errors
/// ------
/// - `RegressionError::InvalidDiffSpan` for `diff_span == 0`.
/// - `RegressionError::LookbackTooLong` if the lookback is not representable.
/// - `RegressionError::UnknownColumn` if the source column is absent.
/// - `RegressionError::InsufficientHistory` when `month − lookback` precedes
///   the frame start.
/// - `RegressionError::MissingValue` when a needed term is `NaN` or after the
///   frame end.
/// - `RegressionError::NonPositiveLog` for `x ≤ 0` under a log transform.
///
/// Examples
/// --------
/// ```rust
/// # use rust_linear_forecast::regression::core::{frame::TimeFrame, period::Month, spec::VariableSpec, transform::transform_value};
/// let frame = TimeFrame::new(Month::new(2022, 1).unwrap(), [("value", vec![1.0, 2.0, 4.0])]).unwrap();
/// let spec = VariableSpec::new("value").diff(1).lag(1);
/// let z = transform_value(&spec, &frame, Month::new(2022, 3).unwrap()).unwrap();
/// assert_eq!(z, 1.0); // 2 − 1, observed one month earlier
/// ```
pub fn transform_value(spec: &VariableSpec, frame: &TimeFrame, month: Month) -> RegressionResult<f64> {
    validate_spec(spec)?;
    let base = month.offset(-(spec.lag_order as i64))?;
    difference_weights(spec.diff_order).iter().enumerate().try_fold(0.0, |acc, (k, &weight)| {
        let term = level(spec, frame, history_month(spec, base, k)?, month)?;
        Ok(acc + weight * term)
    })
}

/// Transformed column of `spec` over the whole frame index.
///
/// Rows without enough history, or touching a missing value, are `NaN`.
/// Any other failure (unknown column, non-positive value under log, invalid
/// span) is returned as an error.
pub fn transform_column(spec: &VariableSpec, frame: &TimeFrame) -> RegressionResult<Array1<f64>> {
    frame
        .months()
        .into_iter()
        .map(|month| match transform_value(spec, frame, month) {
            Ok(value) => Ok(value),
            Err(RegressionError::InsufficientHistory { .. })
            | Err(RegressionError::MissingValue { .. }) => Ok(f64::NAN),
            Err(err) => Err(err),
        })
        .collect::<RegressionResult<Vec<f64>>>()
        .map(Array1::from)
}

/// Raw-scale value implied by a transformed value `transformed` at `month`.
///
/// Parameters
/// ----------
/// - `spec`: `&VariableSpec`
///   Recipe the value was produced with.
/// - `frame`: `&TimeFrame`
///   Known history (actual data and earlier forecasts).
/// - `month`: `Month`
///   Month of the transformed observation.
/// - `transformed`: `f64`
///   Value on the transformed scale, e.g. a regression prediction.
///
/// Returns
/// -------
/// `RegressionResult<f64>`
///   The raw value at `month − lag_order` that makes
///   `transform_value(spec, frame, month) == transformed` once written back.
///
/// Errors
/// ------
/// - `RegressionError::UnknownColumn` if the source column is absent, checked
///   first.
/// - `RegressionError::NonFiniteTransformed` if `transformed` is `NaN` or ±inf.
/// - Same as [`transform_value`] for the `diff_order` history terms.
///
/// Notes
/// -----
/// - The value at `month − lag_order` itself is not read, so it may be
///   missing or about to be overwritten by a forecast.
pub fn reverse_transform_value(
    spec: &VariableSpec, frame: &TimeFrame, month: Month, transformed: f64,
) -> RegressionResult<f64> {
    validate_spec(spec)?;
    frame.column(&spec.name)?;
    if !transformed.is_finite() {
        return Err(RegressionError::NonFiniteTransformed {
            name: spec.name.clone(),
            month,
            value: transformed,
        });
    }
    let base = month.offset(-(spec.lag_order as i64))?;
    let weights = difference_weights(spec.diff_order);
    let mut level_value = transformed;
    for (k, &weight) in weights.iter().enumerate().skip(1) {
        level_value -= weight * level(spec, frame, history_month(spec, base, k)?, month)?;
    }
    Ok(if spec.log_transform { level_value.exp() } else { level_value })
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Single-value forward transforms on `1, 2, …, 24` starting 2022-01.
    // - Failure modes when the lookback reaches before the frame start.
    // - The inverse transform, including the identity
    //   reverse(transform(x_t)) == x_{t−L} on a quadratic series.
    //
    // They intentionally DO NOT cover:
    // - Regression or forecasting; see `models::linear_predictor`.
    // -------------------------------------------------------------------------

    const TOL: f64 = 1e-12;

    fn month(s: &str) -> Month {
        Month::parse(s).unwrap()
    }

    // Monthly series 1, 2, …, 24 starting 2022-01.
    fn counting_frame() -> TimeFrame {
        let values: Vec<f64> = (1..=24i32).map(f64::from).collect();
        TimeFrame::new(month("2022-01"), [("value", values)]).unwrap()
    }

    // Triangular numbers 1, 3, 6, 10, … (36 months from 2020-01).
    fn quadratic_frame() -> TimeFrame {
        let values: Vec<f64> = (1..=36i32).map(|n| f64::from(n * (n + 1) / 2)).collect();
        TimeFrame::new(month("2020-01"), [("value", values)]).unwrap()
    }

    #[test]
    fn difference_weights_are_signed_binomials() {
        assert_eq!(difference_weights(0), vec![1.0]);
        assert_eq!(difference_weights(1), vec![1.0, -1.0]);
        assert_eq!(difference_weights(3), vec![1.0, -3.0, 3.0, -1.0]);
    }

    #[test]
    // Purpose
    // -------
    // Log-difference of order one compares adjacent months.
    //
    // Given
    // -----
    // - `value` = 1, 2, … and spec `log(value)(d1)` at 2022-02.
    //
    // Expect
    // ------
    // - `ln 2 − ln 1`.
    fn log_diff_normal_case() {
        let spec = VariableSpec::new("value").log().diff(1);
        let z = transform_value(&spec, &counting_frame(), month("2022-02")).unwrap();
        assert!((z - (2.0f64.ln() - 1.0f64.ln())).abs() < TOL);
    }

    #[test]
    fn log_diff_without_base_value_is_insufficient_history() {
        let spec = VariableSpec::new("value").log().diff(1);
        let err = transform_value(&spec, &counting_frame(), month("2022-01")).unwrap_err();
        assert_eq!(
            err,
            RegressionError::InsufficientHistory {
                name: "value".to_string(),
                month: month("2022-01"),
                lookback: 1
            }
        );
    }

    #[test]
    // Purpose
    // -------
    // A twelve-month span gives the year-over-year log change.
    //
    // Given
    // -----
    // - spec `log(value)(d1x12)` at 2023-01, where value = 13 and a year
    //   earlier value = 1.
    //
    // Expect
    // ------
    // - `ln 13 − ln 1`.
    fn log_diff_year_over_year() {
        let spec = VariableSpec::new("value").log().diff(1).span(12);
        let z = transform_value(&spec, &counting_frame(), month("2023-01")).unwrap();
        assert!((z - 13.0f64.ln()).abs() < TOL);
    }

    #[test]
    fn second_difference_of_linear_series_is_zero() {
        let spec = VariableSpec::new("value").diff(2);
        let z = transform_value(&spec, &counting_frame(), month("2022-06")).unwrap();
        assert!(z.abs() < TOL);
    }

    #[test]
    fn differencing_only() {
        let spec = VariableSpec::new("value").diff(1);
        let z = transform_value(&spec, &counting_frame(), month("2023-01")).unwrap();
        assert!((z - 1.0).abs() < TOL);
    }

    #[test]
    fn log_only() {
        let spec = VariableSpec::new("value").log();
        let z = transform_value(&spec, &counting_frame(), month("2023-01")).unwrap();
        assert!((z - 13.0f64.ln()).abs() < TOL);
    }

    #[test]
    fn no_transformation_changes_nothing() {
        let spec = VariableSpec::new("value");
        let z = transform_value(&spec, &counting_frame(), month("2023-01")).unwrap();
        assert_eq!(z, 13.0);
    }

    #[test]
    fn lag_order_one_reads_previous_month() {
        let spec = VariableSpec::new("value").lag(1);
        let z = transform_value(&spec, &counting_frame(), month("2022-02")).unwrap();
        assert_eq!(z, 1.0);
    }

    #[test]
    // Purpose
    // -------
    // The lag shifts the already-differenced series, not the raw one.
    //
    // Given
    // -----
    // - Quadratic series and spec `value(d1)(-1)` at 2020-04.
    //
    // Expect
    // ------
    // - `x(2020-03) − x(2020-02) = 6 − 3 = 3`.
    fn lag_applies_after_differencing() {
        let spec = VariableSpec::new("value").diff(1).lag(1);
        let z = transform_value(&spec, &quadratic_frame(), month("2020-04")).unwrap();
        assert_eq!(z, 3.0);
    }

    #[test]
    fn lag_before_frame_start_is_insufficient_history() {
        let spec = VariableSpec::new("value").lag(1);
        let err = transform_value(&spec, &counting_frame(), month("2022-01")).unwrap_err();
        assert!(matches!(err, RegressionError::InsufficientHistory { lookback: 1, .. }));
    }

    #[test]
    fn missing_and_non_positive_values_are_reported() {
        let frame =
            TimeFrame::new(month("2022-01"), [("value", vec![1.0, f64::NAN, -2.0, 4.0])]).unwrap();

        let gap = transform_value(&VariableSpec::new("value").diff(1), &frame, month("2022-03"));
        let neg = transform_value(&VariableSpec::new("value").log(), &frame, month("2022-03"));

        assert_eq!(
            gap.unwrap_err(),
            RegressionError::MissingValue { name: "value".to_string(), month: month("2022-02") }
        );
        assert_eq!(
            neg.unwrap_err(),
            RegressionError::NonPositiveLog {
                name: "value".to_string(),
                month: month("2022-03"),
                value: -2.0
            }
        );
    }

    #[test]
    fn oversized_span_is_rejected_before_month_arithmetic() {
        let frame = counting_frame();
        let spec = VariableSpec::new("value").diff(1).span(1usize << 63);

        let forward = transform_value(&spec, &frame, month("2023-01")).unwrap_err();
        let reverse = reverse_transform_value(&spec, &frame, month("2023-01"), 1.0).unwrap_err();

        assert!(matches!(forward, RegressionError::LookbackTooLong { .. }));
        assert!(matches!(reverse, RegressionError::LookbackTooLong { .. }));
    }

    #[test]
    fn month_after_frame_end_is_missing() {
        let spec = VariableSpec::new("value");
        let err = transform_value(&spec, &counting_frame(), month("2024-01")).unwrap_err();
        assert_eq!(err, RegressionError::MissingValue { name: "value".to_string(), month: month("2024-01") });
    }

    #[test]
    // Purpose
    // -------
    // Whole-column transform marks rows without history as NaN and matches
    // the single-value transform elsewhere.
    //
    // Given
    // -----
    // - Counting frame and spec `value(d1)(-1)` (lookback 2).
    //
    // Expect
    // ------
    // - First two rows are NaN, every later row equals 1.
    fn transform_column_pads_with_nan() {
        let spec = VariableSpec::new("value").diff(1).lag(1);
        let column = transform_column(&spec, &counting_frame()).unwrap();

        assert_eq!(column.len(), 24);
        assert!(column[0].is_nan() && column[1].is_nan());
        assert!(column.iter().skip(2).all(|&v| (v - 1.0).abs() < TOL));
    }

    #[test]
    fn transform_column_propagates_log_errors() {
        let frame = TimeFrame::new(month("2022-01"), [("value", vec![1.0, 0.0])]).unwrap();
        let err = transform_column(&VariableSpec::new("value").log(), &frame).unwrap_err();
        assert!(matches!(err, RegressionError::NonPositiveLog { .. }));
    }

    #[test]
    fn reverse_lag_returns_previous_month() {
        let frame = quadratic_frame();
        let spec = VariableSpec::new("value").lag(1);
        let last = frame.end();

        let z = transform_value(&spec, &frame, last).unwrap();
        let raw = reverse_transform_value(&spec, &frame, last, z).unwrap();

        assert_eq!(raw, frame.value("value", last.offset(-1).unwrap()).unwrap());
    }

    #[test]
    // Purpose
    // -------
    // Inverse after forward recovers the source value at `t − L` for every
    // combination of difference order, log and lag.
    //
    // Given
    // -----
    // - Quadratic series; specs over diff ∈ {0, 1, 2}, log ∈ {no, yes},
    //   lag ∈ {0, 1}, plus a year-over-year span.
    // - Every month with enough history.
    //
    // Expect
    // ------
    // - `reverse(transform(t)) ≈ x(t − L)` within 1e-9 relative error.
    fn reverse_inverts_transform() {
        let frame = quadratic_frame();
        let mut specs = Vec::new();
        for diff in 0..=2 {
            for log in [false, true] {
                for lag in 0..=1 {
                    specs.push(VariableSpec::with_orders("value", diff, log, lag));
                }
            }
        }
        specs.push(VariableSpec::new("value").log().diff(1).span(12).lag(1));

        for spec in &specs {
            for month in frame.months().into_iter().skip(spec.lookback()) {
                let z = transform_value(spec, &frame, month).unwrap();
                let raw = reverse_transform_value(spec, &frame, month, z).unwrap();
                let expected =
                    frame.value("value", month.offset(-(spec.lag_order as i64)).unwrap()).unwrap();
                assert!(
                    ((raw - expected) / expected).abs() < 1e-9,
                    "{} at {month}: expected {expected}, got {raw}",
                    spec.transformed_name()
                );
            }
        }
    }

    #[test]
    fn reverse_ignores_the_value_being_reconstructed() {
        let mut frame = quadratic_frame();
        let spec = VariableSpec::new("value").log().diff(1);
        let target = month("2020-06");
        let z = transform_value(&spec, &frame, target).unwrap();

        frame.set_value("value", target, f64::NAN).unwrap();
        let raw = reverse_transform_value(&spec, &frame, target, z).unwrap();

        assert!((raw - 21.0).abs() < 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // The inverse rejects bad inputs before touching any history.
    //
    // Given
    // -----
    // - A `NaN` transformed value for `log(value)(d1)`.
    // - An arbitrary value for a spec on a column that does not exist.
    //
    // Expect
    // ------
    // - `NonFiniteTransformed` and `UnknownColumn` respectively.
    fn reverse_rejects_nan_and_unknown_column() {
        let frame = quadratic_frame();
        let last = frame.end();

        let err = reverse_transform_value(&VariableSpec::new("value").log().diff(1), &frame, last, f64::NAN)
            .unwrap_err();
        assert!(matches!(err, RegressionError::NonFiniteTransformed { .. }));
        assert!(err.to_string().contains("NaN"));

        let err = reverse_transform_value(&VariableSpec::new("missing"), &frame, last, 420.0).unwrap_err();
        assert_eq!(err, RegressionError::UnknownColumn { name: "missing".to_string() });
    }
}
