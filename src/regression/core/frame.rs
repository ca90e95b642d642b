//! Monthly data frame for transformed-variable regression.
//!
//! Purpose
//! -------
//! Provide a small, validated container for the raw series a
//! [`LinearPredictor`](crate::regression::models::linear_predictor::LinearPredictor)
//! works on: a contiguous monthly index and one named `f64` column per series.
//!
//! Key behaviors
//! -------------
//! - [`TimeFrame::new`] enforces a non-empty index, equal column lengths,
//!   unique names, and the absence of ±inf.
//! - Lookups by `(column, month)` report unknown columns and months outside
//!   the index as typed errors.
//! - [`TimeFrame::set_value`] past the last month extends the index, padding
//!   every column with `NaN`; this is how recursive forecasts are appended.
//!
//! Invariants & assumptions
//! ------------------------
//! - The index has no gaps: row `i` is month `start + i`.
//! - `NaN` means "not observed". It is stored as-is and only becomes an error
//!   when a transform needs that value.
//! - All columns always share the index length.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; `end() == start().offset(len() - 1)`.
//! - Column order is not significant; names are kept sorted.
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction failures, lookups at and beyond the index
//!   bounds, and index extension through `set_value`.
use std::collections::BTreeMap;

use ndarray::{Array1, ArrayView1, s};

use crate::regression::{
    core::{period::Month, validation::validate_column},
    errors::{RegressionError, RegressionResult},
};

/// `TimeFrame` — named monthly series on a shared, gap-free index.
///
/// Fields
/// ------
/// - `start`: first month of the index.
/// - `end`: last month of the index.
/// - `len`: number of rows; always `> 0`.
/// - `columns`: series keyed by name, each of length `len`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeFrame {
    start: Month,
    end: Month,
    len: usize,
    columns: BTreeMap<String, Array1<f64>>,
}

impl TimeFrame {
    /// Construct a validated frame from named columns starting at `start`.
    ///
    /// Parameters
    /// ----------
    /// - `start`: [`Month`]
    ///   Month of the first row.
    /// - `columns`: iterator of `(name, values)`
    ///   Raw series. `NaN` marks missing observations.
    ///
    /// Errors
    /// ------
    /// - `RegressionError::EmptyFrame` if there are no columns or the columns
    ///   are empty.
    /// - `RegressionError::ColumnLengthMismatch` if lengths differ from the
    ///   first column.
    /// - `RegressionError::DuplicateColumn` if a name repeats.
    /// - `RegressionError::NonFiniteData` on ±inf.
    /// - `RegressionError::MonthOverflow` if the index would leave the calendar.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_linear_forecast::regression::core::{frame::TimeFrame, period::Month};
    /// let start = Month::new(2022, 1).unwrap();
    /// let frame = TimeFrame::new(start, [("value", vec![1.0, 2.0, 3.0])]).unwrap();
    /// assert_eq!(frame.end(), Month::new(2022, 3).unwrap());
    /// ```
    pub fn new<I, S>(start: Month, columns: I) -> RegressionResult<TimeFrame>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut iter = columns.into_iter().map(|(name, values)| (name.into(), values));
        let (first_name, first_values) = iter.next().ok_or(RegressionError::EmptyFrame)?;
        let len = first_values.len();
        if len == 0 {
            return Err(RegressionError::EmptyFrame);
        }
        let end = start.offset(len as i64 - 1)?;
        let mut frame = TimeFrame { start, end, len, columns: BTreeMap::new() };
        frame.insert_column(first_name, first_values)?;
        for (name, values) in iter {
            frame.insert_column(name, values)?;
        }
        Ok(frame)
    }

    /// Add a new column; it must match the current index length.
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> RegressionResult<()> {
        let name = name.into();
        if self.columns.contains_key(&name) {
            return Err(RegressionError::DuplicateColumn { name });
        }
        let values = Array1::from(values);
        validate_column(&name, values.view(), self.len)?;
        self.columns.insert(name, values);
        Ok(())
    }

    pub fn start(&self) -> Month {
        self.start
    }

    pub fn end(&self) -> Month {
        self.end
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Months of the index in order.
    pub fn months(&self) -> Vec<Month> {
        (0..self.len).filter_map(|i| self.start.offset(i as i64).ok()).collect()
    }

    /// Row position of `month`, if it lies inside the index.
    pub fn position(&self, month: Month) -> Option<usize> {
        let offset = self.start.months_until(month);
        if offset >= 0 && (offset as usize) < self.len { Some(offset as usize) } else { None }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// View of a whole column.
    pub fn column(&self, name: &str) -> RegressionResult<ArrayView1<'_, f64>> {
        self.columns
            .get(name)
            .map(|c| c.view())
            .ok_or_else(|| RegressionError::UnknownColumn { name: name.to_string() })
    }

    /// Value of `name` at `month`; may be `NaN`.
    pub fn value(&self, name: &str, month: Month) -> RegressionResult<f64> {
        let column = self.column(name)?;
        let row = self.position(month).ok_or(RegressionError::MonthOutOfRange {
            month,
            start: self.start,
            end: self.end,
        })?;
        Ok(column[row])
    }

    /// Write `value` into `name` at `month`, extending the index when `month`
    /// lies after the current end.
    ///
    /// Errors
    /// ------
    /// - `RegressionError::UnknownColumn` if `name` is absent.
    /// - `RegressionError::MonthOutOfRange` if `month` precedes the start.
    /// - `RegressionError::NonFiniteData` if `value` is ±inf.
    pub fn set_value(&mut self, name: &str, month: Month, value: f64) -> RegressionResult<()> {
        if !self.columns.contains_key(name) {
            return Err(RegressionError::UnknownColumn { name: name.to_string() });
        }
        if month < self.start {
            return Err(RegressionError::MonthOutOfRange { month, start: self.start, end: self.end });
        }
        let offset = self.start.months_until(month) as usize;
        if value.is_infinite() {
            return Err(RegressionError::NonFiniteData { name: name.to_string(), index: offset, value });
        }
        if month > self.end {
            self.extend_to(month, offset + 1);
        }
        if let Some(column) = self.columns.get_mut(name) {
            column[offset] = value;
        }
        Ok(())
    }

    fn extend_to(&mut self, end: Month, new_len: usize) {
        for column in self.columns.values_mut() {
            let mut grown = Array1::from_elem(new_len, f64::NAN);
            grown.slice_mut(s![..self.len]).assign(&*column);
            *column = grown;
        }
        self.len = new_len;
        self.end = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction failures (empty, mismatched, duplicate, infinite).
    // - Month-based lookups inside and outside the index.
    // - Index extension through `set_value`.
    // -------------------------------------------------------------------------

    fn jan_2022() -> Month {
        Month::new(2022, 1).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // A well-formed frame exposes its index bounds and values by month.
    //
    // Given
    // -----
    // - Columns `a = [1, 2, 3]` and `b = [NaN, 5, 6]` starting 2022-01.
    //
    // Expect
    // ------
    // - `end() == 2022-03`, `len() == 3`.
    // - `value("b", 2022-02) == 5` and `value("b", 2022-01)` is `NaN`.
    fn new_and_lookup_by_month() {
        let frame = TimeFrame::new(
            jan_2022(),
            [("a", vec![1.0, 2.0, 3.0]), ("b", vec![f64::NAN, 5.0, 6.0])],
        )
        .unwrap();

        assert_eq!(frame.end(), Month::new(2022, 3).unwrap());
        assert_eq!(frame.len(), 3);
        assert_eq!(frame.value("b", Month::new(2022, 2).unwrap()).unwrap(), 5.0);
        assert!(frame.value("b", jan_2022()).unwrap().is_nan());
        assert_eq!(frame.column_names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn new_rejects_empty_and_mismatched_columns() {
        let no_columns: Vec<(String, Vec<f64>)> = Vec::new();
        assert_eq!(TimeFrame::new(jan_2022(), no_columns).unwrap_err(), RegressionError::EmptyFrame);
        assert_eq!(
            TimeFrame::new(jan_2022(), [("a", Vec::new())]).unwrap_err(),
            RegressionError::EmptyFrame
        );
        assert_eq!(
            TimeFrame::new(jan_2022(), [("a", vec![1.0, 2.0]), ("b", vec![1.0])]).unwrap_err(),
            RegressionError::ColumnLengthMismatch { name: "b".to_string(), expected: 2, actual: 1 }
        );
        assert_eq!(
            TimeFrame::new(jan_2022(), [("a", vec![1.0]), ("a", vec![2.0])]).unwrap_err(),
            RegressionError::DuplicateColumn { name: "a".to_string() }
        );
    }

    #[test]
    fn value_outside_index_is_an_error() {
        let frame = TimeFrame::new(jan_2022(), [("a", vec![1.0, 2.0])]).unwrap();
        let before = Month::new(2021, 12).unwrap();

        assert_eq!(
            frame.value("a", before).unwrap_err(),
            RegressionError::MonthOutOfRange {
                month: before,
                start: jan_2022(),
                end: Month::new(2022, 2).unwrap()
            }
        );
        assert_eq!(
            frame.value("zzz", jan_2022()).unwrap_err(),
            RegressionError::UnknownColumn { name: "zzz".to_string() }
        );
    }

    #[test]
    // Purpose
    // -------
    // Writing beyond the end grows the index and pads every column with NaN.
    //
    // Given
    // -----
    // - Columns `a = [1, 2]`, `b = [3, 4]` starting 2022-01.
    // - `set_value("a", 2022-04, 9.0)`.
    //
    // Expect
    // ------
    // - `len() == 4`, `end() == 2022-04`.
    // - `a = [1, 2, NaN, 9]`, `b = [3, 4, NaN, NaN]`.
    fn set_value_extends_index() {
        let mut frame = TimeFrame::new(jan_2022(), [("a", vec![1.0, 2.0]), ("b", vec![3.0, 4.0])]).unwrap();
        let april = Month::new(2022, 4).unwrap();

        frame.set_value("a", april, 9.0).unwrap();

        assert_eq!(frame.len(), 4);
        assert_eq!(frame.end(), april);
        let a = frame.column("a").unwrap();
        let b = frame.column("b").unwrap();
        assert_eq!(a[3], 9.0);
        assert!(a[2].is_nan());
        assert!(b[2].is_nan() && b[3].is_nan());
        assert_eq!(b[1], 4.0);
    }

    #[test]
    fn set_value_overwrites_inside_index() {
        let mut frame = TimeFrame::new(jan_2022(), [("a", vec![1.0, 2.0])]).unwrap();
        frame.set_value("a", jan_2022(), 7.5).unwrap();
        assert_eq!(frame.value("a", jan_2022()).unwrap(), 7.5);
        assert_eq!(frame.len(), 2);
    }
}
