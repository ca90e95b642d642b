//! utils — conversion helpers for the Python bindings.
//!
//! Everything here is compiled only with the `python-bindings` feature and
//! turns loosely typed Python inputs (arrays, pandas objects, dicts, month
//! strings) into the validated Rust types of [`crate::regression`].

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::{PyAny, PyDict},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
use crate::regression::core::{frame::TimeFrame, options::FitOptions, period::Month};

/// Borrow or copy a Python 1-D float sequence as a contiguous `f64` array.
///
/// Accepts, in order of preference: a contiguous `numpy.ndarray[float64]`,
/// anything with a `to_numpy()` method (pandas `Series`), or a plain sequence
/// of floats. `NaN` entries pass through unchanged.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Parse a `"YYYY-MM"` / `"YYYY-MM-DD"` string into a [`Month`].
#[cfg(feature = "python-bindings")]
pub fn extract_month(raw: &str) -> PyResult<Month> {
    Ok(Month::parse(raw)?)
}

/// Build a [`TimeFrame`] from a `{name: array-like}` dict starting at `start`.
#[cfg(feature = "python-bindings")]
pub fn extract_frame<'py>(
    py: Python<'py>, columns: &Bound<'py, PyDict>, start: &str,
) -> PyResult<TimeFrame> {
    let start = extract_month(start)?;
    let mut named = Vec::with_capacity(columns.len());
    for (key, value) in columns.iter() {
        let name: String = key
            .extract()
            .map_err(|_| PyTypeError::new_err("column names must be strings"))?;
        let arr = extract_f64_array(py, &value)?;
        let slice = arr.as_slice().map_err(|_| {
            PyValueError::new_err(format!(
                "column {name:?} must be a 1-D contiguous float64 array or sequence"
            ))
        })?;
        named.push((name, slice.to_vec()));
    }
    Ok(TimeFrame::new(start, named)?)
}

/// Assemble [`FitOptions`] from keyword arguments.
#[cfg(feature = "python-bindings")]
pub fn extract_fit_options(
    last_month: &str, first_month: Option<&str>, include_constant: Option<bool>,
    rcond: Option<f64>,
) -> PyResult<FitOptions> {
    let mut opts = FitOptions::new(extract_month(last_month)?)
        .with_constant(include_constant.unwrap_or(false));
    if let Some(first) = first_month {
        opts = opts.with_first(extract_month(first)?);
    }
    if let Some(value) = rcond {
        opts = opts.with_rcond(value)?;
    }
    Ok(opts)
}
