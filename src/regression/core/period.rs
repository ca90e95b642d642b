//! Calendar-month periods for monthly time series.
//!
//! Purpose
//! -------
//! Represent the index unit of a [`TimeFrame`](crate::regression::core::frame::TimeFrame):
//! one calendar month, identified by its first day. All lag, difference and
//! forecast arithmetic in this crate is expressed as signed month offsets on
//! [`Month`].
//!
//! Key behaviors
//! -------------
//! - Parse `"YYYY-MM"` and `"YYYY-MM-DD"` strings; the day is truncated so
//!   `"2022-02-15"` and `"2022-02"` denote the same month.
//! - Offset by a signed number of months with overflow reported as
//!   [`RegressionError::MonthOverflow`].
//! - Measure signed distances between months.
//!
//! Conventions
//! -----------
//! - Displayed and serialized as `"YYYY-MM"`.
//! - Ordering is chronological.
use std::{fmt, str::FromStr};

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::regression::errors::{RegressionError, RegressionResult};

/// A calendar month, stored as the first day of that month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    first_day: NaiveDate,
}

impl Month {
    /// Construct a month from a year and a 1-based month number.
    ///
    /// Errors
    /// ------
    /// - `RegressionError::InvalidMonth` if `month` is not in `1..=12` or the
    ///   year is outside chrono's supported range.
    pub fn new(year: i32, month: u32) -> RegressionResult<Month> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Month { first_day })
            .ok_or_else(|| RegressionError::InvalidMonth { input: format!("{year}-{month}") })
    }

    /// The month containing `date`.
    pub fn from_date(date: NaiveDate) -> Month {
        // Day 1 always exists for a valid date's year and month.
        let first_day = date.with_day(1).unwrap_or(date);
        Month { first_day }
    }

    /// Parse `"YYYY-MM"` or `"YYYY-MM-DD"`.
    pub fn parse(input: &str) -> RegressionResult<Month> {
        let trimmed = input.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(Month::from_date(date));
        }
        NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
            .map(|first_day| Month { first_day })
            .map_err(|_| RegressionError::InvalidMonth { input: input.to_string() })
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// 1-based month number.
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Shift by `months` (negative shifts go back in time).
    pub fn offset(&self, months: i64) -> RegressionResult<Month> {
        let overflow = || RegressionError::MonthOverflow { month: *self, offset: months };
        let step = u32::try_from(months.unsigned_abs()).map_err(|_| overflow())?;
        let shifted = if months >= 0 {
            self.first_day.checked_add_months(Months::new(step))
        } else {
            self.first_day.checked_sub_months(Months::new(step))
        };
        shifted.map(|first_day| Month { first_day }).ok_or_else(overflow)
    }

    /// The following month.
    pub fn succ(&self) -> RegressionResult<Month> {
        self.offset(1)
    }

    /// Signed number of months from `self` to `other` (`other − self`).
    pub fn months_until(&self, other: Month) -> i64 {
        let years = i64::from(other.year()) - i64::from(self.year());
        let months = i64::from(other.month()) - i64::from(self.month());
        years * 12 + months
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for Month {
    type Err = RegressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Month::parse(s)
    }
}

impl TryFrom<String> for Month {
    type Error = RegressionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Month::parse(&value)
    }
}

impl From<Month> for String {
    fn from(value: Month) -> String {
        value.to_string()
    }
}
