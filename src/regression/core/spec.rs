//! Variable specifications — how a regressor or target is derived from a raw
//! column.
//!
//! Purpose
//! -------
//! Describe, declaratively, the chain applied to one named series before it
//! enters a regression: optional natural log, `diff_order` differences with a
//! step of `diff_span` months, then a backward shift of `lag_order` months.
//!
//! Key behaviors
//! -------------
//! - Builder-style construction (`VariableSpec::new("x").log().diff(1).lag(2)`).
//! - [`VariableSpec::transformed_name`] renders the derived column label, e.g.
//!   `log(x)(d1)(-2)`.
//! - [`VariableSpec::lookback`] reports how many months of history a single
//!   transformed value needs.
//!
//! Conventions
//! -----------
//! - The transform itself lives in
//!   [`transform`](crate::regression::core::transform); this type only
//!   carries the recipe.
//! - Serializable with serde so specifications can live in configuration.
use serde::{Deserialize, Serialize};

fn default_span() -> usize {
    1
}

/// VariableSpec — transformation recipe for one named series.
///
/// Fields
/// ------
/// - `name`: source column in the frame.
/// - `diff_order`: number of times the difference operator is applied.
/// - `diff_span`: months between the two terms of each difference (`≥ 1`).
///   `1` is the ordinary first difference; `12` is a year-over-year change.
/// - `log_transform`: take the natural log before differencing.
/// - `lag_order`: months to shift the transformed series backward.
///
/// Invariants
/// ----------
/// - Orders are non-negative by type; `diff_span ≥ 1` and a lookback within
///   the calendar range are checked by
///   [`validate_spec`](crate::regression::core::validation::validate_spec).
/// - When `log_transform` is set, every source value the transform touches
///   must be strictly positive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariableSpec {
    pub name: String,
    #[serde(default)]
    pub diff_order: usize,
    #[serde(default = "default_span")]
    pub diff_span: usize,
    #[serde(default)]
    pub log_transform: bool,
    #[serde(default)]
    pub lag_order: usize,
}

impl VariableSpec {
    /// An untransformed reference to column `name`.
    pub fn new(name: impl Into<String>) -> VariableSpec {
        VariableSpec {
            name: name.into(),
            diff_order: 0,
            diff_span: default_span(),
            log_transform: false,
            lag_order: 0,
        }
    }

    /// Full constructor with a unit difference span.
    pub fn with_orders(
        name: impl Into<String>, diff_order: usize, log_transform: bool, lag_order: usize,
    ) -> VariableSpec {
        VariableSpec { name: name.into(), diff_order, diff_span: 1, log_transform, lag_order }
    }

    pub fn diff(mut self, order: usize) -> VariableSpec {
        self.diff_order = order;
        self
    }

    pub fn span(mut self, months: usize) -> VariableSpec {
        self.diff_span = months;
        self
    }

    pub fn log(mut self) -> VariableSpec {
        self.log_transform = true;
        self
    }

    pub fn lag(mut self, order: usize) -> VariableSpec {
        self.lag_order = order;
        self
    }

    /// Months of history needed before the target month:
    /// `diff_order · diff_span + lag_order`, saturating at `usize::MAX`.
    pub fn lookback(&self) -> usize {
        self.diff_order.saturating_mul(self.diff_span).saturating_add(self.lag_order)
    }

    /// Label of the derived column: `[log(]name[)][(dN)][(-L)]`, with the span
    /// written as `(dNxS)` when it is not 1.
    pub fn transformed_name(&self) -> String {
        let mut label =
            if self.log_transform { format!("log({})", self.name) } else { self.name.clone() };
        if self.diff_order > 0 {
            if self.diff_span == 1 {
                label.push_str(&format!("(d{})", self.diff_order));
            } else {
                label.push_str(&format!("(d{}x{})", self.diff_order, self.diff_span));
            }
        }
        if self.lag_order > 0 {
            label.push_str(&format!("(-{})", self.lag_order));
        }
        label
    }
}
