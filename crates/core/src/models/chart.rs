use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

pub const BTC_SERIES_NAME: &str = "BTC/USD";
pub const BTC_AXIS_ID: &str = "yBtc";
pub const SOL_SERIES_NAME: &str = "SOL/USD";
pub const SOL_AXIS_ID: &str = "ySol";

// Seed dataset shown before any mint happens. Kept in the same neighbourhood
// as the service's mock prices so the first mint lands on-scale.
const FIXTURE_LABELS: [&str; 7] = ["09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00"];
const FIXTURE_BTC: [f64; 7] = [34850.0, 35010.0, 34920.0, 35180.0, 35090.0, 35320.0, 35240.0];
const FIXTURE_SOL: [f64; 7] = [118.2, 119.6, 117.9, 120.4, 121.1, 119.8, 120.7];

/// A single value on the shared label axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Time marker on the x axis (e.g. "10:00", "14:32:05")
    pub label: String,
    pub value: f64,
}

/// One instrument's price line, bound to a y axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Legend name (e.g., "BTC/USD")
    pub name: String,

    /// Id of the y axis the series is drawn against (e.g., "yBtc")
    pub axis_id: String,

    pub points: Vec<PricePoint>,
}

impl Series {
    pub fn new(name: impl Into<String>, axis_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            axis_id: axis_id.into(),
            points: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the raw values in axis order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Largest value in the series, folded from a seed of `0.0`.
    ///
    /// An empty series (or one holding only negatives) yields `0.0`.
    pub fn max_value(&self) -> f64 {
        self.values().fold(0.0, f64::max)
    }

    pub fn last_value(&self) -> Option<f64> {
        self.points.last().map(|p| p.value)
    }
}

/// Two price series sharing one label axis.
///
/// Series A is BTC/USD on the left axis, series B is SOL/USD on the right.
/// `labels`, `series_a.points` and `series_b.points` always have the same
/// length and the same labels at every index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceChart {
    labels: Vec<String>,
    series_a: Series,
    series_b: Series,
}

impl PriceChart {
    /// The chart as it looks when the dashboard first opens.
    pub fn initial() -> Self {
        let mut series_a = Series::new(BTC_SERIES_NAME, BTC_AXIS_ID);
        let mut series_b = Series::new(SOL_SERIES_NAME, SOL_AXIS_ID);
        for (i, label) in FIXTURE_LABELS.iter().enumerate() {
            series_a.points.push(PricePoint {
                label: (*label).to_string(),
                value: FIXTURE_BTC[i],
            });
            series_b.points.push(PricePoint {
                label: (*label).to_string(),
                value: FIXTURE_SOL[i],
            });
        }
        Self {
            labels: FIXTURE_LABELS.iter().map(|l| (*l).to_string()).collect(),
            series_a,
            series_b,
        }
    }

    /// Build a chart from explicit parallel columns, using the standard
    /// BTC/SOL names and axes.
    pub fn from_columns(
        labels: Vec<String>,
        values_a: Vec<f64>,
        values_b: Vec<f64>,
    ) -> Result<Self, CoreError> {
        if labels.len() != values_a.len() || labels.len() != values_b.len() {
            return Err(CoreError::InvalidAppend(format!(
                "column lengths differ: {} labels, {} / {} values",
                labels.len(),
                values_a.len(),
                values_b.len()
            )));
        }

        let mut chart = Self {
            labels: Vec::with_capacity(labels.len()),
            series_a: Series::new(BTC_SERIES_NAME, BTC_AXIS_ID),
            series_b: Series::new(SOL_SERIES_NAME, SOL_AXIS_ID),
        };
        for ((label, a), b) in labels.into_iter().zip(values_a).zip(values_b) {
            chart.push(label, a, b)?;
        }
        Ok(chart)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn series_a(&self) -> &Series {
        &self.series_a
    }

    pub fn series_b(&self) -> &Series {
        &self.series_b
    }

    /// Number of positions on the shared axis.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Return a new chart with one more position on the axis.
    ///
    /// Both values must be finite; otherwise `self` is left as it was and
    /// `InvalidAppend` is returned.
    pub fn append(
        &self,
        label: impl Into<String>,
        value_a: f64,
        value_b: f64,
    ) -> Result<PriceChart, CoreError> {
        let mut next = self.clone();
        next.push(label.into(), value_a, value_b)?;
        Ok(next)
    }

    fn push(&mut self, label: String, value_a: f64, value_b: f64) -> Result<(), CoreError> {
        if !value_a.is_finite() || !value_b.is_finite() {
            return Err(CoreError::InvalidAppend(format!(
                "values for '{label}' must be finite (got {value_a}, {value_b})"
            )));
        }
        self.series_a.points.push(PricePoint {
            label: label.clone(),
            value: value_a,
        });
        self.series_b.points.push(PricePoint {
            label: label.clone(),
            value: value_b,
        });
        self.labels.push(label);
        Ok(())
    }
}

impl Default for PriceChart {
    fn default() -> Self {
        Self::initial()
    }
}
