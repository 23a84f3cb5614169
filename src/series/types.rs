//! Time-series sample types
//!
//! Points and candles serialize with a `time` key so they can be handed to a
//! charting front end unchanged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single time-series sample
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point {
    #[serde(rename = "time")]
    pub date: NaiveDate,
    pub value: f64,
}

impl Point {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Ordered sequence of points, same order as the dataset it came from
pub type Series = Vec<Point>;

/// Open-high-low-close aggregate over consecutive points
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Candle {
    /// Date of the first point in the interval
    #[serde(rename = "time")]
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    /// Aggregate a non-empty chunk of points
    pub(crate) fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let last = points.last()?;

        let (high, low) = points.iter().fold(
            (f64::NEG_INFINITY, f64::INFINITY),
            |(hi, lo), p| (hi.max(p.value), lo.min(p.value)),
        );

        Some(Self {
            date: first.date,
            open: first.value,
            high,
            low,
            close: last.value,
        })
    }
}

/// Value of the last point, if any
pub fn last_value(series: &[Point]) -> Option<f64> {
    series.last().map(|p| p.value)
}
