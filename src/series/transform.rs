//! Series transformations
//!
//! Stateless functions turning a [`Dataset`] into derived series:
//!
//! ```text
//! Dataset ─ select_field ─► daily ─ cumulative_sum ─► running total
//!                             └─ filter_zero ─┬─ resample_to_ohlc ─► candles
//!                                             └─ exponential_moving_average
//! ```
//!
//! None of these functions mutate their input.

use crate::dataset::{Dataset, Field};

use super::ema::ema;
use super::error::{TransformError, TransformResult};
use super::types::{Candle, Point, Series};

/// Extract one numeric field per record, preserving order
pub fn select_field(dataset: &Dataset, field: Field) -> Series {
    dataset
        .iter()
        .map(|r| Point::new(r.date, r.get(field) as f64))
        .collect()
}

/// Running total of a series
pub fn cumulative_sum(series: &[Point]) -> Series {
    series
        .iter()
        .scan(0.0, |sum, p| {
            *sum += p.value;
            Some(Point::new(p.date, *sum))
        })
        .collect()
}

/// Drop points whose value is exactly zero
pub fn filter_zero(series: &[Point]) -> Series {
    series.iter().filter(|p| p.value != 0.0).copied().collect()
}

/// Aggregate consecutive chunks of `interval_days` points into candles
///
/// The last chunk may be shorter than the interval.
pub fn resample_to_ohlc(series: &[Point], interval_days: usize) -> TransformResult<Vec<Candle>> {
    if interval_days == 0 {
        return Err(TransformError::InvalidArgument(
            "interval_days must be >= 1".to_string(),
        ));
    }

    Ok(series
        .chunks(interval_days)
        .filter_map(Candle::from_points)
        .collect())
}

/// Exponential moving average aligned to the input dates
///
/// The first `window - 1` warm-up points are dropped, so
/// `output[i].date == series[window - 1 + i].date`.
pub fn exponential_moving_average(series: &[Point], window: usize) -> TransformResult<Series> {
    exponential_moving_average_with(series, window, ema)
}

/// Same as [`exponential_moving_average`] with a caller-supplied routine
///
/// The routine must return exactly one value per input value.
pub fn exponential_moving_average_with<F>(
    series: &[Point],
    window: usize,
    routine: F,
) -> TransformResult<Series>
where
    F: Fn(usize, &[f64]) -> Vec<f64>,
{
    if window == 0 {
        return Err(TransformError::InvalidArgument(
            "window must be >= 1".to_string(),
        ));
    }

    let values: Vec<f64> = series.iter().map(|p| p.value).collect();
    let averaged = routine(window, &values);

    if averaged.len() != series.len() {
        return Err(TransformError::ComputationError(format!(
            "EMA{} returned {} values for {} points",
            window,
            averaged.len(),
            series.len()
        )));
    }

    Ok(series
        .iter()
        .zip(averaged)
        .skip(window - 1)
        .map(|(p, v)| Point::new(p.date, v))
        .collect())
}

// Named series used by the dashboard

pub fn daily_applications(dataset: &Dataset) -> Series {
    select_field(dataset, Field::Applications)
}

pub fn cumulative_applications(dataset: &Dataset) -> Series {
    cumulative_sum(&daily_applications(dataset))
}

pub fn daily_applicants(dataset: &Dataset) -> Series {
    select_field(dataset, Field::Applicants)
}

pub fn cumulative_applicants(dataset: &Dataset) -> Series {
    cumulative_sum(&daily_applicants(dataset))
}

pub fn daily_approvals(dataset: &Dataset) -> Series {
    select_field(dataset, Field::Approvals)
}

pub fn cumulative_approvals(dataset: &Dataset) -> Series {
    cumulative_sum(&daily_approvals(dataset))
}

pub fn cumulative_approved_people(dataset: &Dataset) -> Series {
    cumulative_sum(&select_field(dataset, Field::ApprovedPeople))
}

/// Candles over the days on which at least one approval happened
pub fn approval_candles(dataset: &Dataset, interval_days: usize) -> TransformResult<Vec<Candle>> {
    resample_to_ohlc(&filter_zero(&daily_approvals(dataset)), interval_days)
}
