//! Series derivation
//!
//! This module turns the daily records into chartable series:
//!
//! - **types**: `Point`, `Series` and `Candle`
//! - **transform**: field selection, running totals, zero filtering,
//!   OHLC resampling and moving averages
//! - **ema**: the exponential moving average routine
//! - **calendar**: holiday/weekend filtering
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust
//! use rv_tracker::dataset::Dataset;
//! use rv_tracker::series::{approval_candles, cumulative_applications};
//!
//! let json = br#"[
//!     {"time":"2021-12-01","aply":10,"aply_people":20,"appr":2,"appr_people":4,"decl":0},
//!     {"time":"2021-12-02","aply":5,"aply_people":9,"appr":3,"appr_people":6,"decl":0}
//! ]"#;
//! let dataset = Dataset::from_json(json).unwrap();
//!
//! let totals = cumulative_applications(&dataset);
//! assert_eq!(totals[1].value, 15.0);
//!
//! let candles = approval_candles(&dataset, 5).unwrap();
//! assert_eq!(candles.len(), 1);
//! ```

pub mod calendar;
pub mod ema;
pub mod error;
pub mod transform;
pub mod types;

pub use calendar::{filter_holidays, filter_weekends, filter_working_days, WorkingCalendar};
pub use error::{TransformError, TransformResult};
pub use transform::{
    approval_candles, cumulative_applicants, cumulative_applications, cumulative_approvals,
    cumulative_approved_people, cumulative_sum, daily_applicants, daily_applications,
    daily_approvals, exponential_moving_average, exponential_moving_average_with, filter_zero,
    resample_to_ohlc, select_field,
};
pub use types::{last_value, Candle, Point, Series};
