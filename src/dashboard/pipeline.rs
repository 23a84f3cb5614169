//! Dashboard pipeline
//!
//! Runs the fixed set of derivations over a loaded dataset and collects the
//! output handed to the presentation layer.
//!
//! # Pipeline
//!
//! ```text
//! Dataset ─► named series (7) ─► Summary
//!        │                   └─► Progress (pending vs approved)
//!        └─► daily approvals ─► filter_zero ─► [working days] ─┬─► candles
//!                                                             └─► EMA overlays
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::config::ConfigError;
use crate::dataset::Dataset;
use crate::series::{
    self, exponential_moving_average, filter_working_days, filter_zero, resample_to_ohlc, Candle,
    Series, TransformError, TransformResult, WorkingCalendar,
};

use super::milestones::{default_milestones, visible_milestones, Milestone};
use super::summary::{pending_vs_approved, Progress, Summary};

/// Identifier of a named series in the dashboard output
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeriesName {
    DailyApp,
    CumulativeApp,
    DailyPpl,
    CumulativePpl,
    DailyAppr,
    CumulativeAppr,
    CumulativeApprPpl,
}

impl SeriesName {
    /// Get all series names for iteration
    pub fn all() -> &'static [SeriesName] {
        &[
            SeriesName::DailyApp,
            SeriesName::CumulativeApp,
            SeriesName::DailyPpl,
            SeriesName::CumulativePpl,
            SeriesName::DailyAppr,
            SeriesName::CumulativeAppr,
            SeriesName::CumulativeApprPpl,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesName::DailyApp => "DailyApp",
            SeriesName::CumulativeApp => "CumulativeApp",
            SeriesName::DailyPpl => "DailyPpl",
            SeriesName::CumulativePpl => "CumulativePpl",
            SeriesName::DailyAppr => "DailyAppr",
            SeriesName::CumulativeAppr => "CumulativeAppr",
            SeriesName::CumulativeApprPpl => "CumulativeApprPpl",
        }
    }

    /// Derive this series from a dataset
    pub fn derive(&self, dataset: &Dataset) -> Series {
        match self {
            SeriesName::DailyApp => series::daily_applications(dataset),
            SeriesName::CumulativeApp => series::cumulative_applications(dataset),
            SeriesName::DailyPpl => series::daily_applicants(dataset),
            SeriesName::CumulativePpl => series::cumulative_applicants(dataset),
            SeriesName::DailyAppr => series::daily_approvals(dataset),
            SeriesName::CumulativeAppr => series::cumulative_approvals(dataset),
            SeriesName::CumulativeApprPpl => series::cumulative_approved_people(dataset),
        }
    }
}

impl std::fmt::Display for SeriesName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeriesName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SeriesName::all()
            .iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| ConfigError::Invalid(format!("unknown series name: {}", s)))
    }
}

/// One EMA overlay on the candle chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovingAverageSpec {
    pub window: usize,
    pub color: String,
}

impl MovingAverageSpec {
    pub fn new(window: usize, color: impl Into<String>) -> Self {
        Self {
            window,
            color: color.into(),
        }
    }

    /// Parse a comma-separated list such as `"9:blue,12:green,26:orange"`
    pub fn parse_list(s: &str) -> Result<Vec<Self>, ConfigError> {
        s.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(Self::from_str)
            .collect()
    }

    /// Chart title of the overlay
    pub fn title(&self) -> String {
        format!("EMA{}", self.window)
    }
}

impl FromStr for MovingAverageSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (window, color) = s
            .split_once(':')
            .ok_or_else(|| ConfigError::Invalid(format!("expected window:color, got {}", s)))?;

        let window: usize = window
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("invalid EMA window: {}", window)))?;
        if window == 0 {
            return Err(ConfigError::Invalid("EMA window must be >= 1".to_string()));
        }

        let color = color.trim();
        if color.is_empty() {
            return Err(ConfigError::Invalid(format!("missing color in {}", s)));
        }

        Ok(Self::new(window, color))
    }
}

/// The 9/12/26 overlays of the approval momentum chart
pub fn default_moving_averages() -> Vec<MovingAverageSpec> {
    vec![
        MovingAverageSpec::new(9, "blue"),
        MovingAverageSpec::new(12, "green"),
        MovingAverageSpec::new(26, "orange"),
    ]
}

/// Parameters of a dashboard build
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    /// Points per approval candle
    pub candle_interval_days: usize,
    /// EMA overlays computed over the approval series
    pub moving_averages: Vec<MovingAverageSpec>,
    /// Drop holidays and weekends before resampling
    pub working_days_only: bool,
    pub calendar: WorkingCalendar,
    pub milestones: Vec<Milestone>,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            candle_interval_days: 5,
            moving_averages: default_moving_averages(),
            working_days_only: false,
            calendar: WorkingCalendar::new_zealand(),
            milestones: default_milestones(),
        }
    }
}

/// A computed EMA overlay
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MovingAverage {
    pub title: String,
    pub window: usize,
    pub color: String,
    pub series: Series,
}

/// Everything the presentation layer draws
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub series: BTreeMap<SeriesName, Series>,
    pub candle_interval_days: usize,
    pub candles: Vec<Candle>,
    pub moving_averages: Vec<MovingAverage>,
    /// Absent when a card total is zero or the dataset is empty
    pub summary: Option<Summary>,
    /// Starts at the first day with a non-zero application total
    pub progress: Progress,
    pub milestones: Vec<Milestone>,
}

impl Dashboard {
    /// Run the full pipeline over a dataset
    ///
    /// The summary, the progress series and each EMA overlay are computed
    /// independently: a failure in one is logged and leaves the rest intact.
    /// Only an invalid candle interval aborts the build.
    pub fn build(
        dataset: &Dataset,
        options: &DashboardOptions,
        today: NaiveDate,
    ) -> TransformResult<Self> {
        let series: BTreeMap<SeriesName, Series> = SeriesName::all()
            .iter()
            .map(|name| (*name, name.derive(dataset)))
            .collect();

        let summary = match Summary::from_cumulative(
            named(&series, SeriesName::CumulativeApp)?,
            named(&series, SeriesName::CumulativeAppr)?,
            named(&series, SeriesName::CumulativePpl)?,
            named(&series, SeriesName::CumulativeApprPpl)?,
        ) {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::warn!(error = %e, "Summary unavailable");
                None
            }
        };

        let progress = match progress_since_first_application(
            named(&series, SeriesName::CumulativeApp)?,
            named(&series, SeriesName::CumulativeAppr)?,
        ) {
            Ok(progress) => progress,
            Err(e) => {
                tracing::warn!(error = %e, "Progress series unavailable");
                Progress::default()
            }
        };

        let momentum = approval_momentum(named(&series, SeriesName::DailyAppr)?, options);
        let candles = resample_to_ohlc(&momentum, options.candle_interval_days)?;
        let moving_averages = moving_average_overlays(&momentum, &options.moving_averages);

        let milestones = visible_milestones(&options.milestones, today);

        tracing::info!(
            days = dataset.len(),
            candles = candles.len(),
            overlays = moving_averages.len(),
            milestones = milestones.len(),
            "Dashboard built"
        );

        Ok(Self {
            series,
            candle_interval_days: options.candle_interval_days,
            candles,
            moving_averages,
            summary,
            progress,
            milestones,
        })
    }

    /// Get a named series
    pub fn get(&self, name: SeriesName) -> Option<&Series> {
        self.series.get(&name)
    }
}

fn named(map: &BTreeMap<SeriesName, Series>, name: SeriesName) -> TransformResult<&Series> {
    map.get(&name)
        .ok_or_else(|| TransformError::EmptySeries(name.to_string()))
}

/// Pending vs approved shares, skipping the leading days on which no
/// application had been received yet
///
/// Cumulative totals never decrease, so zero totals can only form a prefix.
pub fn progress_since_first_application(
    applications: &[series::Point],
    approvals: &[series::Point],
) -> TransformResult<Progress> {
    let leading = applications.iter().take_while(|p| p.value == 0.0).count();
    if leading > 0 {
        tracing::debug!(days = leading, "Skipping days before the first application");
    }

    pending_vs_approved(
        &applications[leading..],
        approvals.get(leading..).unwrap_or_default(),
    )
}

/// Non-zero approval days, optionally restricted to working days
pub fn approval_momentum(daily_approvals: &[series::Point], options: &DashboardOptions) -> Series {
    let non_zero = filter_zero(daily_approvals);
    if options.working_days_only {
        filter_working_days(&non_zero, &options.calendar)
    } else {
        non_zero
    }
}

/// Compute each overlay, skipping those that fail
pub fn moving_average_overlays(
    momentum: &[series::Point],
    specs: &[MovingAverageSpec],
) -> Vec<MovingAverage> {
    specs
        .iter()
        .filter_map(|spec| match exponential_moving_average(momentum, spec.window) {
            Ok(series) => Some(MovingAverage {
                title: spec.title(),
                window: spec.window,
                color: spec.color.clone(),
                series,
            }),
            Err(e) => {
                tracing::warn!(window = spec.window, error = %e, "Skipping EMA overlay");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DailyRecord;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    /// 30 consecutive days from 2022-01-03 (a Monday), approvals on odd days only
    fn month_dataset() -> Dataset {
        let start = date("2022-01-03");
        let records = (0..30)
            .map(|i| {
                let approvals = if i % 2 == 1 { i as u64 } else { 0 };
                DailyRecord::new(start + chrono::Duration::days(i))
                    .applied(20, 50)
                    .approved(approvals, approvals * 2)
            })
            .collect();
        Dataset::from_records(records).unwrap()
    }

    #[test]
    fn test_series_name_parse() {
        assert_eq!("CumulativeApp".parse::<SeriesName>().unwrap(), SeriesName::CumulativeApp);
        assert_eq!("dailyppl".parse::<SeriesName>().unwrap(), SeriesName::DailyPpl);
        assert!("Weekly".parse::<SeriesName>().is_err());
    }

    #[test]
    fn test_moving_average_spec_parse() {
        let specs = MovingAverageSpec::parse_list("9:blue, 12:green,26:orange").unwrap();
        assert_eq!(specs, default_moving_averages());
        assert_eq!(specs[0].title(), "EMA9");

        assert!(MovingAverageSpec::parse_list("").unwrap().is_empty());
        assert!(MovingAverageSpec::parse_list("9").is_err());
        assert!(MovingAverageSpec::parse_list("x:blue").is_err());
        assert!(MovingAverageSpec::parse_list("0:blue").is_err());
        assert!(MovingAverageSpec::parse_list("9:").is_err());
    }

    #[test]
    fn test_build_dashboard() {
        let dataset = month_dataset();
        let options = DashboardOptions {
            milestones: vec![
                Milestone::new(date("2022-01-10"), "past"),
                Milestone::new(date("2022-06-01"), "future"),
            ],
            ..DashboardOptions::default()
        };

        let dashboard = Dashboard::build(&dataset, &options, date("2022-02-01")).unwrap();

        assert_eq!(dashboard.series.len(), 7);
        for name in SeriesName::all() {
            assert_eq!(dashboard.get(*name).unwrap().len(), 30);
        }

        // 15 non-zero approval days in candles of 5
        assert_eq!(dashboard.candles.len(), 3);

        // 15 - 9 + 1, 15 - 12 + 1, and EMA26 is empty but present
        let lengths: Vec<_> = dashboard.moving_averages.iter().map(|m| m.series.len()).collect();
        assert_eq!(lengths, vec![7, 4, 0]);

        assert_eq!(dashboard.summary.unwrap().case_applied, 600.0);
        assert_eq!(dashboard.progress.len(), 30);
        assert_eq!(dashboard.milestones.len(), 1);
        assert_eq!(dashboard.milestones[0].label, "past");
    }

    #[test]
    fn test_working_days_only() {
        let dataset = month_dataset();
        let options = DashboardOptions {
            working_days_only: true,
            calendar: WorkingCalendar::new(Vec::new(), [0, 6]),
            ..DashboardOptions::default()
        };

        let momentum = approval_momentum(&series::daily_approvals(&dataset), &options);
        assert!(momentum.iter().all(|p| options.calendar.is_working_day(p.date)));
        assert!(momentum.iter().all(|p| p.value != 0.0));
        assert!(momentum.len() < 15);
    }

    #[test]
    fn test_leading_zero_application_day() {
        let dataset = Dataset::from_records(vec![
            DailyRecord::new(date("2021-11-30")),
            DailyRecord::new(date("2021-12-01")).applied(10, 25).approved(2, 5),
            DailyRecord::new(date("2021-12-02")).applied(5, 12).approved(3, 7),
        ])
        .unwrap();

        let dashboard =
            Dashboard::build(&dataset, &DashboardOptions::default(), date("2022-01-01")).unwrap();

        for name in SeriesName::all() {
            assert_eq!(dashboard.get(*name).unwrap().len(), 3);
        }
        assert_eq!(dashboard.candles.len(), 1);
        assert_eq!(dashboard.milestones.len(), 1);

        assert_eq!(dashboard.progress.len(), 2);
        assert_eq!(dashboard.progress.pending[0].date, date("2021-12-01"));
        assert!((dashboard.progress.pending[0].value - 80.0).abs() < 1e-9);

        let summary = dashboard.summary.unwrap();
        assert_eq!(summary.case_applied, 15.0);
        assert_eq!(summary.last_updated, date("2021-12-02"));
    }

    #[test]
    fn test_no_applications_keeps_series() {
        let dataset = Dataset::from_records(vec![
            DailyRecord::new(date("2021-12-01")).approved(1, 1),
            DailyRecord::new(date("2021-12-02")),
        ])
        .unwrap();

        let dashboard =
            Dashboard::build(&dataset, &DashboardOptions::default(), date("2022-01-01")).unwrap();

        assert!(dashboard.summary.is_none());
        assert!(dashboard.progress.is_empty());
        assert_eq!(dashboard.get(SeriesName::DailyAppr).unwrap().len(), 2);
        assert_eq!(dashboard.candles.len(), 1);
    }

    #[test]
    fn test_empty_dataset_builds() {
        let dashboard =
            Dashboard::build(&Dataset::default(), &DashboardOptions::default(), date("2022-01-01"))
                .unwrap();

        assert!(dashboard.summary.is_none());
        assert!(dashboard.progress.is_empty());
        assert!(dashboard.candles.is_empty());
        assert!(dashboard.get(SeriesName::CumulativeApp).unwrap().is_empty());
    }

    #[test]
    fn test_progress_length_mismatch_still_reported() {
        let dataset = month_dataset();
        let applications = series::cumulative_applications(&dataset);
        let approvals = series::cumulative_approvals(&dataset);

        let result = progress_since_first_application(&applications, &approvals[..3]);
        assert!(matches!(result, Err(TransformError::LengthMismatch { .. })));
    }

    #[test]
    fn test_invalid_candle_interval() {
        let options = DashboardOptions {
            candle_interval_days: 0,
            ..DashboardOptions::default()
        };

        let result = Dashboard::build(&month_dataset(), &options, date("2022-02-01"));
        assert!(matches!(result, Err(TransformError::InvalidArgument(_))));
    }

    #[test]
    fn test_failed_overlay_is_skipped() {
        let momentum = series::daily_approvals(&month_dataset());
        let specs = vec![MovingAverageSpec::new(0, "red"), MovingAverageSpec::new(3, "blue")];

        let overlays = moving_average_overlays(&momentum, &specs);
        assert_eq!(overlays.len(), 1);
        assert_eq!(overlays[0].title, "EMA3");
    }

    #[test]
    fn test_dashboard_json_contract() {
        let dashboard =
            Dashboard::build(&month_dataset(), &DashboardOptions::default(), date("2022-02-01"))
                .unwrap();
        let json = serde_json::to_value(&dashboard).unwrap();

        assert!(json["series"]["CumulativeApprPpl"].is_array());
        assert_eq!(json["series"]["DailyApp"][0]["time"], "2022-01-03");
        assert!(json["candles"][0]["open"].is_number());
        assert!(json["summary"]["case_pending_pct"].is_number());
    }
}
