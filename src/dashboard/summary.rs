//! Summary figures and the pending-vs-approved progress series
//!
//! Every percentage goes through [`percentage`], which refuses a zero total
//! instead of producing NaN or infinity.

use chrono::NaiveDate;
use serde::Serialize;

use crate::dataset::Dataset;
use crate::series::{
    cumulative_applicants, cumulative_applications, cumulative_approvals,
    cumulative_approved_people, last_value, Point, Series, TransformError, TransformResult,
};

/// `part / whole * 100`, failing on a zero total
pub fn percentage(part: f64, whole: f64, what: &str) -> TransformResult<f64> {
    if whole == 0.0 {
        return Err(TransformError::DivisionByZero(format!(
            "{} has a total of zero",
            what
        )));
    }
    Ok(part / whole * 100.0)
}

/// Figures shown on the dashboard stat cards
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Summary {
    /// Date of the most recent daily row
    pub last_updated: NaiveDate,
    /// Total applications received
    pub case_applied: f64,
    /// Total applications approved
    pub case_approved: f64,
    pub case_pending_pct: f64,
    pub case_approved_pct: f64,
    /// Total people included in applications
    pub people_applied: f64,
    /// Total people granted a visa
    pub people_approved: f64,
    pub people_pending_pct: f64,
    pub people_approved_pct: f64,
}

impl Summary {
    /// Compute from the four cumulative series
    pub fn from_cumulative(
        applications: &[Point],
        approvals: &[Point],
        applicants: &[Point],
        approved_people: &[Point],
    ) -> TransformResult<Self> {
        let last_point = applications
            .last()
            .ok_or_else(|| TransformError::EmptySeries("CumulativeApp".to_string()))?;
        let case_applied = last_point.value;
        let case_approved = last_or_empty(approvals, "CumulativeAppr")?;
        let people_applied = last_or_empty(applicants, "CumulativePpl")?;
        let people_approved = last_or_empty(approved_people, "CumulativeApprPpl")?;

        let case_approved_pct = percentage(case_approved, case_applied, "case_applied")?;
        let people_approved_pct = percentage(people_approved, people_applied, "people_applied")?;

        Ok(Self {
            last_updated: last_point.date,
            case_applied,
            case_approved,
            case_pending_pct: percentage(case_applied - case_approved, case_applied, "case_applied")?,
            case_approved_pct,
            people_applied,
            people_approved,
            people_pending_pct: 100.0 - people_approved_pct,
            people_approved_pct,
        })
    }

    /// Compute straight from a dataset
    pub fn from_dataset(dataset: &Dataset) -> TransformResult<Self> {
        Self::from_cumulative(
            &cumulative_applications(dataset),
            &cumulative_approvals(dataset),
            &cumulative_applicants(dataset),
            &cumulative_approved_people(dataset),
        )
    }
}

fn last_or_empty(series: &[Point], name: &str) -> TransformResult<f64> {
    last_value(series).ok_or_else(|| TransformError::EmptySeries(name.to_string()))
}

/// Stacked share of pending and approved cases per day
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Progress {
    /// Case Pending (%)
    pub pending: Series,
    /// Case Approved (%)
    pub approved: Series,
}

impl Progress {
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Per-day pending and approved percentages of cumulative applications
///
/// Both inputs must align index-for-index.
pub fn pending_vs_approved(applications: &[Point], approvals: &[Point]) -> TransformResult<Progress> {
    if applications.len() != approvals.len() {
        return Err(TransformError::LengthMismatch {
            left: applications.len(),
            right: approvals.len(),
        });
    }

    let mut progress = Progress {
        pending: Vec::with_capacity(applications.len()),
        approved: Vec::with_capacity(applications.len()),
    };

    for (applied, approved) in applications.iter().zip(approvals) {
        let pending_pct = percentage(
            applied.value - approved.value,
            applied.value,
            &format!("CumulativeApp on {}", applied.date),
        )?;
        progress.pending.push(Point::new(applied.date, pending_pct));
        progress.approved.push(Point::new(approved.date, 100.0 - pending_pct));
    }

    Ok(progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DailyRecord;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            DailyRecord::new(date("2021-12-01")).applied(10, 30).approved(2, 5),
            DailyRecord::new(date("2021-12-02")).applied(5, 10).approved(3, 7),
        ])
        .unwrap()
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1.0, 4.0, "x").unwrap(), 25.0);
        assert!(matches!(
            percentage(1.0, 0.0, "x"),
            Err(TransformError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_summary_from_dataset() {
        let summary = Summary::from_dataset(&dataset()).unwrap();

        assert_eq!(summary.last_updated, date("2021-12-02"));
        assert_eq!(summary.case_applied, 15.0);
        assert_eq!(summary.case_approved, 5.0);
        assert!((summary.case_pending_pct - 66.6667).abs() < 1e-3);
        assert!((summary.case_approved_pct - 33.3333).abs() < 1e-3);

        assert_eq!(summary.people_applied, 40.0);
        assert_eq!(summary.people_approved, 12.0);
        assert!((summary.people_approved_pct - 30.0).abs() < 1e-9);
        assert!((summary.people_pending_pct - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_zero_applications() {
        let dataset = Dataset::from_records(vec![DailyRecord::new(date("2021-12-01"))]).unwrap();
        let result = Summary::from_dataset(&dataset);

        assert!(matches!(result, Err(TransformError::DivisionByZero(_))));
    }

    #[test]
    fn test_summary_empty_dataset() {
        let result = Summary::from_dataset(&Dataset::default());
        assert!(matches!(result, Err(TransformError::EmptySeries(_))));
    }

    #[test]
    fn test_pending_vs_approved() {
        let dataset = dataset();
        let progress = pending_vs_approved(
            &cumulative_applications(&dataset),
            &cumulative_approvals(&dataset),
        )
        .unwrap();

        assert_eq!(progress.len(), 2);
        assert!((progress.pending[0].value - 80.0).abs() < 1e-9);
        assert!((progress.approved[0].value - 20.0).abs() < 1e-9);
        assert!((progress.pending[1].value - 66.6667).abs() < 1e-3);

        for (p, a) in progress.pending.iter().zip(&progress.approved) {
            assert_eq!(p.date, a.date);
            assert!((p.value + a.value - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_pending_vs_approved_length_mismatch() {
        let dataset = dataset();
        let applications = cumulative_applications(&dataset);
        let approvals = cumulative_approvals(&dataset);

        let result = pending_vs_approved(&applications, &approvals[..1]);
        assert_eq!(
            result.unwrap_err(),
            TransformError::LengthMismatch { left: 2, right: 1 }
        );
    }

    #[test]
    fn test_pending_vs_approved_zero_total() {
        let applications = vec![Point::new(date("2021-12-01"), 0.0)];
        let approvals = vec![Point::new(date("2021-12-01"), 0.0)];

        let result = pending_vs_approved(&applications, &approvals);
        assert!(matches!(result, Err(TransformError::DivisionByZero(_))));
    }
}
