//! Milestone markers
//!
//! Fixed calendar dates annotated with a label. A milestone is only shown
//! once its date has been reached.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An annotated date on the timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    #[serde(rename = "time")]
    pub date: NaiveDate,
    pub label: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "orange".to_string()
}

impl Milestone {
    pub fn new(date: NaiveDate, label: impl Into<String>) -> Self {
        Self {
            date,
            label: label.into(),
            color: default_color(),
        }
    }

    /// Builder: set the marker color
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Whether the milestone has been reached on `today`
    pub fn is_visible(&self, today: NaiveDate) -> bool {
        self.date <= today
    }
}

/// Milestones of the 2021 Resident Visa programme
pub fn default_milestones() -> Vec<Milestone> {
    [
        (2021, 12, 1, "Phase 1 Open", "orange"),
        (2022, 2, 21, "Phase 1.5 Open", "orange"),
        (2022, 3, 1, "Phase 2 Open", "orange"),
        (2022, 4, 1, "Phase 2 Processes", "orange"),
        (2022, 8, 1, "Application Closed", "orangered"),
    ]
    .into_iter()
    .filter_map(|(y, m, d, label, color)| {
        NaiveDate::from_ymd_opt(y, m, d).map(|date| Milestone::new(date, label).color(color))
    })
    .collect()
}

/// Milestones reached on `today`, in date order
pub fn visible_milestones(milestones: &[Milestone], today: NaiveDate) -> Vec<Milestone> {
    let mut visible: Vec<Milestone> = milestones
        .iter()
        .filter(|m| m.is_visible(today))
        .cloned()
        .collect();
    visible.sort_by_key(|m| m.date);
    visible
}
