//! Working-day calendar
//!
//! Holiday dates and weekend weekdays are immutable configuration passed to
//! the filters, so a dataset can be narrowed to the days on which cases
//! are actually processed.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::types::{Point, Series};

/// Public holidays observed in New Zealand, 2021-2023
const NZ_PUBLIC_HOLIDAYS: &[&str] = &[
    "2021-12-25", // Christmas Day
    "2021-12-26", // Boxing Day
    "2022-01-01", // New Year's Day
    "2022-01-02", // Day after New Year's Day
    "2022-02-07", // Waitangi Day
    "2022-04-15", // Good Friday
    "2022-04-18", // Easter Monday
    "2022-04-25", // Anzac Day
    "2022-06-06", // Queen's Birthday
    "2022-06-24", // Matariki
    "2022-10-24", // Labour Day
    "2022-12-25", // Christmas Day
    "2022-12-26", // Boxing Day
    "2023-01-01", // New Year's Day
    "2023-01-02", // Day after New Year's Day
    "2023-02-06", // Waitangi Day
    "2023-04-07", // Good Friday
    "2023-04-10", // Easter Monday
    "2023-04-25", // Anzac Day
    "2023-06-05", // Queen's Birthday
    "2023-07-14", // Matariki
    "2023-10-23", // Labour Day
    "2023-12-25", // Christmas Day
    "2023-12-26", // Boxing Day
];

/// Sunday and Saturday, counting from Sunday = 0
const DEFAULT_WEEKEND_DAYS: [u32; 2] = [0, 6];

fn default_weekend_days() -> BTreeSet<u32> {
    DEFAULT_WEEKEND_DAYS.into_iter().collect()
}

/// Set of non-working days
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingCalendar {
    /// Public holiday dates
    #[serde(default)]
    pub holidays: BTreeSet<NaiveDate>,
    /// Weekend weekday indexes, Sunday = 0 through Saturday = 6
    #[serde(default = "default_weekend_days")]
    pub weekend_days: BTreeSet<u32>,
}

impl WorkingCalendar {
    pub fn new(
        holidays: impl IntoIterator<Item = NaiveDate>,
        weekend_days: impl IntoIterator<Item = u32>,
    ) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
            weekend_days: weekend_days.into_iter().collect(),
        }
    }

    /// New Zealand public holidays with a Saturday/Sunday weekend
    pub fn new_zealand() -> Self {
        let holidays = NZ_PUBLIC_HOLIDAYS
            .iter()
            .filter_map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
        Self::new(holidays, DEFAULT_WEEKEND_DAYS)
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.weekend_days
            .contains(&date.weekday().num_days_from_sunday())
    }

    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !self.is_holiday(date) && !self.is_weekend(date)
    }
}

/// Drop points dated on a public holiday
pub fn filter_holidays(series: &[Point], calendar: &WorkingCalendar) -> Series {
    series
        .iter()
        .filter(|p| !calendar.is_holiday(p.date))
        .copied()
        .collect()
}

/// Drop points dated on a weekend day
pub fn filter_weekends(series: &[Point], calendar: &WorkingCalendar) -> Series {
    series
        .iter()
        .filter(|p| !calendar.is_weekend(p.date))
        .copied()
        .collect()
}

/// Keep only points dated on working days
pub fn filter_working_days(series: &[Point], calendar: &WorkingCalendar) -> Series {
    series
        .iter()
        .filter(|p| calendar.is_working_day(p.date))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn week_around_christmas() -> Series {
        // 2021-12-24 is a Friday
        (0..7)
            .map(|i| Point::new(date("2021-12-24") + chrono::Duration::days(i), 1.0 + i as f64))
            .collect()
    }

    #[test]
    fn test_new_zealand_calendar() {
        let calendar = WorkingCalendar::new_zealand();

        assert_eq!(calendar.holidays.len(), NZ_PUBLIC_HOLIDAYS.len());
        assert!(calendar.is_holiday(date("2022-02-07")));
        assert!(calendar.is_weekend(date("2022-01-08"))); // Saturday
        assert!(calendar.is_weekend(date("2022-01-09"))); // Sunday
        assert!(calendar.is_working_day(date("2022-01-10"))); // Monday
        assert!(!calendar.is_working_day(date("2022-04-15"))); // Good Friday
    }

    #[test]
    fn test_filter_holidays() {
        let calendar = WorkingCalendar::new_zealand();
        let filtered = filter_holidays(&week_around_christmas(), &calendar);

        assert_eq!(filtered.len(), 5);
        assert!(filtered.iter().all(|p| !calendar.is_holiday(p.date)));
    }

    #[test]
    fn test_filter_weekends() {
        let calendar = WorkingCalendar::new_zealand();
        let filtered = filter_weekends(&week_around_christmas(), &calendar);

        // Sat 25th and Sun 26th removed
        let dates: Vec<_> = filtered.iter().map(|p| p.date).collect();
        assert_eq!(dates.len(), 5);
        assert!(!dates.contains(&date("2021-12-25")));
        assert!(!dates.contains(&date("2021-12-26")));
    }

    #[test]
    fn test_filter_working_days() {
        let calendar = WorkingCalendar::new([date("2021-12-27")], [0, 6]);
        let filtered = filter_working_days(&week_around_christmas(), &calendar);

        let dates: Vec<_> = filtered.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![date("2021-12-24"), date("2021-12-28"), date("2021-12-29"), date("2021-12-30")]
        );
    }

    #[test]
    fn test_empty_calendar_keeps_everything() {
        let calendar = WorkingCalendar::default();
        assert_eq!(filter_working_days(&week_around_christmas(), &calendar).len(), 7);
    }
}
