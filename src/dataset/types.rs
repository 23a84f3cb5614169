//! Core data types for the visa processing dataset
//!
//! - `DailyRecord`: one calendar day of processing activity
//! - `Field`: selector for one numeric column of a record
//! - `Dataset`: the immutable, date-ascending collection of records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{DatasetError, DatasetResult};

/// One calendar day of case-processing activity
///
/// Field names on the wire follow the published data file
/// (`time`, `aply`, `aply_people`, `appr`, `appr_people`, `decl`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyRecord {
    /// Calendar day (`YYYY-MM-DD`)
    #[serde(rename = "time")]
    pub date: NaiveDate,
    /// New applications received
    #[serde(rename = "aply")]
    pub applications: u64,
    /// People included in the new applications
    #[serde(rename = "aply_people")]
    pub applicants: u64,
    /// Applications approved
    #[serde(rename = "appr")]
    pub approvals: u64,
    /// People granted a visa
    #[serde(rename = "appr_people")]
    pub approved_people: u64,
    /// Applications declined for failing the criteria
    #[serde(rename = "decl", default)]
    pub declines: u64,
}

impl DailyRecord {
    /// Create a record with every count set to zero
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            applications: 0,
            applicants: 0,
            approvals: 0,
            approved_people: 0,
            declines: 0,
        }
    }

    /// Builder: set application and applicant counts
    pub fn applied(mut self, applications: u64, applicants: u64) -> Self {
        self.applications = applications;
        self.applicants = applicants;
        self
    }

    /// Builder: set approval and approved-people counts
    pub fn approved(mut self, approvals: u64, approved_people: u64) -> Self {
        self.approvals = approvals;
        self.approved_people = approved_people;
        self
    }

    /// Builder: set the decline count
    pub fn declined(mut self, declines: u64) -> Self {
        self.declines = declines;
        self
    }

    /// Read one numeric field
    pub fn get(&self, field: Field) -> u64 {
        match field {
            Field::Applications => self.applications,
            Field::Applicants => self.applicants,
            Field::Approvals => self.approvals,
            Field::ApprovedPeople => self.approved_people,
            Field::Declines => self.declines,
        }
    }
}

/// Numeric column of a [`DailyRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Applications,
    Applicants,
    Approvals,
    ApprovedPeople,
    Declines,
}

/// Date-ascending collection of daily records with unique dates
///
/// The order is established once in [`Dataset::from_records`] and the
/// records are never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<DailyRecord>,
}

impl Dataset {
    /// Build a dataset, sorting by date and rejecting duplicate dates
    pub fn from_records(mut records: Vec<DailyRecord>) -> DatasetResult<Self> {
        records.sort_by_key(|r| r.date);

        if let Some(pair) = records.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(DatasetError::DuplicateDate(pair[1].date));
        }

        Ok(Self { records })
    }

    /// Parse the published JSON data file
    pub fn from_json(bytes: &[u8]) -> DatasetResult<Self> {
        let records: Vec<DailyRecord> = serde_json::from_slice(bytes)?;
        Self::from_records(records)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DailyRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a DailyRecord;
    type IntoIter = std::slice::Iter<'a, DailyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
