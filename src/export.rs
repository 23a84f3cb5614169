//! Export
//!
//! Writes derived series and candles as CSV or JSON.
//!
//! Series are joined on date: one row per date present in any of the
//! exported series, with an empty cell where a series has no point.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::io::Write;
use thiserror::Error;

use crate::dashboard::{Dashboard, SeriesName};
use crate::series::{Candle, Point};

/// Errors that can occur while exporting
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unsupported export format: {}", other)),
        }
    }
}

/// Write several series as date-joined CSV columns
pub fn write_series_csv<W: Write>(writer: W, columns: &[(&str, &[Point])]) -> ExportResult<()> {
    let mut rows: BTreeMap<NaiveDate, Vec<Option<f64>>> = BTreeMap::new();

    for (idx, (_, series)) in columns.iter().enumerate() {
        for point in series.iter() {
            rows.entry(point.date)
                .or_insert_with(|| vec![None; columns.len()])[idx] = Some(point.value);
        }
    }

    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec!["time".to_string()];
    header.extend(columns.iter().map(|(name, _)| name.to_string()));
    csv.write_record(&header)?;

    for (date, values) in &rows {
        let mut record = vec![date.format("%Y-%m-%d").to_string()];
        record.extend(
            values
                .iter()
                .map(|v| v.map(|v| v.to_string()).unwrap_or_default()),
        );
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Write candles as CSV with a `time,open,high,low,close` header
pub fn write_candles_csv<W: Write>(writer: W, candles: &[Candle]) -> ExportResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for candle in candles {
        csv.serialize(candle)?;
    }
    csv.flush()?;
    Ok(())
}

/// Write every named series of a dashboard as one CSV table
pub fn write_dashboard_csv<W: Write>(writer: W, dashboard: &Dashboard) -> ExportResult<()> {
    let columns: Vec<(&str, &[Point])> = SeriesName::all()
        .iter()
        .filter_map(|name| dashboard.get(*name).map(|s| (name.as_str(), s.as_slice())))
        .collect();
    write_series_csv(writer, &columns)
}

/// Write the whole dashboard as pretty-printed JSON
pub fn write_dashboard_json<W: Write>(mut writer: W, dashboard: &Dashboard) -> ExportResult<()> {
    serde_json::to_writer_pretty(&mut writer, dashboard)?;
    writeln!(writer)?;
    Ok(())
}
