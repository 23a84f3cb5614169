//! Data loading
//!
//! Fetches the JSON data file once, parses it into a [`Dataset`] and hands
//! it to the caller. A failed fetch leaves nothing loaded:
//!
//! ```text
//! DataSource::fetch ─► Dataset::from_json ─► LoadState::Loaded
//!        └──────────── error ──────────────► LoadState::Failed
//! ```

pub mod error;
pub mod sources;

pub use error::{LoadError, LoadResult};
pub use sources::{is_remote, source_for, DataSource, FileSource, HttpSource};

use chrono::NaiveDate;
use std::time::Instant;

use crate::dashboard::{Dashboard, DashboardOptions};
use crate::dataset::Dataset;

/// Fetch and parse the data file
pub async fn load_dataset(source: &dyn DataSource) -> LoadResult<Dataset> {
    let start = Instant::now();
    tracing::info!(source = %source.describe(), "Loading data file");

    let bytes = source.fetch().await?;
    let dataset = Dataset::from_json(&bytes)?;

    tracing::info!(
        days = dataset.len(),
        first = ?dataset.first_date(),
        last = ?dataset.last_date(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Data file loaded"
    );

    Ok(dataset)
}

/// Load the data file and build the dashboard from it
pub async fn load_dashboard(
    source: &dyn DataSource,
    options: &DashboardOptions,
    today: NaiveDate,
) -> LoadResult<Dashboard> {
    let dataset = load_dataset(source).await?;
    Ok(Dashboard::build(&dataset, options, today)?)
}

/// Outcome of the one-shot load
#[derive(Debug, Default)]
pub enum LoadState {
    /// Nothing has been fetched yet
    #[default]
    Unloaded,
    Loaded(Dataset),
    /// The fetch failed; no series are available
    Failed(String),
}

impl LoadState {
    /// Run the load once and record its outcome
    pub async fn resolve(source: &dyn DataSource) -> Self {
        match load_dataset(source).await {
            Ok(dataset) => LoadState::Loaded(dataset),
            Err(e) => {
                tracing::error!(source = %source.describe(), error = %e, "Failed to load data");
                LoadState::Failed(e.to_string())
            }
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        match self {
            LoadState::Loaded(dataset) => Some(dataset),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded(_))
    }
}
