//! # rv-tracker
//!
//! Processing statistics for the 2021 Resident Visa programme: loads the
//! published daily counts and derives the series behind the tracker
//! dashboard.
//!
//! ## Features
//!
//! - **Named series**: daily and cumulative applications, applicants and approvals
//! - **Candles**: OHLC resampling of daily approvals with EMA overlays
//! - **Summary**: pending/approved shares for cases and people
//! - **Calendar**: holiday and weekend filtering from immutable configuration
//! - **Milestones**: programme dates shown once they have passed
//!
//! ## Modules
//!
//! - [`dataset`]: Daily records and the sorted dataset
//! - [`series`]: Stateless series transformations
//! - [`dashboard`]: The fixed derivation pipeline and its output
//! - [`loader`]: One-shot fetch of the data file
//! - [`export`]: CSV and JSON output
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rv_tracker::config::Config;
//! use rv_tracker::loader::{load_dashboard, source_for};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default()?;
//!     let source = source_for(&config.source.location, Duration::from_secs(30))?;
//!
//!     let today = chrono::Utc::now().date_naive();
//!     let dashboard = load_dashboard(source.as_ref(), &config.dashboard_options(), today).await?;
//!
//!     if let Some(summary) = dashboard.summary {
//!         println!(
//!             "{} cases applied, {:.2}% approved",
//!             summary.case_applied, summary.case_approved_pct
//!         );
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod export;
pub mod loader;
pub mod series;

// Re-export top-level types for convenience
pub use dataset::{DailyRecord, Dataset, DatasetError, Field};

pub use series::{Candle, Point, Series, TransformError, TransformResult, WorkingCalendar};

pub use dashboard::{
    Dashboard, DashboardOptions, Milestone, MovingAverage, MovingAverageSpec, Progress,
    SeriesName, Summary,
};

pub use loader::{DataSource, FileSource, HttpSource, LoadError, LoadState};

pub use export::{ExportError, ExportFormat};

pub use config::{ChartConfig, Config, ConfigError, LoggingConfig, SourceConfig};
