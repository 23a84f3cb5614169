//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::dashboard::{
    default_milestones, default_moving_averages, DashboardOptions, Milestone, MovingAverageSpec,
};
use crate::series::WorkingCalendar;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default = "WorkingCalendar::new_zealand")]
    pub calendar: WorkingCalendar,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the data file is loaded from
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Local path or `http(s)://` URL of the JSON data file
    #[serde(default = "default_location")]
    pub location: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_location() -> String {
    "./assets/2021rv.json".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Chart derivation settings
#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_candle_interval")]
    pub candle_interval_days: usize,

    #[serde(default = "default_moving_averages")]
    pub moving_averages: Vec<MovingAverageSpec>,

    #[serde(default)]
    pub working_days_only: bool,

    #[serde(default = "default_milestones")]
    pub milestones: Vec<Milestone>,
}

fn default_candle_interval() -> usize {
    5
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            candle_interval_days: default_candle_interval(),
            moving_averages: default_moving_averages(),
            working_days_only: false,
            milestones: default_milestones(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_first(&default_config_paths())
    }

    /// Load the first existing file among `paths`, or defaults with
    /// environment overrides when none exists
    ///
    /// A file that exists but cannot be loaded is an error.
    pub fn load_first(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        match find_config(paths) {
            Some(path) => {
                let config = Self::load_with_env(&path)?;
                tracing::info!("Loaded config from {:?}", path);
                Ok(config)
            }
            None => {
                tracing::info!("Using default config with environment overrides");
                Ok(Self::from_env())
            }
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from a variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Source overrides
        if let Some(location) = lookup("RVT_SOURCE") {
            self.source.location = location;
        }

        // Chart overrides
        if let Some(interval) = lookup("RVT_CANDLE_INTERVAL") {
            match interval.parse() {
                Ok(days) if days > 0 => self.chart.candle_interval_days = days,
                _ => tracing::warn!("Ignoring invalid RVT_CANDLE_INTERVAL: {}", interval),
            }
        }
        if let Some(spec) = lookup("RVT_MOVING_AVERAGES") {
            match MovingAverageSpec::parse_list(&spec) {
                Ok(specs) => self.chart.moving_averages = specs,
                Err(e) => tracing::warn!("Ignoring RVT_MOVING_AVERAGES: {}", e),
            }
        }
        if let Some(flag) = lookup("RVT_WORKING_DAYS_ONLY") {
            self.chart.working_days_only = matches!(flag.as_str(), "1" | "true" | "yes");
        }

        // Logging overrides
        if let Some(level) = lookup("RVT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("RVT_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Reject values the pipeline cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chart.candle_interval_days == 0 {
            return Err(ConfigError::Invalid(
                "chart.candle_interval_days must be >= 1".to_string(),
            ));
        }
        if let Some(ma) = self.chart.moving_averages.iter().find(|m| m.window == 0) {
            return Err(ConfigError::Invalid(format!(
                "moving average '{}' has a zero window",
                ma.color
            )));
        }
        if let Some(day) = self.calendar.weekend_days.iter().find(|d| **d > 6) {
            return Err(ConfigError::Invalid(format!(
                "weekend day index {} is outside 0..=6",
                day
            )));
        }
        Ok(())
    }

    /// Dashboard build options derived from this config
    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            candle_interval_days: self.chart.candle_interval_days,
            moving_averages: self.chart.moving_averages.clone(),
            working_days_only: self.chart.working_days_only,
            calendar: self.calendar.clone(),
            milestones: self.chart.milestones.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            chart: ChartConfig::default(),
            calendar: WorkingCalendar::new_zealand(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Standard config file locations, in search order
pub fn default_config_paths() -> Vec<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join("rv-tracker").join("config.toml"))
        .into_iter()
        .chain(std::iter::once(PathBuf::from("./config.toml")))
        .collect()
}

/// First existing file among `paths`
pub fn find_config(paths: &[PathBuf]) -> Option<PathBuf> {
    paths.iter().find(|p| p.exists()).cloned()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# rv-tracker Configuration
#
# Environment variables override these settings:
# - RVT_SOURCE
# - RVT_CANDLE_INTERVAL
# - RVT_MOVING_AVERAGES (e.g. "9:blue,12:green,26:orange")
# - RVT_WORKING_DAYS_ONLY
# - RVT_LOG_LEVEL
# - RVT_LOG_FORMAT

[source]
# Local path or http(s) URL of the daily JSON data file
location = "./assets/2021rv.json"

# Fetch timeout in seconds
timeout_secs = 30

[chart]
# Non-zero approval days per candle
candle_interval_days = 5

# Skip holidays and weekends when building approval candles
working_days_only = false

moving_averages = [
    { window = 9, color = "blue" },
    { window = 12, color = "green" },
    { window = 26, color = "orange" },
]

milestones = [
    { time = "2021-12-01", label = "Phase 1 Open" },
    { time = "2022-02-21", label = "Phase 1.5 Open" },
    { time = "2022-03-01", label = "Phase 2 Open" },
    { time = "2022-04-01", label = "Phase 2 Processes" },
    { time = "2022-08-01", label = "Application Closed", color = "orangered" },
]

[calendar]
# Weekday indexes, Sunday = 0 through Saturday = 6
weekend_days = [0, 6]

holidays = [
    "2021-12-25", "2021-12-26",
    "2022-01-01", "2022-01-02", "2022-02-07", "2022-04-15", "2022-04-18",
    "2022-04-25", "2022-06-06", "2022-06-24", "2022-10-24", "2022-12-25",
    "2022-12-26",
    "2023-01-01", "2023-01-02", "2023-02-06", "2023-04-07", "2023-04-10",
    "2023-04-25", "2023-06-05", "2023-07-14", "2023-10-23", "2023-12-25",
    "2023-12-26",
]

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
