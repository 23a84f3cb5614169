//! rv-tracker CLI
//!
//! Command-line interface over the dashboard pipeline:
//! - Show summary figures
//! - Print named series, candles and progress
//! - List milestones
//! - Export data

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rv_tracker::config::{generate_default_config, Config, LoggingConfig};
use rv_tracker::dashboard::{Dashboard, MovingAverageSpec, SeriesName, Summary};
use rv_tracker::export::{self, ExportFormat};
use rv_tracker::loader::{load_dataset, source_for};
use rv_tracker::series::Point;

#[derive(Parser)]
#[command(name = "rv-tracker")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "2021 Resident Visa processing tracker")]
#[command(long_about = "Derives the processing tracker series from the published daily data file.\nCumulative totals, approval candles, moving averages and pending/approved shares.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Data file path or URL (overrides config)
    #[arg(short, long, global = true)]
    pub source: Option<String>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show summary card figures
    Summary,

    /// Print named series
    Series {
        /// Series names (DailyApp, CumulativeApp, ...); all when omitted
        names: Vec<String>,
    },

    /// Print approval candles and moving averages
    Candles {
        /// Non-zero approval days per candle
        #[arg(short, long)]
        interval: Option<usize>,
        /// Moving averages, e.g. "9:blue,12:green,26:orange"
        #[arg(long)]
        ma: Option<String>,
        /// Skip holidays and weekends
        #[arg(long)]
        working_days: bool,
    },

    /// Print pending vs approved shares per day
    Progress,

    /// List milestones reached by a date
    Milestones {
        /// Reference date (default: today)
        #[arg(short, long)]
        today: Option<NaiveDate>,
    },

    /// Export series or candles as CSV or JSON
    Export {
        /// Export candles instead of the named series
        #[arg(long)]
        candles: bool,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_deref());
    }

    // Config loading logs before the configured subscriber exists
    let mut config =
        tracing::subscriber::with_default(bootstrap_subscriber(), || load_config(&cli))?;
    if let Some(source) = &cli.source {
        config.source.location = source.clone();
    }

    init_logging(&config.logging);

    let mut options = config.dashboard_options();
    let mut today = Utc::now().date_naive();

    match &cli.command {
        Commands::Candles {
            interval,
            ma,
            working_days,
        } => {
            if let Some(days) = interval {
                options.candle_interval_days = *days;
            }
            if let Some(spec) = ma {
                options.moving_averages = MovingAverageSpec::parse_list(spec)?;
            }
            options.working_days_only |= *working_days;
        }
        Commands::Milestones { today: Some(date) } => today = *date,
        _ => {}
    }

    let source = source_for(
        &config.source.location,
        Duration::from_secs(config.source.timeout_secs),
    )?;

    let dataset = match load_dataset(source.as_ref()).await {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("Error loading data, please retry later.");
            eprintln!("Source: {}", source.describe());
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let dashboard = Dashboard::build(&dataset, &options, today)
        .context("Failed to derive dashboard series")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Summary => match (cli.format.as_str(), &dashboard.summary) {
            ("json", summary) => writeln!(out, "{}", serde_json::to_string_pretty(summary)?)?,
            (_, Some(summary)) => print_summary(&mut out, summary)?,
            (_, None) => writeln!(out, "No summary available: no applications recorded yet")?,
        },

        Commands::Series { names } => {
            let names: Vec<SeriesName> = if names.is_empty() {
                SeriesName::all().to_vec()
            } else {
                names
                    .iter()
                    .flat_map(|n| n.split(','))
                    .map(|n| n.parse::<SeriesName>())
                    .collect::<Result<Vec<_>, _>>()?
            };

            let columns: Vec<(&str, &[Point])> = names
                .iter()
                .filter_map(|name| dashboard.get(*name).map(|s| (name.as_str(), s.as_slice())))
                .collect();

            match cli.format.as_str() {
                "json" => {
                    let map: BTreeMap<&str, &[Point]> = columns.iter().copied().collect();
                    writeln!(out, "{}", serde_json::to_string_pretty(&map)?)?;
                }
                "csv" => export::write_series_csv(&mut out, &columns)?,
                _ => print_series_table(&mut out, &columns)?,
            }
        }

        Commands::Candles { .. } => match cli.format.as_str() {
            "json" => {
                let body = serde_json::json!({
                    "interval_days": dashboard.candle_interval_days,
                    "candles": dashboard.candles,
                    "moving_averages": dashboard.moving_averages,
                });
                writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
            }
            "csv" => export::write_candles_csv(&mut out, &dashboard.candles)?,
            _ => print_candles(&mut out, &dashboard)?,
        },

        Commands::Progress => {
            let columns: Vec<(&str, &[Point])> = vec![
                ("Case Approved (%)", dashboard.progress.approved.as_slice()),
                ("Case Pending (%)", dashboard.progress.pending.as_slice()),
            ];
            match cli.format.as_str() {
                "json" => writeln!(out, "{}", serde_json::to_string_pretty(&dashboard.progress)?)?,
                "csv" => export::write_series_csv(&mut out, &columns)?,
                _ => print_series_table(&mut out, &columns)?,
            }
        }

        Commands::Milestones { .. } => match cli.format.as_str() {
            "json" => writeln!(out, "{}", serde_json::to_string_pretty(&dashboard.milestones)?)?,
            _ => {
                if dashboard.milestones.is_empty() {
                    writeln!(out, "No milestones reached by {}", today)?;
                }
                for milestone in &dashboard.milestones {
                    writeln!(out, "{}  {}", milestone.date, milestone.label)?;
                }
            }
        },

        Commands::Export { candles, output } => {
            let format: ExportFormat = match cli.format.as_str() {
                "table" => ExportFormat::Csv,
                other => other.parse().map_err(anyhow::Error::msg)?,
            };

            let mut buf = Vec::new();
            match (format, candles) {
                (ExportFormat::Csv, false) => export::write_dashboard_csv(&mut buf, &dashboard)?,
                (ExportFormat::Csv, true) => export::write_candles_csv(&mut buf, &dashboard.candles)?,
                (ExportFormat::Json, false) => export::write_dashboard_json(&mut buf, &dashboard)?,
                (ExportFormat::Json, true) => {
                    serde_json::to_writer_pretty(&mut buf, &dashboard.candles)?;
                    buf.push(b'\n');
                }
            }

            match output {
                Some(path) => {
                    std::fs::write(&path, &buf)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    tracing::info!(path = ?path, bytes = buf.len(), "Export written");
                    writeln!(out, "Exported to {:?}", path)?;
                }
                None => out.write_all(&buf)?,
            }
        }

        // Handled before the config is loaded
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default()?,
    };
    Ok(config)
}

/// Stderr subscriber used until the configured one is installed
fn bootstrap_subscriber() -> impl tracing::Subscriber + Send + Sync {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("rv_tracker=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("rv_tracker={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn write_default_config(output: Option<&std::path::Path>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }

    Ok(())
}

fn print_summary(out: &mut impl Write, s: &Summary) -> std::io::Result<()> {
    writeln!(out, "Last updated: {}", s.last_updated)?;
    writeln!(out)?;
    writeln!(out, "{:<18} {:>12} {:>12} {:>12}", "", "Applied", "Pending", "Approved")?;
    writeln!(out, "{}", "-".repeat(57))?;
    writeln!(
        out,
        "{:<18} {:>12.0} {:>11.2}% {:>11.2}%",
        "Cases", s.case_applied, s.case_pending_pct, s.case_approved_pct
    )?;
    writeln!(
        out,
        "{:<18} {:>12.0} {:>11.2}% {:>11.2}%",
        "People", s.people_applied, s.people_pending_pct, s.people_approved_pct
    )?;
    Ok(())
}

fn print_series_table(out: &mut impl Write, columns: &[(&str, &[Point])]) -> std::io::Result<()> {
    if columns.iter().all(|(_, s)| s.is_empty()) {
        return writeln!(out, "No data");
    }

    write!(out, "{:<12}", "Date")?;
    for (name, _) in columns {
        write!(out, " | {:>18}", name)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", "-".repeat(12 + columns.len() * 21))?;

    let dates: BTreeSet<NaiveDate> = columns
        .iter()
        .flat_map(|(_, s)| s.iter().map(|p| p.date))
        .collect();

    for date in dates {
        write!(out, "{:<12}", date.format("%Y-%m-%d"))?;
        for (_, series) in columns {
            let val = value_at(series, date)
                .map(|v| format!("{:.2}", v))
                .unwrap_or_else(|| "-".to_string());
            write!(out, " | {:>18}", val)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn value_at(series: &[Point], date: NaiveDate) -> Option<f64> {
    series
        .binary_search_by_key(&date, |p| p.date)
        .ok()
        .map(|idx| series[idx].value)
}

fn print_candles(out: &mut impl Write, dashboard: &Dashboard) -> std::io::Result<()> {
    writeln!(
        out,
        "Case approval momentum ({} approval days per candle)",
        dashboard.candle_interval_days
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "{:<12} {:>8} {:>8} {:>8} {:>8}",
        "Date", "Open", "High", "Low", "Close"
    )?;
    writeln!(out, "{}", "-".repeat(48))?;

    for c in &dashboard.candles {
        writeln!(
            out,
            "{:<12} {:>8.0} {:>8.0} {:>8.0} {:>8.0}",
            c.date.format("%Y-%m-%d"),
            c.open,
            c.high,
            c.low,
            c.close
        )?;
    }

    for overlay in &dashboard.moving_averages {
        let latest: Option<&Point> = overlay.series.last();
        match latest {
            Some(p) => writeln!(
                out,
                "{} ({}): {:.2} on {}",
                overlay.title, overlay.color, p.value, p.date
            )?,
            None => writeln!(out, "{} ({}): not enough data", overlay.title, overlay.color)?,
        }
    }
    Ok(())
}
