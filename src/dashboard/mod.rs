//! Dashboard output
//!
//! - **pipeline**: the fixed derivation pipeline and its `Dashboard` result
//! - **summary**: stat card figures and the pending-vs-approved series
//! - **milestones**: dated timeline annotations

pub mod milestones;
pub mod pipeline;
pub mod summary;

pub use milestones::{default_milestones, visible_milestones, Milestone};
pub use pipeline::{
    approval_momentum, default_moving_averages, moving_average_overlays,
    progress_since_first_application, Dashboard, DashboardOptions, MovingAverage,
    MovingAverageSpec, SeriesName,
};
pub use summary::{pending_vs_approved, percentage, Progress, Summary};
