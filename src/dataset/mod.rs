//! Daily processing records
//!
//! - **types**: `DailyRecord`, `Field` and the sorted `Dataset`
//! - **error**: Error types
//!
//! The data file is a JSON array with one object per calendar day:
//!
//! ```text
//! [{ "time": "2021-12-01", "aply": 10, "aply_people": 25,
//!    "appr": 2, "appr_people": 5, "decl": 0 }, ...]
//! ```
//!
//! Rows may arrive in any order; [`Dataset`] sorts them once, ascending by
//! date, and rejects duplicate dates.

pub mod error;
pub mod types;

pub use error::{DatasetError, DatasetResult};
pub use types::{DailyRecord, Dataset, Field};
