//! Descriptive statistics over a (possibly filtered) [`Dataset`].
//!
//! Each group is computed independently and read-only. Every group fails with
//! [`DataError::EmptyDataset`] on a dataset without rows, so callers can say
//! "no data" instead of reporting a made-up mode.
//!
//! [`Dataset`]: crate::dataset::Dataset
//! [`DataError::EmptyDataset`]: crate::error::DataError::EmptyDataset

pub mod duration;
pub mod station;
pub mod time;
pub mod types;
pub mod user;
pub mod utility;

pub use duration::duration_stats;
pub use station::station_stats;
pub use time::time_stats;
pub use user::user_stats;

use crate::dataset::Dataset;
use crate::error::{DataError, Result};

fn ensure_rows(dataset: &Dataset) -> Result<()> {
    if dataset.is_empty() {
        Err(DataError::EmptyDataset)
    } else {
        Ok(())
    }
}
