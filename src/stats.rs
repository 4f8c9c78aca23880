use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analyzers::types::{DurationStats, StationStats, TimeStats, UserStats};
use crate::analyzers::{duration_stats, station_stats, time_stats, user_stats};
use crate::config::CityConfig;
use crate::dataset::{self, Dataset};
use crate::error::{DataError, Result};
use crate::filter::{self, Filters};

/// All statistic groups for one city and filter selection.
///
/// A group is `None` when the filtered dataset has no rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitySummary {
    pub generated_at: DateTime<Utc>,
    pub city: String,
    pub month: &'static str,
    pub day: &'static str,
    pub rows: usize,
    pub time: Option<TimeStats>,
    pub stations: Option<StationStats>,
    pub duration: Option<DurationStats>,
    pub users: Option<UserStats>,
}

/// Turns the empty-dataset error into `None`, keeping every other error.
fn optional<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(DataError::EmptyDataset) => Ok(None),
        Err(e) => Err(e),
    }
}

impl CitySummary {
    /// Computes every group over an already filtered `dataset`.
    pub fn from_dataset(dataset: &Dataset, filters: Filters) -> Result<Self> {
        Ok(CitySummary {
            generated_at: Utc::now(),
            city: dataset.city().to_string(),
            month: filters.month_label(),
            day: filters.day_label(),
            rows: dataset.len(),
            time: optional(time_stats(dataset))?,
            stations: optional(station_stats(dataset))?,
            duration: optional(duration_stats(dataset))?,
            users: optional(user_stats(dataset))?,
        })
    }

    /// Loads `city`, applies `filters` and computes every group.
    pub fn for_city(config: &CityConfig, city: &str, filters: Filters) -> Result<Self> {
        let dataset = dataset::load(config, city)?;
        let dataset = filter::filter(&dataset, filters);
        Self::from_dataset(&dataset, filters)
    }
}
