use crate::analyzers::ensure_rows;
use crate::analyzers::types::DurationStats;
use crate::analyzers::utility::mean;
use crate::dataset::Dataset;
use crate::error::Result;

/// Total and mean trip duration.
pub fn duration_stats(dataset: &Dataset) -> Result<DurationStats> {
    ensure_rows(dataset)?;

    let durations: Vec<f64> = dataset.records().iter().map(|r| r.trip_duration()).collect();

    Ok(DurationStats {
        trips: durations.len(),
        total_seconds: durations.iter().sum(),
        mean_seconds: mean(&durations),
    })
}
