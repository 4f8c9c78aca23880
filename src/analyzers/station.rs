use crate::analyzers::ensure_rows;
use crate::analyzers::types::{Route, StationStats};
use crate::analyzers::utility::mode;
use crate::dataset::Dataset;
use crate::error::{DataError, Result};

/// Most used start station, end station and start/end combination.
///
/// The route is found by grouping trips on the (start, end) pair and taking
/// the largest group. Ties go to the lexicographically smallest name or pair.
pub fn station_stats(dataset: &Dataset) -> Result<StationStats> {
    ensure_rows(dataset)?;
    let records = dataset.records();

    let (start, start_count) =
        mode(records.iter().map(|r| r.start_station())).ok_or(DataError::EmptyDataset)?;
    let (end, end_count) =
        mode(records.iter().map(|r| r.end_station())).ok_or(DataError::EmptyDataset)?;
    let ((from, to), route_count) = mode(
        records
            .iter()
            .map(|r| (r.start_station(), r.end_station())),
    )
    .ok_or(DataError::EmptyDataset)?;

    Ok(StationStats {
        start_station: (start.to_string(), start_count).into(),
        end_station: (end.to_string(), end_count).into(),
        route: (
            Route {
                start: from.to_string(),
                end: to.to_string(),
            },
            route_count,
        )
            .into(),
    })
}
