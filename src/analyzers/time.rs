use crate::analyzers::ensure_rows;
use crate::analyzers::types::{Ranked, TimeStats};
use crate::analyzers::utility::mode;
use crate::dataset::Dataset;
use crate::error::{DataError, Result};

/// Most common month, day of week and start hour.
///
/// Months are compared in calendar order and weekdays Monday-first, so ties
/// resolve to the earlier one.
pub fn time_stats(dataset: &Dataset) -> Result<TimeStats> {
    ensure_rows(dataset)?;
    let records = dataset.records();

    let ((_, month), month_count) = mode(
        records
            .iter()
            .map(|r| (r.month().number_from_month(), r.month_name())),
    )
    .ok_or(DataError::EmptyDataset)?;

    let ((_, day), day_count) = mode(
        records
            .iter()
            .map(|r| (r.weekday().num_days_from_monday(), r.day_of_week())),
    )
    .ok_or(DataError::EmptyDataset)?;

    let hour = mode(records.iter().map(|r| r.hour())).ok_or(DataError::EmptyDataset)?;

    Ok(TimeStats {
        month: Ranked::from((month, month_count)),
        day_of_week: Ranked::from((day, day_count)),
        hour: hour.into(),
    })
}
