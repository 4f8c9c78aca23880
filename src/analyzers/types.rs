//! Report types produced by the statistic groups.

use serde::Serialize;

/// A value together with how many trips had it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ranked<T> {
    pub value: T,
    pub count: usize,
}

impl<T> From<(T, usize)> for Ranked<T> {
    fn from((value, count): (T, usize)) -> Self {
        Ranked { value, count }
    }
}

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    pub month: Ranked<&'static str>,
    pub day_of_week: Ranked<&'static str>,
    pub hour: Ranked<u32>,
}

/// A start/end station pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Route {
    pub start: String,
    pub end: String,
}

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub start_station: Ranked<String>,
    pub end_station: Ranked<String>,
    pub route: Ranked<Route>,
}

/// Total and average trip duration, kept in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub trips: usize,
    pub total_seconds: f64,
    pub mean_seconds: f64,
}

impl DurationStats {
    pub fn total_days(&self) -> f64 {
        self.total_seconds / 86_400.0
    }

    pub fn mean_minutes(&self) -> f64 {
        self.mean_seconds / 60.0
    }
}

/// Earliest, most recent and most common birth year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: Ranked<i32>,
}

/// Demographics. `gender` and `birth_year` are `None` when the source has
/// no such column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<Ranked<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Vec<Ranked<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<BirthYearStats>,
}
