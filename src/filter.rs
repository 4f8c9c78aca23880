//! Month and day-of-week filtering over a [`Dataset`].

use std::fmt;

use chrono::{Month, Weekday};
use tracing::debug;

use crate::dataset::{Dataset, month_name, weekday_name};
use crate::prompt::{InvalidInput, parse_choice};

/// Accepted month answers. Only the first half of the year is offered.
pub static MONTH_CHOICES: &[(&str, Option<Month>)] = &[
    ("january", Some(Month::January)),
    ("february", Some(Month::February)),
    ("march", Some(Month::March)),
    ("april", Some(Month::April)),
    ("may", Some(Month::May)),
    ("june", Some(Month::June)),
    ("all", None),
];

/// Accepted day answers.
pub static DAY_CHOICES: &[(&str, Option<Weekday>)] = &[
    ("sunday", Some(Weekday::Sun)),
    ("monday", Some(Weekday::Mon)),
    ("tuesday", Some(Weekday::Tue)),
    ("wednesday", Some(Weekday::Wed)),
    ("thursday", Some(Weekday::Thu)),
    ("friday", Some(Weekday::Fri)),
    ("saturday", Some(Weekday::Sat)),
    ("all", None),
];

/// Month/day selection; `None` means no filter on that field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Filters {
    pub month: Option<Month>,
    pub day: Option<Weekday>,
}

impl Filters {
    pub fn new(month: Option<Month>, day: Option<Weekday>) -> Self {
        Filters { month, day }
    }

    /// Builds filters from month and day answers, each checked against its
    /// choice table.
    pub fn parse(month: &str, day: &str) -> Result<Self, InvalidInput> {
        Ok(Filters {
            month: parse_choice(month, MONTH_CHOICES)?,
            day: parse_choice(day, DAY_CHOICES)?,
        })
    }

    pub fn month_label(&self) -> &'static str {
        self.month.map(month_name).unwrap_or("all")
    }

    pub fn day_label(&self) -> &'static str {
        self.day.map(weekday_name).unwrap_or("all")
    }

    pub fn is_unfiltered(&self) -> bool {
        self.month.is_none() && self.day.is_none()
    }
}

impl fmt::Display for Filters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "month={}, day={}", self.month_label(), self.day_label())
    }
}

/// Returns the rows matching `filters`, in their original order.
///
/// The input is left untouched; with no filters the result equals the input.
pub fn filter(dataset: &Dataset, filters: Filters) -> Dataset {
    if filters.is_unfiltered() {
        return dataset.clone();
    }

    let records = dataset
        .records()
        .iter()
        .filter(|r| filters.month.is_none_or(|m| r.month() == m))
        .filter(|r| filters.day.is_none_or(|d| r.weekday() == d))
        .cloned()
        .collect::<Vec<_>>();

    debug!(
        city = dataset.city(),
        %filters,
        before = dataset.len(),
        after = records.len(),
        "Dataset filtered"
    );

    dataset.with_records(records)
}
