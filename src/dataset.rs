//! Trip records and the per-city dataset they are loaded into.

use std::fs::File;
use std::io::Read;

use chrono::{Datelike, Month, NaiveDateTime, Timelike, Weekday};
use serde::Deserialize;
use tracing::debug;

use crate::config::CityConfig;
use crate::error::{DataError, Result};

pub const START_TIME: &str = "Start Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

static REQUIRED_COLUMNS: &[&str] = &[
    START_TIME,
    TRIP_DURATION,
    START_STATION,
    END_STATION,
    USER_TYPE,
];

/// Lowercase full month name, e.g. `"january"`.
pub fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "january",
        Month::February => "february",
        Month::March => "march",
        Month::April => "april",
        Month::May => "may",
        Month::June => "june",
        Month::July => "july",
        Month::August => "august",
        Month::September => "september",
        Month::October => "october",
        Month::November => "november",
        Month::December => "december",
    }
}

/// Lowercase full weekday name, e.g. `"monday"`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Parses a source start-time string, space- or `T`-separated.
pub fn parse_start_time(value: &str) -> std::result::Result<NaiveDateTime, chrono::ParseError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
}

/// One bikeshare trip.
///
/// `month`, `weekday` and `hour` are derived from `start_time` when the
/// record is built and cannot be set independently.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    index: usize,
    start_time: NaiveDateTime,
    trip_duration: f64,
    start_station: String,
    end_station: String,
    user_type: Option<String>,
    gender: Option<String>,
    birth_year: Option<i32>,
    month: Month,
    weekday: Weekday,
    hour: u32,
}

impl TripRecord {
    pub fn new(
        index: usize,
        start_time: NaiveDateTime,
        trip_duration: f64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
    ) -> Self {
        let month = Month::try_from(start_time.month() as u8).unwrap_or(Month::January);
        TripRecord {
            index,
            start_time,
            trip_duration,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: None,
            gender: None,
            birth_year: None,
            month,
            weekday: start_time.weekday(),
            hour: start_time.hour(),
        }
    }

    pub fn with_user_type(mut self, user_type: impl Into<String>) -> Self {
        self.user_type = Some(user_type.into());
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_birth_year(mut self, birth_year: i32) -> Self {
        self.birth_year = Some(birth_year);
        self
    }

    /// Position of the row in its source file (0-based, header excluded).
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    /// Trip length in seconds.
    pub fn trip_duration(&self) -> f64 {
        self.trip_duration
    }

    pub fn start_station(&self) -> &str {
        &self.start_station
    }

    pub fn end_station(&self) -> &str {
        &self.end_station
    }

    pub fn user_type(&self) -> Option<&str> {
        self.user_type.as_deref()
    }

    pub fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }

    pub fn birth_year(&self) -> Option<i32> {
        self.birth_year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn day_of_week(&self) -> &'static str {
        weekday_name(self.weekday)
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }
}

/// A single row as it appears in the source CSV.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

impl RawTrip {
    fn into_record(self, index: usize) -> Result<TripRecord> {
        let start_time =
            parse_start_time(&self.start_time).map_err(|source| DataError::Timestamp {
                row: index + 1,
                value: self.start_time.clone(),
                source,
            })?;

        let mut record = TripRecord::new(
            index,
            start_time,
            self.trip_duration,
            self.start_station,
            self.end_station,
        );
        if let Some(user_type) = non_blank(self.user_type) {
            record = record.with_user_type(user_type);
        }
        if let Some(gender) = non_blank(self.gender) {
            record = record.with_gender(gender);
        }
        if let Some(year) = self.birth_year.filter(|y| y.is_finite()) {
            record = record.with_birth_year(year.trunc() as i32);
        }
        Ok(record)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// All trips for one city, in source order.
///
/// Optional columns are tracked per dataset: when `has_gender` is false the
/// source had no `Gender` column at all, which differs from a column whose
/// cells happen to be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    city: String,
    records: Vec<TripRecord>,
    has_gender: bool,
    has_birth_year: bool,
}

impl Dataset {
    pub fn new(
        city: impl Into<String>,
        records: Vec<TripRecord>,
        has_gender: bool,
        has_birth_year: bool,
    ) -> Self {
        Dataset {
            city: city.into(),
            records,
            has_gender,
            has_birth_year,
        }
    }

    /// Parses a CSV stream with a header row.
    pub fn from_reader<R: Read>(city: &str, reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let has_column = |name: &str| headers.iter().any(|h| h == name);

        if let Some(missing) = REQUIRED_COLUMNS.iter().find(|&&c| !has_column(c)) {
            return Err(DataError::MissingColumn(missing.to_string()));
        }
        let has_gender = has_column(GENDER);
        let has_birth_year = has_column(BIRTH_YEAR);

        let mut records = Vec::new();
        for (index, result) in rdr.deserialize::<RawTrip>().enumerate() {
            records.push(result?.into_record(index)?);
        }

        debug!(
            city,
            rows = records.len(),
            has_gender,
            has_birth_year,
            "Dataset parsed"
        );

        Ok(Dataset::new(city, records, has_gender, has_birth_year))
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_gender(&self) -> bool {
        self.has_gender
    }

    pub fn has_birth_year(&self) -> bool {
        self.has_birth_year
    }

    /// Same city and columns, different rows.
    pub(crate) fn with_records(&self, records: Vec<TripRecord>) -> Self {
        Dataset {
            city: self.city.clone(),
            records,
            has_gender: self.has_gender,
            has_birth_year: self.has_birth_year,
        }
    }
}

/// Reads the CSV configured for `city` into a [`Dataset`].
///
/// # Errors
///
/// Fails if the city is not configured, the file cannot be opened, a required
/// column is missing, or any start time does not parse.
#[tracing::instrument(skip(config))]
pub fn load(config: &CityConfig, city: &str) -> Result<Dataset> {
    let path = config.resolve(city)?;
    debug!(path = %path.display(), "Opening trip data");

    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Dataset::from_reader(&city.trim().to_lowercase(), file)
}
