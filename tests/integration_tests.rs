use std::io::{self, Cursor, Write};
use std::sync::{Arc, Mutex};

use bikeshare_explorer::analyzers::types::Route;
use bikeshare_explorer::analyzers::{duration_stats, station_stats, time_stats, user_stats};
use bikeshare_explorer::config::CityConfig;
use bikeshare_explorer::dataset::{Dataset, load};
use bikeshare_explorer::error::DataError;
use bikeshare_explorer::filter::{DAY_CHOICES, Filters, MONTH_CHOICES, filter};
use bikeshare_explorer::output::NO_DATA;
use bikeshare_explorer::prompt::RETRY_MESSAGE;
use bikeshare_explorer::session::Session;
use bikeshare_explorer::stats::CitySummary;
use chrono::{Month, Weekday};

fn fixtures() -> CityConfig {
    let json = r#"{
        "chicago": "chicago_sample.csv",
        "washington": "washington_sample.csv",
        "broken": "broken.csv",
        "garbled": "bad_timestamp.csv",
        "nowhere": "does_not_exist.csv"
    }"#;
    CityConfig::from_json(json, concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"))
        .expect("fixture config")
}

fn chicago() -> Dataset {
    load(&fixtures(), "chicago").expect("Failed to load chicago fixture")
}

/// Runs an interactive session over `input` and returns everything it printed.
fn run_session(input: impl AsRef<[u8]>) -> String {
    let config = fixtures();
    let mut session = Session::new(&config, Cursor::new(input.as_ref().to_vec()), Vec::new());
    session.run().expect("session failed");
    String::from_utf8(session.into_output()).unwrap()
}

#[test]
fn test_load_chicago_fixture() {
    let ds = chicago();
    assert_eq!(ds.len(), 10);
    assert_eq!(ds.city(), "chicago");
    assert!(ds.has_gender());
    assert!(ds.has_birth_year());
}

#[test]
fn test_january_filter_returns_three_rows() {
    let ds = filter(&chicago(), Filters::new(Some(Month::January), None));
    assert_eq!(ds.len(), 3);
    assert!(ds.records().iter().all(|r| r.month_name() == "january"));
    let idx: Vec<_> = ds.records().iter().map(|r| r.index()).collect();
    assert_eq!(idx, vec![0, 1, 2]);
}

#[test]
fn test_every_filter_combination_matches() {
    let ds = chicago();
    for &(_, month) in MONTH_CHOICES {
        for &(_, day) in DAY_CHOICES {
            let out = filter(&ds, Filters::new(month, day));
            for r in out.records() {
                assert!(month.is_none_or(|m| r.month() == m));
                assert!(day.is_none_or(|d| r.weekday() == d));
            }
            let expected = ds
                .records()
                .iter()
                .filter(|r| month.is_none_or(|m| r.month() == m))
                .filter(|r| day.is_none_or(|d| r.weekday() == d))
                .count();
            assert_eq!(out.len(), expected);
        }
    }
}

#[test]
fn test_full_pipeline_statistics() {
    let ds = chicago();

    let time = time_stats(&ds).unwrap();
    // january and june tie on 3 trips, monday and tuesday on 3
    assert_eq!(time.month.value, "january");
    assert_eq!(time.day_of_week.value, "monday");
    assert_eq!(time.hour.value, 8);
    assert_eq!(time.hour.count, 5);

    let stations = station_stats(&ds).unwrap();
    assert_eq!(stations.start_station.value, "Clark St & Lake St");
    assert_eq!(stations.end_station.value, "Wells St & Elm St");
    assert_eq!(
        stations.route.value,
        Route {
            start: "Clark St & Lake St".into(),
            end: "Wells St & Elm St".into(),
        }
    );
    assert_eq!(stations.route.count, 4);

    let duration = duration_stats(&ds).unwrap();
    let row_sum: f64 = ds.records().iter().map(|r| r.trip_duration()).sum();
    assert_eq!(duration.total_seconds, row_sum);
    assert_eq!(duration.total_seconds, 9000.0);
    assert!((duration.mean_seconds - row_sum / ds.len() as f64).abs() < 1e-9);

    let users = user_stats(&ds).unwrap();
    assert_eq!(users.user_types[0].value, "Subscriber");
    assert_eq!(users.user_types[0].count, 7);
    let gender = users.gender.unwrap();
    assert_eq!(gender[0].value, "Male");
    assert_eq!(gender[0].count, 5);
    let years = users.birth_year.unwrap();
    assert_eq!(years.earliest, 1962);
    assert_eq!(years.most_recent, 2001);
    assert_eq!(years.most_common.value, 1990);
}

#[test]
fn test_statistics_ignore_row_order() {
    let ds = chicago();
    let mut reversed = ds.records().to_vec();
    reversed.reverse();
    let rev = Dataset::new("chicago", reversed, true, true);

    assert_eq!(time_stats(&ds).unwrap(), time_stats(&rev).unwrap());
    assert_eq!(station_stats(&ds).unwrap(), station_stats(&rev).unwrap());
    assert_eq!(user_stats(&ds).unwrap(), user_stats(&rev).unwrap());
}

#[test]
fn test_washington_has_no_demographics() {
    let ds = load(&fixtures(), "Washington").unwrap();
    assert_eq!(ds.len(), 7);
    let users = user_stats(&ds).unwrap();
    assert!(users.gender.is_none());
    assert!(users.birth_year.is_none());
}

#[test]
fn test_load_errors() {
    let config = fixtures();
    assert!(matches!(
        load(&config, "broken").unwrap_err(),
        DataError::MissingColumn(c) if c == "End Station"
    ));
    assert!(matches!(
        load(&config, "garbled").unwrap_err(),
        DataError::Timestamp { row: 2, .. }
    ));
    assert!(matches!(
        load(&config, "nowhere").unwrap_err(),
        DataError::Io { .. }
    ));
    assert!(matches!(
        load(&config, "boston").unwrap_err(),
        DataError::UnknownCity(_)
    ));
}

#[test]
fn test_empty_selection_summary() {
    let ds = filter(&chicago(), Filters::new(Some(Month::June), Some(Weekday::Sat)));
    assert!(ds.is_empty());
    assert!(time_stats(&ds).unwrap_err().is_empty_dataset());

    let summary = CitySummary::from_dataset(&ds, Filters::default()).unwrap();
    assert_eq!(summary.rows, 0);
}

#[test]
fn test_summary_for_city() {
    let filters = Filters::parse("january", "all").unwrap();
    let summary = CitySummary::for_city(&fixtures(), "chicago", filters).unwrap();
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.month, "january");
}

#[test]
fn test_summary_rejects_invalid_selection() {
    assert!(Filters::parse("july", "all").is_err());
    assert!(Filters::parse("all", "someday").is_err());
    assert!(matches!(
        CitySummary::for_city(&fixtures(), "boston", Filters::default()).unwrap_err(),
        DataError::UnknownCity(_)
    ));
}

#[test]
fn test_session_january() {
    let out = run_session("chicago\njanuary\nall\nno\nno\n");

    assert!(out.contains("Hello! Let's explore some US bikeshare data!"));
    assert!(out.contains("Most Common Month: january (3 trips)"));
    assert!(out.contains("Total Travel Time: 0.02 Days"));
    assert!(out.contains("Mean Travel Time: 10.00 Minutes"));
    assert!(out.contains("Gender Types:"));
    assert!(out.contains("Most Common Year of Birth:"));
    assert_eq!(out.matches("This took").count(), 4);
    assert!(out.contains("Would you like to restart?"));
}

#[test]
fn test_session_pager_runs_out_of_rows() {
    let out = run_session("washington\nall\nall\nyes\nyes\nno\n");

    assert_eq!(out.matches("Do you want to see raw data?").count(), 2);
    assert!(out.contains("No more rows to display."));
    // both pages were printed: first and last rows of the fixture
    assert!(out.contains("2017-03-01 07:00:00"));
    assert!(out.contains("2017-06-07 08:00:00"));
    assert!(!out.contains("Gender"));
}

#[test]
fn test_session_pager_declined_after_first_page() {
    let out = run_session("washington\nall\nall\nyes\nno\nno\n");

    assert_eq!(out.matches("Do you want to see raw data?").count(), 2);
    assert!(out.contains("2017-04-05 18:00:00"));
    assert!(!out.contains("2017-05-06 07:05:00"));
    assert!(!out.contains("No more rows to display."));
}

#[test]
fn test_session_empty_selection_reports_no_data() {
    let out = run_session("chicago\njune\nsaturday\nno\nno\n");
    assert_eq!(out.matches(NO_DATA).count(), 4);
}

#[test]
fn test_session_reprompts_invalid_answers() {
    let out = run_session("boston\nChicago\nJuly\nAll\nfunday\nMONDAY\nno\nno\n");

    assert_eq!(out.matches(RETRY_MESSAGE).count(), 3);
    assert!(out.contains("Most Common Day: monday"));
}

#[test]
fn test_session_reprompts_after_invalid_utf8() {
    let out = run_session(b"\xff\xfe\nchicago\nall\nall\nno\nno\n");

    assert_eq!(out.matches(RETRY_MESSAGE).count(), 1);
    assert!(out.contains("Most Common Hour: 8 (5 trips)"));
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_load_error_shown_once() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(move || writer.clone())
        .finish();

    let input = "nowhere\nall\nall\nno\n";
    let out = tracing::subscriber::with_default(subscriber, || run_session(input));

    assert_eq!(out.matches("Error:").count(), 1);
    assert!(logs.0.lock().unwrap().is_empty());
}

#[test]
fn test_session_recovers_from_load_error() {
    let out = run_session("broken\nall\nall\nchicago\nall\nall\nno\nno\n");

    assert!(out.contains("Error: missing required column: End Station"));
    assert_eq!(out.matches("Hello!").count(), 2);
    assert!(out.contains("Most Common Hour: 8 (5 trips)"));
}

#[test]
fn test_session_restart() {
    let out = run_session("washington\nall\nall\nno\nyes\nchicago\nall\nall\nno\nno\n");

    assert_eq!(out.matches("Hello!").count(), 2);
    assert_eq!(out.matches("Would you like to restart?").count(), 2);
    assert_eq!(out.matches("This took").count(), 8);
}

#[test]
fn test_session_ends_on_eof() {
    let out = run_session("chicago\n");
    assert!(!out.contains("This took"));
}
