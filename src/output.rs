//! Output formatting for trip statistics.
//!
//! Supports plain-text reports, raw row listings, and JSON serialization.

use std::io::{self, Write};

use anyhow::Result;
use tracing::debug;

use crate::analyzers::types::{DurationStats, Ranked, StationStats, TimeStats, UserStats};
use crate::dataset::{Dataset, TripRecord};
use crate::stats::CitySummary;

pub const NO_DATA: &str = "No data available for the selected filters.";

pub fn write_time_stats<W: Write>(w: &mut W, stats: &TimeStats) -> io::Result<()> {
    writeln!(w, "Most Common Month: {} ({} trips)", stats.month.value, stats.month.count)?;
    writeln!(
        w,
        "Most Common Day: {} ({} trips)",
        stats.day_of_week.value, stats.day_of_week.count
    )?;
    writeln!(w, "Most Common Hour: {} ({} trips)", stats.hour.value, stats.hour.count)
}

pub fn write_station_stats<W: Write>(w: &mut W, stats: &StationStats) -> io::Result<()> {
    writeln!(
        w,
        "Most Commonly Used Start Station: {} ({} trips)",
        stats.start_station.value, stats.start_station.count
    )?;
    writeln!(
        w,
        "Most Commonly Used End Station: {} ({} trips)",
        stats.end_station.value, stats.end_station.count
    )?;
    writeln!(
        w,
        "Most Common Trip: {} -> {} ({} trips)",
        stats.route.value.start, stats.route.value.end, stats.route.count
    )
}

pub fn write_duration_stats<W: Write>(w: &mut W, stats: &DurationStats) -> io::Result<()> {
    writeln!(w, "Total Travel Time: {:.2} Days", stats.total_days())?;
    writeln!(w, "Mean Travel Time: {:.2} Minutes", stats.mean_minutes())
}

fn write_counts<W: Write>(w: &mut W, title: &str, counts: &[Ranked<String>]) -> io::Result<()> {
    writeln!(w, "{title}:")?;
    if counts.is_empty() {
        writeln!(w, "  (no values recorded)")?;
    }
    for Ranked { value, count } in counts {
        writeln!(w, "  {value}: {count}")?;
    }
    Ok(())
}

pub fn write_user_stats<W: Write>(w: &mut W, stats: &UserStats) -> io::Result<()> {
    write_counts(w, "User Types", &stats.user_types)?;
    if let Some(gender) = &stats.gender {
        write_counts(w, "Gender Types", gender)?;
    }
    if let Some(years) = &stats.birth_year {
        writeln!(w, "Earliest Year of Birth: {}", years.earliest)?;
        writeln!(w, "Most Recent Year of Birth: {}", years.most_recent)?;
        writeln!(w, "Most Common Year of Birth: {}", years.most_common.value)?;
    }
    Ok(())
}

/// Lists raw rows, with the optional columns the dataset actually has.
pub fn write_rows<W: Write>(w: &mut W, dataset: &Dataset, rows: &[TripRecord]) -> io::Result<()> {
    let mut header = format!(
        "{:>7}  {:<19}  {:>13}  {}  ->  {}  {}",
        "", "Start Time", "Trip Duration", "Start Station", "End Station", "User Type"
    );
    if dataset.has_gender() {
        header.push_str("  Gender");
    }
    if dataset.has_birth_year() {
        header.push_str("  Birth Year");
    }
    writeln!(w, "{header}")?;

    for r in rows {
        let mut line = format!(
            "{:>7}  {:<19}  {:>13}  {}  ->  {}  {}",
            r.index(),
            r.start_time().format("%Y-%m-%d %H:%M:%S").to_string(),
            r.trip_duration(),
            r.start_station(),
            r.end_station(),
            r.user_type().unwrap_or("-"),
        );
        if dataset.has_gender() {
            line.push_str("  ");
            line.push_str(r.gender().unwrap_or("-"));
        }
        if dataset.has_birth_year() {
            match r.birth_year() {
                Some(year) => line.push_str(&format!("  {year}")),
                None => line.push_str("  -"),
            }
        }
        writeln!(w, "{line}")?;
    }
    Ok(())
}

/// Writes every group of `summary` as text. Groups without data get a notice.
pub fn write_summary<W: Write>(w: &mut W, summary: &CitySummary) -> io::Result<()> {
    writeln!(
        w,
        "{} (month={}, day={}): {} trips",
        summary.city, summary.month, summary.day, summary.rows
    )?;

    write_section(w, "Most Frequent Times of Travel", summary.time.as_ref(), write_time_stats)?;
    write_section(
        w,
        "Most Popular Stations and Trip",
        summary.stations.as_ref(),
        write_station_stats,
    )?;
    write_section(w, "Trip Duration", summary.duration.as_ref(), write_duration_stats)?;
    write_section(w, "User Stats", summary.users.as_ref(), write_user_stats)
}

fn write_section<W: Write, T>(
    w: &mut W,
    title: &str,
    stats: Option<&T>,
    render: fn(&mut W, &T) -> io::Result<()>,
) -> io::Result<()> {
    writeln!(w, "\n{title}")?;
    match stats {
        Some(stats) => render(w, stats),
        None => writeln!(w, "{NO_DATA}"),
    }
}

/// Logs a summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &CitySummary) {
    debug!("{:#?}", summary);
}

/// Writes a summary as pretty-printed JSON.
pub fn write_json<W: Write>(w: &mut W, summary: &CitySummary) -> Result<()> {
    serde_json::to_writer_pretty(&mut *w, summary)?;
    writeln!(w)?;
    Ok(())
}
