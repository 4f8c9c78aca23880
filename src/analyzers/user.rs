use crate::analyzers::ensure_rows;
use crate::analyzers::types::{BirthYearStats, Ranked, UserStats};
use crate::analyzers::utility::{mode, value_counts};
use crate::dataset::Dataset;
use crate::error::Result;

fn ranked_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<Ranked<String>> {
    value_counts(values)
        .into_iter()
        .map(|(v, c)| Ranked::from((v.to_string(), c)))
        .collect()
}

/// User type counts, plus gender counts and birth year figures for cities
/// that record them.
///
/// Empty cells are skipped. A birth year column with no values at all yields
/// no birth year report.
pub fn user_stats(dataset: &Dataset) -> Result<UserStats> {
    ensure_rows(dataset)?;
    let records = dataset.records();

    let user_types = ranked_counts(records.iter().filter_map(|r| r.user_type()));

    let gender = dataset
        .has_gender()
        .then(|| ranked_counts(records.iter().filter_map(|r| r.gender())));

    let birth_year = if dataset.has_birth_year() {
        let years: Vec<i32> = records.iter().filter_map(|r| r.birth_year()).collect();
        match (
            years.iter().min(),
            years.iter().max(),
            mode(years.iter().copied()),
        ) {
            (Some(&earliest), Some(&most_recent), Some(most_common)) => Some(BirthYearStats {
                earliest,
                most_recent,
                most_common: most_common.into(),
            }),
            _ => None,
        }
    } else {
        None
    };

    Ok(UserStats {
        user_types,
        gender,
        birth_year,
    })
}
