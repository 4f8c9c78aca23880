//! The interactive explore loop: pick filters, load, page, summarise, repeat.

use std::io::{BufRead, Write};
use std::time::Instant;

use anyhow::Result;
use tracing::{debug, info};

use crate::analyzers::{duration_stats, station_stats, time_stats, user_stats};
use crate::config::CityConfig;
use crate::dataset::{self, Dataset};
use crate::error;
use crate::filter::{self, DAY_CHOICES, Filters, MONTH_CHOICES};
use crate::output::{self, NO_DATA};
use crate::pager::{PageCursor, next_page};
use crate::prompt::Prompter;

const GREETING: &str = "Hello! Let's explore some US bikeshare data!";
const MONTH_PROMPT: &str = "Which month would you like to filter by? January, February, March, April, May, June or type 'all' if you do not have any preference?";
const DAY_PROMPT: &str = "Are you looking for a particular day? If so, kindly enter the day as follows: Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday or type 'all' if you do not have any preference.";
const RAW_PROMPT: &str = "Do you want to see raw data? Type 'yes' or 'no'.";
const RESTART_PROMPT: &str = "\nWould you like to restart? Enter yes or no.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Again,
    Quit,
}

/// Joins names as "a, b or c".
fn list_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}

pub struct Session<'a, R, W> {
    config: &'a CityConfig,
    prompter: Prompter<R, W>,
    page_size: usize,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(config: &'a CityConfig, input: R, output: W) -> Self {
        Session {
            config,
            prompter: Prompter::new(input, output),
            page_size: crate::pager::DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    /// Runs cycles until the user declines to restart or input ends.
    pub fn run(&mut self) -> Result<()> {
        let mut cycles = 0usize;
        while self.run_cycle()? == Flow::Again {
            cycles += 1;
        }
        info!(restarts = cycles, "Session finished");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    fn run_cycle(&mut self) -> Result<Flow> {
        writeln!(self.prompter.output(), "{GREETING}")?;

        let config = self.config;
        let names: Vec<&str> = config.names().collect();
        let city_choices: Vec<(&str, &str)> = names.iter().map(|n| (*n, *n)).collect();
        let city_prompt = format!(
            "Which city would you like to filter by? {}?",
            list_names(&names)
        );

        let Some(city) = self.prompter.ask(&city_prompt, &city_choices)? else {
            return Ok(Flow::Quit);
        };
        let Some(month) = self.prompter.ask(MONTH_PROMPT, MONTH_CHOICES)? else {
            return Ok(Flow::Quit);
        };
        let Some(day) = self.prompter.ask(DAY_PROMPT, DAY_CHOICES)? else {
            return Ok(Flow::Quit);
        };
        let filters = Filters::new(month, day);

        let dataset = match dataset::load(config, city) {
            Ok(ds) => ds,
            Err(e) => {
                debug!(city, error = %e, "Failed to load city data");
                writeln!(self.prompter.output(), "Error: {e}\n")?;
                return Ok(Flow::Again);
            }
        };
        let dataset = filter::filter(&dataset, filters);
        info!(city, %filters, rows = dataset.len(), "Dataset ready");

        self.show_raw_rows(&dataset)?;

        self.report(
            "Calculating The Most Frequent Times of Travel...",
            || time_stats(&dataset),
            output::write_time_stats,
        )?;
        self.report(
            "Calculating The Most Popular Stations and Trip...",
            || station_stats(&dataset),
            output::write_station_stats,
        )?;
        self.report(
            "Calculating Trip Duration...",
            || duration_stats(&dataset),
            output::write_duration_stats,
        )?;
        self.report(
            "Calculating User Stats...",
            || user_stats(&dataset),
            output::write_user_stats,
        )?;

        if self.prompter.confirm(RESTART_PROMPT)? {
            Ok(Flow::Again)
        } else {
            Ok(Flow::Quit)
        }
    }

    /// Pages through rows while the user keeps saying yes.
    fn show_raw_rows(&mut self, dataset: &Dataset) -> Result<()> {
        let mut cursor = PageCursor::new(self.page_size);
        while self.prompter.confirm(RAW_PROMPT)? {
            let (page, next) = next_page(dataset, cursor);
            output::write_rows(self.prompter.output(), dataset, page)?;
            cursor = next;

            if cursor.is_exhausted(dataset.len()) {
                writeln!(self.prompter.output(), "No more rows to display.")?;
                break;
            }
        }
        Ok(())
    }

    /// Runs one statistic group and prints it with its timing.
    fn report<T>(
        &mut self,
        title: &str,
        compute: impl FnOnce() -> error::Result<T>,
        render: fn(&mut W, &T) -> std::io::Result<()>,
    ) -> Result<()> {
        let out = self.prompter.output();
        writeln!(out, "\n{title}\n")?;

        let started = Instant::now();
        match compute() {
            Ok(stats) => render(out, &stats)?,
            Err(e) if e.is_empty_dataset() => writeln!(out, "{NO_DATA}")?,
            Err(e) => return Err(e.into()),
        }
        writeln!(
            out,
            "\nThis took {:.6} seconds.",
            started.elapsed().as_secs_f64()
        )?;
        writeln!(out, "{}", "-".repeat(40))?;
        Ok(())
    }
}
