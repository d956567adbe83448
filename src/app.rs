use std::fmt::Display;
use std::io::{BufRead, Write};
use std::time::Instant;

use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::domain::entities::dataset::{Dataset, FilterSpec};
use crate::domain::entities::registry::Registry;
use crate::domain::error::BikeshareError;
use crate::ui::prompt::Console;
use crate::ui::render::{
    write_duration_stats, write_rows, write_station_stats, write_time_stats, write_user_stats,
};
use crate::ui::state::app_state::RoundState;
use crate::usecase::services::load_service::LoadService;
use crate::usecase::services::stats_service::{
    compute_duration_stats, compute_station_stats, compute_time_stats, compute_user_stats,
};

const CITY_PROMPT: &str =
    "Hint: 1 for Chicago, 2 for New York City, and 3 for Washington.\nEnter the code for the city: ";
const MONTH_PROMPT: &str = "Enter a month number between 1 and 6, or type 0 for all months: ";
const DAY_PROMPT: &str = "Hint: 1 for Monday, 2 for Tuesday, and so on. Enter 0 to select all days.\nEnter a number for the day of the week: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct App<'a, R, W> {
    console: Console<R, W>,
    registry: &'a Registry,
    loader: LoadService,
    config: AppConfig,
}

impl<'a, R: BufRead, W: Write> App<'a, R, W> {
    pub fn new(
        console: Console<R, W>,
        registry: &'a Registry,
        loader: LoadService,
        config: AppConfig,
    ) -> Self {
        Self {
            console,
            registry,
            loader,
            config,
        }
    }

    #[allow(dead_code)]
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            self.console.rule()?;
            if self.run_round()? == Flow::Quit {
                break;
            }

            let Some(restart) = self
                .console
                .ask("\nWould you like to restart? Enter yes or no.\n")?
            else {
                break;
            };
            if !restart.eq_ignore_ascii_case("yes") {
                break;
            }
        }
        Ok(())
    }

    fn run_round(&mut self) -> Result<Flow> {
        let Some(filter) = self.get_filters()? else {
            return Ok(Flow::Quit);
        };

        let started = Instant::now();
        let dataset = match self.loader.load(&filter) {
            Ok(dataset) => dataset,
            Err(err) => {
                tracing::warn!(city = %filter.city, %err, "failed to load trip data");
                self.console.say(&format!("Could not load the data: {err}"))?;
                return Ok(Flow::Continue);
            }
        };
        tracing::info!(
            city = %filter.city,
            rows = dataset.len(),
            elapsed = ?started.elapsed(),
            "loaded trip data"
        );

        if dataset.is_empty() {
            self.console
                .say("No trips match the selected month and day.")?;
        }

        self.show_statistics(&dataset)?;

        let mut round = RoundState::new(filter, dataset, self.config.page_size);
        self.view_raw_data(&mut round)
    }

    fn get_filters(&mut self) -> Result<Option<FilterSpec>> {
        let registry = self.registry;
        self.console
            .say("Hello! Let's explore some US bikeshare data!\n")?;

        let Some(city) = self.console.ask_until(
            CITY_PROMPT,
            "Code not found, please enter again.\n",
            |input| registry.parse_city(input),
        )?
        else {
            return Ok(None);
        };
        self.console.say(&format!("You've chosen the city {city}.\n"))?;

        let Some(month) = self.console.ask_until(
            MONTH_PROMPT,
            "Invalid input, please enter again.\n",
            |input| registry.parse_month(input),
        )?
        else {
            return Ok(None);
        };
        self.console.say(&format!(
            "You've chosen {}.\n",
            registry.month_selector_name(month)
        ))?;

        let Some(day) = self.console.ask_until(
            DAY_PROMPT,
            "Invalid input, please enter again.\n",
            |input| registry.parse_day(input),
        )?
        else {
            return Ok(None);
        };
        self.console.say(&format!(
            "You've chosen {}.\n",
            registry.day_selector_name(day)
        ))?;

        self.console.rule()?;
        Ok(Some(FilterSpec::new(city, month, day)))
    }

    fn show_statistics(&mut self, dataset: &Dataset) -> Result<()> {
        let registry = self.registry;

        self.timed(
            "Calculating The Most Frequent Times of Travel...",
            || compute_time_stats(dataset, registry),
            |out, stats| write_time_stats(out, stats),
        )?;
        self.timed(
            "Calculating The Most Popular Stations and Trip...",
            || compute_station_stats(dataset),
            |out, stats| write_station_stats(out, stats),
        )?;
        self.timed(
            "Calculating Trip Duration...",
            || compute_duration_stats(dataset),
            |out, stats| write_duration_stats(out, stats),
        )?;
        self.timed(
            "Calculating User Stats...",
            || compute_user_stats(dataset),
            |out, stats| write_user_stats(out, stats),
        )
    }

    fn timed<T>(
        &mut self,
        heading: &str,
        compute: impl FnOnce() -> Result<T, BikeshareError>,
        render: impl FnOnce(&mut W, &T) -> std::io::Result<()>,
    ) -> Result<()> {
        self.console.say(&format!("\n{heading}\n"))?;
        let started = Instant::now();

        match compute() {
            Ok(stats) => render(self.console.out(), &stats).context("failed to write report")?,
            Err(err) => {
                tracing::debug!(%err, "statistic skipped");
                self.console.say(&capitalize(&err))?;
            }
        }

        let elapsed = started.elapsed();
        self.console
            .say(&format!("\nThis took {} seconds.", elapsed.as_secs_f64()))?;
        self.console.rule()
    }

    fn view_raw_data(&mut self, round: &mut RoundState) -> Result<Flow> {
        let Some(mut wanted) = self.console.ask_yes_no(&format!(
            "\nWould you like to view the first {} rows of raw data? Enter yes or no.\n",
            self.config.page_size
        ))?
        else {
            return Ok(Flow::Quit);
        };

        while wanted {
            if !round.has_more_rows() {
                self.console.say("There are no more rows to display.")?;
                break;
            }

            let first_row = round.position();
            let columns = round.dataset.optional_columns();
            self.console.rule()?;
            let rows = round.next_page();
            write_rows(self.console.out(), self.registry, columns, first_row, rows)
                .context("failed to write rows")?;
            self.console.rule()?;
            tracing::debug!(city = %round.filter.city, shown = round.position(), "displayed raw rows");

            if !round.has_more_rows() {
                self.console.say("That was the last row.")?;
                break;
            }

            let Some(next) = self.console.ask_yes_no(&format!(
                "\nWould you like to view the next {} rows of raw data? Enter yes or no.\n",
                self.config.page_size
            ))?
            else {
                return Ok(Flow::Quit);
            };
            wanted = next;
        }

        Ok(Flow::Continue)
    }
}

fn capitalize(message: &impl Display) -> String {
    let text = message.to_string();
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => text,
    }
}
