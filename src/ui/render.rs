use std::io::{self, Write};

use crate::domain::entities::dataset::{OptionalColumns, TripRecord};
use crate::domain::entities::registry::Registry;
use crate::domain::entities::report::{
    Distribution, DurationStats, StationStats, TimeStats, UserStats,
};

pub fn write_time_stats(out: &mut impl Write, stats: &TimeStats) -> io::Result<()> {
    writeln!(out, "The most common month: {}", stats.month_name)?;
    writeln!(out, "The most common day: {}", stats.weekday_name)?;
    writeln!(out, "The most common start hour: {} (24-hour format)", stats.hour)
}

pub fn write_station_stats(out: &mut impl Write, stats: &StationStats) -> io::Result<()> {
    writeln!(out, "The most common start station: {}", stats.start_station)?;
    writeln!(out, "The most common end station: {}", stats.end_station)?;
    writeln!(
        out,
        "The most frequent combination of start station and end station trip: \nFrom '{}' to '{}'",
        stats.trip.0, stats.trip.1
    )
}

pub fn write_duration_stats(out: &mut impl Write, stats: &DurationStats) -> io::Result<()> {
    writeln!(out, "number of trips: {}", stats.trip_count)?;
    writeln!(out, "total travel time: {}s ({})", stats.total_secs, stats.total())?;
    writeln!(out, "mean travel time: {}s ({})", stats.mean_secs, stats.mean())
}

pub fn write_user_stats(out: &mut impl Write, stats: &UserStats) -> io::Result<()> {
    write_distribution(out, "User Type", &stats.user_types)?;
    writeln!(out)?;

    match &stats.genders {
        Some(genders) => {
            write_distribution(out, "Gender", genders)?;
            writeln!(out)?;
        }
        None => writeln!(out, "No gender information is provided for this city.\n")?,
    }

    match &stats.birth_years {
        Some(years) => {
            writeln!(out, "Earliest year of birth: {}", years.earliest)?;
            writeln!(out, "Most recent year of birth: {}", years.latest)?;
            writeln!(out, "Most common year of birth: {}", years.most_common)
        }
        None => writeln!(out, "No birth information is provided for this city."),
    }
}

fn write_distribution(out: &mut impl Write, label: &str, values: &Distribution) -> io::Result<()> {
    let width = values
        .iter()
        .map(|(value, _)| value.chars().count())
        .max()
        .unwrap_or(0)
        .max(label.len());

    writeln!(out, "{label}")?;
    for (value, count) in values {
        writeln!(out, "{value:<width$}  {count}")?;
    }
    Ok(())
}

pub fn write_rows(
    out: &mut impl Write,
    registry: &Registry,
    columns: OptionalColumns,
    first_row: usize,
    rows: &[TripRecord],
) -> io::Result<()> {
    for (offset, record) in rows.iter().enumerate() {
        if offset > 0 {
            writeln!(out)?;
        }
        writeln!(out, "[{}]", first_row + offset)?;
        writeln!(out, "  Start Time     {}", record.start_time().format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(out, "  End Time       {}", record.end_time)?;
        writeln!(out, "  Trip Duration  {}", record.duration)?;
        writeln!(out, "  Start Station  {}", record.start_station)?;
        writeln!(out, "  End Station    {}", record.end_station)?;
        writeln!(out, "  User Type      {}", record.user_type)?;
        if columns.gender {
            writeln!(out, "  Gender         {}", record.gender.as_deref().unwrap_or(""))?;
        }
        if columns.birth_year {
            let year = record.birth_year.map(|y| y.to_string()).unwrap_or_default();
            writeln!(out, "  Birth Year     {year}")?;
        }
        writeln!(
            out,
            "  month {}  day {}  hour {}",
            record.month(),
            registry.weekday_name(record.weekday()).unwrap_or("?"),
            record.hour()
        )?;
    }
    Ok(())
}
