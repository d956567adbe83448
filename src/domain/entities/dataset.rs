use std::fmt;
use std::num::ParseIntError;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use crate::domain::entities::registry::{City, DaySelector, MonthSelector};
use crate::domain::error::BikeshareError;

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub city: City,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripColumns {
    pub start_time: usize,
    pub end_time: Option<usize>,
    pub trip_duration: usize,
    pub start_station: usize,
    pub end_station: usize,
    pub user_type: usize,
    pub gender: Option<usize>,
    pub birth_year: Option<usize>,
}

impl TripColumns {
    pub fn locate(table: &RawTable) -> Result<Self, BikeshareError> {
        let find = |name: &str| table.columns.iter().position(|c| c.trim() == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| BikeshareError::missing_column(table.city, name))
        };

        Ok(Self {
            start_time: require(START_TIME)?,
            end_time: find(END_TIME),
            trip_duration: require(TRIP_DURATION)?,
            start_station: require(START_STATION)?,
            end_station: require(END_STATION)?,
            user_type: require(USER_TYPE)?,
            gender: find(GENDER),
            birth_year: find(BIRTH_YEAR),
        })
    }
}

pub fn parse_start_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Trip length held as whole milliseconds so that sums stay exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct TripDuration {
    millis: u64,
}

impl TripDuration {
    #[allow(dead_code)]
    pub fn from_secs(secs: u64) -> Self {
        Self {
            millis: secs * 1000,
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    pub fn as_millis(self) -> u64 {
        self.millis
    }

    /// Parses "1039", "1039.0" or "1371.5"; digits past milliseconds are dropped.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let (whole, fraction) = match value.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (value, ""),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let secs = whole.parse::<u64>().ok()?;
        let mut millis = 0_u64;
        for (idx, digit) in fraction.bytes().take(3).enumerate() {
            millis += u64::from(digit - b'0') * 10_u64.pow(2 - idx as u32);
        }
        secs.checked_mul(1000)?
            .checked_add(millis)
            .map(Self::from_millis)
    }
}

impl fmt::Display for TripDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (secs, millis) = (self.millis / 1000, self.millis % 1000);
        if millis == 0 {
            return write!(f, "{secs}");
        }
        let fraction = format!("{millis:03}");
        write!(f, "{secs}.{}", fraction.trim_end_matches('0'))
    }
}

/// Accepts "1992" and the float rendering "1992.0"; blank cells are `Ok(None)`.
pub fn parse_birth_year(value: &str) -> Result<Option<i32>, ParseIntError> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    let digits = match value.split_once('.') {
        Some((whole, fraction)) if !fraction.is_empty() && fraction.bytes().all(|b| b == b'0') => {
            whole
        }
        _ => value,
    };
    digits.parse::<i32>().map(Some)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRecord {
    start_time: NaiveDateTime,
    month: u32,
    weekday: Weekday,
    hour: u32,
    pub end_time: String,
    pub start_station: String,
    pub end_station: String,
    pub duration: TripDuration,
    pub user_type: String,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
}

impl TripRecord {
    pub fn new(
        start_time: NaiveDateTime,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        duration: TripDuration,
        user_type: impl Into<String>,
    ) -> Self {
        Self {
            start_time,
            month: start_time.month(),
            weekday: start_time.weekday(),
            hour: start_time.hour(),
            end_time: String::new(),
            start_station: start_station.into(),
            end_station: end_station.into(),
            duration,
            user_type: user_type.into(),
            gender: None,
            birth_year: None,
        }
    }

    pub fn with_end_time(mut self, end_time: impl Into<String>) -> Self {
        self.end_time = end_time.into();
        self
    }

    pub fn with_gender(mut self, gender: Option<String>) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_birth_year(mut self, birth_year: Option<i32>) -> Self {
        self.birth_year = birth_year;
        self
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OptionalColumns {
    pub gender: bool,
    pub birth_year: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    city: City,
    columns: OptionalColumns,
    records: Vec<TripRecord>,
}

impl Dataset {
    pub fn new(city: City, columns: OptionalColumns, records: Vec<TripRecord>) -> Self {
        Self {
            city,
            columns,
            records,
        }
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn has_gender(&self) -> bool {
        self.columns.gender
    }

    pub fn has_birth_year(&self) -> bool {
        self.columns.birth_year
    }

    pub fn optional_columns(&self) -> OptionalColumns {
        self.columns
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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub city: City,
    pub month: MonthSelector,
    pub day: DaySelector,
}

impl FilterSpec {
    pub fn new(city: City, month: MonthSelector, day: DaySelector) -> Self {
        Self { city, month, day }
    }

    #[allow(dead_code)]
    pub fn unfiltered(city: City) -> Self {
        Self::new(city, MonthSelector::All, DaySelector::All)
    }

    pub fn is_unfiltered(&self) -> bool {
        self.month == MonthSelector::All && self.day == DaySelector::All
    }

    pub fn matches(&self, record: &TripRecord) -> bool {
        self.month.matches(record.month()) && self.day.matches(record.weekday())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_parse_keeps_milliseconds_exact() {
        assert_eq!(TripDuration::parse("1039"), Some(TripDuration::from_secs(1039)));
        assert_eq!(TripDuration::parse("1039.0"), Some(TripDuration::from_secs(1039)));
        assert_eq!(TripDuration::parse(" 1371.5 "), Some(TripDuration::from_millis(1_371_500)));
        assert_eq!(TripDuration::parse("0.1239"), Some(TripDuration::from_millis(123)));
        assert_eq!(TripDuration::parse("-5"), None);
        assert_eq!(TripDuration::parse(""), None);
        assert_eq!(TripDuration::parse("12s"), None);
        assert_eq!(TripDuration::parse(".5"), None);
        assert_eq!(TripDuration::from_millis(1_371_500).to_string(), "1371.5");
        assert_eq!(TripDuration::from_secs(60).to_string(), "60");
    }

    #[test]
    fn birth_year_accepts_float_rendering() {
        assert_eq!(parse_birth_year("1992"), Ok(Some(1992)));
        assert_eq!(parse_birth_year("1992.0"), Ok(Some(1992)));
        assert_eq!(parse_birth_year(""), Ok(None));
        assert!(parse_birth_year("1992.5").is_err());
        assert!(parse_birth_year("unknown").is_err());
    }

    #[test]
    fn derived_fields_follow_start_time() {
        let start = parse_start_time("2017-06-19 23:59:01").expect("timestamp should parse");
        let record = TripRecord::new(start, "A", "B", TripDuration::from_secs(60), "Subscriber");

        assert_eq!(record.month(), 6);
        assert_eq!(record.weekday(), Weekday::Mon);
        assert_eq!(record.hour(), 23);
    }

    #[test]
    fn start_time_accepts_common_renderings() {
        for value in [
            "2017-01-01 00:07:57",
            "2017-01-01T00:07:57",
            "2017-01-01 00:07:57.123",
            "2017-01-01 00:07",
        ] {
            assert!(parse_start_time(value).is_some(), "{value} should parse");
        }
        assert!(parse_start_time("01/01/2017 00:07").is_none());
        assert!(parse_start_time("not a date").is_none());
    }
}
