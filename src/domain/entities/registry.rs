use std::fmt;

use chrono::Weekday;

use crate::domain::error::BikeshareError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub fn file_stem(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new_york_city",
            City::Washington => "washington",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthSelector {
    All,
    Month(u32),
}

impl MonthSelector {
    pub fn matches(self, month: u32) -> bool {
        match self {
            MonthSelector::All => true,
            MonthSelector::Month(selected) => selected == month,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySelector {
    All,
    Day(Weekday),
}

impl DaySelector {
    pub fn matches(self, weekday: Weekday) -> bool {
        match self {
            DaySelector::All => true,
            DaySelector::Day(selected) => selected == weekday,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    City,
    Month,
    Day,
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CodeKind::City => "city",
            CodeKind::Month => "month",
            CodeKind::Day => "day",
        };
        f.write_str(name)
    }
}

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const CITY_TABLE: &[(u32, &str, City)] = &[
    (1, "chicago", City::Chicago),
    (2, "new york city", City::NewYorkCity),
    (3, "washington", City::Washington),
];

const MONTH_TABLE: &[(u32, &str)] = &[
    (0, "all"),
    (1, "January"),
    (2, "February"),
    (3, "March"),
    (4, "April"),
    (5, "May"),
    (6, "June"),
];

const DAY_TABLE: &[(u32, &str)] = &[
    (0, "all"),
    (1, "monday"),
    (2, "tuesday"),
    (3, "wednesday"),
    (4, "thursday"),
    (5, "friday"),
    (6, "saturday"),
    (7, "sunday"),
];

/// Code/name tables for cities, months and weekdays.
#[derive(Debug, Clone)]
pub struct Registry {
    cities: &'static [(u32, &'static str, City)],
    months: &'static [(u32, &'static str)],
    days: &'static [(u32, &'static str)],
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            cities: CITY_TABLE,
            months: MONTH_TABLE,
            days: DAY_TABLE,
        }
    }

    pub fn city(&self, code: u32) -> Result<City, BikeshareError> {
        self.cities
            .iter()
            .find(|(c, _, _)| *c == code)
            .map(|(_, _, city)| *city)
            .ok_or_else(|| invalid(CodeKind::City, code))
    }

    #[allow(dead_code)]
    pub fn city_name(&self, code: u32) -> Result<&'static str, BikeshareError> {
        self.cities
            .iter()
            .find(|(c, _, _)| *c == code)
            .map(|(_, name, _)| *name)
            .ok_or_else(|| invalid(CodeKind::City, code))
    }

    #[allow(dead_code)]
    pub fn city_code(&self, name: &str) -> Result<u32, BikeshareError> {
        self.cities
            .iter()
            .find(|(_, n, _)| n.eq_ignore_ascii_case(name.trim()))
            .map(|(code, _, _)| *code)
            .ok_or_else(|| invalid_text(CodeKind::City, name))
    }

    pub fn month_name(&self, code: u32) -> Result<&'static str, BikeshareError> {
        lookup_name(self.months, CodeKind::Month, code)
    }

    #[allow(dead_code)]
    pub fn month_code(&self, name: &str) -> Result<u32, BikeshareError> {
        lookup_code(self.months, CodeKind::Month, name)
    }

    pub fn month_selector(&self, code: u32) -> Result<MonthSelector, BikeshareError> {
        self.month_name(code)?;
        Ok(match code {
            0 => MonthSelector::All,
            month => MonthSelector::Month(month),
        })
    }

    pub fn day_name(&self, code: u32) -> Result<&'static str, BikeshareError> {
        lookup_name(self.days, CodeKind::Day, code)
    }

    #[allow(dead_code)]
    pub fn day_code(&self, name: &str) -> Result<u32, BikeshareError> {
        lookup_code(self.days, CodeKind::Day, name)
    }

    pub fn day_selector(&self, code: u32) -> Result<DaySelector, BikeshareError> {
        self.day_name(code)?;
        match code {
            0 => Ok(DaySelector::All),
            day => self.weekday(day).map(DaySelector::Day),
        }
    }

    pub fn weekday(&self, code: u32) -> Result<Weekday, BikeshareError> {
        code.checked_sub(1)
            .and_then(|idx| WEEKDAYS.get(idx as usize))
            .copied()
            .ok_or_else(|| invalid(CodeKind::Day, code))
    }

    pub fn weekday_code(&self, weekday: Weekday) -> u32 {
        weekday.number_from_monday()
    }

    pub fn weekday_name(&self, weekday: Weekday) -> Result<&'static str, BikeshareError> {
        self.day_name(self.weekday_code(weekday))
    }

    pub fn parse_city(&self, input: &str) -> Result<City, BikeshareError> {
        let code = parse_code(CodeKind::City, input)?;
        self.city(code)
    }

    pub fn parse_month(&self, input: &str) -> Result<MonthSelector, BikeshareError> {
        let code = parse_code(CodeKind::Month, input)?;
        self.month_selector(code)
    }

    pub fn parse_day(&self, input: &str) -> Result<DaySelector, BikeshareError> {
        let code = parse_code(CodeKind::Day, input)?;
        self.day_selector(code)
    }

    pub fn month_selector_name(&self, selector: MonthSelector) -> &'static str {
        match selector {
            MonthSelector::All => "all",
            MonthSelector::Month(month) => self.month_name(month).unwrap_or("unknown"),
        }
    }

    pub fn day_selector_name(&self, selector: DaySelector) -> &'static str {
        match selector {
            DaySelector::All => "all",
            DaySelector::Day(weekday) => self.weekday_name(weekday).unwrap_or("unknown"),
        }
    }
}

fn lookup_name(
    table: &'static [(u32, &'static str)],
    kind: CodeKind,
    code: u32,
) -> Result<&'static str, BikeshareError> {
    table
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .ok_or_else(|| invalid(kind, code))
}

fn lookup_code(
    table: &'static [(u32, &'static str)],
    kind: CodeKind,
    name: &str,
) -> Result<u32, BikeshareError> {
    table
        .iter()
        .find(|(_, n)| n.eq_ignore_ascii_case(name.trim()))
        .map(|(code, _)| *code)
        .ok_or_else(|| invalid_text(kind, name))
}

/// Strict decimal parse; signs, blanks and anything past `u32` are rejected.
fn parse_code(kind: CodeKind, input: &str) -> Result<u32, BikeshareError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_text(kind, input));
    }
    trimmed.parse::<u32>().map_err(|_| invalid_text(kind, input))
}

fn invalid(kind: CodeKind, code: u32) -> BikeshareError {
    BikeshareError::InvalidCode {
        kind,
        input: code.to_string(),
    }
}

fn invalid_text(kind: CodeKind, input: &str) -> BikeshareError {
    BikeshareError::InvalidCode {
        kind,
        input: input.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_names_round_trip_for_every_table() {
        let registry = Registry::new();
        for code in 1..=3 {
            let name = registry.city_name(code).expect("city code should exist");
            assert_eq!(registry.city_code(name).expect("city name should exist"), code);
        }
        for code in 0..=6 {
            let name = registry.month_name(code).expect("month code should exist");
            assert_eq!(registry.month_code(name).expect("month name should exist"), code);
        }
        for code in 0..=7 {
            let name = registry.day_name(code).expect("day code should exist");
            assert_eq!(registry.day_code(name).expect("day name should exist"), code);
        }
    }

    #[test]
    fn out_of_domain_codes_are_rejected() {
        let registry = Registry::new();

        assert!(matches!(
            registry.city(4),
            Err(BikeshareError::InvalidCode { kind: CodeKind::City, .. })
        ));
        assert!(matches!(
            registry.month_selector(7),
            Err(BikeshareError::InvalidCode { kind: CodeKind::Month, .. })
        ));
        assert!(matches!(
            registry.day_selector(8),
            Err(BikeshareError::InvalidCode { kind: CodeKind::Day, .. })
        ));
        assert!(registry.month_code("July").is_err());
    }

    #[test]
    fn day_codes_map_to_monday_first_weekdays() {
        let registry = Registry::new();

        assert_eq!(registry.day_selector(1).ok(), Some(DaySelector::Day(Weekday::Mon)));
        assert_eq!(registry.day_selector(7).ok(), Some(DaySelector::Day(Weekday::Sun)));
        assert_eq!(registry.day_selector(0).ok(), Some(DaySelector::All));
        assert_eq!(registry.weekday_code(Weekday::Mon), 1);
        assert_eq!(registry.weekday_name(Weekday::Wed).ok(), Some("wednesday"));
    }

    #[test]
    fn parse_rejects_non_integer_input() {
        let registry = Registry::new();

        for input in ["", "  ", "1.0", "-1", "+2", "two", "__import__('os')", "99999999999"] {
            let err = registry.parse_city(input).expect_err("input should be rejected");
            assert!(
                matches!(err, BikeshareError::InvalidCode { kind: CodeKind::City, .. }),
                "unexpected error for {input:?}: {err:?}"
            );
        }

        assert_eq!(registry.parse_city(" 2 \n").ok(), Some(City::NewYorkCity));
        assert_eq!(registry.parse_month("0").ok(), Some(MonthSelector::All));
        assert_eq!(registry.parse_month("6").ok(), Some(MonthSelector::Month(6)));
    }
}
