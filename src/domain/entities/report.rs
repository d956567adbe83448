use std::fmt;

use chrono::Weekday;

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeStats {
    pub month: u32,
    pub month_name: &'static str,
    pub weekday: Weekday,
    pub weekday_name: &'static str,
    pub hour: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub start_station: String,
    pub end_station: String,
    pub trip: (String, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationStats {
    pub trip_count: u64,
    pub total_secs: u64,
    /// `total_secs / trip_count`, floored
    pub mean_secs: u64,
}

impl DurationStats {
    pub fn total(&self) -> ElapsedTime {
        ElapsedTime::from_secs(self.total_secs)
    }

    pub fn mean(&self) -> ElapsedTime {
        ElapsedTime::from_secs(self.mean_secs)
    }
}

pub type Distribution = Vec<(String, u64)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub latest: i32,
    pub most_common: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub user_types: Distribution,
    pub genders: Option<Distribution>,
    pub birth_years: Option<BirthYearStats>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedTime {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl ElapsedTime {
    pub fn from_secs(secs: u64) -> Self {
        Self {
            days: secs / 86_400,
            hours: secs % 86_400 / 3_600,
            minutes: secs % 3_600 / 60,
            seconds: secs % 60,
        }
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.days {
            0 => {}
            1 => write!(f, "1 day, ")?,
            days => write!(f, "{days} days, ")?,
        }
        write!(f, "{}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_time_breaks_down_seconds() {
        let elapsed = ElapsedTime::from_secs(2 * 86_400 + 3 * 3_600 + 4 * 60 + 5);

        assert_eq!(
            elapsed,
            ElapsedTime {
                days: 2,
                hours: 3,
                minutes: 4,
                seconds: 5
            }
        );
        assert_eq!(elapsed.to_string(), "2 days, 3:04:05");
        assert_eq!(ElapsedTime::from_secs(65).to_string(), "0:01:05");
        assert_eq!(ElapsedTime::from_secs(86_400).to_string(), "1 day, 0:00:00");
    }
}
