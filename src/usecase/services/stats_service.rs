use std::collections::BTreeMap;

use crate::domain::entities::dataset::Dataset;
use crate::domain::entities::registry::Registry;
use crate::domain::entities::report::{
    BirthYearStats, Distribution, DurationStats, StationStats, TimeStats, UserStats,
};
use crate::domain::error::BikeshareError;

#[derive(Debug, Clone, Copy)]
struct Slot {
    count: u64,
    first_seen: usize,
}

#[derive(Debug, Clone)]
pub struct Tally<K> {
    slots: BTreeMap<K, Slot>,
    seen: usize,
}

impl<K: Ord> Default for Tally<K> {
    fn default() -> Self {
        Self {
            slots: BTreeMap::new(),
            seen: 0,
        }
    }
}

impl<K: Ord> FromIterator<K> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tally = Tally::default();
        for key in iter {
            tally.add(key);
        }
        tally
    }
}

impl<K: Ord> Tally<K> {
    pub fn add(&mut self, key: K) {
        let position = self.seen;
        self.seen += 1;
        self.slots
            .entry(key)
            .or_insert(Slot {
                count: 0,
                first_seen: position,
            })
            .count += 1;
    }

    /// Most frequent key; ties go to the smallest key.
    pub fn mode(&self) -> Option<&K> {
        let mut best: Option<(&K, u64)> = None;
        for (key, slot) in &self.slots {
            if best.map_or(true, |(_, count)| slot.count > count) {
                best = Some((key, slot.count));
            }
        }
        best.map(|(key, _)| key)
    }

    /// Most frequent key; ties go to the key seen first during the scan.
    pub fn mode_first_seen(&self) -> Option<&K> {
        self.slots
            .iter()
            .min_by(|(_, a), (_, b)| b.count.cmp(&a.count).then(a.first_seen.cmp(&b.first_seen)))
            .map(|(key, _)| key)
    }

    pub fn bounds(&self) -> Option<(&K, &K)> {
        let min = self.slots.keys().next()?;
        let max = self.slots.keys().next_back()?;
        Some((min, max))
    }

    pub fn distribution(&self) -> Vec<(&K, u64)> {
        let mut entries: Vec<(&K, u64)> = self
            .slots
            .iter()
            .map(|(key, slot)| (key, slot.count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

fn ensure_rows(table: &Dataset, statistic: &'static str) -> Result<(), BikeshareError> {
    if table.is_empty() {
        Err(BikeshareError::InsufficientData { statistic })
    } else {
        Ok(())
    }
}

fn insufficient(statistic: &'static str) -> BikeshareError {
    BikeshareError::InsufficientData { statistic }
}

pub fn compute_time_stats(
    table: &Dataset,
    registry: &Registry,
) -> Result<TimeStats, BikeshareError> {
    const STATISTIC: &str = "time of travel statistics";
    ensure_rows(table, STATISTIC)?;

    let records = table.records();
    let months: Tally<u32> = records.iter().map(|r| r.month()).collect();
    let days: Tally<u32> = records
        .iter()
        .map(|r| registry.weekday_code(r.weekday()))
        .collect();
    let hours: Tally<u32> = records.iter().map(|r| r.hour()).collect();

    let month = *months.mode().ok_or_else(|| insufficient(STATISTIC))?;
    let day = *days.mode().ok_or_else(|| insufficient(STATISTIC))?;
    let hour = *hours.mode().ok_or_else(|| insufficient(STATISTIC))?;

    Ok(TimeStats {
        month,
        month_name: registry.month_name(month)?,
        weekday: registry.weekday(day)?,
        weekday_name: registry.day_name(day)?,
        hour,
    })
}

/// Most popular start station, end station, and start/end pair.
///
/// The pair is counted as a unit, so it can differ from combining the two
/// single-column modes.
pub fn compute_station_stats(table: &Dataset) -> Result<StationStats, BikeshareError> {
    const STATISTIC: &str = "station statistics";
    ensure_rows(table, STATISTIC)?;

    let records = table.records();
    let starts: Tally<&str> = records.iter().map(|r| r.start_station.as_str()).collect();
    let ends: Tally<&str> = records.iter().map(|r| r.end_station.as_str()).collect();
    let trips: Tally<(&str, &str)> = records
        .iter()
        .map(|r| (r.start_station.as_str(), r.end_station.as_str()))
        .collect();

    let start_station = starts.mode().ok_or_else(|| insufficient(STATISTIC))?;
    let end_station = ends.mode().ok_or_else(|| insufficient(STATISTIC))?;
    let (trip_start, trip_end) = trips
        .mode_first_seen()
        .ok_or_else(|| insufficient(STATISTIC))?;

    Ok(StationStats {
        start_station: start_station.to_string(),
        end_station: end_station.to_string(),
        trip: (trip_start.to_string(), trip_end.to_string()),
    })
}

pub fn compute_duration_stats(table: &Dataset) -> Result<DurationStats, BikeshareError> {
    ensure_rows(table, "trip duration statistics")?;

    let total_millis = table
        .records()
        .iter()
        .try_fold(0_u64, |sum, r| sum.checked_add(r.duration.as_millis()))
        .ok_or_else(|| BikeshareError::DataSourceFormat {
            city: table.city(),
            reason: "total trip duration overflows".to_string(),
        })?;
    let total_secs = total_millis / 1000;
    let trip_count = table.len() as u64;

    Ok(DurationStats {
        trip_count,
        total_secs,
        mean_secs: total_secs / trip_count,
    })
}

pub fn compute_user_stats(table: &Dataset) -> Result<UserStats, BikeshareError> {
    ensure_rows(table, "user statistics")?;

    let records = table.records();
    let user_types: Tally<&str> = records
        .iter()
        .map(|r| r.user_type.as_str())
        .filter(|value| !value.is_empty())
        .collect();

    let genders = table.has_gender().then(|| {
        let tally: Tally<&str> = records.iter().filter_map(|r| r.gender.as_deref()).collect();
        owned_distribution(&tally)
    });

    let birth_years = if table.has_birth_year() {
        let tally: Tally<i32> = records.iter().filter_map(|r| r.birth_year).collect();
        match (tally.bounds(), tally.mode()) {
            (Some((earliest, latest)), Some(most_common)) => Some(BirthYearStats {
                earliest: *earliest,
                latest: *latest,
                most_common: *most_common,
            }),
            _ => None,
        }
    } else {
        None
    };

    Ok(UserStats {
        user_types: owned_distribution(&user_types),
        genders,
        birth_years,
    })
}

fn owned_distribution(tally: &Tally<&str>) -> Distribution {
    tally
        .distribution()
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_mode_prefers_smallest_key_on_ties() {
        let tally: Tally<u32> = [17, 8, 17, 8, 3].into_iter().collect();

        assert_eq!(tally.mode(), Some(&8));
        assert_eq!(tally.bounds(), Some((&3, &17)));
    }

    #[test]
    fn tally_first_seen_mode_follows_scan_order() {
        let tally: Tally<&str> = ["b", "a", "a", "b", "c"].into_iter().collect();

        assert_eq!(tally.mode_first_seen(), Some(&"b"));
        assert_eq!(tally.mode(), Some(&"a"));
    }

    #[test]
    fn tally_distribution_orders_by_count_then_key() {
        let tally: Tally<&str> = ["x", "y", "y", "z", "x", "y", "w"].into_iter().collect();

        let counts: Vec<(&str, u64)> = tally
            .distribution()
            .into_iter()
            .map(|(key, count)| (*key, count))
            .collect();

        assert_eq!(counts, vec![("y", 3), ("x", 2), ("w", 1), ("z", 1)]);
    }

    #[test]
    fn empty_tally_has_no_mode() {
        let tally: Tally<u32> = Tally::default();

        assert_eq!(tally.mode(), None);
        assert_eq!(tally.mode_first_seen(), None);
        assert_eq!(tally.bounds(), None);
    }
}
