use std::sync::Arc;

use crate::domain::entities::dataset::{
    parse_birth_year, parse_start_time, Dataset, FilterSpec, OptionalColumns, RawTable,
    TripColumns, TripDuration, TripRecord, BIRTH_YEAR, TRIP_DURATION,
};
use crate::domain::entities::registry::City;
use crate::domain::error::BikeshareError;
use crate::usecase::ports::source::TripSource;

pub struct LoadService {
    source: Arc<dyn TripSource>,
}

impl LoadService {
    pub fn new(source: Arc<dyn TripSource>) -> Self {
        Self { source }
    }

    pub fn load_raw(&self, city: City) -> Result<RawTable, BikeshareError> {
        let table = self.source.load(city)?;
        TripColumns::locate(&table)?;
        Ok(table)
    }

    pub fn load(&self, spec: &FilterSpec) -> Result<Dataset, BikeshareError> {
        let table = self.load_raw(spec.city)?;
        let dataset = derive_fields(table)?;
        Ok(apply_filter(dataset, spec))
    }
}

pub fn derive_fields(table: RawTable) -> Result<Dataset, BikeshareError> {
    let columns = TripColumns::locate(&table)?;
    let city = table.city;

    let mut records = Vec::with_capacity(table.rows.len());
    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_no = row_idx + 1;

        let raw_start = cell(row, columns.start_time);
        let start_time =
            parse_start_time(raw_start).ok_or_else(|| BikeshareError::TimestampParse {
                city,
                row: row_no,
                value: raw_start.to_string(),
            })?;

        let raw_duration = cell(row, columns.trip_duration);
        let duration = TripDuration::parse(raw_duration)
            .ok_or_else(|| BikeshareError::bad_cell(city, TRIP_DURATION, row_no, raw_duration))?;

        let gender = columns
            .gender
            .map(|idx| cell(row, idx).trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        let birth_year = match columns.birth_year {
            Some(idx) => {
                let raw = cell(row, idx);
                parse_birth_year(raw)
                    .map_err(|_| BikeshareError::bad_cell(city, BIRTH_YEAR, row_no, raw))?
            }
            None => None,
        };

        let record = TripRecord::new(
            start_time,
            cell(row, columns.start_station),
            cell(row, columns.end_station),
            duration,
            cell(row, columns.user_type).trim(),
        )
        .with_end_time(columns.end_time.map(|idx| cell(row, idx).trim()).unwrap_or(""))
        .with_gender(gender)
        .with_birth_year(birth_year);

        records.push(record);
    }

    let optional = OptionalColumns {
        gender: columns.gender.is_some(),
        birth_year: columns.birth_year.is_some(),
    };
    Ok(Dataset::new(city, optional, records))
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

pub fn apply_filter(table: Dataset, spec: &FilterSpec) -> Dataset {
    if spec.is_unfiltered() {
        return table;
    }

    let city = table.city();
    let optional = table.optional_columns();
    let records = table
        .records()
        .iter()
        .filter(|record| spec.matches(record))
        .cloned()
        .collect();
    Dataset::new(city, optional, records)
}
