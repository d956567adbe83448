use std::path::PathBuf;

use thiserror::Error;

use crate::domain::entities::registry::{City, CodeKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BikeshareError {
    #[error("invalid {kind} code: {input:?}")]
    InvalidCode { kind: CodeKind, input: String },

    #[error("no trip data for {city} under {}", .path.display())]
    DataSourceNotFound { city: City, path: PathBuf },

    #[error("trip data for {city} is malformed: {reason}")]
    DataSourceFormat { city: City, reason: String },

    /// `row` counts the non-blank data rows from 1, header excluded. Blank lines
    /// in the source are skipped by the readers and do not advance it.
    #[error("{city}: row {row} has an unparsable start time {value:?}")]
    TimestampParse {
        city: City,
        row: usize,
        value: String,
    },

    #[error("cannot compute {statistic}: the filtered data has no trips")]
    InsufficientData { statistic: &'static str },
}

impl BikeshareError {
    pub fn missing_column(city: City, column: &str) -> Self {
        BikeshareError::DataSourceFormat {
            city,
            reason: format!("required column {column:?} is missing"),
        }
    }

    pub fn bad_cell(city: City, column: &str, row: usize, value: &str) -> Self {
        BikeshareError::DataSourceFormat {
            city,
            reason: format!("column {column:?} row {row} has an unparsable value {value:?}"),
        }
    }
}
