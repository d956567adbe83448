use std::path::Path;

use csv::ReaderBuilder;

use crate::domain::entities::dataset::RawTable;
use crate::domain::entities::registry::City;
use crate::domain::error::BikeshareError;

pub fn read_csv_table(city: City, csv_path: &Path) -> Result<RawTable, BikeshareError> {
    let format_error = |reason: String| BikeshareError::DataSourceFormat { city, reason };

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(csv_path)
        .map_err(|err| format_error(format!("failed to open csv {}: {err}", csv_path.display())))?;
    let headers = reader
        .headers()
        .map_err(|err| format_error(format!("failed to read csv headers: {err}")))?
        .clone();

    if headers.is_empty() {
        return Err(format_error("csv header is required".to_string()));
    }

    let columns: Vec<String> = headers.iter().map(|name| name.trim().to_string()).collect();
    let header_len = columns.len();

    let mut rows = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record = record
            .map_err(|err| format_error(format!("failed to parse csv row {}: {err}", row_idx + 1)))?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let row = (0..header_len)
            .map(|col_idx| record.get(col_idx).unwrap_or("").to_string())
            .collect();
        rows.push(row);
    }

    Ok(RawTable {
        city,
        columns,
        rows,
    })
}
