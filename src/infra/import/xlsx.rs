use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Reader};

use crate::domain::entities::dataset::RawTable;
use crate::domain::entities::registry::City;
use crate::domain::error::BikeshareError;

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => cell
            .as_datetime()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| v.to_string()),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

pub fn read_xlsx_table(city: City, xlsx_path: &Path) -> Result<RawTable, BikeshareError> {
    let format_error = |reason: String| BikeshareError::DataSourceFormat { city, reason };

    let mut workbook = open_workbook_auto(xlsx_path)
        .map_err(|err| format_error(format!("failed to open xlsx {}: {err}", xlsx_path.display())))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| format_error("workbook has no worksheets".to_string()))?
        .map_err(|err| format_error(format!("failed to read first worksheet: {err}")))?;

    let mut rows = range.rows();
    let columns: Vec<String> = rows
        .next()
        .map(|header| header.iter().map(|cell| cell_to_string(cell).trim().to_string()).collect())
        .unwrap_or_default();

    if columns.iter().all(|name| name.is_empty()) {
        return Err(format_error("xlsx header row is required".to_string()));
    }

    let rows: Vec<Vec<String>> = rows
        .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|row| {
            (0..columns.len())
                .map(|col_idx| row.get(col_idx).map(cell_to_string).unwrap_or_default())
                .collect()
        })
        .collect();

    Ok(RawTable {
        city,
        columns,
        rows,
    })
}
