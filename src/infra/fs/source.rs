use std::path::PathBuf;

use crate::domain::entities::dataset::RawTable;
use crate::domain::entities::registry::City;
use crate::domain::error::BikeshareError;
use crate::infra::import::csv::read_csv_table;
use crate::infra::import::xlsx::read_xlsx_table;
use crate::usecase::ports::source::TripSource;

const EXTENSIONS: &[&str] = &["csv", "xlsx"];

pub struct FsTripSource {
    pub data_dir: PathBuf,
}

impl FsTripSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn resolve(&self, city: City) -> Option<PathBuf> {
        EXTENSIONS
            .iter()
            .map(|ext| self.data_dir.join(format!("{}.{ext}", city.file_stem())))
            .find(|path| path.is_file())
    }
}

impl TripSource for FsTripSource {
    fn load(&self, city: City) -> Result<RawTable, BikeshareError> {
        let path = self
            .resolve(city)
            .ok_or_else(|| BikeshareError::DataSourceNotFound {
                city,
                path: self.data_dir.join(format!("{}.csv", city.file_stem())),
            })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("xlsx") => read_xlsx_table(city, &path),
            _ => read_csv_table(city, &path),
        }
    }
}
