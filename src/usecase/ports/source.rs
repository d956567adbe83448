use crate::domain::entities::dataset::RawTable;
use crate::domain::entities::registry::City;
use crate::domain::error::BikeshareError;

/// Backing store of per-city trip tables.
///
/// Implementations read the whole table in one blocking call and do not
/// retry. A missing table is `DataSourceNotFound`; a table that cannot be
/// read as rows and columns is `DataSourceFormat`.
pub trait TripSource {
    fn load(&self, city: City) -> Result<RawTable, BikeshareError>;
}

#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    tables: Vec<RawTable>,
}

#[allow(dead_code)]
impl InMemorySource {
    pub fn new(tables: Vec<RawTable>) -> Self {
        Self { tables }
    }
}

impl TripSource for InMemorySource {
    fn load(&self, city: City) -> Result<RawTable, BikeshareError> {
        self.tables
            .iter()
            .find(|table| table.city == city)
            .cloned()
            .ok_or_else(|| BikeshareError::DataSourceNotFound {
                city,
                path: format!("memory:{}", city.file_stem()).into(),
            })
    }
}
