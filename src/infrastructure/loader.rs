use crate::domain::{errors::LoadError, models::SalesData};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Reads a JSON dataset. A top-level `null` yields `None`.
pub fn read_sales_data(reader: impl Read) -> Result<Option<SalesData>, LoadError> {
    let data: Option<SalesData> = serde_json::from_reader(reader)?;
    Ok(data)
}

/// Reads a JSON dataset from `path`, or from stdin when `path` is `None` or `-`.
pub fn load_sales_data(path: Option<&Path>) -> Result<Option<SalesData>, LoadError> {
    match path {
        Some(path) if path != Path::new("-") => {
            tracing::info!("Loading sales data from {}", path.display());
            read_sales_data(BufReader::new(File::open(path)?))
        }
        _ => {
            tracing::info!("Loading sales data from stdin");
            read_sales_data(io::stdin().lock())
        }
    }
}
