use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use super::model::{Category, Manufacturer, Registration, RegistrationDataset, RegistrationRow};
use super::DATE_FORMAT;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a registration file could not be loaded. Row numbers are 1-based
/// and count data rows only (the header is not row 1).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("row {row}: malformed CSV record: {source}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("row {row}: '{value}' is not a YYYY-MM-DD date")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}: unknown manufacturer '{value}'")]
    UnknownManufacturer { row: usize, value: String },

    #[error("row {row}: unknown category '{value}'")]
    UnknownCategory { row: usize, value: String },

    #[error("row {row}: {manufacturer} is {expected}, but the file says {found}")]
    CategoryMismatch {
        row: usize,
        manufacturer: Manufacturer,
        expected: Category,
        found: Category,
    },

    #[error("row {row}: registrations must be a non-negative count, got {value}")]
    InvalidCount { row: usize, value: i64 },

    #[error("file contains no data rows")]
    Empty,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a registration CSV with the header
/// `Date,Manufacturer,Category,Registrations`.
pub fn load_file(path: &Path) -> Result<RegistrationDataset, LoadError> {
    let reader = csv::Reader::from_path(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = load_records(reader)?;
    log::info!(
        "Loaded {} registration rows from {}",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

/// Same as [`load_file`] but from any reader.
pub fn load_reader<R: Read>(rdr: R) -> Result<RegistrationDataset, LoadError> {
    load_records(csv::Reader::from_reader(rdr))
}

fn load_records<R: Read>(mut reader: csv::Reader<R>) -> Result<RegistrationDataset, LoadError> {
    let mut records = Vec::new();

    for (idx, result) in reader.deserialize::<RegistrationRow>().enumerate() {
        let row = idx + 1;
        let raw = result.map_err(|source| LoadError::Csv { row, source })?;
        records.push(parse_row(row, raw)?);
    }

    if records.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(RegistrationDataset::from_records(records))
}

fn parse_row(row: usize, raw: RegistrationRow) -> Result<Registration, LoadError> {
    let date = NaiveDate::parse_from_str(raw.date.trim(), DATE_FORMAT).map_err(|_| {
        LoadError::InvalidDate {
            row,
            value: raw.date.clone(),
        }
    })?;

    let manufacturer: Manufacturer =
        raw.manufacturer
            .parse()
            .map_err(|value| LoadError::UnknownManufacturer { row, value })?;

    let found: Category = raw
        .category
        .parse()
        .map_err(|value| LoadError::UnknownCategory { row, value })?;
    let expected = manufacturer.category();
    if found != expected {
        return Err(LoadError::CategoryMismatch {
            row,
            manufacturer,
            expected,
            found,
        });
    }

    let registrations = u32::try_from(raw.registrations).map_err(|_| LoadError::InvalidCount {
        row,
        value: raw.registrations,
    })?;

    Ok(Registration::new(date, manufacturer, registrations))
}
