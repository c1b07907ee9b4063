use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::num::ParseFloatError;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use super::types::Household;

/// Amounts in the input table are in thousands.
pub const AMOUNT_SCALE: f64 = 1000.0;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("row {row}: could not read CSV record")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("row {row}: missing {field} column")]
    MissingField { row: usize, field: &'static str },

    #[error("row {row}: {field} '{value}' is not a number")]
    Malformed {
        row: usize,
        field: &'static str,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("row {row}: {field} must be a finite non-negative amount, got {value}")]
    InvalidValue {
        row: usize,
        field: &'static str,
        value: f64,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("household '{0}' not found")]
    NotFound(String),

    #[error("household id '{id}' appears {count} times")]
    Duplicate { id: String, count: usize },
}

/// Parse an amount in thousands, ignoring any whitespace inside it.
pub fn parse_amount(raw: &str) -> Result<f64, ParseFloatError> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(compact.parse::<f64>()? * AMOUNT_SCALE)
}

fn amount_field(
    record: &csv::StringRecord,
    index: usize,
    field: &'static str,
    row: usize,
) -> Result<f64, DatasetError> {
    let raw = record
        .get(index)
        .ok_or(DatasetError::MissingField { row, field })?;

    let value = parse_amount(raw).map_err(|source| DatasetError::Malformed {
        row,
        field,
        value: raw.to_string(),
        source,
    })?;

    if !value.is_finite() || value < 0.0 {
        return Err(DatasetError::InvalidValue { row, field, value });
    }
    Ok(value)
}

/// Read households from CSV with columns `id, income, debt`.
///
/// The first row is a header and is skipped. Income and debt are scaled by
/// [`AMOUNT_SCALE`]. Empty lines are skipped; any other bad row, including
/// one with empty fields, aborts the read.
pub fn read_households<R: Read>(input: R) -> Result<Vec<Household>, DatasetError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let mut households = Vec::new();
    let mut last_row = 1;
    for result in reader.records() {
        let record = result.map_err(|source| DatasetError::Csv {
            row: source
                .position()
                .map_or(last_row + 1, |p| p.line() as usize),
            source,
        })?;
        // Physical line in the file; empty lines are skipped by the reader
        let row = record
            .position()
            .map_or(last_row + 1, |p| p.line() as usize);
        last_row = row;

        let id = record
            .get(0)
            .ok_or(DatasetError::MissingField { row, field: "id" })?
            .to_string();
        let income = amount_field(&record, 1, "income", row)?;
        let debt = amount_field(&record, 2, "debt", row)?;

        households.push(Household { id, income, debt });
    }

    Ok(households)
}

/// Find the single household with `id`.
pub fn find_household<'a>(
    households: &'a [Household],
    id: &str,
) -> Result<&'a Household, LookupError> {
    let mut matches = households.iter().filter(|h| h.id == id);
    let found = matches
        .next()
        .ok_or_else(|| LookupError::NotFound(id.to_string()))?;

    let extra = matches.count();
    if extra > 0 {
        return Err(LookupError::Duplicate {
            id: id.to_string(),
            count: extra + 1,
        });
    }
    Ok(found)
}

/// Load households from a CSV file.
pub fn load_households(path: &Path) -> Result<Vec<Household>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file {}", path.display()))?;

    let households = read_households(file)
        .with_context(|| format!("Failed to parse households from {}", path.display()))?;

    debug!(path = %path.display(), count = households.len(), "loaded households");
    Ok(households)
}
