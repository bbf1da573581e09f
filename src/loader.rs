//! Record loading: resolves a city to its backing source, parses raw
//! rows into [`TripRecord`]s, derives calendar fields, and applies the
//! month/day filters.
//!
//! Malformed rows are skipped with a warning rather than aborting the
//! query; the dropped-row count is reported on the returned dataset.

use crate::error::LoadError;
use crate::model::{day_name, month_name, FilterSelection, FilteredDataset, TripRecord};
use chrono::NaiveDateTime;
use csv::StringRecord;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Registered cities and their backing source files, lookup order.
pub const CITY_DATA: &[(&str, &str)] = &[
    ("chicago", "chicago.csv"),
    ("new york city", "new_york_city.csv"),
    ("washington", "washington.csv"),
];

const COL_START_TIME: &str = "Start Time";
const COL_END_TIME: &str = "End Time";
const COL_START_STATION: &str = "Start Station";
const COL_END_STATION: &str = "End Station";
const COL_DURATION: &str = "Trip Duration";
const COL_USER_TYPE: &str = "User Type";
const COL_GENDER: &str = "Gender";
const COL_BIRTH_YEAR: &str = "Birth Year";

/// Registered city names, in registry order.
pub fn city_names() -> Vec<&'static str> {
    CITY_DATA.iter().map(|(city, _)| *city).collect()
}

fn source_file(city: &str) -> Option<&'static str> {
    CITY_DATA
        .iter()
        .find(|(name, _)| *name == city)
        .map(|(_, file)| *file)
}

/// Header positions resolved once per source. Optional columns keep
/// `None` when the header lacks them, which is what drives the
/// "Not Available" fallbacks downstream.
struct ColumnMap {
    start_time: usize,
    end_time: usize,
    start_station: usize,
    end_station: usize,
    duration: usize,
    user_type: usize,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord, path: &Path) -> Result<Self, LoadError> {
        let find = |column: &'static str| -> Result<usize, LoadError> {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| LoadError::MissingColumn {
                    path: path.to_path_buf(),
                    column,
                })
        };

        Ok(Self {
            start_time: find(COL_START_TIME)?,
            end_time: find(COL_END_TIME)?,
            start_station: find(COL_START_STATION)?,
            end_station: find(COL_END_STATION)?,
            duration: find(COL_DURATION)?,
            user_type: find(COL_USER_TYPE)?,
            gender: headers.iter().position(|h| h == COL_GENDER),
            birth_year: headers.iter().position(|h| h == COL_BIRTH_YEAR),
        })
    }
}

#[derive(Debug, Error)]
enum RowError {
    #[error("cannot parse {column} {value:?}")]
    Timestamp { column: &'static str, value: String },
    #[error("cannot parse trip duration {value:?}")]
    Duration { value: String },
    #[error("row is missing field {column}")]
    Truncated { column: &'static str },
}

/// Loads the selected city's records, derives month/weekday names, and
/// keeps only the rows matching the selection.
///
/// # Errors
///
/// Fails when the city is not registered, the source file cannot be
/// found or read, or a required column is absent from the header. Bad
/// rows do not fail the load; they are skipped with a warning.
pub fn load_data(
    selection: &FilterSelection,
    data_dir: &Path,
) -> Result<FilteredDataset, LoadError> {
    let file = source_file(&selection.city).ok_or_else(|| LoadError::UnknownCity {
        city: selection.city.clone(),
        known: city_names().join(", "),
    })?;

    let path = data_dir.join(file);
    let reader = open_source(&selection.city, &path)?;

    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let columns = ColumnMap::from_headers(&headers, &path)?;

    let mut records = Vec::new();
    let mut total_rows = 0usize;
    let mut skipped = 0usize;

    for (i, result) in rdr.records().enumerate() {
        let row_number = i + 1;
        total_rows += 1;

        let row = match result {
            Ok(row) => row,
            Err(e) => {
                warn!(row = row_number, error = %e, "unreadable row, skipping");
                skipped += 1;
                continue;
            }
        };

        let record = match parse_row(&row, &columns) {
            Ok(record) => record,
            Err(e) => {
                warn!(row = row_number, error = %e, "malformed row, skipping");
                skipped += 1;
                continue;
            }
        };

        if !selection.month.matches(record.month) {
            continue;
        }
        if !selection.day.matches(record.day_of_week) {
            continue;
        }

        records.push(record);
    }

    debug!(
        city = %selection.city,
        total_rows,
        filtered = records.len(),
        skipped,
        "load complete"
    );

    Ok(FilteredDataset::new(
        selection.city.clone(),
        records,
        columns.gender.is_some(),
        columns.birth_year.is_some(),
        skipped,
    ))
}

/// Opens the plain source file, falling back to a gzip-compressed
/// `<file>.gz` sibling when the plain file does not exist.
fn open_source(city: &str, path: &Path) -> Result<Box<dyn Read>, LoadError> {
    if path.exists() {
        return Ok(Box::new(File::open(path)?));
    }

    let mut gz_name = path.as_os_str().to_owned();
    gz_name.push(".gz");
    let gz_path = Path::new(&gz_name);
    if gz_path.exists() {
        return Ok(Box::new(GzDecoder::new(File::open(gz_path)?)));
    }

    Err(LoadError::SourceNotFound {
        city: city.to_string(),
        path: path.to_path_buf(),
    })
}

fn field<'r>(
    row: &'r StringRecord,
    idx: usize,
    column: &'static str,
) -> Result<&'r str, RowError> {
    row.get(idx).ok_or(RowError::Truncated { column })
}

fn parse_row(row: &StringRecord, columns: &ColumnMap) -> Result<TripRecord, RowError> {
    let start_raw = field(row, columns.start_time, COL_START_TIME)?;
    let start_time = parse_timestamp(start_raw).ok_or_else(|| RowError::Timestamp {
        column: COL_START_TIME,
        value: start_raw.to_string(),
    })?;

    let end_raw = field(row, columns.end_time, COL_END_TIME)?;
    let end_time = parse_timestamp(end_raw).ok_or_else(|| RowError::Timestamp {
        column: COL_END_TIME,
        value: end_raw.to_string(),
    })?;

    let duration_raw = field(row, columns.duration, COL_DURATION)?;
    let duration_secs = parse_duration(duration_raw).ok_or_else(|| RowError::Duration {
        value: duration_raw.to_string(),
    })?;

    let gender = columns
        .gender
        .and_then(|idx| row.get(idx))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    let birth_year = columns
        .birth_year
        .and_then(|idx| row.get(idx))
        .and_then(parse_year);

    Ok(TripRecord {
        start_time,
        end_time,
        start_station: field(row, columns.start_station, COL_START_STATION)?.to_string(),
        end_station: field(row, columns.end_station, COL_END_STATION)?.to_string(),
        duration_secs,
        user_type: field(row, columns.user_type, COL_USER_TYPE)?
            .trim()
            .to_string(),
        gender,
        birth_year,
        month: month_name(&start_time),
        day_of_week: day_name(&start_time),
    })
}

/// Source timestamps come at second or minute resolution.
fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .ok()
}

/// Durations are whole seconds but some exports write them as floats.
fn parse_duration(s: &str) -> Option<u64> {
    let s = s.trim();
    if let Ok(v) = s.parse::<u64>() {
        return Some(v);
    }
    match s.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.is_finite() => Some(v.round() as u64),
        _ => None,
    }
}

/// Birth years likewise appear as "1985" or "1985.0". Unparseable
/// values count as missing, not as a malformed row.
fn parse_year(s: &str) -> Option<i32> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(v) = s.parse::<i32>() {
        return Some(v);
    }
    s.parse::<f64>().ok().map(|v| v as i32)
}
