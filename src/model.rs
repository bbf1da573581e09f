//! Core data types: trip records, filter selections, and the filtered
//! dataset consumed by the statistics engine.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;
use std::fmt;

/// Full English month names, calendar order. Indexed by `month0()`.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Full English weekday names, Monday first. Indexed by `num_days_from_monday()`.
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Month values the presentation layer may select. The source datasets
/// only cover the first half of the year.
pub const MONTH_OPTIONS: [&str; 7] = [
    "All", "January", "February", "March", "April", "May", "June",
];

/// Weekday values the presentation layer may select.
pub const DAY_OPTIONS: [&str; 8] = [
    "All",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Returns the English month name for a timestamp.
pub fn month_name(ts: &NaiveDateTime) -> &'static str {
    MONTH_NAMES[ts.month0() as usize]
}

/// Returns the English weekday name for a timestamp.
pub fn day_name(ts: &NaiveDateTime) -> &'static str {
    DAY_NAMES[ts.weekday().num_days_from_monday() as usize]
}

/// One recorded bicycle trip. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub start_station: String,
    pub end_station: String,
    /// Trip duration in whole seconds.
    pub duration_secs: u64,
    pub user_type: String,
    /// `None` when the row has no gender value (or the source has no
    /// gender column at all; see [`FilteredDataset::has_gender`]).
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    /// English month name derived from `start_time`.
    pub month: &'static str,
    /// English weekday name derived from `start_time`.
    pub day_of_week: &'static str,
}

impl TripRecord {
    /// Hour-of-day (0-23) the trip started.
    pub fn start_hour(&self) -> u32 {
        self.start_time.hour()
    }
}

impl fmt::Display for TripRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} | {} to {} | {}s | {}",
            self.start_time,
            self.end_time,
            self.start_station,
            self.end_station,
            self.duration_secs,
            self.user_type,
        )?;
        if let Some(gender) = &self.gender {
            write!(f, " | {}", gender)?;
        }
        if let Some(year) = self.birth_year {
            write!(f, " | {}", year)?;
        }
        Ok(())
    }
}

/// An equality filter over a derived calendar field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    All,
    Value(String),
}

impl Filter {
    /// Parses the presentation layer's selection string ("All" keeps
    /// everything, anything else matches exactly, case-sensitive).
    pub fn parse(s: &str) -> Self {
        if s == "All" {
            Filter::All
        } else {
            Filter::Value(s.to_string())
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Filter::All => true,
            Filter::Value(v) => v == value,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("All"),
            Filter::Value(v) => f.write_str(v),
        }
    }
}

/// Caller-supplied city/month/day constraint. Immutable per query.
#[derive(Debug, Clone)]
pub struct FilterSelection {
    pub city: String,
    pub month: Filter,
    pub day: Filter,
}

impl FilterSelection {
    pub fn new(city: impl Into<String>, month: Filter, day: Filter) -> Self {
        Self {
            city: city.into(),
            month,
            day,
        }
    }
}

/// Trip records for one city after month/day filtering, plus the schema
/// facts the statistics engine needs to tell "column absent" apart from
/// "values missing".
#[derive(Debug, Clone)]
pub struct FilteredDataset {
    city: String,
    records: Vec<TripRecord>,
    /// True iff the source header carried a gender column.
    pub has_gender: bool,
    /// True iff the source header carried a birth-year column.
    pub has_birth_year: bool,
    /// Rows dropped by the loader because a required field failed to parse.
    pub skipped_rows: usize,
}

impl FilteredDataset {
    pub fn new(
        city: impl Into<String>,
        records: Vec<TripRecord>,
        has_gender: bool,
        has_birth_year: bool,
        skipped_rows: usize,
    ) -> Self {
        Self {
            city: city.into(),
            records,
            has_gender,
            has_birth_year,
            skipped_rows,
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// Records in original source order.
    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
