//! Birth-year extremes and mode.

use crate::model::FilteredDataset;
use crate::stats::freq::stable_mode;
use serde::Serialize;

/// Birth-year stats, or the fallback when the source has no usable
/// birth-year data (column absent, or present with no value at all —
/// the same policy as gender).
#[derive(Debug, Serialize)]
pub enum AgeStats {
    Stats {
        /// Oldest rider's birth year (minimum).
        earliest: i32,
        /// Youngest rider's birth year (maximum).
        latest: i32,
        /// Most common birth year, ties by first occurrence.
        most_common: i32,
    },
    Unavailable,
}

impl AgeStats {
    pub fn from_dataset(data: &FilteredDataset) -> Self {
        if !data.has_birth_year {
            return AgeStats::Unavailable;
        }

        let years: Vec<i32> = data.records().iter().filter_map(|r| r.birth_year).collect();
        let (Some(&earliest), Some(&latest)) = (years.iter().min(), years.iter().max()) else {
            return AgeStats::Unavailable;
        };
        // years is non-empty here, so the mode exists
        let most_common = stable_mode(years.iter().copied()).unwrap_or(earliest);

        AgeStats::Stats {
            earliest,
            latest,
            most_common,
        }
    }

    /// Fixed order: earliest year, latest year, most common year.
    pub fn lines(&self) -> Vec<String> {
        match self {
            AgeStats::Stats {
                earliest,
                latest,
                most_common,
            } => vec![
                earliest.to_string(),
                latest.to_string(),
                most_common.to_string(),
            ],
            AgeStats::Unavailable => {
                vec!["Age Data".to_string(), "Not Available".to_string()]
            }
        }
    }
}
