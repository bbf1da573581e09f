//! User-type and gender breakdowns.

use crate::model::FilteredDataset;
use crate::stats::NO_DATA;
use crate::stats::freq::frequency_table;
use serde::Serialize;

/// Gender counts, or the fallback when the source has no usable gender
/// data. A column that exists but holds no value at all is treated the
/// same as an absent column; partial missingness keeps the table.
#[derive(Debug, Serialize)]
pub enum GenderSummary {
    Counts(Vec<(String, u64)>),
    Unavailable,
}

#[derive(Debug, Serialize)]
pub struct UserStats {
    /// Distinct user types with counts, descending, ties by first
    /// appearance. No trailing summary line.
    pub user_types: Vec<(String, u64)>,
    pub gender: GenderSummary,
}

impl UserStats {
    pub fn from_dataset(data: &FilteredDataset) -> Self {
        let records = data.records();

        let user_types = frequency_table(
            records
                .iter()
                .map(|r| r.user_type.clone())
                .filter(|t| !t.is_empty()),
        );

        let gender = if !data.has_gender {
            GenderSummary::Unavailable
        } else {
            let counts =
                frequency_table(records.iter().filter_map(|r| r.gender.clone()));
            if counts.is_empty() {
                GenderSummary::Unavailable
            } else {
                GenderSummary::Counts(counts)
            }
        };

        Self { user_types, gender }
    }

    pub fn user_type_lines(&self) -> Vec<String> {
        if self.user_types.is_empty() {
            return vec![NO_DATA.to_string()];
        }
        self.user_types
            .iter()
            .map(|(value, count)| format!("{}: {}", value, count))
            .collect()
    }

    pub fn gender_lines(&self) -> Vec<String> {
        match &self.gender {
            GenderSummary::Unavailable => {
                vec!["Gender Data".to_string(), "Not Available".to_string()]
            }
            GenderSummary::Counts(counts) => counts
                .iter()
                .map(|(value, count)| format!("{}: {}", value, count))
                .collect(),
        }
    }
}
