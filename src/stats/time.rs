//! Most frequent travel times: month, weekday, and start hour.

use crate::model::FilteredDataset;
use crate::stats::NO_DATA;
use crate::stats::freq::stable_mode;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TimeStats {
    pub popular_month: Option<String>,
    pub popular_day: Option<String>,
    /// Hour-of-day 0-23; rendered through [`hour_label`].
    pub popular_hour: Option<u32>,
}

impl TimeStats {
    pub fn from_dataset(data: &FilteredDataset) -> Self {
        let records = data.records();
        Self {
            popular_month: stable_mode(records.iter().map(|r| r.month)).map(str::to_string),
            popular_day: stable_mode(records.iter().map(|r| r.day_of_week)).map(str::to_string),
            popular_hour: stable_mode(records.iter().map(|r| r.start_hour())),
        }
    }

    /// Fixed order: month, weekday, start hour.
    pub fn lines(&self) -> Vec<String> {
        vec![
            self.popular_month.clone().unwrap_or_else(|| NO_DATA.to_string()),
            self.popular_day.clone().unwrap_or_else(|| NO_DATA.to_string()),
            self.popular_hour
                .map(hour_label)
                .unwrap_or_else(|| NO_DATA.to_string()),
        ]
    }
}

/// 12-hour clock label for an hour-of-day.
pub fn hour_label(hour: u32) -> String {
    match hour {
        0 => "12 AM".to_string(),
        12 => "12 PM".to_string(),
        h if h < 12 => format!("{} AM", h),
        h => format!("{} PM", h - 12),
    }
}
