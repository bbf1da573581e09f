//! Total and mean trip duration.

use crate::model::FilteredDataset;
use crate::stats::NO_DATA;
use serde::Serialize;

/// Seconds per year with the original dataset's 365.33-day year.
const SECONDS_PER_YEAR: f64 = 3600.0 * 24.0 * 365.33;

#[derive(Debug, Serialize)]
pub struct TripDurationStats {
    /// Sum of all durations in years, rounded to 2 decimals.
    pub total_years: Option<f64>,
    /// Mean duration in minutes, rounded to 2 decimals. `None` on an
    /// empty dataset: the mean is undefined and never divides by zero.
    pub mean_minutes: Option<f64>,
}

impl TripDurationStats {
    pub fn from_dataset(data: &FilteredDataset) -> Self {
        let records = data.records();
        if records.is_empty() {
            return Self {
                total_years: None,
                mean_minutes: None,
            };
        }

        let total_secs: u64 = records.iter().map(|r| r.duration_secs).sum();
        let mean_secs = total_secs as f64 / records.len() as f64;

        Self {
            total_years: Some(round2(total_secs as f64 / SECONDS_PER_YEAR)),
            mean_minutes: Some(round2(mean_secs / 60.0)),
        }
    }

    /// Fixed order: total travel time, mean travel time.
    pub fn lines(&self) -> Vec<String> {
        vec![
            self.total_years
                .map(|v| format!("{:.2} years", v))
                .unwrap_or_else(|| NO_DATA.to_string()),
            self.mean_minutes
                .map(|v| format!("{:.2} minutes", v))
                .unwrap_or_else(|| NO_DATA.to_string()),
        ]
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::testutil::{dataset, trip};

    #[test]
    fn test_exact_rounding_on_fixed_fixture() {
        // 15_782_256 seconds is exactly half of a 365.33-day year
        let data = dataset(vec![
            trip(1, 2, 8, "A", "B", 15_000_000),
            trip(1, 3, 8, "A", "B", 700_000),
            trip(1, 4, 8, "A", "B", 82_256),
        ]);
        let stats = TripDurationStats::from_dataset(&data);
        assert_eq!(stats.total_years, Some(0.5));
        // mean = 5_260_752 s = 87_679.2 minutes
        assert_eq!(stats.mean_minutes, Some(87_679.2));
    }

    #[test]
    fn test_mean_minutes_short_trips() {
        let data = dataset(vec![
            trip(1, 2, 8, "A", "B", 60),
            trip(1, 2, 9, "A", "B", 120),
            trip(1, 2, 10, "A", "B", 300),
        ]);
        let stats = TripDurationStats::from_dataset(&data);
        // mean = 160 s = 2.666... minutes
        assert_eq!(stats.mean_minutes, Some(2.67));
        assert_eq!(stats.total_years, Some(0.0));
        assert_eq!(stats.lines()[1], "2.67 minutes");
    }

    #[test]
    fn test_empty_dataset_returns_sentinel_not_division_by_zero() {
        let data = dataset(vec![]);
        let stats = TripDurationStats::from_dataset(&data);
        assert_eq!(stats.total_years, None);
        assert_eq!(stats.mean_minutes, None);
        assert_eq!(stats.lines(), vec![NO_DATA, NO_DATA]);
    }
}
