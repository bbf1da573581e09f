//! Most popular start station, end station, and start/end combination.

use crate::model::FilteredDataset;
use crate::stats::NO_DATA;
use crate::stats::freq::stable_mode;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StationStats {
    pub popular_start: Option<String>,
    pub popular_end: Option<String>,
    /// Mode of the combined `"<start> to <end>"` route per record, not
    /// of the columns independently.
    pub popular_route: Option<String>,
}

impl StationStats {
    pub fn from_dataset(data: &FilteredDataset) -> Self {
        let records = data.records();
        Self {
            popular_start: stable_mode(records.iter().map(|r| r.start_station.clone())),
            popular_end: stable_mode(records.iter().map(|r| r.end_station.clone())),
            popular_route: stable_mode(
                records
                    .iter()
                    .map(|r| format!("{} to {}", r.start_station, r.end_station)),
            ),
        }
    }

    /// Fixed order: start station, end station, route.
    pub fn lines(&self) -> Vec<String> {
        vec![
            self.popular_start.clone().unwrap_or_else(|| NO_DATA.to_string()),
            self.popular_end.clone().unwrap_or_else(|| NO_DATA.to_string()),
            self.popular_route.clone().unwrap_or_else(|| NO_DATA.to_string()),
        ]
    }
}
