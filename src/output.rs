//! Report assembly and output: display text, JSON, and CSV append.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::debug;

use crate::model::{FilterSelection, FilteredDataset};
use crate::stats::age::AgeStats;
use crate::stats::station::StationStats;
use crate::stats::time::TimeStats;
use crate::stats::trip::TripDurationStats;
use crate::stats::user::{GenderSummary, UserStats};

const TIME_LABELS: [&str; 3] = [
    "The busiest month was:",
    "The busiest day of the week was:",
    "The busiest start hour was:",
];

const STATION_LABELS: [&str; 3] = [
    "The most popular start station was:",
    "The most popular end station was:",
    "The most popular start/end station combination was:",
];

const TRIP_LABELS: [&str; 2] = ["The total travel time was:", "The mean travel time was:"];

const AGE_LABELS: [&str; 3] = [
    "Oldest Rider Birth Year:",
    "Youngest Rider Birth Year:",
    "Most common birth year:",
];

/// The five statistic blocks for one query. Blocks are independent;
/// each renders to its own fixed-order list of lines.
#[derive(Debug, Serialize)]
pub struct StatisticsReport {
    pub city: String,
    pub month_filter: String,
    pub day_filter: String,
    pub record_count: usize,
    pub skipped_rows: usize,
    pub time: TimeStats,
    pub station: StationStats,
    pub trip: TripDurationStats,
    pub user: UserStats,
    pub age: AgeStats,
}

impl StatisticsReport {
    pub fn build(data: &FilteredDataset, selection: &FilterSelection) -> Self {
        Self {
            city: selection.city.clone(),
            month_filter: selection.month.to_string(),
            day_filter: selection.day.to_string(),
            record_count: data.len(),
            skipped_rows: data.skipped_rows,
            time: TimeStats::from_dataset(data),
            station: StationStats::from_dataset(data),
            trip: TripDurationStats::from_dataset(data),
            user: UserStats::from_dataset(data),
            age: AgeStats::from_dataset(data),
        }
    }

    /// Renders all blocks as display text with the standard labels.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        block(&mut out, "Time Stats", &TIME_LABELS, &self.time.lines());
        block(
            &mut out,
            "Station Stats",
            &STATION_LABELS,
            &self.station.lines(),
        );
        block(&mut out, "Trip Stats", &TRIP_LABELS, &self.trip.lines());
        block(&mut out, "User Types", &[], &self.user.user_type_lines());
        block(&mut out, "User Gender", &[], &self.user.gender_lines());
        block(&mut out, "Age Stats", &AGE_LABELS, &self.age.lines());
        out
    }
}

/// Appends a titled block. Lines are paired with labels when the counts
/// match; fallback blocks ("Not Available") print unlabeled.
fn block(out: &mut String, title: &str, labels: &[&str], lines: &[String]) {
    out.push_str(title);
    out.push('\n');
    if labels.len() == lines.len() {
        for (label, line) in labels.iter().zip(lines) {
            out.push_str(&format!("  {} {}\n", label, line));
        }
    } else {
        for line in lines {
            out.push_str(&format!("  {}\n", line));
        }
    }
    out.push('\n');
}

/// One flattened, timestamped report row for CSV persistence.
#[derive(Debug, Serialize)]
pub struct ReportRow {
    pub timestamp: DateTime<Utc>,
    pub city: String,
    pub month_filter: String,
    pub day_filter: String,
    pub record_count: usize,
    pub skipped_rows: usize,

    pub popular_month: Option<String>,
    pub popular_day: Option<String>,
    pub popular_hour: Option<u32>,
    pub popular_start_station: Option<String>,
    pub popular_end_station: Option<String>,
    pub popular_route: Option<String>,
    pub total_travel_years: Option<f64>,
    pub mean_travel_minutes: Option<f64>,

    /// `name=count` pairs joined with `; `.
    pub user_types: String,
    pub genders: Option<String>,
    pub earliest_birth_year: Option<i32>,
    pub latest_birth_year: Option<i32>,
    pub common_birth_year: Option<i32>,
}

impl ReportRow {
    pub fn from_report(report: &StatisticsReport) -> Self {
        let (earliest, latest, most_common) = match report.age {
            AgeStats::Stats {
                earliest,
                latest,
                most_common,
            } => (Some(earliest), Some(latest), Some(most_common)),
            AgeStats::Unavailable => (None, None, None),
        };

        Self {
            timestamp: Utc::now(),
            city: report.city.clone(),
            month_filter: report.month_filter.clone(),
            day_filter: report.day_filter.clone(),
            record_count: report.record_count,
            skipped_rows: report.skipped_rows,
            popular_month: report.time.popular_month.clone(),
            popular_day: report.time.popular_day.clone(),
            popular_hour: report.time.popular_hour,
            popular_start_station: report.station.popular_start.clone(),
            popular_end_station: report.station.popular_end.clone(),
            popular_route: report.station.popular_route.clone(),
            total_travel_years: report.trip.total_years,
            mean_travel_minutes: report.trip.mean_minutes,
            user_types: join_counts(&report.user.user_types),
            genders: match &report.user.gender {
                GenderSummary::Counts(counts) => Some(join_counts(counts)),
                GenderSummary::Unavailable => None,
            },
            earliest_birth_year: earliest,
            latest_birth_year: latest,
            common_birth_year: most_common,
        }
    }
}

fn join_counts(counts: &[(String, u64)]) -> String {
    counts
        .iter()
        .map(|(value, count)| format!("{}={}", value, count))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Appends a [`ReportRow`] to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, row: &ReportRow) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(row)?;
    writer.flush()?;

    Ok(())
}
