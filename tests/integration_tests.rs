use bikeshare_stats::error::LoadError;
use bikeshare_stats::loader::load_data;
use bikeshare_stats::model::{Filter, FilterSelection};
use bikeshare_stats::output::StatisticsReport;
use bikeshare_stats::raw::{Page, RawDataPager};
use bikeshare_stats::stats::age::AgeStats;
use bikeshare_stats::stats::station::StationStats;
use bikeshare_stats::stats::time::TimeStats;
use bikeshare_stats::stats::trip::TripDurationStats;
use bikeshare_stats::stats::user::{GenderSummary, UserStats};
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn selection(city: &str, month: &str, day: &str) -> FilterSelection {
    FilterSelection::new(city, Filter::parse(month), Filter::parse(day))
}

#[test]
fn test_unfiltered_load_returns_full_city_dataset() {
    let data = load_data(&selection("chicago", "All", "All"), &fixtures_dir()).unwrap();
    assert_eq!(data.len(), 8);
    assert_eq!(data.skipped_rows, 0);
}

#[test]
fn test_month_and_day_filters_are_exact() {
    let dir = fixtures_dir();

    let june = load_data(&selection("chicago", "June", "All"), &dir).unwrap();
    assert_eq!(june.len(), 3);
    assert!(june.records().iter().all(|r| r.month == "June"));

    let mondays = load_data(&selection("chicago", "All", "Monday"), &dir).unwrap();
    assert_eq!(mondays.len(), 3);
    assert!(mondays.records().iter().all(|r| r.day_of_week == "Monday"));

    let both = load_data(&selection("chicago", "June", "Monday"), &dir).unwrap();
    assert_eq!(both.len(), 2);
}

#[test]
fn test_unknown_city_is_a_typed_failure() {
    let err = load_data(&selection("springfield", "All", "All"), &fixtures_dir()).unwrap_err();
    match err {
        LoadError::UnknownCity { city, .. } => assert_eq!(city, "springfield"),
        other => panic!("expected UnknownCity, got {other}"),
    }
}

#[test]
fn test_time_stats_over_chicago_fixture() {
    let data = load_data(&selection("chicago", "All", "All"), &fixtures_dir()).unwrap();
    let stats = TimeStats::from_dataset(&data);

    assert_eq!(stats.popular_month.as_deref(), Some("June"));
    assert_eq!(stats.popular_day.as_deref(), Some("Monday"));
    assert_eq!(stats.popular_hour, Some(8));
    assert_eq!(stats.lines()[2], "8 AM");
}

#[test]
fn test_station_stats_over_chicago_fixture() {
    let data = load_data(&selection("chicago", "All", "All"), &fixtures_dir()).unwrap();
    let stats = StationStats::from_dataset(&data);

    assert_eq!(stats.popular_start.as_deref(), Some("Streeter Dr & Grand Ave"));
    assert_eq!(stats.popular_end.as_deref(), Some("Michigan Ave & Oak St"));
    assert_eq!(
        stats.popular_route.as_deref(),
        Some("Streeter Dr & Grand Ave to Michigan Ave & Oak St")
    );
}

#[test]
fn test_trip_duration_stats_over_chicago_fixture() {
    let data = load_data(&selection("chicago", "All", "All"), &fixtures_dir()).unwrap();
    let stats = TripDurationStats::from_dataset(&data);

    // 5497 seconds total, mean 687.125 s
    assert_eq!(stats.total_years, Some(0.0));
    assert_eq!(stats.mean_minutes, Some(11.45));
}

#[test]
fn test_user_and_age_stats_over_chicago_fixture() {
    let data = load_data(&selection("chicago", "All", "All"), &fixtures_dir()).unwrap();

    let user = UserStats::from_dataset(&data);
    assert_eq!(
        user.user_types,
        vec![("Subscriber".to_string(), 6), ("Customer".to_string(), 2)]
    );
    match &user.gender {
        GenderSummary::Counts(counts) => {
            assert_eq!(
                counts,
                &vec![("Male".to_string(), 4), ("Female".to_string(), 3)]
            );
        }
        GenderSummary::Unavailable => panic!("chicago fixture has gender data"),
    }

    match AgeStats::from_dataset(&data) {
        AgeStats::Stats {
            earliest,
            latest,
            most_common,
        } => {
            assert_eq!(earliest, 1959);
            assert_eq!(latest, 1992);
            assert_eq!(most_common, 1992);
        }
        AgeStats::Unavailable => panic!("chicago fixture has birth years"),
    }
}

#[test]
fn test_washington_has_no_gender_or_age_schema() {
    let data = load_data(&selection("washington", "All", "All"), &fixtures_dir()).unwrap();
    assert!(!data.has_gender);
    assert!(!data.has_birth_year);
    // float-formatted durations still parse
    assert_eq!(data.records()[0].duration_secs, 420);

    let user = UserStats::from_dataset(&data);
    assert_eq!(user.gender_lines(), vec!["Gender Data", "Not Available"]);
    assert_eq!(
        AgeStats::from_dataset(&data).lines(),
        vec!["Age Data", "Not Available"]
    );
}

#[test]
fn test_empty_selection_reports_sentinels_without_crashing() {
    // February has no Sunday trips in the fixture
    let query = selection("chicago", "February", "Sunday");
    let data = load_data(&query, &fixtures_dir()).unwrap();
    assert!(data.is_empty());

    let report = StatisticsReport::build(&data, &query);
    assert_eq!(report.trip.total_years, None);
    assert!(report.render_text().contains("No data"));
}

#[test]
fn test_raw_paging_over_chicago_fixture() {
    let data = load_data(&selection("chicago", "All", "All"), &fixtures_dir()).unwrap();
    let mut pager = RawDataPager::new(&data);

    match pager.next_page() {
        Page::Records(page) => {
            assert_eq!(page.len(), 5);
            assert_eq!(page[0].start_station, "Streeter Dr & Grand Ave");
        }
        Page::Exhausted => panic!("expected first page"),
    }
    match pager.next_page() {
        Page::Records(page) => assert_eq!(page.len(), 3),
        Page::Exhausted => panic!("expected second page"),
    }
    assert!(matches!(pager.next_page(), Page::Exhausted));
}

#[test]
fn test_full_pipeline_new_york() {
    let query = selection("new york city", "All", "All");
    let data = load_data(&query, &fixtures_dir()).unwrap();
    assert_eq!(data.len(), 4);

    let report = StatisticsReport::build(&data, &query);
    assert_eq!(report.record_count, 4);
    assert_eq!(
        report.station.popular_route.as_deref(),
        Some("Suffolk St & Stanton St to W Broadway & Spring St")
    );
    match report.age {
        AgeStats::Stats { earliest, .. } => assert_eq!(earliest, 1937),
        AgeStats::Unavailable => panic!("new york fixture has birth years"),
    }
}
