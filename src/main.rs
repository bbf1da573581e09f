//! CLI entry point for the bikeshare statistics tool.
//!
//! Provides subcommands for computing the five statistic blocks over a
//! filtered city dataset, paging through raw trip records, and listing
//! the registered cities.

use anyhow::Result;
use bikeshare_stats::loader::{city_names, load_data};
use bikeshare_stats::model::{DAY_OPTIONS, Filter, FilterSelection, MONTH_OPTIONS};
use bikeshare_stats::output::{ReportRow, StatisticsReport, append_record};
use bikeshare_stats::raw::{Page, RawDataPager};
use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Descriptive statistics over bicycle-share trip records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Filter flags shared by the `stats` and `raw` subcommands.
#[derive(Args)]
struct SelectionArgs {
    /// City to analyze (see `cities` for the registered set)
    #[arg(short, long)]
    city: String,

    /// Month filter
    #[arg(short, long, default_value = "All", value_parser = PossibleValuesParser::new(MONTH_OPTIONS))]
    month: String,

    /// Weekday filter
    #[arg(short, long, default_value = "All", value_parser = PossibleValuesParser::new(DAY_OPTIONS))]
    day: String,

    /// Directory holding the per-city CSV sources
    /// (defaults to $BIKESHARE_DATA_DIR, then "data")
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

impl SelectionArgs {
    fn selection(&self) -> FilterSelection {
        FilterSelection::new(
            self.city.clone(),
            Filter::parse(&self.month),
            Filter::parse(&self.day),
        )
    }

    fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            std::env::var("BIKESHARE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data"))
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compute all statistic blocks for a filtered city dataset
    Stats {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Print the report as pretty JSON instead of text blocks
        #[arg(long, default_value_t = false)]
        json: bool,

        /// CSV file to append a flattened report row to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Page through raw trip records of the filtered dataset
    Raw {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Records per page
        #[arg(short, long, default_value_t = 5)]
        page_size: usize,

        /// Number of pages to print (0 = all)
        #[arg(short = 'n', long, default_value_t = 1)]
        pages: usize,
    },
    /// List the registered cities
    Cities,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bikeshare_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Stats {
            selection,
            json,
            output,
        } => {
            let query = selection.selection();
            let start = std::time::Instant::now();
            let data = load_data(&query, &selection.data_dir())?;
            let report = StatisticsReport::build(&data, &query);

            info!(
                city = %query.city,
                records = data.len(),
                skipped = data.skipped_rows,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "statistics computed"
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.render_text());
            }

            if let Some(path) = output {
                append_record(&path, &ReportRow::from_report(&report))?;
                info!(path = %path, "report row appended");
            }
        }
        Commands::Raw {
            selection,
            page_size,
            pages,
        } => {
            let query = selection.selection();
            let data = load_data(&query, &selection.data_dir())?;

            let mut pager = RawDataPager::with_page_size(&data, page_size);
            let mut printed = 0usize;
            loop {
                if pages != 0 && printed >= pages {
                    break;
                }
                match pager.next_page() {
                    Page::Records(records) => {
                        for record in records {
                            println!("{}", record);
                        }
                        println!();
                        printed += 1;
                    }
                    Page::Exhausted => {
                        println!("All raw data for this selection has been printed");
                        break;
                    }
                }
            }
        }
        Commands::Cities => {
            for city in city_names() {
                println!("{}", city);
            }
        }
    }

    Ok(())
}
