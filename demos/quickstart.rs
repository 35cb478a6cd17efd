//! Quickstart demonstrating the sales pipeline of retail-forecast.
//!
//! Run with: cargo run --example quickstart [sales.csv]
//!
//! Without an argument a synthetic two-year dataset is used. Log verbosity is
//! read from the `LOG` variable (error, warn, info, debug; default debug).

use retail_forecast::aggregate::{group_totals, GroupKey};
use retail_forecast::data::{load_records, write_forecast_csv, Record};
use retail_forecast::models::{AdditiveForecaster, ForecastConfig, Forecaster, DEFAULT_HORIZON};
use retail_forecast::pipeline::{forecast_sales, prepare_time_series};
use std::io::stderr;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn setup_logging() {
    let level = std::env::var("LOG")
        .ok()
        .and_then(|s| s.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::DEBUG);

    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry().with(terminal_log).init();
}

fn synthetic_records() -> Vec<Record> {
    let categories = ["Beauty", "Clothing", "Electronics"];
    let mut records = Vec::new();
    for month in 0..24u32 {
        let year = 2022 + (month / 12) as i32;
        let m = month % 12 + 1;
        // Busier towards the end of each year.
        let sales = 8 + m as usize;
        for i in 0..sales {
            let amount = 30.0 + 2.5 * month as f64 + (i % 7) as f64 * 20.0;
            records.push(
                Record::new(format!("{year}-{m:02}-{:02}", 1 + i % 28), amount.to_string())
                    .with_category(categories[i % categories.len()])
                    .with_gender(if i % 2 == 0 { "Female" } else { "Male" }),
            );
        }
    }
    records
}

fn main() {
    setup_logging();
    println!("=== retail-forecast Quickstart ===\n");

    // 1. Load records
    let records = match std::env::args().nth(1) {
        Some(path) => match load_records(&path) {
            Ok(records) => records,
            Err(e) => {
                eprintln!("failed to load {path}: {e}");
                std::process::exit(1);
            }
        },
        None => synthetic_records(),
    };
    println!("Loaded {} records", records.len());

    // 2. Summaries
    println!("\n--- Sales by category ---");
    for group in group_totals(&records, GroupKey::ProductCategory) {
        println!("  {:<12} {:>10.2} ({} sales)", group.key, group.total, group.count);
    }

    // 3. Monthly series
    let series = match prepare_time_series(&records) {
        Ok(series) => series,
        Err(e) => {
            eprintln!("failed to aggregate records: {e}");
            std::process::exit(1);
        }
    };
    println!("\n--- Monthly sales ({} months) ---", series.len());
    for point in series.points() {
        println!("  {}: {:.2}", point.period, point.value);
    }

    // 4. Forecast the default horizon
    let model = AdditiveForecaster::new(ForecastConfig::default().with_interval_width(0.9));
    println!("\n--- {} forecast, 90% intervals ---", model.name());
    let result = match forecast_sales(&records, &model, DEFAULT_HORIZON) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("forecast failed: {e}");
            std::process::exit(1);
        }
    };

    for point in result.future() {
        println!(
            "  {}: {:.2} [{:.2}, {:.2}] trend={:.2} seasonal={:.2}",
            point.period,
            point.predicted_value,
            point.lower_bound,
            point.upper_bound,
            point.trend_component,
            point.seasonal_component
        );
    }

    let state = &result.model_state;
    println!("\nBase growth: {:.2} per month", state.base_growth());
    println!("Changepoints: {}", state.changepoints().len());
    println!("Residual scale: {:.2}", state.sigma());

    // 5. Full table as CSV
    println!("\n--- Forecast table ---");
    if let Err(e) = write_forecast_csv(std::io::stdout().lock(), &result) {
        eprintln!("failed to write forecast: {e}");
    }
}
