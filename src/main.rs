//! # Night Sky Report
//!
//! Aggregates tonight's astronomical visibility (sunset/sunrise, moon
//! phase, bright-planet rise/set windows, and the best predicted ISS pass)
//! from public astronomy pages, and renders it as a compact text report for
//! one of three time horizons.
//!
//! ## Usage
//!
//! ```sh
//! night_sky_report now --lat 42.3314 --lon -83.0458
//! night_sky_report today -l usa/detroit -t America/Detroit
//! night_sky_report weekly
//! night_sky_report sources
//! ```
//!
//! ## Architecture
//!
//! One invocation is one pipeline:
//! 1. **Fetch**: the night-sky page, the ISS pass summary (coordinates
//!    permitting), and the EarthSky note are fetched concurrently
//! 2. **Extract**: defensive HTML parsing degrades field-by-field when the
//!    page layout has drifted; only transport failures are errors
//! 3. **Render**: the requested report shape is assembled and printed to
//!    stdout (diagnostics go to stderr)
//!
//! The night-sky summary has no substitute, so its transport failure fails
//! the run; satellite and EarthSky data degrade to absent sections.

use clap::Parser;
use futures::join;
use std::error::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod models;
mod reports;
mod scrapers;
mod times;
mod utils;
mod windowing;

use chrono_tz::Tz;
use cli::{Cli, ReportKind};
use models::{SatellitePass, SkyBundle};
use reports::{now::render_now, sources::render_sources, today::render_today, weekly::render_weekly};
use scrapers::{build_source_urls, earthsky, heavens_above, timeanddate};
use times::now_in;
use utils::tidy_text;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args.report, %args.location, %args.timezone, "Parsed CLI arguments");

    let tz = args.timezone;
    let sources = build_source_urls(&args.location, args.lat, args.lon, tz);

    // The sources report is pure bookkeeping; nothing to fetch.
    if args.report == ReportKind::Sources {
        let output = if args.json {
            serde_json::to_string_pretty(&sources)?
        } else {
            tidy_text(&render_sources(&sources))
        };
        println!("{output}");
        return Ok(());
    }

    // The now report never shows the EarthSky note; skip that fetch for it.
    let wants_note = args.json || matches!(args.report, ReportKind::Today | ReportKind::Weekly);

    let (summary, pass, note) = join!(
        timeanddate::fetch_night_summary(&args.location, tz),
        fetch_pass_if_located(args.lat, args.lon, tz),
        fetch_note_if(wants_note),
    );
    // No substitute exists for the night summary; its failure is the run's.
    let summary = summary?;
    info!(
        city = %summary.city,
        planets = summary.planets.len(),
        has_pass = pass.is_some(),
        has_note = note.is_some(),
        "Fetched sky data"
    );

    let output = if args.json {
        let bundle = SkyBundle {
            summary,
            pass,
            note,
            sources,
        };
        serde_json::to_string_pretty(&bundle)?
    } else {
        let text = match args.report {
            ReportKind::Now => render_now(&summary, pass.as_ref(), tz, now_in(tz)),
            ReportKind::Today => render_today(&summary, pass.as_ref(), note.as_deref()),
            ReportKind::Weekly => {
                let start = now_in(tz).format("%b %d, %Y").to_string();
                render_weekly(&summary, pass.as_ref(), note.as_deref(), &start)
            }
            ReportKind::Sources => unreachable!("handled before fetching"),
        };
        tidy_text(&text)
    };
    println!("{output}");

    let elapsed = start_time.elapsed();
    info!(secs = elapsed.as_secs(), millis = elapsed.subsec_millis(), "Report complete");
    Ok(())
}

/// Fetch the best ISS pass when both coordinates are configured.
///
/// A transport failure here is not the run's failure; the report simply
/// loses its satellite section.
async fn fetch_pass_if_located(lat: Option<f64>, lon: Option<f64>, tz: Tz) -> Option<SatellitePass> {
    let (Some(lat), Some(lon)) = (lat, lon) else {
        debug!("No observer coordinates; skipping pass fetch");
        return None;
    };
    match heavens_above::fetch_best_pass(lat, lon, tz).await {
        Ok(best) => best,
        Err(e) => {
            warn!(error = %e, "Pass fetch failed; continuing without satellite data");
            None
        }
    }
}

async fn fetch_note_if(enabled: bool) -> Option<String> {
    if enabled {
        earthsky::fetch_visible_planets_note().await
    } else {
        None
    }
}
