//! Command-line interface definitions.
//!
//! All options can be given as flags or environment variables. The timezone
//! is validated here, at the configuration boundary: clap parses it straight
//! into a [`chrono_tz::Tz`], so an unknown zone name dies with a usage error
//! before any fetching or parsing starts.

use chrono_tz::Tz;
use clap::{Parser, ValueEnum};

/// Which report one invocation renders.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportKind {
    /// What happens in the next ~3 hours.
    Now,
    /// The full nightly rundown.
    Today,
    /// A 7-day outlook.
    Weekly,
    /// The exact URLs the data comes from (no fetching).
    Sources,
}

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Tonight's rundown for the default location
/// night_sky_report today
///
/// # Next three hours in Berlin
/// night_sky_report now -l germany/berlin -t Europe/Berlin
///
/// # With coordinates, enabling the ISS pass source
/// night_sky_report today --lat 42.3314 --lon -83.0458
/// ```
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Which report to render
    #[arg(value_enum, default_value = "today")]
    pub report: ReportKind,

    /// Location path on the night-sky page, e.g. "usa/detroit"
    #[arg(short, long, env = "NIGHT_SKY_LOCATION", default_value = "usa/detroit")]
    pub location: String,

    /// IANA timezone reports are anchored to, e.g. "America/Detroit"
    #[arg(short, long, env = "NIGHT_SKY_TZ", default_value = "America/Detroit")]
    pub timezone: Tz,

    /// Observer latitude in degrees (with --lon, enables the ISS source)
    #[arg(long, env = "NIGHT_SKY_LAT", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Observer longitude in degrees
    #[arg(long, env = "NIGHT_SKY_LON", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Print the extracted data as JSON instead of a text report
    #[arg(long)]
    pub json: bool,
}
