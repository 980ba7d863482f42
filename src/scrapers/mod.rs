//! Scrapers for the upstream astronomy pages.
//!
//! Each source gets its own submodule with a `fetch_*` entry point that
//! performs the network round trip and a pure `parse_*`/`extract_*` layer
//! that never fails for layout reasons.
//!
//! # Sources
//!
//! | Source | Module | Yields | On failure |
//! |--------|--------|--------|------------|
//! | timeanddate.com Night Sky | [`timeanddate`] | [`NightSummary`](crate::models::NightSummary) | transport errors propagate; layout drift degrades per field |
//! | Heavens-Above pass summary | [`heavens_above`] | best [`SatellitePass`](crate::models::SatellitePass) | transport errors propagate; caller downgrades to "no satellite data" |
//! | EarthSky visible planets | [`earthsky`] | one-paragraph note | everything swallowed to `None` |
//!
//! # Common plumbing
//!
//! All fetches go through one shared [`reqwest::Client`] with a conventional
//! browser User-Agent (the pages serve trimmed or blocked responses to
//! obvious bots) and a fixed 12-second timeout. There are no retries: a
//! timeout or non-2xx propagates to the caller, which decides how to degrade.

use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Serialize;
use std::error::Error;
use std::time::Duration;
use url::Url;

use crate::times::now_in;
use chrono_tz::Tz;

pub mod earthsky;
pub mod heavens_above;
pub mod timeanddate;

/// Night-sky page base; the location path is appended directly.
pub const TAD_BASE: &str = "https://www.timeanddate.com/astronomy/night/";

/// EarthSky's rolling "visible planets tonight" article.
pub const EARTHSKY_URL: &str = "https://earthsky.org/astronomy-essentials/\
visible-planets-tonight-mars-jupiter-venus-saturn-mercury/";

/// Heavens-Above 10-day pass summary endpoint.
pub const HA_BASE: &str = "https://heavens-above.com/PassSummary.aspx";

/// NORAD catalog id of the ISS.
pub const ISS_SATID: &str = "25544";

const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
(KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36";

const HTTP_TIMEOUT: Duration = Duration::from_secs(12);

static HTTP: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(BROWSER_UA)
        .timeout(HTTP_TIMEOUT)
        .build()
        .expect("HTTP client construction")
});

/// GET a page as text through the shared client.
///
/// Non-2xx statuses become errors; no retries.
pub(crate) async fn get_text(url: &str) -> Result<String, Box<dyn Error>> {
    let body = HTTP.get(url).send().await?.error_for_status()?.text().await?;
    Ok(body)
}

/// The exact query URLs one invocation extracts from.
///
/// Rebuilt deterministically from the same inputs the fetches use, so the
/// `sources` report always names precisely what was (or would be) scraped.
#[derive(Debug, Clone, Serialize)]
pub struct SourceUrls {
    pub timeanddate: String,
    pub earthsky: String,
    /// Absent when no coordinates were supplied; the pass source needs them.
    pub heavens_above: Option<String>,
}

/// Night-sky page URL for a location path like "usa/detroit".
pub fn night_sky_url(location_path: &str) -> String {
    format!("{}{}", TAD_BASE, location_path.trim_start_matches('/'))
}

/// Pass-summary URL for the given observer coordinates.
///
/// The `tz` query parameter carries the zone's *current* abbreviation
/// (e.g. "EDT"), which is what the pass page keys its local times to.
pub fn pass_summary_url(lat: f64, lon: f64, tz: Tz) -> String {
    let tzabbr = now_in(tz).format("%Z").to_string();
    let url = Url::parse_with_params(
        HA_BASE,
        &[
            ("satid", ISS_SATID),
            ("lat", &format!("{lat:.4}")),
            ("lng", &format!("{lon:.4}")),
            ("alt", "0"),
            ("loc", "Observer"),
            ("tz", &tzabbr),
        ],
    )
    .expect("pass summary URL construction");
    url.to_string()
}

/// Build the source-URL set for one configuration.
pub fn build_source_urls(location_path: &str, lat: Option<f64>, lon: Option<f64>, tz: Tz) -> SourceUrls {
    let heavens_above = match (lat, lon) {
        (Some(lat), Some(lon)) => Some(pass_summary_url(lat, lon, tz)),
        _ => None,
    };
    SourceUrls {
        timeanddate: night_sky_url(location_path),
        earthsky: EARTHSKY_URL.to_string(),
        heavens_above,
    }
}
