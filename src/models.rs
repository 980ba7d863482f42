//! Data models for the extracted night-sky data.
//!
//! This module defines the structures produced by the scrapers and consumed
//! by the windowing engine and report renderers:
//! - [`PlanetWindow`]: one body's rise/set window as scraped text
//! - [`NightSummary`]: everything extracted from the night-sky page for one location
//! - [`SatellitePass`]: the single best predicted ISS pass
//! - [`SkyBundle`]: the serialization envelope for `--json` output
//!
//! Every `Option` field models a first-class "unknown": the upstream page
//! omitted the value, or the fallback extraction could not locate it. Absence
//! is propagated to formatting, never turned into an error.

use serde::{Deserialize, Serialize};

use crate::scrapers::SourceUrls;

/// The naked-eye planets the reports care about, in no particular order.
///
/// The extractor keeps every body the page lists (including Uranus and
/// Neptune); consumers that want this canonical subset filter explicitly
/// with [`is_bright_planet`].
pub const BRIGHT_PLANETS: [&str; 5] = ["Mercury", "Venus", "Mars", "Jupiter", "Saturn"];

/// Whether `name` is one of the five bright planets.
pub fn is_bright_planet(name: &str) -> bool {
    BRIGHT_PLANETS.contains(&name)
}

/// One celestial body's visibility window as scraped from the page.
///
/// `rise` and `set` are the page's local-time strings, untouched; parsing
/// into timestamps happens later, in the windowing engine, because only it
/// knows which anchor date and zone to use.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlanetWindow {
    /// Body name as printed by the page, e.g. "Venus".
    pub name: String,
    /// Local rise time text, e.g. "7:12 pm".
    pub rise: Option<String>,
    /// Local set time text.
    pub set: Option<String>,
    /// Free-text visibility note, e.g. "Good visibility".
    pub comment: Option<String>,
}

/// Everything extracted from the night-sky page for one (location, fetch).
///
/// `planets` keeps extraction order: the order rows appeared in the page's
/// table, or the fixed fallback scan order when the table was absent.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NightSummary {
    /// Today's date rendered in the report zone ("%b %d, %Y"). Never scraped.
    pub date: String,
    /// Human city name from the page title, or the raw location path when the
    /// expected heading was absent.
    pub city: String,
    /// Moon illumination as printed, e.g. "83%".
    pub moon_phase: Option<String>,
    /// Length of the night, e.g. "10 hours, 4 minutes".
    pub night_time: Option<String>,
    /// Local sunset time text.
    pub sunset: Option<String>,
    /// Local sunrise time text.
    pub sunrise: Option<String>,
    /// Per-body windows in extraction order.
    pub planets: Vec<PlanetWindow>,
}

/// The best predicted ISS pass from one fetch.
///
/// All fields are the page's own text. Candidate rows are scored and reduced
/// to a single pass at extraction time; the losing candidates are not part of
/// the model.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SatellitePass {
    /// Pass date as printed, e.g. "05 Mar".
    pub date: String,
    /// Local time the pass begins.
    pub start: String,
    /// Maximum altitude as printed, e.g. "64°".
    pub max_alt: String,
    /// Local time of maximum altitude.
    pub max_time: String,
    /// Visual magnitude as printed; lower is brighter.
    pub mag: String,
}

/// Everything one invocation extracted, for `--json` output.
#[derive(Debug, Clone, Serialize)]
pub struct SkyBundle {
    pub summary: NightSummary,
    pub pass: Option<SatellitePass>,
    /// EarthSky's current visible-planets blurb, when it could be fetched.
    pub note: Option<String>,
    pub sources: SourceUrls,
}
