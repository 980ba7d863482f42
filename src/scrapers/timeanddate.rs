//! Night-sky page extractor.
//!
//! Scrapes the timeanddate.com "Night Sky Tonight" page for one location
//! into a [`NightSummary`]. Extraction is defensive by construction: the
//! page's layout has drifted before and will drift again, so every field
//! degrades independently: a missing marker, heading, or table leaves that
//! field `None` (or the planet list empty) and never fails the call. Only
//! transport problems surface as errors.
//!
//! # Extraction tiers
//!
//! Planet windows come from two strategies, tried in order:
//!
//! 1. **Table tier**: locate the "Planets Visible in …" heading, take the
//!    next `<table>` in document order, and harvest positional columns from
//!    each row (name, rise, set, one skipped, comment). Rows with fewer than
//!    five columns are dropped silently.
//! 2. **Per-heading tier**: when the table produced nothing, scan for a
//!    "`<Body>` rise and set" `<h3>` per known body and pull up to two
//!    `H:MM am/pm` tokens plus a visibility phrase out of the surrounding
//!    block's text.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use tracing::{debug, info, instrument};

use super::{get_text, night_sky_url};
use crate::models::{NightSummary, PlanetWindow};
use crate::times::now_in;
use chrono_tz::Tz;

/// Bodies probed by the per-heading fallback, in scan order.
const FALLBACK_BODIES: [&str; 7] = [
    "Mercury", "Venus", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune",
];

const CITY_PREFIX: &str = "Night Sky Tonight in ";

static NIGHT_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Night Time:\s*(.+?)\s*Sunset:\s*(.+?)\s*Sunrise:\s*(.+?)(?:\s+Moon:.*)?$").unwrap()
});
static MOON_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Moon:\s*([0-9.]+%)").unwrap());
static PLANETS_HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Planets Visible in").unwrap());
static TIME_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2}:\d{2}\s*[ap]m)\b").unwrap());
static VISIBILITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(Good|Fairly good|Average|Difficult|Perfect|Very difficult).*?visibility")
        .unwrap()
});

/// Fetch and parse the night-sky page for a location path like "usa/detroit".
///
/// # Errors
///
/// Only transport failures (network error, timeout, non-2xx); a page whose
/// layout no longer matches still yields a (possibly minimal) summary.
#[instrument(level = "info", skip_all, fields(%location_path))]
pub async fn fetch_night_summary(
    location_path: &str,
    tz: Tz,
) -> Result<NightSummary, Box<dyn Error>> {
    let url = night_sky_url(location_path);
    let html = get_text(&url).await?;
    let summary = parse_night_summary(&html, location_path, tz);
    info!(
        city = %summary.city,
        planets = summary.planets.len(),
        has_sun_times = summary.sunset.is_some() || summary.sunrise.is_some(),
        "Parsed night-sky page"
    );
    Ok(summary)
}

/// Parse a night-sky page. Never fails; every field degrades independently.
pub fn parse_night_summary(html: &str, location_path: &str, tz: Tz) -> NightSummary {
    let doc = Html::parse_document(html);

    let city = extract_city(&doc).unwrap_or_else(|| location_path.to_string());

    let mut moon_phase = None;
    let mut night_time = None;
    let mut sunset = None;
    let mut sunrise = None;

    if let Some(block) = block_text_containing(&doc, "night time:") {
        if let Some(m) = MOON_RE.captures(&block) {
            moon_phase = Some(m[1].to_string());
        }
        if let Some(nt) = NIGHT_BLOCK_RE.captures(&block) {
            night_time = Some(nt[1].trim().to_string());
            sunset = Some(nt[2].trim().to_string());
            sunrise = Some(nt[3].trim().to_string());
        }
    }

    let mut planets = extract_planet_table(&doc);
    if planets.is_empty() {
        debug!("No planets table; trying per-heading fallback");
        planets = extract_planet_sections(&doc);
    }

    NightSummary {
        date: now_in(tz).format("%b %d, %Y").to_string(),
        city,
        moon_phase,
        night_time,
        sunset,
        sunrise,
        planets,
    }
}

/// City name from the page's `<h1>`, with the title boilerplate stripped.
fn extract_city(doc: &Html) -> Option<String> {
    let h1 = Selector::parse("h1").unwrap();
    let heading = doc.select(&h1).next()?;
    let city = flatten_text(heading).replace(CITY_PREFIX, "").trim().to_string();
    if city.is_empty() { None } else { Some(city) }
}

/// An element's text with every piece trimmed and joined by single spaces.
fn flatten_text(el: ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Flattened text of the first element whose *own* text nodes contain
/// `marker` (case-insensitive). Mirrors finding a text node and reading its
/// parent block.
fn block_text_containing(doc: &Html, marker: &str) -> Option<String> {
    let any = Selector::parse("*").unwrap();
    doc.select(&any)
        .find(|el| {
            el.children()
                .filter_map(|c| c.value().as_text())
                .any(|t| t.to_lowercase().contains(marker))
        })
        .map(flatten_text)
}

/// Primary tier: positional columns out of the planets-visible table.
fn extract_planet_table(doc: &Html) -> Vec<PlanetWindow> {
    let Some(table) = table_after_heading(doc, &PLANETS_HEADING_RE) else {
        return Vec::new();
    };

    let row_sel = Selector::parse("tbody tr").unwrap();
    let cell_sel = Selector::parse("td, th").unwrap();

    let mut planets = Vec::new();
    for row in table.select(&row_sel) {
        let cols: Vec<String> = row.select(&cell_sel).map(flatten_text).collect();
        if cols.len() < 5 {
            debug!(cols = cols.len(), "Skipping short planet row");
            continue;
        }
        planets.push(PlanetWindow {
            name: cols[0].clone(),
            rise: non_empty(&cols[1]),
            set: non_empty(&cols[2]),
            comment: non_empty(&cols[4]),
        });
    }
    planets
}

/// First `<table>` following the heading text in document order.
fn table_after_heading<'a>(doc: &'a Html, heading_re: &Regex) -> Option<ElementRef<'a>> {
    let mut past_heading = false;
    for node in doc.root_element().descendants() {
        if let Some(text) = node.value().as_text() {
            if heading_re.is_match(text) {
                past_heading = true;
            }
        } else if past_heading {
            if let Some(el) = ElementRef::wrap(node) {
                if el.value().name() == "table" {
                    return Some(el);
                }
            }
        }
    }
    None
}

/// Fallback tier: one "`<Body>` rise and set" section per known body.
fn extract_planet_sections(doc: &Html) -> Vec<PlanetWindow> {
    let h3_sel = Selector::parse("h3").unwrap();
    let mut planets = Vec::new();

    for body in FALLBACK_BODIES {
        let heading_re = Regex::new(&format!(r"(?i)^{body} rise and set")).unwrap();
        let Some(heading) = doc
            .select(&h3_sel)
            .find(|h| heading_re.is_match(flatten_text(*h).trim()))
        else {
            continue;
        };

        // The section's details live in the heading's parent block.
        let text = heading
            .parent()
            .and_then(ElementRef::wrap)
            .map(flatten_text)
            .unwrap_or_default();

        let mut times = TIME_TOKEN_RE.find_iter(&text);
        let rise = times.next().map(|m| m.as_str().to_string());
        let set = times.next().map(|m| m.as_str().to_string());
        let comment = VISIBILITY_RE.find(&text).map(|m| m.as_str().to_string());

        planets.push(PlanetWindow {
            name: body.to_string(),
            rise,
            set,
            comment,
        });
    }
    planets
}

fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() { None } else { Some(t.to_string()) }
}
