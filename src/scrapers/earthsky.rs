//! EarthSky "visible planets tonight" note.
//!
//! Strictly optional garnish for the today/weekly reports: the first
//! paragraph after EarthSky's "Visible planets" heading, clipped to 400
//! characters. Unlike the other sources, *everything* degrades to `None`
//! here, transport failures included; a report is never worse off for this
//! page being down.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::{info, instrument, warn};

use super::{get_text, EARTHSKY_URL};
use crate::utils::truncate_with_ellipsis;

const NOTE_MAX_CHARS: usize = 400;

static VISIBLE_PLANETS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Visible planets").unwrap());

/// Fetch the current visible-planets blurb, or `None` on any failure.
#[instrument(level = "info", skip_all)]
pub async fn fetch_visible_planets_note() -> Option<String> {
    let html = match get_text(EARTHSKY_URL).await {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "EarthSky fetch failed; continuing without note");
            return None;
        }
    };
    let note = note_from_html(&html);
    match &note {
        Some(n) => info!(chars = n.chars().count(), "Extracted EarthSky note"),
        None => warn!("EarthSky page had no usable paragraph"),
    }
    note
}

/// Extract the note from page HTML.
///
/// Takes the first `<p>` after an `<h1>`/`<h2>` matching "Visible planets";
/// when no such heading exists, the page's first paragraph stands in.
pub fn note_from_html(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);

    let mut past_heading = false;
    let mut first_paragraph: Option<String> = None;

    for node in doc.root_element().descendants() {
        let Some(el) = ElementRef::wrap(node) else {
            continue;
        };
        match el.value().name() {
            "h1" | "h2" => {
                if VISIBLE_PLANETS_RE.is_match(&flatten_text(el)) {
                    past_heading = true;
                }
            }
            "p" => {
                let text = flatten_text(el);
                if text.is_empty() {
                    continue;
                }
                if past_heading {
                    return Some(truncate_with_ellipsis(&text, NOTE_MAX_CHARS));
                }
                if first_paragraph.is_none() {
                    first_paragraph = Some(text);
                }
            }
            _ => {}
        }
    }

    // A matched heading with nothing after it yields nothing; the
    // first-paragraph stand-in only applies when the heading was absent.
    if past_heading {
        return None;
    }
    first_paragraph.map(|p| truncate_with_ellipsis(&p, NOTE_MAX_CHARS))
}

fn flatten_text(el: ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
