//! Local-time parsing and duration formatting.
//!
//! The upstream pages print clock times in whichever format their layout
//! happens to use: 12-hour with a meridiem ("7:12 pm", "07:12PM") or 24-hour
//! with optional seconds ("21:33", "21:33:10"). This module turns those
//! strings into timezone-aware timestamps anchored to a date in a named zone,
//! and formats the durations the reports print.
//!
//! The parser always anchors to *today*, even for a set time that is
//! logically tomorrow relative to a rise time. Day-rollover adjustment is the
//! caller's job (see the windowing engine).

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Accepted clock formats, tried in order; the first that matches wins.
const TIME_FORMATS: [&str; 4] = ["%I:%M %p", "%I:%M%p", "%H:%M", "%H:%M:%S"];

/// Current instant in the given zone.
pub fn now_in(tz: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&tz)
}

/// Parse a scraped local-time string, anchored to today in `tz`.
///
/// # Arguments
///
/// * `tz` - The zone to anchor to. Validated at the configuration boundary;
///   this function assumes it is correct.
/// * `text` - The scraped time token, e.g. "7:12 pm" or "21:33:10".
///
/// # Returns
///
/// A timezone-aware timestamp on today's date in `tz`, or `None` when the
/// input is empty or matches none of the accepted formats. Never panics.
pub fn parse_local_time(tz: Tz, text: &str) -> Option<DateTime<Tz>> {
    parse_local_time_on(now_in(tz).date_naive(), tz, text)
}

/// Parse a scraped local-time string against an explicit anchor date.
///
/// This is [`parse_local_time`] with the anchor made explicit so the
/// windowing rules can be exercised against pinned dates. Surrounding
/// whitespace is trimmed, the input is lowercased, and en-/em-dashes are
/// normalized to plain hyphens before any format is tried.
///
/// A local time that does not exist in `tz` on `date` (spring-forward gap)
/// yields `None`; an ambiguous one (fall-back fold) resolves to the earlier
/// instant.
pub fn parse_local_time_on(date: NaiveDate, tz: Tz, text: &str) -> Option<DateTime<Tz>> {
    let s = text
        .trim()
        .to_lowercase()
        .replace('\u{2013}', "-")
        .replace('\u{2014}', "-");
    if s.is_empty() {
        return None;
    }

    for fmt in TIME_FORMATS {
        let Ok(t) = NaiveTime::parse_from_str(&s, fmt) else {
            continue;
        };
        return match tz.from_local_datetime(&date.and_time(t)) {
            LocalResult::Single(dt) => Some(dt),
            LocalResult::Ambiguous(earliest, _) => Some(earliest),
            LocalResult::None => None,
        };
    }
    None
}

/// Render a duration as "2h 5m" (or "35m" under an hour).
///
/// Rounds to the nearest whole minute and clamps negative spans to "0m".
pub fn format_span(d: Duration) -> String {
    let mut mins = (d.num_seconds() as f64 / 60.0).round() as i64;
    if mins < 0 {
        mins = 0;
    }
    let h = mins / 60;
    let m = mins % 60;
    if h > 0 {
        format!("{h}h {m}m")
    } else {
        format!("{m}m")
    }
}
