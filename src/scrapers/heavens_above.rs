//! ISS pass extraction and best-pass selection.
//!
//! The Heavens-Above pass summary lists every predicted visible ISS pass for
//! the next ten days, one table row per pass. Only one pass survives a fetch:
//! each candidate row is scored and the winner is kept, so raw candidates
//! never leave this module.
//!
//! # Scoring
//!
//! `score = max_altitude_degrees - magnitude * 5`: higher passes and
//! brighter (lower, often negative, magnitude) passes both win. A row whose
//! altitude or magnitude fails to parse scores with the worst-case sentinels
//! (0°, magnitude 99.0) rather than being discarded; a row with fewer than
//! 10 columns is not a pass row at all and is skipped before scoring.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::error::Error;
use tracing::{debug, info, instrument};

use super::{get_text, pass_summary_url};
use crate::models::SatellitePass;
use chrono_tz::Tz;

/// Pass-table column positions (date, magnitude, start, max time, max alt).
const COL_DATE: usize = 0;
const COL_MAG: usize = 1;
const COL_START: usize = 2;
const COL_MAX_TIME: usize = 5;
const COL_MAX_ALT: usize = 6;

/// Minimum columns for a row to count as a pass row.
const MIN_COLS: usize = 10;

static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]").unwrap());

/// Fetch the pass summary for the given observer and select the best pass.
///
/// `Ok(None)` means the page had no usable pass rows (no table, or every row
/// malformed); an `Err` is a transport failure, which the caller typically
/// downgrades to "no satellite data".
#[instrument(level = "info", skip_all, fields(%lat, %lon))]
pub async fn fetch_best_pass(
    lat: f64,
    lon: f64,
    tz: Tz,
) -> Result<Option<SatellitePass>, Box<dyn Error>> {
    let url = pass_summary_url(lat, lon, tz);
    let html = get_text(&url).await?;
    let rows = extract_pass_rows(&html);
    let best = select_best_pass(&rows);
    match &best {
        Some(pass) => info!(
            candidates = rows.len(),
            max_alt = %pass.max_alt,
            mag = %pass.mag,
            "Selected best pass"
        ),
        None => info!(candidates = rows.len(), "No usable pass rows"),
    }
    Ok(best)
}

/// Harvest raw candidate rows from the first table on the page.
///
/// Header rows come back with zero `<td>` cells and fall out later at the
/// column-count check. No table means no rows.
pub fn extract_pass_rows(html: &str) -> Vec<Vec<String>> {
    let doc = Html::parse_document(html);
    let table_sel = Selector::parse("table").unwrap();
    let row_sel = Selector::parse("tr").unwrap();
    let cell_sel = Selector::parse("td").unwrap();

    let Some(table) = doc.select(&table_sel).next() else {
        return Vec::new();
    };

    table
        .select(&row_sel)
        .map(|row| {
            row.select(&cell_sel)
                .map(|cell| {
                    cell.text()
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect()
        })
        .collect()
}

/// Pick the single best pass from candidate rows.
///
/// Strict running max in input order: the first qualifying row starts as
/// best, and a later row only replaces it on a strictly greater score, so
/// ties keep the earlier pass. Returns `None` when no row qualified.
pub fn select_best_pass(rows: &[Vec<String>]) -> Option<SatellitePass> {
    let mut best: Option<(f64, SatellitePass)> = None;

    for row in rows {
        if row.len() < MIN_COLS {
            debug!(cols = row.len(), "Skipping short pass row");
            continue;
        }
        let score = pass_score(&row[COL_MAX_ALT], &row[COL_MAG]);
        let better = match &best {
            None => true,
            Some((best_score, _)) => score > *best_score,
        };
        if better {
            best = Some((
                score,
                SatellitePass {
                    date: row[COL_DATE].clone(),
                    start: row[COL_START].clone(),
                    max_alt: row[COL_MAX_ALT].clone(),
                    max_time: row[COL_MAX_TIME].clone(),
                    mag: row[COL_MAG].clone(),
                },
            ));
        }
    }

    best.map(|(_, pass)| pass)
}

/// Score one candidate row.
///
/// Either value failing to parse substitutes the worst-case pair (0°, 99.0)
/// for the whole row, not just the broken field.
fn pass_score(max_alt: &str, mag: &str) -> f64 {
    let parsed = NON_DIGIT
        .replace_all(max_alt, "")
        .parse::<i64>()
        .ok()
        .zip(mag.trim().parse::<f64>().ok());
    let (alt_deg, mag_val) = parsed.unwrap_or((0, 99.0));
    alt_deg as f64 - mag_val * 5.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, mag: &str, alt: &str) -> Vec<String> {
        // Real pass rows carry 11 columns; only 0/1/2/5/6 matter here.
        vec![
            date.to_string(),
            mag.to_string(),
            "19:42:10".to_string(),
            "10°".to_string(),
            "SSW".to_string(),
            "19:45:30".to_string(),
            alt.to_string(),
            "S".to_string(),
            "19:48:51".to_string(),
            "10°".to_string(),
            "SE".to_string(),
        ]
    }

    #[test]
    fn test_tie_keeps_earlier_row() {
        // Scores: 10, 25, 25, 5. The first of the tied maximum wins.
        let rows = vec![
            row("A", "2.0", "20°"),
            row("B", "2.0", "35°"),
            row("C", "2.0", "35°"),
            row("D", "2.0", "15°"),
        ];
        let best = select_best_pass(&rows).unwrap();
        assert_eq!(best.date, "B");
    }

    #[test]
    fn test_empty_and_short_rows_yield_none() {
        assert!(select_best_pass(&[]).is_none());

        let short = vec![vec!["05 Mar".to_string(), "-3.2".to_string()]];
        assert!(select_best_pass(&short).is_none());
    }

    #[test]
    fn test_malformed_values_take_sentinel_score() {
        // Garbage altitude *and* magnitude: 0 - 99*5 = -495.
        let rows = vec![row("bad", "n/a", "—"), row("ok", "0.0", "10°")];
        let best = select_best_pass(&rows).unwrap();
        assert_eq!(best.date, "ok");
    }

    #[test]
    fn test_one_malformed_value_poisons_both() {
        // A high altitude cannot rescue a row whose magnitude is garbage.
        let rows = vec![row("tall-but-broken", "x", "89°"), row("modest", "1.0", "20°")];
        let best = select_best_pass(&rows).unwrap();
        assert_eq!(best.date, "modest");
    }

    #[test]
    fn test_brighter_magnitude_wins_at_equal_altitude() {
        let rows = vec![row("dim", "1.5", "40°"), row("bright", "-3.0", "40°")];
        let best = select_best_pass(&rows).unwrap();
        assert_eq!(best.date, "bright");
    }

    #[test]
    fn test_extract_rows_from_table() {
        let html = r#"
            <html><body><table>
              <tr><th>Date</th><th>Mag</th></tr>
              <tr>
                <td>05 Mar</td><td>-3.2</td><td>19:42:10</td><td>10°</td><td>SSW</td>
                <td>19:45:30</td><td>64°</td><td>S</td><td>19:48:51</td><td>10°</td><td>SE</td>
              </tr>
            </table></body></html>"#;
        let rows = extract_pass_rows(html);
        // Header row has no <td> cells; it survives extraction but can never score.
        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_empty());
        assert_eq!(rows[1].len(), 11);
        assert_eq!(rows[1][1], "-3.2");

        let best = select_best_pass(&rows).unwrap();
        assert_eq!(best.max_alt, "64°");
        assert_eq!(best.max_time, "19:45:30");
        assert_eq!(best.start, "19:42:10");
    }

    #[test]
    fn test_no_table_yields_no_rows() {
        assert!(extract_pass_rows("<html><body><p>no data</p></body></html>").is_empty());
    }
}
