//! The "weekly" report: a 7-day outlook.
//!
//! The per-body visibility labels are deliberately static editorial copy, a
//! coarse description of when each body is generally worth looking for, not
//! something computed from the scraped rise/set times.

use super::SOURCES_LINE;
use crate::models::{NightSummary, SatellitePass};

/// Bright bodies in outlook order (best targets first), not extraction order.
const OUTLOOK_ORDER: [&str; 5] = ["Venus", "Jupiter", "Saturn", "Mars", "Mercury"];

fn outlook_label(name: &str) -> &'static str {
    match name {
        "Venus" | "Jupiter" => "pre-dawn best",
        "Saturn" => "late night -> dawn",
        "Mars" => "after dusk",
        _ => "near twilight — hard",
    }
}

/// Render the weekly outlook starting at `start` (a preformatted date).
pub fn render_weekly(
    summary: &NightSummary,
    pass: Option<&SatellitePass>,
    note: Option<&str>,
    start: &str,
) -> String {
    let mut lines = Vec::new();

    lines.push(format!("WEEKLY OUTLOOK — {} · starting {}", summary.city, start));

    for name in OUTLOOK_ORDER {
        if summary.planets.iter().any(|p| p.name == name) {
            lines.push(format!("- {}: {}", name, outlook_label(name)));
        }
    }

    if let Some(pass) = pass {
        lines.push(format!(
            "- ISS: good pass {} around {} (max {})",
            pass.date, pass.max_time, pass.max_alt
        ));
    }

    if let Some(note) = note {
        lines.push(format!("EarthSky: {note}"));
    }

    lines.push("(For precise nightly times, run the today report.)".to_string());
    lines.push(SOURCES_LINE.to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlanetWindow;

    fn planet(name: &str) -> PlanetWindow {
        PlanetWindow {
            name: name.to_string(),
            rise: None,
            set: None,
            comment: None,
        }
    }

    fn summary_with(names: &[&str]) -> NightSummary {
        NightSummary {
            date: "Mar 05, 2025".to_string(),
            city: "Detroit".to_string(),
            moon_phase: None,
            night_time: None,
            sunset: None,
            sunrise: None,
            planets: names.iter().map(|n| planet(n)).collect(),
        }
    }

    #[test]
    fn test_outlook_order_overrides_extraction_order() {
        // Extraction order is Mercury-first; the outlook reorders.
        let summary = summary_with(&["Mercury", "Venus", "Saturn"]);
        let report = render_weekly(&summary, None, None, "Mar 05, 2025");
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[1], "- Venus: pre-dawn best");
        assert_eq!(lines[2], "- Saturn: late night -> dawn");
        assert_eq!(lines[3], "- Mercury: near twilight — hard");
    }

    #[test]
    fn test_labels_are_static_per_body() {
        let summary = summary_with(&["Jupiter", "Mars"]);
        let report = render_weekly(&summary, None, None, "Mar 05, 2025");

        assert!(report.contains("- Jupiter: pre-dawn best"));
        assert!(report.contains("- Mars: after dusk"));
    }

    #[test]
    fn test_absent_bodies_and_dim_planets_are_skipped() {
        let summary = summary_with(&["Uranus"]);
        let report = render_weekly(&summary, None, None, "Mar 05, 2025");
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "WEEKLY OUTLOOK — Detroit · starting Mar 05, 2025");
        assert_eq!(lines[1], "(For precise nightly times, run the today report.)");
        assert_eq!(lines[2], SOURCES_LINE);
    }

    #[test]
    fn test_iss_outlook_line() {
        let pass = SatellitePass {
            date: "07 Mar".to_string(),
            start: "19:42:10".to_string(),
            max_alt: "64°".to_string(),
            max_time: "19:45:30".to_string(),
            mag: "-3.2".to_string(),
        };
        let summary = summary_with(&[]);
        let report = render_weekly(&summary, Some(&pass), None, "Mar 05, 2025");
        assert!(report.contains("- ISS: good pass 07 Mar around 19:45:30 (max 64°)"));
    }
}
