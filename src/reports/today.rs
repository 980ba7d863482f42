//! The "today" report: the full nightly rundown.

use super::SOURCES_LINE;
use crate::models::{is_bright_planet, NightSummary, SatellitePass};

/// Render the daily report.
///
/// Field order is fixed: header, sun line, moon line, planet block, ISS
/// line, EarthSky line, sources line. Absent data contributes no line; the
/// sun line's two slots are the only place an explicit "?" appears, and the
/// line itself only renders when at least one of sunset/sunrise is known.
pub fn render_today(
    summary: &NightSummary,
    pass: Option<&SatellitePass>,
    note: Option<&str>,
) -> String {
    let mut lines = Vec::new();

    lines.push(format!("TODAY — {} · {}", summary.city, summary.date));

    if summary.sunset.is_some() || summary.sunrise.is_some() {
        lines.push(format!(
            "Sunset {} · Sunrise {}",
            summary.sunset.as_deref().unwrap_or("?"),
            summary.sunrise.as_deref().unwrap_or("?")
        ));
    }

    if let Some(moon) = &summary.moon_phase {
        lines.push(format!("Moon: {moon}"));
    }

    let planet_lines: Vec<String> = summary
        .planets
        .iter()
        .filter(|p| is_bright_planet(&p.name))
        .map(|p| {
            let mut bits = Vec::new();
            if let Some(rise) = &p.rise {
                bits.push(format!("↑ {rise}"));
            }
            if let Some(set) = &p.set {
                bits.push(format!("↓ {set}"));
            }
            if let Some(comment) = &p.comment {
                bits.push(comment.clone());
            }
            if bits.is_empty() {
                format!("- {}", p.name)
            } else {
                format!("- {}: {}", p.name, bits.join(", "))
            }
        })
        .collect();
    if !planet_lines.is_empty() {
        lines.push("Planets:".to_string());
        lines.extend(planet_lines);
    }

    if let Some(pass) = pass {
        lines.push(format!(
            "ISS: start {}, max {} at {} (mag {})",
            pass.start, pass.max_alt, pass.max_time, pass.mag
        ));
    }

    if let Some(note) = note {
        lines.push(format!("EarthSky: {note}"));
    }

    lines.push(SOURCES_LINE.to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlanetWindow;

    fn full_summary() -> NightSummary {
        NightSummary {
            date: "Mar 05, 2025".to_string(),
            city: "Detroit".to_string(),
            moon_phase: Some("83%".to_string()),
            night_time: Some("10 hours, 4 minutes".to_string()),
            sunset: Some("6:28 pm".to_string()),
            sunrise: None,
            planets: vec![
                PlanetWindow {
                    name: "Venus".to_string(),
                    rise: Some("7:12 pm".to_string()),
                    set: Some("5:02 am".to_string()),
                    comment: Some("Good visibility".to_string()),
                },
                PlanetWindow {
                    name: "Neptune".to_string(),
                    rise: Some("9:00 am".to_string()),
                    set: Some("9:00 pm".to_string()),
                    comment: None,
                },
                PlanetWindow {
                    name: "Mars".to_string(),
                    rise: None,
                    set: None,
                    comment: None,
                },
            ],
        }
    }

    #[test]
    fn test_full_report_shape() {
        let report = render_today(&full_summary(), None, Some("Venus blazes in the west."));
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "TODAY — Detroit · Mar 05, 2025");
        assert_eq!(lines[1], "Sunset 6:28 pm · Sunrise ?");
        assert_eq!(lines[2], "Moon: 83%");
        assert_eq!(lines[3], "Planets:");
        assert_eq!(lines[4], "- Venus: ↑ 7:12 pm, ↓ 5:02 am, Good visibility");
        // Neptune is not a bright planet; Mars has no bits at all.
        assert_eq!(lines[5], "- Mars");
        assert_eq!(lines[6], "EarthSky: Venus blazes in the west.");
        assert_eq!(lines[7], SOURCES_LINE);
    }

    #[test]
    fn test_iss_line() {
        let pass = SatellitePass {
            date: "05 Mar".to_string(),
            start: "19:42:10".to_string(),
            max_alt: "64°".to_string(),
            max_time: "19:45:30".to_string(),
            mag: "-3.2".to_string(),
        };
        let report = render_today(&full_summary(), Some(&pass), None);
        assert!(report.contains("ISS: start 19:42:10, max 64° at 19:45:30 (mag -3.2)"));
    }

    #[test]
    fn test_minimal_summary_omits_sections() {
        let summary = NightSummary {
            date: "Mar 05, 2025".to_string(),
            city: "usa/detroit".to_string(),
            moon_phase: None,
            night_time: None,
            sunset: None,
            sunrise: None,
            planets: vec![],
        };
        let report = render_today(&summary, None, None);
        let lines: Vec<&str> = report.lines().collect();

        // Header and sources only; no placeholders anywhere in between.
        assert_eq!(lines.len(), 2);
        assert!(!report.contains("Sunset"));
        assert!(!report.contains("Planets:"));
        assert!(!report.contains("None"));
    }
}
