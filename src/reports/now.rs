//! The "now" report: what happens in the next ~3 hours.

use chrono::{DateTime, Duration};
use chrono_tz::Tz;

use crate::models::{NightSummary, SatellitePass};
use crate::times::format_span;
use crate::windowing::{classify, pass_max_in_window, resolve_bright_on, Status, LOOKAHEAD_HOURS};

/// Render the look-ahead report as of `now`.
///
/// Shape: header; a "Planets (next 3h):" block only when something
/// classified; an ISS line only when the best pass peaks inside the window;
/// the night window when known; a no-activity fallback when nothing else
/// qualified; and a closing tip, always.
pub fn render_now(
    summary: &NightSummary,
    pass: Option<&SatellitePass>,
    tz: Tz,
    now: DateTime<Tz>,
) -> String {
    let horizon = now + Duration::hours(LOOKAHEAD_HOURS);
    let mut lines = Vec::new();

    lines.push(format!(
        "NOW — {} · {}",
        summary.city,
        now.format("%b %d, %Y %-I:%M %p")
    ));

    let windows = resolve_bright_on(now.date_naive(), &summary.planets, tz);
    let activities = classify(now, LOOKAHEAD_HOURS, &windows);
    if !activities.is_empty() {
        lines.push("Planets (next 3h):".to_string());
        for activity in &activities {
            let line = match &activity.status {
                Status::UpNow { sets_in } => {
                    format!("- {}: up now, sets in {}", activity.name, format_span(*sets_in))
                }
                Status::RisesSoon { rises_in } => {
                    format!("- {}: rises in {}", activity.name, format_span(*rises_in))
                }
                Status::SetsSoon { sets_in } => {
                    format!("- {}: sets in {}", activity.name, format_span(*sets_in))
                }
            };
            lines.push(line);
        }
    }

    if let Some(pass) = pass {
        if let Some(max_dt) = pass_max_in_window(pass, tz, now, horizon) {
            lines.push(format!(
                "ISS: max at {} (max {})",
                max_dt.format("%-I:%M %p"),
                pass.max_alt
            ));
        }
    }

    if let Some(night_time) = &summary.night_time {
        lines.push(format!("Night window: {night_time}"));
    }

    if lines.len() == 1 {
        lines.push("No obvious activity within ~3 hours.".to_string());
    }
    lines.push("Tip: run the today report for full details.".to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlanetWindow;
    use chrono::{NaiveDate, TimeZone};
    use chrono_tz::America::Detroit;
    use chrono_tz::Tz;

    fn summary_with(planets: Vec<PlanetWindow>) -> NightSummary {
        NightSummary {
            date: "Mar 05, 2025".to_string(),
            city: "Detroit".to_string(),
            moon_phase: None,
            night_time: Some("10 hours, 4 minutes".to_string()),
            sunset: None,
            sunrise: None,
            planets,
        }
    }

    fn planet(name: &str, rise: &str, set: &str) -> PlanetWindow {
        PlanetWindow {
            name: name.to_string(),
            rise: Some(rise.to_string()),
            set: Some(set.to_string()),
            comment: None,
        }
    }

    fn nine_pm() -> DateTime<Tz> {
        Detroit
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(2025, 3, 5)
                    .unwrap()
                    .and_hms_opt(21, 0, 0)
                    .unwrap(),
            )
            .single()
            .unwrap()
    }

    #[test]
    fn test_active_planet_and_night_window() {
        let summary = summary_with(vec![planet("Venus", "8:00 pm", "11:00 pm")]);
        let report = render_now(&summary, None, Detroit, nine_pm());

        assert!(report.starts_with("NOW — Detroit · Mar 05, 2025 9:00 PM"));
        assert!(report.contains("Planets (next 3h):"));
        assert!(report.contains("- Venus: up now, sets in 2h 0m"));
        assert!(report.contains("Night window: 10 hours, 4 minutes"));
        assert!(!report.contains("No obvious activity"));
        assert!(report.ends_with("Tip: run the today report for full details."));
    }

    #[test]
    fn test_pass_inside_window() {
        let summary = summary_with(vec![]);
        let pass = SatellitePass {
            date: "05 Mar".to_string(),
            start: "21:40:00".to_string(),
            max_alt: "64°".to_string(),
            max_time: "21:45:00".to_string(),
            mag: "-3.2".to_string(),
        };
        let report = render_now(&summary, Some(&pass), Detroit, nine_pm());
        assert!(report.contains("ISS: max at 9:45 PM (max 64°)"));
    }

    #[test]
    fn test_pass_outside_window_is_silent() {
        let summary = summary_with(vec![]);
        let pass = SatellitePass {
            date: "05 Mar".to_string(),
            start: "05:40:00".to_string(),
            max_alt: "64°".to_string(),
            max_time: "05:45:00".to_string(),
            mag: "-3.2".to_string(),
        };
        let report = render_now(&summary, Some(&pass), Detroit, nine_pm());
        assert!(!report.contains("ISS:"));
    }

    #[test]
    fn test_quiet_night_fallback() {
        let mut summary = summary_with(vec![]);
        summary.night_time = None;
        let report = render_now(&summary, None, Detroit, nine_pm());

        assert!(report.contains("No obvious activity within ~3 hours."));
        assert!(!report.contains("Planets (next 3h):"));
    }
}
