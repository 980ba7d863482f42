//! The "sources" report: exactly where the data comes from.

use crate::scrapers::SourceUrls;

/// Render the source-URL list.
///
/// The satellite source needs observer coordinates; when none were supplied
/// its line says how to enable it instead of a URL.
pub fn render_sources(urls: &SourceUrls) -> String {
    let mut lines = Vec::new();
    lines.push("SOURCES:".to_string());
    lines.push(format!("- timeanddate: {}", urls.timeanddate));
    lines.push(format!("- EarthSky: {}", urls.earthsky));
    match &urls.heavens_above {
        Some(url) => lines.push(format!("- Heavens-Above (ISS): {url}")),
        None => lines.push(
            "- Heavens-Above (ISS): supply --lat and --lon to enable".to_string(),
        ),
    }
    lines.join("\n")
}
