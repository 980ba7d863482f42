//! Report renderers for the three time horizons.
//!
//! Pure formatting over already-extracted data. Each renderer builds a fixed
//! shape of lines and joins them; a field the extraction could not produce
//! simply contributes no line. The only placeholder anywhere is the "?" in
//! the today report's sunset/sunrise slots; everything else is omission.
//!
//! # Submodules
//!
//! - [`now`]: the next ~3 hours of windowed planet activity, plus an ISS
//!   line when the best pass peaks inside the window
//! - [`today`]: the full nightly rundown
//! - [`weekly`]: a 7-day outlook with fixed editorial visibility labels
//! - [`sources`]: the exact URLs the data came from

pub mod now;
pub mod sources;
pub mod today;
pub mod weekly;

/// Closing attribution shared by the today and weekly reports.
pub(crate) const SOURCES_LINE: &str = "Sources: timeanddate.com · Heavens-Above · EarthSky";
