//! Look-ahead windowing over rise/set times.
//!
//! The "now" report asks one question per bright planet: is it up right now,
//! does it rise within the look-ahead horizon, or does it set within it?
//! This module answers that from the scraped windows, including the one
//! piece of genuine time arithmetic in the system: a set time that reads
//! *earlier* than its rise time means the window crosses midnight, and the
//! set belongs to tomorrow.
//!
//! Classification is separated from formatting: [`classify`] returns
//! structured [`Activity`] values and the report layer turns them into
//! lines, so the rules can be exercised against pinned anchor dates.

use chrono::{DateTime, Duration, NaiveDate};
use chrono_tz::Tz;

use crate::models::{is_bright_planet, PlanetWindow, SatellitePass};
use crate::times::{now_in, parse_local_time_on};

/// Look-ahead horizon for the "now" report.
pub const LOOKAHEAD_HOURS: i64 = 3;

/// One body's window with times resolved onto an anchor date.
///
/// Either side is `None` when the page omitted the time or it failed to
/// parse; such bodies never classify (no partial rise-only classification).
#[derive(Debug, Clone)]
pub struct BodyWindow {
    pub name: String,
    pub rise: Option<DateTime<Tz>>,
    pub set: Option<DateTime<Tz>>,
}

/// How a body relates to the look-ahead window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Above the horizon right now; sets after the given span.
    UpNow { sets_in: Duration },
    /// Below the horizon, rising within the window.
    RisesSoon { rises_in: Duration },
    /// Already up before `now` and setting within the window.
    SetsSoon { sets_in: Duration },
}

/// A classified body. Bodies outside the window are simply absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub name: String,
    pub status: Status,
}

/// Resolve the bright-planet subset of a summary onto today's date in `tz`.
pub fn resolve_bright(planets: &[PlanetWindow], tz: Tz) -> Vec<BodyWindow> {
    resolve_bright_on(now_in(tz).date_naive(), planets, tz)
}

/// [`resolve_bright`] against an explicit anchor date.
pub fn resolve_bright_on(date: NaiveDate, planets: &[PlanetWindow], tz: Tz) -> Vec<BodyWindow> {
    planets
        .iter()
        .filter(|p| is_bright_planet(&p.name))
        .map(|p| BodyWindow {
            name: p.name.clone(),
            rise: p.rise.as_deref().and_then(|s| parse_local_time_on(date, tz, s)),
            set: p.set.as_deref().and_then(|s| parse_local_time_on(date, tz, s)),
        })
        .collect()
}

/// Classify each fully-resolved window against `[now, now + horizon_hours]`.
///
/// Rules, in priority order (first hit wins; anything else is omitted):
/// 1. `rise <= now <= set`: up now, with time remaining until set.
/// 2. `now < rise <= horizon`: rises within the window.
/// 3. `now < set <= horizon` with `rise < now`: sets within the window.
///
/// Before comparing, a set at or before its rise gets 24 hours added; the
/// window crosses midnight and the set belongs to the next day. That is the
/// only rollover applied.
pub fn classify(now: DateTime<Tz>, horizon_hours: i64, windows: &[BodyWindow]) -> Vec<Activity> {
    let horizon = now + Duration::hours(horizon_hours);
    let mut activities = Vec::new();

    for window in windows {
        let (Some(rise), Some(set)) = (window.rise, window.set) else {
            continue;
        };
        let set = if set <= rise { set + Duration::hours(24) } else { set };

        let status = if rise <= now && now <= set {
            Some(Status::UpNow { sets_in: set - now })
        } else if now < rise && rise <= horizon {
            Some(Status::RisesSoon { rises_in: rise - now })
        } else if now < set && set <= horizon && rise < now {
            Some(Status::SetsSoon { sets_in: set - now })
        } else {
            None
        };

        if let Some(status) = status {
            activities.push(Activity {
                name: window.name.clone(),
                status,
            });
        }
    }
    activities
}

/// The pass's max-altitude instant, if it lands inside `[now, horizon]`.
///
/// The pass's textual `date` is required to be present but is deliberately
/// not compared against today; a pass on another date whose clock time
/// happens to land in the window would slip through. Lenient on purpose.
pub fn pass_max_in_window(
    pass: &SatellitePass,
    tz: Tz,
    now: DateTime<Tz>,
    horizon: DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    if pass.date.is_empty() {
        return None;
    }
    let max_dt = parse_local_time_on(now.date_naive(), tz, &pass.max_time)?;
    (now <= max_dt && max_dt <= horizon).then_some(max_dt)
}
