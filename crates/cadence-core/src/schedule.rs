//! Interval parsing and next-run calculation.
//!
//! Interval literals use jiff's friendly duration format (`30s`, `5m`, `1h`,
//! `1h30m`). Anything that does not parse to a strictly positive duration is
//! replaced with [`DEFAULT_INTERVAL`], both when a plan is created and when a
//! snapshot is loaded.

use jiff::{SignedDuration, Timestamp};
use log::warn;

/// Interval applied to periodic tasks whose literal is empty or invalid.
pub const DEFAULT_INTERVAL: &str = "30s";

/// Parse an interval literal into a strictly positive duration.
///
/// # Examples
///
/// ```rust
/// use cadence_core::schedule::parse_interval;
/// use jiff::SignedDuration;
///
/// assert_eq!(parse_interval("1h"), Some(SignedDuration::from_hours(1)));
/// assert_eq!(parse_interval(" 30s "), Some(SignedDuration::from_secs(30)));
/// assert_eq!(parse_interval("soon"), None);
/// assert_eq!(parse_interval("0s"), None);
/// ```
pub fn parse_interval(literal: &str) -> Option<SignedDuration> {
    let literal = literal.trim();
    if literal.is_empty() {
        return None;
    }
    literal
        .parse::<SignedDuration>()
        .ok()
        .filter(|duration| duration.is_positive())
}

/// The duration of [`DEFAULT_INTERVAL`].
pub fn default_interval() -> SignedDuration {
    SignedDuration::from_secs(30)
}

/// Return a valid interval literal for `task_id`.
///
/// Valid literals are returned trimmed; anything else is replaced with
/// [`DEFAULT_INTERVAL`] and a warning is logged.
pub fn canonicalize_interval(task_id: &str, literal: Option<&str>) -> String {
    match literal.map(str::trim) {
        Some(literal) if parse_interval(literal).is_some() => literal.to_string(),
        Some("") | None => {
            warn!("Task {task_id} has empty interval, using default {DEFAULT_INTERVAL}");
            DEFAULT_INTERVAL.to_string()
        }
        Some(literal) => {
            warn!(
                "Task {task_id} has invalid interval '{literal}', using default {DEFAULT_INTERVAL}"
            );
            DEFAULT_INTERVAL.to_string()
        }
    }
}

/// Compute the next run as `from + interval`.
///
/// `from` is always the moment of scheduling, never the previous `next_run`,
/// so a delayed sweep skips ahead instead of catching up on missed runs.
pub fn next_run(interval: &str, from: Timestamp) -> Timestamp {
    let duration = parse_interval(interval).unwrap_or_else(default_interval);
    from.checked_add(duration).unwrap_or(Timestamp::MAX)
}
