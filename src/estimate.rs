//! Time-to-reels estimation
//!
//! The tracker never asks the user to count. The reels figure submitted when a
//! session ends is `round(elapsed / seconds_per_reel)`, where the rate is a
//! user preference bounded to [`SecondsPerReel::MIN`, `SecondsPerReel::MAX`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Average seconds the user spends on one reel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecondsPerReel(u32);

impl SecondsPerReel {
    pub const MIN: u32 = 3;
    pub const MAX: u32 = 30;
    pub const DEFAULT: u32 = 8;

    /// Build a rate, clamping into the allowed range
    pub fn new(seconds: u32) -> Self {
        Self(seconds.clamp(Self::MIN, Self::MAX))
    }

    /// Build a rate only if it is already inside the allowed range
    pub fn checked(seconds: u32) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&seconds).then_some(Self(seconds))
    }

    /// Decode a persisted value.
    ///
    /// Absent, unparsable or out-of-range values all fall back to the default
    /// rather than being clamped.
    pub fn from_stored(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse::<u32>().ok())
            .and_then(Self::checked)
            .unwrap_or_default()
    }

    /// Encoding used for persistence
    pub fn to_stored(self) -> String {
        self.0.to_string()
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for SecondsPerReel {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl std::fmt::Display for SecondsPerReel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Estimated reels for `elapsed_seconds` at `rate`.
///
/// Halves round away from zero.
pub fn estimate_reels(elapsed_seconds: u64, rate: SecondsPerReel) -> u32 {
    let rate = u64::from(rate.get());
    let reels = elapsed_seconds.saturating_add(rate / 2) / rate;
    u32::try_from(reels).unwrap_or(u32::MAX)
}

/// Running estimate for an active session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estimate {
    /// Whole seconds since the session started, never negative
    pub duration_seconds: u64,
    pub estimated_reels: u32,
}

impl Estimate {
    /// Estimate for a session that started at `start`, as of `now`
    pub fn since(start: DateTime<Utc>, now: DateTime<Utc>, rate: SecondsPerReel) -> Self {
        let elapsed_ms = (now - start).num_milliseconds().max(0);
        // round to the nearest whole second
        let duration_seconds = ((elapsed_ms + 500) / 1000) as u64;

        Self {
            duration_seconds,
            estimated_reels: estimate_reels(duration_seconds, rate),
        }
    }

    /// Duration rounded to whole minutes
    pub fn minutes(&self) -> u64 {
        (self.duration_seconds + 30) / 60
    }

    /// One-line summary shown before ending a session
    pub fn summary(&self) -> String {
        format!(
            "{} reels (estimated) • {} min",
            self.estimated_reels,
            self.minutes()
        )
    }
}

/// Format seconds as a compact clock (`m:ss` or `h:mm:ss`)
pub fn format_elapsed(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}
