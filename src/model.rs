//! Wire types exchanged with the tracking backend
//!
//! The backend owns every one of these records; the client only decodes them
//! (and encodes the two session requests). Decoding is lenient where the
//! backend is known to vary:
//! - timestamps without an offset are read as UTC
//! - missing totals decode as 0
//! - a missing `items` key decodes as an empty list

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One tracked interval of Reels watching
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Backend-assigned identifier
    pub id: i64,
    /// When the backend opened the session
    #[serde(deserialize_with = "deserialize_api_datetime")]
    pub start_time: DateTime<Utc>,
    /// Set once the session has been ended
    #[serde(default, deserialize_with = "deserialize_opt_api_datetime")]
    pub end_time: Option<DateTime<Utc>>,
    /// Whole minutes, computed by the backend on end
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    /// Reels submitted on end
    #[serde(default)]
    pub reels_watched: Option<u32>,
    /// Optional mood label submitted on end
    #[serde(default)]
    pub mood: Option<String>,
    /// Calendar date the backend filed the session under
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl Session {
    /// Whether the backend still considers this session open
    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }
}

/// Mood choices offered when ending a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Bored,
    Stressed,
    Relaxed,
    Happy,
}

impl Mood {
    /// All moods in display order
    pub fn all() -> &'static [Mood] {
        &[Mood::Bored, Mood::Stressed, Mood::Relaxed, Mood::Happy]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Bored => "Bored",
            Mood::Stressed => "Stressed",
            Mood::Relaxed => "Relaxed",
            Mood::Happy => "Happy",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::all()
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown mood: {}. Use one of: {}",
                    s,
                    Mood::all()
                        .iter()
                        .map(Mood::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

/// Body of `POST /session/start`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StartSessionRequest {
    /// Local offset in minutes east of UTC, so the backend can date the session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tz_offset_minutes: Option<i32>,
}

/// Body of `POST /session/end`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndSessionRequest {
    pub session_id: i64,
    pub reels_watched: u32,
    pub mood: Option<Mood>,
}

/// Per-day aggregate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    #[serde(default)]
    pub total_sessions: u32,
    #[serde(default)]
    pub total_reels: u32,
    #[serde(default)]
    pub total_minutes: u32,
}

/// Per ISO week aggregate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklySummary {
    pub year: i32,
    pub week: u32,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_sessions: u32,
    #[serde(default)]
    pub total_reels: u32,
    #[serde(default)]
    pub total_minutes: u32,
}

/// Per calendar month aggregate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_sessions: u32,
    #[serde(default)]
    pub total_reels: u32,
    #[serde(default)]
    pub total_minutes: u32,
}

/// Current and longest run of tracked days
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Streaks {
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
}

/// `{ "items": [...] }` envelope used by the summary endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryList<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Default for SummaryList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

/// Parse a backend timestamp.
///
/// Values carrying `Z` or a `±HH:MM` offset are honored; bare values are UTC.
pub fn parse_api_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

fn deserialize_api_datetime<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_api_datetime(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}

fn deserialize_opt_api_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_api_datetime(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw))),
    }
}
