//! Dashboard derivations
//!
//! Everything the dashboard shows is a pure function of the four summary
//! collections fetched on load. Nothing here is cached; callers derive again
//! after each fetch.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::{DailySummary, MonthlySummary, Streaks, WeeklySummary};

/// How many recent weeks/months the overview lists
pub const RECENT_PERIODS: usize = 4;

/// The four collections backing the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub daily: Vec<DailySummary>,
    pub weekly: Vec<WeeklySummary>,
    pub monthly: Vec<MonthlySummary>,
    pub streaks: Streaks,
}

/// Headline figures derived from [`DashboardData`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Reels for today's date, 0 when there is no entry
    pub today_reels: u32,
    /// Whether the daily list had an entry for today
    pub tracked_today: bool,
    /// Most recent week's reels divided by 7, rounded
    pub weekly_average_reels: u32,
    /// Largest per-day minute total. Upper bound for the longest session,
    /// not a true session maximum.
    pub longest_daily_minutes: u32,
    /// Reels per session over the daily window, one decimal, or "0"
    pub reels_per_session: String,
    pub current_streak: u32,
    pub longest_streak: u32,
}

impl DashboardStats {
    /// Derive using the local calendar date
    pub fn derive(data: &DashboardData) -> Self {
        Self::derive_at(Local::now().date_naive(), data)
    }

    /// Derive as of `today`
    pub fn derive_at(today: NaiveDate, data: &DashboardData) -> Self {
        let today_entry = today_entry(&data.daily, today);

        Self {
            today_reels: today_entry.map(|d| d.total_reels).unwrap_or(0),
            tracked_today: today_entry.is_some(),
            weekly_average_reels: weekly_average_reels(&data.weekly),
            longest_daily_minutes: longest_daily_minutes(&data.daily),
            reels_per_session: format_reels_per_session(reels_per_session(&data.daily)),
            current_streak: data.streaks.current_streak,
            longest_streak: data.streaks.longest_streak,
        }
    }
}

/// Entry whose date matches `today`
pub fn today_entry(daily: &[DailySummary], today: NaiveDate) -> Option<&DailySummary> {
    daily.iter().find(|d| d.date == today)
}

/// `round(last_week.total_reels / 7)`, 0 with no weeks
pub fn weekly_average_reels(weekly: &[WeeklySummary]) -> u32 {
    weekly
        .last()
        .map(|w| (f64::from(w.total_reels) / 7.0).round() as u32)
        .unwrap_or(0)
}

pub fn longest_daily_minutes(daily: &[DailySummary]) -> u32 {
    daily.iter().map(|d| d.total_minutes).max().unwrap_or(0)
}

/// Average reels per session, `None` when no sessions were recorded
pub fn reels_per_session(daily: &[DailySummary]) -> Option<f64> {
    let reels: u64 = daily.iter().map(|d| u64::from(d.total_reels)).sum();
    let sessions: u64 = daily.iter().map(|d| u64::from(d.total_sessions)).sum();
    if sessions == 0 {
        return None;
    }
    Some(reels as f64 / sessions as f64)
}

pub fn format_reels_per_session(avg: Option<f64>) -> String {
    match avg {
        Some(v) => format!("{:.1}", v),
        None => "0".to_string(),
    }
}

/// "1 day" / "N days"
pub fn format_days(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

/// Last [`RECENT_PERIODS`] items, oldest first
pub fn recent<T>(items: &[T]) -> &[T] {
    &items[items.len().saturating_sub(RECENT_PERIODS)..]
}

pub fn week_label(week: &WeeklySummary) -> String {
    format!("Week {} {}", week.week, week.year)
}

pub fn month_label(month: &MonthlySummary) -> String {
    format!("{}-{:02}", month.year, month.month)
}

/// "{reels} reels · {minutes} min"
pub fn totals_label(total_reels: u32, total_minutes: u32) -> String {
    format!("{} reels · {} min", total_reels, total_minutes)
}

/// Short chart axis label for a day (`MM-DD`)
pub fn day_axis_label(date: NaiveDate) -> String {
    date.format("%m-%d").to_string()
}
