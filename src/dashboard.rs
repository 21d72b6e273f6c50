//! Dashboard loading
//!
//! The four summary collections are independent, so they are requested
//! concurrently and the dashboard is only populated once all have answered.

use crate::client::{ClientResult, TrackerBackend};
use crate::stats::{DashboardData, DashboardStats};

/// Fetch daily, weekly, monthly and streak data concurrently
pub async fn load<B: TrackerBackend + ?Sized>(backend: &B) -> ClientResult<DashboardData> {
    let (daily, weekly, monthly, streaks) = tokio::try_join!(
        backend.daily_summaries(),
        backend.weekly_summaries(),
        backend.monthly_summaries(),
        backend.streaks(),
    )?;

    tracing::debug!(
        daily = daily.len(),
        weekly = weekly.len(),
        monthly = monthly.len(),
        "dashboard data loaded"
    );

    Ok(DashboardData {
        daily,
        weekly,
        monthly,
        streaks,
    })
}

/// Fetch and derive.
///
/// A failed fetch leaves the dashboard empty: the error is logged and the
/// default (all-zero) data is returned.
pub async fn load_or_empty<B: TrackerBackend + ?Sized>(
    backend: &B,
) -> (DashboardData, DashboardStats) {
    let data = match load(backend).await {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("Failed to load dashboard: {}", e);
            DashboardData::default()
        }
    };
    let stats = DashboardStats::derive(&data);
    (data, stats)
}
