//! Tracking backend client
//!
//! ## Layout
//!
//! - **error**: [`ClientError`] and the `detail` extraction shared with the web build
//! - **http** (native): [`ReelsClient`], a reqwest client for the seven endpoints
//! - [`TrackerBackend`] (native): the async seam the tracker and dashboard
//!   are written against, so both run without a network in tests

mod error;
#[cfg(feature = "native")]
mod http;

pub use error::{extract_detail, ClientError, ClientResult};
#[cfg(feature = "native")]
pub use http::{ClientConfig, ReelsClient};

/// Endpoint paths, relative to the configured base URL
pub mod paths {
    pub const SESSION_START: &str = "/session/start";
    pub const SESSION_END: &str = "/session/end";
    pub const SESSION_ACTIVE: &str = "/session/active";
    pub const SUMMARY_DAILY: &str = "/summary/daily";
    pub const SUMMARY_WEEKLY: &str = "/summary/weekly";
    pub const SUMMARY_MONTHLY: &str = "/summary/monthly";
    pub const SUMMARY_STREAKS: &str = "/summary/streaks";
}

/// Base URL used when nothing is configured
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Strip trailing slashes so paths can be appended directly
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(feature = "native")]
use crate::model::{
    DailySummary, EndSessionRequest, MonthlySummary, Session, StartSessionRequest, Streaks,
    WeeklySummary,
};

/// Operations the client needs from the backend
#[cfg(feature = "native")]
#[async_trait::async_trait]
pub trait TrackerBackend: Send + Sync {
    /// `POST /session/start`
    async fn start_session(&self, request: &StartSessionRequest) -> ClientResult<Session>;

    /// `POST /session/end`
    async fn end_session(&self, request: &EndSessionRequest) -> ClientResult<Session>;

    /// `GET /session/active`; `None` when nothing is running
    async fn active_session(&self) -> ClientResult<Option<Session>>;

    async fn daily_summaries(&self) -> ClientResult<Vec<DailySummary>>;

    async fn weekly_summaries(&self) -> ClientResult<Vec<WeeklySummary>>;

    async fn monthly_summaries(&self) -> ClientResult<Vec<MonthlySummary>>;

    async fn streaks(&self) -> ClientResult<Streaks>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("http://localhost:8000/"), "http://localhost:8000");
        assert_eq!(normalize_base_url(" http://api.local// "), "http://api.local");
        assert_eq!(normalize_base_url(DEFAULT_API_BASE), DEFAULT_API_BASE);
    }
}
