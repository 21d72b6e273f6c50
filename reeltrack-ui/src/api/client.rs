//! HTTP API Client
//!
//! Functions for communicating with the tracking backend.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use reeltrack::client::{normalize_base_url, paths, ClientError, ClientResult, DEFAULT_API_BASE};
use reeltrack::model::{
    DailySummary, EndSessionRequest, MonthlySummary, Session, StartSessionRequest, Streaks,
    SummaryList, WeeklySummary,
};

/// Backend base URL, fixed at build time via `REELTRACK_API_URL`
pub fn api_base() -> String {
    normalize_base_url(option_env!("REELTRACK_API_URL").unwrap_or(DEFAULT_API_BASE))
}

fn url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

fn network(err: gloo_net::Error) -> ClientError {
    ClientError::Network(err.to_string())
}

/// Read the body, mapping non-2xx statuses to API errors
async fn read_body(response: Response) -> ClientResult<String> {
    let status = response.status();
    let body = response.text().await.map_err(network)?;

    if !response.ok() {
        return Err(ClientError::from_response(status, &body));
    }

    Ok(body)
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    Ok(serde_json::from_str(&read_body(response).await?)?)
}

async fn get_json<T: DeserializeOwned>(path: &str) -> ClientResult<T> {
    let response = Request::get(&url(path)).send().await.map_err(network)?;
    decode(response).await
}

async fn post_json<B: serde::Serialize, T: DeserializeOwned>(path: &str, body: &B) -> ClientResult<T> {
    let response = Request::post(&url(path))
        .json(body)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    decode(response).await
}

// ============ API Functions ============

/// Start a session, sending the browser's UTC offset
pub async fn start_session() -> ClientResult<Session> {
    let request = StartSessionRequest {
        tz_offset_minutes: Some(browser_offset_minutes()),
    };
    post_json(paths::SESSION_START, &request).await
}

/// End the running session
pub async fn end_session(request: &EndSessionRequest) -> ClientResult<Session> {
    post_json(paths::SESSION_END, request).await
}

/// Probe for a running session; `None` when nothing is running
pub async fn active_session() -> ClientResult<Option<Session>> {
    let response = Request::get(&url(paths::SESSION_ACTIVE))
        .send()
        .await
        .map_err(network)?;
    let body = read_body(response).await?;

    if body.trim().is_empty() {
        return Ok(None);
    }
    Ok(serde_json::from_str(&body)?)
}

pub async fn daily_summaries() -> ClientResult<Vec<DailySummary>> {
    get_json::<SummaryList<DailySummary>>(paths::SUMMARY_DAILY)
        .await
        .map(|list| list.items)
}

pub async fn weekly_summaries() -> ClientResult<Vec<WeeklySummary>> {
    get_json::<SummaryList<WeeklySummary>>(paths::SUMMARY_WEEKLY)
        .await
        .map(|list| list.items)
}

pub async fn monthly_summaries() -> ClientResult<Vec<MonthlySummary>> {
    get_json::<SummaryList<MonthlySummary>>(paths::SUMMARY_MONTHLY)
        .await
        .map(|list| list.items)
}

pub async fn streaks() -> ClientResult<Streaks> {
    get_json(paths::SUMMARY_STREAKS).await
}

/// Minutes east of UTC. `Date.getTimezoneOffset` counts the other way.
fn browser_offset_minutes() -> i32 {
    -(js_sys::Date::new_0().get_timezone_offset() as i32)
}
