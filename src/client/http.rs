//! reqwest implementation of [`TrackerBackend`]

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

use super::{normalize_base_url, paths, ClientError, ClientResult, TrackerBackend, DEFAULT_API_BASE};
use crate::model::{
    DailySummary, EndSessionRequest, MonthlySummary, Session, StartSessionRequest, Streaks,
    SummaryList, WeeklySummary,
};

/// Configuration for [`ReelsClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Transport timeout per request in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

/// HTTP client for the tracking backend
#[derive(Debug, Clone)]
pub struct ReelsClient {
    client: Client,
    base_url: String,
}

impl ReelsClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: normalize_base_url(&config.base_url),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        tracing::debug!(path, "GET");
        let response = self.client.get(self.url(path)).send().await?;
        decode(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        tracing::debug!(path, "POST");
        let response = self.client.post(self.url(path)).json(body).send().await?;
        decode(response).await
    }
}

/// Turn a response into `T`, or into an API error carrying the backend detail
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let err = ClientError::from_response(status.as_u16(), &text);
        tracing::debug!(status = status.as_u16(), error = %err, "backend rejected request");
        return Err(err);
    }

    Ok(serde_json::from_str(&text)?)
}

#[async_trait]
impl TrackerBackend for ReelsClient {
    async fn start_session(&self, request: &StartSessionRequest) -> ClientResult<Session> {
        self.post_json(paths::SESSION_START, request).await
    }

    async fn end_session(&self, request: &EndSessionRequest) -> ClientResult<Session> {
        self.post_json(paths::SESSION_END, request).await
    }

    async fn active_session(&self) -> ClientResult<Option<Session>> {
        tracing::debug!(path = paths::SESSION_ACTIVE, "GET");
        let response = self.client.get(self.url(paths::SESSION_ACTIVE)).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::from_response(status.as_u16(), &text));
        }

        // An idle backend answers `null`; some deployments send nothing at all
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_str(&text)?)
    }

    async fn daily_summaries(&self) -> ClientResult<Vec<DailySummary>> {
        let list: SummaryList<DailySummary> = self.get_json(paths::SUMMARY_DAILY).await?;
        Ok(list.items)
    }

    async fn weekly_summaries(&self) -> ClientResult<Vec<WeeklySummary>> {
        let list: SummaryList<WeeklySummary> = self.get_json(paths::SUMMARY_WEEKLY).await?;
        Ok(list.items)
    }

    async fn monthly_summaries(&self) -> ClientResult<Vec<MonthlySummary>> {
        let list: SummaryList<MonthlySummary> = self.get_json(paths::SUMMARY_MONTHLY).await?;
        Ok(list.items)
    }

    async fn streaks(&self) -> ClientResult<Streaks> {
        self.get_json(paths::SUMMARY_STREAKS).await
    }
}
