//! Client error types
//!
//! Every failure the client can hit is a failed HTTP exchange. The backend
//! reports problems as `{"detail": "..."}`; that text is what the user sees,
//! with a per-action fallback when it is absent.

use thiserror::Error;

/// Errors that can occur when talking to the tracking backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// Request never produced a response (connection refused, DNS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status
    #[error("API error {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },

    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ClientError {
    /// Build an API error from a status code and raw response body
    pub fn from_response(status: u16, body: &str) -> Self {
        ClientError::Api {
            status,
            detail: extract_detail(body),
        }
    }

    /// Message to show the user: the backend's detail, else `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_string(),
        }
    }

    /// HTTP status, if the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Pull the `detail` string out of an error body.
///
/// Validation failures carry a list under `detail`; those are not shown
/// verbatim, so only a non-empty string counts.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")?
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Result type for backend calls
pub type ClientResult<T> = Result<T, ClientError>;
