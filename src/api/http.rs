//! HTTP implementation of [`ChatBackend`] on top of `reqwest`.
//!
//! The backend keys conversations to a server-side session, so the client
//! keeps a cookie store for its whole lifetime.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use super::backend::{BackendError, ChatBackend};
use super::types::{
    AnalyticsSummary, ChatReply, ChatRequest, ConversationRecord, ErrorBody, HealthStatus,
    HistoryPayload,
};

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, connect_timeout: Duration) -> Result<Self, BackendError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(BackendError::Config(format!(
                "base URL must start with http:// or https://, got '{base_url}'"
            )));
        }

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| BackendError::Config(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> Result<Response, BackendError> {
        debug!("GET {}", path);
        self.client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))
    }
}

/// Reads the body and decodes it as `T` on success, or as an [`ErrorBody`] otherwise.
///
/// The body is decoded before the status is trusted: a non-2xx body that is
/// not JSON (a proxy's HTML error page) is a `Parse` failure, while a JSON
/// body without `error` is an application error with no server message.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| BackendError::Network(e.to_string()))?;
    debug!("Response status {} ({} bytes)", status, body.len());

    if !status.is_success() {
        let error_body = serde_json::from_str::<ErrorBody>(&body).map_err(|e| {
            warn!("Backend returned HTTP {} with undecodable body: {}", status.as_u16(), e);
            BackendError::Parse(format!("HTTP {}: {}", status.as_u16(), e))
        })?;
        warn!("Backend returned HTTP {}: {:?}", status.as_u16(), error_body.error);
        return Err(BackendError::Api {
            status: status.as_u16(),
            message: error_body.error,
        });
    }

    serde_json::from_str(&body).map_err(|e| BackendError::Parse(e.to_string()))
}

#[async_trait]
impl ChatBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn establish_session(&self) -> Result<(), BackendError> {
        let response = self.get("/").await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: None,
            });
        }
        info!("Session established with {}", self.base_url);
        Ok(())
    }

    async fn send_message(&self, message: &str) -> Result<ChatReply, BackendError> {
        info!("POST /chat ({} chars)", message.chars().count());
        let response = self
            .client
            .post(self.url("/chat"))
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        decode(response).await
    }

    async fn load_history(&self) -> Result<Vec<ConversationRecord>, BackendError> {
        let payload: HistoryPayload = decode(self.get("/history").await?).await?;
        info!("Loaded {} history records", payload.conversations.len());
        Ok(payload.conversations)
    }

    async fn load_analytics(&self) -> Result<AnalyticsSummary, BackendError> {
        decode(self.get("/analytics").await?).await
    }

    async fn health(&self) -> Result<HealthStatus, BackendError> {
        let response = self.get("/health").await?;
        // An unhealthy backend answers 500 with a status body; keep it as a value.
        if response.status() == StatusCode::INTERNAL_SERVER_ERROR {
            let body = response
                .text()
                .await
                .map_err(|e| BackendError::Network(e.to_string()))?;
            return serde_json::from_str(&body).map_err(|_| BackendError::Api {
                status: 500,
                message: None,
            });
        }
        decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_base_url_without_scheme() {
        let result = HttpBackend::new("localhost:5000", DEFAULT_CONNECT_TIMEOUT);
        assert!(matches!(result, Err(BackendError::Config(_))));
    }

    #[test]
    fn trims_trailing_slash() {
        let backend = HttpBackend::new("http://localhost:5000/", DEFAULT_CONNECT_TIMEOUT).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:5000");
        assert_eq!(backend.url("/chat"), "http://localhost:5000/chat");
    }
}
