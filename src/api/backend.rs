use std::fmt;

use async_trait::async_trait;

use super::types::{AnalyticsSummary, ChatReply, ConversationRecord, HealthStatus};

/// Errors that can occur while talking to the chat backend.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendError {
    /// Client misconfigured (bad base URL, TLS setup). Surfaced like a transport failure.
    Config(String),
    /// Network-level failure (connection refused, DNS, transport timeout).
    Network(String),
    /// The backend answered with a non-2xx status. `message` is the body's `error` field.
    Api { status: u16, message: Option<String> },
    /// A 2xx body that could not be decoded.
    Parse(String),
}

impl BackendError {
    /// True for application errors: the server answered, but not with success.
    pub fn is_application(&self) -> bool {
        matches!(self, BackendError::Api { .. })
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Config(msg) => write!(f, "config error: {msg}"),
            BackendError::Network(msg) => write!(f, "network error: {msg}"),
            BackendError::Api { status, message } => match message {
                Some(message) => write!(f, "API error (HTTP {status}): {message}"),
                None => write!(f, "API error (HTTP {status})"),
            },
            BackendError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

/// The narrow contract the controller consumes. One method per endpoint.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Returns a short name for logs.
    fn name(&self) -> &str;

    /// Obtains the session cookie that scopes history and analytics to this client.
    async fn establish_session(&self) -> Result<(), BackendError>;

    async fn send_message(&self, message: &str) -> Result<ChatReply, BackendError>;

    /// Returns records most-recent-first, as delivered.
    async fn load_history(&self) -> Result<Vec<ConversationRecord>, BackendError>;

    async fn load_analytics(&self) -> Result<AnalyticsSummary, BackendError>;

    async fn health(&self) -> Result<HealthStatus, BackendError>;
}
