//! Wire types for the chat backend's JSON contract.
//!
//! Field names follow the backend exactly. Codes that the backend stores in
//! nullable columns (`sentiment`, `intent`) are `Option<String>` here; the
//! conversion into domain types happens in `core::message`.

use serde::{Deserialize, Serialize};

/// Body of `POST /chat`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Successful body of `POST /chat`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub intent: Option<String>,
    /// Server-side ISO 8601 time of the reply. Accepted, not displayed.
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Error body carried by non-2xx responses.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// One persisted exchange from `GET /history`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ConversationRecord {
    pub user_message: String,
    pub bot_response: String,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Successful body of `GET /history`. Records arrive most-recent-first.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct HistoryPayload {
    pub conversations: Vec<ConversationRecord>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SentimentCount {
    #[serde(default)]
    pub sentiment: Option<String>,
    pub count: u64,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct IntentCount {
    #[serde(default)]
    pub intent: Option<String>,
    pub count: u64,
}

/// Successful body of `GET /analytics`. Both lists keep the server's ranking order.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct AnalyticsSummary {
    #[serde(default)]
    pub sentiment_analysis: Vec<SentimentCount>,
    #[serde(default)]
    pub top_intents: Vec<IntentCount>,
}

/// Body of `GET /health`, for both the healthy (200) and unhealthy (500) case.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_serializes_message_field() {
        let body = serde_json::to_value(ChatRequest { message: "こんにちは" }).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "こんにちは" }));
    }

    #[test]
    fn chat_reply_tolerates_missing_analysis_and_extra_fields() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"response":"hi","timestamp":"2024-05-01T10:00:00","extra":1}"#,
        )
        .unwrap();
        assert_eq!(reply.response, "hi");
        assert_eq!(reply.sentiment, None);
        assert_eq!(reply.intent, None);
        assert_eq!(reply.timestamp.as_deref(), Some("2024-05-01T10:00:00"));
    }

    #[test]
    fn history_record_accepts_null_codes() {
        let payload: HistoryPayload = serde_json::from_str(
            r#"{"conversations":[{"user_message":"a","bot_response":"b","sentiment":null,"intent":"thanks"}]}"#,
        )
        .unwrap();
        let record = &payload.conversations[0];
        assert_eq!(record.sentiment, None);
        assert_eq!(record.intent.as_deref(), Some("thanks"));
    }

    #[test]
    fn analytics_lists_keep_server_order() {
        let summary: AnalyticsSummary = serde_json::from_str(
            r#"{"sentiment_analysis":[{"sentiment":"neutral","count":1},{"sentiment":"positive","count":7}],
                "top_intents":[]}"#,
        )
        .unwrap();
        let order: Vec<_> = summary
            .sentiment_analysis
            .iter()
            .map(|row| row.sentiment.as_deref().unwrap())
            .collect();
        assert_eq!(order, vec!["neutral", "positive"]);
        assert!(summary.top_intents.is_empty());
    }

    #[test]
    fn error_body_without_error_field() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.error, None);
    }

    #[test]
    fn health_status_reports_unhealthy() {
        let health: HealthStatus =
            serde_json::from_str(r#"{"status":"unhealthy","error":"db down"}"#).unwrap();
        assert!(!health.is_healthy());
        assert_eq!(health.error.as_deref(), Some("db down"));
    }
}
