pub mod backend;
pub mod dispatch;
pub mod http;
pub mod types;

pub use backend::{BackendError, ChatBackend};
pub use dispatch::{perform, run_to_settlement};
pub use http::HttpBackend;
pub use types::{
    AnalyticsSummary, ChatReply, ChatRequest, ConversationRecord, ErrorBody, HealthStatus,
    HistoryPayload, IntentCount, SentimentCount,
};
