//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::Locale;
use crate::api::{
    AnalyticsSummary, BackendError, ChatBackend, ChatReply, ConversationRecord, HealthStatus,
};
use crate::core::analytics::AnalyticsView;
use crate::core::indicator::IndicatorView;
use crate::core::state::App;
use crate::core::surface::{EntryView, IndicatorSlot, Surface};

/// One call made on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    AppendEntry(EntryView),
    ClearEntries,
    ScrollToLatest,
    SetIndicator(IndicatorSlot, IndicatorView),
    SetSendEnabled(bool),
    SetLoading(bool),
    ClearInput,
    FocusInput,
    ShowOverlay(AnalyticsView),
    HideOverlay,
    Notify(String),
}

/// A surface that records every call and keeps the resulting "screen".
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    pub entries: Vec<EntryView>,
    pub sentiment: Option<IndicatorView>,
    pub intent: Option<IndicatorView>,
    pub send_enabled: bool,
    pub loading: bool,
    pub focused: bool,
    pub overlay: Option<AnalyticsView>,
    pub notices: Vec<String>,
}

impl RecordingSurface {
    pub fn sentiment_text(&self) -> Option<&str> {
        self.sentiment.as_ref().map(|v| v.text.as_str())
    }

    pub fn intent_text(&self) -> Option<&str> {
        self.intent.as_ref().map(|v| v.text.as_str())
    }

    pub fn indicator_call_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::SetIndicator(..)))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn append_entry(&mut self, entry: &EntryView) {
        self.calls.push(SurfaceCall::AppendEntry(entry.clone()));
        self.entries.push(entry.clone());
    }

    fn clear_entries(&mut self) {
        self.calls.push(SurfaceCall::ClearEntries);
        self.entries.clear();
    }

    fn scroll_to_latest(&mut self) {
        self.calls.push(SurfaceCall::ScrollToLatest);
    }

    fn set_indicator(&mut self, slot: IndicatorSlot, view: &IndicatorView) {
        self.calls.push(SurfaceCall::SetIndicator(slot, view.clone()));
        match slot {
            IndicatorSlot::Sentiment => self.sentiment = Some(view.clone()),
            IndicatorSlot::Intent => self.intent = Some(view.clone()),
        }
    }

    fn set_send_enabled(&mut self, enabled: bool) {
        self.calls.push(SurfaceCall::SetSendEnabled(enabled));
        self.send_enabled = enabled;
    }

    fn set_loading(&mut self, loading: bool) {
        self.calls.push(SurfaceCall::SetLoading(loading));
        self.loading = loading;
    }

    fn clear_input(&mut self) {
        self.calls.push(SurfaceCall::ClearInput);
    }

    fn focus_input(&mut self) {
        self.calls.push(SurfaceCall::FocusInput);
        self.focused = true;
    }

    fn show_overlay(&mut self, view: &AnalyticsView) {
        self.calls.push(SurfaceCall::ShowOverlay(view.clone()));
        self.overlay = Some(view.clone());
    }

    fn hide_overlay(&mut self) {
        self.calls.push(SurfaceCall::HideOverlay);
        self.overlay = None;
    }

    fn notify(&mut self, notice: &str) {
        self.calls.push(SurfaceCall::Notify(notice.to_string()));
        self.notices.push(notice.to_string());
    }
}

/// A backend that answers every call with a fixed result and records what was sent.
pub struct ScriptedBackend {
    pub chat: Result<ChatReply, BackendError>,
    pub history: Result<Vec<ConversationRecord>, BackendError>,
    pub analytics: Result<AnalyticsSummary, BackendError>,
    pub health: Result<HealthStatus, BackendError>,
    pub sent: Mutex<Vec<String>>,
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self {
            chat: Ok(chat_reply("はい", "neutral", "unknown")),
            history: Ok(Vec::new()),
            analytics: Ok(AnalyticsSummary::default()),
            health: Ok(HealthStatus {
                status: "healthy".to_string(),
                database: Some("connected".to_string()),
                error: None,
            }),
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn establish_session(&self) -> Result<(), BackendError> {
        Ok(())
    }

    async fn send_message(&self, message: &str) -> Result<ChatReply, BackendError> {
        self.sent.lock().unwrap().push(message.to_string());
        self.chat.clone()
    }

    async fn load_history(&self) -> Result<Vec<ConversationRecord>, BackendError> {
        self.history.clone()
    }

    async fn load_analytics(&self) -> Result<AnalyticsSummary, BackendError> {
        self.analytics.clone()
    }

    async fn health(&self) -> Result<HealthStatus, BackendError> {
        self.health.clone()
    }
}

/// Creates a Japanese-locale App pointed at a dummy URL.
pub fn test_app() -> App {
    App::new(Locale::Ja, "http://test.invalid")
}

pub fn chat_reply(response: &str, sentiment: &str, intent: &str) -> ChatReply {
    ChatReply {
        response: response.to_string(),
        sentiment: Some(sentiment.to_string()),
        intent: Some(intent.to_string()),
        timestamp: None,
    }
}

pub fn history_record(user: &str, bot: &str, sentiment: &str, intent: &str) -> ConversationRecord {
    ConversationRecord {
        user_message: user.to_string(),
        bot_response: bot.to_string(),
        sentiment: Some(sentiment.to_string()),
        intent: Some(intent.to_string()),
        timestamp: None,
    }
}
