//! # Actions
//!
//! Everything that can happen in sentichat becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The backend answers? That's `Action::Settled(Settlement::Chat(..))`.
//!
//! `update()` applies an action to the state, tells the surface what changed,
//! and returns an `Effect`. It never performs I/O: a network call comes back
//! as `Effect::Spawn(request)` and the caller runs it and feeds the
//! settlement back in.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::api::{AnalyticsSummary, BackendError, ChatReply, ConversationRecord, HealthStatus};
use crate::core::state::{App, BackendHealth};
use crate::core::surface::Surface;
use crate::core::{analytics, composer, history};

/// A network call the caller must perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Obtain the session cookie, then check `/health`.
    Connect,
    SendMessage(String),
    History,
    Analytics,
}

/// The outcome of a [`Request`].
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    Connected(Result<HealthStatus, BackendError>),
    Chat(Result<ChatReply, BackendError>),
    History(Result<Vec<ConversationRecord>, BackendError>),
    Analytics(Result<AnalyticsSummary, BackendError>),
}

impl Settlement {
    /// The settlement a request produces when it fails with `error`.
    pub fn failed(request: &Request, error: BackendError) -> Self {
        match request {
            Request::Connect => Settlement::Connected(Err(error)),
            Request::SendMessage(_) => Settlement::Chat(Err(error)),
            Request::History => Settlement::History(Err(error)),
            Request::Analytics => Settlement::Analytics(Err(error)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Initial render: indicators at their defaults, input focused, connect.
    Start,
    Submit(String),
    ClearTranscript,
    LoadHistory,
    ShowAnalytics,
    CloseAnalytics,
    Settled(Settlement),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Spawn(Request),
    Quit,
}

pub fn update(app: &mut App, action: Action, surface: &mut dyn Surface) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Start => {
            app.indicators.render(app.locale, surface);
            surface.set_send_enabled(app.send_enabled);
            surface.focus_input();
            Effect::Spawn(Request::Connect)
        }
        Action::Submit(raw) => composer::submit(app, &raw, surface)
            .map(Effect::Spawn)
            .unwrap_or(Effect::None),
        Action::ClearTranscript => {
            app.transcript.clear(app.locale, surface);
            app.indicators.reset(app.locale, surface);
            Effect::None
        }
        Action::LoadHistory => Effect::Spawn(history::load(app, surface)),
        Action::ShowAnalytics => Effect::Spawn(analytics::show(app, surface)),
        Action::CloseAnalytics => {
            analytics::close(app, surface);
            Effect::None
        }
        Action::Settled(settlement) => {
            settle(app, settlement, surface);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn settle(app: &mut App, settlement: Settlement, surface: &mut dyn Surface) {
    match settlement {
        Settlement::Connected(result) => {
            app.health = match result {
                Ok(status) if status.is_healthy() => BackendHealth::Healthy,
                Ok(status) => BackendHealth::Unhealthy(
                    status.error.unwrap_or_else(|| status.status.clone()),
                ),
                Err(e) => BackendHealth::Unreachable(e.to_string()),
            };
            match &app.health {
                BackendHealth::Healthy => info!("Backend healthy at {}", app.base_url),
                other => warn!("Backend not healthy at {}: {:?}", app.base_url, other),
            }
        }
        Settlement::Chat(result) => composer::settle(app, result, surface),
        Settlement::History(result) => history::settle(app, result, surface),
        Settlement::Analytics(result) => analytics::settle(app, result, surface),
    }
}
