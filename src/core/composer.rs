//! # Message Composer
//!
//! Owns the one send operation. The send gate (`App::send_enabled`) is the
//! only thing keeping two sends from overlapping.

use log::{debug, info, warn};

use crate::api::{BackendError, ChatReply};
use crate::core::action::Request;
use crate::core::message::{Analysis, Message};
use crate::core::state::App;
use crate::core::surface::Surface;

/// Starts a send. Returns the request to perform, or `None` when the input is
/// blank or a send is already in flight (in which case nothing changes).
pub fn submit(app: &mut App, raw: &str, surface: &mut dyn Surface) -> Option<Request> {
    let text = raw.trim();
    if text.is_empty() {
        debug!("Ignoring blank submit");
        return None;
    }
    if !app.send_enabled {
        debug!("Ignoring submit while a send is in flight");
        return None;
    }

    app.transcript
        .append(Message::user(text), app.locale, surface);
    surface.clear_input();
    app.send_enabled = false;
    surface.set_send_enabled(false);
    app.begin_call(surface);

    info!("Submitting message ({} chars)", text.chars().count());
    Some(Request::SendMessage(text.to_string()))
}

/// Applies the outcome of a send. Every branch appends exactly one bot message,
/// and the gate and focus are restored afterwards regardless of outcome.
pub fn settle(app: &mut App, result: Result<ChatReply, BackendError>, surface: &mut dyn Surface) {
    let strings = app.locale.strings();
    match result {
        Ok(reply) => {
            let analysis =
                Analysis::from_codes(reply.sentiment.as_deref(), reply.intent.as_deref());
            app.transcript.append(
                Message::bot_with_analysis(reply.response, analysis.clone()),
                app.locale,
                surface,
            );
            app.indicators.apply(&analysis, app.locale, surface);
        }
        Err(BackendError::Api { status, message }) => {
            warn!("Send rejected with HTTP {}", status);
            let detail = message.unwrap_or_else(|| strings.unknown_error.to_string());
            app.transcript.append(
                Message::bot(format!("{}{}", strings.error_prefix, detail)),
                app.locale,
                surface,
            );
        }
        Err(e) => {
            warn!("Send failed: {}", e);
            app.transcript
                .append(Message::bot(strings.network_error), app.locale, surface);
        }
    }

    app.end_call(surface);
    app.send_enabled = true;
    surface.set_send_enabled(true);
    surface.focus_input();
}
