//! # History Loader
//!
//! Replays the server's stored conversation into the transcript.

use log::{info, warn};

use crate::api::{BackendError, ConversationRecord};
use crate::core::action::Request;
use crate::core::message::{Analysis, Message};
use crate::core::state::App;
use crate::core::surface::Surface;

pub fn load(app: &mut App, surface: &mut dyn Surface) -> Request {
    app.begin_call(surface);
    Request::History
}

/// On success the transcript is rebuilt oldest-first; on failure one notice is
/// appended and the existing entries are kept.
pub fn settle(
    app: &mut App,
    result: Result<Vec<ConversationRecord>, BackendError>,
    surface: &mut dyn Surface,
) {
    let locale = app.locale;
    match result {
        Ok(records) => {
            app.transcript.wipe(surface);
            if records.is_empty() {
                app.transcript
                    .append(Message::bot(locale.strings().no_history), locale, surface);
            } else {
                info!("Replaying {} history records", records.len());
                // Records arrive most-recent-first.
                for record in records.into_iter().rev() {
                    let analysis = Analysis::from_codes(
                        record.sentiment.as_deref(),
                        record.intent.as_deref(),
                    );
                    app.transcript
                        .append(Message::user(record.user_message), locale, surface);
                    app.transcript.append(
                        Message::bot_with_analysis(record.bot_response, analysis.clone()),
                        locale,
                        surface,
                    );
                    app.indicators.apply(&analysis, locale, surface);
                }
            }
        }
        Err(e) => {
            warn!("History load failed: {}", e);
            let text = if e.is_application() {
                locale.strings().history_failed
            } else {
                locale.strings().history_error
            };
            app.transcript.append(Message::bot(text), locale, surface);
        }
    }
    app.end_call(surface);
}
