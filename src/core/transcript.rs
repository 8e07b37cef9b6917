//! # Transcript
//!
//! The append-only conversation log. It owns every `Message` and is the only
//! place that turns one into an `EntryView` for the surface.

use crate::Locale;
use crate::core::format::{
    INTENT_GLYPH, escape_text, format_time, intent_label, sender_label, sentiment_glyph,
};
use crate::core::message::{Analysis, Message, Sender};
use crate::core::surface::{EntryView, Surface};

#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Message] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.entries.last()
    }

    /// Renders the message, records it, and scrolls to it.
    pub fn append(&mut self, message: Message, locale: Locale, surface: &mut dyn Surface) {
        surface.append_entry(&render_entry(&message, locale));
        surface.scroll_to_latest();
        self.entries.push(message);
    }

    /// Drops every entry without leaving a placeholder.
    pub fn wipe(&mut self, surface: &mut dyn Surface) {
        self.entries.clear();
        surface.clear_entries();
    }

    /// Drops every entry and leaves the single "cleared" placeholder.
    pub fn clear(&mut self, locale: Locale, surface: &mut dyn Surface) {
        self.wipe(surface);
        self.append(
            Message::placeholder(locale.strings().cleared),
            locale,
            surface,
        );
    }
}

pub fn render_entry(message: &Message, locale: Locale) -> EntryView {
    let analysis_line = match (message.sender, &message.analysis) {
        (Sender::Bot, Some(analysis)) => Some(analysis_line(analysis, locale)),
        _ => None,
    };

    EntryView {
        sender: message.sender,
        sender_label: sender_label(message.sender, locale).to_string(),
        body: escape_text(&message.text),
        analysis_line,
        time: message.timestamp.as_ref().map(format_time),
    }
}

fn analysis_line(analysis: &Analysis, locale: Locale) -> String {
    let strings = locale.strings();
    let sentiment = analysis
        .sentiment
        .as_ref()
        .map(|s| escape_text(s.as_str()))
        .unwrap_or_else(|| "-".to_string());
    let intent = analysis
        .intent
        .as_ref()
        .map(|i| intent_label(i, locale))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{} {}: {} | {} {}: {}",
        sentiment_glyph(analysis.sentiment.as_ref()),
        strings.sentiment_caption,
        sentiment,
        INTENT_GLYPH,
        strings.intent_caption,
        intent
    )
}
