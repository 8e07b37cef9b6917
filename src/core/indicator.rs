//! # Status Indicators
//!
//! Two slots summarising the most recently rendered bot analysis.
//! Each update overwrites both slots; nothing is merged.

use crate::Locale;
use crate::core::format::{escape_text, intent_label};
use crate::core::message::{Analysis, Intent, Sentiment};
use crate::core::surface::{IndicatorSlot, Surface};

/// Style tag of the sentiment slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl Tone {
    /// Absent or unrecognized sentiments render as neutral.
    pub fn of(sentiment: Option<&Sentiment>) -> Self {
        match sentiment {
            Some(Sentiment::Positive) => Tone::Positive,
            Some(Sentiment::Negative) => Tone::Negative,
            _ => Tone::Neutral,
        }
    }
}

/// What one indicator slot displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorView {
    pub text: String,
    /// Only set for the sentiment slot.
    pub tone: Option<Tone>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorState {
    pub sentiment: Option<Sentiment>,
    pub intent: Option<Intent>,
}

impl Default for IndicatorState {
    fn default() -> Self {
        Self {
            sentiment: Some(Sentiment::Neutral),
            intent: Some(Intent::Unknown),
        }
    }
}

impl IndicatorState {
    /// Overwrites both slots and pushes them to the surface.
    pub fn update(
        &mut self,
        sentiment: Option<Sentiment>,
        intent: Option<Intent>,
        locale: Locale,
        surface: &mut dyn Surface,
    ) {
        self.sentiment = sentiment;
        self.intent = intent;
        self.render(locale, surface);
    }

    pub fn apply(&mut self, analysis: &Analysis, locale: Locale, surface: &mut dyn Surface) {
        self.update(
            analysis.sentiment.clone(),
            analysis.intent.clone(),
            locale,
            surface,
        );
    }

    /// Back to `(neutral, unknown)`.
    pub fn reset(&mut self, locale: Locale, surface: &mut dyn Surface) {
        let initial = Self::default();
        self.update(initial.sentiment, initial.intent, locale, surface);
    }

    pub fn render(&self, locale: Locale, surface: &mut dyn Surface) {
        let (sentiment, intent) = self.views(locale);
        surface.set_indicator(IndicatorSlot::Sentiment, &sentiment);
        surface.set_indicator(IndicatorSlot::Intent, &intent);
    }

    pub fn views(&self, locale: Locale) -> (IndicatorView, IndicatorView) {
        let sentiment = IndicatorView {
            text: self
                .sentiment
                .as_ref()
                .map(|s| escape_text(s.as_str()))
                .unwrap_or_else(|| "-".to_string()),
            tone: Some(Tone::of(self.sentiment.as_ref())),
        };
        let intent = IndicatorView {
            text: self
                .intent
                .as_ref()
                .map(|i| intent_label(i, locale))
                .unwrap_or_else(|| "-".to_string()),
            tone: None,
        };
        (sentiment, intent)
    }
}
