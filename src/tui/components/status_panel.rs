//! # StatusPanel Component
//!
//! One line under the title bar showing the two indicator slots. The
//! sentiment value is colored by its tone.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::Locale;
use crate::core::format::INTENT_GLYPH;
use crate::core::indicator::{IndicatorView, Tone};
use crate::tui::component::Component;

pub struct StatusPanel<'a> {
    pub sentiment: Option<&'a IndicatorView>,
    pub intent: Option<&'a IndicatorView>,
    pub locale: Locale,
}

pub fn tone_style(tone: Option<Tone>) -> Style {
    match tone {
        Some(Tone::Positive) => Style::default().fg(Color::Green),
        Some(Tone::Negative) => Style::default().fg(Color::Red),
        Some(Tone::Neutral) | None => Style::default().fg(Color::Gray),
    }
}

impl Component for StatusPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let strings = self.locale.strings();
        let caption = Style::default().fg(Color::DarkGray);
        let text = |view: Option<&IndicatorView>| {
            view.map(|v| v.text.clone()).unwrap_or_else(|| "-".to_string())
        };

        let line = Line::from(vec![
            Span::styled(format!("{}: ", strings.sentiment_caption), caption),
            Span::styled(
                text(self.sentiment),
                tone_style(self.sentiment.and_then(|v| v.tone)).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(format!("{} {}: ", INTENT_GLYPH, strings.intent_caption), caption),
            Span::styled(text(self.intent), Style::default().fg(Color::Cyan)),
        ]);
        frame.render_widget(line, area);
    }
}
