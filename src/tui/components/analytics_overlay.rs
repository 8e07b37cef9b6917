//! # Analytics Overlay Component
//!
//! Centered popup over the chat showing the two analytics charts. The charts
//! are laid out independently; an empty one shows its own placeholder.
//! Dismissed with Esc, `q`, or a click on the dimmed area around it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::analytics::{AnalyticsView, Chart};
use crate::tui::component::Component;

pub struct AnalyticsOverlay<'a> {
    pub view: &'a AnalyticsView,
    pub hint: &'a str,
}

/// Where the overlay sits inside `area`. Clicks outside it close the overlay.
pub fn overlay_rect(area: Rect) -> Rect {
    centered_rect(70, 70, area)
}

fn chart_lines<'a>(title: &'a str, chart: &'a Chart) -> Vec<Line<'a>> {
    let mut lines = vec![Line::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    )];
    match chart {
        Chart::Rows(rows) => {
            let label_width = rows.iter().map(|r| r.label.width()).max().unwrap_or(0);
            for row in rows {
                let pad = label_width - row.label.width();
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::raw(row.label.as_str()),
                    Span::raw(" ".repeat(pad + 2)),
                    Span::styled(row.count.as_str(), Style::default().fg(Color::Cyan)),
                ]));
            }
        }
        Chart::Empty(text) => lines.push(Line::styled(
            format!("  {text}"),
            Style::default().fg(Color::DarkGray),
        )),
    }
    lines
}

impl Component for AnalyticsOverlay<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // Dim everything behind the popup
        frame
            .buffer_mut()
            .set_style(area, Style::default().add_modifier(Modifier::DIM));

        let overlay = overlay_rect(area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(format!(" {} ", self.view.title))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(self.hint).centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [sentiment_area, intent_area] =
            Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(inner);
        frame.render_widget(
            Paragraph::new(chart_lines(&self.view.sentiment_title, &self.view.sentiment))
                .wrap(Wrap { trim: false }),
            sentiment_area,
        );
        frame.render_widget(
            Paragraph::new(chart_lines(&self.view.intent_title, &self.view.intents))
                .wrap(Wrap { trim: false }),
            intent_area,
        );
    }
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
