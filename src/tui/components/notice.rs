//! # Notice Component
//!
//! Small blocking popup for errors that are not part of the transcript.
//! Any key dismisses it.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;

const MIN_WIDTH: u16 = 30;

pub struct Notice<'a> {
    pub text: &'a str,
    pub hint: &'a str,
}

impl Notice<'_> {
    fn block(&self) -> Block<'_> {
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red))
            .title(" ! ")
            .title_bottom(Line::from(self.hint).centered())
            .padding(Padding::horizontal(1))
    }

    /// Popup rect centered in `area`, sized to the text.
    pub fn rect(&self, area: Rect) -> Rect {
        let max_width = area.width.saturating_sub(4).max(1);
        let width = (self.text.width() as u16 + 4).clamp(MIN_WIDTH.min(max_width), max_width);
        let lines = Paragraph::new(self.text)
            .wrap(Wrap { trim: true })
            .line_count(width.saturating_sub(4)) as u16;
        let height = (lines.max(1) + 2).min(area.height);
        Rect::new(
            area.x + (area.width.saturating_sub(width)) / 2,
            area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        )
    }
}

impl Component for Notice<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rect = self.rect(area);
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(self.text)
                .wrap(Wrap { trim: true })
                .block(self.block()),
            rect,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn rect_fits_short_text_with_minimum_width() {
        let notice = Notice {
            text: "Failed",
            hint: "",
        };
        let rect = notice.rect(Rect::new(0, 0, 80, 24));
        assert_eq!(rect.width, MIN_WIDTH);
        assert_eq!(rect.height, 3);
        assert_eq!(rect.x, 25);
    }

    #[test]
    fn long_text_wraps_inside_narrow_area() {
        let notice = Notice {
            text: "An error occurred while fetching analytics.",
            hint: "",
        };
        let rect = notice.rect(Rect::new(0, 0, 24, 10));
        assert_eq!(rect.width, 20);
        assert!(rect.height > 3);
    }

    #[test]
    fn renders_text_and_hint() {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal
            .draw(|f| {
                Notice {
                    text: "Failed to fetch analytics.",
                    hint: " Press any key ",
                }
                .render(f, f.area())
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Failed to fetch analytics."));
        assert!(text.contains("Press any key"));
    }
}
