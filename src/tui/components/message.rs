use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::message::Sender;
use crate::core::surface::EntryView;
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders one transcript entry.
///
/// Created fresh each frame by `MessageList`. The body and analysis line are
/// already escaped by the core, so they are rendered as plain text.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub entry: &'a EntryView,
}

impl<'a> Message<'a> {
    pub fn new(entry: &'a EntryView) -> Self {
        Self { entry }
    }

    /// Height needed for this entry at the given outer width.
    ///
    /// Uses the same `Paragraph` that `render` draws, so the predicted height
    /// always matches what ratatui wraps to.
    pub fn calculate_height(entry: &EntryView, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }
        let lines = paragraph(entry).line_count(content_width) as u16;
        lines.max(1) + VERTICAL_OVERHEAD
    }
}

pub fn sender_style(sender: Sender) -> Style {
    match sender {
        Sender::User => Style::default().fg(Color::Green),
        Sender::Bot => Style::default().fg(Color::Blue),
    }
}

fn paragraph(entry: &EntryView) -> Paragraph<'_> {
    let mut text = Text::from(entry.body.as_str());
    if let Some(analysis) = &entry.analysis_line {
        text.push_line(Line::styled(
            analysis.as_str(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
    }
    Paragraph::new(text).wrap(Wrap { trim: false })
}

impl Widget for Message<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = sender_style(self.entry.sender);
        let border_style = style.add_modifier(Modifier::DIM);

        let mut block = Block::bordered()
            .title(self.entry.sender_label.as_str())
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(style)
            .padding(Padding::horizontal(CONTENT_PAD_H));
        if let Some(time) = &self.entry.time {
            block = block.title_top(Line::from(time.as_str()).right_aligned());
        }

        let inner_area = block.inner(area);
        block.render(area, buf);
        paragraph(self.entry).render(inner_area, buf);
    }
}

impl Component for Message<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
