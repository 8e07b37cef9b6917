//! # Composer Component
//!
//! The message input box.
//!
//! ## Responsibilities
//!
//! - Capture and edit text (multi-line, paste, cursor movement)
//! - Emit `Submit` on Enter; the controller decides whether it is sent
//! - Show whether sending is currently possible and whether it has focus
//!
//! The buffer is only cleared through [`Composer::clear`], which the TUI calls
//! when the controller accepts a message. A refused submit keeps the text.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::Locale;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use text_wrap::{
    MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, inner_width, next_char_boundary, prev_char_boundary,
    wrap_line_count, wrap_options,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ComposerEvent {
    Submit(String),
    Changed,
}

pub struct Composer {
    pub buffer: String,
    /// Prop: the send gate
    pub enabled: bool,
    /// Prop: keyboard focus
    pub focused: bool,
    locale: Locale,
    cursor: CursorState,
}

impl Composer {
    pub fn new(locale: Locale) -> Self {
        Self {
            buffer: String::new(),
            enabled: true,
            focused: true,
            locale,
            cursor: CursorState::new(),
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor.reset();
    }

    /// Height for the current buffer, between 1 and `MAX_VISIBLE_LINES` content lines.
    pub fn calculate_height(&self, content_width: u16) -> u16 {
        let lines = wrap_line_count(&self.buffer, inner_width(content_width));
        lines.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn visible_text(&self, content_width: u16) -> String {
        if self.cursor.scroll_offset == 0 {
            return self.buffer.clone();
        }
        let width = inner_width(content_width);
        if width == 0 {
            return String::new();
        }
        let lines = textwrap::wrap(&self.buffer, wrap_options(width));
        let start = (self.cursor.scroll_offset as usize).min(lines.len());
        let end = (start + MAX_VISIBLE_LINES as usize).min(lines.len());
        lines[start..end].join("\n")
    }

    fn insert(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
    }
}

impl Component for Composer {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.update_scroll_offset(&self.buffer, area.width);

        let strings = self.locale.strings();
        let title = if self.enabled {
            strings.composer_title
        } else {
            strings.composer_busy
        };
        let border_style = if self.focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let text_style = if self.enabled {
            Style::default()
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(format!(" {title} "))
            .padding(Padding::horizontal(1));
        let input = Paragraph::new(self.visible_text(area.width))
            .block(block)
            .style(text_style);
        frame.render_widget(input, area);

        if self.focused {
            frame.set_cursor_position(self.cursor.screen_pos(&self.buffer, area));
        }
    }
}

impl EventHandler for Composer {
    type Event = ComposerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.insert(c.encode_utf8(&mut [0; 4]));
                Some(ComposerEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                self.insert(&text.replace("\r\n", "\n").replace('\r', "\n"));
                Some(ComposerEvent::Changed)
            }
            TuiEvent::Backspace => (self.cursor.pos > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                ComposerEvent::Changed
            }),
            TuiEvent::Delete => (self.cursor.pos < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                ComposerEvent::Changed
            }),
            TuiEvent::CursorLeft => (self.cursor.pos > 0).then(|| {
                self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                ComposerEvent::Changed
            }),
            TuiEvent::CursorRight => (self.cursor.pos < self.buffer.len()).then(|| {
                self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                ComposerEvent::Changed
            }),
            TuiEvent::CursorHome => {
                self.cursor.pos = self.buffer[..self.cursor.pos]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                Some(ComposerEvent::Changed)
            }
            TuiEvent::CursorEnd => {
                self.cursor.pos = self.buffer[self.cursor.pos..]
                    .find('\n')
                    .map(|i| self.cursor.pos + i)
                    .unwrap_or(self.buffer.len());
                Some(ComposerEvent::Changed)
            }
            // At the first/last line these fall through to the transcript
            TuiEvent::CursorUp => self
                .cursor
                .move_vertically(&self.buffer, -1)
                .then_some(ComposerEvent::Changed),
            TuiEvent::CursorDown => self
                .cursor
                .move_vertically(&self.buffer, 1)
                .then_some(ComposerEvent::Changed),
            TuiEvent::Submit => Some(ComposerEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}
