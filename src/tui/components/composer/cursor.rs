//! Cursor position tracking for the composer.
//!
//! `CursorState` owns the byte offset and scroll offset; the text itself is
//! owned by `Composer` and passed in explicitly.

use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::text_wrap::{
    CONTENT_OFFSET, MAX_VISIBLE_LINES, inner_width, wrap_line_count, wrap_options,
};

pub(super) struct CursorState {
    /// Byte offset in the buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible wrapped line when the text is taller than the box
    pub scroll_offset: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Moves to the previous (`-1`) or next (`1`) logical line, keeping the
    /// display column where possible. Returns `false` at the first/last line.
    pub fn move_vertically(&mut self, buffer: &str, direction: i16) -> bool {
        let line_start = buffer[..self.pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = buffer[line_start..self.pos].width();

        let target_start = if direction < 0 {
            if line_start == 0 {
                return false;
            }
            buffer[..line_start - 1].rfind('\n').map(|i| i + 1).unwrap_or(0)
        } else {
            match buffer[self.pos..].find('\n') {
                Some(i) => self.pos + i + 1,
                None => return false,
            }
        };
        let target_end = buffer[target_start..]
            .find('\n')
            .map(|i| target_start + i)
            .unwrap_or(buffer.len());

        let mut width = 0;
        let mut pos = target_end;
        for (i, c) in buffer[target_start..target_end].char_indices() {
            if width >= column {
                pos = target_start + i;
                break;
            }
            width += c.width().unwrap_or(0);
        }
        self.pos = pos;
        true
    }

    /// Which wrapped line (0-based) the cursor is on.
    pub fn calculate_line(&self, buffer: &str, content_width: u16) -> u16 {
        let width = inner_width(content_width);
        if width == 0 || self.pos == 0 {
            return 0;
        }
        wrap_line_count(&buffer[..self.pos], width).saturating_sub(1)
    }

    /// Keeps the cursor line inside the visible window.
    pub fn update_scroll_offset(&mut self, buffer: &str, content_width: u16) {
        let total_lines = wrap_line_count(buffer, inner_width(content_width));
        if total_lines <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let cursor_line = self.calculate_line(buffer, content_width);
        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = cursor_line.saturating_sub(MAX_VISIBLE_LINES - 1);
        }
    }

    /// Screen `(column, row)` of the cursor inside `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        if width == 0 {
            return (area.x + CONTENT_OFFSET, area.y + 1);
        }

        let before = &buffer[..self.pos];
        let logical = &before[before.rfind('\n').map(|i| i + 1).unwrap_or(0)..];
        let segments = textwrap::wrap(logical, wrap_options(width));

        // Wrapped lines are trimmed, so measure from where the last one starts.
        let column = match segments.last() {
            Some(last) if segments.len() > 1 => {
                let start = logical.rfind(last.as_ref()).unwrap_or(0);
                logical[start..].width()
            }
            _ => logical.width(),
        };
        let column = (column as u16).min(width);

        let line = self.calculate_line(buffer, area.width);
        let visible_line = line.saturating_sub(self.scroll_offset);

        (
            area.x + CONTENT_OFFSET + column,
            area.y + 1 + visible_line,
        )
    }
}
