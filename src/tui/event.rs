use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
use log::{debug, warn};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Core actions (passed to core::update)
    Quit,
    Submit,
    ClearTranscript,
    LoadHistory,
    ShowAnalytics,

    // TUI-local events (handled directly in TUI)
    InputChar(char),
    Paste(String), // Bracketed paste - preserves newlines
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    CursorUp,
    CursorDown,
    Escape,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollToBottom, // Ctrl+End - also re-enables stick-to-bottom
    MouseClick(u16, u16),
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => match event::read() {
            Ok(ev) => map_event(ev),
            Err(e) => {
                warn!("Failed to read terminal event: {}", e);
                None
            }
        },
        Ok(false) => None,
        Err(e) => {
            warn!("Failed to poll terminal events: {}", e);
            None
        }
    }
}

/// Translate a raw crossterm event. Returns `None` for events the UI ignores.
pub fn map_event(ev: Event) -> Option<TuiEvent> {
    match ev {
        Event::Key(key_event) => {
            // Release/repeat reports arrive when the keyboard protocol is enhanced
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code, key_event.modifiers
            );
            let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
            let shift = key_event.modifiers.contains(KeyModifiers::SHIFT);
            match key_event.code {
                KeyCode::Char('c') if ctrl => Some(TuiEvent::Quit),
                KeyCode::Char('l') if ctrl => Some(TuiEvent::ClearTranscript),
                KeyCode::Char('r') if ctrl => Some(TuiEvent::LoadHistory),
                KeyCode::Char('g') if ctrl => Some(TuiEvent::ShowAnalytics),
                // Ctrl+J inserts newline (ASCII LF; Ctrl+Enter sends this in most terminals)
                KeyCode::Char('j') if ctrl => Some(TuiEvent::InputChar('\n')),
                KeyCode::Char(_) if ctrl => None,
                KeyCode::Char(c) => Some(TuiEvent::InputChar(c)),
                KeyCode::Enter if shift => Some(TuiEvent::InputChar('\n')),
                KeyCode::Enter => Some(TuiEvent::Submit),
                KeyCode::Tab => Some(TuiEvent::InputChar('\t')),
                KeyCode::Backspace => Some(TuiEvent::Backspace),
                KeyCode::Delete => Some(TuiEvent::Delete),
                KeyCode::Left => Some(TuiEvent::CursorLeft),
                KeyCode::Right => Some(TuiEvent::CursorRight),
                KeyCode::Home => Some(TuiEvent::CursorHome),
                KeyCode::End if ctrl => Some(TuiEvent::ScrollToBottom),
                KeyCode::End => Some(TuiEvent::CursorEnd),
                KeyCode::Up => Some(TuiEvent::CursorUp),
                KeyCode::Down => Some(TuiEvent::CursorDown),
                KeyCode::PageUp => Some(TuiEvent::ScrollPageUp),
                KeyCode::PageDown => Some(TuiEvent::ScrollPageDown),
                KeyCode::Esc => Some(TuiEvent::Escape),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::MouseClick(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventState, MouseEvent};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn enter_submits_and_shift_enter_inserts_newline() {
        assert_eq!(
            map_event(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(TuiEvent::Submit)
        );
        assert_eq!(
            map_event(key(KeyCode::Enter, KeyModifiers::SHIFT)),
            Some(TuiEvent::InputChar('\n'))
        );
        assert_eq!(
            map_event(key(KeyCode::Char('j'), KeyModifiers::CONTROL)),
            Some(TuiEvent::InputChar('\n'))
        );
    }

    #[test]
    fn control_shortcuts_map_to_actions() {
        let ctrl = |c| map_event(key(KeyCode::Char(c), KeyModifiers::CONTROL));
        assert_eq!(ctrl('c'), Some(TuiEvent::Quit));
        assert_eq!(ctrl('l'), Some(TuiEvent::ClearTranscript));
        assert_eq!(ctrl('r'), Some(TuiEvent::LoadHistory));
        assert_eq!(ctrl('g'), Some(TuiEvent::ShowAnalytics));
        assert_eq!(ctrl('x'), None);
    }

    #[test]
    fn plain_and_shifted_chars_are_input() {
        assert_eq!(
            map_event(key(KeyCode::Char('あ'), KeyModifiers::NONE)),
            Some(TuiEvent::InputChar('あ'))
        );
        assert_eq!(
            map_event(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(TuiEvent::InputChar('A'))
        );
    }

    #[test]
    fn key_release_is_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(map_event(release), None);
    }

    #[test]
    fn left_click_and_wheel() {
        let mouse = |kind| {
            Event::Mouse(MouseEvent {
                kind,
                column: 7,
                row: 3,
                modifiers: KeyModifiers::NONE,
            })
        };
        assert_eq!(
            map_event(mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(TuiEvent::MouseClick(7, 3))
        );
        assert_eq!(
            map_event(mouse(MouseEventKind::ScrollDown)),
            Some(TuiEvent::ScrollDown)
        );
        assert_eq!(map_event(mouse(MouseEventKind::Moved)), None);
    }

    #[test]
    fn ctrl_end_scrolls_and_end_moves_cursor() {
        assert_eq!(
            map_event(key(KeyCode::End, KeyModifiers::CONTROL)),
            Some(TuiEvent::ScrollToBottom)
        );
        assert_eq!(
            map_event(key(KeyCode::End, KeyModifiers::NONE)),
            Some(TuiEvent::CursorEnd)
        );
    }
}
