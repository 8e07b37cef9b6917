//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard and mouse events into `core::Action` values.
//!
//! `TuiState` is the core's [`Surface`]: every call the controller makes lands
//! here as plain presentation state, and the next frame draws it.
//!
//! ## Requests
//!
//! `update()` returns `Effect::Spawn(request)`; the request runs on a tokio task
//! and its settlement comes back over a std `mpsc` channel as
//! `Action::Settled`. Several requests may be in flight at once.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events or settlements.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
mod ui;

use std::collections::VecDeque;
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use log::{debug, info, warn};
use ratatui::DefaultTerminal;
use ratatui::layout::{Position, Rect};

use crate::Locale;
use crate::api::{BackendError, ChatBackend, perform};
use crate::core::action::{Action, Effect, Request, Settlement, update};
use crate::core::analytics::AnalyticsView;
use crate::core::indicator::IndicatorView;
use crate::core::state::App;
use crate::core::surface::{EntryView, IndicatorSlot, Surface};
use crate::tui::component::EventHandler;
use crate::tui::components::analytics_overlay::overlay_rect;
use crate::tui::components::{Composer, ComposerEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub entries: Vec<EntryView>,
    pub message_list: MessageListState,
    pub composer: Composer,
    pub sentiment: Option<IndicatorView>,
    pub intent: Option<IndicatorView>,
    pub send_enabled: bool,
    pub loading: bool,
    pub input_focused: bool,
    pub overlay: Option<AnalyticsView>,
    /// Blocking notices, oldest first
    pub notices: VecDeque<String>,
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(locale: Locale) -> Self {
        Self {
            entries: Vec::new(),
            message_list: MessageListState::new(),
            composer: Composer::new(locale),
            sentiment: None,
            intent: None,
            send_enabled: true,
            loading: false,
            input_focused: true, // User expects to type immediately
            overlay: None,
            notices: VecDeque::new(),
            spinner_frame: 0,
        }
    }
}

impl Surface for TuiState {
    fn append_entry(&mut self, entry: &EntryView) {
        self.entries.push(entry.clone());
    }

    fn clear_entries(&mut self) {
        self.entries.clear();
        self.message_list = MessageListState::new();
    }

    fn scroll_to_latest(&mut self) {
        self.message_list.stick_to_bottom = true;
    }

    fn set_indicator(&mut self, slot: IndicatorSlot, view: &IndicatorView) {
        match slot {
            IndicatorSlot::Sentiment => self.sentiment = Some(view.clone()),
            IndicatorSlot::Intent => self.intent = Some(view.clone()),
        }
    }

    fn set_send_enabled(&mut self, enabled: bool) {
        self.send_enabled = enabled;
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn clear_input(&mut self) {
        self.composer.clear();
    }

    fn focus_input(&mut self) {
        self.input_focused = true;
    }

    fn show_overlay(&mut self, view: &AnalyticsView) {
        self.overlay = Some(view.clone());
    }

    fn hide_overlay(&mut self) {
        self.overlay = None;
    }

    fn notify(&mut self, notice: &str) {
        self.notices.push_back(notice.to_string());
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol allows Shift+Enter detection; terminals that
        // don't support it ignore the request
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Decides what a terminal event means given the current presentation state.
///
/// Returns the core action to run, if any. Purely local effects (editing,
/// scrolling, focus, dismissing a notice) are applied to `tui` directly.
pub fn route_event(tui: &mut TuiState, event: TuiEvent, frame_area: Rect) -> Option<Action> {
    match event {
        TuiEvent::Quit => return Some(Action::Quit),
        TuiEvent::Resize => return None,
        _ => {}
    }

    // A notice swallows the next key or click
    if !tui.notices.is_empty() {
        if !matches!(event, TuiEvent::ScrollUp | TuiEvent::ScrollDown) {
            tui.notices.pop_front();
        }
        return None;
    }

    if tui.overlay.is_some() {
        return match event {
            TuiEvent::Escape | TuiEvent::InputChar('q') => Some(Action::CloseAnalytics),
            TuiEvent::MouseClick(col, row)
                if !overlay_rect(frame_area).contains(Position::new(col, row)) =>
            {
                Some(Action::CloseAnalytics)
            }
            _ => None,
        };
    }

    match event {
        TuiEvent::ClearTranscript => Some(Action::ClearTranscript),
        TuiEvent::LoadHistory => Some(Action::LoadHistory),
        TuiEvent::ShowAnalytics => Some(Action::ShowAnalytics),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => {
            tui.message_list.handle_event(&event);
            None
        }
        TuiEvent::MouseClick(col, row) => {
            let regions = ui::areas(frame_area, tui.composer.calculate_height(frame_area.width));
            tui.input_focused = regions.composer.contains(Position::new(col, row));
            None
        }
        // Cancel with nothing open to cancel
        TuiEvent::Escape => None,
        _ if !tui.input_focused => match event {
            TuiEvent::CursorUp => {
                tui.message_list.handle_event(&TuiEvent::ScrollUp);
                None
            }
            TuiEvent::CursorDown => {
                tui.message_list.handle_event(&TuiEvent::ScrollDown);
                None
            }
            TuiEvent::Submit => {
                tui.input_focused = true;
                None
            }
            // Typing refocuses the composer and is not lost
            TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
                tui.input_focused = true;
                tui.composer.handle_event(&event);
                None
            }
            _ => None,
        },
        _ => match tui.composer.handle_event(&event) {
            Some(ComposerEvent::Submit(text)) => Some(Action::Submit(text)),
            Some(ComposerEvent::Changed) => None,
            None => {
                // Up/Down past the composer's first/last line scroll the transcript
                match event {
                    TuiEvent::CursorUp => tui.message_list.handle_event(&TuiEvent::ScrollUp),
                    TuiEvent::CursorDown => tui.message_list.handle_event(&TuiEvent::ScrollDown),
                    _ => None,
                };
                None
            }
        },
    }
}

pub fn run(app: App, backend: Arc<dyn ChatBackend>) -> std::io::Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, app, backend);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    mut app: App,
    backend: Arc<dyn ChatBackend>,
) -> std::io::Result<()> {
    let _terminal_mode_guard = TerminalModeGuard::new()
        .inspect_err(|e| warn!("Failed to enable terminal modes: {}", e))
        .ok();
    let mut tui = TuiState::new(app.locale);

    // Channel for settlements from background tasks
    let (tx, rx) = mpsc::channel();

    dispatch(&mut app, &mut tui, Action::Start, &backend, &tx);

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = tui.loading;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            tui.spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let frame_area = terminal.get_frame().area();
            if let Some(action) = route_event(&mut tui, event, frame_area)
                && dispatch(&mut app, &mut tui, action, &backend, &tx)
            {
                should_quit = true;
                break;
            }
        }
        if should_quit {
            break;
        }

        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            dispatch(&mut app, &mut tui, action, &backend, &tx);
        }
    }

    info!("Event loop finished");
    Ok(())
}

/// Runs `action` through the core. Returns `true` when the app should quit.
fn dispatch(
    app: &mut App,
    tui: &mut TuiState,
    action: Action,
    backend: &Arc<dyn ChatBackend>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match update(app, action, tui) {
        Effect::Quit => true,
        Effect::Spawn(request) => {
            spawn_request(backend.clone(), request, tx.clone());
            false
        }
        Effect::None => false,
    }
}

/// Runs one request on the tokio runtime and sends its settlement back.
///
/// A panicking request still settles, as a network failure, so the send gate
/// and loading counter are always released.
fn spawn_request(backend: Arc<dyn ChatBackend>, request: Request, tx: mpsc::Sender<Action>) {
    info!("Spawning request {:?}", request);
    let fallback = request.clone();
    let task = tokio::spawn(async move { perform(backend.as_ref(), request).await });
    tokio::spawn(async move {
        let settlement = match task.await {
            Ok(settlement) => settlement,
            Err(e) => {
                warn!("Request task for {:?} failed: {}", fallback, e);
                Settlement::failed(&fallback, BackendError::Network(e.to_string()))
            }
        };
        if tx.send(Action::Settled(settlement)).is_err() {
            warn!("Failed to send settlement: receiver dropped");
        }
    });
}
