//! # MessageList Component
//!
//! Scrollable view of the transcript.
//!
//! ## Responsibilities
//!
//! - Lay out transcript entries and cache their heights
//! - Keep the newest entry in view unless the user has scrolled away
//! - Report whether content exists below the viewport
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the entries (props).
//! Entries never change once appended, so cached heights stay valid until the
//! width changes or the transcript is cleared.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::surface::EntryView;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Content exists below the viewport
    pub has_unseen_content: bool,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::default(),
            stick_to_bottom: true,
            viewport_height: 0,
            has_unseen_content: false,
        }
    }

    fn max_offset(&self) -> u16 {
        self.layout.total_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll once the user scrolls back to the end.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub entries: &'a [EntryView],
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut MessageListState, entries: &'a [EntryView]) -> Self {
        Self { state, entries }
    }
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let layout = &mut self.state.layout;

        // 1. Measure entries not yet in the cache
        let reusable = layout.reusable_count(self.entries.len(), content_width);
        layout.heights.truncate(reusable);
        for entry in self.entries.iter().skip(layout.heights.len()) {
            layout
                .heights
                .push(Message::calculate_height(entry, content_width));
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(self.entries.len(), content_width);

        let total_height = layout.total_height();

        // 2. Clamp, then render only what is near the viewport
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }
        let scroll_offset = self.state.scroll_state.offset().y;
        let visible = self.state.layout.visible_range(scroll_offset, area.height);

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y = self.state.layout.top_of(visible.start);
        for i in visible {
            let height = self.state.layout.heights[i];
            scroll_view.render_widget(
                Message::new(&self.entries[i]),
                Rect::new(0, y, content_width, height),
            );
            y += height;
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);

        let offset = self.state.scroll_state.offset().y;
        self.state.has_unseen_content =
            total_height > area.height && offset < total_height.saturating_sub(area.height);
    }
}

/// Implemented on the state because it outlives the per-frame `MessageList`.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
            }
            _ => {}
        }
        None
    }
}

/// Cached entry heights for one content width.
#[derive(Default)]
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    entry_count: usize,
    content_width: u16,
}

impl LayoutCache {
    /// How many cached heights are still valid.
    pub fn reusable_count(&self, entry_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width || entry_count < self.entry_count {
            return 0;
        }
        self.heights.len().min(entry_count)
    }

    pub fn update_metadata(&mut self, entry_count: usize, content_width: u16) {
        self.entry_count = entry_count;
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Content y where entry `index` starts.
    pub fn top_of(&self, index: usize) -> u16 {
        match index {
            0 => 0,
            i => self.prefix_heights.get(i - 1).copied().unwrap_or(0),
        }
    }

    /// Entries overlapping the viewport, padded by half a screen each way.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let margin = viewport_height / 2;
        let top = scroll_offset.saturating_sub(margin);
        let bottom = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(margin);

        let start = self.prefix_heights.partition_point(|&end| end <= top);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < bottom)
            .saturating_add(1)
            .min(self.prefix_heights.len());
        start..end.max(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Sender;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn entries(n: usize) -> Vec<EntryView> {
        (0..n)
            .map(|i| EntryView {
                sender: if i % 2 == 0 { Sender::User } else { Sender::Bot },
                sender_label: "who".to_string(),
                body: format!("message {i}"),
                analysis_line: None,
                time: None,
            })
            .collect()
    }

    fn cache_with(heights: &[u16], width: u16) -> LayoutCache {
        let mut cache = LayoutCache::default();
        cache.heights = heights.to_vec();
        cache.rebuild_prefix_heights();
        cache.update_metadata(heights.len(), width);
        cache
    }

    #[test]
    fn reusable_count_rules() {
        let cache = cache_with(&[3, 3, 3], 80);
        assert_eq!(cache.reusable_count(3, 80), 3);
        assert_eq!(cache.reusable_count(5, 80), 3);
        assert_eq!(cache.reusable_count(3, 40), 0);
        // Cleared transcript
        assert_eq!(cache.reusable_count(1, 80), 0);
    }

    #[test]
    fn visible_range_covers_viewport() {
        let cache = cache_with(&[3; 20], 80);
        assert_eq!(cache.total_height(), 60);
        assert_eq!(cache.top_of(0), 0);
        assert_eq!(cache.top_of(4), 12);

        let range = cache.visible_range(30, 10);
        assert!(range.contains(&10));
        assert!(range.contains(&12));
        assert!(!range.contains(&0));
        assert!(!range.contains(&19));
    }

    #[test]
    fn visible_range_of_empty_cache_is_empty() {
        assert!(LayoutCache::default().visible_range(0, 10).is_empty());
    }

    #[test]
    fn newest_entry_is_visible_when_stuck_to_bottom() {
        let entries = entries(12);
        let mut state = MessageListState::new();
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal
            .draw(|f| MessageList::new(&mut state, &entries).render(f, f.area()))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("message 11"));
        assert!(!text.contains("message 0 "));
        assert!(!state.has_unseen_content);
    }

    #[test]
    fn scrolling_up_unpins_and_reveals_unseen_content() {
        let entries = entries(12);
        let mut state = MessageListState::new();
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal
            .draw(|f| MessageList::new(&mut state, &entries).render(f, f.area()))
            .unwrap();

        state.handle_event(&TuiEvent::ScrollPageUp);
        assert!(!state.stick_to_bottom);
        terminal
            .draw(|f| MessageList::new(&mut state, &entries).render(f, f.area()))
            .unwrap();
        assert!(state.has_unseen_content);

        state.handle_event(&TuiEvent::ScrollToBottom);
        assert!(state.stick_to_bottom);
    }
}
