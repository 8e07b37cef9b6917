//! # Surface
//!
//! The rendering adapter the controller talks to. The core never touches a
//! terminal; it describes what should be shown and a `Surface` shows it.
//!
//! ```text
//!   update(app, action, surface)
//!          │
//!          ▼
//!   ┌──────────────┐   append_entry / set_indicator / show_overlay ...
//!   │ dyn Surface  │──────────────────────────────────────────────────▶  TuiState | PrintSurface | RecordingSurface
//!   └──────────────┘
//! ```
//!
//! Every value handed to a surface is already escaped and localized.

use crate::core::analytics::AnalyticsView;
use crate::core::indicator::IndicatorView;
use crate::core::message::Sender;

/// A transcript entry ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub sender: Sender,
    pub sender_label: String,
    pub body: String,
    /// e.g. `😊 感情: positive | 🎯 意図: 挨拶`
    pub analysis_line: Option<String>,
    /// `HH:MM`, absent for placeholders.
    pub time: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorSlot {
    Sentiment,
    Intent,
}

pub trait Surface {
    fn append_entry(&mut self, entry: &EntryView);
    fn clear_entries(&mut self);
    fn scroll_to_latest(&mut self);
    fn set_indicator(&mut self, slot: IndicatorSlot, view: &IndicatorView);
    fn set_send_enabled(&mut self, enabled: bool);
    fn set_loading(&mut self, loading: bool);
    fn clear_input(&mut self);
    fn focus_input(&mut self);
    fn show_overlay(&mut self, view: &AnalyticsView);
    fn hide_overlay(&mut self);
    /// Blocking notice the user has to acknowledge.
    fn notify(&mut self, notice: &str);
}
