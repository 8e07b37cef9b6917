//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as struct fields:
//! - `TitleBar`: app name, server, health, spinner
//! - `StatusPanel`: the sentiment and intent indicators
//! - `Message`: one transcript entry
//! - `AnalyticsOverlay`: the analytics popup
//! - `Notice`: blocking error popup
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `Composer`: multi-line message input
//! - `MessageList`: scrollable transcript with layout caching
//!
//! Each component file holds its state types, rendering, event handling and
//! tests. Data comes in as props; nothing reads `App` directly.
//!
//! ```text
//! components/
//! ├── mod.rs               (this file)
//! ├── title_bar.rs
//! ├── status_panel.rs
//! ├── message.rs
//! ├── message_list.rs
//! ├── composer/            (input, cursor, wrapping)
//! ├── analytics_overlay.rs
//! └── notice.rs
//! ```

pub mod analytics_overlay;
pub mod composer;
pub mod message;
pub mod message_list;
pub mod notice;
pub mod status_panel;
pub mod title_bar;

pub use analytics_overlay::AnalyticsOverlay;
pub use composer::{Composer, ComposerEvent};
pub use message_list::{MessageList, MessageListState};
pub use notice::Notice;
pub use status_panel::StatusPanel;
pub use title_bar::TitleBar;
