//! # Core Application Logic
//!
//! The chat controller. It knows nothing about terminals or HTTP clients:
//! every visible change goes through the [`surface::Surface`] trait and every
//! server call is returned as an [`action::Effect`] for an adapter to run.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (state)          │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. Pure.          │
//!                    └───────────┬─────────────┘
//!                                │ Surface calls / Effect::Spawn
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   Plain    │      │    API     │
//!     │  Adapter   │      │  (lines)   │      │ (reqwest)  │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all controller state in one place
//! - [`action`]: The `Action` enum and `update()`
//! - [`composer`], [`history`], [`analytics`]: one per user-facing operation
//! - [`transcript`], [`indicator`]: the two displayed regions the controller owns
//! - [`format`]: escaping, labels and localized strings

pub mod action;
pub mod analytics;
pub mod composer;
pub mod config;
pub mod format;
pub mod history;
pub mod indicator;
pub mod message;
pub mod state;
pub mod surface;
pub mod transcript;
