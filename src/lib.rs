//! sentichat library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod api;
pub mod core;
pub mod plain;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Display language for labels and fixed bot messages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}
