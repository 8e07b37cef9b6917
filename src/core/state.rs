//! # Application State
//!
//! Everything the controller knows, in one explicit value owned by the
//! event loop. No globals; tests build their own `App`.
//!
//! ```text
//! App
//! ├── locale: Locale               // label/message language
//! ├── base_url: String             // backend shown in the title bar
//! ├── transcript: Transcript       // the conversation log
//! ├── indicators: IndicatorState   // last rendered analysis
//! ├── send_enabled: bool           // the single send gate
//! ├── in_flight: usize             // calls awaiting settlement (loading indicator)
//! ├── overlay_open: bool           // analytics overlay visibility
//! └── health: BackendHealth        // result of the startup health check
//! ```
//!
//! State changes only happen through `update(app, action, surface)` in action.rs.

use crate::Locale;
use crate::core::config::ResolvedConfig;
use crate::core::indicator::IndicatorState;
use crate::core::surface::Surface;
use crate::core::transcript::Transcript;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendHealth {
    Unknown,
    Healthy,
    Unhealthy(String),
    Unreachable(String),
}

pub struct App {
    pub locale: Locale,
    pub base_url: String,
    pub transcript: Transcript,
    pub indicators: IndicatorState,
    pub send_enabled: bool,
    pub in_flight: usize,
    pub overlay_open: bool,
    pub health: BackendHealth,
}

impl App {
    pub fn new(locale: Locale, base_url: impl Into<String>) -> Self {
        Self {
            locale,
            base_url: base_url.into(),
            transcript: Transcript::new(),
            indicators: IndicatorState::default(),
            send_enabled: true,
            in_flight: 0,
            overlay_open: false,
            health: BackendHealth::Unknown,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.locale, config.base_url.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Marks one more call in flight and turns the loading indicator on.
    pub(crate) fn begin_call(&mut self, surface: &mut dyn Surface) {
        self.in_flight += 1;
        if self.in_flight == 1 {
            surface.set_loading(true);
        }
    }

    /// Releases one call; the indicator goes off once nothing is in flight.
    pub(crate) fn end_call(&mut self, surface: &mut dyn Surface) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.in_flight == 0 {
            surface.set_loading(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RecordingSurface, SurfaceCall};

    #[test]
    fn test_app_new_defaults() {
        let app = App::new(Locale::Ja, "http://localhost:5000");
        assert!(app.transcript.is_empty());
        assert!(app.send_enabled);
        assert!(!app.is_loading());
        assert!(!app.overlay_open);
        assert_eq!(app.indicators, IndicatorState::default());
        assert_eq!(app.health, BackendHealth::Unknown);
    }

    #[test]
    fn loading_stays_on_until_every_call_settles() {
        let mut app = App::new(Locale::Ja, "http://localhost:5000");
        let mut surface = RecordingSurface::default();

        app.begin_call(&mut surface);
        app.begin_call(&mut surface);
        app.end_call(&mut surface);
        assert!(app.is_loading());
        assert!(surface.loading);

        app.end_call(&mut surface);
        assert!(!app.is_loading());
        assert!(!surface.loading);
        let toggles = surface
            .calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::SetLoading(_)))
            .count();
        assert_eq!(toggles, 2);
    }
}
