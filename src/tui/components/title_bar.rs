//! # TitleBar Component
//!
//! Top line: application name, the server being talked to, its health and
//! a spinner while any call is in flight. Purely presentational; every field
//! is a prop.
//!
//! ```text
//! SentiChat | http://localhost:5000 | ● 接続済み | ⠹ | ↓
//! ```
//!
//! The spinner and the "↓" (unseen content below) segments only appear when
//! active, so the line stays short on narrow terminals.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::Locale;
use crate::core::state::BackendHealth;
use crate::tui::component::Component;

const APP_NAME: &str = "SentiChat";
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct TitleBar<'a> {
    pub base_url: &'a str,
    pub health: &'a BackendHealth,
    pub locale: Locale,
    pub loading: bool,
    pub spinner_frame: usize,
    pub has_unseen_content: bool,
}

impl TitleBar<'_> {
    fn health_span(&self) -> Span<'static> {
        let strings = self.locale.strings();
        match self.health {
            BackendHealth::Healthy => {
                Span::styled(format!("● {}", strings.health_ok), Style::default().fg(Color::Green))
            }
            BackendHealth::Unhealthy(_) | BackendHealth::Unreachable(_) => {
                Span::styled(format!("● {}", strings.health_down), Style::default().fg(Color::Red))
            }
            BackendHealth::Unknown => Span::styled(
                format!("○ {}", strings.health_unknown),
                Style::default().fg(Color::DarkGray),
            ),
        }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let separator = || Span::styled(" | ", Style::default().fg(Color::DarkGray));

        let mut spans = vec![
            Span::styled(APP_NAME, Style::default().add_modifier(Modifier::BOLD)),
            separator(),
            Span::raw(self.base_url.to_string()),
            separator(),
            self.health_span(),
        ];
        if self.loading {
            spans.push(separator());
            spans.push(Span::styled(
                SPINNER[self.spinner_frame % SPINNER.len()],
                Style::default().fg(Color::Yellow),
            ));
        }
        if self.has_unseen_content {
            spans.push(separator());
            spans.push(Span::styled("↓", Style::default().fg(Color::Cyan)));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(title_bar: &mut TitleBar) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 1)).unwrap();
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn bar(health: &BackendHealth) -> TitleBar<'_> {
        TitleBar {
            base_url: "http://localhost:5000",
            health,
            locale: Locale::En,
            loading: false,
            spinner_frame: 0,
            has_unseen_content: false,
        }
    }

    #[test]
    fn test_shows_server_and_health() {
        let health = BackendHealth::Healthy;
        let text = render(&mut bar(&health));
        assert!(text.contains("SentiChat"));
        assert!(text.contains("http://localhost:5000"));
        assert!(text.contains("connected"));
        assert!(!text.contains('↓'));
    }

    #[test]
    fn test_unreachable_backend_is_offline() {
        let health = BackendHealth::Unreachable("refused".to_string());
        assert!(render(&mut bar(&health)).contains("offline"));
    }

    #[test]
    fn test_spinner_and_unseen_marker() {
        let health = BackendHealth::Unknown;
        let mut title_bar = bar(&health);
        title_bar.loading = true;
        title_bar.spinner_frame = 12;
        title_bar.has_unseen_content = true;
        let text = render(&mut title_bar);
        assert!(text.contains("connecting…"));
        assert!(text.contains(SPINNER[2]));
        assert!(text.contains('↓'));
    }
}
