use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    AnalyticsOverlay, MessageList, Notice, StatusPanel, TitleBar,
};

/// Screen regions, top to bottom.
pub struct Areas {
    pub title: Rect,
    pub status: Rect,
    pub messages: Rect,
    pub composer: Rect,
    pub hints: Rect,
}

pub fn areas(frame_area: Rect, composer_height: u16) -> Areas {
    use Constraint::{Length, Min};
    let [title, status, messages, composer, hints] = Layout::vertical([
        Length(1),
        Length(1),
        Min(0),
        Length(composer_height),
        Length(1),
    ])
    .areas(frame_area);
    Areas {
        title,
        status,
        messages,
        composer,
        hints,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let area = frame.area();
    let regions = areas(area, tui.composer.calculate_height(area.width));
    let strings = app.locale.strings();

    // Messages first so the title bar sees a fresh "unseen content" flag
    MessageList::new(&mut tui.message_list, &tui.entries).render(frame, regions.messages);

    TitleBar {
        base_url: &app.base_url,
        health: &app.health,
        locale: app.locale,
        loading: tui.loading,
        spinner_frame: tui.spinner_frame,
        has_unseen_content: tui.message_list.has_unseen_content,
    }
    .render(frame, regions.title);

    StatusPanel {
        sentiment: tui.sentiment.as_ref(),
        intent: tui.intent.as_ref(),
        locale: app.locale,
    }
    .render(frame, regions.status);

    let modal_open = tui.overlay.is_some() || !tui.notices.is_empty();
    tui.composer.enabled = tui.send_enabled;
    tui.composer.focused = tui.input_focused && !modal_open;
    tui.composer.render(frame, regions.composer);

    frame.render_widget(
        Line::styled(strings.key_hints, Style::default().fg(Color::DarkGray)),
        regions.hints,
    );

    if let Some(view) = &tui.overlay {
        AnalyticsOverlay {
            view,
            hint: strings.overlay_hint,
        }
        .render(frame, area);
    }
    if let Some(text) = tui.notices.front() {
        Notice {
            text,
            hint: strings.notice_hint,
        }
        .render(frame, area);
    }
}
