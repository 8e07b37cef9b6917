//! # Plain Line Mode
//!
//! A line-oriented front end for pipes and dumb terminals (`--plain`).
//! Each input line is either a slash command or a message; output is
//! printed as the controller describes it, one entry per block.
//!
//! | Input         | Action                  |
//! |---------------|-------------------------|
//! | `/clear`      | `ClearTranscript`       |
//! | `/history`    | `LoadHistory`           |
//! | `/analytics`  | `ShowAnalytics`         |
//! | `/close`      | `CloseAnalytics`        |
//! | `/quit`       | `Quit`                  |
//! | anything else | `Submit(line)`          |

use std::io::{self, Write};

use log::{info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::api::{ChatBackend, run_to_settlement};
use crate::core::action::{Action, Effect};
use crate::core::analytics::{AnalyticsView, Chart};
use crate::core::indicator::IndicatorView;
use crate::core::state::App;
use crate::core::surface::{EntryView, IndicatorSlot, Surface};

/// Maps one input line to the action it triggers.
pub fn parse_line(line: &str) -> Action {
    match line.trim() {
        "/clear" => Action::ClearTranscript,
        "/history" => Action::LoadHistory,
        "/analytics" => Action::ShowAnalytics,
        "/close" => Action::CloseAnalytics,
        "/quit" | "/exit" => Action::Quit,
        _ => Action::Submit(line.to_string()),
    }
}

/// Prints what the controller shows to any writer.
pub struct PrintSurface<W: Write> {
    out: W,
    sentiment: Option<IndicatorView>,
}

impl<W: Write> PrintSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            sentiment: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}").and_then(|_| self.out.flush()) {
            warn!("Failed to write output: {}", e);
        }
    }

    fn emit_chart(&mut self, title: &str, chart: &Chart) {
        self.emit(&format!("  {title}"));
        match chart {
            Chart::Rows(rows) => {
                let width = rows
                    .iter()
                    .map(|r| unicode_width::UnicodeWidthStr::width(r.label.as_str()))
                    .max()
                    .unwrap_or(0);
                for row in rows {
                    let pad = width - unicode_width::UnicodeWidthStr::width(row.label.as_str());
                    self.emit(&format!("    {}{}  {}", row.label, " ".repeat(pad), row.count));
                }
            }
            Chart::Empty(text) => self.emit(&format!("    {text}")),
        }
    }
}

impl<W: Write> Surface for PrintSurface<W> {
    fn append_entry(&mut self, entry: &EntryView) {
        let header = match &entry.time {
            Some(time) => format!("[{}] {}", time, entry.sender_label),
            None => entry.sender_label.clone(),
        };
        self.emit(&format!("{header}:"));
        for line in entry.body.lines() {
            self.emit(&format!("  {line}"));
        }
        if let Some(analysis) = &entry.analysis_line {
            self.emit(&format!("  {analysis}"));
        }
    }

    fn clear_entries(&mut self) {
        self.emit("----------------------------------------");
    }

    fn scroll_to_latest(&mut self) {}

    fn set_indicator(&mut self, slot: IndicatorSlot, view: &IndicatorView) {
        // Both slots are always pushed sentiment first; print once per pair.
        match slot {
            IndicatorSlot::Sentiment => self.sentiment = Some(view.clone()),
            IndicatorSlot::Intent => {
                let sentiment = self
                    .sentiment
                    .as_ref()
                    .map(|v| v.text.clone())
                    .unwrap_or_else(|| "-".to_string());
                self.emit(&format!("[{} | {}]", sentiment, view.text));
            }
        }
    }

    fn set_send_enabled(&mut self, _enabled: bool) {}

    fn set_loading(&mut self, loading: bool) {
        if loading {
            self.emit("...");
        }
    }

    fn clear_input(&mut self) {}

    fn focus_input(&mut self) {}

    fn show_overlay(&mut self, view: &AnalyticsView) {
        self.emit(&format!("== {} ==", view.title));
        self.emit_chart(&view.sentiment_title, &view.sentiment);
        self.emit_chart(&view.intent_title, &view.intents);
        self.emit("==");
    }

    fn hide_overlay(&mut self) {}

    fn notify(&mut self, notice: &str) {
        self.emit(&format!("! {notice}"));
    }
}

/// Drives the controller from `input` until EOF or `/quit`.
pub async fn run_lines<R, W>(
    app: &mut App,
    backend: &dyn ChatBackend,
    input: R,
    surface: &mut PrintSurface<W>,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    run_to_settlement(app, surface, backend, Action::Start).await;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let action = parse_line(&line);
        if run_to_settlement(app, surface, backend, action).await == Effect::Quit {
            break;
        }
    }
    info!("Plain mode finished");
    Ok(())
}

/// Runs plain mode on stdin/stdout.
pub async fn run(mut app: App, backend: &dyn ChatBackend) -> io::Result<()> {
    let mut surface = PrintSurface::new(io::stdout());
    let input = BufReader::new(tokio::io::stdin());
    run_lines(&mut app, backend, input, &mut surface).await
}
