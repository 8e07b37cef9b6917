//! # Analytics Panel
//!
//! Fetches aggregate counts and shows them in an overlay that is independent
//! of the transcript. The two charts are built separately so one empty list
//! never hides the other.

use log::{info, warn};

use crate::Locale;
use crate::api::{AnalyticsSummary, BackendError};
use crate::core::action::Request;
use crate::core::format::{INTENT_GLYPH, escape_text, intent_label, sentiment_glyph};
use crate::core::message::{Intent, Sentiment};
use crate::core::state::App;
use crate::core::surface::Surface;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRow {
    pub label: String,
    pub count: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chart {
    Rows(Vec<ChartRow>),
    /// "No data" placeholder text.
    Empty(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsView {
    pub title: String,
    pub sentiment_title: String,
    pub sentiment: Chart,
    pub intent_title: String,
    pub intents: Chart,
}

impl AnalyticsView {
    /// Rows keep the server's order.
    pub fn build(summary: &AnalyticsSummary, locale: Locale) -> Self {
        let strings = locale.strings();
        let count = |n: u64| format!("{}{}", n, strings.count_suffix);

        let sentiment = if summary.sentiment_analysis.is_empty() {
            Chart::Empty(strings.no_sentiment_data.to_string())
        } else {
            Chart::Rows(
                summary
                    .sentiment_analysis
                    .iter()
                    .map(|row| {
                        let parsed = row.sentiment.as_deref().and_then(Sentiment::parse);
                        let code = parsed
                            .as_ref()
                            .map(|s| escape_text(s.as_str()))
                            .unwrap_or_else(|| "-".to_string());
                        ChartRow {
                            label: format!("{} {}", sentiment_glyph(parsed.as_ref()), code),
                            count: count(row.count),
                        }
                    })
                    .collect(),
            )
        };

        let intents = if summary.top_intents.is_empty() {
            Chart::Empty(strings.no_intent_data.to_string())
        } else {
            Chart::Rows(
                summary
                    .top_intents
                    .iter()
                    .map(|row| {
                        let label = row
                            .intent
                            .as_deref()
                            .and_then(Intent::parse)
                            .map(|i| intent_label(&i, locale))
                            .unwrap_or_else(|| "-".to_string());
                        ChartRow {
                            label: format!("{} {}", INTENT_GLYPH, label),
                            count: count(row.count),
                        }
                    })
                    .collect(),
            )
        };

        Self {
            title: strings.analytics_title.to_string(),
            sentiment_title: strings.sentiment_chart.to_string(),
            sentiment,
            intent_title: strings.intent_chart.to_string(),
            intents,
        }
    }
}

pub fn show(app: &mut App, surface: &mut dyn Surface) -> Request {
    app.begin_call(surface);
    Request::Analytics
}

/// Opens the overlay on success; otherwise raises a blocking notice and
/// leaves the overlay as it was.
pub fn settle(
    app: &mut App,
    result: Result<AnalyticsSummary, BackendError>,
    surface: &mut dyn Surface,
) {
    let strings = app.locale.strings();
    match result {
        Ok(summary) => {
            info!(
                "Analytics: {} sentiment rows, {} intent rows",
                summary.sentiment_analysis.len(),
                summary.top_intents.len()
            );
            surface.show_overlay(&AnalyticsView::build(&summary, app.locale));
            app.overlay_open = true;
        }
        Err(e) => {
            warn!("Analytics fetch failed: {}", e);
            surface.notify(if e.is_application() {
                strings.analytics_failed
            } else {
                strings.analytics_error
            });
        }
    }
    app.end_call(surface);
}

/// Hides the overlay. Closing an already-closed overlay does nothing.
pub fn close(app: &mut App, surface: &mut dyn Surface) {
    if app.overlay_open {
        app.overlay_open = false;
        surface.hide_overlay();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{IntentCount, SentimentCount};

    fn summary(sentiments: &[(&str, u64)], intents: &[(&str, u64)]) -> AnalyticsSummary {
        AnalyticsSummary {
            sentiment_analysis: sentiments
                .iter()
                .map(|(s, c)| SentimentCount {
                    sentiment: Some(s.to_string()),
                    count: *c,
                })
                .collect(),
            top_intents: intents
                .iter()
                .map(|(i, c)| IntentCount {
                    intent: Some(i.to_string()),
                    count: *c,
                })
                .collect(),
        }
    }

    #[test]
    fn rows_are_decorated_and_keep_server_order() {
        let view = AnalyticsView::build(
            &summary(&[("negative", 1), ("positive", 9)], &[("weather", 4), ("food", 2)]),
            Locale::Ja,
        );
        assert_eq!(
            view.sentiment,
            Chart::Rows(vec![
                ChartRow {
                    label: "😔 negative".into(),
                    count: "1回".into()
                },
                ChartRow {
                    label: "😊 positive".into(),
                    count: "9回".into()
                },
            ])
        );
        assert_eq!(
            view.intents,
            Chart::Rows(vec![
                ChartRow {
                    label: "🎯 天気".into(),
                    count: "4回".into()
                },
                ChartRow {
                    label: "🎯 food".into(),
                    count: "2回".into()
                },
            ])
        );
    }

    #[test]
    fn empty_sentiment_list_does_not_hide_intents() {
        let view = AnalyticsView::build(&summary(&[], &[("greeting", 3)]), Locale::Ja);
        assert_eq!(view.sentiment, Chart::Empty("感情分析データがありません。".into()));
        assert!(matches!(view.intents, Chart::Rows(ref rows) if rows.len() == 1));
    }

    #[test]
    fn both_lists_empty() {
        let view = AnalyticsView::build(&AnalyticsSummary::default(), Locale::En);
        assert_eq!(view.sentiment, Chart::Empty("No sentiment data yet.".into()));
        assert_eq!(view.intents, Chart::Empty("No intent data yet.".into()));
    }

    #[test]
    fn english_count_suffix() {
        let view = AnalyticsView::build(&summary(&[("neutral", 2)], &[]), Locale::En);
        assert_eq!(
            view.sentiment,
            Chart::Rows(vec![ChartRow {
                label: "😐 neutral".into(),
                count: "2 times".into()
            }])
        );
    }
}
