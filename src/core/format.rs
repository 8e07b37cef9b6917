//! # Formatter
//!
//! Pure helpers that turn analysis codes into display glyphs and labels,
//! and neutralise text before it reaches a terminal. No state.

use chrono::{DateTime, Local};

use crate::Locale;
use crate::core::message::{Intent, Sender, Sentiment};

/// Fixed UI strings for one locale.
pub struct Strings {
    pub user: &'static str,
    pub bot: &'static str,
    pub sentiment_caption: &'static str,
    pub intent_caption: &'static str,
    pub error_prefix: &'static str,
    pub unknown_error: &'static str,
    pub network_error: &'static str,
    pub cleared: &'static str,
    pub no_history: &'static str,
    pub history_failed: &'static str,
    pub history_error: &'static str,
    pub analytics_failed: &'static str,
    pub analytics_error: &'static str,
    pub analytics_title: &'static str,
    pub sentiment_chart: &'static str,
    pub intent_chart: &'static str,
    pub no_sentiment_data: &'static str,
    pub no_intent_data: &'static str,
    pub count_suffix: &'static str,
    pub composer_title: &'static str,
    pub composer_busy: &'static str,
    pub key_hints: &'static str,
    pub overlay_hint: &'static str,
    pub notice_hint: &'static str,
    pub health_ok: &'static str,
    pub health_down: &'static str,
    pub health_unknown: &'static str,
    intents: [&'static str; 8],
}

const JA: Strings = Strings {
    user: "あなた",
    bot: "ボット",
    sentiment_caption: "感情",
    intent_caption: "意図",
    error_prefix: "エラーが発生しました: ",
    unknown_error: "不明なエラー",
    network_error: "ネットワークエラーが発生しました。しばらく待ってから再試行してください。",
    cleared: "チャットがクリアされました。何でも聞いてください！",
    no_history: "履歴がありません。新しい会話を始めましょう！",
    history_failed: "履歴の読み込みに失敗しました。",
    history_error: "履歴の読み込み中にエラーが発生しました。",
    analytics_failed: "分析データの取得に失敗しました。",
    analytics_error: "分析データの取得中にエラーが発生しました。",
    analytics_title: "会話分析",
    sentiment_chart: "感情分析",
    intent_chart: "よく使われる意図",
    no_sentiment_data: "感情分析データがありません。",
    no_intent_data: "意図分析データがありません。",
    count_suffix: "回",
    composer_title: "メッセージ",
    composer_busy: "送信中…",
    key_hints: "Enter 送信 | Shift+Enter 改行 | ^L クリア | ^R 履歴 | ^G 分析 | ^C 終了",
    overlay_hint: " Esc 閉じる ",
    notice_hint: " 任意のキーで閉じる ",
    health_ok: "接続済み",
    health_down: "未接続",
    health_unknown: "接続中…",
    intents: [
        "挨拶",
        "別れ",
        "感謝",
        "名前",
        "天気",
        "ポジティブ",
        "ネガティブ",
        "不明",
    ],
};

const EN: Strings = Strings {
    user: "You",
    bot: "Bot",
    sentiment_caption: "Sentiment",
    intent_caption: "Intent",
    error_prefix: "An error occurred: ",
    unknown_error: "unknown error",
    network_error: "A network error occurred. Please wait a moment and try again.",
    cleared: "The chat was cleared. Ask me anything!",
    no_history: "No history yet. Let's start a new conversation!",
    history_failed: "Failed to load history.",
    history_error: "An error occurred while loading history.",
    analytics_failed: "Failed to fetch analytics.",
    analytics_error: "An error occurred while fetching analytics.",
    analytics_title: "Conversation Analytics",
    sentiment_chart: "Sentiment",
    intent_chart: "Top intents",
    no_sentiment_data: "No sentiment data yet.",
    no_intent_data: "No intent data yet.",
    count_suffix: " times",
    composer_title: "Message",
    composer_busy: "Sending…",
    key_hints: "Enter send | Shift+Enter newline | ^L clear | ^R history | ^G analytics | ^C quit",
    overlay_hint: " Esc close ",
    notice_hint: " Press any key ",
    health_ok: "connected",
    health_down: "offline",
    health_unknown: "connecting…",
    intents: [
        "Greeting",
        "Goodbye",
        "Thanks",
        "Name",
        "Weather",
        "Positive",
        "Negative",
        "Unknown",
    ],
};

impl Locale {
    pub fn strings(self) -> &'static Strings {
        match self {
            Locale::Ja => &JA,
            Locale::En => &EN,
        }
    }
}

pub const ROBOT_GLYPH: &str = "🤖";
pub const INTENT_GLYPH: &str = "🎯";

pub fn sentiment_glyph(sentiment: Option<&Sentiment>) -> &'static str {
    match sentiment {
        Some(Sentiment::Positive) => "😊",
        Some(Sentiment::Negative) => "😔",
        Some(Sentiment::Neutral) => "😐",
        Some(Sentiment::Other(_)) | None => ROBOT_GLYPH,
    }
}

/// Localized label for an intent. Unrecognized codes pass through verbatim.
pub fn intent_label(intent: &Intent, locale: Locale) -> String {
    let labels = &locale.strings().intents;
    let label = match intent {
        Intent::Greeting => labels[0],
        Intent::Goodbye => labels[1],
        Intent::Thanks => labels[2],
        Intent::Name => labels[3],
        Intent::Weather => labels[4],
        Intent::EmotionPositive => labels[5],
        Intent::EmotionNegative => labels[6],
        Intent::Unknown => labels[7],
        Intent::Other(code) => return escape_text(code),
    };
    label.to_string()
}

pub fn sender_label(sender: Sender, locale: Locale) -> &'static str {
    match sender {
        Sender::User => locale.strings().user,
        Sender::Bot => locale.strings().bot,
    }
}

/// Neutralises text so it can only ever be shown literally.
///
/// Terminals interpret control characters, so every C0 control except
/// newline becomes its Unicode control picture (`ESC` → `␛`), DEL becomes
/// `␡`, C1 controls and bidi formatting characters become `\u{..}` escapes
/// and tabs become spaces. Everything else, including `<`, `>` and `&`, is
/// kept as-is.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push('\n'),
            '\t' => out.push_str("    "),
            '\u{0}'..='\u{1f}' => {
                out.push(char::from_u32(0x2400 + c as u32).unwrap_or('\u{fffd}'))
            }
            '\u{7f}' => out.push('␡'),
            // C1 controls and bidi embeddings/overrides/isolates
            '\u{80}'..='\u{9f}' | '\u{202a}'..='\u{202e}' | '\u{2066}'..='\u{2069}' => {
                out.push_str(&format!("\\u{{{:x}}}", c as u32))
            }
            _ => out.push(c),
        }
    }
    out
}

/// `HH:MM` in local time.
pub fn format_time(time: &DateTime<Local>) -> String {
    time.format("%H:%M").to_string()
}
