//! # Messages
//!
//! Domain types for transcript entries. Wire codes from the backend are
//! parsed into closed enums with an `Other` escape hatch so unknown codes
//! survive round trips untouched.

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Other(String),
}

impl Sentiment {
    /// Parses a wire code. Empty codes carry no information and map to `None`.
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "" => None,
            "positive" => Some(Sentiment::Positive),
            "negative" => Some(Sentiment::Negative),
            "neutral" => Some(Sentiment::Neutral),
            other => Some(Sentiment::Other(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Other(code) => code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Goodbye,
    Thanks,
    Name,
    Weather,
    EmotionPositive,
    EmotionNegative,
    Unknown,
    Other(String),
}

impl Intent {
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "" => None,
            "greeting" => Some(Intent::Greeting),
            "goodbye" => Some(Intent::Goodbye),
            "thanks" => Some(Intent::Thanks),
            "name" => Some(Intent::Name),
            "weather" => Some(Intent::Weather),
            "emotion_positive" => Some(Intent::EmotionPositive),
            "emotion_negative" => Some(Intent::EmotionNegative),
            "unknown" => Some(Intent::Unknown),
            other => Some(Intent::Other(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Goodbye => "goodbye",
            Intent::Thanks => "thanks",
            Intent::Name => "name",
            Intent::Weather => "weather",
            Intent::EmotionPositive => "emotion_positive",
            Intent::EmotionNegative => "emotion_negative",
            Intent::Unknown => "unknown",
            Intent::Other(code) => code,
        }
    }
}

/// Backend classification attached to a bot reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub sentiment: Option<Sentiment>,
    pub intent: Option<Intent>,
}

impl Analysis {
    pub fn from_codes(sentiment: Option<&str>, intent: Option<&str>) -> Self {
        Self {
            sentiment: sentiment.and_then(Sentiment::parse),
            intent: intent.and_then(Intent::parse),
        }
    }
}

/// One transcript entry. Immutable once appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    pub analysis: Option<Analysis>,
    /// `None` for fixed placeholders such as the "chat cleared" notice.
    pub timestamp: Option<DateTime<Local>>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            analysis: None,
            timestamp: Some(Local::now()),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            analysis: None,
            timestamp: Some(Local::now()),
        }
    }

    pub fn bot_with_analysis(text: impl Into<String>, analysis: Analysis) -> Self {
        Self {
            analysis: Some(analysis),
            ..Self::bot(text)
        }
    }

    /// A bot notice with no timestamp.
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            timestamp: None,
            ..Self::bot(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_codes_round_trip_through_as_str() {
        for code in ["positive", "negative", "neutral", "ecstatic"] {
            assert_eq!(Sentiment::parse(code).unwrap().as_str(), code);
        }
        assert_eq!(Sentiment::parse(""), None);
    }

    #[test]
    fn unknown_intent_codes_are_preserved() {
        assert_eq!(
            Intent::parse("food"),
            Some(Intent::Other("food".to_string()))
        );
        assert_eq!(Intent::parse("emotion_negative"), Some(Intent::EmotionNegative));
    }

    #[test]
    fn analysis_from_missing_codes() {
        let analysis = Analysis::from_codes(None, Some("greeting"));
        assert_eq!(analysis.sentiment, None);
        assert_eq!(analysis.intent, Some(Intent::Greeting));
    }

    #[test]
    fn placeholder_has_no_timestamp_or_analysis() {
        let msg = Message::placeholder("cleared");
        assert_eq!(msg.sender, Sender::Bot);
        assert!(msg.timestamp.is_none());
        assert!(msg.analysis.is_none());
        assert!(Message::user("hi").timestamp.is_some());
    }
}
