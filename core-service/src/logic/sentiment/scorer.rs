//! Sentiment Scorer
//!
//! Lexicon polarity in [-1, 1]. A modifier (intensifier or negation)
//! scales only the word right after it; polarity is the mean over the
//! weighted words, 0.0 when none are present.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::logic::config::SentimentConfig;
use super::lexicon::{modifier, weight, TOKEN_RE};

/// Characters of the message kept in an activity-log description
pub const DISPLAY_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Positive => "Positive",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boundary is `< negative_threshold`, so exactly 0.0 stays Neutral
pub fn classify(polarity: f64, config: &SentimentConfig) -> SentimentLabel {
    if polarity < config.negative_threshold {
        SentimentLabel::Negative
    } else if polarity > config.positive_threshold {
        SentimentLabel::Positive
    } else {
        SentimentLabel::Neutral
    }
}

pub fn try_score(text: &str) -> EngineResult<f64> {
    if text.trim().is_empty() {
        return Err(EngineError::Scoring("empty message".to_string()));
    }

    let lowered = text.to_lowercase();
    let mut pending: Option<f64> = None;
    let mut total = 0.0;
    let mut hits = 0usize;

    for token in TOKEN_RE.find_iter(&lowered).map(|m| m.as_str()) {
        if let Some(w) = weight(token) {
            total += w * pending.unwrap_or(1.0);
            hits += 1;
        }
        pending = modifier(token);
    }

    if hits == 0 {
        return Ok(0.0);
    }
    let polarity = total / hits as f64;
    if !polarity.is_finite() {
        return Err(EngineError::Scoring(format!("non-finite polarity for {:?}", text)));
    }
    Ok(polarity.clamp(-1.0, 1.0))
}

/// Never fails: a scoring error is logged and reads as neutral
pub fn score_message(text: &str) -> f64 {
    try_score(text).unwrap_or_else(|e| {
        log::warn!("Sentiment degraded to neutral: {}", e);
        0.0
    })
}

/// Scored message with its display label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReading {
    pub message: String,
    pub polarity: f64,
    pub label: SentimentLabel,
}

impl SentimentReading {
    pub fn analyze(message: &str, config: &SentimentConfig) -> Self {
        let polarity = score_message(message);
        Self {
            message: message.to_string(),
            polarity,
            label: classify(polarity, config),
        }
    }

    /// Only a negative reading carries risk
    pub fn risk_delta(&self, config: &SentimentConfig) -> i64 {
        match self.label {
            SentimentLabel::Negative => config.negative_penalty,
            _ => 0,
        }
    }

    /// Activity-log description
    pub fn describe(&self) -> String {
        let shown = if self.message.chars().count() > DISPLAY_CHARS {
            let head: String = self.message.chars().take(DISPLAY_CHARS).collect();
            format!("{}...", head)
        } else {
            self.message.clone()
        };
        format!(
            "Communication Sentiment: {} (Score: {:.2}) - \"{}\"",
            self.label, self.polarity, shown
        )
    }
}
