//! Sentiment Module - Communication tone over a simulated message stream

pub mod lexicon;
pub mod messages;
pub mod scorer;

pub use messages::pick_message;
pub use scorer::{classify, score_message, try_score, SentimentLabel, SentimentReading};
