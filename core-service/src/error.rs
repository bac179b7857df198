//! Error handling

use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

/// Why an incoming event was refused at the ingestion boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidEvent {
    #[error("unknown user: {0}")]
    UnknownUser(String),

    #[error("unknown activity kind: {0}")]
    UnknownActivity(String),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid event: {0}")]
    InvalidEvent(#[from] InvalidEvent),

    // Non-fatal: the detector falls back to "no model"
    #[error("model training failed: {0}")]
    ModelTraining(String),

    // Non-fatal: treated as not anomalous
    #[error("model inference failed: {0}")]
    ModelInference(String),

    // Non-fatal: polarity degrades to neutral
    #[error("sentiment scoring failed: {0}")]
    Scoring(String),

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("runner has shut down")]
    RunnerClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_event_display() {
        let err: EngineError = InvalidEvent::UnknownUser("user_Z".to_string()).into();
        assert_eq!(err.to_string(), "invalid event: unknown user: user_Z");
    }

    #[test]
    fn test_runner_closed_display() {
        assert_eq!(EngineError::RunnerClosed.to_string(), "runner has shut down");
    }
}
