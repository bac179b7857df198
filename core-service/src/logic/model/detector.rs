//! Outlier Detector
//!
//! Owns the training corpus and the fitted forest. The caller drives the
//! retrain cadence; the detector only keeps the countdown.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::logic::config::ModelConfig;
use crate::logic::ledger::ScoreMap;
use super::buffer::{CorpusStatus, FeatureCorpus};
use super::features::FeatureSample;
use super::forest::{ForestParams, IsolationForest};

/// Detector status for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorStatus {
    pub is_trained: bool,
    pub corpus: CorpusStatus,
    pub activities_since_training: u64,
    pub retrain_interval: u64,
}

#[derive(Debug, Clone)]
pub struct OutlierDetector {
    corpus: FeatureCorpus,
    model: Option<IsolationForest>,
    activities_since_training: u64,
    params: ModelConfig,
}

impl OutlierDetector {
    pub fn new(params: ModelConfig) -> Self {
        Self {
            corpus: FeatureCorpus::new(),
            model: None,
            activities_since_training: 0,
            params,
        }
    }

    /// One sample per user from the current scores
    pub fn sample(&mut self, scores: &ScoreMap) {
        self.corpus.append_population(scores);
    }

    /// Fit over the full corpus once it is large enough.
    /// Returns true when a new model replaced the old one.
    pub fn maybe_train(&mut self) -> bool {
        if self.corpus.len() < self.params.min_samples {
            log::debug!(
                "Outlier model not trained: {}/{} samples",
                self.corpus.len(),
                self.params.min_samples
            );
            return false;
        }

        match self.train() {
            Ok(forest) => {
                log::info!(
                    "Outlier model trained on {} samples ({} trees)",
                    self.corpus.len(),
                    forest.n_trees()
                );
                self.model = Some(forest);
                true
            }
            Err(e) => {
                log::error!("Outlier model training failed: {}", e);
                self.model = None;
                false
            }
        }
    }

    fn train(&self) -> EngineResult<IsolationForest> {
        let matrix = self.corpus.to_matrix()?;
        IsolationForest::fit(matrix.view(), &ForestParams::from(&self.params))
    }

    /// False when untrained or when classification fails
    pub fn is_anomalous(&self, user_id: &str, scores: &ScoreMap) -> bool {
        match self.try_is_anomalous(user_id, scores) {
            Ok(flag) => flag,
            Err(e) => {
                log::warn!("Outlier check for {} degraded to inlier: {}", user_id, e);
                false
            }
        }
    }

    pub fn try_is_anomalous(&self, user_id: &str, scores: &ScoreMap) -> EngineResult<bool> {
        let Some(model) = &self.model else {
            return Ok(false);
        };
        let sample = FeatureSample::for_user(user_id, scores).ok_or_else(|| {
            EngineError::ModelInference(format!("no score for {}", user_id))
        })?;
        model.is_outlier(sample.as_slice())
    }

    // ------------------------------------------------------------------
    // Countdown
    // ------------------------------------------------------------------

    pub fn activities_since_training(&self) -> u64 {
        self.activities_since_training
    }

    pub fn note_activity(&mut self) {
        self.activities_since_training += 1;
    }

    pub fn reset_countdown(&mut self) {
        self.activities_since_training = 0;
    }

    pub fn retrain_interval(&self) -> u64 {
        self.params.retrain_interval
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    pub fn corpus_len(&self) -> usize {
        self.corpus.len()
    }

    pub fn status(&self) -> DetectorStatus {
        DetectorStatus {
            is_trained: self.is_trained(),
            corpus: self.corpus.status(self.params.min_samples),
            activities_since_training: self.activities_since_training,
            retrain_interval: self.params.retrain_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(values: [u32; 4]) -> ScoreMap {
        ["user_A", "user_B", "user_C", "user_D"]
            .iter()
            .zip(values)
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    /// 24 calm rounds plus one round where user_A spikes
    fn trained_detector() -> OutlierDetector {
        let mut detector = OutlierDetector::new(ModelConfig::default());
        for round in 0..24u32 {
            let r = round % 4;
            detector.sample(&scores([r, (r + 1) % 4, (r + 2) % 4, (r + 3) % 4]));
        }
        detector.sample(&scores([50, 0, 0, 0]));
        assert!(detector.maybe_train());
        detector
    }

    #[test]
    fn test_untrained_never_anomalous() {
        let mut detector = OutlierDetector::new(ModelConfig::default());
        detector.sample(&scores([0, 0, 0, 0]));
        detector.sample(&scores([50, 0, 0, 0]));

        assert_eq!(detector.corpus_len(), 8);
        assert!(!detector.maybe_train());
        assert!(!detector.is_trained());
        assert!(!detector.is_anomalous("user_A", &scores([50, 0, 0, 0])));
    }

    #[test]
    fn test_spike_is_flagged() {
        let detector = trained_detector();
        assert!(detector.is_anomalous("user_A", &scores([50, 0, 0, 0])));
    }

    #[test]
    fn test_calm_user_is_inlier() {
        let detector = trained_detector();
        assert!(!detector.is_anomalous("user_A", &scores([1, 2, 0, 3])));
    }

    #[test]
    fn test_unknown_user_degrades_to_inlier() {
        let detector = trained_detector();
        assert!(detector.try_is_anomalous("user_Z", &scores([1, 2, 0, 3])).is_err());
        assert!(!detector.is_anomalous("user_Z", &scores([1, 2, 0, 3])));
    }

    #[test]
    fn test_countdown() {
        let mut detector = OutlierDetector::new(ModelConfig::default());
        detector.note_activity();
        detector.note_activity();
        assert_eq!(detector.activities_since_training(), 2);
        detector.reset_countdown();
        assert_eq!(detector.status().activities_since_training, 0);
        assert_eq!(detector.retrain_interval(), 50);
    }
}
