//! Training Corpus
//!
//! Grows by one sample per user per `append_population` call.
//! Never trimmed; only a full reset empties it.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::logic::ledger::ScoreMap;
use super::features::{population_stats, FeatureSample, FEATURE_COUNT};

#[derive(Debug, Clone, Default)]
pub struct FeatureCorpus {
    samples: Vec<FeatureSample>,
}

/// Corpus fill information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusStatus {
    pub current_size: usize,
    pub required_size: usize,
    pub is_ready: bool,
    pub fill_percent: f32,
}

impl FeatureCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample per user sharing the same population mean/max.
    /// Returns the number of samples added.
    pub fn append_population(&mut self, scores: &ScoreMap) -> usize {
        let (mean, max) = population_stats(scores);
        for &score in scores.values() {
            self.samples.push(FeatureSample::new(score as f64, mean, max));
        }
        scores.len()
    }

    pub fn push(&mut self, sample: FeatureSample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[FeatureSample] {
        &self.samples
    }

    /// Row-major `(n, FEATURE_COUNT)` matrix for fitting
    pub fn to_matrix(&self) -> EngineResult<Array2<f64>> {
        let flat: Vec<f64> = self.samples.iter().flat_map(|s| s.values).collect();
        Array2::from_shape_vec((self.samples.len(), FEATURE_COUNT), flat)
            .map_err(|e| EngineError::ModelTraining(format!("corpus shape: {}", e)))
    }

    pub fn status(&self, required: usize) -> CorpusStatus {
        let current = self.samples.len();
        CorpusStatus {
            current_size: current,
            required_size: required,
            is_ready: current >= required,
            fill_percent: if required > 0 {
                (current as f32 / required as f32 * 100.0).min(100.0)
            } else {
                100.0
            },
        }
    }
}
