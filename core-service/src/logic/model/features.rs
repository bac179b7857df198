//! Risk Feature Vector
//!
//! `[user_score, population_mean_score, population_max_score]`

use serde::{Deserialize, Serialize};

use crate::logic::ledger::ScoreMap;

pub const FEATURE_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureSample {
    pub values: [f64; FEATURE_COUNT],
}

/// Mean and max over every current score; `(0, 0)` when empty
pub fn population_stats(scores: &ScoreMap) -> (f64, f64) {
    if scores.is_empty() {
        return (0.0, 0.0);
    }
    let sum: u64 = scores.values().map(|&s| s as u64).sum();
    let max = scores.values().copied().max().unwrap_or(0);
    (sum as f64 / scores.len() as f64, max as f64)
}

impl FeatureSample {
    pub fn new(user_score: f64, mean: f64, max: f64) -> Self {
        Self {
            values: [user_score, mean, max],
        }
    }

    /// Vector for one user at this moment, `None` if the user has no score
    pub fn for_user(user_id: &str, scores: &ScoreMap) -> Option<Self> {
        let score = *scores.get(user_id)?;
        let (mean, max) = population_stats(scores);
        Some(Self::new(score as f64, mean, max))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(&str, u32)]) -> ScoreMap {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_population_stats() {
        let map = scores(&[("A", 15), ("B", 0), ("C", 5), ("D", 0)]);
        assert_eq!(population_stats(&map), (5.0, 15.0));
        assert_eq!(population_stats(&ScoreMap::new()), (0.0, 0.0));
    }

    #[test]
    fn test_for_user() {
        let map = scores(&[("A", 8), ("B", 2)]);
        let fv = FeatureSample::for_user("A", &map).unwrap();
        assert_eq!(fv.values, [8.0, 5.0, 8.0]);
        assert!(FeatureSample::for_user("Z", &map).is_none());
    }
}
