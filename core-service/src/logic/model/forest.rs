//! Isolation Forest
//!
//! Unsupervised outlier model: random axis-aligned splits isolate rare
//! points in fewer steps. Scores follow the usual convention
//! (`score_sample = -2^(-E[h(x)] / c(ψ))`, lower = more anomalous) and the
//! decision offset comes from the contamination percentile of the
//! training scores.

use ndarray::{ArrayView2, Axis};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use crate::error::{EngineError, EngineResult};
use crate::logic::config::ModelConfig;
use super::threshold::contamination_offset;

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Upper bound on rows per tree
pub const DEFAULT_MAX_SAMPLES: usize = 256;

#[derive(Debug, Clone)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub contamination: f64,
    pub seed: u64,
    pub max_samples: usize,
}

impl From<&ModelConfig> for ForestParams {
    fn from(config: &ModelConfig) -> Self {
        Self {
            n_estimators: config.estimators,
            contamination: config.contamination,
            seed: config.seed,
            max_samples: DEFAULT_MAX_SAMPLES,
        }
    }
}

impl Default for ForestParams {
    fn default() -> Self {
        Self::from(&ModelConfig::default())
    }
}

/// Expected path length of an unsuccessful BST search over `n` points
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

// ============================================================================
// TREE
// ============================================================================

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        size: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

#[derive(Debug, Clone)]
struct IsolationTree {
    root: Node,
}

impl IsolationTree {
    fn build(data: &ArrayView2<f64>, rows: Vec<usize>, max_depth: usize, rng: &mut StdRng) -> Self {
        Self {
            root: grow(data, rows, 0, max_depth, rng),
        }
    }

    fn path_length(&self, x: &[f64]) -> f64 {
        let mut node = &self.root;
        let mut depth = 0.0;
        loop {
            match node {
                Node::Leaf { size } => return depth + average_path_length(*size),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if x[*feature] <= *threshold { left } else { right };
                    depth += 1.0;
                }
            }
        }
    }
}

fn grow(
    data: &ArrayView2<f64>,
    rows: Vec<usize>,
    depth: usize,
    max_depth: usize,
    rng: &mut StdRng,
) -> Node {
    if depth >= max_depth || rows.len() <= 1 {
        return Node::Leaf { size: rows.len() };
    }

    // Only features that still vary can split
    let candidates: Vec<(usize, f64, f64)> = (0..data.ncols())
        .filter_map(|f| {
            let (lo, hi) = rows.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &r| {
                let v = data[[r, f]];
                (lo.min(v), hi.max(v))
            });
            (lo < hi).then_some((f, lo, hi))
        })
        .collect();

    if candidates.is_empty() {
        return Node::Leaf { size: rows.len() };
    }

    let (feature, lo, hi) = candidates[rng.gen_range(0..candidates.len())];
    let threshold = rng.gen_range(lo..hi);
    let (left, right): (Vec<usize>, Vec<usize>) =
        rows.into_iter().partition(|&r| data[[r, feature]] <= threshold);

    Node::Split {
        feature,
        threshold,
        left: Box::new(grow(data, left, depth + 1, max_depth, rng)),
        right: Box::new(grow(data, right, depth + 1, max_depth, rng)),
    }
}

// ============================================================================
// FOREST
// ============================================================================

#[derive(Debug, Clone)]
pub struct IsolationForest {
    trees: Vec<IsolationTree>,
    n_features: usize,
    sample_size: usize,
    /// Scores below this are outliers
    offset: f64,
}

impl IsolationForest {
    /// Fit on every row of `data`. Deterministic for a given seed.
    pub fn fit(data: ArrayView2<f64>, params: &ForestParams) -> EngineResult<Self> {
        let (n_rows, n_features) = data.dim();
        if n_rows < 2 {
            return Err(EngineError::ModelTraining(format!(
                "need at least 2 samples, got {}",
                n_rows
            )));
        }
        if n_features == 0 {
            return Err(EngineError::ModelTraining("no features".to_string()));
        }
        if params.n_estimators == 0 {
            return Err(EngineError::ModelTraining("n_estimators is 0".to_string()));
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(EngineError::ModelTraining("non-finite feature value".to_string()));
        }

        let sample_size = params.max_samples.max(2).min(n_rows);
        let max_depth = ((sample_size as f64).log2().ceil() as usize).max(1);
        let mut rng = StdRng::seed_from_u64(params.seed);

        let trees = (0..params.n_estimators)
            .map(|_| {
                let rows = index::sample(&mut rng, n_rows, sample_size).into_vec();
                IsolationTree::build(&data, rows, max_depth, &mut rng)
            })
            .collect();

        let mut forest = Self {
            trees,
            n_features,
            sample_size,
            offset: 0.0,
        };

        let training_scores: Vec<f64> = data
            .axis_iter(Axis(0))
            .map(|row| forest.score_sample(&row.to_vec()))
            .collect();
        forest.offset = contamination_offset(&training_scores, params.contamination)
            .ok_or_else(|| {
                EngineError::ModelTraining(format!(
                    "invalid contamination {}",
                    params.contamination
                ))
            })?;

        Ok(forest)
    }

    /// Negated anomaly score in [-1, 0); lower is more anomalous
    pub fn score_sample(&self, x: &[f64]) -> f64 {
        let mean_path = self.trees.iter().map(|t| t.path_length(x)).sum::<f64>()
            / self.trees.len() as f64;
        -(2f64).powf(-mean_path / average_path_length(self.sample_size))
    }

    /// `score_sample - offset`; negative means outlier
    pub fn decision_function(&self, x: &[f64]) -> EngineResult<f64> {
        if x.len() != self.n_features {
            return Err(EngineError::ModelInference(format!(
                "expected {} features, got {}",
                self.n_features,
                x.len()
            )));
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(EngineError::ModelInference("non-finite feature value".to_string()));
        }
        Ok(self.score_sample(x) - self.offset)
    }

    /// True only for the outlier (minority) class
    pub fn is_outlier(&self, x: &[f64]) -> EngineResult<bool> {
        Ok(self.decision_function(x)? < 0.0)
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}
