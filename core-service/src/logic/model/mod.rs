//! Model Module - Outlier detection over risk features
//!
//! Feature extraction, training corpus, isolation forest and the detector
//! that ties them together. Training and inference failures never leave
//! this module: the detector degrades to "not anomalous".

pub mod features;
pub mod buffer;
pub mod threshold;
pub mod forest;
pub mod detector;

// Re-export common types
pub use features::{FeatureSample, FEATURE_COUNT};
pub use buffer::{CorpusStatus, FeatureCorpus};
pub use forest::{ForestParams, IsolationForest};
pub use detector::{DetectorStatus, OutlierDetector};
