//! Configuration types for the PromptGuard pipeline.
//!
//! Everything here is static construction input: nothing is learned or
//! persisted by the core.

use serde::{Deserialize, Serialize};

use crate::error::GuardError;

/// Tolerance for the weights-sum-to-one invariant.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Relative trust placed in each ensemble signal. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnsembleWeights {
    /// Keyword/regex/encoding layer. Low trust: cheap but false-positive
    /// prone.
    pub heuristic: f64,
    /// Normalized perplexity. Medium trust: catches gibberish and
    /// obfuscation.
    pub perplexity: f64,
    /// Classifier probability. Highest trust: semantic understanding.
    pub bert: f64,
}

impl EnsembleWeights {
    pub fn sum(&self) -> f64 {
        self.heuristic + self.perplexity + self.bert
    }
}

impl Default for EnsembleWeights {
    fn default() -> Self {
        Self {
            heuristic: 0.2,
            perplexity: 0.3,
            bert: 0.5,
        }
    }
}

/// Drift detector settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DriftConfig {
    /// Window capacity (FIFO).
    pub window_size: usize,
    /// Anomaly threshold in standard deviations.
    pub threshold_std: f64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            window_size: 10,
            threshold_std: 2.0,
        }
    }
}

/// Encoding detector settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EncodingConfig {
    /// Minimum candidate length before decode attempts.
    pub min_length: usize,
    /// Minimum printable-character ratio for an accepted decode.
    pub readability_threshold: f64,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            min_length: 16,
            readability_threshold: 0.7,
        }
    }
}

/// Aggregate configuration for [`crate::PromptGuard`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Ensemble signal weights.
    pub weights: EnsembleWeights,
    /// Weighted sums at or above this value block the prompt.
    pub blocking_threshold: f64,
    /// Drift detector settings.
    pub drift: DriftConfig,
    /// Encoding detector settings.
    pub encoding: EncodingConfig,
    /// Character-mutation rate for the divergence analyzer.
    pub mutation_rate: f64,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            weights: EnsembleWeights::default(),
            blocking_threshold: 0.5,
            drift: DriftConfig::default(),
            encoding: EncodingConfig::default(),
            mutation_rate: 0.1,
        }
    }
}

impl GuardConfig {
    /// Reject configurations that would silently skew the risk scale.
    pub fn validate(&self) -> Result<(), GuardError> {
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(GuardError::Config(format!(
                "ensemble weights must sum to 1.0, got {sum}"
            )));
        }
        if !(0.0..=1.0).contains(&self.blocking_threshold) {
            return Err(GuardError::Config(format!(
                "blocking threshold must be in [0, 1], got {}",
                self.blocking_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.encoding.readability_threshold) {
            return Err(GuardError::Config(format!(
                "readability threshold must be in [0, 1], got {}",
                self.encoding.readability_threshold
            )));
        }
        Ok(())
    }
}
