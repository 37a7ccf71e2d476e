//! Sliding-window z-score drift detection over a risk-score stream.
//!
//! The detector keeps a bounded FIFO window of recent ensemble risk scores.
//! A new score landing more than `threshold_std` standard deviations from
//! the window mean signals a sudden shift in the risk profile of incoming
//! traffic, e.g. the onset of an automated attack campaign.
//!
//! The window is cross-request mutable state: one detector instance lives
//! as long as the pipeline that owns it and is updated by every scan. A
//! caller sharing one detector across threads must treat
//! [`DriftDetector::update_and_check`] as a single critical section - the
//! mean/std read, the append and the eviction must not interleave.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Samples required before z-scores are meaningful.
const MIN_SAMPLES: usize = 5;

/// Added to the standard deviation so zero-variance windows never divide
/// by zero.
const STD_EPSILON: f64 = 1e-9;

/// Default window capacity.
pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// Default anomaly threshold in standard deviations.
pub const DEFAULT_THRESHOLD_STD: f64 = 2.0;

/// Rolling z-score anomaly detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftDetector {
    history: VecDeque<f64>,
    window_size: usize,
    threshold_std: f64,
}

impl Default for DriftDetector {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE, DEFAULT_THRESHOLD_STD)
    }
}

impl DriftDetector {
    /// Detector with the given window capacity and anomaly threshold.
    pub fn new(window_size: usize, threshold_std: f64) -> Self {
        Self {
            history: VecDeque::with_capacity(window_size),
            window_size,
            threshold_std,
        }
    }

    /// Score the new value against the existing window, then absorb it.
    ///
    /// Returns `(is_anomaly, drift_score)`. With fewer than 5 prior samples
    /// the result is always `(false, 0.0)` and the score is still
    /// appended. The mean and (population) standard deviation are computed
    /// over the window BEFORE the append; the oldest entry is evicted once
    /// the window exceeds capacity.
    pub fn update_and_check(&mut self, new_score: f64) -> (bool, f64) {
        let mut is_anomaly = false;
        let mut drift_score = 0.0;

        if self.history.len() >= MIN_SAMPLES {
            let n = self.history.len() as f64;
            let mean = self.history.iter().sum::<f64>() / n;
            let variance = self
                .history
                .iter()
                .map(|score| (score - mean).powi(2))
                .sum::<f64>()
                / n;
            let std = variance.sqrt() + STD_EPSILON;

            drift_score = (new_score - mean) / std;
            is_anomaly = drift_score.abs() > self.threshold_std;
        }

        self.history.push_back(new_score);
        if self.history.len() > self.window_size {
            self.history.pop_front();
        }

        (is_anomaly, drift_score)
    }

    /// Number of scores currently held in the window.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// `true` when no scores have been absorbed yet.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
