//! Request and decision types for the scan pipeline.

use serde::{Deserialize, Serialize};

fn default_user_id() -> String {
    "anonymous".to_string()
}

/// An input-scan request. Immutable once received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRequest {
    /// The prompt to screen.
    pub prompt: String,
    /// Requesting user, for the audit log.
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

impl ScanRequest {
    /// Request from an anonymous user.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            user_id: default_user_id(),
        }
    }

    /// Request attributed to a specific user.
    pub fn with_user(prompt: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            user_id: user_id.into(),
        }
    }
}

/// The final PASS/BLOCK status of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanStatus {
    /// Content may proceed.
    Pass,
    /// Content must be rejected.
    Block,
}

/// Per-signal audit record for an input-scan decision.
///
/// Values here are rounded for display; the PASS/BLOCK comparison always
/// happens on full-precision values before rounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskBreakdown {
    /// 1.0 when any heuristic triggered (or an encoded payload was
    /// found), else 0.0.
    pub heuristic_score: f64,
    /// Normalized perplexity in [0, 1].
    pub perplexity_norm: f64,
    /// Classifier malicious-intent probability.
    pub bert_prob: f64,
    /// Unnormalized perplexity, retained for audit.
    pub raw_perplexity: f64,
    /// Shannon entropy of the analyzed text, retained for audit.
    pub entropy: f64,
    /// Truncated decoded payload; present only on the decode path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzed_excerpt: Option<String>,
}

/// Outcome of one scan. Created fresh per call and never mutated after
/// return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanDecision {
    /// PASS or BLOCK.
    pub status: ScanStatus,
    /// Why the content was blocked. `None` on PASS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Weighted ensemble risk in [0, 1]. Input path only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_risk: Option<f64>,
    /// Per-signal audit breakdown. Input path only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<RiskBreakdown>,
    /// Non-blocking observations, e.g. a risk drift anomaly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<String>,
}

impl ScanDecision {
    /// A passing output-path decision.
    pub(crate) fn passed_output() -> Self {
        Self {
            status: ScanStatus::Pass,
            reason: None,
            total_risk: None,
            breakdown: None,
            warnings: None,
        }
    }

    /// A blocking output-path decision.
    pub(crate) fn blocked_output(reason: String) -> Self {
        Self {
            status: ScanStatus::Block,
            reason: Some(reason),
            total_risk: None,
            breakdown: None,
            warnings: None,
        }
    }

    /// `true` when the content was blocked.
    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.status == ScanStatus::Block
    }

    /// `true` when the content passed.
    #[inline]
    pub fn is_passed(&self) -> bool {
        self.status == ScanStatus::Pass
    }
}
