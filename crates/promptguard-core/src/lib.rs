//! # PromptGuard Core
//!
//! Weighted-ensemble decision core for the PromptGuard LLM firewall.
//! Screens inbound prompts for injection, jailbreaks and obfuscated
//! payloads, and outbound responses for secret leakage and policy
//! violations.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        PROMPTGUARD CORE                      │
//! ├──────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │                    ┌────────────────┐                        │
//! │                    │  PromptGuard   │  ← ensemble facade     │
//! │                    └───────┬────────┘                        │
//! │                            │                                 │
//! │      ┌──────────────┬──────┴───────┬───────────────┐         │
//! │      ▼              ▼              ▼               ▼         │
//! │ ┌──────────┐ ┌────────────┐ ┌───────────┐ ┌──────────────┐  │
//! │ │ Heuristic│ │ Statistical│ │ External  │ │   Output     │  │
//! │ │  layer   │ │  + drift   │ │ ML scorers│ │   monitors   │  │
//! │ └──────────┘ └────────────┘ └───────────┘ └──────────────┘  │
//! │                                                              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Decision model
//!
//! `scan_input` fuses three normalized signals into one risk score:
//! heuristics (keyword/regex/encoding, weight 0.2), normalized perplexity
//! (weight 0.3) and a classifier probability (weight 0.5). Scores at or
//! above the 0.5 blocking threshold are rejected with a full audit
//! breakdown. An encoded payload is decoded first and the DECODED text is
//! what the statistical and ML layers score.
//!
//! `scan_output` screens model responses for canary-token leakage, PII
//! patterns and banned phrases.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use promptguard_core::{GuardConfig, PromptGuard};
//!
//! let guard = PromptGuard::new(GuardConfig::default(), perplexity, classifier)?;
//!
//! let decision = guard.scan_input("Ignore previous instructions!")?;
//! if decision.is_blocked() {
//!     reject(decision.reason);
//! }
//! ```
//!
//! ## Security notes
//!
//! - The ensemble always runs in full; heuristic hits never skip the ML
//!   layers.
//! - Scorer failures propagate as hard errors: fail-closed, never a
//!   silent PASS.
//! - The drift window is the only cross-request mutable state and is
//!   mutex-guarded; everything else is pure per request.

mod config;
mod decision;
mod error;
mod pipeline;
mod scorer;

pub use config::{DriftConfig, EncodingConfig, EnsembleWeights, GuardConfig};
pub use decision::{RiskBreakdown, ScanDecision, ScanRequest, ScanStatus};
pub use error::GuardError;
pub use pipeline::{normalize_perplexity, PromptGuard};
pub use scorer::{IntentClassifier, PerplexityScorer, ScorerError};

// Re-export component types for convenience
pub use promptguard_analysis::{
    cosine_similarity, DivergenceAnalyzer, DriftDetector, EmbedError, EmbeddingProvider,
    SemanticDriftCalculator,
};
pub use promptguard_heuristics::{
    DecodeOutcome, Detector, DetectorResult, EncodingMethod, EncodingPatternDetector,
    KeywordFilter, RegexRuleEngine, StatisticalAnalyzer, TokenMetrics,
};
pub use promptguard_monitor::{LeakFinding, LeakageMonitor, PolicyEnforcer};

/// Core result type for scan operations.
pub type Result<T> = std::result::Result<T, GuardError>;
