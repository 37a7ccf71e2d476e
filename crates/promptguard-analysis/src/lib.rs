//! # PromptGuard Analysis - Temporal and Adversarial Signals
//!
//! Components that look across requests or across perturbed variants of one
//! request, complementing the per-request heuristic layer:
//!
//! | Component | Purpose |
//! |-----------|---------|
//! | [`DriftDetector`] | Sliding-window z-score anomaly check over the risk-score stream |
//! | [`DivergenceAnalyzer`] | Random input mutation + KL divergence for robustness evaluation |
//! | [`SemanticDriftCalculator`] | Cosine similarity over externally supplied embeddings |
//!
//! The drift window is the only mutable state in the whole detection stack;
//! everything else here is pure. The divergence analyzer is an offline
//! robustness-evaluation utility and never sits on the per-request scan
//! path.

pub mod divergence;
pub mod drift;
pub mod semantic;

pub use divergence::DivergenceAnalyzer;
pub use drift::DriftDetector;
pub use semantic::{cosine_similarity, EmbedError, EmbeddingProvider, SemanticDriftCalculator};
