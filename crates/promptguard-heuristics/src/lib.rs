//! # PromptGuard Heuristics - First-Pass Detection Layer
//!
//! Fast, model-free detectors that run before any statistical or ML scoring.
//! They are cheap enough to run on every request and catch the attacks that
//! have a fixed syntactic signature.
//!
//! | Detector | Catches |
//! |----------|---------|
//! | [`KeywordFilter`] | Known injection phrases ("ignore previous instructions", DAN) |
//! | [`RegexRuleEngine`] | Attack syntax: code-execution primitives, markup injection, jailbreak markers |
//! | [`EncodingPatternDetector`] | Base64/Hex-obfuscated payloads hiding the real instruction |
//! | [`StatisticalAnalyzer`] | Shannon entropy and token metrics for the audit trail |
//!
//! All detectors in this crate are pure and total over their input: decode
//! failures collapse into [`DecodeOutcome::NotEncoded`] and are never
//! surfaced, and empty input yields neutral results rather than errors.
//!
//! The decision core composes the keyword and regex detectors through the
//! [`Detector`] capability trait, never through concrete types.

pub mod encoding;
pub mod keyword;
pub mod models;
pub mod rules;
pub mod stats;

pub use encoding::EncodingPatternDetector;
pub use keyword::KeywordFilter;
pub use models::{DecodeOutcome, Detector, DetectorResult, EncodingMethod};
pub use rules::RegexRuleEngine;
pub use stats::{StatisticalAnalyzer, TokenMetrics};
