//! Shared types for the heuristic detection layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single heuristic detector pass.
///
/// Produced fresh on every scan and never persisted. The `detail` field
/// carries the matched keyword or pattern for audit trails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorResult {
    /// Whether the detector matched.
    pub triggered: bool,
    /// Matched keyword/pattern or other human-readable reason.
    pub detail: Option<String>,
}

impl DetectorResult {
    /// A non-triggering result.
    pub fn clean() -> Self {
        Self {
            triggered: false,
            detail: None,
        }
    }

    /// A triggering result with the given detail.
    pub fn hit(detail: impl Into<String>) -> Self {
        Self {
            triggered: true,
            detail: Some(detail.into()),
        }
    }
}

/// Capability interface implemented by every heuristic detector.
///
/// The decision core depends only on this trait; adding a detector never
/// changes the orchestration code.
pub trait Detector {
    /// Short detector name used in logs and audit output.
    fn name(&self) -> &'static str;

    /// Scan `text` and report whether the detector matched.
    fn scan(&self, text: &str) -> DetectorResult;
}

/// Obfuscation encodings the decoder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncodingMethod {
    /// Standard-alphabet Base64.
    Base64,
    /// Plain hexadecimal byte encoding.
    Hex,
}

impl fmt::Display for EncodingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base64 => write!(f, "Base64"),
            Self::Hex => write!(f, "Hex"),
        }
    }
}

/// Result of an encoding scan.
///
/// Decode failures (malformed payloads, invalid UTF-8, unreadable bytes)
/// are never errors; they collapse into [`DecodeOutcome::NotEncoded`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DecodeOutcome {
    /// The payload decoded to readable text.
    Decoded {
        /// The hidden text recovered from the payload.
        text: String,
        /// Which encoding carried it.
        method: EncodingMethod,
    },
    /// No readable encoded payload found.
    NotEncoded,
}

impl DecodeOutcome {
    /// `true` when a readable encoded payload was found.
    #[inline]
    pub fn is_encoded(&self) -> bool {
        matches!(self, Self::Decoded { .. })
    }
}
