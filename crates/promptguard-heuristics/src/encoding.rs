//! Base64/Hex obfuscation detection and decoding.
//!
//! Attackers hide injection payloads behind an encoding layer so that
//! substring and regex filters never see the real instruction. This module
//! detects candidate payloads, decodes them, and applies a readability
//! filter so binary blobs are not mistaken for hidden text.
//!
//! Candidate gates keep the false-positive rate down:
//!
//! - **Base64**: length is a multiple of 4, or the text ends with `=`
//!   padding. Decoding is strict (standard alphabet, padding enforced).
//! - **Hex**: even length and every character in `[0-9a-fA-F]`.
//!
//! A decode only counts when the bytes are valid UTF-8 AND at least 70% of
//! the decoded characters are printable. Everything else is reported as
//! [`DecodeOutcome::NotEncoded`]; no decode error ever escapes this module.
//!
//! The detector retains no state across calls; it is a pure function of its
//! input and the two construction constants.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::models::{DecodeOutcome, EncodingMethod};

/// Minimum candidate length. Shorter strings trip the multiple-of-4 gate
/// far too often to be worth decoding.
pub const DEFAULT_MIN_LENGTH: usize = 16;

/// Minimum fraction of printable characters in an accepted decode.
pub const DEFAULT_READABILITY_THRESHOLD: f64 = 0.7;

/// Detects and decodes Base64/Hex-obfuscated payloads.
#[derive(Debug, Clone)]
pub struct EncodingPatternDetector {
    min_length: usize,
    readability_threshold: f64,
}

impl Default for EncodingPatternDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl EncodingPatternDetector {
    /// Detector with the default gate constants.
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MIN_LENGTH, DEFAULT_READABILITY_THRESHOLD)
    }

    /// Detector with custom minimum length and readability threshold.
    pub fn with_limits(min_length: usize, readability_threshold: f64) -> Self {
        Self {
            min_length,
            readability_threshold,
        }
    }

    /// Check `text` for an encoded payload and decode it if readable.
    ///
    /// Base64 is tried before Hex: a string of pure hex digits with a
    /// length divisible by 4 is also a valid Base64 candidate, and the
    /// readability filter decides which interpretation survives.
    pub fn scan(&self, text: &str) -> DecodeOutcome {
        let candidate = text.trim();
        if candidate.len() < self.min_length {
            return DecodeOutcome::NotEncoded;
        }

        if candidate.len() % 4 == 0 || candidate.ends_with('=') {
            if let Some(decoded) = self.try_base64(candidate) {
                return DecodeOutcome::Decoded {
                    text: decoded,
                    method: EncodingMethod::Base64,
                };
            }
        }

        if is_hex_candidate(candidate) {
            if let Some(decoded) = self.try_hex(candidate) {
                return DecodeOutcome::Decoded {
                    text: decoded,
                    method: EncodingMethod::Hex,
                };
            }
        }

        DecodeOutcome::NotEncoded
    }

    fn try_base64(&self, candidate: &str) -> Option<String> {
        let bytes = BASE64.decode(candidate).ok()?;
        let text = String::from_utf8(bytes).ok()?;
        self.is_readable(&text).then_some(text)
    }

    fn try_hex(&self, candidate: &str) -> Option<String> {
        let bytes = hex::decode(candidate).ok()?;
        let text = String::from_utf8(bytes).ok()?;
        self.is_readable(&text).then_some(text)
    }

    /// Printable-character ratio filter. Control characters (including
    /// newlines) count as unprintable, so random binary that happens to be
    /// valid UTF-8 is still rejected.
    fn is_readable(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let total = text.chars().count();
        let printable = text.chars().filter(|c| !c.is_control()).count();
        printable as f64 / total as f64 >= self.readability_threshold
    }
}

fn is_hex_candidate(s: &str) -> bool {
    !s.is_empty() && s.len() % 2 == 0 && s.bytes().all(|b| b.is_ascii_hexdigit())
}
