//! Exact-substring blocklist filter.

use crate::models::{Detector, DetectorResult};

/// Known injection and jailbreak phrases. List order is scan priority, not
/// severity: the first containment match wins.
const BLOCKLIST: &[&str] = &[
    "ignore previous instructions",
    "ignore all instructions",
    "system prompt",
    "you are not a language model",
    "do anything now",
    "dan mode",
    "jailbreak",
    "unfiltered",
    "never refuse",
    "act as an adversary",
    "admin access",
    "developer mode",
];

/// Case-insensitive substring scan against a fixed blocklist. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordFilter;

impl KeywordFilter {
    /// Create a filter over the built-in blocklist.
    pub fn new() -> Self {
        Self
    }
}

impl Detector for KeywordFilter {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn scan(&self, text: &str) -> DetectorResult {
        let lower = text.to_lowercase();
        for keyword in BLOCKLIST {
            if lower.contains(keyword) {
                return DetectorResult::hit(*keyword);
            }
        }
        DetectorResult::clean()
    }
}
