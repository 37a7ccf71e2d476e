//! Ordered regex rules over known attack syntax.
//!
//! Covers three families: code-execution primitives smuggled into prompts,
//! markup injection aimed at downstream renderers, and explicit jailbreak
//! markers. First match wins; the matched pattern source is reported so the
//! audit trail names the rule that fired.

use regex::Regex;

use crate::models::{Detector, DetectorResult};

/// Pattern sources, in scan order. Compiled case-insensitively.
const SUSPICIOUS_PATTERNS: &[&str] = &[
    // Code-execution primitives
    r"import\s+os",
    r"import\s+sys",
    r"os\.system\(",
    r"subprocess\.",
    r"exec\(",
    r"eval\(",
    // Markup injection
    r"<script>",
    r"javascript:",
    // Jailbreak markers
    r"/jailbreak",
    r"\[System Mode\]",
    r"ADMIN_Override",
];

/// Ordered case-insensitive pattern scan. Patterns compile once at
/// construction.
pub struct RegexRuleEngine {
    rules: Vec<(Regex, &'static str)>,
}

impl RegexRuleEngine {
    /// Compile the built-in rule set.
    pub fn new() -> Self {
        let rules = SUSPICIOUS_PATTERNS
            .iter()
            .map(|source| {
                let pattern =
                    Regex::new(&format!("(?i){source}")).expect("static pattern must compile");
                (pattern, *source)
            })
            .collect();
        Self { rules }
    }
}

impl Default for RegexRuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for RegexRuleEngine {
    fn name(&self) -> &'static str {
        "regex"
    }

    fn scan(&self, text: &str) -> DetectorResult {
        for (pattern, source) in &self.rules {
            if pattern.is_match(text) {
                return DetectorResult::hit(format!("suspicious pattern '{source}'"));
            }
        }
        DetectorResult::clean()
    }
}
