//! Banned-phrase policy enforcement on model output.
//!
//! The last gate before a response leaves the system: phrases a secured
//! deployment must never emit, regardless of how the conversation got
//! there.

/// Phrases compared case-insensitively against the response.
const BANNED_PHRASES: &[&str] = &[
    "i can generate a bomb",
    "i can help you hack",
    "bypass security",
    "illegally",
    "unfiltered response",
    "dan mode enabled",
];

/// Case-insensitive banned-phrase containment check. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyEnforcer;

impl PolicyEnforcer {
    pub fn new() -> Self {
        Self
    }

    /// Returns the first banned phrase contained in `text`, if any.
    pub fn validate_response(&self, text: &str) -> Option<&'static str> {
        let lower = text.to_lowercase();
        BANNED_PHRASES.iter().find(|phrase| lower.contains(**phrase)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_response_passes() {
        let policy = PolicyEnforcer::new();
        assert_eq!(policy.validate_response("The recipe needs two eggs."), None);
    }

    #[test]
    fn test_banned_phrase_detected() {
        let policy = PolicyEnforcer::new();
        assert_eq!(
            policy.validate_response("Here is how to bypass security checks"),
            Some("bypass security")
        );
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let policy = PolicyEnforcer::new();
        assert_eq!(
            policy.validate_response("BYPASS SECURITY now"),
            Some("bypass security")
        );
        assert_eq!(
            policy.validate_response("DAN Mode Enabled!"),
            Some("dan mode enabled")
        );
    }

    #[test]
    fn test_phrase_inside_sentence_detected() {
        let policy = PolicyEnforcer::new();
        assert!(policy
            .validate_response("sure, this is an unfiltered response for you")
            .is_some());
    }
}
