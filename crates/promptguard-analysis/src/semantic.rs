//! Semantic drift via cosine similarity of sentence embeddings.
//!
//! The embedding space itself lives outside the core: an
//! [`EmbeddingProvider`] wraps whatever sentence encoder the deployment
//! uses and must return vectors of consistent dimensionality. This module
//! only composes the two embeddings into a similarity score.

use thiserror::Error;

/// Failure from the external embedding provider.
#[derive(Debug, Error)]
#[error("embedding provider failure: {0}")]
pub struct EmbedError(String);

impl EmbedError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// External sentence-embedding collaborator.
pub trait EmbeddingProvider {
    /// Embed `text` into a fixed-length vector. Dimensionality must be
    /// consistent across calls.
    fn embed(&self, text: &str) -> Result<Vec<f64>, EmbedError>;
}

/// Compares the meaning of two texts through an external embedding space.
pub struct SemanticDriftCalculator<P> {
    provider: P,
}

impl<P: EmbeddingProvider> SemanticDriftCalculator<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Cosine similarity in [-1, 1] between the embeddings of the two
    /// texts. Near 1.0: semantically equivalent. Near 0.0: drifted
    /// meaning.
    pub fn calculate_similarity(&self, text1: &str, text2: &str) -> Result<f64, EmbedError> {
        let a = self.provider.embed(text1)?;
        let b = self.provider.embed(text2)?;
        Ok(cosine_similarity(&a, &b))
    }
}

/// Cosine similarity of two vectors. Zero-magnitude vectors yield 0.0
/// rather than dividing by zero.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a < f64::EPSILON || norm_b < f64::EPSILON {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Fixed-vector provider for tests.
    struct TableProvider {
        table: HashMap<&'static str, Vec<f64>>,
    }

    impl EmbeddingProvider for TableProvider {
        fn embed(&self, text: &str) -> Result<Vec<f64>, EmbedError> {
            self.table
                .get(text)
                .cloned()
                .ok_or_else(|| EmbedError::new(format!("no embedding for '{text}'")))
        }
    }

    #[test]
    fn test_identical_vectors_score_one() {
        let sim = cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]);
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_orthogonal_vectors_score_zero() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]);
        assert!(sim.abs() < 1e-9);
    }

    #[test]
    fn test_opposite_vectors_score_minus_one() {
        let sim = cosine_similarity(&[1.0, 1.0], &[-1.0, -1.0]);
        assert!((sim + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_calculator_uses_provider() {
        let mut table = HashMap::new();
        table.insert("summarize this", vec![0.9, 0.1, 0.0]);
        table.insert("give a summary", vec![0.8, 0.2, 0.0]);
        table.insert("delete everything", vec![0.0, 0.1, 0.9]);

        let calc = SemanticDriftCalculator::new(TableProvider { table });
        let close = calc
            .calculate_similarity("summarize this", "give a summary")
            .unwrap();
        let far = calc
            .calculate_similarity("summarize this", "delete everything")
            .unwrap();
        assert!(close > 0.9);
        assert!(far < 0.3);
    }

    #[test]
    fn test_provider_failure_propagates() {
        let calc = SemanticDriftCalculator::new(TableProvider {
            table: HashMap::new(),
        });
        assert!(calc.calculate_similarity("a", "b").is_err());
    }
}
