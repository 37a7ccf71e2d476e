//! Adversarial robustness utilities: input mutation and KL divergence.
//!
//! [`DivergenceAnalyzer::mutate_input`] generates perturbed variants of a
//! prompt through random character-level swaps and deletions. Feeding the
//! original and its mutants through a detector and comparing the output
//! distributions with [`DivergenceAnalyzer::kl_divergence`] measures how
//! fragile the detector is: a distribution that shifts sharply under tiny
//! perturbations is easy to evade.
//!
//! Both operations live off the per-request scan path; they are evaluation
//! tooling, not detection.

use rand::Rng;

/// Smoothing added to every probability bin before normalization, so
/// zero-mass bins never produce `log(0)`.
const KL_EPSILON: f64 = 1e-10;

/// Deletions are skipped below this length to avoid degenerating short
/// strings.
const MIN_DELETE_LENGTH: usize = 5;

/// Default fraction of characters mutated per pass.
pub const DEFAULT_MUTATION_RATE: f64 = 0.1;

/// Random mutation generator and distribution comparator.
#[derive(Debug, Clone, Copy)]
pub struct DivergenceAnalyzer {
    mutation_rate: f64,
}

impl Default for DivergenceAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_MUTATION_RATE)
    }
}

impl DivergenceAnalyzer {
    /// Analyzer applying `mutation_rate * len` character mutations per
    /// pass (at least one).
    pub fn new(mutation_rate: f64) -> Self {
        Self { mutation_rate }
    }

    /// The configured mutation rate.
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Mutate with the thread-local RNG. Production callers do not need
    /// determinism; tests should use [`Self::mutate_input_with`].
    pub fn mutate_input(&self, text: &str) -> String {
        self.mutate_input_with(&mut rand::thread_rng(), text)
    }

    /// Apply `max(1, round(rate * len))` random mutations with a
    /// caller-supplied RNG. Each mutation independently either swaps a
    /// character with its (wrapping) right neighbor or deletes it;
    /// deletions only happen while more than 5 characters remain, and
    /// mutation stops entirely below 2 characters.
    pub fn mutate_input_with<R: Rng>(&self, rng: &mut R, text: &str) -> String {
        let mut chars: Vec<char> = text.chars().collect();
        let num_mutations = ((chars.len() as f64 * self.mutation_rate).round() as usize).max(1);

        for _ in 0..num_mutations {
            if chars.len() < 2 {
                break;
            }
            let idx = rng.gen_range(0..chars.len());
            if rng.gen_bool(0.5) {
                let swap_idx = (idx + 1) % chars.len();
                chars.swap(idx, swap_idx);
            } else if chars.len() > MIN_DELETE_LENGTH {
                chars.remove(idx);
            }
        }

        chars.into_iter().collect()
    }

    /// Kullback-Leibler divergence `sum(p * ln(p / q))` between two
    /// distributions of equal length. Both sides are epsilon-smoothed and
    /// renormalized to sum to 1 first, so inputs need not be normalized
    /// and zero-mass bins are safe. The result is >= 0, with 0 for
    /// identical distributions.
    pub fn kl_divergence(&self, p: &[f64], q: &[f64]) -> f64 {
        debug_assert_eq!(p.len(), q.len(), "distributions must have equal length");

        let smooth = |dist: &[f64]| -> Vec<f64> {
            let shifted: Vec<f64> = dist.iter().map(|v| v + KL_EPSILON).collect();
            let total: f64 = shifted.iter().sum();
            shifted.into_iter().map(|v| v / total).collect()
        };

        let p = smooth(p);
        let q = smooth(q);
        p.iter()
            .zip(q.iter())
            .map(|(pi, qi)| pi * (pi / qi).ln())
            .sum()
    }
}
