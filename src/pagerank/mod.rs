//! PageRank over link graphs
//!
//! This module provides the result type and the damped power iteration.

pub mod standard;

pub use standard::{IterationObserver, IterationStats, PageRankEngine};

/// Result of a PageRank computation
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// Scores indexed by `id - 1`
    pub scores: Vec<f64>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final convergence delta (L1 norm)
    pub delta: f64,
    /// Whether the algorithm converged
    pub converged: bool,
}

impl PageRankResult {
    /// Create a new PageRank result
    pub fn new(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
        }
    }

    /// Get the score for a node id (0.0 outside `[1, N]`)
    pub fn score(&self, id: u32) -> f64 {
        (id as usize)
            .checked_sub(1)
            .and_then(|i| self.scores.get(i))
            .copied()
            .unwrap_or(0.0)
    }

    /// Iterate over `(id, score)` in id order
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.scores
            .iter()
            .enumerate()
            .map(|(i, &s)| (i as u32 + 1, s))
    }

    /// Sum of all scores
    pub fn total(&self) -> f64 {
        self.scores.iter().sum()
    }

    /// Get top N node ids by score
    ///
    /// Ties keep id order.
    pub fn top_n(&self, n: usize) -> Vec<(u32, f64)> {
        let mut indexed: Vec<_> = self.iter().collect();
        indexed.sort_by(|a, b| b.1.total_cmp(&a.1));
        indexed.truncate(n);
        indexed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_lookup_is_one_based() {
        let result = PageRankResult::new(vec![0.2, 0.5, 0.3], 4, 0.0, true);

        assert_eq!(result.score(1), 0.2);
        assert_eq!(result.score(3), 0.3);
        assert_eq!(result.score(0), 0.0);
        assert_eq!(result.score(4), 0.0);
    }

    #[test]
    fn test_top_n_stable_for_ties() {
        let result = PageRankResult::new(vec![0.1, 0.3, 0.3, 0.3], 1, 0.0, true);

        let top = result.top_n(3);
        assert_eq!(top.iter().map(|(id, _)| *id).collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_top_n_larger_than_graph() {
        let result = PageRankResult::new(vec![0.6, 0.4], 1, 0.0, true);
        assert_eq!(result.top_n(10).len(), 2);
        assert!((result.total() - 1.0).abs() < 1e-12);
    }
}
