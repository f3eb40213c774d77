//! Standard PageRank algorithm
//!
//! Implements the damped power iteration with uniform redistribution of
//! dangling-node mass. Every iteration reads only the previous vector and
//! writes a fresh one, so the update is synchronous and order independent.

use super::PageRankResult;
use crate::errors::Result;
use crate::graph::csr::LinkGraph;
use crate::types::RankConfig;

/// Per-iteration numbers passed to an [`IterationObserver`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationStats {
    /// 1-based iteration number
    pub iteration: usize,
    /// L1 distance to the previous vector
    pub delta: f64,
    /// Score held by dangling nodes before this iteration
    pub dangling_mass: f64,
    /// Sum of the new vector
    pub mass: f64,
}

/// Hook called after every iteration with the freshly computed scores
pub trait IterationObserver {
    fn on_iteration(&mut self, stats: &IterationStats, scores: &[f64]);
}

/// Observer that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl IterationObserver for NoopObserver {
    #[inline]
    fn on_iteration(&mut self, _stats: &IterationStats, _scores: &[f64]) {}
}

/// Keep `d` a probability. NaN falls back to the default.
fn sanitize_damping(damping: f64) -> f64 {
    if damping.is_nan() {
        let fallback = RankConfig::default().damping;
        log::warn!("damping factor is NaN, using {fallback}");
        fallback
    } else if !(0.0..=1.0).contains(&damping) {
        let clamped = damping.clamp(0.0, 1.0);
        log::warn!("damping factor {damping} outside [0, 1], using {clamped}");
        clamped
    } else {
        damping
    }
}

/// The rank iterator
#[derive(Debug, Clone)]
pub struct PageRankEngine {
    /// Damping factor `d` (typically 0.85)
    pub damping: f64,
    /// Convergence threshold on the L1 change
    pub tolerance: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
}

impl Default for PageRankEngine {
    fn default() -> Self {
        Self::from(RankConfig::default())
    }
}

impl From<RankConfig> for PageRankEngine {
    fn from(cfg: RankConfig) -> Self {
        Self {
            damping: cfg.damping,
            tolerance: cfg.tolerance,
            max_iterations: cfg.max_iterations,
        }
    }
}

impl PageRankEngine {
    /// Create a new engine with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine from a validated configuration
    pub fn from_config(cfg: &RankConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self::from(*cfg))
    }

    /// Set the damping factor, clamped to `[0, 1]`
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = sanitize_damping(damping);
        self
    }

    /// Set the convergence threshold
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Damping actually used by the iteration, always within `[0, 1]`
    pub fn effective_damping(&self) -> f64 {
        sanitize_damping(self.damping)
    }

    /// Teleport probability `m = 1 - d`
    pub fn teleport(&self) -> f64 {
        1.0 - self.effective_damping()
    }

    /// Run PageRank on a graph
    ///
    /// Returns the last vector even if convergence wasn't achieved, with `converged=false`.
    pub fn compute_rank(&self, graph: &LinkGraph) -> PageRankResult {
        self.compute_rank_observed(graph, &mut NoopObserver)
    }

    /// Run PageRank, reporting every iteration to `observer`
    pub fn compute_rank_observed<O: IterationObserver>(
        &self,
        graph: &LinkGraph,
        observer: &mut O,
    ) -> PageRankResult {
        let n = graph.num_nodes;
        if n == 0 {
            return PageRankResult::new(vec![], 0, 0.0, true);
        }

        let nf = n as f64;
        let d = self.effective_damping();
        let m = 1.0 - d;

        let mut scores = vec![1.0 / nf; n];
        let mut new_scores = vec![0.0; n];

        let dangling_nodes = graph.dangling_nodes();

        let mut iterations = 0;
        let mut delta = f64::MAX;
        let mut converged = false;

        while iterations < self.max_iterations {
            iterations += 1;

            let dangling_mass: f64 = dangling_nodes
                .iter()
                .map(|&id| scores[id as usize - 1])
                .sum();

            // Teleport mass plus recycled dangling mass, spread uniformly
            new_scores.fill((m + d * dangling_mass) / nf);

            for (idx, &score) in scores.iter().enumerate() {
                let id = idx as u32 + 1;
                let degree = graph.degree(id);
                if degree == 0 {
                    continue;
                }

                let share = score * d / degree as f64;
                for &dst in graph.neighbors(id) {
                    match (dst as usize).checked_sub(1).and_then(|i| new_scores.get_mut(i)) {
                        Some(slot) => *slot += share,
                        None => log::debug!("skipping link {id} -> {dst}: outside [1, {n}]"),
                    }
                }
            }

            delta = scores
                .iter()
                .zip(new_scores.iter())
                .map(|(old, new)| (old - new).abs())
                .sum();

            std::mem::swap(&mut scores, &mut new_scores);

            let stats = IterationStats {
                iteration: iterations,
                delta,
                dangling_mass,
                mass: scores.iter().sum(),
            };
            log::debug!("iteration {iterations}: delta {delta:.3e}, mass {:.12}", stats.mass);
            observer.on_iteration(&stats, &scores);

            if delta < self.tolerance {
                converged = true;
                break;
            }
        }

        if converged {
            log::info!("converged after {iterations} iterations (delta {delta:.3e})");
        } else {
            log::warn!(
                "stopped at iteration cap {} without converging (delta {delta:.3e})",
                self.max_iterations
            );
        }

        PageRankResult::new(scores, iterations, delta, converged)
    }
}
