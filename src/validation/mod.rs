//! Validation against a reference PageRank
//!
//! The engine's top-ranked nodes are looked up in a reference score vector
//! and the absolute differences recorded. Agreement within `1e-6` is the
//! usual acceptance bar.

pub mod oracle;

use serde::Serialize;

use crate::errors::{RankError, Result};
use crate::pagerank::PageRankResult;

pub use oracle::{DenseOracle, PetgraphOracle, ReferenceRanker, DENSE_ORACLE_LIMIT};

/// Default agreement threshold for [`ScoreComparison::agrees`]
pub const AGREEMENT_THRESHOLD: f64 = 1e-6;

/// One compared node
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub id: u32,
    pub ours: f64,
    pub reference: f64,
    pub diff: f64,
}

/// Side-by-side scores for the top nodes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComparison {
    pub rows: Vec<ComparisonRow>,
    /// Largest `diff` over `rows`
    pub max_abs_diff: f64,
}

impl ScoreComparison {
    pub fn agrees(&self, threshold: f64) -> bool {
        self.max_abs_diff < threshold
    }
}

/// Compare the `top` highest-scoring nodes of `ours` against `reference`
/// (indexed by `id - 1`)
pub fn compare_scores(ours: &PageRankResult, reference: &[f64], top: usize) -> Result<ScoreComparison> {
    if reference.len() != ours.scores.len() {
        return Err(RankError::DimensionMismatch {
            expected: ours.scores.len(),
            found: reference.len(),
        });
    }

    let rows: Vec<ComparisonRow> = ours
        .top_n(top)
        .into_iter()
        .map(|(id, score)| {
            let reference = reference[id as usize - 1];
            ComparisonRow {
                id,
                ours: score,
                reference,
                diff: (score - reference).abs(),
            }
        })
        .collect();

    let max_abs_diff = rows.iter().map(|r| r.diff).fold(0.0, f64::max);
    Ok(ScoreComparison { rows, max_abs_diff })
}
