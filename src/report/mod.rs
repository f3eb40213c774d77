//! Ranked output for people and machines.

use std::fmt;

use serde::Serialize;

use crate::graph::csr::LinkGraph;
use crate::pagerank::PageRankResult;
use crate::validation::ScoreComparison;

const MAX_LABEL_WIDTH: usize = 50;

/// One row of a ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedNode {
    /// 1-based position in the ranking
    pub position: usize,
    pub id: u32,
    pub score: f64,
    pub label: String,
}

/// The `n` best nodes, highest score first; ties keep id order
pub fn top_n(result: &PageRankResult, graph: &LinkGraph, n: usize) -> Vec<RankedNode> {
    result
        .top_n(n)
        .into_iter()
        .enumerate()
        .map(|(i, (id, score))| RankedNode {
            position: i + 1,
            id,
            score,
            label: graph.label(id).to_owned(),
        })
        .collect()
}

fn shorten(label: &str) -> String {
    if label.chars().count() > MAX_LABEL_WIDTH {
        let head: String = label.chars().take(MAX_LABEL_WIDTH - 3).collect();
        format!("{head}...")
    } else {
        label.to_owned()
    }
}

/// Fixed-width ranking table; long labels are cut to 50 characters
#[derive(Debug, Clone, Copy)]
pub struct Table<'a>(pub &'a [RankedNode]);

impl fmt::Display for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<4} | {:<10} | {:<5} | URL", "Pos", "Score", "ID")?;
        writeln!(f, "{}", "-".repeat(80))?;
        for row in self.0 {
            writeln!(
                f,
                "{:<4} | {:.6}   | {:<5} | {}",
                row.position,
                row.score,
                row.id,
                shorten(&row.label)
            )?;
        }
        Ok(())
    }
}

/// Side-by-side scores with the largest difference underneath
#[derive(Debug, Clone, Copy)]
pub struct ComparisonTable<'a>(pub &'a ScoreComparison);

impl fmt::Display for ComparisonTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<5} | {:<12} | {:<12} | Diff", "ID", "Ours", "Reference")?;
        writeln!(f, "{}", "-".repeat(50))?;
        for row in &self.0.rows {
            writeln!(
                f,
                "{:<5} | {:.9}    | {:.9}    | {:.2e}",
                row.id, row.ours, row.reference, row.diff
            )?;
        }
        writeln!(f, "{}", "-".repeat(50))?;
        writeln!(f, "Max absolute difference: {:.2e}", self.0.max_abs_diff)
    }
}

pub fn format_table(rows: &[RankedNode]) -> String {
    Table(rows).to_string()
}

pub fn format_comparison(cmp: &ScoreComparison) -> String {
    ComparisonTable(cmp).to_string()
}
