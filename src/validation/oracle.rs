//! Reference rankers used to cross-check the sparse engine.
//!
//! [`PetgraphOracle`] rebuilds the link graph as a `petgraph` `DiGraph` and
//! runs its own pull-based iteration, following the conventions of the
//! usual library reference: parallel links collapse into one edge, dangling
//! nodes spread their mass uniformly, and the stopping rule is
//! `err < N * tol`. [`DenseOracle`] is limited to small graphs.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::dense::{fill_dangling_columns, google_matrix, link_matrix, power_method};
use crate::errors::{RankError, Result};
use crate::graph::csr::LinkGraph;

/// Largest graph the dense oracle accepts
pub const DENSE_ORACLE_LIMIT: usize = 500;

/// An independent PageRank implementation, used only for validation
pub trait ReferenceRanker {
    /// Scores indexed by `id - 1`, using damping `alpha` and tolerance `tol`
    fn pagerank(&self, graph: &LinkGraph, alpha: f64, tol: f64) -> Result<Vec<f64>>;
}

fn check_alpha(alpha: f64) -> Result<()> {
    if alpha.is_finite() && (0.0..=1.0).contains(&alpha) {
        Ok(())
    } else {
        Err(RankError::InvalidDamping(alpha))
    }
}

/// Sparse reference on a `petgraph` directed graph, isolated nodes included
#[derive(Debug, Clone, Copy)]
pub struct PetgraphOracle {
    pub max_iterations: usize,
}

impl Default for PetgraphOracle {
    fn default() -> Self {
        Self {
            max_iterations: 100,
        }
    }
}

impl PetgraphOracle {
    /// One node per id in `[1, N]`; repeated links become a single edge
    fn to_digraph(graph: &LinkGraph) -> DiGraph<u32, ()> {
        let mut digraph = DiGraph::with_capacity(graph.num_nodes, graph.num_edges());
        let nodes: Vec<NodeIndex> = graph.node_ids().map(|id| digraph.add_node(id)).collect();

        for src in graph.node_ids() {
            let from = nodes[src as usize - 1];
            for &dst in graph.neighbors(src) {
                if let Some(&to) = (dst as usize).checked_sub(1).and_then(|i| nodes.get(i)) {
                    digraph.update_edge(from, to, ());
                }
            }
        }
        digraph
    }
}

impl ReferenceRanker for PetgraphOracle {
    fn pagerank(&self, graph: &LinkGraph, alpha: f64, tol: f64) -> Result<Vec<f64>> {
        check_alpha(alpha)?;
        let n = graph.num_nodes;
        if n == 0 {
            return Ok(vec![]);
        }

        let digraph = Self::to_digraph(graph);
        let nf = n as f64;
        let out_degree: Vec<usize> = digraph
            .node_indices()
            .map(|v| digraph.edges(v).count())
            .collect();
        let dangling: Vec<usize> = (0..n).filter(|&v| out_degree[v] == 0).collect();

        let mut ranks = vec![1.0 / nf; n];
        for _iteration in 0..self.max_iterations {
            let dangling_sum: f64 = dangling.iter().map(|&v| ranks[v]).sum();
            let uniform = (alpha * dangling_sum + (1.0 - alpha)) / nf;

            let next: Vec<f64> = digraph
                .node_indices()
                .map(|node| {
                    let incoming: f64 = digraph
                        .edges_directed(node, Direction::Incoming)
                        .map(|edge| {
                            let caller = edge.source().index();
                            ranks[caller] / out_degree[caller] as f64
                        })
                        .sum();
                    alpha * incoming + uniform
                })
                .collect();

            let err: f64 = next.iter().zip(&ranks).map(|(a, b)| (a - b).abs()).sum();
            ranks = next;
            if err < nf * tol {
                return Ok(ranks);
            }
        }

        Err(RankError::ReferenceDidNotConverge {
            iterations: self.max_iterations,
        })
    }
}

/// Dense Google-matrix computation with dangling columns spread uniformly
///
/// Needs two `N x N` matrices, so graphs above [`DENSE_ORACLE_LIMIT`] are refused.
#[derive(Debug, Clone, Copy)]
pub struct DenseOracle {
    pub max_iterations: usize,
}

impl Default for DenseOracle {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
        }
    }
}

impl ReferenceRanker for DenseOracle {
    fn pagerank(&self, graph: &LinkGraph, alpha: f64, tol: f64) -> Result<Vec<f64>> {
        check_alpha(alpha)?;
        if graph.num_nodes > DENSE_ORACLE_LIMIT {
            return Err(RankError::TooLargeForDense {
                nodes: graph.num_nodes,
                limit: DENSE_ORACLE_LIMIT,
            });
        }

        let mut a = link_matrix(graph);
        fill_dangling_columns(&mut a);
        let m = google_matrix(&a, 1.0 - alpha)?;
        let result = power_method(&m, tol, self.max_iterations)?;
        if !result.converged {
            log::warn!("dense oracle hit its cap of {} iterations", self.max_iterations);
        }
        Ok(result.vector.iter().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;
    use crate::pagerank::PageRankEngine;

    fn graph_with_dangling_nodes() -> LinkGraph {
        let mut builder = GraphBuilder::new();
        for (src, dst) in [(1, 2), (1, 3), (2, 3), (3, 1), (3, 6), (4, 2), (4, 4)] {
            builder.add_edge(src, dst);
        }
        builder.add_label(7, "http://isolated.example");
        builder.build()
    }

    #[test]
    fn test_petgraph_oracle_agrees_with_engine() {
        let graph = graph_with_dangling_nodes();

        let ours = PageRankEngine::new().compute_rank(&graph);
        let reference = PetgraphOracle::default().pagerank(&graph, 0.85, 1e-9).unwrap();

        assert_eq!(reference.len(), 7);
        assert!((reference.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        for (a, b) in ours.scores.iter().zip(&reference) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_petgraph_oracle_collapses_parallel_links() {
        let graph = LinkGraph::from_edges(&[(1, 2), (1, 2), (1, 3), (2, 1), (3, 1)]);

        // Two-step cycles decay slowly, so allow a longer run
        let ours = PageRankEngine::new().with_max_iterations(1000).compute_rank(&graph);
        let oracle = PetgraphOracle { max_iterations: 1000 };
        let reference = oracle.pagerank(&graph, 0.85, 1e-9).unwrap();

        // The engine counts the repeated link twice, the reference once
        assert!(ours.score(2) > ours.score(3));
        assert!((reference[1] - reference[2]).abs() < 1e-9);
    }

    #[test]
    fn test_petgraph_oracle_reports_non_convergence() {
        let graph = LinkGraph::from_edges(&[(1, 2), (2, 1), (3, 1)]);
        let oracle = PetgraphOracle { max_iterations: 10 };

        let err = oracle.pagerank(&graph, 1.0, 1e-9).unwrap_err();
        assert!(matches!(err, RankError::ReferenceDidNotConverge { iterations: 10 }));
    }

    #[test]
    fn test_petgraph_oracle_empty_graph() {
        let reference = PetgraphOracle::default()
            .pagerank(&LinkGraph::default(), 0.85, 1e-9)
            .unwrap();
        assert!(reference.is_empty());
    }

    #[test]
    fn test_dense_oracle_agrees_with_petgraph_oracle() {
        let graph = graph_with_dangling_nodes();

        let dense = DenseOracle::default().pagerank(&graph, 0.85, 1e-9).unwrap();
        let sparse = PetgraphOracle::default().pagerank(&graph, 0.85, 1e-9).unwrap();

        for (a, b) in dense.iter().zip(&sparse) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_dense_oracle_refuses_large_graphs() {
        let graph = LinkGraph::from_edges(&[(1, DENSE_ORACLE_LIMIT as u32 + 1)]);

        let err = DenseOracle::default().pagerank(&graph, 0.85, 1e-9).unwrap_err();
        assert!(matches!(err, RankError::TooLargeForDense { nodes: 501, limit: 500 }));
    }

    #[test]
    fn test_oracles_reject_bad_alpha() {
        let graph = LinkGraph::from_edges(&[(1, 2)]);
        assert!(DenseOracle::default().pagerank(&graph, 2.0, 1e-9).is_err());
        assert!(PetgraphOracle::default().pagerank(&graph, f64::NAN, 1e-9).is_err());
    }
}
