//! Dense-matrix PageRank
//!
//! An explicit `N x N` formulation for small graphs. Column `j`, row `i`
//! holds the probability that page `j` passes to page `i`. Memory is
//! `O(N²)`, so this is meant for tens of nodes, fixtures and cross-checks.

pub mod perron;
pub mod textbook;

use nalgebra::{DMatrix, DVector};

use crate::errors::{RankError, Result};
use crate::graph::csr::LinkGraph;

pub use perron::{perron_vector, PerronVector};

/// Outcome of [`power_method`]
#[derive(Debug, Clone)]
pub struct PowerIteration {
    pub vector: DVector<f64>,
    /// Iteration that met the tolerance, or the cap
    pub iterations: usize,
    pub converged: bool,
}

pub(crate) fn ensure_square(a: &DMatrix<f64>) -> Result<usize> {
    if a.is_square() {
        Ok(a.nrows())
    } else {
        Err(RankError::NotSquare {
            rows: a.nrows(),
            cols: a.ncols(),
        })
    }
}

/// Link matrix of `n` pages from a 1-based edge list
///
/// Each source splits its mass evenly over its links. Pages without links keep
/// an all-zero column, which makes the matrix substochastic. Edges touching ids
/// outside `[1, n]` are ignored.
pub fn column_stochastic(n: usize, edges: &[(u32, u32)]) -> DMatrix<f64> {
    let in_range = |id: u32| id >= 1 && id as usize <= n;
    let valid: Vec<(usize, usize)> = edges
        .iter()
        .filter(|&&(src, dst)| in_range(src) && in_range(dst))
        .map(|&(src, dst)| (src as usize - 1, dst as usize - 1))
        .collect();

    let mut degree = vec![0usize; n];
    for &(src, _) in &valid {
        degree[src] += 1;
    }

    let mut a = DMatrix::zeros(n, n);
    for &(src, dst) in &valid {
        a[(dst, src)] += 1.0 / degree[src] as f64;
    }
    a
}

/// Link matrix of a [`LinkGraph`], dangling columns left at zero
pub fn link_matrix(graph: &LinkGraph) -> DMatrix<f64> {
    let n = graph.num_nodes;
    let mut a = DMatrix::zeros(n, n);
    for src in graph.node_ids() {
        let degree = graph.degree(src);
        if degree == 0 {
            continue;
        }
        let share = 1.0 / degree as f64;
        for &dst in graph.neighbors(src) {
            if dst >= 1 && dst as usize <= n {
                a[(dst as usize - 1, src as usize - 1)] += share;
            }
        }
    }
    a
}

/// Replace every all-zero column with the uniform column `1/N`
pub fn fill_dangling_columns(a: &mut DMatrix<f64>) {
    let n = a.nrows();
    if n == 0 {
        return;
    }
    let uniform = 1.0 / n as f64;
    for mut column in a.column_iter_mut() {
        if column.iter().all(|&v| v == 0.0) {
            column.fill(uniform);
        }
    }
}

/// Google matrix `M = (1 - m)A + mS`, with `S` the all-`1/N` matrix
pub fn google_matrix(a: &DMatrix<f64>, teleport: f64) -> Result<DMatrix<f64>> {
    let n = ensure_square(a)?;
    if n == 0 {
        return Ok(a.clone());
    }
    let uniform = teleport / n as f64;
    Ok(a.map(|v| (1.0 - teleport) * v + uniform))
}

/// Repeatedly apply `x <- Mx` from the uniform vector until the L1 change
/// drops below `tol` or `max_iter` is reached
///
/// No renormalisation happens, so a substochastic `M` drains towards zero.
pub fn power_method(m: &DMatrix<f64>, tol: f64, max_iter: usize) -> Result<PowerIteration> {
    let n = ensure_square(m)?;
    if n == 0 {
        return Ok(PowerIteration {
            vector: DVector::zeros(0),
            iterations: 0,
            converged: true,
        });
    }

    let mut x = DVector::from_element(n, 1.0 / n as f64);
    for k in 0..max_iter {
        let x_new = m * &x;
        if (&x_new - &x).lp_norm(1) < tol {
            return Ok(PowerIteration {
                vector: x_new,
                iterations: k + 1,
                converged: true,
            });
        }
        x = x_new;
    }

    Ok(PowerIteration {
        vector: x,
        iterations: max_iter,
        converged: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_sums(a: &DMatrix<f64>) -> Vec<f64> {
        a.column_iter().map(|c| c.sum()).collect()
    }

    #[test]
    fn test_column_stochastic_matches_textbook() {
        let edges = [(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 1), (4, 1), (4, 3)];
        let a = column_stochastic(4, &edges);
        let expected = textbook::graph_one();

        assert!((a - expected).abs().max() < 1e-15);
    }

    #[test]
    fn test_column_stochastic_leaves_dangling_column_zero() {
        let a = column_stochastic(3, &[(1, 2), (2, 1), (2, 3), (1, 9)]);

        assert_eq!(column_sums(&a)[2], 0.0);
        assert!((column_sums(&a)[0] - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_link_matrix_and_dangling_fill() {
        let graph = LinkGraph::from_edges(&[(1, 2), (2, 1), (2, 3)]);
        let mut a = link_matrix(&graph);
        assert_eq!(column_sums(&a)[2], 0.0);

        fill_dangling_columns(&mut a);
        for sum in column_sums(&a) {
            assert!((sum - 1.0).abs() < 1e-12);
        }
        assert!((a[(0, 2)] - 1.0 / 3.0).abs() < 1e-15);
    }

    #[test]
    fn test_google_matrix_is_column_stochastic() {
        let m = google_matrix(&textbook::graph_one(), 0.15).unwrap();

        for sum in column_sums(&m) {
            assert!((sum - 1.0).abs() < 1e-12);
        }
        assert!((m[(0, 0)] - 0.15 / 4.0).abs() < 1e-15);
    }

    #[test]
    fn test_google_matrix_rejects_non_square() {
        let err = google_matrix(&DMatrix::zeros(2, 3), 0.15).unwrap_err();
        assert!(matches!(err, RankError::NotSquare { rows: 2, cols: 3 }));
    }

    #[test]
    fn test_power_method_graph_one() {
        let m = google_matrix(&textbook::graph_one(), 0.15).unwrap();
        let result = power_method(&m, 1e-9, 1000).unwrap();

        assert!(result.converged);
        assert!(result.iterations < 100);
        let expected = [0.368151, 0.141809, 0.287962, 0.202078];
        for (got, want) in result.vector.iter().zip(expected) {
            assert!((got - want).abs() < 1e-5);
        }
        assert_eq!(result.vector.argmax().0, 0);
    }

    #[test]
    fn test_power_method_disconnected_islands() {
        let m = google_matrix(&textbook::disconnected(), 0.15).unwrap();
        let x = power_method(&m, 1e-9, 1000).unwrap().vector;

        let left = x[0] + x[1];
        let right = x[2] + x[3] + x[4];
        assert!(left > 0.0 && right > 0.0);
        assert!((left - 0.4).abs() < 1e-6);
        assert!((right - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_power_method_page_five() {
        let m = google_matrix(&textbook::with_page_five(), 0.15).unwrap();
        let x = power_method(&m, 1e-9, 1000).unwrap().vector;

        // Page 3 overtakes page 1 once it is linked to from page 5
        assert_eq!(x.argmax().0, 2);
        assert!((x[4] - 0.17828).abs() < 1e-4);
    }

    #[test]
    fn test_undamped_substochastic_drains_to_zero() {
        let a = textbook::dangling_page_three();
        let result = power_method(&a, 1e-9, 1000).unwrap();

        assert!(result.converged);
        assert!(result.vector.sum() < 1e-6);
    }

    #[test]
    fn test_uniform_start_is_stationary_for_cycle() {
        let m = column_stochastic(3, &[(1, 2), (2, 3), (3, 1)]);
        let result = power_method(&m, 1e-9, 7).unwrap();

        assert!(result.converged);
        assert_eq!(result.iterations, 1);
    }

    #[test]
    fn test_power_method_cap() {
        let halving = DMatrix::from_row_slice(2, 2, &[0.0, 0.5, 0.5, 0.0]);
        let result = power_method(&halving, 0.0, 7).unwrap();

        assert!(!result.converged);
        assert_eq!(result.iterations, 7);
    }

    #[test]
    fn test_empty_matrix() {
        let result = power_method(&DMatrix::zeros(0, 0), 1e-9, 10).unwrap();
        assert!(result.converged);
        assert_eq!(result.vector.len(), 0);
    }
}
