//! Perron eigenvector of a raw link matrix
//!
//! Power iteration on a substochastic matrix decays towards zero instead of
//! producing a ranking. The dominant eigenvector still carries the ranking,
//! so it is computed directly here.
//!
//! # Algorithm
//!
//! 1. Eigenvalues from the real Schur form; keep the one with the largest
//!    real part (`λ`).
//! 2. The eigenvector spans the null space of `A - λI`: take the right
//!    singular vector belonging to the smallest singular value.
//! 3. Flip the sign if the entries sum to a negative number, then divide by
//!    the sum.

use nalgebra::{DMatrix, DVector};

use super::ensure_square;
use crate::errors::{RankError, Result};

/// Dominant eigenpair, normalized to a probability distribution
#[derive(Debug, Clone)]
pub struct PerronVector {
    pub eigenvalue: f64,
    pub vector: DVector<f64>,
}

/// Dominant real eigenpair of a square non-negative matrix
///
/// The eigenvector is sign-corrected and scaled to sum to one. Fails with
/// [`RankError::DegenerateEigenvector`] when its entries sum to zero.
pub fn perron_vector(a: &DMatrix<f64>) -> Result<PerronVector> {
    let n = ensure_square(a)?;
    if n == 0 {
        return Err(RankError::DegenerateEigenvector);
    }

    let eigenvalue = a
        .complex_eigenvalues()
        .iter()
        .map(|z| z.re)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut shifted = a.clone();
    for i in 0..n {
        shifted[(i, i)] -= eigenvalue;
    }

    let svd = shifted.svd(false, true);
    let v_t = svd.v_t.ok_or(RankError::DegenerateEigenvector)?;
    let (smallest, _) = svd
        .singular_values
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))
        .ok_or(RankError::DegenerateEigenvector)?;

    let mut vector: DVector<f64> = v_t.row(smallest).transpose();
    if vector.sum() < 0.0 {
        vector = -vector;
    }

    let sum = vector.sum();
    if sum.abs() < f64::EPSILON {
        return Err(RankError::DegenerateEigenvector);
    }
    vector /= sum;

    log::debug!("perron eigenvalue {eigenvalue:.6}");
    Ok(PerronVector { eigenvalue, vector })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::textbook;

    #[test]
    fn test_substochastic_perron_vector() {
        let perron = perron_vector(&textbook::dangling_page_three()).unwrap();

        assert!((perron.eigenvalue - 0.561353).abs() < 1e-5);
        assert!((perron.vector.sum() - 1.0).abs() < 1e-12);

        let expected = [0.206645, 0.122706, 0.438647, 0.232002];
        for (got, want) in perron.vector.iter().zip(expected) {
            assert!((got - want).abs() < 1e-5);
        }
    }

    #[test]
    fn test_stochastic_matrix_has_eigenvalue_one() {
        let perron = perron_vector(&textbook::graph_one()).unwrap();

        assert!((perron.eigenvalue - 1.0).abs() < 1e-9);
        // Stationary distribution of the undamped walk: (12, 4, 9, 6) / 31
        let expected = [12.0 / 31.0, 4.0 / 31.0, 9.0 / 31.0, 6.0 / 31.0];
        for (got, want) in perron.vector.iter().zip(expected) {
            assert!((got - want).abs() < 1e-8);
        }
    }

    #[test]
    fn test_rejects_non_square() {
        assert!(matches!(
            perron_vector(&DMatrix::zeros(3, 2)),
            Err(RankError::NotSquare { .. })
        ));
    }

    #[test]
    fn test_empty_matrix_is_degenerate() {
        assert!(matches!(
            perron_vector(&DMatrix::zeros(0, 0)),
            Err(RankError::DegenerateEigenvector)
        ));
    }
}
