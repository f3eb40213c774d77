//! Small link matrices used to illustrate the dense formulation.
//!
//! Rows are destinations, columns are sources.

use nalgebra::DMatrix;

const THIRD: f64 = 1.0 / 3.0;

/// Four pages: 1 -> {2, 3, 4}, 2 -> {3, 4}, 3 -> {1}, 4 -> {1, 3}
pub fn graph_one() -> DMatrix<f64> {
    #[rustfmt::skip]
    let a = DMatrix::from_row_slice(4, 4, &[
        0.0,   0.0, 1.0, 0.5,
        THIRD, 0.0, 0.0, 0.0,
        THIRD, 0.5, 0.0, 0.5,
        THIRD, 0.5, 0.0, 0.0,
    ]);
    a
}

/// Two islands, {1, 2} and {3, 4, 5}: 1 <-> 2, 3 <-> 4, 5 -> {3, 4}.
/// Nothing links to page 5.
pub fn disconnected() -> DMatrix<f64> {
    #[rustfmt::skip]
    let a = DMatrix::from_row_slice(5, 5, &[
        0.0, 1.0, 0.0, 0.0, 0.0,
        1.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 1.0, 0.5,
        0.0, 0.0, 1.0, 0.0, 0.5,
        0.0, 0.0, 0.0, 0.0, 0.0,
    ]);
    a
}

/// [`graph_one`] without the 3 -> 1 link, so column 3 is all zero
pub fn dangling_page_three() -> DMatrix<f64> {
    let mut a = graph_one();
    a[(0, 2)] = 0.0;
    a
}

/// [`graph_one`] plus page 5, with 3 -> 5 and 5 -> 3
pub fn with_page_five() -> DMatrix<f64> {
    #[rustfmt::skip]
    let a = DMatrix::from_row_slice(5, 5, &[
        0.0,   0.0, 0.5, 0.5, 0.0,
        THIRD, 0.0, 0.0, 0.0, 0.0,
        THIRD, 0.5, 0.0, 0.5, 1.0,
        THIRD, 0.5, 0.0, 0.0, 0.0,
        0.0,   0.0, 0.5, 0.0, 0.0,
    ]);
    a
}

/// All fixtures with display names
pub fn all() -> Vec<(&'static str, DMatrix<f64>)> {
    vec![
        ("graph one", graph_one()),
        ("disconnected islands", disconnected()),
        ("dangling page three", dangling_page_three()),
        ("page five added", with_page_five()),
    ]
}
