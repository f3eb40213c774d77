//! Error types for ingestion, configuration and dense-matrix solving.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RankError {
    /// The ingestion source does not exist. No partial graph is produced.
    #[error("dataset not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("I/O error: {source} (path: {})", path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("damping factor must lie in [0, 1], got {0}")]
    InvalidDamping(f64),

    #[error("tolerance must be a non-negative number, got {0}")]
    InvalidTolerance(f64),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("dominant eigenvector sums to zero and cannot be normalized")]
    DegenerateEigenvector,

    #[error("dense computation limited to {limit} nodes, graph has {nodes}")]
    TooLargeForDense { nodes: usize, limit: usize },

    #[error("reference ranking did not converge within {iterations} iterations")]
    ReferenceDidNotConverge { iterations: usize },
}

pub type Result<T> = std::result::Result<T, RankError>;

impl RankError {
    /// Map an I/O failure on `path`, turning `NotFound` into [`RankError::SourceNotFound`].
    pub fn from_io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            RankError::SourceNotFound { path }
        } else {
            RankError::Io { source, path }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_source_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = RankError::from_io(io, "missing.dat");
        assert!(matches!(err, RankError::SourceNotFound { .. }));
        assert_eq!(err.to_string(), "dataset not found: missing.dat");
    }

    #[test]
    fn test_other_io_kept_as_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err = RankError::from_io(io, "locked.dat");
        assert!(matches!(err, RankError::Io { .. }));
    }
}
