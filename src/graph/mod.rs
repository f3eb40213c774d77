//! Graph construction and representation
//!
//! This module provides the mutable graph store filled during ingestion
//! and the immutable CSR link graph used by the rank iteration.

pub mod builder;
pub mod csr;

pub use builder::{GraphBuilder, MISSING_LABEL};
pub use csr::LinkGraph;
