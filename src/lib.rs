//! PageRank for web-link datasets
//!
//! Ingestion fills a [`GraphBuilder`], which is frozen into a CSR
//! [`LinkGraph`]. [`PageRankEngine`] runs the damped power iteration with
//! dangling-node mass spread uniformly over all pages. The [`dense`] module
//! offers the explicit-matrix formulation (Google matrix, power method,
//! Perron eigenvector) for small graphs and for cross-checking.
//!
//! ```no_run
//! use linkrank::{load_graph, report, PageRankEngine};
//!
//! let graph = load_graph("hollins.dat")?;
//! let result = PageRankEngine::new().compute_rank(&graph);
//! print!("{}", report::format_table(&report::top_n(&result, &graph, 10)));
//! # Ok::<(), linkrank::RankError>(())
//! ```

pub mod dense;
pub mod errors;
pub mod graph;
pub mod ingest;
pub mod pagerank;
pub mod report;
pub mod types;
pub mod validation;

pub use errors::{RankError, Result};
pub use graph::{GraphBuilder, LinkGraph};
pub use ingest::{load_graph, Dataset};
pub use pagerank::{PageRankEngine, PageRankResult};
pub use types::RankConfig;
