//! Ingestion of line-oriented link datasets
//!
//! The format is one header line followed by label lines (`<id> <url>`) and
//! edge lines (`<src> <dst>`). Bytes are decoded as Latin-1, so any input
//! decodes. Blank and unrecognized lines are skipped.

pub mod line;

use std::path::Path;

use crate::errors::{RankError, Result};
use crate::graph::{GraphBuilder, LinkGraph};

pub use line::{classify, Line};

/// Labels and edges read from a dataset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    /// `(id, label)` in file order
    pub labels: Vec<(u32, String)>,
    /// `(src, dst)` in file order
    pub edges: Vec<(u32, u32)>,
    /// Largest id appearing in any label or edge
    pub max_id: u32,
    /// Non-blank lines that were neither labels nor edges
    pub skipped: usize,
}

impl Dataset {
    /// Parse dataset text. The first line is a header and is ignored.
    pub fn parse_str(text: &str) -> Self {
        let mut dataset = Dataset::default();

        for raw in text.lines().skip(1) {
            match classify(raw) {
                Line::Blank => {}
                Line::Label(id, url) => {
                    dataset.max_id = dataset.max_id.max(id);
                    dataset.labels.push((id, url.to_owned()));
                }
                Line::Edge(src, dst) => {
                    dataset.max_id = dataset.max_id.max(src).max(dst);
                    dataset.edges.push((src, dst));
                }
                Line::Unrecognized => {
                    log::debug!("skipping unrecognized line: {raw:?}");
                    dataset.skipped += 1;
                }
            }
        }

        dataset
    }

    /// Parse raw bytes, decoding each byte as one Latin-1 character
    pub fn parse_bytes(bytes: &[u8]) -> Self {
        let text: String = bytes.iter().map(|&b| char::from(b)).collect();
        Self::parse_str(&text)
    }

    /// Read and parse a dataset file
    ///
    /// A missing file is [`RankError::SourceNotFound`]; nothing is returned
    /// in that case.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| RankError::from_io(e, path))?;
        let dataset = Self::parse_bytes(&bytes);
        log::info!(
            "loaded {}: {} labels, {} edges, max id {}, {} lines skipped",
            path.display(),
            dataset.labels.len(),
            dataset.edges.len(),
            dataset.max_id,
            dataset.skipped
        );
        Ok(dataset)
    }

    /// Fill a graph store. All ids are seen before `finalize` runs.
    pub fn to_builder(&self) -> GraphBuilder {
        let mut builder = GraphBuilder::with_capacity(self.max_id as usize);
        for (id, label) in &self.labels {
            builder.add_label(*id, label.as_str());
        }
        for &(src, dst) in &self.edges {
            builder.add_edge(src, dst);
        }
        builder.finalize();
        builder
    }

    /// Finalize the dataset into an immutable [`LinkGraph`] over ids `[1, max_id]`
    pub fn to_graph(&self) -> LinkGraph {
        LinkGraph::from_builder(&self.to_builder())
    }
}

/// Load a dataset file straight into a [`LinkGraph`]
pub fn load_graph(path: impl AsRef<Path>) -> Result<LinkGraph> {
    let graph = Dataset::from_path(path)?.to_graph();
    log::info!(
        "graph ready: {} nodes, {} edges, {} dangling",
        graph.num_nodes,
        graph.num_edges(),
        graph.dangling_nodes().len()
    );
    Ok(graph)
}
