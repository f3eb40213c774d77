//! Graph builder for sparse, id-keyed link data
//!
//! Node ids are positive integers that arrive in any order while a dataset is
//! read. The builder keeps adjacency in an `FxHashMap` until [`finalize`]
//! fixes the id range `[1, N]`, after which every id has an entry.
//!
//! [`finalize`]: GraphBuilder::finalize

use rustc_hash::FxHashMap;

use super::csr::LinkGraph;

/// Label returned for nodes that were never given a name.
pub const MISSING_LABEL: &str = "N/A";

/// A mutable graph store filled during ingestion
#[derive(Debug, Default)]
pub struct GraphBuilder {
    /// Maps source id -> destinations, in insertion order
    links: FxHashMap<u32, Vec<u32>>,
    /// Maps id -> human readable name
    labels: FxHashMap<u32, String>,
    /// Largest id seen in any edge or label
    max_seen: u32,
    /// Node count, set once by `finalize`
    num_nodes: Option<usize>,
}

impl GraphBuilder {
    /// Create a new empty graph builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph builder with pre-allocated capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            links: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            labels: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            max_seen: 0,
            num_nodes: None,
        }
    }

    /// Record that `src` links to `dst`
    ///
    /// `dst` does not need to exist yet. Id 0 is not a node and the edge is dropped.
    pub fn add_edge(&mut self, src: u32, dst: u32) {
        if src == 0 || dst == 0 {
            log::debug!("skipping edge {src} -> {dst}: ids start at 1");
            return;
        }
        self.max_seen = self.max_seen.max(src).max(dst);
        self.links.entry(src).or_default().push(dst);
    }

    /// Record a human readable name for `id`
    pub fn add_label(&mut self, id: u32, text: impl Into<String>) {
        if id == 0 {
            log::debug!("skipping label for id 0");
            return;
        }
        self.max_seen = self.max_seen.max(id);
        self.labels.insert(id, text.into());
    }

    /// Fix the id range to `[1, max_id]` where `max_id` is the largest id ever
    /// seen, and give every id without links an empty (dangling) entry.
    ///
    /// Running it again without new edges changes nothing. Returns `N`.
    pub fn finalize(&mut self) -> usize {
        let n = self.max_seen as usize;
        for id in 1..=self.max_seen {
            self.links.entry(id).or_default();
        }
        self.num_nodes = Some(n);
        n
    }

    /// Whether `finalize` has run
    pub fn is_finalized(&self) -> bool {
        self.num_nodes.is_some()
    }

    /// Node count `N`, or the largest id seen so far if not yet finalized
    pub fn node_count(&self) -> usize {
        self.num_nodes.unwrap_or(self.max_seen as usize)
    }

    /// Largest id seen in any edge or label
    pub fn max_id(&self) -> u32 {
        self.max_seen
    }

    /// Total number of recorded edges (duplicates included)
    pub fn edge_count(&self) -> usize {
        self.links.values().map(Vec::len).sum()
    }

    /// Number of outgoing links of `id`
    pub fn out_degree(&self, id: u32) -> usize {
        self.links.get(&id).map_or(0, Vec::len)
    }

    /// Destinations of `id` in insertion order
    pub fn links(&self, id: u32) -> &[u32] {
        self.links.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Label of `id`, or [`MISSING_LABEL`]
    pub fn label(&self, id: u32) -> &str {
        self.labels.get(&id).map_or(MISSING_LABEL, String::as_str)
    }

    pub(crate) fn label_opt(&self, id: u32) -> Option<&str> {
        self.labels.get(&id).map(String::as_str)
    }

    /// Ids in `[1, N]` with no outgoing links
    pub fn dangling_nodes(&self) -> Vec<u32> {
        (1..=self.node_count() as u32)
            .filter(|&id| self.out_degree(id) == 0)
            .collect()
    }

    /// Finalize and freeze into an immutable [`LinkGraph`]
    pub fn build(mut self) -> LinkGraph {
        self.finalize();
        LinkGraph::from_builder(&self)
    }
}
