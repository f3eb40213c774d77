//! Compressed Sparse Row (CSR) link graph
//!
//! Node ids are dense in `[1, N]`, so adjacency lives in one contiguous
//! destination array indexed by per-node row ranges. This is what the power
//! iteration walks on every step.

use super::builder::{GraphBuilder, MISSING_LABEL};

/// An immutable directed graph in Compressed Sparse Row format
///
/// Node `id` (1-based) owns `col_idx[row_ptr[id - 1]..row_ptr[id]]`.
#[derive(Debug, Clone)]
pub struct LinkGraph {
    /// Number of nodes `N`
    pub num_nodes: usize,
    /// Row pointers, length `N + 1`
    pub row_ptr: Vec<usize>,
    /// Destination ids (1-based) for each edge
    pub col_idx: Vec<u32>,
    /// Out-degree for each node, indexed by `id - 1`
    pub out_degree: Vec<u32>,
    /// Optional labels, indexed by `id - 1`
    pub labels: Vec<Option<String>>,
}

impl LinkGraph {
    /// Convert a GraphBuilder into CSR format
    ///
    /// The id range is the builder's node count; call [`GraphBuilder::finalize`]
    /// (or use [`GraphBuilder::build`]) first so the range covers every id seen.
    pub fn from_builder(builder: &GraphBuilder) -> Self {
        let num_nodes = builder.node_count();
        let mut row_ptr = Vec::with_capacity(num_nodes + 1);
        let mut col_idx = Vec::with_capacity(builder.edge_count());
        let mut out_degree = Vec::with_capacity(num_nodes);
        let mut labels = Vec::with_capacity(num_nodes);

        row_ptr.push(0);

        for id in 1..=num_nodes as u32 {
            let links = builder.links(id);
            out_degree.push(links.len() as u32);
            col_idx.extend_from_slice(links);
            row_ptr.push(col_idx.len());
            labels.push(builder.label_opt(id).map(str::to_owned));
        }

        Self {
            num_nodes,
            row_ptr,
            col_idx,
            out_degree,
            labels,
        }
    }

    /// Build a graph from a 1-based edge list, with `N` taken from the largest id
    pub fn from_edges(edges: &[(u32, u32)]) -> Self {
        let mut builder = GraphBuilder::with_capacity(edges.len());
        for &(src, dst) in edges {
            builder.add_edge(src, dst);
        }
        builder.build()
    }

    fn index(&self, id: u32) -> Option<usize> {
        let idx = (id as usize).checked_sub(1)?;
        (idx < self.num_nodes).then_some(idx)
    }

    /// Destinations of a node, in insertion order
    pub fn neighbors(&self, id: u32) -> &[u32] {
        match self.index(id) {
            Some(i) => &self.col_idx[self.row_ptr[i]..self.row_ptr[i + 1]],
            None => &[],
        }
    }

    /// Get the out-degree of a node (0 for ids outside `[1, N]`)
    pub fn degree(&self, id: u32) -> u32 {
        self.index(id).map_or(0, |i| self.out_degree[i])
    }

    /// Get the label of a node, or a placeholder if it has none
    pub fn label(&self, id: u32) -> &str {
        self.index(id)
            .and_then(|i| self.labels[i].as_deref())
            .unwrap_or(MISSING_LABEL)
    }

    /// Iterate over all node ids
    pub fn node_ids(&self) -> impl Iterator<Item = u32> {
        1..=self.num_nodes as u32
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Get the total number of edges
    pub fn num_edges(&self) -> usize {
        self.col_idx.len()
    }

    /// Find dangling nodes (nodes with no outgoing links)
    pub fn dangling_nodes(&self) -> Vec<u32> {
        self.node_ids()
            .filter(|&id| self.out_degree[id as usize - 1] == 0)
            .collect()
    }
}

impl Default for LinkGraph {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            row_ptr: vec![0],
            col_idx: Vec::new(),
            out_degree: Vec::new(),
            labels: Vec::new(),
        }
    }
}
