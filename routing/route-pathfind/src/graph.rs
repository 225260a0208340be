//! Proximity graph over a terrain point cloud.
//!
//! Every input row is linked to its `k` nearest planar neighbors. Rows with
//! bit-identical coordinates collapse into a single node, and each edge keeps
//! the literal pair of endpoint points so its cost can be recomputed under any
//! normalization or elevation weight.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use route_pathfind::ProximityGraph;
//! use terrain_spatial::PointIndex;
//! use nalgebra::Point3;
//!
//! let rows: Arc<[Point3<f64>]> = vec![
//!     Point3::new(0.0, 0.0, 1.0),
//!     Point3::new(1.0, 0.0, 1.0),
//!     Point3::new(1.0, 0.0, 1.0), // duplicate row
//!     Point3::new(2.0, 0.0, 2.0),
//! ]
//! .into();
//! let index = PointIndex::from_points(&rows);
//!
//! let graph = ProximityGraph::build(Arc::clone(&rows), &index, 2).unwrap();
//! assert_eq!(graph.node_count(), 3);
//! assert_eq!(graph.edge_count(), 2);
//! assert_eq!(graph.component_count(), 1);
//! ```

use std::sync::Arc;

use hashbrown::{HashMap, HashSet};
use nalgebra::Point3;
use pathfinding::prelude::connected_components;
use route_types::RoutingError;
use terrain_spatial::PointIndex;
use tracing::info;

/// Bit-exact identity of a point, used for deduplication.
///
/// Two points share a key only when all three coordinates are bit-identical,
/// with `-0.0` treated as `0.0`. Input is expected to be quantized upstream;
/// points differing in the last bit stay distinct nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointKey([u64; 3]);

impl PointKey {
    /// Computes the key of `point`.
    #[must_use]
    pub fn new(point: &Point3<f64>) -> Self {
        // Adding +0.0 folds -0.0 into +0.0
        Self([
            (point.x + 0.0).to_bits(),
            (point.y + 0.0).to_bits(),
            (point.z + 0.0).to_bits(),
        ])
    }
}

/// An undirected edge carrying both endpoint points.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    nodes: (usize, usize),
    endpoints: [Point3<f64>; 2],
}

impl GraphEdge {
    /// Returns the node indices of the two endpoints.
    #[must_use]
    pub const fn nodes(&self) -> (usize, usize) {
        self.nodes
    }

    /// Returns the endpoint points, in the same order as [`GraphEdge::nodes`].
    #[must_use]
    pub const fn endpoints(&self) -> &[Point3<f64>; 2] {
        &self.endpoints
    }

    /// Returns the endpoint opposite `node`, or `None` if `node` is not on this edge.
    #[must_use]
    pub const fn other(&self, node: usize) -> Option<usize> {
        if self.nodes.0 == node {
            Some(self.nodes.1)
        } else if self.nodes.1 == node {
            Some(self.nodes.0)
        } else {
            None
        }
    }
}

/// Undirected k-nearest-neighbor graph over distinct cloud points.
///
/// Read-only once built. Node order is first-encounter order over the input
/// rows, and adjacency lists keep insertion order, so traversal is
/// deterministic for a given input.
#[derive(Debug, Clone)]
pub struct ProximityGraph {
    rows: Arc<[Point3<f64>]>,
    nodes: Vec<Point3<f64>>,
    lookup: HashMap<PointKey, usize>,
    node_of_row: Vec<Option<usize>>,
    adjacency: Vec<Vec<(usize, usize)>>,
    edges: Vec<GraphEdge>,
    neighbor_count: usize,
}

impl ProximityGraph {
    /// Builds the graph by linking every row to its `k` nearest planar neighbors.
    ///
    /// `index` must have been built from `rows`, so that index entry `i`
    /// refers to `rows[i]`. An empty `rows` yields an empty graph.
    ///
    /// Neighbors are counted in rows, not distinct points. Duplicate rows
    /// fill `k` slots of every nearby query, so a point repeated `k` or more
    /// times can end up with no edge to any other point. Deduplicate heavily
    /// repeated clouds before building.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::InvalidConfig`] if `k` is zero or `index` does not
    ///   cover `rows`
    /// - [`RoutingError::Spatial`] if a neighbor query fails
    pub fn build(
        rows: Arc<[Point3<f64>]>,
        index: &PointIndex,
        k: usize,
    ) -> Result<Self, RoutingError> {
        if k == 0 {
            return Err(RoutingError::invalid_config("neighbor count must be at least 1"));
        }
        if index.len() != rows.len() {
            return Err(RoutingError::invalid_config(format!(
                "spatial index holds {} points but {} rows were supplied",
                index.len(),
                rows.len()
            )));
        }

        let mut graph = Self {
            node_of_row: vec![None; rows.len()],
            rows,
            nodes: Vec::new(),
            lookup: HashMap::new(),
            adjacency: Vec::new(),
            edges: Vec::new(),
            neighbor_count: k,
        };

        let mut linked: HashSet<(usize, usize)> = HashSet::new();
        for row in 0..graph.rows.len() {
            let point = graph.rows[row];
            let node = graph.register(row);

            for neighbor_row in index.k_nearest(point.xy(), k)? {
                let neighbor = graph.register(neighbor_row);
                if neighbor == node {
                    continue;
                }

                let pair = (node.min(neighbor), node.max(neighbor));
                if linked.insert(pair) {
                    graph.add_edge(node, neighbor);
                }
            }
        }

        info!(
            rows = graph.rows.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            duplicates = graph.duplicate_rows(),
            k,
            "built proximity graph"
        );

        Ok(graph)
    }

    /// Returns the node for `row`, creating it on first encounter.
    fn register(&mut self, row: usize) -> usize {
        if let Some(node) = self.node_of_row[row] {
            return node;
        }

        let point = self.rows[row];
        let node = *self.lookup.entry(PointKey::new(&point)).or_insert_with(|| {
            self.nodes.push(point);
            self.adjacency.push(Vec::new());
            self.nodes.len() - 1
        });
        self.node_of_row[row] = Some(node);
        node
    }

    fn add_edge(&mut self, a: usize, b: usize) {
        let id = self.edges.len();
        self.edges.push(GraphEdge {
            nodes: (a, b),
            endpoints: [self.nodes[a], self.nodes[b]],
        });
        self.adjacency[a].push((b, id));
        self.adjacency[b].push((a, id));
    }

    /// Returns the input rows the graph was built from.
    #[must_use]
    pub fn rows(&self) -> &[Point3<f64>] {
        &self.rows
    }

    /// Returns the number of distinct nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of input rows that collapsed into an existing node.
    #[must_use]
    pub fn duplicate_rows(&self) -> usize {
        self.rows.len() - self.nodes.len()
    }

    /// Returns the neighbor count the graph was built with.
    #[must_use]
    pub const fn neighbor_count(&self) -> usize {
        self.neighbor_count
    }

    /// Returns all nodes, indexed by node id.
    #[must_use]
    pub fn nodes(&self) -> &[Point3<f64>] {
        &self.nodes
    }

    /// Returns the point of node `node`.
    #[must_use]
    pub fn node(&self, node: usize) -> Option<&Point3<f64>> {
        self.nodes.get(node)
    }

    /// Returns the node holding exactly `point`, if any.
    #[must_use]
    pub fn node_index(&self, point: &Point3<f64>) -> Option<usize> {
        self.lookup.get(&PointKey::new(point)).copied()
    }

    /// Returns the node that input row `row` collapsed into.
    #[must_use]
    pub fn node_for_row(&self, row: usize) -> Option<usize> {
        self.node_of_row.get(row).copied().flatten()
    }

    /// Returns all edges.
    #[must_use]
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Iterates the neighbors of `node` with the connecting edge.
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, &GraphEdge)> + '_ {
        self.adjacency
            .get(node)
            .into_iter()
            .flatten()
            .map(|&(neighbor, edge)| (neighbor, &self.edges[edge]))
    }

    /// Returns the degree of `node`.
    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        self.adjacency.get(node).map_or(0, Vec::len)
    }

    /// Counts connected components.
    ///
    /// Regions of the cloud farther apart than the neighbor reach end up in
    /// separate components, and no route exists between them.
    #[must_use]
    pub fn component_count(&self) -> usize {
        let starts: Vec<usize> = (0..self.node_count()).collect();
        connected_components(&starts, |&node| {
            self.adjacency[node]
                .iter()
                .map(|&(neighbor, _)| neighbor)
                .collect::<Vec<_>>()
        })
        .len()
    }
}
