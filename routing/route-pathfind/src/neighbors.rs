//! Successor generation for graph search.
//!
//! Costs are recomputed from the endpoint points stored on each edge, so one
//! graph serves queries with any elevation weight.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use route_pathfind::{CostModel, ProximityGraph};
//! use route_pathfind::neighbors::NeighborGenerator;
//! use terrain_spatial::PointIndex;
//! use nalgebra::Point3;
//!
//! let rows: Arc<[Point3<f64>]> = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(2.0, 0.0, 1.0),
//! ]
//! .into();
//! let index = PointIndex::from_points(&rows);
//! let graph = ProximityGraph::build(Arc::clone(&rows), &index, 2).unwrap();
//! let model = CostModel::for_graph(&graph);
//!
//! let generator = NeighborGenerator::new(&graph, &model).with_alpha(100.0);
//! let successors: Vec<_> = generator.successors(1).collect();
//! assert_eq!(successors.len(), 2);
//! ```

use route_types::DEFAULT_ALPHA;

use crate::cost::CostModel;
use crate::graph::ProximityGraph;

/// Generator of weighted successors over a [`ProximityGraph`].
#[derive(Debug, Clone, Copy)]
pub struct NeighborGenerator<'a> {
    /// The graph being searched.
    graph: &'a ProximityGraph,
    /// Normalization and cost evaluation.
    model: &'a CostModel,
    /// Elevation penalty weight.
    alpha: f64,
}

impl<'a> NeighborGenerator<'a> {
    /// Creates a generator using [`DEFAULT_ALPHA`].
    #[must_use]
    pub const fn new(graph: &'a ProximityGraph, model: &'a CostModel) -> Self {
        Self {
            graph,
            model,
            alpha: DEFAULT_ALPHA,
        }
    }

    /// Sets the elevation penalty weight.
    #[must_use]
    pub const fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Returns the elevation penalty weight.
    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns the neighbors of `node` without costs.
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + 'a {
        self.graph.neighbors(node).map(|(neighbor, _)| neighbor)
    }

    /// Returns the neighbors of `node` with the cost of moving to each.
    ///
    /// Yields nothing for a node outside the graph.
    pub fn successors(&self, node: usize) -> impl Iterator<Item = (usize, f64)> + 'a {
        let model = self.model;
        let alpha = self.alpha;
        self.graph.neighbors(node).map(move |(neighbor, edge)| {
            let [a, b] = edge.endpoints();
            (neighbor, model.edge_cost(a, b, alpha))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;
    use terrain_spatial::PointIndex;

    fn setup() -> (ProximityGraph, CostModel) {
        let rows: Arc<[Point3<f64>]> = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 2.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 2.0),
        ]
        .into();
        let index = PointIndex::from_points(&rows);
        let graph = ProximityGraph::build(Arc::clone(&rows), &index, 2).unwrap();
        let model = CostModel::for_graph(&graph);
        (graph, model)
    }

    #[test]
    fn test_default_alpha() {
        let (graph, model) = setup();
        let generator = NeighborGenerator::new(&graph, &model);
        assert_relative_eq!(generator.alpha(), DEFAULT_ALPHA);
    }

    #[test]
    fn test_successor_costs_match_model() {
        let (graph, model) = setup();
        let generator = NeighborGenerator::new(&graph, &model).with_alpha(3.0);

        for node in 0..graph.node_count() {
            for (neighbor, cost) in generator.successors(node) {
                let from = graph.node(node).unwrap();
                let to = graph.node(neighbor).unwrap();
                assert_relative_eq!(cost, model.edge_cost(from, to, 3.0));
                assert!(cost >= 0.0);
            }
        }
    }

    #[test]
    fn test_alpha_scales_climbing_edges() {
        let (graph, model) = setup();
        let flat = NeighborGenerator::new(&graph, &model).with_alpha(0.0);
        let steep = NeighborGenerator::new(&graph, &model).with_alpha(1_000.0);

        let flat_cost: f64 = flat.successors(0).map(|(_, c)| c).sum();
        let steep_cost: f64 = steep.successors(0).map(|(_, c)| c).sum();
        assert!(steep_cost > flat_cost);
    }

    #[test]
    fn test_neighbors_match_successors() {
        let (graph, model) = setup();
        let generator = NeighborGenerator::new(&graph, &model);
        let plain: Vec<_> = generator.neighbors(1).collect();
        let weighted: Vec<_> = generator.successors(1).map(|(n, _)| n).collect();
        assert_eq!(plain, weighted);
        assert!(!plain.is_empty());
    }

    #[test]
    fn test_unknown_node_has_no_successors() {
        let (graph, model) = setup();
        let generator = NeighborGenerator::new(&graph, &model);
        assert_eq!(generator.successors(42).count(), 0);
    }
}
