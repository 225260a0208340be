//! Elevation-aware pathfinding over terrain point clouds.
//!
//! This crate turns a cloud of `(x, y, z)` samples into a searchable graph and
//! finds least-cost routes across it, where climbing is penalized relative to
//! planar travel.
//!
//! # Overview
//!
//! - **Graph** ([`ProximityGraph`]): links every point to its `k` nearest
//!   planar neighbors, collapsing duplicate points into single nodes
//! - **Costs** ([`CostModel`]): normalizes each axis to zero mean and unit
//!   variance, then weights squared elevation change by `alpha`
//! - **Search** ([`PathFinder`]): A* between the cloud points nearest to a
//!   planar start and goal
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use route_pathfind::{CostModel, PathFinder, ProximityGraph};
//! use route_types::SearchParams;
//! use terrain_spatial::PointIndex;
//! use nalgebra::{Point2, Point3};
//!
//! // A gentle slope
//! let rows: Arc<[Point3<f64>]> = (0..8)
//!     .flat_map(|i| {
//!         (0..8).map(move |j| Point3::new(f64::from(i), f64::from(j), f64::from(i) * 0.5))
//!     })
//!     .collect::<Vec<_>>()
//!     .into();
//!
//! let index = PointIndex::from_points(&rows);
//! let graph = ProximityGraph::build(Arc::clone(&rows), &index, 5).unwrap();
//! let model = CostModel::for_graph(&graph);
//!
//! let finder = PathFinder::new(&graph, &index, &model);
//! let route = finder
//!     .find_path(Point2::new(0.0, 0.0), Point2::new(7.0, 7.0), &SearchParams::default())
//!     .unwrap();
//!
//! assert!(route.is_valid());
//! assert!(route.cost().total() > 0.0);
//! ```
//!
//! # Heuristics
//!
//! The [`heuristics`] module evaluates the [`route_types::Heuristic`] variants:
//!
//! - **`EdgeBounded`**: never overestimates, so routes are cost-optimal
//! - **`SquaredPlanar`**: greedier, exact only for a single hop
//! - **Zero**: plain Dijkstra
//!
//! # Disconnected Terrain
//!
//! Regions farther apart than the neighbor reach never share an edge. A search
//! between them fails with [`route_types::RoutingError::NoPathFound`] instead
//! of returning a partial route.

#![doc(html_root_url = "https://docs.rs/route-pathfind/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod astar;
pub mod cost;
pub mod graph;
pub mod heuristics;
pub mod neighbors;

// Re-export main types for convenience
pub use astar::PathFinder;
pub use cost::{CostModel, NormalizationStats};
pub use graph::{GraphEdge, PointKey, ProximityGraph};
pub use heuristics::{GoalEstimator, compute_heuristic};
pub use neighbors::NeighborGenerator;
