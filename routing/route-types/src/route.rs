//! Route types combining paths with metadata.
//!
//! This module defines the [`Route`] type which represents a complete
//! routing solution: the (possibly decimated) path, the cost of the full
//! undecimated path, and statistics about the search.
//!
//! # Example
//!
//! ```
//! use route_types::{Route, RouteCost, RouteStats, TerrainPath};
//! use nalgebra::Point3;
//!
//! let path = TerrainPath::new(vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//! ]);
//!
//! let route = Route::new(path)
//!     .with_cost(RouteCost::new().with_planar(1.0))
//!     .with_stats(RouteStats::new("A*").with_raw_node_count(2));
//!
//! assert!(route.is_valid());
//! assert_eq!(route.stats().algorithm(), "A*");
//! ```

use std::time::Duration;

use crate::cost::RouteCost;
use crate::path::TerrainPath;

/// Statistics about the routing process.
///
/// # Example
///
/// ```
/// use route_types::RouteStats;
/// use std::time::Duration;
///
/// let stats = RouteStats::new("A*")
///     .with_raw_node_count(42)
///     .with_segments(3)
///     .with_elapsed(Duration::from_millis(5));
/// assert_eq!(stats.raw_node_count(), 42);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteStats {
    /// Number of graph nodes on the path before decimation.
    raw_node_count: usize,
    /// Number of point-to-point segments the route was assembled from.
    segments: usize,
    /// Time taken for pathfinding.
    time_elapsed: Duration,
    /// Name of the algorithm used.
    algorithm: String,
}

impl RouteStats {
    /// Creates new route statistics with the given algorithm name.
    ///
    /// The segment count starts at one.
    #[must_use]
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            raw_node_count: 0,
            segments: 1,
            time_elapsed: Duration::ZERO,
            algorithm: algorithm.into(),
        }
    }

    /// Sets the number of nodes on the undecimated path.
    #[must_use]
    pub const fn with_raw_node_count(mut self, count: usize) -> Self {
        self.raw_node_count = count;
        self
    }

    /// Sets the number of assembled segments.
    #[must_use]
    pub const fn with_segments(mut self, segments: usize) -> Self {
        self.segments = segments;
        self
    }

    /// Sets the time elapsed.
    #[must_use]
    pub const fn with_elapsed(mut self, duration: Duration) -> Self {
        self.time_elapsed = duration;
        self
    }

    /// Returns the number of nodes on the undecimated path.
    #[must_use]
    pub const fn raw_node_count(&self) -> usize {
        self.raw_node_count
    }

    /// Returns the number of assembled segments.
    #[must_use]
    pub const fn segments(&self) -> usize {
        self.segments
    }

    /// Returns the time taken for pathfinding.
    #[must_use]
    pub const fn time_elapsed(&self) -> Duration {
        self.time_elapsed
    }

    /// Returns the name of the algorithm used.
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }
}

/// A complete route solution with metadata.
///
/// Two routes compare equal when their paths, costs, and node counts match;
/// timing is ignored so repeated queries can be compared directly.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// The path geometry, possibly decimated.
    path: TerrainPath,
    /// Cost of the full path before decimation.
    cost: RouteCost,
    /// Statistics about the routing process.
    stats: RouteStats,
}

impl Route {
    /// Creates a new route from a path.
    ///
    /// Cost and stats are initialized to defaults.
    #[must_use]
    pub fn new(path: TerrainPath) -> Self {
        Self {
            path,
            cost: RouteCost::new(),
            stats: RouteStats::default(),
        }
    }

    /// Sets the cost breakdown.
    #[must_use]
    pub const fn with_cost(mut self, cost: RouteCost) -> Self {
        self.cost = cost;
        self
    }

    /// Sets the route statistics.
    #[must_use]
    pub fn with_stats(mut self, stats: RouteStats) -> Self {
        self.stats = stats;
        self
    }

    /// Returns the path.
    #[must_use]
    pub const fn path(&self) -> &TerrainPath {
        &self.path
    }

    /// Returns the cost breakdown.
    #[must_use]
    pub const fn cost(&self) -> &RouteCost {
        &self.cost
    }

    /// Returns the route statistics.
    #[must_use]
    pub const fn stats(&self) -> &RouteStats {
        &self.stats
    }

    /// Returns the number of points in the path.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.path.len()
    }

    /// Returns `true` if the route has at least one point.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.path.is_empty()
    }

    /// Consumes the route and returns the path.
    #[must_use]
    pub fn into_path(self) -> TerrainPath {
        self.path
    }

    /// Consumes the route and returns its components.
    #[must_use]
    pub fn into_parts(self) -> (TerrainPath, RouteCost, RouteStats) {
        (self.path, self.cost, self.stats)
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
            && self.cost == other.cost
            && self.stats.raw_node_count == other.stats.raw_node_count
            && self.stats.segments == other.stats.segments
            && self.stats.algorithm == other.stats.algorithm
    }
}
