//! Configuration types for the terrain planner.
//!
//! [`PlannerConfig`] holds construction-time settings (neighbor count) and the
//! defaults used by queries. [`SearchParams`] is the per-query parameter set
//! handed to the A* search.
//!
//! # Example
//!
//! ```
//! use route_types::{PlannerConfig, Heuristic};
//! use terrain_spatial::PlanarMetric;
//!
//! let config = PlannerConfig::default()
//!     .with_neighbor_count(8)
//!     .with_alpha(500.0)
//!     .with_metric(PlanarMetric::Haversine)
//!     .with_heuristic(Heuristic::SquaredPlanar);
//!
//! assert!(config.validate().is_empty());
//! ```

use terrain_spatial::PlanarMetric;

use crate::cost::DEFAULT_ALPHA;

/// Default number of planar neighbors linked to each point.
pub const DEFAULT_NEIGHBOR_COUNT: usize = 5;

/// Default number of points returned per route segment.
pub const DEFAULT_MAX_OUTPUT_POINTS: usize = 5;

/// Default goal-test tolerance, in input planar units.
pub const DEFAULT_GOAL_TOLERANCE: f64 = 1e-4;

/// Default upper bound on the number of waypoints ordered exhaustively.
pub const DEFAULT_MAX_WAYPOINTS: usize = 8;

/// Hard ceiling for [`PlannerConfig::with_max_waypoints`].
///
/// 10! orderings is the most a single query may enumerate.
pub const WAYPOINT_LIMIT: usize = 10;

/// Heuristic functions for the A* search.
///
/// All heuristics are evaluated in the normalized frame of the cost model.
///
/// # Example
///
/// ```
/// use route_types::Heuristic;
///
/// assert!(Heuristic::EdgeBounded.is_admissible());
/// assert!(!Heuristic::SquaredPlanar.is_admissible());
/// assert!(Heuristic::Zero.is_admissible());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    /// Lower bound built from the squared planar distance and the shortest
    /// graph edge.
    ///
    /// Never overestimates, so the returned route is cost-optimal.
    #[default]
    EdgeBounded,

    /// Squared planar distance to the goal.
    ///
    /// Exact for a single hop but can overestimate across several hops, which
    /// makes the search greedier and faster at the price of optimality.
    SquaredPlanar,

    /// Zero heuristic (Dijkstra's algorithm).
    Zero,
}

impl Heuristic {
    /// Returns `true` if the heuristic never overestimates remaining cost.
    #[must_use]
    pub const fn is_admissible(&self) -> bool {
        match self {
            Self::EdgeBounded | Self::Zero => true,
            Self::SquaredPlanar => false,
        }
    }
}

/// Configuration for the terrain planner.
///
/// Defaults:
/// - Neighbor count: 5
/// - Alpha (elevation penalty): 10 000
/// - Max output points per segment: 5
/// - Goal tolerance: 1e-4 input units
/// - Max waypoints: 8
/// - Heuristic: [`Heuristic::EdgeBounded`]
/// - Metric: [`PlanarMetric::Euclidean`]
/// - Junction dedup: off
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Neighbors queried per point while building the graph.
    neighbor_count: usize,
    /// Elevation penalty weight.
    alpha: f64,
    /// Points kept per segment after decimation.
    max_output_points: usize,
    /// Planar distance at which a node counts as the goal.
    goal_tolerance: f64,
    /// Largest target set ordered by exhaustive search.
    max_waypoints: usize,
    /// Heuristic used by A*.
    heuristic: Heuristic,
    /// Distance metric used for waypoint ordering.
    metric: PlanarMetric,
    /// Whether identical points at segment junctions are collapsed.
    junction_dedup: bool,
}

impl PlannerConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            neighbor_count: DEFAULT_NEIGHBOR_COUNT,
            alpha: DEFAULT_ALPHA,
            max_output_points: DEFAULT_MAX_OUTPUT_POINTS,
            goal_tolerance: DEFAULT_GOAL_TOLERANCE,
            max_waypoints: DEFAULT_MAX_WAYPOINTS,
            heuristic: Heuristic::EdgeBounded,
            metric: PlanarMetric::Euclidean,
            junction_dedup: false,
        }
    }

    /// Sets the number of neighbors linked to each point.
    ///
    /// Small values risk a disconnected graph; large values add many short,
    /// redundant edges.
    #[must_use]
    pub const fn with_neighbor_count(mut self, k: usize) -> Self {
        self.neighbor_count = k;
        self
    }

    /// Sets the default elevation penalty weight.
    #[must_use]
    pub const fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the default number of points kept per segment.
    #[must_use]
    pub const fn with_max_output_points(mut self, max: usize) -> Self {
        self.max_output_points = max;
        self
    }

    /// Sets the goal-test tolerance in input planar units.
    #[must_use]
    pub const fn with_goal_tolerance(mut self, tolerance: f64) -> Self {
        self.goal_tolerance = tolerance;
        self
    }

    /// Sets the largest waypoint count ordered exhaustively.
    #[must_use]
    pub const fn with_max_waypoints(mut self, max: usize) -> Self {
        self.max_waypoints = max;
        self
    }

    /// Sets the A* heuristic.
    #[must_use]
    pub const fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Sets the waypoint ordering metric.
    #[must_use]
    pub const fn with_metric(mut self, metric: PlanarMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Sets whether identical junction points between segments are collapsed.
    #[must_use]
    pub const fn with_junction_dedup(mut self, enable: bool) -> Self {
        self.junction_dedup = enable;
        self
    }

    /// Returns the neighbor count.
    #[must_use]
    pub const fn neighbor_count(&self) -> usize {
        self.neighbor_count
    }

    /// Returns the default elevation penalty weight.
    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns the default number of points per segment.
    #[must_use]
    pub const fn max_output_points(&self) -> usize {
        self.max_output_points
    }

    /// Returns the goal-test tolerance.
    #[must_use]
    pub const fn goal_tolerance(&self) -> f64 {
        self.goal_tolerance
    }

    /// Returns the waypoint bound.
    #[must_use]
    pub const fn max_waypoints(&self) -> usize {
        self.max_waypoints
    }

    /// Returns the A* heuristic.
    #[must_use]
    pub const fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    /// Returns the waypoint ordering metric.
    #[must_use]
    pub const fn metric(&self) -> PlanarMetric {
        self.metric
    }

    /// Returns whether junction points are collapsed.
    #[must_use]
    pub const fn junction_dedup(&self) -> bool {
        self.junction_dedup
    }

    /// Builds query parameters from the configured defaults.
    #[must_use]
    pub const fn search_params(&self) -> SearchParams {
        SearchParams {
            alpha: self.alpha,
            max_output_points: self.max_output_points,
            goal_tolerance: self.goal_tolerance,
            heuristic: self.heuristic,
        }
    }

    /// Validates the configuration and returns any issues.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut issues = self.search_params().validate();

        if self.neighbor_count == 0 {
            issues.push("neighbor_count must be at least 1".to_string());
        }
        if self.max_waypoints == 0 || self.max_waypoints > WAYPOINT_LIMIT {
            issues.push(format!(
                "max_waypoints must be in 1..={WAYPOINT_LIMIT}, got {}",
                self.max_waypoints
            ));
        }

        issues
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters bound to a single path query.
///
/// # Example
///
/// ```
/// use route_types::{PlannerConfig, SearchParams};
///
/// let params = PlannerConfig::default()
///     .search_params()
///     .with_alpha(0.0)
///     .with_max_output_points(20);
/// assert!(params.validate().is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchParams {
    /// Elevation penalty weight.
    pub alpha: f64,
    /// Points kept after decimation.
    pub max_output_points: usize,
    /// Goal-test tolerance in input planar units.
    pub goal_tolerance: f64,
    /// Heuristic used by A*.
    pub heuristic: Heuristic,
}

impl SearchParams {
    /// Sets the elevation penalty weight.
    #[must_use]
    pub const fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the number of points kept after decimation.
    #[must_use]
    pub const fn with_max_output_points(mut self, max: usize) -> Self {
        self.max_output_points = max;
        self
    }

    /// Sets the heuristic.
    #[must_use]
    pub const fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Validates the parameters and returns any issues.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.alpha.is_finite() || self.alpha < 0.0 {
            issues.push(format!("alpha must be finite and non-negative, got {}", self.alpha));
        }
        if self.max_output_points == 0 {
            issues.push("max_output_points must be at least 1".to_string());
        }
        if !self.goal_tolerance.is_finite() || self.goal_tolerance < 0.0 {
            issues.push(format!(
                "goal_tolerance must be finite and non-negative, got {}",
                self.goal_tolerance
            ));
        }

        issues
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        PlannerConfig::new().search_params()
    }
}
