//! The planner facade.
//!
//! A [`Planner`] owns everything derived from one point cloud: the planar
//! index, the proximity graph, and the cost model. All of it is built once in
//! [`Planner::construct`] and never mutated, so one planner can serve queries
//! from many threads.

use std::sync::Arc;
use std::time::Instant;

use nalgebra::Point3;
use route_optimize::WaypointSequencer;
use route_pathfind::{CostModel, PathFinder, ProximityGraph};
use route_types::{Diagnostic, PlannerConfig, Route, RoutingError, SearchParams, WaypointOrder};
use terrain_spatial::PointIndex;
use tracing::{info, warn};

use crate::assembler::PathAssembler;

/// Elevation-aware route planner over a fixed point cloud.
///
/// # Example
///
/// ```
/// use route_planner::Planner;
/// use nalgebra::Point3;
///
/// // A ridge along x = 5 between two valleys
/// let points: Vec<_> = (0..11)
///     .flat_map(|i| {
///         (0..11).map(move |j| {
///             let z = if i == 5 && j > 1 { 8.0 } else { 0.0 };
///             Point3::new(f64::from(i), f64::from(j), z)
///         })
///     })
///     .collect();
///
/// let planner = Planner::construct(points).unwrap();
/// let route = planner
///     .find_path(Point3::new(0.0, 8.0, 0.0), Point3::new(10.0, 8.0, 0.0))
///     .unwrap();
///
/// // The default elevation weight routes around the ridge through the gap
/// assert!(route.is_valid());
/// assert_eq!(route.cost().elevation(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Planner {
    config: PlannerConfig,
    index: PointIndex,
    graph: ProximityGraph,
    cost_model: CostModel,
}

impl Planner {
    /// Builds a planner with [`PlannerConfig::default`].
    ///
    /// # Errors
    ///
    /// - [`RoutingError::EmptyInput`] if `points` is empty
    /// - [`RoutingError::NonFinitePoint`] if a coordinate is NaN or infinite
    pub fn construct(points: impl Into<Vec<Point3<f64>>>) -> Result<Self, RoutingError> {
        Self::with_config(points, PlannerConfig::default())
    }

    /// Builds a planner with an explicit configuration.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::InvalidConfig`] if `config` fails validation
    /// - [`RoutingError::EmptyInput`] if `points` is empty
    /// - [`RoutingError::NonFinitePoint`] if a coordinate is NaN or infinite
    pub fn with_config(
        points: impl Into<Vec<Point3<f64>>>,
        config: PlannerConfig,
    ) -> Result<Self, RoutingError> {
        let issues = config.validate();
        if !issues.is_empty() {
            return Err(RoutingError::InvalidConfig(issues.join("; ")));
        }

        let points: Vec<Point3<f64>> = points.into();
        if points.is_empty() {
            return Err(RoutingError::EmptyInput);
        }
        if let Some(row) = points
            .iter()
            .position(|p| !p.iter().all(|c| c.is_finite()))
        {
            return Err(RoutingError::NonFinitePoint { row });
        }

        let started = Instant::now();
        let rows: Arc<[Point3<f64>]> = points.into();
        let index = PointIndex::from_points(&rows);
        let graph = ProximityGraph::build(rows, &index, config.neighbor_count())?;
        let cost_model = CostModel::for_graph(&graph);

        let components = graph.component_count();
        if components > 1 {
            warn!(
                components,
                "proximity graph is disconnected, routes between components will fail"
            );
        }

        info!(
            points = index.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            components,
            elapsed_ms = started.elapsed().as_millis(),
            "planner constructed"
        );

        Ok(Self {
            config,
            index,
            graph,
            cost_model,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Returns the planar index over the input rows.
    #[must_use]
    pub const fn index(&self) -> &PointIndex {
        &self.index
    }

    /// Returns the proximity graph.
    #[must_use]
    pub const fn graph(&self) -> &ProximityGraph {
        &self.graph
    }

    /// Returns the cost model.
    #[must_use]
    pub const fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    /// Returns non-fatal conditions found while building the planner.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.cost_model.diagnostics()
    }

    /// Returns a pathfinder over this planner's graph.
    #[must_use]
    pub const fn path_finder(&self) -> PathFinder<'_> {
        PathFinder::new(&self.graph, &self.index, &self.cost_model)
    }

    /// Returns the waypoint sequencer configured for this planner.
    #[must_use]
    pub const fn sequencer(&self) -> WaypointSequencer {
        WaypointSequencer::new(self.config.metric(), self.config.max_waypoints())
    }

    /// Returns a multi-waypoint assembler configured for this planner.
    #[must_use]
    pub const fn assembler(&self) -> PathAssembler<'_> {
        PathAssembler::new(self.path_finder(), self.sequencer())
            .with_junction_dedup(self.config.junction_dedup())
    }

    /// Finds a route between two points using the configured defaults.
    ///
    /// Only the planar coordinates of `start` and `end` are used. Each snaps to
    /// the nearest cloud point.
    ///
    /// # Errors
    ///
    /// See [`PathFinder::find_path`].
    pub fn find_path(&self, start: Point3<f64>, end: Point3<f64>) -> Result<Route, RoutingError> {
        self.find_path_with_params(start, end, &self.config.search_params())
    }

    /// Finds a route with an explicit elevation weight and output size.
    ///
    /// # Errors
    ///
    /// See [`PathFinder::find_path`].
    pub fn find_path_with(
        &self,
        start: Point3<f64>,
        end: Point3<f64>,
        alpha: f64,
        max_output_points: usize,
    ) -> Result<Route, RoutingError> {
        let params = self
            .config
            .search_params()
            .with_alpha(alpha)
            .with_max_output_points(max_output_points);
        self.find_path_with_params(start, end, &params)
    }

    /// Finds a route with a full set of search parameters.
    ///
    /// # Errors
    ///
    /// See [`PathFinder::find_path`].
    pub fn find_path_with_params(
        &self,
        start: Point3<f64>,
        end: Point3<f64>,
        params: &SearchParams,
    ) -> Result<Route, RoutingError> {
        self.path_finder().find_path(start.xy(), end.xy(), params)
    }

    /// Finds a route from `start` through every target using the configured
    /// defaults.
    ///
    /// # Errors
    ///
    /// See [`PathAssembler::full_path`].
    pub fn find_full_path(
        &self,
        start: Point3<f64>,
        targets: &[Point3<f64>],
    ) -> Result<Route, RoutingError> {
        self.find_full_path_with_params(start, targets, &self.config.search_params())
    }

    /// Finds a multi-waypoint route with an explicit elevation weight and
    /// per-leg output size.
    ///
    /// # Errors
    ///
    /// See [`PathAssembler::full_path`].
    pub fn find_full_path_with(
        &self,
        start: Point3<f64>,
        targets: &[Point3<f64>],
        alpha: f64,
        max_output_points: usize,
    ) -> Result<Route, RoutingError> {
        let params = self
            .config
            .search_params()
            .with_alpha(alpha)
            .with_max_output_points(max_output_points);
        self.find_full_path_with_params(start, targets, &params)
    }

    /// Finds a multi-waypoint route with a full set of search parameters.
    ///
    /// # Errors
    ///
    /// See [`PathAssembler::full_path`].
    pub fn find_full_path_with_params(
        &self,
        start: Point3<f64>,
        targets: &[Point3<f64>],
        params: &SearchParams,
    ) -> Result<Route, RoutingError> {
        let planar: Vec<_> = targets.iter().map(|p| p.xy()).collect();
        self.assembler().full_path(start.xy(), &planar, params)
    }

    /// Chooses the visiting order of `targets` without routing the legs.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::TooManyWaypoints`] above the configured limit.
    pub fn order_waypoints(
        &self,
        start: Point3<f64>,
        targets: &[Point3<f64>],
    ) -> Result<WaypointOrder, RoutingError> {
        let planar: Vec<_> = targets.iter().map(|p| p.xy()).collect();
        self.sequencer().order(start.xy(), &planar)
    }
}
