//! A* search over the proximity graph.
//!
//! This module resolves planar start and goal positions to graph nodes and
//! runs A* from the `pathfinding` crate with elevation-weighted edge costs.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use route_pathfind::{CostModel, PathFinder, ProximityGraph};
//! use route_types::SearchParams;
//! use terrain_spatial::PointIndex;
//! use nalgebra::{Point2, Point3};
//!
//! let rows: Arc<[Point3<f64>]> = (0..10)
//!     .flat_map(|i| (0..10).map(move |j| Point3::new(f64::from(i), f64::from(j), 0.0)))
//!     .collect::<Vec<_>>()
//!     .into();
//! let index = PointIndex::from_points(&rows);
//! let graph = ProximityGraph::build(Arc::clone(&rows), &index, 5).unwrap();
//! let model = CostModel::for_graph(&graph);
//!
//! let finder = PathFinder::new(&graph, &index, &model);
//! let route = finder
//!     .find_path(Point2::new(0.0, 0.0), Point2::new(9.0, 9.0), &SearchParams::default())
//!     .unwrap();
//!
//! assert!(route.node_count() < route.stats().raw_node_count());
//! assert_eq!(route.path().first().unwrap().xy(), Point2::new(0.0, 0.0));
//! ```

use std::time::Instant;

use nalgebra::{Point2, Point3};
use ordered_float::OrderedFloat;
use pathfinding::prelude::astar;
use route_types::{Route, RouteStats, RoutingError, SearchParams, TerrainPath};
use terrain_spatial::PointIndex;
use tracing::debug;

use crate::cost::CostModel;
use crate::graph::ProximityGraph;
use crate::heuristics::GoalEstimator;
use crate::neighbors::NeighborGenerator;

/// A* pathfinder over a [`ProximityGraph`].
///
/// Borrows the planner's read-only structures, so any number of finders can
/// search the same graph concurrently.
#[derive(Debug, Clone, Copy)]
pub struct PathFinder<'a> {
    graph: &'a ProximityGraph,
    index: &'a PointIndex,
    model: &'a CostModel,
}

impl<'a> PathFinder<'a> {
    /// Creates a pathfinder.
    ///
    /// `index` must have been built from the same rows as `graph`.
    #[must_use]
    pub const fn new(
        graph: &'a ProximityGraph,
        index: &'a PointIndex,
        model: &'a CostModel,
    ) -> Self {
        Self {
            graph,
            index,
            model,
        }
    }

    /// Maps a planar query to the graph node of its nearest cloud point.
    fn resolve(&self, query: Point2<f64>) -> Result<Option<usize>, RoutingError> {
        let row = self.index.nearest(query)?;
        Ok(self
            .graph
            .rows()
            .get(row)
            .and_then(|point| self.graph.node_index(point)))
    }

    fn node_point(&self, node: usize) -> Point3<f64> {
        self.graph.nodes()[node]
    }

    /// Runs A* between two nodes, returning the node sequence and its cost.
    ///
    /// The search stops at the first node within `goal_tolerance` of the goal
    /// node's planar position.
    fn find_segment(
        &self,
        start: usize,
        goal: usize,
        params: &SearchParams,
    ) -> Result<(Vec<usize>, f64), RoutingError> {
        let goal_xy = self.node_point(goal).xy();
        let tolerance = params.goal_tolerance;

        let generator = NeighborGenerator::new(self.graph, self.model).with_alpha(params.alpha);
        let estimator = GoalEstimator::new(self.model, goal_xy, params.heuristic, tolerance);

        let result = astar(
            &start,
            |&node| {
                generator
                    .successors(node)
                    .map(|(n, cost)| (n, OrderedFloat(cost)))
                    .collect::<Vec<_>>()
            },
            |&node| OrderedFloat(estimator.estimate(&self.graph.nodes()[node])),
            |&node| nalgebra::distance(&self.graph.nodes()[node].xy(), &goal_xy) <= tolerance,
        );

        match result {
            Some((nodes, cost)) => Ok((nodes, cost.into_inner())),
            None => Err(RoutingError::NoPathFound {
                start: self.node_point(start),
                goal: self.node_point(goal),
            }),
        }
    }

    /// Finds the least-cost route between two planar positions.
    ///
    /// Both positions snap to the nearest cloud point. The returned path is
    /// decimated with stride `max(1, n / params.max_output_points)`, while its
    /// cost covers every node of the undecimated path.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::InvalidConfig`] if `params` fail validation
    /// - [`RoutingError::NonFiniteQuery`] if `start` or `end` is NaN or infinite
    /// - [`RoutingError::Spatial`] if the cloud is empty
    /// - [`RoutingError::UnreachableStart`] or [`RoutingError::UnreachableGoal`]
    ///   if a resolved point is not a graph node
    /// - [`RoutingError::NoPathFound`] if start and goal lie in different
    ///   components
    pub fn find_path(
        &self,
        start: Point2<f64>,
        end: Point2<f64>,
        params: &SearchParams,
    ) -> Result<Route, RoutingError> {
        let started = Instant::now();
        let path = self.find_raw_path(start, end, params)?;
        let raw_len = path.len();
        let cost = self.model.route_cost(path.points(), params.alpha);
        let decimated = path.decimate(params.max_output_points);

        debug!(
            raw = raw_len,
            kept = decimated.len(),
            cost = cost.total(),
            "decimated route"
        );

        Ok(Route::new(decimated).with_cost(cost).with_stats(
            RouteStats::new("A*")
                .with_raw_node_count(raw_len)
                .with_elapsed(started.elapsed()),
        ))
    }

    /// Finds the least-cost route between two planar positions without
    /// decimating it.
    ///
    /// # Errors
    ///
    /// Same as [`PathFinder::find_path`].
    pub fn find_raw_path(
        &self,
        start: Point2<f64>,
        end: Point2<f64>,
        params: &SearchParams,
    ) -> Result<TerrainPath, RoutingError> {
        if let Some(issue) = params.validate().into_iter().next() {
            return Err(RoutingError::InvalidConfig(issue));
        }
        let start = RoutingError::check_query(start)?;
        let end = RoutingError::check_query(end)?;

        let start_node = self
            .resolve(start)?
            .ok_or(RoutingError::UnreachableStart(start))?;
        let goal_node = self
            .resolve(end)?
            .ok_or(RoutingError::UnreachableGoal(end))?;

        let (nodes, cost) = self.find_segment(start_node, goal_node, params)?;
        debug!(
            start = start_node,
            goal = goal_node,
            nodes = nodes.len(),
            cost,
            "A* search finished"
        );

        Ok(nodes.into_iter().map(|node| self.node_point(node)).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use approx::assert_relative_eq;
    use route_types::Heuristic;

    struct Fixture {
        index: PointIndex,
        graph: ProximityGraph,
        model: CostModel,
    }

    impl Fixture {
        fn new(points: Vec<Point3<f64>>, k: usize) -> Self {
            let rows: Arc<[Point3<f64>]> = points.into();
            let index = PointIndex::from_points(&rows);
            let graph = ProximityGraph::build(rows, &index, k).unwrap();
            let model = CostModel::for_graph(&graph);
            Self { index, graph, model }
        }

        fn finder(&self) -> PathFinder<'_> {
            PathFinder::new(&self.graph, &self.index, &self.model)
        }
    }

    fn grid(width: u32, height: u32, origin_x: f64) -> Vec<Point3<f64>> {
        let mut points = Vec::new();
        for i in 0..width {
            for j in 0..height {
                points.push(Point3::new(origin_x + f64::from(i), f64::from(j), 0.0));
            }
        }
        points
    }

    /// Small deterministic pseudo-random cloud.
    fn scattered(count: usize, seed: u64) -> Vec<Point3<f64>> {
        let mut state = seed;
        let mut next = move || {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            #[allow(clippy::cast_precision_loss)]
            let value = (state >> 11) as f64 / (1u64 << 53) as f64;
            value
        };
        (0..count)
            .map(|_| Point3::new(next() * 10.0, next() * 10.0, next() * 3.0))
            .collect()
    }

    /// Exact shortest-path cost between two nodes by Bellman-Ford relaxation.
    fn brute_force_cost(fixture: &Fixture, start: usize, goal: usize, alpha: f64) -> Option<f64> {
        let n = fixture.graph.node_count();
        let mut dist = vec![f64::INFINITY; n];
        dist[start] = 0.0;
        for _ in 0..n {
            for edge in fixture.graph.edges() {
                let (a, b) = edge.nodes();
                let [pa, pb] = edge.endpoints();
                let w = fixture.model.edge_cost(pa, pb, alpha);
                if dist[a] + w < dist[b] {
                    dist[b] = dist[a] + w;
                }
                if dist[b] + w < dist[a] {
                    dist[a] = dist[b] + w;
                }
            }
        }
        dist[goal].is_finite().then_some(dist[goal])
    }

    #[test]
    fn test_straight_line_on_flat_grid() {
        let fixture = Fixture::new(grid(10, 3, 0.0), 5);
        let route = fixture
            .finder()
            .find_path(
                Point2::new(0.0, 1.0),
                Point2::new(9.0, 1.0),
                &SearchParams::default().with_max_output_points(100),
            )
            .unwrap();

        assert_eq!(route.node_count(), 10);
        assert_eq!(route.stats().raw_node_count(), 10);
        assert_eq!(route.stats().algorithm(), "A*");
        for (i, point) in route.path().iter().enumerate() {
            assert_relative_eq!(point.x, i as f64);
            assert_relative_eq!(point.y, 1.0);
        }
    }

    #[test]
    fn test_start_equals_goal() {
        let fixture = Fixture::new(grid(4, 4, 0.0), 5);
        let route = fixture
            .finder()
            .find_path(
                Point2::new(2.0, 2.0),
                Point2::new(2.0, 2.0),
                &SearchParams::default(),
            )
            .unwrap();

        assert_eq!(route.path().points(), &[Point3::new(2.0, 2.0, 0.0)]);
        assert_relative_eq!(route.cost().total(), 0.0);
    }

    #[test]
    fn test_queries_snap_to_nearest_point() {
        let fixture = Fixture::new(grid(5, 5, 0.0), 5);
        let route = fixture
            .finder()
            .find_path(
                Point2::new(-3.0, 0.2),
                Point2::new(4.3, 3.9),
                &SearchParams::default().with_max_output_points(100),
            )
            .unwrap();

        assert_eq!(route.path().first().unwrap().xy(), Point2::new(0.0, 0.0));
        assert_eq!(route.path().last().unwrap().xy(), Point2::new(4.0, 4.0));
    }

    #[test]
    fn test_disconnected_clusters() {
        let mut points = grid(4, 4, 0.0);
        points.extend(grid(4, 4, 1000.0));
        let fixture = Fixture::new(points, 5);

        let result = fixture.finder().find_path(
            Point2::new(0.0, 0.0),
            Point2::new(1003.0, 3.0),
            &SearchParams::default(),
        );
        let err = result.unwrap_err();
        assert!(err.is_no_path_found());
        assert!(matches!(err, RoutingError::NoPathFound { .. }));
    }

    #[test]
    fn test_empty_cloud() {
        let fixture = Fixture::new(Vec::new(), 5);
        let result = fixture.finder().find_path(
            Point2::origin(),
            Point2::new(1.0, 1.0),
            &SearchParams::default(),
        );
        assert!(result.unwrap_err().is_empty_index());
    }

    #[test]
    fn test_non_finite_queries_rejected() {
        let fixture = Fixture::new(grid(5, 5, 0.0), 5);
        let finder = fixture.finder();
        let params = SearchParams::default();

        let err = finder
            .find_path(Point2::new(f64::NAN, 0.0), Point2::new(4.0, 4.0), &params)
            .unwrap_err();
        assert!(matches!(err, RoutingError::NonFiniteQuery(p) if p.x.is_nan()));

        // An infinite goal must not snap to an arbitrary row
        let err = finder
            .find_path(Point2::origin(), Point2::new(f64::INFINITY, 4.0), &params)
            .unwrap_err();
        assert_eq!(
            err,
            RoutingError::NonFiniteQuery(Point2::new(f64::INFINITY, 4.0))
        );

        let result =
            finder.find_raw_path(Point2::origin(), Point2::new(0.0, f64::NEG_INFINITY), &params);
        assert!(matches!(result, Err(RoutingError::NonFiniteQuery(_))));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let fixture = Fixture::new(grid(3, 3, 0.0), 5);
        let finder = fixture.finder();

        let result = finder.find_path(
            Point2::origin(),
            Point2::new(2.0, 2.0),
            &SearchParams::default().with_alpha(-1.0),
        );
        assert!(matches!(result, Err(RoutingError::InvalidConfig(_))));

        let result = finder.find_path(
            Point2::origin(),
            Point2::new(2.0, 2.0),
            &SearchParams::default().with_max_output_points(0),
        );
        assert!(matches!(result, Err(RoutingError::InvalidConfig(_))));
    }

    #[test]
    fn test_decimation_uses_uniform_stride() {
        let fixture = Fixture::new(grid(20, 1, 0.0), 3);
        let finder = fixture.finder();

        for max in [1, 2, 3, 5, 7, 20] {
            let route = finder
                .find_path(
                    Point2::new(0.0, 0.0),
                    Point2::new(19.0, 0.0),
                    &SearchParams::default().with_max_output_points(max),
                )
                .unwrap();
            let stride = route_types::decimation_stride(20, max);
            assert_eq!(route.node_count(), 20usize.div_ceil(stride));
            assert_eq!(route.path().first().unwrap().x, 0.0);
            assert_eq!(route.stats().raw_node_count(), 20);
        }
    }

    #[test]
    fn test_cost_covers_undecimated_path() {
        let fixture = Fixture::new(grid(10, 1, 0.0), 3);
        let finder = fixture.finder();
        let params = SearchParams::default();

        let full = finder
            .find_path(
                Point2::new(0.0, 0.0),
                Point2::new(9.0, 0.0),
                &params.with_max_output_points(100),
            )
            .unwrap();
        let short = finder
            .find_path(Point2::new(0.0, 0.0), Point2::new(9.0, 0.0), &params)
            .unwrap();

        assert_eq!(full.cost(), short.cost());
        assert!(short.node_count() < full.node_count());
    }

    #[test]
    fn test_high_alpha_prefers_flat_detour() {
        // A low corridor along y = 0 and y = 2, joined at both ends, with a
        // ridge along y = 1 in the middle.
        let mut points = Vec::new();
        for i in 0..11 {
            let x = f64::from(i);
            points.push(Point3::new(x, 0.0, 0.0));
            points.push(Point3::new(x, 2.0, 0.0));
            let ridge = if (3..=7).contains(&i) { 5.0 } else { 0.0 };
            points.push(Point3::new(x, 1.0, ridge));
        }
        let fixture = Fixture::new(points, 8);
        let finder = fixture.finder();

        let start = Point2::new(0.0, 1.0);
        let end = Point2::new(10.0, 1.0);

        let steep = finder
            .find_raw_path(start, end, &SearchParams::default().with_alpha(10_000.0))
            .unwrap();
        assert!(steep.iter().all(|p| p.z == 0.0));

        let flat = finder
            .find_raw_path(start, end, &SearchParams::default().with_alpha(0.0))
            .unwrap();
        assert!(flat.iter().any(|p| p.z > 0.0));
    }

    #[test]
    fn test_edge_bounded_is_optimal() {
        for seed in 1..=6 {
            let fixture = Fixture::new(scattered(10, seed), 3);
            let finder = fixture.finder();
            let rows = fixture.graph.rows();

            for (s, g) in [(0, 9), (3, 7), (5, 1)] {
                let params = SearchParams::default()
                    .with_alpha(50.0)
                    .with_heuristic(Heuristic::EdgeBounded);
                let start = fixture.graph.node_for_row(s).unwrap();
                let goal = fixture.graph.node_for_row(g).unwrap();
                let expected = brute_force_cost(&fixture, start, goal, 50.0);

                let result = finder.find_path(rows[s].xy(), rows[g].xy(), &params);
                match (result, expected) {
                    (Ok(route), Some(cost)) => {
                        assert_relative_eq!(route.cost().total(), cost, max_relative = 1e-9);
                    }
                    (Err(err), None) => assert!(err.is_no_path_found()),
                    (result, expected) => {
                        panic!("seed {seed}: {result:?} disagrees with {expected:?}")
                    }
                }
            }
        }
    }

    #[test]
    fn test_zero_heuristic_matches_edge_bounded() {
        let fixture = Fixture::new(scattered(40, 11), 5);
        let finder = fixture.finder();
        let rows = fixture.graph.rows();

        let bounded = finder.find_path(
            rows[0].xy(),
            rows[39].xy(),
            &SearchParams::default().with_heuristic(Heuristic::EdgeBounded),
        );
        let dijkstra = finder.find_path(
            rows[0].xy(),
            rows[39].xy(),
            &SearchParams::default().with_heuristic(Heuristic::Zero),
        );

        match (bounded, dijkstra) {
            (Ok(a), Ok(b)) => {
                assert_relative_eq!(a.cost().total(), b.cost().total(), max_relative = 1e-9);
            }
            (Err(a), Err(b)) => assert_eq!(a, b),
            (a, b) => panic!("{a:?} vs {b:?}"),
        }
    }

    #[test]
    fn test_squared_planar_finds_a_path() {
        let fixture = Fixture::new(grid(6, 6, 0.0), 5);
        let route = fixture
            .finder()
            .find_path(
                Point2::new(0.0, 0.0),
                Point2::new(5.0, 5.0),
                &SearchParams::default().with_heuristic(Heuristic::SquaredPlanar),
            )
            .unwrap();
        assert_eq!(route.path().last().unwrap().xy(), Point2::new(5.0, 5.0));
    }

    #[test]
    fn test_repeated_queries_identical() {
        let fixture = Fixture::new(scattered(60, 3), 5);
        let finder = fixture.finder();
        let rows = fixture.graph.rows();
        let params = SearchParams::default();

        let a = finder.find_path(rows[2].xy(), rows[50].xy(), &params);
        let b = finder.find_path(rows[2].xy(), rows[50].xy(), &params);
        assert_eq!(a, b);
    }
}
