//! Multi-waypoint route assembly.
//!
//! Orders the targets, routes each consecutive leg with A*, and concatenates
//! the decimated legs into one route. Assembly is all-or-nothing: the first
//! failing leg aborts the request.

use std::time::Instant;

use nalgebra::Point2;
use route_optimize::WaypointSequencer;
use route_pathfind::PathFinder;
use route_types::{
    Route, RouteCost, RouteStats, RoutingError, SearchParams, TerrainPath, WaypointOrder,
};
use tracing::{debug, info};

/// Stitches per-leg routes into a full multi-waypoint route.
///
/// By default the shared point at each leg junction appears twice, once as
/// the end of one leg and once as the start of the next. Enable
/// [`PathAssembler::with_junction_dedup`] to keep a single copy.
#[derive(Debug, Clone, Copy)]
pub struct PathAssembler<'a> {
    finder: PathFinder<'a>,
    sequencer: WaypointSequencer,
    junction_dedup: bool,
}

impl<'a> PathAssembler<'a> {
    /// Creates an assembler that keeps junction duplicates.
    #[must_use]
    pub const fn new(finder: PathFinder<'a>, sequencer: WaypointSequencer) -> Self {
        Self {
            finder,
            sequencer,
            junction_dedup: false,
        }
    }

    /// Sets whether identical points at leg junctions are collapsed.
    #[must_use]
    pub const fn with_junction_dedup(mut self, enable: bool) -> Self {
        self.junction_dedup = enable;
        self
    }

    /// Returns `true` if junction duplicates are collapsed.
    #[must_use]
    pub const fn junction_dedup(&self) -> bool {
        self.junction_dedup
    }

    /// Plans a route from `start` through every target, in the cheapest
    /// visiting order.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::NoTargets`] if `targets` is empty
    /// - [`RoutingError::InvalidConfig`] if `params` fail validation
    /// - [`RoutingError::TooManyWaypoints`] if the sequencer refuses the targets
    /// - [`RoutingError::NonFiniteQuery`] if `start` or a target is NaN or infinite
    /// - [`RoutingError::WaypointUnreachable`] if a leg has no path
    /// - any other error from the first failing leg
    pub fn full_path(
        &self,
        start: Point2<f64>,
        targets: &[Point2<f64>],
        params: &SearchParams,
    ) -> Result<Route, RoutingError> {
        if targets.is_empty() {
            return Err(RoutingError::NoTargets);
        }
        if let Some(issue) = params.validate().into_iter().next() {
            return Err(RoutingError::InvalidConfig(issue));
        }

        let started = Instant::now();
        let order = self.sequencer.order(start, targets)?;
        debug!(
            permutation = ?order.permutation(),
            distance = order.total_cost(),
            "waypoint order chosen"
        );

        let route = self.assemble(&order, params)?;
        let stats = route.stats().clone().with_elapsed(started.elapsed());
        Ok(route.with_stats(stats))
    }

    /// Routes and concatenates the legs of an already chosen order.
    ///
    /// # Errors
    ///
    /// Same as [`PathAssembler::full_path`], minus the target-count checks.
    pub fn assemble(
        &self,
        order: &WaypointOrder,
        params: &SearchParams,
    ) -> Result<Route, RoutingError> {
        let started = Instant::now();
        let mut path = TerrainPath::empty();
        let mut cost = RouteCost::new();
        let mut raw_nodes = 0;
        let mut segments = 0;

        for (index, (from, to)) in order.legs().enumerate() {
            let leg = self
                .finder
                .find_path(from, to, params)
                .map_err(|e| match e {
                    RoutingError::NoPathFound { .. } => {
                        RoutingError::WaypointUnreachable { index, target: to }
                    }
                    other => other,
                })?;

            let (leg_path, leg_cost, leg_stats) = leg.into_parts();
            debug!(
                index,
                points = leg_path.len(),
                cost = leg_cost.total(),
                "routed leg"
            );

            path.append(&leg_path, self.junction_dedup);
            cost += leg_cost;
            raw_nodes += leg_stats.raw_node_count();
            segments += 1;
        }

        info!(
            segments,
            points = path.len(),
            cost = cost.total(),
            "assembled route"
        );

        Ok(Route::new(path).with_cost(cost).with_stats(
            RouteStats::new("A*")
                .with_raw_node_count(raw_nodes)
                .with_segments(segments)
                .with_elapsed(started.elapsed()),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;
    use route_pathfind::{CostModel, ProximityGraph};
    use terrain_spatial::PointIndex;

    struct Fixture {
        index: PointIndex,
        graph: ProximityGraph,
        model: CostModel,
    }

    impl Fixture {
        fn new(points: Vec<Point3<f64>>) -> Self {
            let rows: Arc<[Point3<f64>]> = points.into();
            let index = PointIndex::from_points(&rows);
            let graph = ProximityGraph::build(rows, &index, 5).unwrap();
            let model = CostModel::for_graph(&graph);
            Self { index, graph, model }
        }

        fn grid(size: u32) -> Self {
            Self::new(
                (0..size)
                    .flat_map(|i| {
                        (0..size).map(move |j| Point3::new(f64::from(i), f64::from(j), 0.0))
                    })
                    .collect(),
            )
        }

        fn assembler(&self) -> PathAssembler<'_> {
            PathAssembler::new(
                PathFinder::new(&self.graph, &self.index, &self.model),
                WaypointSequencer::default(),
            )
        }
    }

    #[test]
    fn test_no_targets() {
        let fixture = Fixture::grid(4);
        let err = fixture
            .assembler()
            .full_path(Point2::origin(), &[], &SearchParams::default())
            .unwrap_err();
        assert_eq!(err, RoutingError::NoTargets);
    }

    #[test]
    fn test_single_target_matches_find_path() {
        let fixture = Fixture::grid(6);
        let params = SearchParams::default();
        let assembler = fixture.assembler();

        let full = assembler
            .full_path(Point2::origin(), &[Point2::new(5.0, 5.0)], &params)
            .unwrap();
        let direct = PathFinder::new(&fixture.graph, &fixture.index, &fixture.model)
            .find_path(Point2::origin(), Point2::new(5.0, 5.0), &params)
            .unwrap();

        assert_eq!(full.path(), direct.path());
        assert_eq!(full.cost(), direct.cost());
        assert_eq!(full.stats().segments(), 1);
    }

    #[test]
    fn test_junction_duplicates_kept_by_default() {
        let fixture = Fixture::grid(6);
        let params = SearchParams::default().with_max_output_points(100);
        let targets = [Point2::new(0.0, 3.0), Point2::new(0.0, 5.0)];

        let kept = fixture
            .assembler()
            .full_path(Point2::origin(), &targets, &params)
            .unwrap();
        // Legs of 4 and 3 points, junction repeated
        assert_eq!(kept.node_count(), 7);
        assert_eq!(kept.path().points()[3], kept.path().points()[4]);

        let deduped = fixture
            .assembler()
            .with_junction_dedup(true)
            .full_path(Point2::origin(), &targets, &params)
            .unwrap();
        assert_eq!(deduped.node_count(), 6);
        assert_eq!(kept.cost(), deduped.cost());
    }

    #[test]
    fn test_cost_is_sum_of_legs() {
        let fixture = Fixture::grid(6);
        let params = SearchParams::default();
        let finder = PathFinder::new(&fixture.graph, &fixture.index, &fixture.model);

        let route = fixture
            .assembler()
            .full_path(
                Point2::origin(),
                &[Point2::new(5.0, 0.0), Point2::new(5.0, 5.0)],
                &params,
            )
            .unwrap();

        let first = finder
            .find_path(Point2::origin(), Point2::new(5.0, 0.0), &params)
            .unwrap();
        let second = finder
            .find_path(Point2::new(5.0, 0.0), Point2::new(5.0, 5.0), &params)
            .unwrap();

        assert_relative_eq!(
            route.cost().total(),
            first.cost().total() + second.cost().total()
        );
        assert_eq!(route.stats().segments(), 2);
        assert_eq!(
            route.stats().raw_node_count(),
            first.stats().raw_node_count() + second.stats().raw_node_count()
        );
    }

    #[test]
    fn test_unreachable_waypoint_reports_leg() {
        let mut points: Vec<_> = (0..4)
            .flat_map(|i| (0..4).map(move |j| Point3::new(f64::from(i), f64::from(j), 0.0)))
            .collect();
        points.extend(
            (0..4).flat_map(|i| {
                (0..4).map(move |j| Point3::new(100.0 + f64::from(i), f64::from(j), 0.0))
            }),
        );
        let fixture = Fixture::new(points);

        // The near target is visited first, the far cluster second
        let err = fixture
            .assembler()
            .full_path(
                Point2::origin(),
                &[Point2::new(103.0, 3.0), Point2::new(3.0, 3.0)],
                &SearchParams::default(),
            )
            .unwrap_err();

        assert_eq!(
            err,
            RoutingError::WaypointUnreachable {
                index: 1,
                target: Point2::new(103.0, 3.0),
            }
        );
    }

    #[test]
    fn test_too_many_waypoints() {
        let fixture = Fixture::grid(4);
        let assembler = PathAssembler::new(
            PathFinder::new(&fixture.graph, &fixture.index, &fixture.model),
            WaypointSequencer::new(terrain_spatial::PlanarMetric::Euclidean, 2),
        );
        let targets = [
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0),
            Point2::new(3.0, 3.0),
        ];

        let err = assembler
            .full_path(Point2::origin(), &targets, &SearchParams::default())
            .unwrap_err();
        assert_eq!(err, RoutingError::TooManyWaypoints { count: 3, max: 2 });
    }

    #[test]
    fn test_non_finite_target_rejected_before_routing() {
        let fixture = Fixture::grid(4);
        let err = fixture
            .assembler()
            .full_path(
                Point2::origin(),
                &[Point2::new(3.0, 3.0), Point2::new(f64::NAN, 1.0)],
                &SearchParams::default(),
            )
            .unwrap_err();
        assert!(matches!(err, RoutingError::NonFiniteQuery(p) if p.x.is_nan()));
    }

    #[test]
    fn test_invalid_params() {
        let fixture = Fixture::grid(4);
        let err = fixture
            .assembler()
            .full_path(
                Point2::origin(),
                &[Point2::new(3.0, 3.0)],
                &SearchParams::default().with_max_output_points(0),
            )
            .unwrap_err();
        assert!(matches!(err, RoutingError::InvalidConfig(_)));
    }
}
