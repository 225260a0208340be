//! Heuristic functions for the A* search.
//!
//! Every heuristic estimates the remaining cost from a point to the goal in
//! the normalized frame of a [`CostModel`]. Elevation is ignored because the
//! goal is a planar position.
//!
//! # Example
//!
//! ```
//! use route_pathfind::CostModel;
//! use route_pathfind::heuristics::compute_heuristic;
//! use route_types::Heuristic;
//! use nalgebra::{Point2, Point3};
//!
//! let points = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(2.0, 2.0, 0.0),
//! ];
//! let model = CostModel::from_points(&points);
//! let goal = Point2::new(2.0, 2.0);
//!
//! let greedy = compute_heuristic(&model, &points[0], &goal, Heuristic::SquaredPlanar, 0.0);
//! assert!((greedy - 8.0).abs() < 1e-10);
//!
//! let dijkstra = compute_heuristic(&model, &points[0], &goal, Heuristic::Zero, 0.0);
//! assert_eq!(dijkstra, 0.0);
//! ```

use nalgebra::{Point2, Point3};
use route_types::Heuristic;

use crate::cost::CostModel;

/// Computes the heuristic estimate from `point` to `goal`.
///
/// `slack` is the goal tolerance in normalized planar units. Only
/// [`Heuristic::EdgeBounded`] uses it, since it is the only heuristic that
/// guarantees a lower bound.
#[must_use]
pub fn compute_heuristic(
    model: &CostModel,
    point: &Point3<f64>,
    goal: &Point2<f64>,
    heuristic: Heuristic,
    slack: f64,
) -> f64 {
    match heuristic {
        Heuristic::EdgeBounded => model.bounded_estimate(point, goal, slack),
        Heuristic::SquaredPlanar => model.heuristic_estimate(point, goal),
        Heuristic::Zero => 0.0,
    }
}

/// Heuristic bound to one goal, as handed to the search loop.
#[derive(Debug, Clone, Copy)]
pub struct GoalEstimator<'a> {
    model: &'a CostModel,
    goal: Point2<f64>,
    heuristic: Heuristic,
    slack: f64,
}

impl<'a> GoalEstimator<'a> {
    /// Creates an estimator for `goal` with the given goal tolerance in input
    /// units.
    #[must_use]
    pub fn new(
        model: &'a CostModel,
        goal: Point2<f64>,
        heuristic: Heuristic,
        tolerance: f64,
    ) -> Self {
        Self {
            model,
            goal,
            heuristic,
            slack: model.tolerance_slack(tolerance),
        }
    }

    /// Returns the goal position.
    #[must_use]
    pub const fn goal(&self) -> &Point2<f64> {
        &self.goal
    }

    /// Estimates the remaining cost from `point`.
    #[must_use]
    pub fn estimate(&self, point: &Point3<f64>) -> f64 {
        compute_heuristic(self.model, point, &self.goal, self.heuristic, self.slack)
    }
}
