//! Exhaustive waypoint ordering.
//!
//! Chooses the order in which to visit a small set of targets from a fixed
//! origin so that the summed leg distance is minimal. Every permutation is
//! evaluated, so the target count is capped by
//! [`WaypointSequencer::max_waypoints`].
//!
//! # Example
//!
//! ```
//! use route_optimize::WaypointSequencer;
//! use nalgebra::Point2;
//!
//! let sequencer = WaypointSequencer::default();
//! let targets = [
//!     Point2::new(3.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(2.0, 0.0),
//! ];
//!
//! let order = sequencer.order(Point2::new(0.0, 0.0), &targets).unwrap();
//! assert_eq!(order.permutation(), &[1, 2, 0]);
//! assert!((order.total_cost() - 3.0).abs() < 1e-12);
//! ```

use nalgebra::Point2;
use rayon::prelude::*;
use route_types::config::{DEFAULT_MAX_WAYPOINTS, WAYPOINT_LIMIT};
use route_types::{RoutingError, WaypointOrder};
use terrain_spatial::PlanarMetric;
use tracing::debug;

/// Orders targets by exhaustive permutation search.
///
/// Permutations are enumerated in lexicographic order of target indices, and
/// the first minimal one wins. Branches for each choice of first target run in
/// parallel, but the reduction keeps enumeration order, so the result equals a
/// sequential scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaypointSequencer {
    metric: PlanarMetric,
    max_waypoints: usize,
}

impl Default for WaypointSequencer {
    fn default() -> Self {
        Self::new(PlanarMetric::Euclidean, DEFAULT_MAX_WAYPOINTS)
    }
}

impl WaypointSequencer {
    /// Creates a sequencer.
    ///
    /// `max_waypoints` is capped at [`WAYPOINT_LIMIT`].
    #[must_use]
    pub const fn new(metric: PlanarMetric, max_waypoints: usize) -> Self {
        let max_waypoints = if max_waypoints > WAYPOINT_LIMIT {
            WAYPOINT_LIMIT
        } else {
            max_waypoints
        };
        Self {
            metric,
            max_waypoints,
        }
    }

    /// Returns the distance metric.
    #[must_use]
    pub const fn metric(&self) -> PlanarMetric {
        self.metric
    }

    /// Returns the largest accepted target count.
    #[must_use]
    pub const fn max_waypoints(&self) -> usize {
        self.max_waypoints
    }

    /// Returns the summed leg distance of visiting `targets` in `permutation`
    /// order, starting from `start`.
    #[must_use]
    pub fn sequence_cost(
        &self,
        start: Point2<f64>,
        targets: &[Point2<f64>],
        permutation: &[usize],
    ) -> f64 {
        let mut cost = 0.0;
        let mut current = start;
        for next in permutation.iter().filter_map(|&i| targets.get(i)) {
            cost += self.metric.distance(&current, next);
            current = *next;
        }
        cost
    }

    /// Finds the cheapest visiting order of `targets` starting at `start`.
    ///
    /// An empty target list yields the order `[start]` with zero cost.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::TooManyWaypoints`] if `targets` holds more than
    ///   [`WaypointSequencer::max_waypoints`] points
    /// - [`RoutingError::NonFiniteQuery`] if `start` or a target is NaN or infinite
    pub fn order(
        &self,
        start: Point2<f64>,
        targets: &[Point2<f64>],
    ) -> Result<WaypointOrder, RoutingError> {
        let count = targets.len();
        if count > self.max_waypoints {
            return Err(RoutingError::TooManyWaypoints {
                count,
                max: self.max_waypoints,
            });
        }
        RoutingError::check_query(start)?;
        for target in targets {
            RoutingError::check_query(*target)?;
        }
        if count == 0 {
            return Ok(WaypointOrder::new(start, targets, Vec::new(), 0.0));
        }

        let branches: Vec<(Vec<usize>, f64)> = (0..count)
            .into_par_iter()
            .map(|first| self.best_with_first(start, targets, first))
            .collect();

        let mut best: Option<(Vec<usize>, f64)> = None;
        for (permutation, cost) in branches {
            if best.as_ref().is_none_or(|(_, best_cost)| cost < *best_cost) {
                best = Some((permutation, cost));
            }
        }

        let (permutation, cost) = best.unwrap_or_default();
        debug!(
            targets = count,
            permutations = (1..=count).product::<usize>(),
            cost,
            "ordered waypoints"
        );

        Ok(WaypointOrder::new(start, targets, permutation, cost))
    }

    /// Scans every permutation beginning with `first`, in lexicographic order.
    fn best_with_first(
        &self,
        start: Point2<f64>,
        targets: &[Point2<f64>],
        first: usize,
    ) -> (Vec<usize>, f64) {
        let mut permutation: Vec<usize> = std::iter::once(first)
            .chain((0..targets.len()).filter(|&i| i != first))
            .collect();

        let mut best = permutation.clone();
        let mut best_cost = self.sequence_cost(start, targets, &permutation);

        while next_permutation(&mut permutation[1..]) {
            let cost = self.sequence_cost(start, targets, &permutation);
            if cost < best_cost {
                best_cost = cost;
                best.clone_from(&permutation);
            }
        }

        (best, best_cost)
    }
}

/// Advances `items` to the next permutation in lexicographic order.
///
/// Returns `false`, leaving `items` unchanged, when it is already the last one.
fn next_permutation(items: &mut [usize]) -> bool {
    let Some(pivot) = items.windows(2).rposition(|w| w[0] < w[1]) else {
        return false;
    };
    let Some(successor) = items.iter().rposition(|&v| v > items[pivot]) else {
        return false;
    };
    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}
