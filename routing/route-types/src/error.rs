//! Error types for routing operations.
//!
//! This module defines the [`RoutingError`] enum which represents all possible
//! errors that can occur while building a planner, searching for a path, or
//! sequencing waypoints.

use nalgebra::{Point2, Point3};
use terrain_spatial::SpatialError;

/// Errors that can occur during routing operations.
///
/// Every failure is surfaced as a distinct variant; a planner never returns an
/// empty or partial route in place of an error.
///
/// # Example
///
/// ```
/// use route_types::RoutingError;
/// use nalgebra::Point3;
///
/// let error = RoutingError::NoPathFound {
///     start: Point3::new(0.0, 0.0, 0.0),
///     goal: Point3::new(10.0, 10.0, 2.0),
/// };
///
/// assert!(error.to_string().contains("no path found"));
/// assert!(error.is_no_path_found());
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum RoutingError {
    /// The planner was constructed from an empty point set.
    #[error("no points supplied to the planner")]
    EmptyInput,

    /// An input row contains a NaN or infinite coordinate.
    #[error("point at row {row} has a non-finite coordinate")]
    NonFinitePoint {
        /// The offending input row (0-based).
        row: usize,
    },

    /// A start, goal, or target position has a NaN or infinite coordinate.
    #[error("query position {0:?} has a non-finite coordinate")]
    NonFiniteQuery(Point2<f64>),

    /// A spatial index query failed.
    #[error(transparent)]
    Spatial(#[from] SpatialError),

    /// The point nearest to the requested start is not a graph node.
    ///
    /// Indicates the spatial index and the graph disagree about the point set.
    #[error("start {0:?} does not resolve to a graph node")]
    UnreachableStart(Point2<f64>),

    /// The point nearest to the requested goal is not a graph node.
    #[error("goal {0:?} does not resolve to a graph node")]
    UnreachableGoal(Point2<f64>),

    /// The search exhausted its frontier without reaching the goal.
    ///
    /// Start and goal lie in disconnected components of the proximity graph.
    #[error("no path found from {start:?} to {goal:?}")]
    NoPathFound {
        /// The resolved start point.
        start: Point3<f64>,
        /// The resolved goal point.
        goal: Point3<f64>,
    },

    /// A waypoint of a multi-target route could not be reached.
    #[error("waypoint {index} at {target:?} is unreachable")]
    WaypointUnreachable {
        /// Index of the failing segment in visiting order (0-based).
        index: usize,
        /// The planar target of the failing segment.
        target: Point2<f64>,
    },

    /// Waypoint sequencing was asked to order more targets than allowed.
    ///
    /// Exhaustive ordering is factorial in the number of targets.
    #[error("{count} waypoints exceed the sequencing limit of {max}")]
    TooManyWaypoints {
        /// Number of targets supplied.
        count: usize,
        /// Configured upper bound.
        max: usize,
    },

    /// A multi-target route was requested with no targets.
    #[error("no target waypoints supplied")]
    NoTargets,

    /// An invalid configuration parameter was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RoutingError {
    /// Creates an invalid configuration error with the given message.
    ///
    /// # Example
    ///
    /// ```
    /// use route_types::RoutingError;
    ///
    /// let error = RoutingError::invalid_config("max_output_points must be positive");
    /// assert!(error.to_string().contains("max_output_points"));
    /// ```
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Returns `true` if the error means the goal lies in another graph component.
    ///
    /// Matches both single-segment [`RoutingError::NoPathFound`] and
    /// multi-segment [`RoutingError::WaypointUnreachable`] failures.
    #[must_use]
    pub const fn is_no_path_found(&self) -> bool {
        matches!(
            self,
            Self::NoPathFound { .. } | Self::WaypointUnreachable { .. }
        )
    }

    /// Returns an error if `position` has a NaN or infinite coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::NonFiniteQuery`] carrying `position`.
    pub fn check_query(position: Point2<f64>) -> Result<Point2<f64>, Self> {
        if position.iter().all(|c| c.is_finite()) {
            Ok(position)
        } else {
            Err(Self::NonFiniteQuery(position))
        }
    }

    /// Returns `true` if the error came from querying an empty spatial index.
    #[must_use]
    pub const fn is_empty_index(&self) -> bool {
        matches!(self, Self::Spatial(SpatialError::EmptyIndex))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_no_path_found_display() {
        let error = RoutingError::NoPathFound {
            start: Point3::new(0.0, 0.0, 0.0),
            goal: Point3::new(10.0, 10.0, 1.0),
        };
        let msg = error.to_string();
        assert!(msg.contains("no path found"));
        assert!(msg.contains("10.0"));
    }

    #[test]
    fn test_unreachable_display() {
        let start = RoutingError::UnreachableStart(Point2::new(1.0, 2.0));
        assert!(start.to_string().contains("start"));
        assert!(start.to_string().contains("graph node"));

        let goal = RoutingError::UnreachableGoal(Point2::new(1.0, 2.0));
        assert!(goal.to_string().contains("goal"));
    }

    #[test]
    fn test_waypoint_unreachable_display() {
        let error = RoutingError::WaypointUnreachable {
            index: 2,
            target: Point2::new(3.0, 3.0),
        };
        let msg = error.to_string();
        assert!(msg.contains("waypoint 2"));
        assert!(msg.contains("unreachable"));
    }

    #[test]
    fn test_too_many_waypoints_display() {
        let error = RoutingError::TooManyWaypoints { count: 12, max: 8 };
        let msg = error.to_string();
        assert!(msg.contains("12"));
        assert!(msg.contains('8'));
    }

    #[test]
    fn test_spatial_error_is_transparent() {
        let error: RoutingError = SpatialError::EmptyIndex.into();
        assert_eq!(error.to_string(), "spatial index is empty");
        assert!(error.is_empty_index());
        assert!(!error.is_no_path_found());
    }

    #[test]
    fn test_is_no_path_found() {
        let no_path = RoutingError::NoPathFound {
            start: Point3::origin(),
            goal: Point3::new(5.0, 5.0, 5.0),
        };
        assert!(no_path.is_no_path_found());

        let waypoint = RoutingError::WaypointUnreachable {
            index: 0,
            target: Point2::origin(),
        };
        assert!(waypoint.is_no_path_found());

        assert!(!RoutingError::EmptyInput.is_no_path_found());
        assert!(!RoutingError::NoTargets.is_no_path_found());
    }

    #[test]
    fn test_invalid_config_helper() {
        let error = RoutingError::invalid_config("test config error");
        assert!(matches!(error, RoutingError::InvalidConfig(ref msg) if msg == "test config error"));
        assert!(error.to_string().contains("invalid configuration"));
    }

    #[test]
    fn test_check_query() {
        let ok = Point2::new(1.0, -2.0);
        assert_eq!(RoutingError::check_query(ok).unwrap(), ok);

        let err = RoutingError::check_query(Point2::new(f64::INFINITY, 0.0)).unwrap_err();
        assert!(matches!(err, RoutingError::NonFiniteQuery(p) if p.x.is_infinite()));
        assert!(err.to_string().contains("non-finite"));

        assert!(RoutingError::check_query(Point2::new(0.0, f64::NAN)).is_err());
    }

    #[test]
    fn test_non_finite_display() {
        let error = RoutingError::NonFinitePoint { row: 7 };
        assert!(error.to_string().contains("row 7"));
    }
}
