//! Path-following guidance.
//!
//! Once a route is planned, a vehicle drifting off it needs to know where to
//! rejoin and how far to turn. This module finds the route segment nearest to
//! the vehicle and the turn needed to face its far end.
//!
//! # Example
//!
//! ```
//! use route_optimize::guidance::heading_correction;
//! use nalgebra::Point3;
//!
//! let path = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(10.0, 0.0, 0.0),
//!     Point3::new(20.0, 0.0, 0.0),
//! ];
//!
//! // Just above the first point, facing along +x
//! let correction = heading_correction(&path, &Point3::new(0.0, 10.0, 0.0), 0.0).unwrap();
//! assert_eq!(correction.segment().head(), 1);
//! assert!((correction.angle_deg() - 45.0).abs() < 1e-9);
//! ```

use nalgebra::{Point3, Vector3};

/// A path segment identified by the indices of its two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentRef {
    reflection: usize,
    head: usize,
}

impl SegmentRef {
    /// Index of the segment's first point, the one nearest the vehicle unless
    /// that is the final path point.
    #[must_use]
    pub const fn reflection(&self) -> usize {
        self.reflection
    }

    /// Index of the segment's second point, which the vehicle steers toward.
    #[must_use]
    pub const fn head(&self) -> usize {
        self.head
    }
}

/// Turn and distance needed to rejoin a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingCorrection {
    angle_deg: f64,
    distance: f64,
    segment: SegmentRef,
}

impl HeadingCorrection {
    /// Unsigned turn angle in degrees, in `[0, 180]`.
    #[must_use]
    pub const fn angle_deg(&self) -> f64 {
        self.angle_deg
    }

    /// Straight-line distance from the vehicle to the segment head.
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    /// The segment being rejoined.
    #[must_use]
    pub const fn segment(&self) -> SegmentRef {
        self.segment
    }
}

/// Finds the path segment nearest to `position`.
///
/// The nearest path point starts the segment. If it is the last point, the
/// final segment is returned instead. Ties go to the earliest point.
///
/// Returns `None` for paths with fewer than two points.
#[must_use]
pub fn closest_segment(path: &[Point3<f64>], position: &Point3<f64>) -> Option<SegmentRef> {
    if path.len() < 2 {
        return None;
    }

    let (closest, _) = path
        .iter()
        .map(|p| nalgebra::distance_squared(p, position))
        .enumerate()
        .fold((0, f64::INFINITY), |best, (i, d)| {
            if d < best.1 { (i, d) } else { best }
        });

    let reflection = closest.min(path.len() - 2);
    Some(SegmentRef {
        reflection,
        head: reflection + 1,
    })
}

/// Computes the turn from `heading_deg` toward the head of the nearest
/// segment, and the distance to it.
///
/// The heading is measured in degrees counter-clockwise from the +x axis in
/// the path's frame.
///
/// Returns `None` for paths with fewer than two points, or when the vehicle
/// already sits on the segment head.
#[must_use]
pub fn heading_correction(
    path: &[Point3<f64>],
    position: &Point3<f64>,
    heading_deg: f64,
) -> Option<HeadingCorrection> {
    let segment = closest_segment(path, position)?;
    let rejoin = path[segment.head] - position;
    let distance = rejoin.norm();
    if distance <= 0.0 {
        return None;
    }

    let heading = heading_deg.to_radians();
    let facing = Vector3::new(heading.cos(), heading.sin(), 0.0);

    Some(HeadingCorrection {
        angle_deg: rejoin.angle(&facing).to_degrees(),
        distance,
        segment,
    })
}
