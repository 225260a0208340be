//! Waypoint sequencing and path-following guidance for terrain routes.
//!
//! This crate works on top of planned routes rather than the point cloud:
//!
//! - **Waypoint sequencing** ([`sequence`]): choose the visiting order of a
//!   small set of targets that minimizes total travel distance
//! - **Guidance** ([`guidance`]): find the nearest route segment to a vehicle
//!   and the turn needed to rejoin it
//!
//! # Quick Start
//!
//! ```
//! use route_optimize::{WaypointSequencer, guidance::heading_correction};
//! use terrain_spatial::PlanarMetric;
//! use nalgebra::{Point2, Point3};
//!
//! // Order three stops
//! let sequencer = WaypointSequencer::new(PlanarMetric::Euclidean, 8);
//! let targets = [Point2::new(9.0, 0.0), Point2::new(3.0, 0.0), Point2::new(6.0, 0.0)];
//! let order = sequencer.order(Point2::origin(), &targets).unwrap();
//! assert_eq!(order.permutation(), &[1, 2, 0]);
//!
//! // Steer back onto a route
//! let route = [Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 0.0, 0.0)];
//! let correction = heading_correction(&route, &Point3::new(0.0, 1.0, 0.0), 90.0).unwrap();
//! assert!(correction.angle_deg() > 90.0);
//! ```
//!
//! # Limits
//!
//! Sequencing is exhaustive and factorial in the target count, so
//! [`WaypointSequencer`] refuses more than
//! [`route_types::config::WAYPOINT_LIMIT`] targets with
//! [`route_types::RoutingError::TooManyWaypoints`].

#![doc(html_root_url = "https://docs.rs/route-optimize/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod guidance;
pub mod sequence;

// Re-export main types for convenience
pub use guidance::{HeadingCorrection, SegmentRef, closest_segment, heading_correction};
pub use sequence::WaypointSequencer;
