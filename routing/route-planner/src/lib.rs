//! Elevation-aware route planning over terrain point clouds.
//!
//! This crate ties the routing crates together behind a single [`Planner`]:
//!
//! - `terrain-spatial` indexes the cloud for planar nearest-neighbor queries
//! - `route-pathfind` builds the proximity graph and runs A*
//! - `route-optimize` orders multiple waypoints
//!
//! # Quick Start
//!
//! ```
//! use route_planner::{Planner, PlannerConfig};
//! use nalgebra::Point3;
//!
//! // Rolling terrain on a 20 x 20 grid
//! let points: Vec<_> = (0..20)
//!     .flat_map(|i| {
//!         (0..20).map(move |j| {
//!             let (x, y) = (f64::from(i), f64::from(j));
//!             Point3::new(x, y, (x * 0.4).sin() + (y * 0.3).cos())
//!         })
//!     })
//!     .collect();
//!
//! let planner = Planner::with_config(points, PlannerConfig::default().with_alpha(500.0)).unwrap();
//!
//! // Single leg
//! let route = planner
//!     .find_path(Point3::new(0.0, 0.0, 0.0), Point3::new(19.0, 19.0, 0.0))
//!     .unwrap();
//! assert!(route.is_valid());
//!
//! // Several stops, visited in the cheapest order
//! let stops = [
//!     Point3::new(15.0, 2.0, 0.0),
//!     Point3::new(3.0, 12.0, 0.0),
//!     Point3::new(10.0, 10.0, 0.0),
//! ];
//! let tour = planner.find_full_path(Point3::new(0.0, 0.0, 0.0), &stops).unwrap();
//! assert_eq!(tour.stats().segments(), 3);
//! ```
//!
//! # Failure Modes
//!
//! Requests fail with a [`RoutingError`] rather than returning a partial route:
//!
//! - targets in a region the graph does not connect to give
//!   [`RoutingError::WaypointUnreachable`]
//! - too many targets give [`RoutingError::TooManyWaypoints`]
//! - an empty target list gives [`RoutingError::NoTargets`]
//!
//! # Feature Flags
//!
//! - `serde`: Enables serialization of routes and configuration

#![doc(html_root_url = "https://docs.rs/route-planner/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod assembler;
pub mod planner;

pub use assembler::PathAssembler;
pub use planner::Planner;

// Re-export the types callers need to drive a planner
pub use route_types::{
    Diagnostic, Heuristic, PlannerConfig, Route, RouteCost, RouteStats, RoutingError,
    SearchParams, TerrainPath, WaypointOrder,
};
pub use terrain_spatial::PlanarMetric;
