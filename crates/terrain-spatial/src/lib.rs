//! Planar spatial indexing for terrain point clouds.
//!
//! This crate provides the spatial foundations used by the routing crates:
//!
//! - [`PointIndex`] - Nearest and k-nearest queries over the planar `(x, y)`
//!   projection of a point cloud
//! - [`PlanarMetric`] - Distance between planar positions, either Euclidean or
//!   great-circle for geodetic coordinates
//! - [`SpatialError`] - Failures of index queries
//!
//! # Coordinate Systems
//!
//! Points are `nalgebra::Point3<f64>` where `x` and `y` are horizontal coordinates
//! and `z` is elevation. The units of `x`/`y` are opaque to the index: it only ever
//! looks at the planar projection, so projected metres and geodetic degrees both
//! work. Elevation never takes part in neighbor queries.
//!
//! # Example
//!
//! ```
//! use terrain_spatial::PointIndex;
//! use nalgebra::{Point2, Point3};
//!
//! let cloud = vec![
//!     Point3::new(0.0, 0.0, 10.0),
//!     Point3::new(1.0, 0.0, 11.0),
//!     Point3::new(5.0, 5.0, 30.0),
//! ];
//! let index = PointIndex::from_points(&cloud);
//!
//! // Index entries share row numbers with the input slice
//! assert_eq!(index.nearest(Point2::new(0.9, 0.1)).unwrap(), 1);
//!
//! let near = index.k_nearest(Point2::new(0.0, 0.0), 2).unwrap();
//! assert_eq!(near, vec![0, 1]);
//! ```
//!
//! # Distance Metrics
//!
//! ```
//! use terrain_spatial::PlanarMetric;
//! use nalgebra::Point2;
//!
//! let a = Point2::new(0.0, 0.0);
//! let b = Point2::new(3.0, 4.0);
//! assert!((PlanarMetric::Euclidean.distance(&a, &b) - 5.0).abs() < 1e-12);
//!
//! // Latitude/longitude in degrees, result in metres
//! let ridge = Point2::new(38.395_879, -110.779_201);
//! let wash = Point2::new(38.398_112, -110.783_233);
//! let metres = PlanarMetric::Haversine.distance(&ridge, &wash);
//! assert!(metres > 400.0 && metres < 500.0);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod index;
mod metric;

pub use error::SpatialError;
pub use index::PointIndex;
pub use metric::{EARTH_RADIUS_M, PlanarMetric};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3};
