//! Core types for terrain routing: paths, routes, costs, configuration, and errors.
//!
//! This crate provides the foundational types shared by the routing crates,
//! which plan elevation-aware routes for a ground vehicle across a terrain
//! point cloud.
//!
//! # Overview
//!
//! - **Paths**: Ordered point sequences in the input frame ([`TerrainPath`])
//! - **Costs**: Planar and elevation cost components ([`RouteCost`])
//! - **Results**: Complete route solutions with metadata ([`Route`], [`RouteStats`])
//! - **Ordering**: Visiting orders for multiple waypoints ([`WaypointOrder`])
//! - **Configuration**: Planner and per-query settings ([`PlannerConfig`], [`SearchParams`])
//! - **Failures**: Routing errors ([`RoutingError`]) and non-fatal
//!   diagnostics ([`Diagnostic`])
//!
//! # Example
//!
//! ```
//! use route_types::{PlannerConfig, Heuristic, TerrainPath};
//! use nalgebra::Point3;
//!
//! let config = PlannerConfig::default()
//!     .with_alpha(2_500.0)
//!     .with_heuristic(Heuristic::EdgeBounded);
//! assert!(config.validate().is_empty());
//!
//! let path: TerrainPath = (0..20)
//!     .map(|i| Point3::new(f64::from(i), 0.0, 0.0))
//!     .collect();
//! assert_eq!(path.decimate(config.max_output_points()).len(), 5);
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enables serialization/deserialization for all types

#![doc(html_root_url = "https://docs.rs/route-types/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod cost;
pub mod diagnostic;
pub mod error;
pub mod order;
pub mod path;
pub mod route;

// Re-export main types at crate root for convenience
pub use config::{Heuristic, PlannerConfig, SearchParams};
pub use cost::{DEFAULT_ALPHA, RouteCost};
pub use diagnostic::{Axis, Diagnostic};
pub use error::RoutingError;
pub use order::WaypointOrder;
pub use path::{TerrainPath, decimation_stride};
pub use route::{Route, RouteStats};
