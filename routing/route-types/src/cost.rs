//! Cost breakdown for terrain routes.
//!
//! Edge cost on the proximity graph is computed in a normalized frame as
//!
//! ```text
//! cost(p1, p2) = dx² + dy² + alpha · dz²
//! ```
//!
//! [`RouteCost`] keeps the planar and weighted elevation parts apart so callers
//! can see how much of a route's cost comes from climbing.
//!
//! # Example
//!
//! ```
//! use route_types::RouteCost;
//!
//! let cost = RouteCost::new()
//!     .with_planar(2.5)
//!     .with_elevation(0.5);
//!
//! assert!((cost.total() - 3.0).abs() < 1e-12);
//! ```

use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Default elevation penalty weight.
///
/// Large values make the planner prefer flat detours over steep shortcuts.
pub const DEFAULT_ALPHA: f64 = 10_000.0;

/// Computed cost breakdown for a route.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteCost {
    /// Sum of normalized squared planar edge lengths.
    planar: f64,
    /// Sum of `alpha`-weighted normalized squared elevation changes.
    elevation: f64,
}

impl RouteCost {
    /// Creates a new route cost with all components at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            planar: 0.0,
            elevation: 0.0,
        }
    }

    /// Sets the planar component.
    #[must_use]
    pub const fn with_planar(mut self, planar: f64) -> Self {
        self.planar = planar;
        self
    }

    /// Sets the weighted elevation component.
    #[must_use]
    pub const fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = elevation;
        self
    }

    /// Returns the planar component.
    #[must_use]
    pub const fn planar(&self) -> f64 {
        self.planar
    }

    /// Returns the weighted elevation component.
    #[must_use]
    pub const fn elevation(&self) -> f64 {
        self.elevation
    }

    /// Returns the total cost, the quantity A* minimizes.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.planar + self.elevation
    }

    /// Returns the fraction of the total cost due to elevation change.
    ///
    /// Zero for a zero-cost route.
    #[must_use]
    pub fn elevation_share(&self) -> f64 {
        let total = self.total();
        if total > 0.0 { self.elevation / total } else { 0.0 }
    }
}

impl Add for RouteCost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            planar: self.planar + rhs.planar,
            elevation: self.elevation + rhs.elevation,
        }
    }
}

impl AddAssign for RouteCost {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for RouteCost {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::new(), Add::add)
    }
}
