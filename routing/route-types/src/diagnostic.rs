//! Non-fatal conditions found while building a planner.

use std::fmt;

/// A coordinate axis of a terrain point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// First planar axis.
    X,
    /// Second planar axis.
    Y,
    /// Elevation.
    Z,
}

impl Axis {
    /// All axes in coordinate order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Returns the coordinate position of the axis.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        };
        f.write_str(name)
    }
}

/// A planner diagnostic.
///
/// Diagnostics never abort construction; they report input that the planner
/// handled in a degraded way.
///
/// # Example
///
/// ```
/// use route_types::{Axis, Diagnostic};
///
/// let d = Diagnostic::DegenerateAxis(Axis::Z);
/// assert!(d.to_string().contains("zero variance"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Diagnostic {
    /// An axis has zero variance and contributes nothing to cost.
    DegenerateAxis(Axis),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateAxis(axis) => {
                write!(f, "{axis} axis has zero variance and is ignored by the cost model")
            }
        }
    }
}
