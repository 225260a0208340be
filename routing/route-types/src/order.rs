//! Waypoint visiting orders.

use nalgebra::Point2;

/// A visiting order chosen for a set of target waypoints.
///
/// The origin is always at position 0 of [`WaypointOrder::sequence`].
///
/// # Example
///
/// ```
/// use route_types::WaypointOrder;
/// use nalgebra::Point2;
///
/// let start = Point2::new(0.0, 0.0);
/// let targets = [Point2::new(2.0, 0.0), Point2::new(1.0, 0.0)];
///
/// let order = WaypointOrder::new(start, &targets, vec![1, 0], 2.0);
/// assert_eq!(order.sequence()[1], Point2::new(1.0, 0.0));
/// assert_eq!(order.targets().count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaypointOrder {
    sequence: Vec<Point2<f64>>,
    permutation: Vec<usize>,
    total_cost: f64,
}

impl WaypointOrder {
    /// Creates an order from the origin, the original targets, and the
    /// permutation of target indices to visit.
    ///
    /// Indices outside `targets` are ignored.
    #[must_use]
    pub fn new(
        start: Point2<f64>,
        targets: &[Point2<f64>],
        permutation: Vec<usize>,
        total_cost: f64,
    ) -> Self {
        let sequence = std::iter::once(start)
            .chain(permutation.iter().filter_map(|&i| targets.get(i).copied()))
            .collect();

        Self {
            sequence,
            permutation,
            total_cost,
        }
    }

    /// Returns the full visiting sequence, origin first.
    #[must_use]
    pub fn sequence(&self) -> &[Point2<f64>] {
        &self.sequence
    }

    /// Returns the targets in visiting order, without the origin.
    pub fn targets(&self) -> impl Iterator<Item = &Point2<f64>> {
        self.sequence.iter().skip(1)
    }

    /// Returns the visiting order as indices into the original target list.
    #[must_use]
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// Returns the total travel cost of the order.
    #[must_use]
    pub const fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Returns consecutive `(from, to)` legs of the order.
    pub fn legs(&self) -> impl Iterator<Item = (Point2<f64>, Point2<f64>)> + '_ {
        self.sequence.windows(2).map(|w| (w[0], w[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_origin_only() {
        let order = WaypointOrder::new(Point2::new(1.0, 1.0), &[], Vec::new(), 0.0);
        assert_eq!(order.sequence(), &[Point2::new(1.0, 1.0)]);
        assert_eq!(order.legs().count(), 0);
        assert_relative_eq!(order.total_cost(), 0.0);
    }

    #[test]
    fn test_sequence_follows_permutation() {
        let targets = [
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(3.0, 0.0),
        ];
        let order = WaypointOrder::new(Point2::origin(), &targets, vec![2, 0, 1], 7.0);
        let xs: Vec<f64> = order.sequence().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 3.0, 1.0, 2.0]);
        assert_eq!(order.permutation(), &[2, 0, 1]);
        assert_eq!(order.legs().count(), 3);
    }
}
