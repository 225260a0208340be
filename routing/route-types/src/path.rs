//! Path representation for terrain routes.
//!
//! A [`TerrainPath`] is an ordered sequence of cloud points from start to goal.
//! Points keep the coordinate frame of the input cloud.
//!
//! # Example
//!
//! ```
//! use route_types::TerrainPath;
//! use nalgebra::Point3;
//!
//! let path = TerrainPath::new(vec![
//!     Point3::new(0.0, 0.0, 100.0),
//!     Point3::new(3.0, 4.0, 101.0),
//!     Point3::new(6.0, 8.0, 99.0),
//! ]);
//! assert_eq!(path.len(), 3);
//! assert!((path.planar_length() - 10.0).abs() < 1e-10);
//! assert!((path.total_climb() - 1.0).abs() < 1e-10);
//! ```

use nalgebra::{Point2, Point3};

/// An ordered sequence of terrain points.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainPath {
    points: Vec<Point3<f64>>,
}

impl TerrainPath {
    /// Creates a path from points in travel order.
    #[must_use]
    pub const fn new(points: Vec<Point3<f64>>) -> Self {
        Self { points }
    }

    /// Creates an empty path.
    #[must_use]
    pub const fn empty() -> Self {
        Self { points: Vec::new() }
    }

    /// Creates a path holding a single point.
    #[must_use]
    pub fn from_single(point: Point3<f64>) -> Self {
        Self {
            points: vec![point],
        }
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the path has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the points as a slice.
    #[must_use]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Returns the first point, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Point3<f64>> {
        self.points.first()
    }

    /// Returns the last point, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Point3<f64>> {
        self.points.last()
    }

    /// Returns an iterator over the points.
    pub fn iter(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.points.iter()
    }

    /// Returns an iterator over consecutive point pairs.
    pub fn segments(&self) -> impl Iterator<Item = (&Point3<f64>, &Point3<f64>)> {
        self.points.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// Returns the planar projection of every point.
    #[must_use]
    pub fn planar(&self) -> Vec<Point2<f64>> {
        self.points.iter().map(|p| Point2::new(p.x, p.y)).collect()
    }

    /// Sum of planar segment lengths, in input units.
    #[must_use]
    pub fn planar_length(&self) -> f64 {
        self.segments()
            .map(|(a, b)| (b.xy() - a.xy()).norm())
            .sum()
    }

    /// Total elevation gained along the path.
    #[must_use]
    pub fn total_climb(&self) -> f64 {
        self.segments().map(|(a, b)| (b.z - a.z).max(0.0)).sum()
    }

    /// Total elevation lost along the path.
    #[must_use]
    pub fn total_descent(&self) -> f64 {
        self.segments().map(|(a, b)| (a.z - b.z).max(0.0)).sum()
    }

    /// Down-samples the path to at most `max_points` points at a uniform stride.
    ///
    /// The stride is `max(1, n / max_points)` and points `0, stride, 2·stride, …`
    /// are kept, so the result has `⌈n / stride⌉` points and always starts with
    /// the first point. A path shorter than `max_points` is returned unchanged.
    /// The final point is kept only when it falls on the stride.
    ///
    /// `max_points` of zero is treated as one.
    ///
    /// # Example
    ///
    /// ```
    /// use route_types::TerrainPath;
    /// use nalgebra::Point3;
    ///
    /// let path: TerrainPath = (0..12)
    ///     .map(|i| Point3::new(f64::from(i), 0.0, 0.0))
    ///     .collect();
    ///
    /// // stride = 12 / 5 = 2
    /// let short = path.decimate(5);
    /// assert_eq!(short.len(), 6);
    /// assert_eq!(short.first(), path.first());
    /// ```
    #[must_use]
    pub fn decimate(&self, max_points: usize) -> Self {
        let stride = decimation_stride(self.len(), max_points);
        self.points.iter().step_by(stride).copied().collect()
    }

    /// Appends another path to the end of this one.
    ///
    /// With `skip_junction` the first point of `other` is dropped when it equals
    /// the current last point.
    pub fn append(&mut self, other: &Self, skip_junction: bool) {
        let skip = usize::from(skip_junction && self.last().is_some() && self.last() == other.first());
        self.points.extend(other.points.iter().skip(skip).copied());
    }

    /// Consumes the path and returns its points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point3<f64>> {
        self.points
    }
}

/// Stride used by [`TerrainPath::decimate`] for a path of `len` points.
#[must_use]
pub fn decimation_stride(len: usize, max_points: usize) -> usize {
    (len / max_points.max(1)).max(1)
}

impl FromIterator<Point3<f64>> for TerrainPath {
    fn from_iter<I: IntoIterator<Item = Point3<f64>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for TerrainPath {
    type Item = Point3<f64>;
    type IntoIter = std::vec::IntoIter<Point3<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl From<Vec<Point3<f64>>> for TerrainPath {
    fn from(points: Vec<Point3<f64>>) -> Self {
        Self::new(points)
    }
}
