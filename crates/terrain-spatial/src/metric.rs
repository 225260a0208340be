//! Planar distance metrics.

use nalgebra::Point2;

/// Mean Earth radius in metres used by [`PlanarMetric::Haversine`].
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Distance function over planar positions.
///
/// The metric has to match the coordinate frame of the point cloud: projected
/// coordinates use [`PlanarMetric::Euclidean`], geodetic latitude/longitude
/// pairs use [`PlanarMetric::Haversine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlanarMetric {
    /// Straight-line distance in the input units.
    #[default]
    Euclidean,

    /// Great-circle distance in metres.
    ///
    /// `x` is latitude and `y` is longitude, both in degrees.
    Haversine,
}

impl PlanarMetric {
    /// Returns the distance between `a` and `b` under this metric.
    ///
    /// Always non-negative and symmetric.
    #[must_use]
    pub fn distance(&self, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
        match self {
            Self::Euclidean => (b - a).norm(),
            Self::Haversine => haversine_m(a, b),
        }
    }
}

fn haversine_m(a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    let (lat1, lat2) = (a.x.to_radians(), b.x.to_radians());
    let half_dlat = ((b.x - a.x).to_radians() / 2.0).sin();
    let half_dlon = ((b.y - a.y).to_radians() / 2.0).sin();

    let h = (lat1.cos() * lat2.cos()).mul_add(half_dlon * half_dlon, half_dlat * half_dlat);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}
