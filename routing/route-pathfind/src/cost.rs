//! Normalized edge costs.
//!
//! Each coordinate axis is standardized with the mean and sample standard
//! deviation of the input cloud, so planar and vertical units are comparable.
//! The cost of moving between two points is then
//!
//! ```text
//! cost(p1, p2) = (x1' - x2')² + (y1' - y2')² + alpha · (z1' - z2')²
//! ```
//!
//! where primes denote normalized coordinates.
//!
//! An axis with zero variance normalizes to `0` instead of dividing by zero,
//! and is reported through [`CostModel::diagnostics`].

use nalgebra::{Point2, Point3};
use route_types::{Axis, Diagnostic, RouteCost};
use tracing::warn;

use crate::graph::ProximityGraph;

/// Per-axis mean and sample standard deviation of a point cloud.
///
/// A standard deviation of exactly `0.0` marks a degenerate axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationStats {
    mean: [f64; 3],
    std_dev: [f64; 3],
}

impl NormalizationStats {
    /// Computes statistics over `points`.
    ///
    /// Uses the sample (n - 1) standard deviation. An axis on which every
    /// value is equal, or with fewer than two points, is degenerate.
    #[must_use]
    pub fn from_points(points: &[Point3<f64>]) -> Self {
        let mut mean = [0.0; 3];
        let mut std_dev = [0.0; 3];
        if points.is_empty() {
            return Self { mean, std_dev };
        }

        #[allow(clippy::cast_precision_loss)]
        let n = points.len() as f64;

        for axis in Axis::ALL {
            let i = axis.index();
            let mu = axis_values(points, i).sum::<f64>() / n;
            mean[i] = mu;

            let (lo, hi) = axis_values(points, i)
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                });
            if points.len() < 2 || hi - lo <= 0.0 {
                continue;
            }

            let variance = axis_values(points, i)
                .map(|v| (v - mu).powi(2))
                .sum::<f64>()
                / (n - 1.0);
            let sigma = variance.sqrt();
            if sigma.is_finite() && sigma > 0.0 {
                std_dev[i] = sigma;
            }
        }

        Self { mean, std_dev }
    }

    /// Returns the mean of `axis`.
    #[must_use]
    pub const fn mean(&self, axis: Axis) -> f64 {
        self.mean[axis.index()]
    }

    /// Returns the sample standard deviation of `axis`, `0.0` if degenerate.
    #[must_use]
    pub const fn std_dev(&self, axis: Axis) -> f64 {
        self.std_dev[axis.index()]
    }

    /// Returns `true` if `axis` has zero variance.
    #[must_use]
    pub fn is_degenerate(&self, axis: Axis) -> bool {
        self.std_dev[axis.index()] <= 0.0
    }

    /// Standardizes a single coordinate along `axis`.
    #[must_use]
    pub fn normalize_axis(&self, axis: Axis, value: f64) -> f64 {
        let i = axis.index();
        if self.std_dev[i] > 0.0 {
            (value - self.mean[i]) / self.std_dev[i]
        } else {
            0.0
        }
    }
}

fn axis_values(points: &[Point3<f64>], axis: usize) -> impl Iterator<Item = f64> + '_ {
    points.iter().map(move |p| p[axis])
}

/// Edge cost and heuristic evaluation in the normalized frame.
///
/// Built once per point cloud and shared read-only by every query. The
/// elevation weight `alpha` is supplied per call.
///
/// # Example
///
/// ```
/// use route_pathfind::CostModel;
/// use nalgebra::Point3;
///
/// let points = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 1.0),
///     Point3::new(2.0, 1.0, 0.0),
/// ];
/// let model = CostModel::from_points(&points);
///
/// let flat = model.edge_cost(&points[0], &points[1], 0.0);
/// let weighted = model.edge_cost(&points[0], &points[1], 100.0);
/// assert!(weighted > flat);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CostModel {
    stats: NormalizationStats,
    min_edge_span: f64,
}

impl CostModel {
    /// Builds a model from the statistics of `points`.
    ///
    /// Logs a warning for each degenerate axis.
    #[must_use]
    pub fn from_points(points: &[Point3<f64>]) -> Self {
        let stats = NormalizationStats::from_points(points);
        for axis in Axis::ALL {
            if !points.is_empty() && stats.is_degenerate(axis) {
                warn!(%axis, points = points.len(), "axis has zero variance, normalizing to 0");
            }
        }

        Self {
            stats,
            min_edge_span: 0.0,
        }
    }

    /// Builds a model over the rows of `graph` and records its shortest edge.
    ///
    /// The shortest positive normalized planar edge length feeds the
    /// [`Heuristic::EdgeBounded`](route_types::Heuristic::EdgeBounded) lower bound.
    #[must_use]
    pub fn for_graph(graph: &ProximityGraph) -> Self {
        let mut model = Self::from_points(graph.rows());
        model.min_edge_span = graph
            .edges()
            .iter()
            .map(|edge| {
                let [a, b] = edge.endpoints();
                model.planar_distance(&a.xy(), &b.xy())
            })
            .filter(|span| *span > 0.0)
            .fold(f64::INFINITY, f64::min);
        if !model.min_edge_span.is_finite() {
            model.min_edge_span = 0.0;
        }
        model
    }

    /// Returns the normalization statistics.
    #[must_use]
    pub const fn stats(&self) -> &NormalizationStats {
        &self.stats
    }

    /// Returns the shortest positive normalized planar edge length, or `0.0`
    /// if unknown.
    #[must_use]
    pub const fn min_edge_span(&self) -> f64 {
        self.min_edge_span
    }

    /// Returns one diagnostic per degenerate axis.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        Axis::ALL
            .into_iter()
            .filter(|&axis| self.stats.is_degenerate(axis))
            .map(Diagnostic::DegenerateAxis)
            .collect()
    }

    /// Maps a point into the normalized frame.
    #[must_use]
    pub fn normalize(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::new(
            self.stats.normalize_axis(Axis::X, point.x),
            self.stats.normalize_axis(Axis::Y, point.y),
            self.stats.normalize_axis(Axis::Z, point.z),
        )
    }

    /// Maps a planar position into the normalized frame.
    #[must_use]
    pub fn normalize_planar(&self, point: &Point2<f64>) -> Point2<f64> {
        Point2::new(
            self.stats.normalize_axis(Axis::X, point.x),
            self.stats.normalize_axis(Axis::Y, point.y),
        )
    }

    /// Euclidean distance between two planar positions after normalization.
    #[must_use]
    pub fn planar_distance(&self, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
        nalgebra::distance(&self.normalize_planar(a), &self.normalize_planar(b))
    }

    /// Splits the cost of moving from `p1` to `p2` into planar and weighted
    /// elevation parts.
    #[must_use]
    pub fn edge_components(&self, p1: &Point3<f64>, p2: &Point3<f64>, alpha: f64) -> RouteCost {
        let d = self.normalize(p1) - self.normalize(p2);
        RouteCost::new()
            .with_planar(d.x.mul_add(d.x, d.y * d.y))
            .with_elevation(alpha * d.z * d.z)
    }

    /// Cost of moving from `p1` to `p2`.
    ///
    /// Symmetric and never negative for `alpha >= 0`.
    #[must_use]
    pub fn edge_cost(&self, p1: &Point3<f64>, p2: &Point3<f64>, alpha: f64) -> f64 {
        self.edge_components(p1, p2, alpha).total()
    }

    /// Squared normalized planar distance from `point` to `goal`.
    ///
    /// Both positions are normalized before comparing.
    #[must_use]
    pub fn heuristic_estimate(&self, point: &Point3<f64>, goal: &Point2<f64>) -> f64 {
        let d = self.normalize_planar(&point.xy()) - self.normalize_planar(goal);
        d.norm_squared()
    }

    /// Lower bound on the remaining cost from `point` to any node within
    /// `slack` normalized units of `goal`.
    ///
    /// With `D` the planar gap left after the slack, any route must cover `D`
    /// using edges of normalized length at least `min_edge_span`, so its cost
    /// is at least `min(D², min_edge_span · D)`.
    #[must_use]
    pub fn bounded_estimate(&self, point: &Point3<f64>, goal: &Point2<f64>, slack: f64) -> f64 {
        let gap = (self.planar_distance(&point.xy(), goal) - slack).max(0.0);
        (gap * gap).min(self.min_edge_span * gap)
    }

    /// Converts a goal tolerance in input units to normalized planar units.
    ///
    /// Uses the smallest non-degenerate planar deviation, which can only
    /// overstate the normalized radius.
    #[must_use]
    pub fn tolerance_slack(&self, tolerance: f64) -> f64 {
        [Axis::X, Axis::Y]
            .into_iter()
            .filter(|&axis| !self.stats.is_degenerate(axis))
            .map(|axis| self.stats.std_dev(axis))
            .reduce(f64::min)
            .map_or(0.0, |sigma| tolerance / sigma)
    }

    /// Cost breakdown of following `points` in order.
    #[must_use]
    pub fn route_cost(&self, points: &[Point3<f64>], alpha: f64) -> RouteCost {
        points
            .windows(2)
            .map(|pair| self.edge_components(&pair[0], &pair[1], alpha))
            .sum()
    }
}
