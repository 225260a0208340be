//! Planar nearest-neighbor index.
//!
//! [`PointIndex`] wraps an R-tree over the `(x, y)` projection of a point slice.
//! Every entry carries the row number of the point it was built from, so
//! query results can be used to index back into the same slice.

use nalgebra::{Point2, Point3};
use rstar::RTree;
use rstar::primitives::GeomWithData;

use crate::error::SpatialError;

/// Planar position tagged with its source row.
type IndexedPosition = GeomWithData<[f64; 2], usize>;

/// Nearest-neighbor index over the planar projection of a point cloud.
///
/// Results are deterministic: neighbors are ordered by increasing distance and
/// equidistant neighbors are ordered by row number.
///
/// # Example
///
/// ```
/// use terrain_spatial::PointIndex;
/// use nalgebra::{Point2, Point3};
///
/// let cloud: Vec<_> = (0..10)
///     .map(|i| Point3::new(f64::from(i), 0.0, 0.0))
///     .collect();
/// let index = PointIndex::from_points(&cloud);
///
/// assert_eq!(index.len(), 10);
/// assert_eq!(index.k_nearest(Point2::new(4.2, 0.0), 3).unwrap(), vec![4, 5, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct PointIndex {
    tree: RTree<IndexedPosition>,
    positions: Vec<Point2<f64>>,
}

impl PointIndex {
    /// Builds an index from the planar projection of `points`.
    ///
    /// Entry `i` of the index refers to `points[i]`.
    #[must_use]
    pub fn from_points(points: &[Point3<f64>]) -> Self {
        let positions: Vec<_> = points.iter().map(|p| Point2::new(p.x, p.y)).collect();
        Self::from_planar(positions)
    }

    /// Builds an index directly from planar positions.
    #[must_use]
    pub fn from_planar(positions: Vec<Point2<f64>>) -> Self {
        let entries = positions
            .iter()
            .enumerate()
            .map(|(row, p)| GeomWithData::new([p.x, p.y], row))
            .collect();

        Self {
            tree: RTree::bulk_load(entries),
            positions,
        }
    }

    /// Returns the number of indexed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if the index holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns the planar position of row `row`.
    #[must_use]
    pub fn position(&self, row: usize) -> Option<&Point2<f64>> {
        self.positions.get(row)
    }

    /// Returns the row of the indexed point closest to `query`.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::NonFiniteQuery`] if `query` has a NaN or infinite coordinate
    /// - [`SpatialError::EmptyIndex`] if the index holds no points
    pub fn nearest(&self, query: Point2<f64>) -> Result<usize, SpatialError> {
        check_finite(&query)?;
        let mut candidates = self
            .tree
            .nearest_neighbor_iter_with_distance_2(&[query.x, query.y]);

        let (first, best_dist) = candidates.next().ok_or(SpatialError::EmptyIndex)?;

        // Equidistant points resolve to the lowest row
        let row = candidates
            .take_while(|(_, dist)| *dist <= best_dist)
            .map(|(entry, _)| entry.data)
            .fold(first.data, usize::min);

        Ok(row)
    }

    /// Returns up to `k` rows closest to `query`, nearest first.
    ///
    /// If the index holds fewer than `k` points, all of them are returned.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::InvalidNeighborCount`] if `k` is zero
    /// - [`SpatialError::NonFiniteQuery`] if `query` has a NaN or infinite coordinate
    /// - [`SpatialError::EmptyIndex`] if the index holds no points
    pub fn k_nearest(&self, query: Point2<f64>, k: usize) -> Result<Vec<usize>, SpatialError> {
        if k == 0 {
            return Err(SpatialError::InvalidNeighborCount(k));
        }
        check_finite(&query)?;
        if self.is_empty() {
            return Err(SpatialError::EmptyIndex);
        }

        // Pull the k nearest plus anything tied with the k-th so that the
        // row-order tie-break below sees every candidate.
        let mut found: Vec<(f64, usize)> = Vec::with_capacity(k + 1);
        for (entry, dist) in self
            .tree
            .nearest_neighbor_iter_with_distance_2(&[query.x, query.y])
        {
            if found.len() >= k && found.last().is_some_and(|(last, _)| dist > *last) {
                break;
            }
            found.push((dist, entry.data));
        }

        found.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        found.truncate(k);

        Ok(found.into_iter().map(|(_, row)| row).collect())
    }
}

fn check_finite(query: &Point2<f64>) -> Result<(), SpatialError> {
    if query.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(SpatialError::NonFiniteQuery)
    }
}
