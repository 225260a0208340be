//! Error types for spatial operations.

/// Errors that can occur during spatial index queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SpatialError {
    /// The index holds no points, so no neighbor can be returned.
    #[error("spatial index is empty")]
    EmptyIndex,

    /// A k-nearest query asked for zero neighbors.
    #[error("neighbor count must be at least 1, got {0}")]
    InvalidNeighborCount(usize),

    /// A query position has a NaN or infinite coordinate.
    #[error("query position has a non-finite coordinate")]
    NonFiniteQuery,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_index_display() {
        assert_eq!(SpatialError::EmptyIndex.to_string(), "spatial index is empty");
    }

    #[test]
    fn test_invalid_neighbor_count_display() {
        let msg = SpatialError::InvalidNeighborCount(0).to_string();
        assert!(msg.contains("at least 1"));
        assert!(msg.contains('0'));
    }

    #[test]
    fn test_non_finite_query_display() {
        assert!(SpatialError::NonFiniteQuery.to_string().contains("non-finite"));
    }
}
