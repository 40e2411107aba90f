//! Spatial indexing for fast position-to-vertex lookups
//!
//! This module is only available with the `spatial-index` feature.

use glam::DVec2;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

/// Wrapper around a 2D KD-tree over mesh vertex positions
///
/// Provides O(log n) nearest-neighbor lookups to turn an arbitrary position
/// (a mouse click, a probe point) into a vertex id.
#[derive(Clone)]
pub struct SpatialIndex {
    /// `None` when built from an empty point set
    tree: Option<ImmutableKdTree<f64, usize, 2, 32>>,
}

impl SpatialIndex {
    /// Build spatial index from vertex positions
    ///
    /// The item stored for each position is its index in `positions`.
    ///
    /// # Example
    ///
    /// ```
    /// use delaunay_mesh2d::*;
    ///
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let positions = vec![
    ///     DVec2::new(0.0, 0.0),
    ///     DVec2::new(1.0, 0.0),
    ///     DVec2::new(0.0, 1.0),
    /// ];
    ///
    /// let index = SpatialIndex::new(&positions);
    /// assert_eq!(index.find_nearest(DVec2::new(0.9, 0.1)), Some(1));
    /// # }
    /// ```
    pub fn new(positions: &[DVec2]) -> Self {
        if positions.is_empty() {
            return Self { tree: None };
        }

        let points: Vec<[f64; 2]> = positions.iter().map(|p| [p.x, p.y]).collect();

        Self {
            tree: Some(ImmutableKdTree::new_from_slice(&points)),
        }
    }

    /// Find the index of the position closest to `position`
    ///
    /// Returns `None` for an empty index.
    pub fn find_nearest(&self, position: DVec2) -> Option<usize> {
        let tree = self.tree.as_ref()?;
        let result = tree.nearest_one::<SquaredEuclidean>(&[position.x, position.y]);
        Some(result.item as usize)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_index_basic() {
        let positions = vec![
            DVec2::new(1.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(-1.0, 0.0),
            DVec2::new(0.0, -1.0),
        ];

        let index = SpatialIndex::new(&positions);

        assert_eq!(index.find_nearest(DVec2::new(0.9, 0.1)), Some(0));
        assert_eq!(index.find_nearest(DVec2::new(0.0, 0.95)), Some(1));
        assert_eq!(index.find_nearest(DVec2::new(-0.8, 0.0)), Some(2));
        assert_eq!(index.find_nearest(DVec2::new(0.1, -3.0)), Some(3));
    }

    #[test]
    fn test_spatial_index_exact_match() {
        let positions = vec![DVec2::new(10.0, 0.0), DVec2::new(0.0, 10.0)];
        let index = SpatialIndex::new(&positions);

        assert_eq!(index.find_nearest(positions[0]), Some(0));
        assert_eq!(index.find_nearest(positions[1]), Some(1));
    }

    #[test]
    fn test_spatial_index_empty() {
        let index = SpatialIndex::new(&[]);
        assert!(index.is_empty());
        assert_eq!(index.find_nearest(DVec2::ZERO), None);
    }
}
