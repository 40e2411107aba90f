//! Voronoi Cell Structure
//!
//! The dual of the triangulation around one interior vertex.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Polygons with less than this absolute area use the vertex mean as centroid
const DEGENERATE_AREA: f64 = 1e-12;

/// A Voronoi cell around one mesh vertex
///
/// Only interior vertices have a closed cell; boundary vertices have an
/// unbounded region and get no `VoronoiCell`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiCell {
    /// Index of the mesh vertex this cell belongs to
    pub id: usize,

    /// Position of the mesh vertex (the Voronoi site)
    pub site: DVec2,

    /// Vertex indices of the neighbouring sites, counter-clockwise
    pub neighbors: Vec<usize>,

    /// Corners of the cell polygon, counter-clockwise
    ///
    /// These are the circumcenters of the triangles around the site.
    pub vertices: Vec<DVec2>,
}

impl VoronoiCell {
    pub fn new(id: usize, site: DVec2, neighbors: Vec<usize>, vertices: Vec<DVec2>) -> Self {
        Self {
            id,
            site,
            neighbors,
            vertices,
        }
    }

    #[inline]
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    #[inline]
    pub fn is_neighbor_of(&self, other_id: usize) -> bool {
        self.neighbors.contains(&other_id)
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Signed shoelace area, positive for a counter-clockwise polygon
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| self.vertices[i].perp_dot(self.vertices[(i + 1) % n]))
            .sum();
        0.5 * twice
    }

    /// Area-weighted centroid of the cell polygon
    ///
    /// Falls back to the mean of the corners when the polygon has (almost)
    /// no area. Returns `None` for a cell without corners.
    pub fn centroid(&self) -> Option<DVec2> {
        let n = self.vertices.len();
        if n == 0 {
            return None;
        }

        let mean = self.vertices.iter().copied().sum::<DVec2>() / n as f64;
        let area = self.area();
        if n < 3 || area.abs() < DEGENERATE_AREA {
            return Some(mean);
        }

        // Shift to the mean to keep the products small
        let mut sum = DVec2::ZERO;
        for i in 0..n {
            let a = self.vertices[i] - mean;
            let b = self.vertices[(i + 1) % n] - mean;
            sum += (a + b) * a.perp_dot(b);
        }
        Some(mean + sum / (6.0 * area))
    }

    /// Euclidean distance between the two sites
    pub fn distance_to(&self, other: &VoronoiCell) -> f64 {
        self.site.distance(other.site)
    }
}
