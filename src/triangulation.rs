//! Triangulation main structure

use std::collections::{HashSet, VecDeque};

use glam::DVec2;

use crate::cell::VoronoiCell;
use crate::config::TriangulationConfig;
use crate::error::Result;
use crate::generation::{build_mesh, generate_cells, generate_square_points};
use crate::mesh::{DelaunayMesh, EdgeId};

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A generated Delaunay mesh together with the configuration that made it
///
/// The mesh is built once and then only queried. Neighbour lists are
/// precomputed from the half-edge structure so hop queries do not walk the
/// mesh again.
///
/// # Examples
///
/// ```
/// use delaunay_mesh2d::*;
///
/// let config = TriangulationConfigBuilder::new()
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let triangulation = Triangulation::generate(config).unwrap();
/// println!("Generated {} triangles", triangulation.face_count());
///
/// assert!(triangulation.mesh().check_all_edges());
/// ```
#[derive(Clone)]
pub struct Triangulation {
    /// Configuration used to build this triangulation
    config: TriangulationConfig,

    mesh: DelaunayMesh,

    /// Sorted neighbour ids per vertex
    neighbors: Vec<Vec<usize>>,

    /// Spatial index for fast position-to-vertex lookups (optional, requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl Triangulation {
    /// Generate random points from the configuration and triangulate them
    ///
    /// # Errors
    ///
    /// Propagates errors from the build pipeline.
    pub fn generate(config: TriangulationConfig) -> Result<Self> {
        let points = generate_square_points(config.point_count, config.half_extent, config.seed);
        Self::from_points(&points, config)
    }

    /// Triangulate caller-provided points with the configured post-processing
    ///
    /// # Errors
    ///
    /// Returns `GenerationFailed` if a point has a non-finite coordinate.
    ///
    /// # Example
    ///
    /// ```
    /// use delaunay_mesh2d::*;
    ///
    /// let points = [
    ///     DVec2::new(0.0, 0.0),
    ///     DVec2::new(1.0, 0.0),
    ///     DVec2::new(1.0, 1.0),
    ///     DVec2::new(0.0, 1.0),
    /// ];
    /// let config = TriangulationConfigBuilder::new()
    ///     .cleanup_ratio(None)
    ///     .unwrap()
    ///     .build()
    ///     .unwrap();
    ///
    /// let triangulation = Triangulation::from_points(&points, config).unwrap();
    /// assert_eq!(triangulation.face_count(), 2);
    /// ```
    pub fn from_points(points: &[DVec2], config: TriangulationConfig) -> Result<Self> {
        let mesh = build_mesh(points, &config)?;
        let neighbors = collect_neighbors(&mesh);

        #[cfg(feature = "spatial-index")]
        let spatial_index = SpatialIndex::new(&mesh.positions());

        Ok(Self {
            config,
            mesh,
            neighbors,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }

    #[inline]
    pub fn config(&self) -> &TriangulationConfig {
        &self.config
    }

    #[inline]
    pub fn mesh(&self) -> &DelaunayMesh {
        &self.mesh
    }

    /// Give up the wrapper and keep the mesh
    pub fn into_mesh(self) -> DelaunayMesh {
        self.mesh
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.mesh.face_count()
    }

    /// Ids of the vertices sharing an edge with `vertex`
    ///
    /// Returns an empty slice if the id is out of range.
    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        self.neighbors
            .get(vertex)
            .map(|n| n.as_slice())
            .unwrap_or(&[])
    }

    /// Voronoi cells of all interior vertices
    pub fn voronoi_cells(&self) -> Vec<VoronoiCell> {
        generate_cells(&self.mesh)
    }

    /// Find the vertex closest to a position (requires spatial-index feature)
    ///
    /// Returns `None` for an empty mesh.
    ///
    /// # Example
    ///
    /// ```
    /// # use delaunay_mesh2d::*;
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let config = TriangulationConfigBuilder::new().seed(7).build().unwrap();
    /// let triangulation = Triangulation::generate(config).unwrap();
    ///
    /// let v = triangulation.find_nearest_vertex(DVec2::new(0.0, 0.0)).unwrap();
    /// assert!(v < triangulation.vertex_count());
    /// # }
    /// ```
    #[cfg(feature = "spatial-index")]
    pub fn find_nearest_vertex(&self, position: DVec2) -> Option<usize> {
        self.spatial_index.find_nearest(position)
    }

    /// Find vertices within a given hop count from a start vertex (BFS)
    ///
    /// The result includes `start` and is empty if `start` is out of range.
    pub fn find_vertices_within_hops(&self, start: usize, hops: usize) -> Vec<usize> {
        if start >= self.neighbors.len() {
            return vec![];
        }

        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back((start, 0));

        while let Some((vertex, depth)) = queue.pop_front() {
            if depth == hops {
                continue;
            }
            for &n in self.neighbors(vertex) {
                if visited.insert(n) {
                    queue.push_back((n, depth + 1));
                }
            }
        }

        let mut found: Vec<usize> = visited.into_iter().collect();
        found.sort_unstable();
        found
    }
}

/// Undirected adjacency from the half-edges, boundary edges included
fn collect_neighbors(mesh: &DelaunayMesh) -> Vec<Vec<usize>> {
    let mut neighbors = vec![Vec::new(); mesh.vertex_count()];
    for (i, edge) in mesh.edges().iter().enumerate() {
        let from = edge.vert;
        let to = mesh.target(EdgeId(i));
        neighbors[from.index()].push(to.index());
        neighbors[to.index()].push(from.index());
    }
    for list in &mut neighbors {
        list.sort_unstable();
        list.dedup();
    }
    neighbors
}

impl std::fmt::Debug for Triangulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Triangulation")
            .field("config", &self.config)
            .field("vertices", &self.mesh.vertex_count())
            .field("faces", &self.mesh.face_count())
            .finish()
    }
}

impl AsRef<DelaunayMesh> for Triangulation {
    fn as_ref(&self) -> &DelaunayMesh {
        &self.mesh
    }
}
