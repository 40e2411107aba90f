//! Voronoi cell construction from the Delaunay mesh
//!
//! The cell of an interior vertex is the polygon of circumcenters of the
//! triangles around it. Walking the vertex's one-ring yields those triangles
//! already in counter-clockwise order, so no angular sort is needed.

use crate::cell::VoronoiCell;
use crate::mesh::{DelaunayMesh, VertexId};
use crate::predicates::circumcircle;

/// Generate Voronoi cells for every interior vertex of the mesh
///
/// Boundary vertices (open cells) and vertices next to a degenerate triangle
/// are skipped.
///
/// # Example
///
/// ```rust
/// use delaunay_mesh2d::*;
///
/// let points = generation::generate_square_points(200, 5.0, 42);
/// let mut mesh = DelaunayMesh::new();
/// mesh.init_mesh(&points);
///
/// let cells = generation::generate_cells(&mesh);
/// assert!(!cells.is_empty());
/// assert!(cells.iter().all(|c| c.vertex_count() >= 3));
/// ```
pub fn generate_cells(mesh: &DelaunayMesh) -> Vec<VoronoiCell> {
    (0..mesh.vertex_count())
        .filter_map(|v| cell_for_vertex(mesh, VertexId(v)))
        .collect()
}

/// Build the Voronoi cell of a single vertex
///
/// Returns `None` for boundary vertices and when one of the surrounding
/// triangles is collinear.
pub fn cell_for_vertex(mesh: &DelaunayMesh, v: VertexId) -> Option<VoronoiCell> {
    let ring = mesh.one_ring(v)?;
    let site = mesh.vertex(v)?.position();

    // Face of ring.edges[i] is (v, ring[i], ring[i + 1])
    let vertices = ring
        .edges
        .iter()
        .map(|&e| {
            let face = mesh.edge(e)?.face;
            let [p0, p1, p2] = mesh.face_positions(face);
            circumcircle(p0, p1, p2).map(|c| c.center)
        })
        .collect::<Option<Vec<_>>>()?;

    let neighbors = ring.vertices.iter().map(|n| n.index()).collect();

    Some(VoronoiCell::new(v.index(), site, neighbors, vertices))
}
