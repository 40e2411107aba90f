//! Half-edge mesh for incremental Delaunay triangulation
//!
//! The mesh is an arena of three growable arrays (vertices, half-edges,
//! faces). Every cross-reference is a typed index into one of those arrays;
//! nothing owns anything else. During a triangulation session entries are only
//! ever appended, so indices held on a work stack stay valid while the arrays
//! are mutated. A rebuild replaces all three arrays at once.
//!
//! ```text
//!          vert(next(e))
//!              *
//!             /|\
//!     next(e)/ | \
//!           /  |e \ oppo(e)
//!           \  |  /
//!            \ | /
//!              *
//!           vert(e)
//! ```
//!
//! Triangles are counter-clockwise 3-cycles of half-edges. A half-edge with
//! no opposite lies on the mesh boundary.

mod insert;
mod rebuild;
mod relax;
mod validate;

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Index into the vertex array
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub usize);

/// Index into the half-edge array
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub usize);

/// Index into the face array
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FaceId(pub usize);

impl VertexId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl EdgeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl FaceId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A mesh vertex
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    /// One half-edge leaving this vertex
    ///
    /// Any edge of the outgoing ring will do; it is only an entry point for
    /// walks around the vertex and is re-pointed freely by local edits.
    pub edge: Option<EdgeId>,
}

impl Vertex {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, edge: None }
    }

    #[inline]
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

/// One directed side of a triangle
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfEdge {
    /// Origin vertex
    pub vert: VertexId,
    /// Half-edge running the other way in the neighbouring triangle
    pub oppo: Option<EdgeId>,
    /// Next half-edge in the counter-clockwise cycle of `face`
    pub next: EdgeId,
    /// Owning triangle
    pub face: FaceId,
}

impl HalfEdge {
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.oppo.is_none()
    }
}

/// A triangle, identified by one of its three half-edges
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub edge: EdgeId,
}

/// Mesh-level tuning passed in by the caller
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshOptions {
    /// Distance between the input bounding box and the seed triangle corners
    pub seed_margin: f64,
    /// Boundary cleanup threshold as a multiple of the average edge length
    pub cleanup_ratio: f64,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            seed_margin: 100.0,
            cleanup_ratio: 2.0,
        }
    }
}

/// Vertices around an interior vertex, counter-clockwise
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneRing {
    /// Neighbouring vertices
    pub vertices: Vec<VertexId>,
    /// Outgoing half-edges; `edges[i]` points at `vertices[i]`
    pub edges: Vec<EdgeId>,
}

/// Incrementally built 2D Delaunay triangulation
///
/// # Example
///
/// ```
/// use delaunay_mesh2d::*;
///
/// let points = vec![
///     DVec2::new(0.0, 0.0),
///     DVec2::new(2.0, 0.0),
///     DVec2::new(1.0, 2.0),
///     DVec2::new(1.0, 0.5),
/// ];
///
/// let mut mesh = DelaunayMesh::new();
/// mesh.init_mesh(&points);
///
/// assert_eq!(mesh.face_count(), 3);
/// assert!(mesh.check_all_edges());
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct DelaunayMesh {
    vertices: Vec<Vertex>,
    edges: Vec<HalfEdge>,
    faces: Vec<Face>,
    options: MeshOptions,
}

impl DelaunayMesh {
    /// Create an empty mesh with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mesh with explicit options
    pub fn with_options(options: MeshOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    #[inline]
    pub fn options(&self) -> &MeshOptions {
        &self.options
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn edges(&self) -> &[HalfEdge] {
        &self.edges
    }

    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Drop all vertices, edges and faces
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.faces.clear();
    }

    /// Get a vertex by id, `None` if out of range
    #[inline]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.0)
    }

    /// Get a half-edge by id, `None` if out of range
    #[inline]
    pub fn edge(&self, id: EdgeId) -> Option<&HalfEdge> {
        self.edges.get(id.0)
    }

    /// Get a face by id, `None` if out of range
    #[inline]
    pub fn face(&self, id: FaceId) -> Option<&Face> {
        self.faces.get(id.0)
    }

    #[inline]
    pub(crate) fn position(&self, v: VertexId) -> DVec2 {
        self.vertices[v.0].position()
    }

    /// Origin vertex of a half-edge
    #[inline]
    pub fn origin(&self, e: EdgeId) -> VertexId {
        self.edges[e.0].vert
    }

    /// Target vertex of a half-edge, `vert(next(e))`
    #[inline]
    pub fn target(&self, e: EdgeId) -> VertexId {
        self.edges[self.edges[e.0].next.0].vert
    }

    /// The three half-edges of a face, starting at the face's entry edge
    pub fn face_edges(&self, f: FaceId) -> [EdgeId; 3] {
        let e0 = self.faces[f.0].edge;
        let e1 = self.edges[e0.0].next;
        let e2 = self.edges[e1.0].next;
        [e0, e1, e2]
    }

    /// The three vertices of a face in counter-clockwise order
    pub fn face_vertices(&self, f: FaceId) -> [VertexId; 3] {
        self.face_edges(f).map(|e| self.edges[e.0].vert)
    }

    /// The three corner positions of a face
    pub fn face_positions(&self, f: FaceId) -> [DVec2; 3] {
        self.face_vertices(f).map(|v| self.position(v))
    }

    /// Length of the segment covered by a half-edge
    pub fn edge_length(&self, e: EdgeId) -> f64 {
        self.position(self.origin(e))
            .distance(self.position(self.target(e)))
    }

    /// Iterate over half-edges with no opposite
    pub fn boundary_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_boundary())
            .map(|(i, _)| EdgeId(i))
    }

    /// Number of half-edges on the boundary
    pub fn boundary_edge_count(&self) -> usize {
        self.boundary_edges().count()
    }

    /// Number of half-edges that have an opposite
    pub fn interior_edge_count(&self) -> usize {
        self.edges.len() - self.boundary_edge_count()
    }

    /// All vertex positions, indexed like the vertex array
    pub fn positions(&self) -> Vec<DVec2> {
        self.vertices.iter().map(Vertex::position).collect()
    }

    /// All faces as vertex index triples, indexed like the face array
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        (0..self.faces.len())
            .map(|f| self.face_vertices(FaceId(f)).map(VertexId::index))
            .collect()
    }

    /// Walk the outgoing edges of an interior vertex counter-clockwise
    ///
    /// Returns `None` if the vertex does not exist, has no edge, or touches
    /// the boundary.
    pub fn one_ring(&self, v: VertexId) -> Option<OneRing> {
        let start = self.vertex(v)?.edge?;
        let mut ring = OneRing {
            vertices: Vec::new(),
            edges: Vec::new(),
        };

        let mut e = start;
        for _ in 0..self.edges.len() {
            ring.vertices.push(self.target(e));
            ring.edges.push(e);

            // prev(e) comes into v; its opposite leaves v in the next triangle
            let prev = self.edges[self.edges[e.0].next.0].next;
            e = self.edges[prev.0].oppo?;
            if e == start {
                return Some(ring);
            }
        }

        None
    }

    /// Check whether a vertex touches the boundary
    pub fn is_boundary_vertex(&self, v: VertexId) -> bool {
        self.vertex(v).and_then(|vert| vert.edge).is_some() && self.one_ring(v).is_none()
    }
}
