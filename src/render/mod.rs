//! Render data generation for DelaunayMesh
//!
//! Produces engine-agnostic buffers for drawing a triangulation as points,
//! filled triangles and wireframe segments.

mod colors;

pub use colors::{BasicColorMapper, ColorMapper, CustomColorMapper, MeshElement, RenderColor};

use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::mesh::{DelaunayMesh, EdgeId, VertexId};

/// Engine-agnostic render buffers
///
/// Positions are narrowed to `f32`, the usual vertex buffer precision.
/// `indices` refers into `points`, three per triangle.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderData {
    /// Vertex positions
    pub points: Vec<[f32; 2]>,
    /// One color per point
    pub point_colors: Vec<RenderColor>,
    /// Triangle indices
    pub indices: Vec<u32>,
    /// Segment end points, one entry per undirected mesh edge
    pub lines: Vec<[[f32; 2]; 2]>,
    /// One color per segment
    pub line_colors: Vec<RenderColor>,
}

impl RenderData {
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Generate render data with colors from the mapper
///
/// # Example
///
/// ```
/// use delaunay_mesh2d::*;
///
/// let mut mesh = DelaunayMesh::new();
/// mesh.init_mesh(&[DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0), DVec2::new(0.0, 1.0)]);
///
/// let data = generate_render_data(&mesh, &BasicColorMapper);
/// assert_eq!(data.triangle_count(), 1);
/// assert_eq!(data.line_count(), 3);
/// ```
pub fn generate_render_data<C>(mesh: &DelaunayMesh, color_mapper: &C) -> RenderData
where
    C: ColorMapper<MeshElement>,
{
    generate_render_data_with_highlight(mesh, color_mapper, None, [0.0, 0.0, 0.0, 1.0])
}

/// Generate render data, drawing some edges in a highlight color
///
/// A segment is highlighted if either of its half-edges is listed. Pass the
/// result of `non_delaunay_edges` to make violations stand out.
pub fn generate_render_data_with_highlight<C>(
    mesh: &DelaunayMesh,
    color_mapper: &C,
    highlighted_edges: Option<&[EdgeId]>,
    highlight_color: RenderColor,
) -> RenderData
where
    C: ColorMapper<MeshElement>,
{
    let mut data = RenderData::default();

    let highlighted: HashSet<EdgeId> = highlighted_edges
        .map(|edges| edges.iter().copied().collect())
        .unwrap_or_default();

    let point_color = color_mapper.map_color(&MeshElement::Point);
    for vertex in mesh.vertices() {
        data.points.push(narrow(vertex.position()));
        data.point_colors.push(point_color);
    }

    for tri in mesh.triangles() {
        data.indices.extend(tri.iter().map(|&v| v as u32));
    }

    for (i, edge) in mesh.edges().iter().enumerate() {
        let e = EdgeId(i);
        // Interior segments are drawn once, from the lower half-edge id
        let element = match edge.oppo {
            Some(o) if o < e => continue,
            Some(_) => MeshElement::InteriorEdge,
            None => MeshElement::BoundaryEdge,
        };

        let is_highlighted =
            highlighted.contains(&e) || edge.oppo.is_some_and(|o| highlighted.contains(&o));
        let color = if is_highlighted {
            highlight_color
        } else {
            color_mapper.map_color(&element)
        };

        data.lines.push([point(mesh, edge.vert), point(mesh, mesh.target(e))]);
        data.line_colors.push(color);
    }

    data
}

fn point(mesh: &DelaunayMesh, v: VertexId) -> [f32; 2] {
    narrow(mesh.vertices()[v.index()].position())
}

#[inline]
fn narrow(p: glam::DVec2) -> [f32; 2] {
    [p.x as f32, p.y as f32]
}
