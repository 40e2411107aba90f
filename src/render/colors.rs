//! Color mapping for mesh elements

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RGBA color type
pub type RenderColor = [f32; 4];

/// The kinds of primitives drawn for a mesh
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshElement {
    /// A vertex drawn as a point
    Point,
    /// A segment shared by two triangles
    InteriorEdge,
    /// A segment with a triangle on one side only
    BoundaryEdge,
}

/// Trait for mapping drawable elements to colors
pub trait ColorMapper<T> {
    /// Map an element to an RGBA color
    fn map_color(&self, element: &T) -> RenderColor;
}

/// Yellow points, white interior edges, red boundary edges
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicColorMapper;

impl ColorMapper<MeshElement> for BasicColorMapper {
    fn map_color(&self, element: &MeshElement) -> RenderColor {
        match element {
            MeshElement::Point => [1.0, 1.0, 0.0, 1.0],
            MeshElement::InteriorEdge => [1.0, 1.0, 1.0, 1.0],
            MeshElement::BoundaryEdge => [1.0, 0.0, 0.0, 1.0],
        }
    }
}

/// Color mapper with a configurable color per element kind
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CustomColorMapper {
    pub point: RenderColor,
    pub interior_edge: RenderColor,
    pub boundary_edge: RenderColor,
}

impl Default for CustomColorMapper {
    fn default() -> Self {
        let basic = BasicColorMapper;
        Self {
            point: basic.map_color(&MeshElement::Point),
            interior_edge: basic.map_color(&MeshElement::InteriorEdge),
            boundary_edge: basic.map_color(&MeshElement::BoundaryEdge),
        }
    }
}

impl ColorMapper<MeshElement> for CustomColorMapper {
    fn map_color(&self, element: &MeshElement) -> RenderColor {
        match element {
            MeshElement::Point => self.point,
            MeshElement::InteriorEdge => self.interior_edge,
            MeshElement::BoundaryEdge => self.boundary_edge,
        }
    }
}
