//! Incremental 2D Delaunay triangulation on a half-edge mesh
//!
//! Points are inserted one at a time into a seed triangle that encloses the
//! input, each insertion splits the containing triangle and edge flips
//! restore the empty-circumcircle property. The result can be rebuilt from a
//! face list, trimmed of long boundary slivers, relaxed with Lloyd's
//! algorithm and turned into render buffers.
//!
//! # Quick Start
//!
//! ```rust
//! use delaunay_mesh2d::*;
//!
//! // 300 random points in [-5, 5]², boundary cleanup at 2x the mean edge length
//! let config = TriangulationConfigBuilder::new()
//!     .seed(42)
//!     .build().unwrap();
//!
//! let triangulation = Triangulation::generate(config).unwrap();
//! assert!(triangulation.mesh().check_all_edges());
//!
//! // Generate buffers for rendering
//! let data = generate_render_data(triangulation.mesh(), &BasicColorMapper);
//! println!("Generated {} triangles", data.triangle_count());
//! ```
//!
//! Working with the mesh directly:
//!
//! ```rust
//! use delaunay_mesh2d::*;
//!
//! let points = generation::generate_square_points(300, 5.0, 1);
//! let mut mesh = DelaunayMesh::new();
//! mesh.init_mesh(&points);
//!
//! let threshold = 2.0 * mesh.average_edge_length();
//! mesh.remove_bounding_faces_with_long_edge(threshold);
//! assert!(mesh.check_all_edges());
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-vertex lookups using KD-tree
//! - `serde`: Enables serialization support for configuration, meshes and render data

// Modules
pub mod error;
pub mod config;
pub mod predicates;
pub mod mesh;
pub mod cell;
pub mod generation;
pub mod triangulation;
pub mod render;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{DelaunayError, Result};
pub use config::{TriangulationConfig, TriangulationConfigBuilder};
pub use mesh::{DelaunayMesh, EdgeId, Face, FaceId, HalfEdge, MeshOptions, OneRing, Vertex, VertexId};
pub use cell::VoronoiCell;
pub use triangulation::Triangulation;
pub use render::{
    generate_render_data, generate_render_data_with_highlight, BasicColorMapper, ColorMapper,
    CustomColorMapper, MeshElement, RenderColor, RenderData,
};
pub use generation::LloydOptions;

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
