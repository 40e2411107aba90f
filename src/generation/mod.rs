//! Point generation and the triangulation pipeline
//!
//! Scatters seeded random points in a square, triangulates them, optionally
//! evens them out with Lloyd's relaxation and finally strips long boundary
//! slivers.

mod lloyd;
mod points;
mod voronoi;

pub use lloyd::{lloyd_relaxation, lloyd_relaxation_with_options, LloydOptions};
pub use points::generate_square_points;
pub use voronoi::{cell_for_vertex, generate_cells};

use glam::DVec2;
use std::time::Instant;

use crate::config::TriangulationConfig;
use crate::error::{DelaunayError, Result};
use crate::mesh::DelaunayMesh;

/// Triangulate a given point set with the configured post-processing
///
/// Runs `init_mesh`, then Lloyd's relaxation if `lloyd_iterations > 0`, then
/// boundary cleanup if `cleanup_ratio` is set. Point generation settings in
/// the config are ignored.
///
/// # Errors
///
/// Returns `GenerationFailed` if any coordinate is NaN or infinite.
pub fn build_mesh(points: &[DVec2], config: &TriangulationConfig) -> Result<DelaunayMesh> {
    if let Some((i, p)) = points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
        return Err(DelaunayError::GenerationFailed(format!(
            "point {} has a non-finite coordinate ({}, {})",
            i, p.x, p.y
        )));
    }

    let start = Instant::now();
    let mut mesh = DelaunayMesh::with_options(config.mesh_options());

    mesh.init_mesh(points);
    log::info!(
        "triangulated {} points: {} vertices, {} faces in {:?}",
        points.len(),
        mesh.vertex_count(),
        mesh.face_count(),
        start.elapsed()
    );

    if config.lloyd_iterations > 0 {
        lloyd_relaxation_with_options(&mut mesh, config.lloyd_options());
    }

    if config.cleanup_ratio.is_some() {
        mesh.cleanup_boundary();
    }

    if !points.is_empty() && mesh.face_count() == 0 {
        log::warn!("no triangles could be built from {} points", points.len());
    }

    Ok(mesh)
}

/// Generate points from the configuration and triangulate them
///
/// # Example
///
/// ```rust
/// use delaunay_mesh2d::*;
///
/// let config = TriangulationConfigBuilder::new().seed(42).build().unwrap();
/// let mesh = generation::generate_mesh(&config).unwrap();
///
/// assert!(mesh.face_count() > 0);
/// assert!(mesh.check_all_edges());
/// ```
pub fn generate_mesh(config: &TriangulationConfig) -> Result<DelaunayMesh> {
    let points = generate_square_points(config.point_count, config.half_extent, config.seed);
    build_mesh(&points, config)
}
