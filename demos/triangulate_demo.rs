//! Demonstration of the basic triangulation workflow
//!
//! Scatters 300 points in [-5, 5]², triangulates them, strips long boundary
//! slivers and verifies the result.

use delaunay_mesh2d::*;

fn main() -> Result<()> {
    println!("Delaunay Triangulation Example");
    println!("==============================\n");

    let config = TriangulationConfigBuilder::new()
        .seed(42)
        .cleanup_ratio(None)?
        .build()?;

    println!("Configuration:");
    println!("  Seed: {}", config.seed);
    println!("  Points: {}", config.point_count);
    println!("  Square: [-{0}, {0}]^2", config.half_extent);
    println!("  Seed margin: {}", config.seed_margin);
    println!();

    let points = generation::generate_square_points(config.point_count, config.half_extent, config.seed);
    let mut mesh = DelaunayMesh::with_options(config.mesh_options());
    mesh.init_mesh(&points);

    println!("Initial mesh:");
    println!("  Vertices: {}", mesh.vertex_count());
    println!("  Faces: {}", mesh.face_count());
    println!("  Boundary edges: {}", mesh.boundary_edge_count());
    println!("  Delaunay: {}", mesh.check_all_edges());

    let average = mesh.average_edge_length();
    let removed = mesh.remove_bounding_faces_with_long_edge(2.0 * average);

    println!("\nBoundary cleanup (threshold {:.4}):", 2.0 * average);
    println!("  Removed faces: {}", removed);
    println!("  Vertices: {}", mesh.vertex_count());
    println!("  Faces: {}", mesh.face_count());
    println!("  Boundary edges: {}", mesh.boundary_edge_count());

    mesh.check_topology()?;
    println!("  Topology: ok");
    println!("  Delaunay: {}", mesh.check_all_edges());

    // Round-trip through a plain face list
    let mut copy = DelaunayMesh::new();
    copy.rebuild_from_faces(&mesh.positions(), &mesh.triangles())?;
    println!("\nRebuilt copy: {} faces, {} interior half-edges", copy.face_count(), copy.interior_edge_count());

    Ok(())
}
