//! Demonstration of render data generation

use delaunay_mesh2d::*;

fn main() -> Result<()> {
    let config = TriangulationConfigBuilder::new().seed(42).build()?;
    let triangulation = Triangulation::generate(config)?;
    let mesh = triangulation.mesh();

    let data = generate_render_data(mesh, &BasicColorMapper);

    println!("Render data:");
    println!("  Points: {}", data.point_count());
    println!("  Triangles: {}", data.triangle_count());
    println!("  Segments: {}", data.line_count());

    // Memory estimate
    let mem_points = data.points.len() * 8; // 2 floats * 4 bytes
    let mem_colors = (data.point_colors.len() + data.line_colors.len()) * 16;
    let mem_lines = data.lines.len() * 16;
    let mem_indices = data.indices.len() * 4;
    let total = mem_points + mem_colors + mem_lines + mem_indices;
    println!("  Total: {} bytes ({:.2} KB)", total, total as f32 / 1024.0);

    // Test custom colors
    let custom = CustomColorMapper {
        boundary_edge: [0.0, 0.6, 1.0, 1.0],
        ..Default::default()
    };
    let custom_data = generate_render_data(mesh, &custom);
    let boundary_segments = custom_data
        .line_colors
        .iter()
        .filter(|&&c| c == custom.boundary_edge)
        .count();
    println!("\nCustom colors: {} boundary segments drawn in {:?}", boundary_segments, custom.boundary_edge);

    let bad = mesh.non_delaunay_edges();
    let highlighted =
        generate_render_data_with_highlight(mesh, &BasicColorMapper, Some(&bad), [0.0, 1.0, 0.0, 1.0]);
    println!("Highlighted {} non-Delaunay half-edges in {} segments", bad.len(), highlighted.line_count());

    #[cfg(feature = "spatial-index")]
    {
        if let Some(v) = triangulation.find_nearest_vertex(DVec2::ZERO) {
            println!("Vertex nearest to the origin: {} at {:?}", v, mesh.vertices()[v].position());
        }
    }

    Ok(())
}
