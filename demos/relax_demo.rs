//! Demonstration of Lloyd's relaxation on a triangulation

use delaunay_mesh2d::*;

fn spacing(mesh: &DelaunayMesh) -> (f64, f64) {
    let cells = generation::generate_cells(mesh);
    let areas: Vec<f64> = cells.iter().map(|c| c.area()).collect();
    let mean = areas.iter().sum::<f64>() / areas.len().max(1) as f64;
    let var = areas.iter().map(|a| (a - mean).powi(2)).sum::<f64>() / areas.len().max(1) as f64;
    (mean, var.sqrt())
}

fn main() -> Result<()> {
    for iterations in [0, 1, 3, 5, 10] {
        let config = TriangulationConfigBuilder::new()
            .seed(7)
            .point_count(500)?
            .lloyd_iterations(iterations)?
            .lloyd_convergence(0.0)?
            .build()?;

        let triangulation = Triangulation::generate(config)?;
        let (mean, std_dev) = spacing(triangulation.mesh());

        println!(
            "{:>2} iterations: {} vertices, {} faces, cell area {:.4} +/- {:.4}, delaunay={}",
            iterations,
            triangulation.vertex_count(),
            triangulation.face_count(),
            mean,
            std_dev,
            triangulation.mesh().check_all_edges()
        );
    }

    Ok(())
}
