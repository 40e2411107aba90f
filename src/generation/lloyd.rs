//! Lloyd's Relaxation for uniform point distribution
//!
//! Each iteration moves every interior vertex of the mesh to the centroid of
//! its Voronoi cell and triangulates the moved points again. Boundary
//! vertices stay where they are, so the hull of the point set is preserved.

use std::time::Instant;

use crate::mesh::DelaunayMesh;

/// Options for Lloyd's relaxation algorithm
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LloydOptions {
    /// Maximum number of iterations to run
    pub max_iterations: usize,
    /// Stop when the largest displacement of an iteration is below this
    /// distance. Set to 0.0 to always run every iteration.
    pub convergence_threshold: f64,
}

impl Default for LloydOptions {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            convergence_threshold: 0.01,
        }
    }
}

/// Apply a fixed number of Lloyd iterations to the mesh
///
/// Returns the number of iterations that were run.
///
/// # Example
///
/// ```rust
/// use delaunay_mesh2d::*;
///
/// let points = generation::generate_square_points(100, 5.0, 7);
/// let mut mesh = DelaunayMesh::new();
/// mesh.init_mesh(&points);
///
/// let iterations = generation::lloyd_relaxation(&mut mesh, 3);
/// assert!(iterations <= 3);
/// assert!(mesh.check_all_edges());
/// ```
pub fn lloyd_relaxation(mesh: &mut DelaunayMesh, iterations: usize) -> usize {
    let options = LloydOptions {
        max_iterations: iterations,
        ..Default::default()
    };
    lloyd_relaxation_with_options(mesh, options)
}

/// Apply Lloyd's relaxation with custom options
///
/// The mesh is rebuilt by `init_mesh` on every iteration, so faces removed by
/// an earlier boundary cleanup come back. Run the cleanup afterwards.
pub fn lloyd_relaxation_with_options(mesh: &mut DelaunayMesh, options: LloydOptions) -> usize {
    let total_start = Instant::now();

    log::info!(
        "[Lloyd] Starting: {} vertices, max {} iterations, threshold {:.4}",
        mesh.vertex_count(),
        options.max_iterations,
        options.convergence_threshold
    );

    let mut iterations_run = 0;
    let mut converged = false;

    for iteration in 0..options.max_iterations {
        let iter_start = Instant::now();
        let max_displacement = mesh.move_vertices_to_voronoi_centers();
        iterations_run = iteration + 1;

        log::debug!(
            "[Lloyd] Iter {}: {} faces, total={:?}, max_disp={:.4}",
            iterations_run,
            mesh.face_count(),
            iter_start.elapsed(),
            max_displacement
        );

        if max_displacement < options.convergence_threshold || max_displacement == 0.0 {
            converged = true;
            log::info!(
                "[Lloyd] Converged at iteration {} (max_disp {:.4} < threshold {:.4})",
                iterations_run,
                max_displacement,
                options.convergence_threshold
            );
            break;
        }
    }

    log::info!(
        "[Lloyd] Finished: {} iterations (of max {}), converged={}, total={:?}",
        iterations_run,
        options.max_iterations,
        converged,
        total_start.elapsed()
    );

    iterations_run
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::points::generate_square_points;

    /// Coefficient of variation of nearest-neighbour distances
    fn spacing_spread(mesh: &DelaunayMesh) -> f64 {
        let points = mesh.positions();
        let nearest: Vec<f64> = points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                points
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, q)| p.distance(*q))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();
        let mean = nearest.iter().sum::<f64>() / nearest.len() as f64;
        let variance =
            nearest.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / nearest.len() as f64;
        variance.sqrt() / mean
    }

    #[test]
    fn test_lloyd_relaxation() {
        let points = generate_square_points(200, 5.0, 42);
        let mut mesh = DelaunayMesh::new();
        mesh.init_mesh(&points);
        let before = spacing_spread(&mesh);

        let options = LloydOptions {
            max_iterations: 5,
            convergence_threshold: 0.0,
        };
        let iterations = lloyd_relaxation_with_options(&mut mesh, options);
        assert_eq!(iterations, 5);

        // Points become more evenly spaced
        let after = spacing_spread(&mesh);
        assert!(after < before, "spread {} -> {}", before, after);
        assert!(mesh.check_all_edges());
    }

    #[test]
    fn test_lloyd_relaxation_determinism() {
        let points = generate_square_points(80, 5.0, 12345);

        let mut mesh1 = DelaunayMesh::new();
        mesh1.init_mesh(&points);
        lloyd_relaxation(&mut mesh1, 2);

        let mut mesh2 = DelaunayMesh::new();
        mesh2.init_mesh(&points);
        lloyd_relaxation(&mut mesh2, 2);

        assert_eq!(mesh1.positions(), mesh2.positions());
        assert_eq!(mesh1.triangles(), mesh2.triangles());
    }

    #[test]
    fn test_lloyd_converges_early() {
        let points = generate_square_points(100, 5.0, 3);
        let mut mesh = DelaunayMesh::new();
        mesh.init_mesh(&points);

        // Any iteration moves less than this
        let options = LloydOptions {
            max_iterations: 10,
            convergence_threshold: 1000.0,
        };
        assert_eq!(lloyd_relaxation_with_options(&mut mesh, options), 1);
    }

    #[test]
    fn test_lloyd_zero_iterations() {
        let points = generate_square_points(50, 5.0, 1);
        let mut mesh = DelaunayMesh::new();
        mesh.init_mesh(&points);
        let positions = mesh.positions();

        assert_eq!(lloyd_relaxation(&mut mesh, 0), 0);
        assert_eq!(mesh.positions(), positions);
    }

    #[test]
    fn test_lloyd_options_default() {
        let options = LloydOptions::default();
        assert_eq!(options.max_iterations, 5);
        assert!((options.convergence_threshold - 0.01).abs() < 1e-12);
    }
}
