//! Random point clouds in the plane
//!
//! Uniform samples in an axis-aligned square centred on the origin. The
//! generator is `ChaCha8Rng`, so a given seed yields the same cloud on every
//! platform.

use glam::DVec2;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generate `count` uniform points in `[-half_extent, half_extent]^2`
///
/// # Arguments
///
/// * `count` - Number of points to generate
/// * `half_extent` - Half the side length of the square
/// * `seed` - Random seed for deterministic output
///
/// # Example
///
/// ```rust
/// use delaunay_mesh2d::generation::generate_square_points;
///
/// let points = generate_square_points(300, 5.0, 42);
/// assert_eq!(points.len(), 300);
/// assert!(points.iter().all(|p| p.x.abs() <= 5.0 && p.y.abs() <= 5.0));
/// ```
pub fn generate_square_points(count: usize, half_extent: f64, seed: u32) -> Vec<DVec2> {
    if count == 0 {
        return Vec::new();
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
    (0..count)
        .map(|_| {
            let x: f64 = rng.gen_range(-1.0..1.0);
            let y: f64 = rng.gen_range(-1.0..1.0);
            DVec2::new(x, y) * half_extent
        })
        .collect()
}
