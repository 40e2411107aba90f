//! Triangulation Configuration and Builder
//!
//! This module provides configuration types for deterministic point cloud
//! triangulation runs.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{DelaunayError, Result};
use crate::generation::LloydOptions;
use crate::mesh::MeshOptions;

/// Largest point count the builder accepts
pub const MAX_POINT_COUNT: usize = 100_000;

/// Largest number of Lloyd iterations the builder accepts
pub const MAX_LLOYD_ITERATIONS: usize = 20;

/// Configuration for a triangulation run
///
/// The same configuration always produces the same mesh: point generation is
/// seeded and insertion follows generation order.
///
/// # Example
///
/// ```rust
/// use delaunay_mesh2d::*;
///
/// let config = TriangulationConfigBuilder::new()
///     .seed(42)
///     .point_count(500)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// // Config is serializable (with "serde" feature)
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: TriangulationConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangulationConfig {
    /// Random seed for point generation
    pub seed: u32,

    /// Number of points scattered in the square
    pub point_count: usize,

    /// Points are drawn uniformly from `[-half_extent, half_extent]²`
    pub half_extent: f64,

    /// Clearance between the point bounding box and the seed triangle
    pub seed_margin: f64,

    /// Boundary cleanup threshold as a multiple of the average edge length
    ///
    /// `None` keeps the full convex hull triangulation.
    pub cleanup_ratio: Option<f64>,

    /// Number of Lloyd's relaxation iterations run before cleanup
    ///
    /// - 0: Keep the random points (default)
    /// - 3-5: Noticeably more even spacing
    pub lloyd_iterations: usize,

    /// Stop relaxing once no vertex moves farther than this distance
    ///
    /// - 0.0: Disable early termination (run all iterations)
    pub lloyd_convergence: f64,
}

impl TriangulationConfig {
    /// Mesh-level options derived from this configuration
    pub fn mesh_options(&self) -> MeshOptions {
        MeshOptions {
            seed_margin: self.seed_margin,
            cleanup_ratio: self
                .cleanup_ratio
                .unwrap_or(MeshOptions::default().cleanup_ratio),
        }
    }

    /// Lloyd options derived from this configuration
    pub fn lloyd_options(&self) -> LloydOptions {
        LloydOptions {
            max_iterations: self.lloyd_iterations,
            convergence_threshold: self.lloyd_convergence,
        }
    }
}

impl Default for TriangulationConfig {
    fn default() -> Self {
        let mesh = MeshOptions::default();
        Self {
            seed: rand::random(),
            point_count: 300,
            half_extent: 5.0,
            seed_margin: mesh.seed_margin,
            cleanup_ratio: Some(mesh.cleanup_ratio),
            lloyd_iterations: 0,
            lloyd_convergence: LloydOptions::default().convergence_threshold,
        }
    }
}

/// Builder for creating TriangulationConfig with validation
///
/// # Example
///
/// ```rust
/// use delaunay_mesh2d::*;
///
/// // Use defaults
/// let config = TriangulationConfigBuilder::new().build().unwrap();
/// assert_eq!(config.point_count, 300);
///
/// // Customize
/// let config = TriangulationConfigBuilder::new()
///     .seed(12345)
///     .half_extent(10.0)
///     .unwrap()
///     .lloyd_iterations(3)
///     .unwrap()
///     .cleanup_ratio(None)
///     .unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(config.cleanup_ratio, None);
/// ```
#[derive(Debug, Clone)]
pub struct TriangulationConfigBuilder {
    seed: Option<u32>,
    point_count: usize,
    half_extent: f64,
    seed_margin: f64,
    cleanup_ratio: Option<f64>,
    lloyd_iterations: usize,
    lloyd_convergence: f64,
}

/// Reject zero, negative, infinite and NaN values
fn require_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DelaunayError::InvalidConfig(format!(
            "{} must be positive and finite (got {})",
            name, value
        )))
    }
}

impl TriangulationConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (generated from thread_rng)
    /// - point_count: 300
    /// - half_extent: 5.0
    /// - seed_margin: 100.0
    /// - cleanup_ratio: Some(2.0)
    /// - lloyd_iterations: 0
    /// - lloyd_convergence: 0.01
    pub fn new() -> Self {
        let defaults = MeshOptions::default();
        Self {
            seed: None,
            point_count: 300,
            half_extent: 5.0,
            seed_margin: defaults.seed_margin,
            cleanup_ratio: Some(defaults.cleanup_ratio),
            lloyd_iterations: 0,
            lloyd_convergence: LloydOptions::default().convergence_threshold,
        }
    }

    /// Set the random seed for point generation
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of generated points
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if count > 100,000
    pub fn point_count(mut self, count: usize) -> Result<Self> {
        if count > MAX_POINT_COUNT {
            return Err(DelaunayError::InvalidConfig(format!(
                "point count must be <= {} (got {})",
                MAX_POINT_COUNT, count
            )));
        }
        self.point_count = count;
        Ok(self)
    }

    /// Set the half side length of the sampling square
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless the value is positive and finite
    pub fn half_extent(mut self, half_extent: f64) -> Result<Self> {
        require_positive("half extent", half_extent)?;
        self.half_extent = half_extent;
        Ok(self)
    }

    /// Set the clearance of the seed triangle
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless the value is positive and finite
    pub fn seed_margin(mut self, margin: f64) -> Result<Self> {
        require_positive("seed margin", margin)?;
        self.seed_margin = margin;
        Ok(self)
    }

    /// Set the boundary cleanup ratio, or `None` to skip cleanup
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless a given ratio is positive and finite
    pub fn cleanup_ratio(mut self, ratio: Option<f64>) -> Result<Self> {
        if let Some(r) = ratio {
            require_positive("cleanup ratio", r)?;
        }
        self.cleanup_ratio = ratio;
        Ok(self)
    }

    /// Set the number of Lloyd's relaxation iterations
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if iterations > 20 (excessive and impractical)
    pub fn lloyd_iterations(mut self, iterations: usize) -> Result<Self> {
        if iterations > MAX_LLOYD_ITERATIONS {
            return Err(DelaunayError::InvalidConfig(format!(
                "Lloyd iterations must be <= {} (got {})",
                MAX_LLOYD_ITERATIONS, iterations
            )));
        }
        self.lloyd_iterations = iterations;
        Ok(self)
    }

    /// Set the convergence threshold for Lloyd's relaxation
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if threshold is negative or NaN
    pub fn lloyd_convergence(mut self, threshold: f64) -> Result<Self> {
        if !(threshold >= 0.0) {
            return Err(DelaunayError::InvalidConfig(format!(
                "Lloyd convergence threshold must be >= 0 (got {})",
                threshold
            )));
        }
        self.lloyd_convergence = threshold;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    pub fn build(self) -> Result<TriangulationConfig> {
        let seed = self.seed.unwrap_or_else(rand::random);

        Ok(TriangulationConfig {
            seed,
            point_count: self.point_count,
            half_extent: self.half_extent,
            seed_margin: self.seed_margin,
            cleanup_ratio: self.cleanup_ratio,
            lloyd_iterations: self.lloyd_iterations,
            lloyd_convergence: self.lloyd_convergence,
        })
    }
}

impl Default for TriangulationConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = TriangulationConfigBuilder::new().build().unwrap();
        assert_eq!(config.point_count, 300);
        assert_eq!(config.half_extent, 5.0);
        assert_eq!(config.seed_margin, 100.0);
        assert_eq!(config.cleanup_ratio, Some(2.0));
        assert_eq!(config.lloyd_iterations, 0);
    }

    #[test]
    fn test_default_matches_builder() {
        let a = TriangulationConfig::default();
        let b = TriangulationConfigBuilder::new().seed(a.seed).build().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_builder_custom() {
        let config = TriangulationConfigBuilder::new()
            .seed(42)
            .point_count(1000)
            .unwrap()
            .half_extent(2.5)
            .unwrap()
            .seed_margin(10.0)
            .unwrap()
            .cleanup_ratio(Some(3.0))
            .unwrap()
            .lloyd_iterations(4)
            .unwrap()
            .lloyd_convergence(0.0)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.point_count, 1000);
        assert_eq!(config.half_extent, 2.5);
        assert_eq!(config.cleanup_ratio, Some(3.0));
        assert_eq!(config.lloyd_options().max_iterations, 4);
        assert_eq!(config.lloyd_options().convergence_threshold, 0.0);
        assert_eq!(config.mesh_options().seed_margin, 10.0);
        assert_eq!(config.mesh_options().cleanup_ratio, 3.0);
    }

    #[test]
    fn test_mesh_options_without_cleanup() {
        let config = TriangulationConfigBuilder::new()
            .cleanup_ratio(None)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.mesh_options().cleanup_ratio, MeshOptions::default().cleanup_ratio);
    }

    #[test]
    fn test_builder_rejects_invalid_values() {
        assert!(TriangulationConfigBuilder::new().point_count(MAX_POINT_COUNT + 1).is_err());
        assert!(TriangulationConfigBuilder::new().lloyd_iterations(21).is_err());
        assert!(TriangulationConfigBuilder::new().lloyd_convergence(-0.1).is_err());
        assert!(TriangulationConfigBuilder::new().lloyd_convergence(f64::NAN).is_err());
        assert!(TriangulationConfigBuilder::new().half_extent(0.0).is_err());
        assert!(TriangulationConfigBuilder::new().half_extent(f64::INFINITY).is_err());
        assert!(TriangulationConfigBuilder::new().seed_margin(-5.0).is_err());
        assert!(TriangulationConfigBuilder::new().cleanup_ratio(Some(0.0)).is_err());

        match TriangulationConfigBuilder::new().lloyd_iterations(25) {
            Err(DelaunayError::InvalidConfig(msg)) => assert!(msg.contains("25")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serialization() {
        let config = TriangulationConfigBuilder::new()
            .seed(12345)
            .cleanup_ratio(None)
            .unwrap()
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let restored: TriangulationConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, restored);
    }
}
