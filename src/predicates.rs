//! Geometric predicates over 2D points
//!
//! Plain `f64` arithmetic throughout. Degenerate (collinear) input is reported
//! through `Option` rather than an error; callers decide what "no circle" means.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Circle described by its center and radius
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
}

/// Solve the 2x2 system by Cramer's rule
///
/// ```text
/// | a b | |s|   |w1|
/// | c d | |t| = |w2|
/// ```
///
/// Returns `None` when the determinant is exactly zero.
pub fn solve_linear_2x2(a: f64, b: f64, c: f64, d: f64, w1: f64, w2: f64) -> Option<(f64, f64)> {
    let det = a * d - b * c;
    if det == 0.0 {
        return None;
    }
    let inv = 1.0 / det;
    let s = (d * w1 - b * w2) * inv;
    let t = (-c * w1 + a * w2) * inv;
    Some((s, t))
}

/// Compute the circle passing through three points
///
/// The center is the intersection of the perpendicular bisectors of
/// `(p0, p1)` and `(p1, p2)`. Returns `None` for collinear points.
pub fn circumcircle(p0: DVec2, p1: DVec2, p2: DVec2) -> Option<Circle> {
    let a = p0.x - p1.x;
    let b = p0.y - p1.y;
    let c = p1.x - p2.x;
    let d = p1.y - p2.y;

    let b0 = 0.5 * (p0.length_squared() - p1.length_squared());
    let b1 = 0.5 * (p1.length_squared() - p2.length_squared());

    let (cx, cy) = solve_linear_2x2(a, b, c, d, b0, b1)?;
    let center = DVec2::new(cx, cy);
    let radius = (p0 - center).length_squared().sqrt();

    Some(Circle { center, radius })
}

/// Test whether `q` lies strictly inside the circumcircle of `(p0, p1, p2)`
///
/// A collinear triple has no finite circumcircle; it is treated as a circle of
/// infinite radius, so the answer is `true`. During legalization this forces
/// the degenerate configuration to be flipped away.
pub fn in_circumcircle(p0: DVec2, p1: DVec2, p2: DVec2, q: DVec2) -> bool {
    match circumcircle(p0, p1, p2) {
        Some(circle) => (q - circle.center).length_squared() < circle.radius * circle.radius,
        None => true,
    }
}

/// Z component of `(b - a) x (c - a)`
///
/// Positive when `a -> b -> c` turns counter-clockwise.
#[inline]
pub fn cross_z(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Test whether `p` lies strictly inside the CCW triangle `(v0, v1, v2)`
///
/// Open-triangle semantics: a point exactly on an edge or a corner is outside.
pub fn point_in_triangle(p: DVec2, v0: DVec2, v1: DVec2, v2: DVec2) -> bool {
    cross_z(v0, v1, p) > 0.0 && cross_z(v1, v2, p) > 0.0 && cross_z(v2, v0, p) > 0.0
}
