//! Moving vertices towards the centroids of their Voronoi cells

use glam::DVec2;

use super::{DelaunayMesh, VertexId};
use crate::generation::cell_for_vertex;
use crate::predicates::cross_z;

impl DelaunayMesh {
    /// Move every interior vertex to the centroid of its Voronoi cell
    ///
    /// A vertex only moves if the centroid lies strictly inside the fan of
    /// triangles around it; boundary vertices never move. The whole point
    /// set is then triangulated again with `init_mesh`, so any earlier
    /// boundary cleanup has to be repeated by the caller.
    ///
    /// Returns the largest distance a vertex moved.
    pub fn move_vertices_to_voronoi_centers(&mut self) -> f64 {
        let mut positions = self.positions();
        let mut max_displacement: f64 = 0.0;
        let mut moved = 0;

        for v in (0..self.vertices.len()).map(VertexId) {
            let Some(target) = cell_for_vertex(self, v).and_then(|cell| cell.centroid()) else {
                continue;
            };
            if !self.star_contains(v, target) {
                continue;
            }

            max_displacement = max_displacement.max(positions[v.0].distance(target));
            positions[v.0] = target;
            moved += 1;
        }

        log::debug!(
            "voronoi relaxation: moved {} of {} vertices, max displacement {:.6}",
            moved,
            positions.len(),
            max_displacement
        );

        self.init_mesh(&positions);
        max_displacement
    }

    /// Check whether `p` lies in the open star of `v`
    ///
    /// That is the interior of the fan of triangles around `v`: a point on a
    /// spoke between `v` and a neighbour counts, `v` itself and the outer
    /// ring do not.
    fn star_contains(&self, v: VertexId, p: DVec2) -> bool {
        let Some(ring) = self.one_ring(v) else {
            return false;
        };
        let center = self.position(v);
        if p == center {
            return false;
        }
        let n = ring.vertices.len();

        // Each triangle owns its leading spoke (center, a) but not the
        // trailing one, which belongs to the next triangle
        (0..n).any(|i| {
            let a = self.position(ring.vertices[i]);
            let b = self.position(ring.vertices[(i + 1) % n]);
            cross_z(center, a, p) >= 0.0 && cross_z(a, b, p) > 0.0 && cross_z(b, center, p) >= 0.0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::assert_invariants;
    use super::*;
    use crate::generation::generate_square_points;

    #[test]
    fn test_relaxation_keeps_boundary_vertices() {
        let points = generate_square_points(120, 5.0, 11);
        let mut mesh = DelaunayMesh::new();
        mesh.init_mesh(&points);

        let boundary: Vec<DVec2> = (0..mesh.vertex_count())
            .map(VertexId)
            .filter(|&v| mesh.is_boundary_vertex(v))
            .map(|v| mesh.position(v))
            .collect();
        let before = mesh.vertex_count();

        let displacement = mesh.move_vertices_to_voronoi_centers();
        assert!(displacement > 0.0);
        assert!(mesh.vertex_count() <= before);

        let after = mesh.positions();
        for p in boundary {
            assert!(after.contains(&p));
        }
        assert!(mesh.check_all_edges());
        assert_invariants(&mesh);
    }

    #[test]
    fn test_relaxation_without_interior_vertices() {
        let mut mesh = DelaunayMesh::new();
        mesh.init_mesh(&[DVec2::new(0.0, 0.0), DVec2::new(4.0, 0.0), DVec2::new(0.0, 3.0)]);

        assert_eq!(mesh.move_vertices_to_voronoi_centers(), 0.0);
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn test_star_contains() {
        let mut mesh = DelaunayMesh::new();
        mesh.init_mesh(&[
            DVec2::new(0.0, 0.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(1.0, 2.0),
            DVec2::new(1.0, 0.5),
        ]);
        let center = VertexId(3);

        assert!(mesh.star_contains(center, DVec2::new(1.0, 0.8)));
        assert!(!mesh.star_contains(center, DVec2::new(5.0, 5.0)));
        // Boundary vertices have no closed star
        assert!(!mesh.star_contains(VertexId(0), DVec2::new(0.5, 0.2)));
    }

    #[test]
    fn test_star_contains_points_on_spokes() {
        let mut mesh = DelaunayMesh::new();
        mesh.init_mesh(&[
            DVec2::new(0.0, 0.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(1.0, 2.0),
            DVec2::new(1.0, 0.5),
        ]);
        let center = VertexId(3);
        let c = mesh.position(center);

        // Strictly between the center and each neighbour
        for n in 0..3 {
            let spoke_mid = c.lerp(mesh.position(VertexId(n)), 0.5);
            assert!(mesh.star_contains(center, spoke_mid), "{:?}", spoke_mid);
        }

        // The center itself, a ring vertex and a point past it are outside
        assert!(!mesh.star_contains(center, c));
        assert!(!mesh.star_contains(center, DVec2::new(1.0, 2.0)));
        assert!(!mesh.star_contains(center, DVec2::new(1.0, 2.5)));
        // On the outer ring edge
        assert!(!mesh.star_contains(center, DVec2::new(1.0, 0.0)));
    }
}
