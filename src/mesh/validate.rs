//! Delaunay and topology checks

use super::{DelaunayMesh, EdgeId, FaceId, VertexId};
use crate::error::{DelaunayError, Result};
use crate::predicates::in_circumcircle;

impl DelaunayMesh {
    /// Interior half-edges whose two triangles violate the empty-circle rule
    ///
    /// For an edge shared by triangles `(v0, v1, v2)` and `(v1, v0, v3)` the
    /// edge is reported if `v3` lies inside the circumcircle of the first
    /// triangle or `v2` inside that of the second.
    pub fn non_delaunay_edges(&self) -> Vec<EdgeId> {
        (0..self.edges.len())
            .map(EdgeId)
            .filter(|&e0| {
                let Some(e3) = self.edges[e0.0].oppo else {
                    return false;
                };
                let e1 = self.edges[e0.0].next;
                let e2 = self.edges[e1.0].next;
                let e4 = self.edges[e3.0].next;
                let e5 = self.edges[e4.0].next;

                let p0 = self.position(self.edges[e0.0].vert);
                let p1 = self.position(self.edges[e1.0].vert);
                let p2 = self.position(self.edges[e2.0].vert);
                let p3 = self.position(self.edges[e5.0].vert);

                in_circumcircle(p0, p1, p2, p3) || in_circumcircle(p0, p3, p1, p2)
            })
            .collect()
    }

    /// Check the Delaunay property on every interior edge
    ///
    /// Each violating edge is logged at warn level. A mesh with no interior
    /// edges passes trivially.
    pub fn check_all_edges(&self) -> bool {
        let violations = self.non_delaunay_edges();
        for e in &violations {
            log::warn!(
                "edge {} ({} - {}) is not locally Delaunay",
                e.0,
                self.origin(*e).0,
                self.target(*e).0
            );
        }
        violations.is_empty()
    }

    /// Verify the half-edge invariants
    ///
    /// Checks index ranges, that every face is a 3-cycle whose edges point
    /// back at it, that opposites are mutual and run the other way, and that
    /// every vertex's entry edge actually leaves that vertex.
    ///
    /// # Errors
    ///
    /// Returns `TopologyViolation` describing the first broken invariant.
    pub fn check_topology(&self) -> Result<()> {
        let violation = |check: &'static str, element: usize, details: String| {
            Err(DelaunayError::TopologyViolation {
                check,
                element,
                details,
            })
        };

        for (i, edge) in self.edges.iter().enumerate() {
            if edge.vert.0 >= self.vertices.len()
                || edge.next.0 >= self.edges.len()
                || edge.face.0 >= self.faces.len()
                || edge.oppo.is_some_and(|o| o.0 >= self.edges.len())
            {
                return violation("index range", i, format!("{:?}", edge));
            }
        }

        for i in 0..self.edges.len() {
            let e = EdgeId(i);
            let edge = &self.edges[i];

            let third = self.edges[self.edges[edge.next.0].next.0].next;
            if third != e {
                return violation("closure", i, format!("next^3 is {}", third.0));
            }

            if self.edges[edge.next.0].face != edge.face {
                return violation("cycle face", i, "next edge belongs to another face".into());
            }

            if let Some(o) = edge.oppo {
                let back = self.edges[o.0].oppo;
                if back != Some(e) {
                    return violation("opposite symmetry", i, format!("oppo(oppo) is {:?}", back));
                }
                if self.edges[o.0].vert == edge.vert {
                    return violation("opposite direction", i, "edge and opposite share origin".into());
                }
                if self.target(o) != edge.vert {
                    return violation("opposite segment", i, "opposite covers another segment".into());
                }
            }
        }

        for f in 0..self.faces.len() {
            let edge = self.faces[f].edge;
            if edge.0 >= self.edges.len() {
                return violation("index range", f, format!("face edge {}", edge.0));
            }
            if self.edges[edge.0].face != FaceId(f) {
                return violation("face edge", f, "entry edge belongs to another face".into());
            }
        }

        for v in 0..self.vertices.len() {
            if let Some(edge) = self.vertices[v].edge {
                if edge.0 >= self.edges.len() || self.edges[edge.0].vert != VertexId(v) {
                    return violation("vertex edge", v, format!("entry edge {} does not leave vertex", edge.0));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn test_empty_mesh_is_valid() {
        let mesh = DelaunayMesh::new();
        assert!(mesh.check_all_edges());
        assert!(mesh.check_topology().is_ok());
    }

    #[test]
    fn test_detects_non_delaunay_diagonal() {
        // Thin rhombus split along its long diagonal
        let positions = [
            DVec2::new(0.0, 0.0),
            DVec2::new(2.0, -0.5),
            DVec2::new(4.0, 0.0),
            DVec2::new(2.0, 0.5),
        ];
        let mut mesh = DelaunayMesh::new();
        mesh.rebuild_from_faces(&positions, &[[0, 1, 2], [0, 2, 3]]).unwrap();

        assert!(mesh.check_topology().is_ok());
        assert!(!mesh.check_all_edges());
        assert_eq!(mesh.non_delaunay_edges().len(), 2);

        // The short diagonal is fine
        mesh.rebuild_from_faces(&positions, &[[0, 1, 3], [1, 2, 3]]).unwrap();
        assert!(mesh.check_all_edges());
    }

    #[test]
    fn test_inconsistent_orientation_stays_unpaired() {
        // Both triangles list the shared segment in the same direction, so
        // it is never paired and both edges stay on the boundary
        let positions = [DVec2::ZERO, DVec2::X, DVec2::Y, DVec2::new(1.0, 1.0)];
        let mut mesh = DelaunayMesh::new();
        mesh.rebuild_from_faces(&positions, &[[0, 1, 2], [1, 2, 3]]).unwrap();

        assert!(mesh.check_topology().is_ok());
        assert_eq!(mesh.interior_edge_count(), 0);
    }

    #[test]
    fn test_topology_violation_reports_check() {
        let mut mesh = DelaunayMesh::new();
        mesh.init_mesh(&[DVec2::ZERO, DVec2::new(2.0, 0.0), DVec2::new(0.0, 2.0)]);
        mesh.edges[0].next = EdgeId(2);

        match mesh.check_topology() {
            Err(DelaunayError::TopologyViolation { check, element, .. }) => {
                assert_eq!(check, "closure");
                assert_eq!(element, 0);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_vertex_edge_violation() {
        let mut mesh = DelaunayMesh::new();
        mesh.init_mesh(&[DVec2::ZERO, DVec2::new(2.0, 0.0), DVec2::new(0.0, 2.0)]);
        let wrong = mesh.vertices[1].edge;
        mesh.vertices[0].edge = wrong;

        assert!(matches!(
            mesh.check_topology(),
            Err(DelaunayError::TopologyViolation { check: "vertex edge", element: 0, .. })
        ));
    }
}
