//! Rebuilding the half-edge graph from a triangle list, and boundary cleanup

use glam::DVec2;

use super::{DelaunayMesh, EdgeId, Face, FaceId, HalfEdge, Vertex, VertexId};
use crate::error::{DelaunayError, Result};

impl DelaunayMesh {
    /// Replace the mesh with the triangles `faces` over the points `positions`
    ///
    /// Each triangle becomes a counter-clockwise cycle of three half-edges in
    /// input order. Opposite edges are paired by looking, for every new edge
    /// `a -> b`, through the edges already leaving `b` for one that returns to
    /// `a`. Segments used by a single triangle stay on the boundary.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFace` if a triangle refers to a vertex outside
    /// `positions`; the mesh is left untouched in that case.
    ///
    /// # Example
    ///
    /// ```
    /// use delaunay_mesh2d::*;
    ///
    /// let positions = [
    ///     DVec2::new(0.0, 0.0),
    ///     DVec2::new(1.0, 0.0),
    ///     DVec2::new(1.0, 1.0),
    ///     DVec2::new(0.0, 1.0),
    /// ];
    /// let mut mesh = DelaunayMesh::new();
    /// mesh.rebuild_from_faces(&positions, &[[0, 1, 2], [0, 2, 3]]).unwrap();
    ///
    /// assert_eq!(mesh.face_count(), 2);
    /// assert_eq!(mesh.interior_edge_count(), 2);
    /// ```
    pub fn rebuild_from_faces(&mut self, positions: &[DVec2], faces: &[[usize; 3]]) -> Result<()> {
        for (face, tri) in faces.iter().enumerate() {
            if let Some(&vertex) = tri.iter().find(|&&v| v >= positions.len()) {
                return Err(DelaunayError::InvalidFace {
                    face,
                    vertex,
                    vertex_count: positions.len(),
                });
            }
        }

        self.rebuild_unchecked(positions, faces);
        Ok(())
    }

    /// Rebuild from triangles whose indices are known to be in range
    pub(crate) fn rebuild_unchecked(&mut self, positions: &[DVec2], faces: &[[usize; 3]]) {
        let mut vertices: Vec<Vertex> = positions.iter().map(|p| Vertex::new(p.x, p.y)).collect();
        let mut edges: Vec<HalfEdge> = Vec::with_capacity(faces.len() * 3);
        let mut new_faces: Vec<Face> = Vec::with_capacity(faces.len());

        // Half-edges created so far, grouped by origin vertex
        let mut outgoing: Vec<Vec<EdgeId>> = vec![Vec::new(); vertices.len()];

        for (fi, tri) in faces.iter().enumerate() {
            let face = FaceId(fi);
            let base = edges.len();

            for k in 0..3 {
                let from = tri[k];
                let to = tri[(k + 1) % 3];
                let e = EdgeId(base + k);

                let oppo = outgoing[to]
                    .iter()
                    .rev()
                    .copied()
                    .find(|&o| edges[edges[o.0].next.0].vert.0 == from);
                if let Some(o) = oppo {
                    edges[o.0].oppo = Some(e);
                }

                edges.push(HalfEdge {
                    vert: VertexId(from),
                    oppo,
                    next: EdgeId(base + (k + 1) % 3),
                    face,
                });
            }

            for k in 0..3 {
                let e = EdgeId(base + k);
                outgoing[tri[k]].push(e);
                if vertices[tri[k]].edge.is_none() {
                    vertices[tri[k]].edge = Some(e);
                }
            }
            new_faces.push(Face {
                edge: EdgeId(base),
            });
        }

        log::debug!(
            "rebuild: {} vertices, {} faces, {} half-edges",
            vertices.len(),
            new_faces.len(),
            edges.len()
        );

        self.vertices = vertices;
        self.edges = edges;
        self.faces = new_faces;
    }

    /// Mean length of all half-edges
    ///
    /// Each interior segment is counted twice, once per direction. Returns
    /// `0.0` for a mesh without edges.
    pub fn average_edge_length(&self) -> f64 {
        if self.edges.is_empty() {
            return 0.0;
        }
        let sum: f64 = (0..self.edges.len()).map(|e| self.edge_length(EdgeId(e))).sum();
        sum / self.edges.len() as f64
    }

    /// Peel off boundary faces that have an edge longer than `max_length`
    ///
    /// Faces are removed layer by layer: a face counts as boundary once one
    /// of its edges has no opposite or its opposite belongs to a face that was
    /// already removed. Iteration stops after a full pass removes nothing.
    /// Vertices left without a face are dropped and the mesh is rebuilt.
    ///
    /// Returns the number of faces removed.
    pub fn remove_bounding_faces_with_long_edge(&mut self, max_length: f64) -> usize {
        let mut removed = vec![false; self.faces.len()];
        let mut removed_count = 0;

        loop {
            let mut updated = false;
            for f in 0..self.faces.len() {
                if removed[f] {
                    continue;
                }
                let edges = self.face_edges(FaceId(f));

                let on_boundary = edges.iter().any(|e| match self.edges[e.0].oppo {
                    None => true,
                    Some(o) => removed[self.edges[o.0].face.0],
                });
                if !on_boundary {
                    continue;
                }

                if edges.iter().all(|&e| self.edge_length(e) <= max_length) {
                    continue;
                }

                removed[f] = true;
                removed_count += 1;
                updated = true;
            }
            if !updated {
                break;
            }
        }

        if removed_count == 0 {
            return 0;
        }

        let mut used = vec![false; self.vertices.len()];
        for f in (0..self.faces.len()).filter(|&f| !removed[f]) {
            for v in self.face_vertices(FaceId(f)) {
                used[v.0] = true;
            }
        }

        let mut new_index: Vec<Option<usize>> = vec![None; self.vertices.len()];
        let mut positions = Vec::new();
        for (i, vertex) in self.vertices.iter().enumerate() {
            if used[i] {
                new_index[i] = Some(positions.len());
                positions.push(vertex.position());
            }
        }

        let triangles: Vec<[usize; 3]> = (0..self.faces.len())
            .filter(|&f| !removed[f])
            .filter_map(|f| {
                let [a, b, c] = self.face_vertices(FaceId(f));
                Some([new_index[a.0]?, new_index[b.0]?, new_index[c.0]?])
            })
            .collect();

        log::info!(
            "boundary cleanup (max edge {:.4}): removed {} faces, {} vertices remain",
            max_length,
            removed_count,
            positions.len()
        );

        self.rebuild_unchecked(&positions, &triangles);
        removed_count
    }

    /// Run boundary cleanup with `cleanup_ratio` times the average edge length
    ///
    /// Returns the number of faces removed.
    pub fn cleanup_boundary(&mut self) -> usize {
        let threshold = self.options.cleanup_ratio * self.average_edge_length();
        self.remove_bounding_faces_with_long_edge(threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::assert_invariants;
    use super::*;
    use crate::generation::generate_square_points;
    use std::collections::{BTreeSet, HashMap};

    /// Undirected segment set of the interior (paired) edges
    fn paired_segments(mesh: &DelaunayMesh) -> BTreeSet<(usize, usize)> {
        (0..mesh.edge_count())
            .map(EdgeId)
            .filter(|&e| mesh.edges()[e.0].oppo.is_some())
            .map(|e| {
                let (a, b) = (mesh.origin(e).0, mesh.target(e).0);
                (a.min(b), a.max(b))
            })
            .collect()
    }

    #[test]
    fn test_rebuild_square() {
        let positions = [
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 1.0),
        ];
        let mut mesh = DelaunayMesh::new();
        mesh.rebuild_from_faces(&positions, &[[0, 1, 2], [0, 2, 3]]).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.edge_count(), 6);
        assert_eq!(mesh.boundary_edge_count(), 4);

        // Edge 2 is 2 -> 0 in the first face, edge 3 is 0 -> 2 in the second
        assert_eq!(mesh.edges()[2].oppo, Some(EdgeId(3)));
        assert_eq!(mesh.edges()[3].oppo, Some(EdgeId(2)));
        assert!(mesh.vertices().iter().all(|v| v.edge.is_some()));
        assert_invariants(&mesh);
    }

    #[test]
    fn test_rebuild_rejects_out_of_range_vertex() {
        let mut mesh = DelaunayMesh::new();
        mesh.init_mesh(&[DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0), DVec2::new(0.0, 1.0)]);

        let result = mesh.rebuild_from_faces(&[DVec2::ZERO, DVec2::X], &[[0, 1, 2]]);
        assert_eq!(
            result,
            Err(DelaunayError::InvalidFace {
                face: 0,
                vertex: 2,
                vertex_count: 2
            })
        );
        // Unchanged
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn test_rebuild_leaves_unused_vertex_without_edge() {
        let positions = [DVec2::ZERO, DVec2::X, DVec2::Y, DVec2::new(5.0, 5.0)];
        let mut mesh = DelaunayMesh::new();
        mesh.rebuild_from_faces(&positions, &[[0, 1, 2]]).unwrap();

        assert_eq!(mesh.vertices()[3].edge, None);
        assert!(!mesh.is_boundary_vertex(VertexId(3)));
        assert_invariants(&mesh);
    }

    #[test]
    fn test_rebuild_round_trip_is_isomorphic() {
        let points = generate_square_points(120, 5.0, 7);
        let mut mesh = DelaunayMesh::new();
        mesh.init_mesh(&points);

        let mut copy = DelaunayMesh::new();
        copy.rebuild_from_faces(&mesh.positions(), &mesh.triangles()).unwrap();

        assert_eq!(copy.vertex_count(), mesh.vertex_count());
        assert_eq!(copy.face_count(), mesh.face_count());
        assert_eq!(copy.edge_count(), mesh.edge_count());
        assert_eq!(copy.boundary_edge_count(), mesh.boundary_edge_count());
        assert_eq!(paired_segments(&copy), paired_segments(&mesh));

        // Pairing matches face adjacency up to edge renumbering
        let adjacency = |m: &DelaunayMesh| -> HashMap<(usize, usize), Option<usize>> {
            (0..m.edge_count())
                .map(EdgeId)
                .map(|e| {
                    let face = m.edges()[e.0].oppo.map(|o| m.edges()[o.0].face.0);
                    ((m.origin(e).0, m.target(e).0), face)
                })
                .collect()
        };
        let face_of = |m: &DelaunayMesh| -> HashMap<usize, [usize; 3]> {
            m.triangles().into_iter().enumerate().collect()
        };
        let (a, b) = (adjacency(&mesh), adjacency(&copy));
        let (fa, fb) = (face_of(&mesh), face_of(&copy));
        for (segment, neighbour) in &a {
            let other = b[segment];
            assert_eq!(neighbour.map(|f| fa[&f]), other.map(|f| fb[&f]));
        }
        assert_invariants(&copy);
    }

    #[test]
    fn test_average_edge_length() {
        let mut mesh = DelaunayMesh::new();
        assert_eq!(mesh.average_edge_length(), 0.0);

        mesh.init_mesh(&[DVec2::new(0.0, 0.0), DVec2::new(4.0, 0.0), DVec2::new(0.0, 3.0)]);
        assert!((mesh.average_edge_length() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_remove_long_boundary_faces() {
        // A tight fan around (1, 0.5) plus a far-away vertex forming a sliver
        let positions = [
            DVec2::new(0.0, 0.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(1.0, 2.0),
            DVec2::new(1.0, 0.5),
            DVec2::new(20.0, 1.0),
        ];
        let mut mesh = DelaunayMesh::new();
        mesh.rebuild_from_faces(&positions, &[[0, 1, 3], [1, 2, 3], [2, 0, 3], [1, 4, 2]])
            .unwrap();
        assert_eq!(mesh.face_count(), 4);

        let removed = mesh.remove_bounding_faces_with_long_edge(5.0);
        assert_eq!(removed, 1);
        assert_eq!(mesh.face_count(), 3);
        assert_eq!(mesh.vertex_count(), 4);
        assert!(mesh.positions().iter().all(|p| p.x < 10.0));
        assert_invariants(&mesh);
    }

    #[test]
    fn test_remove_nothing_when_threshold_is_large() {
        let points = generate_square_points(60, 5.0, 3);
        let mut mesh = DelaunayMesh::new();
        mesh.init_mesh(&points);
        let faces = mesh.face_count();

        assert_eq!(mesh.remove_bounding_faces_with_long_edge(1e9), 0);
        assert_eq!(mesh.face_count(), faces);
    }

    #[test]
    fn test_removal_peels_layers() {
        // Strip of three triangles; every edge is long, so removal eats
        // inwards from the boundary until nothing is left
        let positions = [
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(20.0, 0.0),
            DVec2::new(5.0, 10.0),
            DVec2::new(15.0, 10.0),
        ];
        let mut mesh = DelaunayMesh::new();
        mesh.rebuild_from_faces(&positions, &[[0, 1, 3], [1, 4, 3], [1, 2, 4]])
            .unwrap();

        let removed = mesh.remove_bounding_faces_with_long_edge(1.0);
        assert_eq!(removed, 3);
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
    }

    #[test]
    fn test_cleanup_never_increases_face_count() {
        for seed in 0..5 {
            let points = generate_square_points(150, 5.0, seed);
            let mut mesh = DelaunayMesh::new();
            mesh.init_mesh(&points);
            let before = mesh.face_count();

            let removed = mesh.cleanup_boundary();
            assert_eq!(mesh.face_count(), before - removed);
            assert!(mesh.check_all_edges());
            assert_invariants(&mesh);
        }
    }
}
