//! Seeding, point location and insertion with edge-flip legalization

use glam::DVec2;

use super::{DelaunayMesh, EdgeId, Face, FaceId, HalfEdge, Vertex, VertexId};
use crate::predicates::{in_circumcircle, point_in_triangle};

/// Number of synthetic vertices in the seed triangle
const SEED_VERTEX_COUNT: usize = 3;

/// Axis-aligned bounding box of a non-empty point set
fn bounding_box(points: &[DVec2]) -> (DVec2, DVec2) {
    points.iter().fold((points[0], points[0]), |(min, max), &p| {
        (min.min(p), max.max(p))
    })
}

impl DelaunayMesh {
    /// Triangulate a point set from scratch
    ///
    /// Any previous content is discarded. A seed triangle enclosing every
    /// point (with `seed_margin` clearance) is created, every point is
    /// inserted in input order, and the mesh is then rebuilt without the seed
    /// vertices and the faces that touch them.
    ///
    /// Duplicate points and points that fall exactly on an existing edge are
    /// dropped. The existing mesh is always discarded first, so an empty input
    /// leaves the mesh empty rather than unchanged.
    pub fn init_mesh(&mut self, points: &[DVec2]) {
        self.clear();
        if points.is_empty() {
            return;
        }

        let (min, max) = bounding_box(points);
        let margin = self.options.seed_margin;
        self.seed_triangle(
            DVec2::new(min.x - margin, min.y - margin),
            DVec2::new(max.x + margin, min.y - margin),
            DVec2::new(0.5 * (min.x + max.x), max.y + margin),
        );

        let mut dropped = 0;
        for &p in points {
            if self.add_vertex(p).is_none() {
                dropped += 1;
            }
        }
        if dropped > 0 {
            log::debug!("init_mesh: {} of {} points could not be located", dropped, points.len());
        }

        self.remove_seed_vertices();
    }

    /// Replace the mesh with a single counter-clockwise triangle
    fn seed_triangle(&mut self, p0: DVec2, p1: DVec2, p2: DVec2) {
        self.vertices = [p0, p1, p2]
            .iter()
            .enumerate()
            .map(|(i, p)| Vertex {
                x: p.x,
                y: p.y,
                edge: Some(EdgeId(i)),
            })
            .collect();
        self.edges = (0..SEED_VERTEX_COUNT)
            .map(|i| HalfEdge {
                vert: VertexId(i),
                oppo: None,
                next: EdgeId((i + 1) % SEED_VERTEX_COUNT),
                face: FaceId(0),
            })
            .collect();
        self.faces = vec![Face { edge: EdgeId(0) }];
    }

    /// Drop the three seed vertices and every face that references them
    fn remove_seed_vertices(&mut self) {
        let positions: Vec<DVec2> = self.vertices[SEED_VERTEX_COUNT..]
            .iter()
            .map(Vertex::position)
            .collect();

        let triangles: Vec<[usize; 3]> = (0..self.faces.len())
            .map(|f| self.face_vertices(FaceId(f)))
            .filter(|vs| vs.iter().all(|v| v.0 >= SEED_VERTEX_COUNT))
            .map(|vs| vs.map(|v| v.0 - SEED_VERTEX_COUNT))
            .collect();

        self.rebuild_unchecked(&positions, &triangles);
    }

    /// Find the first face that strictly contains `p`
    ///
    /// Linear scan over all faces. Points on an edge or a vertex are inside no
    /// face and yield `None`.
    pub fn locate_face(&self, p: DVec2) -> Option<FaceId> {
        (0..self.faces.len()).map(FaceId).find(|&f| {
            let [v0, v1, v2] = self.face_positions(f);
            point_in_triangle(p, v0, v1, v2)
        })
    }

    /// Insert a point into the current triangulation
    ///
    /// The containing triangle is split into three and the Delaunay property
    /// is restored by flipping edges. Returns the id of the new vertex, or
    /// `None` (mesh unchanged) when no face strictly contains the point.
    pub fn add_vertex(&mut self, p: DVec2) -> Option<VertexId> {
        let Some(f0) = self.locate_face(p) else {
            log::debug!("add_vertex: no face contains ({}, {}), skipped", p.x, p.y);
            return None;
        };

        let [e0, e1, e2] = self.face_edges(f0);
        let [v0, v1, v2] = self.face_vertices(f0);

        let v3 = VertexId(self.vertices.len());
        let f1 = FaceId(self.faces.len());
        let f2 = FaceId(self.faces.len() + 1);
        let base = self.edges.len();
        let [e3, e4, e5, e6, e7, e8] = [0, 1, 2, 3, 4, 5].map(|i| EdgeId(base + i));

        self.vertices.push(Vertex {
            x: p.x,
            y: p.y,
            edge: Some(e4),
        });
        self.faces.push(Face { edge: e8 });
        self.faces.push(Face { edge: e6 });

        // f0 = (e0, e3, e4): v0 -> v1 -> v3
        // f1 = (e1, e7, e8): v1 -> v2 -> v3
        // f2 = (e2, e5, e6): v2 -> v0 -> v3
        let new_edges = [
            (v1, e8, e4, f0), // e3
            (v3, e5, e0, f0), // e4
            (v0, e4, e6, f2), // e5
            (v3, e7, e2, f2), // e6
            (v2, e6, e8, f1), // e7
            (v3, e3, e1, f1), // e8
        ];
        self.edges
            .extend(new_edges.iter().map(|&(vert, oppo, next, face)| HalfEdge {
                vert,
                oppo: Some(oppo),
                next,
                face,
            }));

        self.faces[f0.0].edge = e0;
        self.vertices[v0.0].edge = Some(e0);
        self.vertices[v1.0].edge = Some(e1);
        self.vertices[v2.0].edge = Some(e2);

        self.set_next_face(e0, e3, f0);
        self.set_next_face(e1, e7, f1);
        self.set_next_face(e2, e5, f2);

        self.legalize(vec![e0, e1, e2]);

        Some(v3)
    }

    #[inline]
    fn set_next_face(&mut self, e: EdgeId, next: EdgeId, face: FaceId) {
        let edge = &mut self.edges[e.0];
        edge.next = next;
        edge.face = face;
    }

    #[inline]
    fn set_vert_next(&mut self, e: EdgeId, vert: VertexId, next: EdgeId) {
        let edge = &mut self.edges[e.0];
        edge.vert = vert;
        edge.next = next;
    }

    /// Flip edges until every edge reachable from the stack is locally Delaunay
    fn legalize(&mut self, mut stack: Vec<EdgeId>) {
        while let Some(e) = stack.pop() {
            if let Some([far0, far1]) = self.flip_if_illegal(e) {
                stack.push(far0);
                stack.push(far1);
            }
        }
    }

    /// Flip `e0` if the vertex across it lies inside its triangle's circumcircle
    ///
    /// ```text
    ///         v2                     v2
    ///        /  \                   / | \
    ///      e2    e1              e2   |   e1
    ///      /  e0  \             /     |     \
    ///    v0 ------ v1   ==>   v0   e3 | e0   v1
    ///      \  e3  /             \     |     /
    ///      e4    e5              e4   |   e5
    ///        \  /                   \ | /
    ///         v3                     v3
    /// ```
    ///
    /// Returns the two far edges of the quad (`e4`, `e5`) when a flip happened.
    fn flip_if_illegal(&mut self, e0: EdgeId) -> Option<[EdgeId; 2]> {
        let e3 = self.edges[e0.0].oppo?;
        let e1 = self.edges[e0.0].next;
        let e2 = self.edges[e1.0].next;
        let e4 = self.edges[e3.0].next;
        let e5 = self.edges[e4.0].next;

        let v0 = self.edges[e0.0].vert;
        let v1 = self.edges[e1.0].vert;
        let v2 = self.edges[e2.0].vert;
        let v3 = self.edges[e5.0].vert;

        let f0 = self.edges[e0.0].face;
        let f1 = self.edges[e3.0].face;

        if !in_circumcircle(
            self.position(v0),
            self.position(v1),
            self.position(v2),
            self.position(v3),
        ) {
            return None;
        }

        log::trace!("flip edge {} ({} - {}) to ({} - {})", e0.0, v0.0, v1.0, v2.0, v3.0);

        // f0 = (e0, e5, e1): v2 -> v3 -> v1
        // f1 = (e3, e2, e4): v3 -> v2 -> v0
        self.set_vert_next(e0, v2, e5);
        self.edges[e1.0].next = e0;
        self.set_next_face(e2, e4, f1);

        self.set_vert_next(e3, v3, e2);
        self.edges[e4.0].next = e3;
        self.set_next_face(e5, e1, f0);

        self.faces[f0.0].edge = e0;
        self.faces[f1.0].edge = e3;

        self.vertices[v0.0].edge = Some(e4);
        self.vertices[v1.0].edge = Some(e1);
        self.vertices[v2.0].edge = Some(e2);
        self.vertices[v3.0].edge = Some(e5);

        Some([e4, e5])
    }
}
