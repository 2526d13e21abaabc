//! Mesh data structures and functionality

use crate::point::*;
use serde::{Deserialize, Serialize};

/// A triangle mesh with vertices and faces
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3d>,
    pub faces: Vec<[usize; 3]>,
}

/// A mesh whose faces are arbitrary polygons (index loops of length >= 3)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonMesh {
    pub vertices: Vec<Point3d>,
    pub faces: Vec<Vec<usize>>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3d>, faces: Vec<[usize; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Add a vertex to the mesh
    pub fn add_vertex(&mut self, vertex: Point3d) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: [usize; 3]) {
        self.faces.push(face);
    }

}

impl PolygonMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Positions of one face's loop, in loop order
    pub fn face_positions(&self, face: usize) -> Vec<Point3d> {
        self.faces[face].iter().map(|&i| self.vertices[i]).collect()
    }

    /// Unit normal of a face from its Newell normal, `None` if degenerate
    pub fn face_normal(&self, face: usize) -> Option<Vector3d> {
        newell_normal(&self.face_positions(face)).try_normalize(1e-12)
    }

    /// True when every face is a triangle
    pub fn is_triangulated(&self) -> bool {
        self.faces.iter().all(|f| f.len() == 3)
    }

    /// Drop vertices no face references, remapping face indices.
    pub fn compact(&mut self) {
        let mut remap = vec![usize::MAX; self.vertices.len()];
        let mut vertices = Vec::with_capacity(self.vertices.len());
        for face in &mut self.faces {
            for idx in face.iter_mut() {
                if remap[*idx] == usize::MAX {
                    remap[*idx] = vertices.len();
                    vertices.push(self.vertices[*idx]);
                }
                *idx = remap[*idx];
            }
        }
        self.vertices = vertices;
    }
}

impl From<TriangleMesh> for PolygonMesh {
    fn from(mesh: TriangleMesh) -> Self {
        Self {
            vertices: mesh.vertices,
            faces: mesh.faces.into_iter().map(|f| f.to_vec()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quad() -> PolygonMesh {
        PolygonMesh {
            vertices: vec![
                Point3d::new(0.0, 0.0, 0.0),
                Point3d::new(9.0, 9.0, 9.0),
                Point3d::new(1.0, 0.0, 0.0),
                Point3d::new(1.0, 1.0, 0.0),
                Point3d::new(0.0, 1.0, 0.0),
            ],
            faces: vec![vec![0, 2, 3, 4]],
        }
    }

    #[test]
    fn test_polygon_compact_drops_unused() {
        let mut mesh = quad();
        mesh.compact();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.faces[0], vec![0, 1, 2, 3]);
        assert_eq!(mesh.vertices[1], Point3d::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_polygon_face_normal() {
        let mesh = quad();
        assert_relative_eq!(mesh.face_normal(0).unwrap(), Vector3d::new(0.0, 0.0, 1.0));
        assert!(!mesh.is_triangulated());
    }

    #[test]
    fn test_from_triangle_mesh() {
        let tri = TriangleMesh::from_vertices_and_faces(
            vec![Point3d::origin(), Point3d::new(1.0, 0.0, 0.0), Point3d::new(0.0, 1.0, 0.0)],
            vec![[0, 1, 2]],
        );
        let poly = PolygonMesh::from(tri);
        assert_eq!(poly.faces, vec![vec![0, 1, 2]]);
        assert!(poly.is_triangulated());
    }
}
