//! Triangle records to mesh

use colcrate_core::{TriangleMesh, TriangleRecord};

/// Build a mesh from one group of records.
///
/// Every record contributes three fresh vertices and one face, in record
/// order. Coincident points are left for the weld pass to merge, and
/// degenerate triangles are kept as they are.
pub fn build_mesh(records: &[TriangleRecord]) -> TriangleMesh {
    let mut mesh = TriangleMesh::new();
    mesh.vertices.reserve(records.len() * 3);
    mesh.faces.reserve(records.len());
    for record in records {
        let face = record.vertices.map(|p| mesh.add_vertex(p));
        mesh.add_face(face);
    }
    mesh
}
