//! Mesh-editing collaborator contract
//!
//! The simplification pipeline never edits geometry itself. It drives an
//! implementation of [`MeshEditor`], which owns the working meshes and
//! applies each modifier as a committed, in-place edit.

use colcrate_core::{Point3d, Result};

/// Opaque reference to a mesh living inside a [`MeshEditor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(u64);

impl MeshHandle {
    pub fn new(id: u64) -> Self {
        MeshHandle(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// One face as read back from the editor
#[derive(Debug, Clone, PartialEq)]
pub struct EditorFace {
    /// Vertex indices in loop order
    pub indices: Vec<usize>,
    /// Positions of those vertices, same order
    pub positions: Vec<Point3d>,
}

impl EditorFace {
    pub fn is_triangle(&self) -> bool {
        self.indices.len() == 3
    }
}

/// Capability interface of the mesh-editing subsystem.
///
/// Every `apply_*` call mutates the mesh in place and commits before
/// returning. A call on a mesh the operation cannot handle (for instance one
/// with no faces left) fails with `Error::ModifierApply`.
pub trait MeshEditor {
    /// Create an empty mesh in the working context.
    fn new_mesh(&mut self) -> MeshHandle;

    /// Replace the mesh's geometry.
    fn set_geometry(
        &mut self,
        handle: MeshHandle,
        vertices: &[Point3d],
        faces: &[[usize; 3]],
    ) -> Result<()>;

    /// Merge vertices closer than `tolerance`.
    fn apply_weld(&mut self, handle: MeshHandle, tolerance: f64) -> Result<()>;

    /// Split edges whose face normals diverge by more than `angle` radians.
    fn apply_edge_split(&mut self, handle: MeshHandle, angle: f64) -> Result<()>;

    /// Merge near-coplanar faces and dissolve near-collinear vertices.
    fn apply_dissolve_decimate(&mut self, handle: MeshHandle, angle: f64) -> Result<()>;

    /// Split every polygon into triangles.
    fn apply_triangulate(&mut self, handle: MeshHandle) -> Result<()>;

    /// Current faces in storage order.
    fn read_faces(&self, handle: MeshHandle) -> Result<Vec<EditorFace>>;

    /// Remove every mesh from the working context. Existing handles become invalid.
    fn clear_all(&mut self);
}
