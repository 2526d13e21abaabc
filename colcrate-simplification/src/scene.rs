//! In-process mesh editor
//!
//! [`EditorScene`] keeps a set of polygon meshes behind [`MeshHandle`]s and
//! applies the modifiers from [`crate::modifiers`] to them on request.

use crate::editor::{EditorFace, MeshEditor, MeshHandle};
use crate::modifiers::{DissolveDecimate, EdgeSplit, Modifier, Triangulate, Weld};
use colcrate_core::{Error, Point3d, PolygonMesh, Result};
use std::collections::HashMap;
use tracing::debug;

/// Working context holding every mesh created since the last `clear_all`
#[derive(Debug, Default)]
pub struct EditorScene {
    meshes: HashMap<MeshHandle, PolygonMesh>,
    next_id: u64,
}

impl EditorScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow a mesh for inspection
    pub fn mesh(&self, handle: MeshHandle) -> Option<&PolygonMesh> {
        self.meshes.get(&handle)
    }

    /// Number of live meshes
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    fn apply<M: Modifier>(&mut self, handle: MeshHandle, modifier: M) -> Result<()> {
        let mesh = self
            .meshes
            .get_mut(&handle)
            .ok_or_else(|| unknown_handle(M::NAME, handle))?;
        let stats = modifier.apply(mesh)?;
        debug!(mesh = handle.id(), modifier = M::NAME, %stats, "modifier applied");
        Ok(())
    }
}

fn unknown_handle(modifier: &'static str, handle: MeshHandle) -> Error {
    Error::ModifierApply {
        modifier,
        reason: format!("no mesh with handle {}", handle.id()),
    }
}

impl MeshEditor for EditorScene {
    fn new_mesh(&mut self) -> MeshHandle {
        let handle = MeshHandle::new(self.next_id);
        self.next_id += 1;
        self.meshes.insert(handle, PolygonMesh::new());
        handle
    }

    fn set_geometry(
        &mut self,
        handle: MeshHandle,
        vertices: &[Point3d],
        faces: &[[usize; 3]],
    ) -> Result<()> {
        const OPERATION: &str = "SetGeometry";
        if let Some(face) = faces.iter().find(|f| f.iter().any(|&i| i >= vertices.len())) {
            return Err(Error::ModifierApply {
                modifier: OPERATION,
                reason: format!(
                    "face {:?} references a vertex beyond {}",
                    face,
                    vertices.len()
                ),
            });
        }
        let mesh = self
            .meshes
            .get_mut(&handle)
            .ok_or_else(|| unknown_handle(OPERATION, handle))?;
        mesh.vertices = vertices.to_vec();
        mesh.faces = faces.iter().map(|f| f.to_vec()).collect();
        Ok(())
    }

    fn apply_weld(&mut self, handle: MeshHandle, tolerance: f64) -> Result<()> {
        self.apply(handle, Weld::new(tolerance))
    }

    fn apply_edge_split(&mut self, handle: MeshHandle, angle: f64) -> Result<()> {
        self.apply(handle, EdgeSplit::new(angle))
    }

    fn apply_dissolve_decimate(&mut self, handle: MeshHandle, angle: f64) -> Result<()> {
        self.apply(handle, DissolveDecimate::new(angle))
    }

    fn apply_triangulate(&mut self, handle: MeshHandle) -> Result<()> {
        self.apply(handle, Triangulate)
    }

    fn read_faces(&self, handle: MeshHandle) -> Result<Vec<EditorFace>> {
        let mesh = self
            .meshes
            .get(&handle)
            .ok_or_else(|| unknown_handle("ReadFaces", handle))?;
        Ok(mesh
            .faces
            .iter()
            .map(|face| EditorFace {
                indices: face.clone(),
                positions: face.iter().map(|&i| mesh.vertices[i]).collect(),
            })
            .collect())
    }

    fn clear_all(&mut self) {
        if !self.meshes.is_empty() {
            debug!(meshes = self.meshes.len(), "clearing editor scene");
        }
        self.meshes.clear();
    }
}
