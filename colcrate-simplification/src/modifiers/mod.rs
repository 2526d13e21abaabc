//! In-place mesh modifiers
//!
//! Each modifier edits a [`PolygonMesh`] and commits immediately. They are
//! the building blocks [`crate::EditorScene`] uses to honour the
//! [`crate::MeshEditor`] contract.

mod dissolve;
mod edge_split;
mod triangulate;
mod weld;

pub use dissolve::DissolveDecimate;
pub use edge_split::EdgeSplit;
pub use triangulate::{triangulate_polygon, Triangulate};
pub use weld::Weld;

use colcrate_core::{Error, PolygonMesh, Result};
use std::fmt;

/// A committed, in-place edit of a polygon mesh
pub trait Modifier {
    /// Name used in errors and logs
    const NAME: &'static str;

    /// Apply this modifier to a mesh, modifying it in place
    fn apply(&self, mesh: &mut PolygonMesh) -> Result<ModifierStats>;
}

/// Mesh size before and after one modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifierStats {
    pub vertices_before: usize,
    pub vertices_after: usize,
    pub faces_before: usize,
    pub faces_after: usize,
}

impl ModifierStats {
    fn measure(mesh: &PolygonMesh, vertices_before: usize, faces_before: usize) -> Self {
        Self {
            vertices_before,
            vertices_after: mesh.vertex_count(),
            faces_before,
            faces_after: mesh.face_count(),
        }
    }
}

impl fmt::Display for ModifierStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} vertices, {} -> {} faces",
            self.vertices_before, self.vertices_after, self.faces_before, self.faces_after
        )
    }
}

/// Reject meshes a modifier cannot work on.
fn ensure_faces(mesh: &PolygonMesh, modifier: &'static str) -> Result<()> {
    if mesh.faces.is_empty() {
        return Err(Error::ModifierApply {
            modifier,
            reason: "mesh has no faces".to_string(),
        });
    }
    Ok(())
}
