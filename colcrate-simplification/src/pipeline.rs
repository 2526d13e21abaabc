//! Fixed pass sequence run against a [`MeshEditor`]

use crate::editor::{EditorFace, MeshEditor, MeshHandle};
use colcrate_core::{Result, TriangleMesh};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Default weld tolerance in model units
pub const DEFAULT_WELD_DISTANCE: f64 = 2.5;

/// Default angular tolerance in degrees for edge split and dissolve
pub const DEFAULT_ANGLE_DEGREES: f64 = 2.0;

/// Tolerances of the simplification passes. Angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifyParams {
    pub weld_distance: f64,
    pub edge_split_angle: f64,
    pub dissolve_angle: f64,
}

impl Default for SimplifyParams {
    fn default() -> Self {
        Self {
            weld_distance: DEFAULT_WELD_DISTANCE,
            edge_split_angle: DEFAULT_ANGLE_DEGREES.to_radians(),
            dissolve_angle: DEFAULT_ANGLE_DEGREES.to_radians(),
        }
    }
}

impl SimplifyParams {
    pub fn with_weld_distance(mut self, distance: f64) -> Self {
        self.weld_distance = distance;
        self
    }

    pub fn with_edge_split_angle(mut self, radians: f64) -> Self {
        self.edge_split_angle = radians;
        self
    }

    pub fn with_dissolve_angle(mut self, radians: f64) -> Self {
        self.dissolve_angle = radians;
        self
    }
}

/// One step of the pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pass {
    Weld(f64),
    EdgeSplit(f64),
    DissolveDecimate(f64),
    Triangulate,
}

impl Pass {
    pub fn name(&self) -> &'static str {
        match self {
            Pass::Weld(_) => "Weld",
            Pass::EdgeSplit(_) => "EdgeSplit",
            Pass::DissolveDecimate(_) => "DissolveDecimate",
            Pass::Triangulate => "Triangulate",
        }
    }

    pub fn apply<E: MeshEditor + ?Sized>(&self, editor: &mut E, handle: MeshHandle) -> Result<()> {
        match *self {
            Pass::Weld(tolerance) => editor.apply_weld(handle, tolerance),
            Pass::EdgeSplit(angle) => editor.apply_edge_split(handle, angle),
            Pass::DissolveDecimate(angle) => editor.apply_dissolve_decimate(handle, angle),
            Pass::Triangulate => editor.apply_triangulate(handle),
        }
    }
}

/// Weld, edge split, dissolve, weld again, triangulate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimplificationPipeline {
    params: SimplifyParams,
}

impl SimplificationPipeline {
    pub fn new(params: SimplifyParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SimplifyParams {
        &self.params
    }

    pub fn passes(&self) -> [Pass; 5] {
        let p = &self.params;
        [
            Pass::Weld(p.weld_distance),
            Pass::EdgeSplit(p.edge_split_angle),
            Pass::DissolveDecimate(p.dissolve_angle),
            Pass::Weld(p.weld_distance),
            Pass::Triangulate,
        ]
    }

    /// Load `mesh` into a fresh editor mesh, run every pass in order and read
    /// the result back. The first failing pass aborts the run.
    ///
    /// The editor mesh is left in place; clearing the working context is up
    /// to the caller.
    pub fn run<E: MeshEditor + ?Sized>(
        &self,
        editor: &mut E,
        mesh: &TriangleMesh,
    ) -> Result<Vec<EditorFace>> {
        let handle = editor.new_mesh();
        editor.set_geometry(handle, &mesh.vertices, &mesh.faces)?;
        for pass in self.passes() {
            pass.apply(editor, handle)?;
            trace!(mesh = handle.id(), pass = pass.name(), "pass committed");
        }
        editor.read_faces(handle)
    }
}
