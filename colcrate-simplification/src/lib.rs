//! Mesh simplification for collision groups
//!
//! A group of triangle records goes through three steps:
//! - [`build_mesh`] turns the records into a triangle soup mesh
//! - [`SimplificationPipeline`] drives a [`MeshEditor`] through weld, edge
//!   split, limited dissolve, a second weld and triangulation
//! - [`flatten`] reads the simplified faces back as rounded records
//!
//! [`EditorScene`] is the in-process [`MeshEditor`] used in production.

pub mod builder;
pub mod editor;
pub mod flatten;
pub mod modifiers;
pub mod pipeline;
pub mod scene;
mod topology;

pub use builder::build_mesh;
pub use editor::{EditorFace, MeshEditor, MeshHandle};
pub use flatten::flatten;
pub use modifiers::{DissolveDecimate, EdgeSplit, Modifier, ModifierStats, Triangulate, Weld};
pub use pipeline::{Pass, SimplificationPipeline, SimplifyParams, DEFAULT_ANGLE_DEGREES, DEFAULT_WELD_DISTANCE};
pub use scene::EditorScene;
