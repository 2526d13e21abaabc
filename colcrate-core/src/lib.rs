//! Core data structures and traits for colcrate
//! 
//! This crate provides the fundamental types shared by the collision
//! simplification tool: triangle records and their collision-type keys,
//! triangle and polygon meshes, and the workspace error type.

pub mod point;
pub mod record;
pub mod mesh;
pub mod traits;
pub mod error;

pub use point::*;
pub use record::*;
pub use mesh::*;
pub use traits::*;
pub use error::*;
