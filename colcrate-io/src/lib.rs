//! Text formats for colcrate
//! 
//! This crate reads and writes the line-oriented collision format:
//! the `TRI` record codec, the accumulator that groups triangle runs by
//! collision-type key, the rewriter that applies the indentation convention,
//! and a reader that loads a rewritten file back into per-area meshes.

pub mod tri;
pub mod accumulator;
pub mod rewriter;
pub mod collision_map;

#[cfg(test)]
mod tests;

pub use tri::{format_record, is_triangle_line, parse_record, LineKind, COLLISION_TYPE_TAG, TRI_TAG};
pub use accumulator::{Flush, Group, GroupAccumulator, KeyPresence, Step};
pub use rewriter::{format_line, output_path, render, FileRewriter, DEFAULT_SUFFIX, INDENT};
pub use collision_map::{AreaCollision, CollisionMap, CollisionTriangle, AREA_TAG};

use colcrate_core::Result;
use std::path::Path;

/// Read a collision text file as raw lines, line endings stripped.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| colcrate_core::Error::io(path, e))?;
    Ok(text.lines().map(str::to_string).collect())
}
