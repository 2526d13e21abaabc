//! Editor faces back to triangle records

use crate::editor::EditorFace;
use colcrate_core::{round_point, CollisionKey, Error, Result, TriangleRecord};

/// Turn simplified faces into triangle records in face storage order.
///
/// Coordinates are rounded to integers (ties to even). The group key is
/// attached only when the group was read in keyed mode. Any face that is not
/// a triangle means the triangulate pass broke its contract.
pub fn flatten(faces: &[EditorFace], key: CollisionKey, keyed: bool) -> Result<Vec<TriangleRecord>> {
    faces
        .iter()
        .enumerate()
        .map(|(index, face)| match face.positions.as_slice() {
            [a, b, c] if face.is_triangle() => {
                let vertices = [round_point(a), round_point(b), round_point(c)];
                Ok(if keyed {
                    TriangleRecord::with_key(vertices, key)
                } else {
                    TriangleRecord::new(vertices)
                })
            }
            _ => Err(Error::PipelineContractViolation {
                face: index,
                vertex_count: face.indices.len(),
            }),
        })
        .collect()
}
