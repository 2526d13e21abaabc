//! Triangle records and collision-type keys

use crate::point::{round_point, Point3d};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 16-bit collision-type discriminant made of a high and a low byte.
///
/// Only used to group triangles; it carries no ordering meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CollisionKey(pub u16);

impl CollisionKey {
    /// Key of triangles that carry no collision type.
    pub const NONE: CollisionKey = CollisionKey(0);

    /// `high * 256 + low`
    pub fn from_bytes(high: u8, low: u8) -> Self {
        CollisionKey((u16::from(high) << 8) | u16::from(low))
    }

    pub fn high(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn low(self) -> u8 {
        (self.0 & 255) as u8
    }

    pub fn to_bytes(self) -> [u8; 2] {
        [self.high(), self.low()]
    }
}

impl fmt::Display for CollisionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.high(), self.low())
    }
}

/// One triangle line: three points plus an optional collision-type key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleRecord {
    pub vertices: [Point3d; 3],
    /// `Some` when the line carried key tokens, even if they encode 0.
    pub key: Option<CollisionKey>,
}

impl TriangleRecord {
    pub fn new(vertices: [Point3d; 3]) -> Self {
        Self { vertices, key: None }
    }

    pub fn with_key(vertices: [Point3d; 3], key: CollisionKey) -> Self {
        Self {
            vertices,
            key: Some(key),
        }
    }

    /// The grouping key; records without key tokens group under [`CollisionKey::NONE`].
    pub fn group_key(&self) -> CollisionKey {
        self.key.unwrap_or(CollisionKey::NONE)
    }

    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    /// Same triangle with the key tokens dropped.
    pub fn without_key(self) -> Self {
        Self {
            key: None,
            ..self
        }
    }

    /// Same triangle with every coordinate rounded (ties to even).
    pub fn rounded(&self) -> Self {
        Self {
            vertices: self.vertices.map(|v| round_point(&v)),
            key: self.key,
        }
    }
}
