//! Reader for rewritten collision files
//!
//! A rewritten file is organised as
//!
//! ```text
//! AREA <level> <area>
//!     COLLISIONTYPE <type>
//!         TRI x;y;z x;y;z x;y;z [param0 param1]
//! ```
//!
//! This module loads it back into per-area collision meshes with integer
//! vertices shared by exact position.

use crate::tri::{parse_record, COLLISION_TYPE_TAG, TRI_TAG};
use colcrate_core::{Error, Point3d, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Header token opening an area block
pub const AREA_TAG: &str = "AREA";

/// One collision triangle referencing the area's vertex list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollisionTriangle {
    pub collision_type: u8,
    pub vertices: [usize; 3],
    pub params: Option<[u8; 2]>,
}

/// Collision mesh of one level area
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaCollision {
    pub level_id: u32,
    pub area_id: u32,
    pub vertices: Vec<[i16; 3]>,
    pub triangles: Vec<CollisionTriangle>,
}

impl AreaCollision {
    fn new(level_id: u32, area_id: u32) -> Self {
        Self {
            level_id,
            area_id,
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Triangle count per collision type, ascending by type
    pub fn type_histogram(&self) -> BTreeMap<u8, usize> {
        let mut histogram = BTreeMap::new();
        for tri in &self.triangles {
            *histogram.entry(tri.collision_type).or_insert(0) += 1;
        }
        histogram
    }
}

/// All areas of a rewritten file, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollisionMap {
    pub areas: Vec<AreaCollision>,
}

impl CollisionMap {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut map = CollisionMap::default();
        let mut current: Option<AreaBuilder> = None;
        let mut collision_type = 0u8;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let tokens: Vec<&str> = raw.split_whitespace().collect();
            let Some(&tag) = tokens.first() else {
                continue;
            };

            match tag {
                AREA_TAG => {
                    if let Some(done) = current.take() {
                        map.areas.push(done.area);
                    }
                    let level_id = header_number(&tokens, 1, line_no)?;
                    let area_id = header_number(&tokens, 2, line_no)?;
                    current = Some(AreaBuilder::new(level_id, area_id));
                    collision_type = 0;
                }
                COLLISION_TYPE_TAG => {
                    collision_type = header_number(&tokens, 1, line_no)?;
                }
                TRI_TAG => {
                    let builder = current.as_mut().ok_or_else(|| Error::MalformedRecord {
                        line: line_no,
                        reason: format!("triangle before any {AREA_TAG} header"),
                    })?;
                    builder
                        .push(raw, collision_type)
                        .map_err(|e| e.at_line(line_no))?;
                }
                _ => {}
            }
        }

        if let Some(done) = current {
            map.areas.push(done.area);
        }
        Ok(map)
    }

    pub fn triangle_count(&self) -> usize {
        self.areas.iter().map(|a| a.triangles.len()).sum()
    }

    pub fn area(&self, level_id: u32, area_id: u32) -> Option<&AreaCollision> {
        self.areas
            .iter()
            .find(|a| a.level_id == level_id && a.area_id == area_id)
    }
}

struct AreaBuilder {
    area: AreaCollision,
    by_position: HashMap<[i16; 3], usize>,
}

impl AreaBuilder {
    fn new(level_id: u32, area_id: u32) -> Self {
        Self {
            area: AreaCollision::new(level_id, area_id),
            by_position: HashMap::new(),
        }
    }

    fn push(&mut self, line: &str, collision_type: u8) -> Result<()> {
        let record = parse_record(line)?;
        let mut vertices = [0usize; 3];
        for (slot, p) in vertices.iter_mut().zip(&record.vertices) {
            let pos = to_short(p)?;
            let next = self.area.vertices.len();
            *slot = *self.by_position.entry(pos).or_insert(next);
            if *slot == next {
                self.area.vertices.push(pos);
            }
        }
        self.area.triangles.push(CollisionTriangle {
            collision_type,
            vertices,
            params: record.key.map(|k| k.to_bytes()),
        });
        Ok(())
    }
}

fn to_short(p: &Point3d) -> Result<[i16; 3]> {
    let mut out = [0i16; 3];
    for (slot, &c) in out.iter_mut().zip(p.coords.iter()) {
        if c.fract() != 0.0 || c < f64::from(i16::MIN) || c > f64::from(i16::MAX) {
            return Err(Error::malformed(format!(
                "coordinate {c} is not a 16-bit integer"
            )));
        }
        *slot = c as i16;
    }
    Ok(out)
}

fn header_number<T: std::str::FromStr>(tokens: &[&str], at: usize, line_no: usize) -> Result<T> {
    tokens
        .get(at)
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| Error::MalformedRecord {
            line: line_no,
            reason: format!("invalid `{}` header", tokens.join(" ")),
        })
}
