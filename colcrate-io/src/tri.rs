//! `TRI` line format support
//!
//! A triangle line looks like
//!
//! ```text
//! TRI x;y;z x;y;z x;y;z [keyHigh keyLow]
//! ```
//!
//! Coordinates may be fractional on input; they are always written as
//! integers. The two trailing key tokens are optional bytes.

use colcrate_core::{CollisionKey, Error, Point3d, Result, TriangleRecord};

/// First token of a triangle line
pub const TRI_TAG: &str = "TRI";

/// First token of a collision-type marker line
pub const COLLISION_TYPE_TAG: &str = "COLLISIONTYPE";

/// Tag plus three vertices
const BARE_TOKENS: usize = 4;
/// Tag plus three vertices plus two key bytes
const KEYED_TOKENS: usize = 6;

/// Kind of a line, decided by its first whitespace-separated token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Triangle,
    CollisionType,
    Other,
}

impl LineKind {
    pub fn of(line: &str) -> Self {
        match line.split_whitespace().next() {
            Some(TRI_TAG) => LineKind::Triangle,
            Some(COLLISION_TYPE_TAG) => LineKind::CollisionType,
            _ => LineKind::Other,
        }
    }
}

pub fn is_triangle_line(line: &str) -> bool {
    LineKind::of(line) == LineKind::Triangle
}

/// Parse one triangle line.
///
/// Errors carry no line number; callers attach it with [`Error::at_line`].
pub fn parse_record(line: &str) -> Result<TriangleRecord> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    match tokens.first() {
        Some(&TRI_TAG) => {}
        _ => return Err(Error::malformed(format!("expected `{TRI_TAG}` tag"))),
    }

    if tokens.len() < BARE_TOKENS {
        return Err(Error::malformed(format!(
            "expected 3 vertices, found {}",
            tokens.len() - 1
        )));
    }
    if tokens.len() != BARE_TOKENS && tokens.len() != KEYED_TOKENS {
        return Err(Error::malformed(format!(
            "expected 0 or 2 key tokens, found {}",
            tokens.len() - BARE_TOKENS
        )));
    }

    let vertices = [
        parse_vertex(tokens[1])?,
        parse_vertex(tokens[2])?,
        parse_vertex(tokens[3])?,
    ];

    if tokens.len() == KEYED_TOKENS {
        let high = parse_key_byte(tokens[4])?;
        let low = parse_key_byte(tokens[5])?;
        Ok(TriangleRecord::with_key(vertices, CollisionKey::from_bytes(high, low)))
    } else {
        Ok(TriangleRecord::new(vertices))
    }
}

/// Render a record as a `TRI` line with integer coordinates.
///
/// Key tokens are written only when the record carries a key.
pub fn format_record(record: &TriangleRecord) -> String {
    let mut line = String::from(TRI_TAG);
    for v in &record.vertices {
        line.push_str(&format!(
            " {};{};{}",
            as_integer(v.x),
            as_integer(v.y),
            as_integer(v.z)
        ));
    }
    if let Some(key) = record.key {
        line.push_str(&format!(" {} {}", key.high(), key.low()));
    }
    line
}

fn as_integer(c: f64) -> i64 {
    c.round_ties_even() as i64
}

fn parse_vertex(token: &str) -> Result<Point3d> {
    let components: Vec<&str> = token.split(';').collect();
    if components.len() != 3 {
        return Err(Error::malformed(format!(
            "vertex `{token}` has {} components, expected 3",
            components.len()
        )));
    }

    let mut coords = [0.0f64; 3];
    for (slot, text) in coords.iter_mut().zip(&components) {
        *slot = text
            .parse::<f64>()
            .ok()
            .filter(|c| c.is_finite())
            .ok_or_else(|| Error::malformed(format!("invalid coordinate `{text}` in `{token}`")))?;
    }
    Ok(Point3d::new(coords[0], coords[1], coords[2]))
}

fn parse_key_byte(token: &str) -> Result<u8> {
    token
        .parse::<u8>()
        .map_err(|_| Error::malformed(format!("invalid key byte `{token}`")))
}
