//! Split sharp edges

use super::{ensure_faces, Modifier, ModifierStats};
use crate::topology::{angle_between, edge_faces, edge_key, face_normals, loop_edges, MinUnionFind};
use colcrate_core::{PolygonMesh, Result};
use std::collections::HashSet;

/// Disconnect faces along edges whose normals diverge by more than
/// `split_angle` radians.
///
/// Only manifold edges (exactly two faces) can be sharp. Around each vertex
/// the incident faces are grouped into fans joined by non-sharp edges; the
/// first fan keeps the vertex and every further fan gets its own copy at
/// the same position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSplit {
    pub split_angle: f64,
}

impl EdgeSplit {
    pub fn new(split_angle: f64) -> Self {
        Self { split_angle }
    }
}

impl Modifier for EdgeSplit {
    const NAME: &'static str = "EdgeSplit";

    fn apply(&self, mesh: &mut PolygonMesh) -> Result<ModifierStats> {
        ensure_faces(mesh, Self::NAME)?;
        let (vertices_before, faces_before) = (mesh.vertex_count(), mesh.face_count());

        let normals = face_normals(mesh);
        let edges = edge_faces(mesh);
        let sharp: HashSet<(usize, usize)> = edges
            .iter()
            .filter_map(|(&edge, faces)| match faces.as_slice() {
                &[f, g] if f != g => match (&normals[f], &normals[g]) {
                    (Some(a), Some(b)) if angle_between(a, b) > self.split_angle => Some(edge),
                    _ => None,
                },
                _ => None,
            })
            .collect();

        if sharp.is_empty() {
            return Ok(ModifierStats::measure(mesh, vertices_before, faces_before));
        }

        let mut vertex_faces: Vec<Vec<usize>> = vec![Vec::new(); mesh.vertices.len()];
        for (fi, face) in mesh.faces.iter().enumerate() {
            for &v in face {
                if vertex_faces[v].last() != Some(&fi) {
                    vertex_faces[v].push(fi);
                }
            }
        }

        // (face, old vertex, new vertex), all decided on the unsplit topology
        let mut splits = Vec::new();
        let mut added = Vec::new();
        for (v, incident) in vertex_faces.iter().enumerate() {
            if incident.len() < 2 {
                continue;
            }
            let mut fans = MinUnionFind::new(incident.len());
            for (slot, &fi) in incident.iter().enumerate() {
                for (a, b) in loop_edges(&mesh.faces[fi]) {
                    if a != v && b != v {
                        continue;
                    }
                    let key = edge_key(a, b);
                    if sharp.contains(&key) {
                        continue;
                    }
                    let Some(neighbours) = edges.get(&key) else {
                        continue;
                    };
                    for other in neighbours {
                        if let Ok(other_slot) = incident.binary_search(other) {
                            fans.union(slot, other_slot);
                        }
                    }
                }
            }

            let mut fan_vertex = vec![v; incident.len()];
            for slot in 0..incident.len() {
                let root = fans.find(slot);
                if root != 0 && root == slot {
                    fan_vertex[slot] = mesh.vertices.len() + added.len();
                    added.push(mesh.vertices[v]);
                }
                if fan_vertex[root] != v {
                    splits.push((incident[slot], v, fan_vertex[root]));
                }
            }
        }

        for (fi, old, new) in splits {
            for idx in mesh.faces[fi].iter_mut().filter(|idx| **idx == old) {
                *idx = new;
            }
        }
        mesh.vertices.extend(added);

        Ok(ModifierStats::measure(mesh, vertices_before, faces_before))
    }
}
