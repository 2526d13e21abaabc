//! Limited dissolve: planar face merging plus collinear vertex removal

use super::{ensure_faces, Modifier, ModifierStats};
use crate::topology::{angle_between, directed_edge_faces, face_normals, loop_edges, twin_face};
use colcrate_core::{PolygonMesh, Result};
use std::collections::{BTreeSet, HashMap, VecDeque};
use tracing::trace;

type DirectedEdges = HashMap<(usize, usize), Vec<usize>>;

/// Merge neighbouring faces whose normals stay within `angle_limit` radians
/// of each other into single polygons, then remove boundary vertices whose
/// two edges continue in a straight line within the same limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DissolveDecimate {
    pub angle_limit: f64,
}

impl DissolveDecimate {
    pub fn new(angle_limit: f64) -> Self {
        Self { angle_limit }
    }

    /// Group faces into planar regions. Regions only grow across edges
    /// shared by exactly two consistently wound faces, and each candidate
    /// is compared against the normal of the face that started the region.
    fn planar_regions(&self, mesh: &PolygonMesh, directed: &DirectedEdges) -> Vec<Vec<usize>> {
        let normals = face_normals(mesh);
        let mut assigned = vec![false; mesh.faces.len()];
        let mut regions = Vec::new();

        for seed in 0..mesh.faces.len() {
            if assigned[seed] {
                continue;
            }
            assigned[seed] = true;
            let mut region = vec![seed];
            if let Some(seed_normal) = normals[seed] {
                let mut queue = VecDeque::from([seed]);
                while let Some(fi) = queue.pop_front() {
                    for (a, b) in loop_edges(&mesh.faces[fi]) {
                        let Some(other) = twin_face(directed, a, b) else {
                            continue;
                        };
                        if assigned[other] {
                            continue;
                        }
                        let within = normals[other]
                            .map(|n| angle_between(&seed_normal, &n) <= self.angle_limit)
                            .unwrap_or(false);
                        if within {
                            assigned[other] = true;
                            region.push(other);
                            queue.push_back(other);
                        }
                    }
                }
            }
            region.sort_unstable();
            regions.push(region);
        }
        regions
    }

    /// Merge every multi-face region bounded by one simple loop into one
    /// polygon. Returns the number of faces removed.
    fn merge_regions(&self, mesh: &mut PolygonMesh) -> usize {
        let directed = directed_edge_faces(mesh);
        let regions = self.planar_regions(mesh, &directed);
        let mut faces: Vec<Option<Vec<usize>>> = mesh.faces.iter().cloned().map(Some).collect();
        let mut removed = 0;

        for region in regions.iter().filter(|r| r.len() > 1) {
            let Some(outline) = boundary_loop(mesh, &directed, region) else {
                continue;
            };
            faces[region[0]] = Some(outline);
            for &fi in &region[1..] {
                faces[fi] = None;
            }
            removed += region.len() - 1;
        }

        mesh.faces = faces.into_iter().flatten().collect();
        removed
    }

    /// Remove vertices with exactly two neighbours lying on a straight line.
    /// Returns the number of vertices dissolved.
    fn dissolve_collinear(&self, mesh: &mut PolygonMesh) -> usize {
        let n = mesh.vertices.len();
        let mut neighbours: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];
        let mut vertex_faces: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (fi, face) in mesh.faces.iter().enumerate() {
            for (a, b) in loop_edges(face) {
                if a != b {
                    neighbours[a].insert(b);
                    neighbours[b].insert(a);
                }
            }
            for &v in face {
                if vertex_faces[v].last() != Some(&fi) {
                    vertex_faces[v].push(fi);
                }
            }
        }

        let mut dissolved = 0;
        for v in 0..n {
            let (prev, next) = {
                let mut it = neighbours[v].iter().copied();
                match (it.next(), it.next(), it.next()) {
                    (Some(a), Some(b), None) => (a, b),
                    _ => continue,
                }
            };
            if neighbours[prev].contains(&next) {
                continue;
            }

            let p = mesh.vertices[v];
            let incoming = (p - mesh.vertices[prev]).try_normalize(1e-12);
            let outgoing = (mesh.vertices[next] - p).try_normalize(1e-12);
            let straight = match (incoming, outgoing) {
                (Some(a), Some(b)) => angle_between(&a, &b) <= self.angle_limit,
                _ => false,
            };
            if !straight {
                continue;
            }

            let removable = vertex_faces[v]
                .iter()
                .all(|&fi| removable_from(&mesh.faces[fi], v));
            if !removable {
                continue;
            }

            for &fi in &vertex_faces[v] {
                mesh.faces[fi].retain(|&i| i != v);
            }
            neighbours[v].clear();
            neighbours[prev].remove(&v);
            neighbours[prev].insert(next);
            neighbours[next].remove(&v);
            neighbours[next].insert(prev);
            dissolved += 1;
        }
        dissolved
    }
}

impl Modifier for DissolveDecimate {
    const NAME: &'static str = "DissolveDecimate";

    fn apply(&self, mesh: &mut PolygonMesh) -> Result<ModifierStats> {
        ensure_faces(mesh, Self::NAME)?;
        let (vertices_before, faces_before) = (mesh.vertex_count(), mesh.face_count());

        let merged = self.merge_regions(mesh);
        let dissolved = self.dissolve_collinear(mesh);
        trace!(merged, dissolved, "limited dissolve");
        mesh.compact();

        Ok(ModifierStats::measure(mesh, vertices_before, faces_before))
    }
}

/// A vertex can leave a face if it occurs once, the face keeps at least
/// three corners, and the two corners it joins differ.
fn removable_from(face: &[usize], v: usize) -> bool {
    let len = face.len();
    if len <= 3 || face.iter().filter(|&&i| i == v).count() != 1 {
        return false;
    }
    match face.iter().position(|&i| i == v) {
        Some(pos) => face[(pos + len - 1) % len] != face[(pos + 1) % len],
        None => false,
    }
}

/// The outline of a face region as one loop, wound like its faces.
///
/// `None` when the region has holes, touches itself at a vertex, or has no
/// boundary at all.
fn boundary_loop(
    mesh: &PolygonMesh,
    directed: &DirectedEdges,
    region: &[usize],
) -> Option<Vec<usize>> {
    let mut inside = vec![false; mesh.faces.len()];
    for &fi in region {
        inside[fi] = true;
    }
    let mut first = None;
    let mut next_of: HashMap<usize, usize> = HashMap::new();
    for &fi in region {
        for (a, b) in loop_edges(&mesh.faces[fi]) {
            let interior = twin_face(directed, a, b).map_or(false, |g| inside[g]);
            if interior {
                continue;
            }
            if next_of.insert(a, b).is_some() {
                return None;
            }
            if first.is_none() {
                first = Some(a);
            }
        }
    }

    let start = first?;
    let mut outline = vec![start];
    let mut current = next_of.get(&start).copied()?;
    while current != start {
        if outline.len() >= next_of.len() {
            return None;
        }
        outline.push(current);
        current = next_of.get(&current).copied()?;
    }

    (outline.len() == next_of.len() && outline.len() >= 3).then_some(outline)
}
