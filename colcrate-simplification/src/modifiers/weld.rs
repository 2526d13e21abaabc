//! Distance-based vertex welding

use super::{ensure_faces, Modifier, ModifierStats};
use crate::topology::{dedup_loop, MinUnionFind};
use colcrate_core::{PolygonMesh, Result};
use rstar::primitives::GeomWithData;
use rstar::RTree;

type IndexedPosition = GeomWithData<[f64; 3], usize>;

/// Merge every vertex within `merge_threshold` of another one.
///
/// Merging is transitive. Each cluster collapses onto its lowest-index
/// vertex, which keeps its position. Faces that lose their area (fewer than
/// three distinct corners) are removed and unused vertices are dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weld {
    pub merge_threshold: f64,
}

impl Weld {
    pub fn new(merge_threshold: f64) -> Self {
        Self { merge_threshold }
    }
}

impl Modifier for Weld {
    const NAME: &'static str = "Weld";

    fn apply(&self, mesh: &mut PolygonMesh) -> Result<ModifierStats> {
        ensure_faces(mesh, Self::NAME)?;
        let (vertices_before, faces_before) = (mesh.vertex_count(), mesh.face_count());

        let points: Vec<IndexedPosition> = mesh
            .vertices
            .iter()
            .enumerate()
            .map(|(i, p)| GeomWithData::new([p.x, p.y, p.z], i))
            .collect();
        let tree = RTree::bulk_load(points);

        let max_distance_2 = self.merge_threshold.max(0.0).powi(2);
        let mut clusters = MinUnionFind::new(mesh.vertices.len());
        for (i, p) in mesh.vertices.iter().enumerate() {
            for near in tree.locate_within_distance([p.x, p.y, p.z], max_distance_2) {
                clusters.union(i, near.data);
            }
        }

        for face in &mut mesh.faces {
            for idx in face.iter_mut() {
                *idx = clusters.find(*idx);
            }
            dedup_loop(face);
        }
        mesh.faces.retain(|face| face.len() >= 3);
        mesh.compact();

        Ok(ModifierStats::measure(mesh, vertices_before, faces_before))
    }
}
