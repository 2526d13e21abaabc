//! Polygon triangulation

use super::{ensure_faces, Modifier, ModifierStats};
use colcrate_core::{newell_normal, Point3d, PolygonMesh, Result, Vector3d};
use earcutr::earcut;

/// Replace every face with more than three vertices by triangles.
///
/// Triangles produced from one polygon take that polygon's place in the
/// face list, so face order stays stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Triangulate;

impl Modifier for Triangulate {
    const NAME: &'static str = "Triangulate";

    fn apply(&self, mesh: &mut PolygonMesh) -> Result<ModifierStats> {
        ensure_faces(mesh, Self::NAME)?;
        let (vertices_before, faces_before) = (mesh.vertex_count(), mesh.face_count());

        let mut faces = Vec::with_capacity(mesh.faces.len());
        for face in &mesh.faces {
            match face.len() {
                0..=2 => {}
                3 => faces.push(face.clone()),
                _ => {
                    let points: Vec<Point3d> = face.iter().map(|&i| mesh.vertices[i]).collect();
                    faces.extend(
                        triangulate_polygon(&points)
                            .into_iter()
                            .map(|[a, b, c]| vec![face[a], face[b], face[c]]),
                    );
                }
            }
        }
        mesh.faces = faces;

        Ok(ModifierStats::measure(mesh, vertices_before, faces_before))
    }
}

/// Triangulate one planar polygon given in loop order.
///
/// Returns triangles as indices into `points`, wound like the polygon.
/// Concave polygons go through ear clipping in the polygon's plane; a
/// polygon the ear clipper cannot fully cover falls back to a fan.
pub fn triangulate_polygon(points: &[Point3d]) -> Vec<[usize; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }
    if n == 3 {
        return vec![[0, 1, 2]];
    }

    let Some(normal) = newell_normal(points).try_normalize(1e-12) else {
        return fan(n);
    };
    let (tangent, bitangent) = plane_basis(&normal);
    let origin = points[0];
    let flat: Vec<f64> = points
        .iter()
        .flat_map(|p| {
            let d = p - origin;
            [d.dot(&tangent), d.dot(&bitangent)]
        })
        .collect();

    let triangles = match earcut(&flat, &[], 2) {
        Ok(indices) if indices.len() == 3 * (n - 2) => indices
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect(),
        _ => fan(n),
    };

    triangles
        .into_iter()
        .map(|[a, b, c]| {
            let winding = (points[b] - points[a]).cross(&(points[c] - points[a]));
            if winding.dot(&normal) < 0.0 {
                [a, c, b]
            } else {
                [a, b, c]
            }
        })
        .collect()
}

fn fan(n: usize) -> Vec<[usize; 3]> {
    (1..n - 1).map(|i| [0, i, i + 1]).collect()
}

fn plane_basis(normal: &Vector3d) -> (Vector3d, Vector3d) {
    let up = if normal.z.abs() < 0.9 {
        Vector3d::z()
    } else {
        Vector3d::y()
    };
    let tangent = up.cross(normal).normalize();
    let bitangent = normal.cross(&tangent).normalize();
    (tangent, bitangent)
}
