//! Adjacency helpers shared by the modifiers

use colcrate_core::{PolygonMesh, Vector3d};
use itertools::Itertools;
use std::collections::HashMap;

/// Undirected edge key, smaller index first
pub(crate) fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Directed edges of a face loop, closing edge included
pub(crate) fn loop_edges(face: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    face.iter().copied().circular_tuple_windows()
}

/// Undirected edge -> faces using it, each face listed once per use
pub(crate) fn edge_faces(mesh: &PolygonMesh) -> HashMap<(usize, usize), Vec<usize>> {
    let mut map: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
    for (fi, face) in mesh.faces.iter().enumerate() {
        for (a, b) in loop_edges(face) {
            map.entry(edge_key(a, b)).or_default().push(fi);
        }
    }
    map
}

/// Directed edge -> faces using it in that direction
pub(crate) fn directed_edge_faces(mesh: &PolygonMesh) -> HashMap<(usize, usize), Vec<usize>> {
    let mut map: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
    for (fi, face) in mesh.faces.iter().enumerate() {
        for edge in loop_edges(face) {
            map.entry(edge).or_default().push(fi);
        }
    }
    map
}

/// The face across directed edge `a -> b`, if that edge is shared by exactly
/// two consistently wound faces.
pub(crate) fn twin_face(
    directed: &HashMap<(usize, usize), Vec<usize>>,
    a: usize,
    b: usize,
) -> Option<usize> {
    match (directed.get(&(a, b)), directed.get(&(b, a))) {
        (Some(here), Some(there)) if here.len() == 1 && there.len() == 1 && here[0] != there[0] => {
            Some(there[0])
        }
        _ => None,
    }
}

/// Unit normal of every face, `None` for degenerate ones
pub(crate) fn face_normals(mesh: &PolygonMesh) -> Vec<Option<Vector3d>> {
    (0..mesh.faces.len()).map(|fi| mesh.face_normal(fi)).collect()
}

/// Angle in radians between two unit vectors
pub(crate) fn angle_between(a: &Vector3d, b: &Vector3d) -> f64 {
    a.dot(b).clamp(-1.0, 1.0).acos()
}

/// Drop consecutive repeats (cyclically) from a face loop.
pub(crate) fn dedup_loop(face: &mut Vec<usize>) {
    face.dedup();
    while face.len() > 1 && face.first() == face.last() {
        face.pop();
    }
}

/// Union-find whose root is always the smallest index of its set
#[derive(Debug)]
pub(crate) struct MinUnionFind {
    parent: Vec<usize>,
}

impl MinUnionFind {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    pub(crate) fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    pub(crate) fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra < rb {
            self.parent[rb] = ra;
        } else if rb < ra {
            self.parent[ra] = rb;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colcrate_core::Point3d;

    fn two_triangles() -> PolygonMesh {
        PolygonMesh {
            vertices: vec![
                Point3d::new(0.0, 0.0, 0.0),
                Point3d::new(10.0, 0.0, 0.0),
                Point3d::new(10.0, 10.0, 0.0),
                Point3d::new(0.0, 10.0, 0.0),
            ],
            faces: vec![vec![0, 1, 2], vec![0, 2, 3]],
        }
    }

    #[test]
    fn test_loop_edges_close() {
        let edges: Vec<_> = loop_edges(&[4, 5, 6]).collect();
        assert_eq!(edges, vec![(4, 5), (5, 6), (6, 4)]);
    }

    #[test]
    fn test_twin_face() {
        let mesh = two_triangles();
        let directed = directed_edge_faces(&mesh);
        assert_eq!(twin_face(&directed, 2, 0), Some(1));
        assert_eq!(twin_face(&directed, 0, 2), Some(0));
        assert_eq!(twin_face(&directed, 0, 1), None);
        assert_eq!(edge_faces(&mesh)[&(0, 2)], vec![0, 1]);
    }

    #[test]
    fn test_dedup_loop() {
        let mut face = vec![1, 1, 2, 3, 1];
        dedup_loop(&mut face);
        assert_eq!(face, vec![1, 2, 3]);
    }

    #[test]
    fn test_union_find_min_root() {
        let mut uf = MinUnionFind::new(5);
        uf.union(4, 2);
        uf.union(2, 3);
        uf.union(1, 0);
        assert_eq!(uf.find(3), 2);
        assert_eq!(uf.find(4), 2);
        assert_eq!(uf.find(1), 0);
        uf.union(3, 1);
        assert_eq!(uf.find(4), 0);
    }
}
