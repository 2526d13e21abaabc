//! Point types and small geometric helpers

use nalgebra::{Point3, Vector3};

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// Round every component to the nearest integer, ties to even.
///
/// `2.5` rounds to `2`, `3.5` to `4` and `-2.5` to `-2`.
pub fn round_point(p: &Point3d) -> Point3d {
    Point3d::new(p.x.round_ties_even(), p.y.round_ties_even(), p.z.round_ties_even())
}

/// Newell normal of a closed polygon loop. Not normalized; zero for degenerate loops.
pub fn newell_normal(points: &[Point3d]) -> Vector3d {
    let mut n = Vector3d::zeros();
    for (i, a) in points.iter().enumerate() {
        let b = &points[(i + 1) % points.len()];
        n.x += (a.y - b.y) * (a.z + b.z);
        n.y += (a.z - b.z) * (a.x + b.x);
        n.z += (a.x - b.x) * (a.y + b.y);
    }
    n
}
