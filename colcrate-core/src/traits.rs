//! Core traits for colcrate

use crate::{mesh::*, point::*, record::TriangleRecord};

/// Anything with an axis-aligned extent
pub trait Drawable {
    /// Get the bounding box of the object
    fn bounding_box(&self) -> (Point3d, Point3d);

    /// Get the center point of the object
    fn center(&self) -> Point3d {
        let (min, max) = self.bounding_box();
        nalgebra::center(&min, &max)
    }
}

fn bounds<'a>(points: impl IntoIterator<Item = &'a Point3d>) -> (Point3d, Point3d) {
    let mut iter = points.into_iter();
    let Some(first) = iter.next() else {
        return (Point3d::origin(), Point3d::origin());
    };

    let mut min = *first;
    let mut max = *first;
    for p in iter {
        min = min.inf(p);
        max = max.sup(p);
    }
    (min, max)
}

impl Drawable for TriangleMesh {
    fn bounding_box(&self) -> (Point3d, Point3d) {
        bounds(&self.vertices)
    }
}

impl Drawable for PolygonMesh {
    fn bounding_box(&self) -> (Point3d, Point3d) {
        bounds(self.faces.iter().flatten().map(|&i| &self.vertices[i]))
    }
}

impl Drawable for [TriangleRecord] {
    fn bounding_box(&self) -> (Point3d, Point3d) {
        bounds(self.iter().flat_map(|r| r.vertices.iter()))
    }
}
