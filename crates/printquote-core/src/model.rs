use crate::geom::{BBox3, Vec3};
use serde::{Deserialize, Serialize};

/// One surface facet. Coordinates are millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Triangle {
    pub const fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.a, self.b, self.c]
    }

    /// Signed volume of the tetrahedron spanned by the origin and this facet.
    pub fn signed_volume(&self) -> f64 {
        self.a.dot(self.b.cross(self.c)) / 6.0
    }

    pub fn area(&self) -> f64 {
        (self.b - self.a).cross(self.c - self.a).norm() * 0.5
    }

    pub fn flipped(&self) -> Self {
        Self::new(self.a, self.c, self.b)
    }
}

/// Triangle soup in file order. No connectivity is stored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }

    pub fn extents(&self) -> Option<BBox3> {
        if self.triangles.is_empty() {
            return None;
        }
        let mut bbox = BBox3::empty();
        for tri in &self.triangles {
            for v in tri.vertices() {
                bbox.include_point(v);
            }
        }
        Some(bbox)
    }

    pub fn scaled(&self, k: f64) -> Self {
        let triangles = self
            .triangles
            .iter()
            .map(|t| Triangle::new(t.a * k, t.b * k, t.c * k))
            .collect();
        Self { triangles }
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        let triangles = self
            .triangles
            .iter()
            .map(|t| Triangle::new(t.a + offset, t.b + offset, t.c + offset))
            .collect();
        Self { triangles }
    }

    /// Same surface with every facet wound the other way.
    pub fn flipped(&self) -> Self {
        Self {
            triangles: self.triangles.iter().map(Triangle::flipped).collect(),
        }
    }

    /// Closed, outward-wound box with 12 facets.
    pub fn axis_aligned_box(min: Vec3, max: Vec3) -> Self {
        let p = [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(max.x, max.y, max.z),
            Vec3::new(min.x, max.y, max.z),
        ];
        const FACES: [[usize; 3]; 12] = [
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [3, 7, 6],
            [3, 6, 2],
            [0, 4, 7],
            [0, 7, 3],
            [1, 2, 6],
            [1, 6, 5],
        ];
        let triangles = FACES
            .iter()
            .map(|&[i, j, k]| Triangle::new(p[i], p[j], p[k]))
            .collect();
        Self { triangles }
    }

    pub fn cube(side: f64) -> Self {
        Self::axis_aligned_box(Vec3::default(), Vec3::new(side, side, side))
    }
}

impl<'a> IntoIterator for &'a Mesh {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}
