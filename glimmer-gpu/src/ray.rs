use glam::Vec3;

use crate::GLIMMER_EPSILON;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Creates a ray that starts at a surface with given normal, slightly
    /// offset so that it doesn't intersect that very surface.
    ///
    /// The offset goes along the side of the surface the ray travels into.
    pub fn from_surface(point: Vec3, normal: Vec3, direction: Vec3) -> Self {
        let side = if normal.dot(direction) >= 0.0 {
            normal
        } else {
            -normal
        };

        Self::new(point + side * GLIMMER_EPSILON, direction)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}
