use glam::Vec3;

use crate::{Material, Ray, Scene, SceneHit, GLIMMER_EPSILON};

/// Analytic shape; used for simple scenes, tests and as a reference
/// implementation of [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    /// Infinite plane
    Plane {
        point: Vec3,
        normal: Vec3,
        material: Material,
    },

    Sphere {
        center: Vec3,
        radius: f32,
        material: Material,
    },
}

impl Primitive {
    pub fn intersect(&self, ray: Ray) -> Option<SceneHit> {
        match *self {
            Primitive::Plane {
                point,
                normal,
                material,
            } => {
                let denom = normal.dot(ray.direction());

                if denom.abs() < 1e-8 {
                    return None;
                }

                let distance = (point - ray.origin()).dot(normal) / denom;

                (distance > GLIMMER_EPSILON).then(|| SceneHit {
                    distance,
                    point: ray.at(distance),
                    normal,
                    material,
                })
            }

            Primitive::Sphere {
                center,
                radius,
                material,
            } => {
                let oc = ray.origin() - center;
                let b = oc.dot(ray.direction());
                let c = oc.length_squared() - radius * radius;
                let discriminant = b * b - c;

                if discriminant < 0.0 {
                    return None;
                }

                let sqrt = discriminant.sqrt();

                let distance = [-b - sqrt, -b + sqrt]
                    .into_iter()
                    .find(|&distance| distance > GLIMMER_EPSILON)?;

                let point = ray.at(distance);

                Some(SceneHit {
                    distance,
                    point,
                    normal: (point - center) / radius,
                    material,
                })
            }
        }
    }
}

/// List of primitives, intersected by brute force.
#[derive(Clone, Debug, Default)]
pub struct Primitives {
    items: Vec<Primitive>,
}

impl Primitives {
    pub fn new(items: impl IntoIterator<Item = Primitive>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    pub fn push(&mut self, item: Primitive) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl Scene for Primitives {
    fn intersect(&self, ray: Ray) -> Option<SceneHit> {
        self.items
            .iter()
            .filter_map(|item| item.intersect(ray))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}
