mod primitives;

use glam::Vec3;

pub use self::primitives::*;
use crate::{Ray, GLIMMER_EPSILON};

/// Ray-queryable scene, provided by the host renderer.
///
/// Photons get traced through it and `Raytraced` bias correction uses it for
/// visibility tests.
pub trait Scene: Sync {
    /// Returns the nearest hit along given ray, if any.
    fn intersect(&self, ray: Ray) -> Option<SceneHit>;

    /// Returns whether anything lies on the segment between given points.
    fn is_occluded(&self, from: Vec3, to: Vec3) -> bool {
        let dir = to - from;
        let distance = dir.length();

        if distance <= 2.0 * GLIMMER_EPSILON {
            return false;
        }

        let ray = Ray::new(from, dir / distance);

        self.intersect(ray).map_or(false, |hit| {
            hit.distance > GLIMMER_EPSILON
                && hit.distance < distance - GLIMMER_EPSILON
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneHit {
    pub distance: f32,
    pub point: Vec3,

    /// Geometric normal; points outside of the object, regardless of which
    /// side the ray came from
    pub normal: Vec3,

    pub material: Material,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub albedo: Vec3,
    pub roughness: f32,
    pub kind: MaterialKind,
}

impl Material {
    pub fn diffuse(albedo: Vec3, roughness: f32) -> Self {
        Self {
            albedo,
            roughness,
            kind: MaterialKind::Diffuse,
        }
    }

    pub fn mirror(albedo: Vec3) -> Self {
        Self {
            albedo,
            roughness: 0.0,
            kind: MaterialKind::Mirror,
        }
    }

    pub fn glass(albedo: Vec3, ior: f32) -> Self {
        Self {
            albedo,
            roughness: 0.0,
            kind: MaterialKind::Glass { ior },
        }
    }

    /// Returns whether photons landing on this material get stored.
    ///
    /// Uses the same roughness predicate as the photon collection, so that
    /// photons are stored only where they will be gathered.
    pub fn accepts_photons(&self, roughness_threshold: f32) -> bool {
        self.kind == MaterialKind::Diffuse
            && self.roughness <= roughness_threshold
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaterialKind {
    Diffuse,
    Mirror,
    Glass { ior: f32 },
}
