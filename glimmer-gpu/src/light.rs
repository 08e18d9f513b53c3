use core::f32::consts::PI;

use bytemuck::{Pod, Zeroable};
use glam::{vec4, Vec3, Vec4, Vec4Swizzles};

use crate::{Normal, Ray, WhiteNoise};

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Light {
    /// x - position x
    /// y - position y
    /// z - position z
    /// w - radius
    pub d0: Vec4,

    /// x - intensity r
    /// y - intensity g
    /// z - intensity b
    /// w - (unused)
    pub d1: Vec4,

    /// x - (as u32) light type: 0 - point light, 1 - spot light
    /// y - if it's a spot light: direction
    /// z - if it's a spot light: direction
    /// w - if it's a spot light: half-angle of the cone
    pub d2: Vec4,
}

impl Light {
    pub const TYPE_POINT: u32 = 0;
    pub const TYPE_SPOT: u32 = 1;

    /// Creates a light that emits uniformly in all directions; `intensity` is
    /// the radiant intensity (power per steradian).
    pub fn point(pos: Vec3, intensity: Vec3) -> Self {
        Self {
            d0: pos.extend(0.0),
            d1: intensity.extend(0.0),
            d2: vec4(f32::from_bits(Self::TYPE_POINT), 0.0, 0.0, 0.0),
        }
    }

    /// Creates a light that emits uniformly within a cone.
    pub fn spot(pos: Vec3, dir: Vec3, angle: f32, intensity: Vec3) -> Self {
        let dir = Normal::encode(dir.normalize());

        Self {
            d0: pos.extend(0.0),
            d1: intensity.extend(0.0),
            d2: vec4(
                f32::from_bits(Self::TYPE_SPOT),
                dir.x,
                dir.y,
                angle.clamp(0.0, PI),
            ),
        }
    }

    /// Turns the light into a spherical emitter; photons start anywhere on
    /// its surface.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.d0.w = radius.max(0.0);
        self
    }

    pub fn center(&self) -> Vec3 {
        self.d0.xyz()
    }

    pub fn radius(&self) -> f32 {
        self.d0.w
    }

    pub fn intensity(&self) -> Vec3 {
        self.d1.xyz()
    }

    pub fn is_point(&self) -> bool {
        self.d2.x.to_bits() == Self::TYPE_POINT
    }

    pub fn spot_direction(&self) -> Vec3 {
        Normal::decode(self.d2.yz())
    }

    pub fn spot_angle(&self) -> f32 {
        self.d2.w
    }

    /// Returns the total power emitted by this light.
    pub fn power(&self) -> Vec3 {
        let solid_angle = if self.is_point() {
            4.0 * PI
        } else {
            2.0 * PI * (1.0 - self.spot_angle().cos())
        };

        solid_angle * self.intensity()
    }

    /// Generates the initial ray of a photon.
    pub fn emit(&self, wnoise: &mut WhiteNoise) -> Ray {
        let origin = self.center() + self.radius() * wnoise.sample_sphere();

        let direction = if self.is_point() {
            wnoise.sample_sphere()
        } else {
            wnoise.sample_cone(self.spot_direction(), self.spot_angle().cos())
        };

        Ray::new(origin, direction)
    }
}
