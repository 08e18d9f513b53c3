use core::f32::consts::PI;

use glam::Vec3;

use crate::{DiffuseBrdf, Photon, Reservoir, ReservoirSample, Surface};

pub type CausticReservoir = Reservoir<CausticSample>;

/// Caustic sample: a single photon that got to a diffuse surface through
/// specular bounces.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CausticSample {
    pub position: Vec3,

    /// Direction the photon travelled in
    pub direction: Vec3,

    /// Flux density, already scaled by the number of photons found nearby
    pub flux: Vec3,
}

impl ReservoirSample for CausticSample {
    fn from_photon(
        photon: &Photon,
        _surface: &Surface,
        count: u32,
        radius: f32,
    ) -> Self {
        Self {
            position: photon.position,
            direction: photon.direction(),
            flux: count as f32 * photon.flux / (PI * radius * radius),
        }
    }

    fn contribution(&self, surface: &Surface) -> Vec3 {
        if !surface.is_some() {
            return Vec3::ZERO;
        }

        let l = -self.direction;

        if surface.normal.dot(l) <= 0.0 {
            return Vec3::ZERO;
        }

        DiffuseBrdf::new(surface).eval(l) * self.flux
    }

    fn origin(&self) -> Vec3 {
        self.position
    }

    fn scaled(mut self, factor: f32) -> Self {
        self.flux *= factor;
        self
    }
}
