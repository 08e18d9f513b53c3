use core::f32::consts::PI;

use glam::Vec3;

use crate::{DiffuseBrdf, Photon, Reservoir, ReservoirSample, Surface};

pub type FgReservoir = Reservoir<FgSample>;

/// Final-gather sample: a single photon gathered around a point lying on a
/// diffuse surface, standing in for the entire neighbourhood it came from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FgSample {
    /// Where the photon landed
    pub position: Vec3,

    /// Normal of the surface the photon got gathered on; photons don't keep
    /// the normal of their own hit, but they only get gathered on surfaces
    /// facing them
    pub normal: Vec3,

    /// Irradiance carried by this photon alone
    pub radiance: Vec3,

    /// Number of photons gathered alongside this one, i.e. how many times
    /// `radiance` has to be counted for the sample to represent the whole
    /// neighbourhood
    pub count: f32,
}

impl ReservoirSample for FgSample {
    fn from_photon(
        photon: &Photon,
        surface: &Surface,
        count: u32,
        radius: f32,
    ) -> Self {
        Self {
            position: photon.position,
            normal: surface.normal,
            radiance: photon.flux / (PI * radius * radius),
            count: count as f32,
        }
    }

    fn contribution(&self, surface: &Surface) -> Vec3 {
        if !surface.is_some() {
            return Vec3::ZERO;
        }

        let cos = surface.normal.dot(self.normal).max(0.0);

        DiffuseBrdf::new(surface).eval(surface.normal)
            * self.radiance
            * self.count
            * cos
    }

    fn origin(&self) -> Vec3 {
        self.position
    }

    fn scaled(mut self, factor: f32) -> Self {
        self.radiance *= factor;
        self
    }
}
