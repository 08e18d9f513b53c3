mod caustic;
mod fg;
mod mis;

use glam::Vec3;

pub use self::caustic::*;
pub use self::fg::*;
pub use self::mis::*;
use crate::{Photon, Surface, Vec3Ext, WhiteNoise};

/// Payload that can be selected by a [`Reservoir`].
pub trait ReservoirSample: Clone + Copy + Default {
    /// Creates a candidate out of a photon found near given surface.
    ///
    /// `count` is the number of photons found within `radius`; each candidate
    /// is scaled by it, so that on its own it estimates the contribution of
    /// the entire neighbourhood.
    fn from_photon(
        photon: &Photon,
        surface: &Surface,
        count: u32,
        radius: f32,
    ) -> Self;

    /// Returns the unshadowed radiance this sample reflects off given surface
    /// towards the camera.
    fn contribution(&self, surface: &Surface) -> Vec3;

    /// Returns the target function, i.e. the (unnormalized) density that
    /// resampling tries to draw this sample with.
    fn target(&self, surface: &Surface) -> f32 {
        self.contribution(surface).luma()
    }

    /// Returns where this sample's light comes from; visibility tests are
    /// traced from here.
    fn origin(&self) -> Vec3;

    fn scaled(self, factor: f32) -> Self;
}

/// Weighted reservoir, selecting one sample out of a stream of candidates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Reservoir<T> {
    pub sample: T,

    /// Sum of weights of all candidates streamed so far
    pub w_sum: f32,

    /// Target function of `sample`, evaluated at the pixel owning this
    /// reservoir
    pub p_hat: f32,

    /// Number of candidates streamed so far
    pub m: f32,

    /// Number of frames this reservoir's history has survived
    pub age: u32,
}

impl<T> Reservoir<T>
where
    T: Clone + Copy,
{
    pub fn is_empty(&self) -> bool {
        self.m <= 0.0
    }

    /// Streams a single candidate into the reservoir.
    pub fn update(
        &mut self,
        wnoise: &mut WhiteNoise,
        sample: T,
        p_hat: f32,
        weight: f32,
    ) -> bool {
        self.m += 1.0;
        self.select(wnoise, sample, p_hat, weight)
    }

    /// Streams an entire reservoir into this one, as if all of its
    /// candidates were streamed here; `p_hat` is the target function of
    /// `rhs.sample` evaluated at this reservoir's pixel.
    pub fn merge(
        &mut self,
        wnoise: &mut WhiteNoise,
        rhs: &Self,
        p_hat: f32,
        weight: f32,
    ) -> bool {
        if rhs.is_empty() {
            return false;
        }

        self.m += rhs.m;
        self.select(wnoise, rhs.sample, p_hat, weight)
    }

    /// Accounts for candidate's weight and possibly selects it, without
    /// touching `m`.
    pub fn select(
        &mut self,
        wnoise: &mut WhiteNoise,
        sample: T,
        p_hat: f32,
        weight: f32,
    ) -> bool {
        // Also rejects NaNs
        if !(weight > 0.0) {
            return false;
        }

        self.w_sum += weight;

        if wnoise.sample() * self.w_sum <= weight {
            self.sample = sample;
            self.p_hat = p_hat;
            true
        } else {
            false
        }
    }

    /// Returns the unbiased contribution weight, `W = w_sum / (M * p_hat)`.
    pub fn contribution_weight(&self) -> f32 {
        let denom = self.m.max(1.0) * self.p_hat;

        if denom > 0.0 {
            self.w_sum / denom
        } else {
            0.0
        }
    }

    pub fn set_contribution_weight(&mut self, w: f32) {
        self.w_sum = w * self.m.max(1.0) * self.p_hat;
    }

    /// Caps the history to given length, scaling `w_sum` down so that the
    /// contribution weight stays the same.
    pub fn clamp_m(&mut self, max: f32) {
        if self.m > max {
            self.w_sum *= max / self.m;
            self.m = max;
        }
    }
}

impl<T> Reservoir<T>
where
    T: ReservoirSample,
{
    /// Returns the radiance estimate of this reservoir at given surface.
    pub fn resolve(&self, surface: &Surface) -> Vec3 {
        if self.is_empty() || !surface.is_some() {
            return Vec3::ZERO;
        }

        self.contribution_weight() * self.sample.contribution(surface)
    }
}
