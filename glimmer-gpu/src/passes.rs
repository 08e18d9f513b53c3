use bytemuck::{Pod, Zeroable};

use crate::{BiasCorrection, SimilarityThresholds};

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PhotonTracingPassParams {
    pub seed: u32,
    pub photon_count: u32,
    pub max_bounces: u32,
    pub max_gather_bounces: u32,
    pub rejection_probability: f32,
    pub roughness_threshold: f32,
    pub min_contribution: f32,
    pub photon_radius: f32,
    pub caustic_radius: f32,
    pub flags: u32,
}

impl PhotonTracingPassParams {
    pub const FLAG_CAUSTICS: u32 = 1;
    pub const FLAG_CULLING: u32 = 2;

    pub fn has_caustics(&self) -> bool {
        self.flags & Self::FLAG_CAUSTICS > 0
    }

    pub fn has_culling(&self) -> bool {
        self.flags & Self::FLAG_CULLING > 0
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PhotonCollectionPassParams {
    pub seed: u32,
    pub roughness_threshold: f32,
    pub max_luminance: f32,
    pub min_contribution: f32,
    pub flags: u32,
}

impl PhotonCollectionPassParams {
    /// Candidates get weighted by their target function; without this flag
    /// they're picked uniformly
    pub const FLAG_RIS: u32 = 1;
    pub const FLAG_STOCHASTIC: u32 = 2;

    pub fn has_ris(&self) -> bool {
        self.flags & Self::FLAG_RIS > 0
    }

    pub fn is_stochastic(&self) -> bool {
        self.flags & Self::FLAG_STOCHASTIC > 0
    }
}

/// Settings shared by all passes that merge reservoirs.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ResamplerParams {
    /// See: [`BiasCorrection::encode()`]
    pub bias_correction: u32,
    pub central_weight: f32,
    pub max_luminance: f32,
    pub min_contribution: f32,
}

impl ResamplerParams {
    pub fn bias_correction(&self) -> BiasCorrection {
        BiasCorrection::decode(self.bias_correction)
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct TemporalResamplingPassParams {
    pub seed: u32,
    pub history_length: f32,
    pub similarity: SimilarityThresholds,
    pub resampler: ResamplerParams,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SpatialResamplingPassParams {
    pub seed: u32,
    pub samples: u32,
    pub boost_samples: u32,
    pub radius: f32,
    pub similarity: SimilarityThresholds,
    pub resampler: ResamplerParams,
    pub flags: u32,
}

impl SpatialResamplingPassParams {
    /// Every pixel gets `samples` neighbours; without this flag only the
    /// disoccluded ones do (and they get `boost_samples` of them).
    pub const FLAG_ALL_PIXELS: u32 = 1;

    pub fn has_all_pixels(&self) -> bool {
        self.flags & Self::FLAG_ALL_PIXELS > 0
    }

    pub fn sample_count(&self, disoccluded: bool) -> u32 {
        let base = if self.has_all_pixels() { self.samples } else { 0 };
        let boost = if disoccluded { self.boost_samples } else { 0 };

        base + boost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_count() {
        let mut target = SpatialResamplingPassParams {
            samples: 3,
            boost_samples: 8,
            flags: SpatialResamplingPassParams::FLAG_ALL_PIXELS,
            ..Default::default()
        };

        assert_eq!(3, target.sample_count(false));
        assert_eq!(11, target.sample_count(true));

        target.flags = 0;

        assert_eq!(0, target.sample_count(false));
        assert_eq!(8, target.sample_count(true));
    }
}
