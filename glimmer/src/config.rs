use derivative::Derivative;
use glimmer_gpu::{BiasCorrection, CausticMode, ResamplingMode};
use log::warn;

/// Knobs of the pipeline.
///
/// Out-of-range values are not rejected; they get clamped (with a warning)
/// when the config is handed to the engine, see [`Config::clamped()`].
#[derive(Clone, Debug, PartialEq, Derivative)]
#[derivative(Default)]
pub struct Config {
    /// Number of photons emitted each frame; also the capacity of each photon
    /// stream
    #[derivative(Default(value = "100_000"))]
    pub photons_per_frame: u32,

    #[derivative(Default(value = "8"))]
    pub max_photon_bounces: u32,

    /// Gather radius of global photons
    #[derivative(Default(value = "0.05"))]
    pub photon_radius: f32,

    /// Gather radius of caustic photons
    #[derivative(Default(value = "0.02"))]
    pub caustic_photon_radius: f32,

    /// Probability of discarding a global photon, which leaves more room for
    /// caustic ones
    #[derivative(Default(value = "0.9"))]
    pub global_photon_rejection_probability: f32,

    /// Surfaces rougher than this don't gather photons
    #[derivative(Default(value = "0.25"))]
    pub roughness_threshold: f32,

    /// Number of diffuse bounces whose photons feed the final gather
    #[derivative(Default(value = "4"))]
    pub max_final_gather_bounces: u32,

    #[derivative(Default(value = "true"))]
    pub use_final_gather_ris: bool,

    pub resampling_mode: ResamplingMode,

    /// Maximum number of candidates a reservoir can remember
    #[derivative(Default(value = "30"))]
    pub temporal_history_length: u32,

    #[derivative(Default(value = "3"))]
    pub spatial_samples: u32,

    /// In pixels
    #[derivative(Default(value = "20.0"))]
    pub spatial_radius: f32,

    /// Number of extra spatial samples taken for disoccluded pixels
    #[derivative(Default(value = "8"))]
    pub disocclusion_boost_samples: u32,

    /// Minimum cosine between normals of surfaces that share reservoirs
    #[derivative(Default(value = "0.9"))]
    pub normal_threshold: f32,

    /// Maximum relative depth difference between surfaces that share
    /// reservoirs
    #[derivative(Default(value = "0.1"))]
    pub depth_threshold: f32,

    pub caustic_mode: CausticMode,

    #[derivative(Default(value = "1"))]
    pub caustic_spatial_samples: u32,

    /// In pixels
    #[derivative(Default(value = "2.0"))]
    pub caustic_spatial_radius: f32,

    pub bias_correction: BiasCorrection,

    /// Share of the central sample in pairwise MIS
    #[derivative(Default(value = "0.1"))]
    pub pairwise_mis_central_weight: f32,

    /// Luminance above which contributions get scaled down
    #[derivative(Default(value = "10.0"))]
    pub max_luminance: f32,

    /// Luminance below which contributions get discarded
    #[derivative(Default(value = "0.001"))]
    pub min_photon_contribution: f32,

    #[derivative(Default(value = "true"))]
    pub use_photon_culling: bool,

    /// Collects global and caustic photons in separate passes instead of a
    /// single one
    pub use_split_collection: bool,

    /// Caps the number of photons considered per pixel
    pub use_stochastic_collection: bool,
}

impl Config {
    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.apply_preset(preset);
        self
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        match preset {
            Preset::Nrd => {
                self.spatial_samples = 2;
                self.spatial_radius = 15.0;
                self.temporal_history_length = 20;
            }

            Preset::RayReconstruction => {
                self.spatial_samples = 4;
                self.spatial_radius = 25.0;
                self.temporal_history_length = 40;
                self.bias_correction = BiasCorrection::Pairwise;
            }
        }
    }

    /// Returns a copy of this config with all values brought into their
    /// valid ranges.
    pub fn clamped(&self) -> Self {
        fn clamp<T>(name: &str, value: T, min: T, max: T) -> T
        where
            T: PartialOrd + Copy + std::fmt::Debug,
        {
            // Written so that NaNs end up at `min`
            let clamped = if value >= min {
                if value <= max {
                    value
                } else {
                    max
                }
            } else {
                min
            };

            if clamped != value {
                warn!(
                    "Config value out of range: {name} = {value:?}; using {clamped:?}",
                );
            }

            clamped
        }

        Self {
            photons_per_frame: clamp(
                "photons_per_frame",
                self.photons_per_frame,
                10_000,
                1_000_000,
            ),
            max_photon_bounces: clamp(
                "max_photon_bounces",
                self.max_photon_bounces,
                1,
                32,
            ),
            photon_radius: clamp(
                "photon_radius",
                self.photon_radius,
                0.001,
                1.0,
            ),
            caustic_photon_radius: clamp(
                "caustic_photon_radius",
                self.caustic_photon_radius,
                0.001,
                0.5,
            ),
            global_photon_rejection_probability: clamp(
                "global_photon_rejection_probability",
                self.global_photon_rejection_probability,
                0.0,
                0.99,
            ),
            roughness_threshold: clamp(
                "roughness_threshold",
                self.roughness_threshold,
                0.01,
                1.0,
            ),
            max_final_gather_bounces: clamp(
                "max_final_gather_bounces",
                self.max_final_gather_bounces,
                1,
                16,
            ),
            temporal_history_length: clamp(
                "temporal_history_length",
                self.temporal_history_length,
                1,
                100,
            ),
            spatial_samples: clamp(
                "spatial_samples",
                self.spatial_samples,
                1,
                16,
            ),
            spatial_radius: clamp(
                "spatial_radius",
                self.spatial_radius,
                1.0,
                100.0,
            ),
            disocclusion_boost_samples: clamp(
                "disocclusion_boost_samples",
                self.disocclusion_boost_samples,
                0,
                32,
            ),
            normal_threshold: clamp(
                "normal_threshold",
                self.normal_threshold,
                0.5,
                1.0,
            ),
            depth_threshold: clamp(
                "depth_threshold",
                self.depth_threshold,
                0.01,
                0.5,
            ),
            caustic_spatial_samples: clamp(
                "caustic_spatial_samples",
                self.caustic_spatial_samples,
                1,
                8,
            ),
            caustic_spatial_radius: clamp(
                "caustic_spatial_radius",
                self.caustic_spatial_radius,
                0.5,
                10.0,
            ),
            pairwise_mis_central_weight: clamp(
                "pairwise_mis_central_weight",
                self.pairwise_mis_central_weight,
                0.01,
                1.0,
            ),
            max_luminance: clamp(
                "max_luminance",
                self.max_luminance,
                1.0,
                100.0,
            ),
            min_photon_contribution: clamp(
                "min_photon_contribution",
                self.min_photon_contribution,
                0.0001,
                0.1,
            ),
            ..self.clone()
        }
    }
}

/// Tunings for particular downstream denoisers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Shorter history, moderate spatial reuse
    Nrd,

    /// Longer history, heavier spatial reuse
    RayReconstruction,
}
