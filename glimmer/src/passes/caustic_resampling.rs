use glimmer_gpu::{
    CausticMode, GBufferEntry, Scene, SpatialResamplingPassParams,
    TemporalResamplingPassParams,
};
use log::debug;

use super::resampling;
use crate::{Buffers, Config, FrameContext, Image};

/// Like [`super::FgResamplingPass`], but tuned for caustics: temporal reuse
/// by default, and at most a tightly bounded spatial one.
#[derive(Debug)]
pub struct CausticResamplingPass {
    mode: CausticMode,
    temporal: TemporalResamplingPassParams,
    spatial: SpatialResamplingPassParams,
}

impl CausticResamplingPass {
    pub fn new(config: &Config) -> Self {
        let similarity = resampling::similarity(config);
        let resampler = resampling::resampler(config);

        let temporal = TemporalResamplingPassParams {
            seed: 0,
            history_length: config.temporal_history_length as f32,
            similarity,
            resampler,
        };

        let spatial = SpatialResamplingPassParams {
            seed: 0,
            samples: config.caustic_spatial_samples,
            boost_samples: 0,
            radius: config.caustic_spatial_radius,
            similarity,
            resampler,
            flags: SpatialResamplingPassParams::FLAG_ALL_PIXELS,
        };

        Self {
            mode: config.caustic_mode,
            temporal,
            spatial,
        }
    }

    pub fn run<S>(
        &self,
        ctx: &FrameContext,
        scene: &S,
        gbuffer: &Image<GBufferEntry>,
        buffers: &mut Buffers,
    ) where
        S: Scene + ?Sized,
    {
        if self.mode.has_temporal() {
            debug!("Resampling caustics (temporal)");

            let params = TemporalResamplingPassParams {
                seed: ctx.seed_for("caustic_resampling:temporal"),
                ..self.temporal
            };

            resampling::temporal(
                &params,
                ctx,
                gbuffer,
                &buffers.surfaces,
                &mut buffers.caustic_reservoirs,
                None,
            );
        }

        if self.mode.has_spatial() {
            debug!("Resampling caustics (spatial)");

            let params = SpatialResamplingPassParams {
                seed: ctx.seed_for("caustic_resampling:spatial"),
                ..self.spatial
            };

            resampling::spatial(
                &params,
                scene,
                buffers.surfaces.curr(ctx),
                buffers.caustic_reservoirs.curr_mut(ctx),
                &mut buffers.caustic_scratch,
                None,
            );
        }
    }
}
