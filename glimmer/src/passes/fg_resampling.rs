use glimmer_gpu::{
    GBufferEntry, ResamplingMode, Scene, SpatialResamplingPassParams,
    TemporalResamplingPassParams,
};
use log::debug;

use super::resampling;
use crate::{Buffers, Config, FrameContext, Image};

#[derive(Debug)]
pub struct FgResamplingPass {
    mode: ResamplingMode,
    temporal: TemporalResamplingPassParams,
    spatial: SpatialResamplingPassParams,
}

impl FgResamplingPass {
    pub fn new(config: &Config) -> Self {
        let mode = config.resampling_mode;
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
            samples: config.spatial_samples,
            boost_samples: if mode.has_temporal() {
                config.disocclusion_boost_samples
            } else {
                0
            },
            radius: config.spatial_radius,
            similarity,
            resampler,
            flags: if mode.has_spatial() {
                SpatialResamplingPassParams::FLAG_ALL_PIXELS
            } else {
                0
            },
        };

        Self {
            mode,
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
            debug!("Resampling final gather (temporal)");

            let params = TemporalResamplingPassParams {
                seed: ctx.seed_for("fg_resampling:temporal"),
                ..self.temporal
            };

            resampling::temporal(
                &params,
                ctx,
                gbuffer,
                &buffers.surfaces,
                &mut buffers.fg_reservoirs,
                Some(&mut buffers.disocclusions),
            );
        } else {
            buffers.disocclusions.clear();
        }

        // In temporal-only mode, the spatial step still runs so that
        // disoccluded pixels get their boost samples
        if self.spatial.has_all_pixels() || self.spatial.boost_samples > 0 {
            debug!("Resampling final gather (spatial)");

            let params = SpatialResamplingPassParams {
                seed: ctx.seed_for("fg_resampling:spatial"),
                ..self.spatial
            };

            resampling::spatial(
                &params,
                scene,
                buffers.surfaces.curr(ctx),
                buffers.fg_reservoirs.curr_mut(ctx),
                &mut buffers.fg_scratch,
                Some(&buffers.disocclusions),
            );
        }
    }
}
