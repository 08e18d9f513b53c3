//! Resampling steps shared by the final-gather and caustic reservoirs.

use std::mem;

use glimmer_gpu::{
    GBufferEntry, ResamplerParams, Reservoir, ReservoirSample, Scene,
    SimilarityThresholds, SpatialResamplingPassParams, Surface,
    TemporalResamplingPassParams,
};
use glimmer_kernels::{spatial_resampling, temporal_resampling};
use rayon::prelude::*;

use crate::{Config, DoubleBuffered, FrameContext, Image};

/// Merges current reservoirs with their history, optionally recording which
/// pixels got disoccluded.
pub fn temporal<T>(
    params: &TemporalResamplingPassParams,
    ctx: &FrameContext,
    gbuffer: &Image<GBufferEntry>,
    surfaces: &DoubleBuffered<Image<Surface>>,
    reservoirs: &mut DoubleBuffered<Image<Reservoir<T>>>,
    disocclusions: Option<&mut Image<bool>>,
) where
    T: ReservoirSample + Send + Sync,
{
    let curr_surfaces = surfaces.curr(ctx).as_slice();
    let prev_surfaces = surfaces.prev(ctx).as_slice();
    let (curr_reservoirs, prev_reservoirs) = reservoirs.split_mut(ctx);
    let prev_reservoirs = prev_reservoirs.as_slice();
    let viewport = gbuffer.viewport();
    let gbuffer = gbuffer.as_slice();

    let run = |idx: usize, reservoir: &mut Reservoir<T>| -> bool {
        temporal_resampling::main(
            viewport.idx_to_screen(idx),
            params,
            viewport,
            &gbuffer[idx],
            &curr_surfaces[idx],
            prev_surfaces,
            prev_reservoirs,
            reservoir,
        )
    };

    let curr_reservoirs = curr_reservoirs.as_mut_slice().par_iter_mut();

    match disocclusions {
        Some(disocclusions) => {
            curr_reservoirs
                .zip(disocclusions.as_mut_slice().par_iter_mut())
                .enumerate()
                .for_each(|(idx, (reservoir, disoccluded))| {
                    *disoccluded = run(idx, reservoir);
                });
        }

        None => {
            curr_reservoirs.enumerate().for_each(|(idx, reservoir)| {
                run(idx, reservoir);
            });
        }
    }
}

/// Merges current reservoirs with their neighbours.
#[allow(clippy::too_many_arguments)]
pub fn spatial<T, S>(
    params: &SpatialResamplingPassParams,
    scene: &S,
    surfaces: &Image<Surface>,
    reservoirs: &mut Image<Reservoir<T>>,
    scratch: &mut Image<Reservoir<T>>,
    disocclusions: Option<&Image<bool>>,
) where
    T: ReservoirSample + Send + Sync,
    S: Scene + ?Sized,
{
    let viewport = surfaces.viewport();
    let surfaces = surfaces.as_slice();
    let input = reservoirs.as_slice();

    scratch
        .as_mut_slice()
        .par_iter_mut()
        .enumerate()
        .for_each_init(Vec::new, |neighbours, (idx, out)| {
            let disoccluded =
                disocclusions.map_or(false, |disocclusions| {
                    disocclusions.as_slice()[idx]
                });

            spatial_resampling::main(
                viewport.idx_to_screen(idx),
                params,
                viewport,
                scene,
                surfaces,
                input,
                disoccluded,
                neighbours,
                out,
            );
        });

    mem::swap(reservoirs, scratch);
}

pub fn similarity(config: &Config) -> SimilarityThresholds {
    SimilarityThresholds {
        normal: config.normal_threshold,
        depth: config.depth_threshold,
    }
}

pub fn resampler(config: &Config) -> ResamplerParams {
    ResamplerParams {
        bias_correction: config.bias_correction.encode(),
        central_weight: config.pairwise_mis_central_weight,
        max_luminance: config.max_luminance,
        min_contribution: config.min_photon_contribution,
    }
}
