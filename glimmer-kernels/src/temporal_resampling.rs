use glimmer_gpu::prelude::*;

/// Merges pixel's reservoir with its history from the previous frame.
///
/// Returns whether the pixel got disoccluded, i.e. whether its history had to
/// be discarded.
#[allow(clippy::too_many_arguments)]
pub fn main<T>(
    screen_pos: UVec2,
    params: &TemporalResamplingPassParams,
    viewport: Viewport,
    gbuffer: &GBufferEntry,
    surface: &Surface,
    prev_surfaces: &[Surface],
    prev_reservoirs: &[Reservoir<T>],
    reservoir: &mut Reservoir<T>,
) -> bool
where
    T: ReservoirSample,
{
    if !surface.is_some() {
        return false;
    }

    let mut wnoise = WhiteNoise::new(params.seed, screen_pos);
    let reprojection = Reprojection::new(viewport, screen_pos, gbuffer.motion);

    let Some(prev_pos) = reprojection.prev_pos() else {
        reservoir.age = 0;
        return true;
    };

    let prev_idx = viewport.screen_to_idx(prev_pos);
    let prev_surface = prev_surfaces[prev_idx];

    if !surface.is_similar_to(&prev_surface, params.similarity) {
        reservoir.age = 0;
        return true;
    }

    // -------------------------------------------------------------------------

    let prev = prev_reservoirs[prev_idx];

    let neighbour = Neighbour {
        reservoir: prev,
        surface: prev_surface,
        visible: true,
    };

    let mut out = Resampler::new(params.resampler).resample(
        &mut wnoise,
        reservoir,
        surface,
        &[neighbour],
    );

    out.clamp_m(params.history_length);
    out.age = if prev.is_empty() { 0 } else { prev.age + 1 };

    *reservoir = out;

    false
}
