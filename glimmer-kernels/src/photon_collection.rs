use glimmer_gpu::prelude::*;

/// Maximum number of candidates considered per pixel when stochastic
/// collection is enabled.
pub const STOCHASTIC_COLLECTION_LIMIT: u32 = 32;

/// Gathers photons around a single pixel and seeds its reservoir with them.
///
/// `density` receives the plain density estimate of the gathered photons
/// (accumulated, so that both streams can share the same image).
#[allow(clippy::too_many_arguments)]
pub fn main<T, I>(
    screen_pos: UVec2,
    params: &PhotonCollectionPassParams,
    surface: &Surface,
    map: &PhotonMap<I>,
    candidates: &mut Vec<u32>,
    reservoir: &mut Reservoir<T>,
    density: &mut Vec3,
) where
    T: ReservoirSample,
    I: PhotonIndex,
{
    *reservoir = Reservoir::default();

    if !surface.accepts_photons(params.roughness_threshold) {
        return;
    }

    // A query that finds nothing still counts as one zero-weight candidate, so
    // that temporal reuse sees the pixel went dark
    reservoir.m = 1.0;

    if map.is_empty() {
        return;
    }

    // -------------------------------------------------------------------------

    map.gather(surface.position, surface.normal, candidates);

    let count = candidates.len() as u32;

    if count == 0 {
        return;
    }

    reservoir.m = 0.0;

    for &id in candidates.iter() {
        *density += T::from_photon(&map.get(id), surface, 1, map.radius())
            .contribution(surface);
    }

    // -------------------------------------------------------------------------

    let mut wnoise = WhiteNoise::new(params.seed, screen_pos);

    let clamps = Clamps {
        max_luminance: params.max_luminance,
        min_contribution: params.min_contribution,
    };

    let draws = if params.is_stochastic() {
        count.min(STOCHASTIC_COLLECTION_LIMIT)
    } else {
        count
    };

    for i in 0..draws {
        let id = if draws < count {
            candidates[wnoise.sample_index(count as usize)]
        } else {
            candidates[i as usize]
        };

        let sample = T::from_photon(&map.get(id), surface, count, map.radius());
        let (sample, p_hat) = clamps.candidate(sample, surface);

        let weight = if params.has_ris() {
            p_hat
        } else if p_hat > 0.0 {
            1.0
        } else {
            0.0
        };

        reservoir.update(&mut wnoise, sample, p_hat, weight);
    }

    // Candidates picked uniformly carry no information about the target
    // function, so fold it in now; this makes the contribution weight equal
    // the fraction of non-zero candidates
    if !params.has_ris() {
        reservoir.w_sum *= reservoir.p_hat;
    }
}
