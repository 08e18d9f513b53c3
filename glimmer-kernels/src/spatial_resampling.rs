use glimmer_gpu::prelude::*;

/// Merges pixel's reservoir with reservoirs of its neighbours.
///
/// `reservoirs` is a snapshot shared by all pixels and `out` is where this
/// pixel's result lands, so this can run in parallel over the whole frame.
#[allow(clippy::too_many_arguments)]
pub fn main<T, S>(
    screen_pos: UVec2,
    params: &SpatialResamplingPassParams,
    viewport: Viewport,
    scene: &S,
    surfaces: &[Surface],
    reservoirs: &[Reservoir<T>],
    disoccluded: bool,
    neighbours: &mut Vec<Neighbour<T>>,
    out: &mut Reservoir<T>,
) where
    T: ReservoirSample,
    S: Scene + ?Sized,
{
    let screen_idx = viewport.screen_to_idx(screen_pos);
    let surface = surfaces[screen_idx];
    let canonical = reservoirs[screen_idx];

    *out = canonical;

    if !surface.is_some() {
        return;
    }

    let sample_count = params.sample_count(disoccluded);

    if sample_count == 0 {
        return;
    }

    // -------------------------------------------------------------------------

    let mut wnoise = WhiteNoise::new(params.seed, screen_pos);
    let resampler = Resampler::new(params.resampler);
    let rotation = 2.0 * PI * wnoise.sample();

    neighbours.clear();

    for sample_idx in 0..sample_count {
        let offset =
            golden_spiral(sample_idx, sample_count, params.radius, rotation);

        let sample_pos = viewport
            .contain((screen_pos.as_vec2() + offset).round().as_ivec2());

        if sample_pos == screen_pos {
            continue;
        }

        let sample_idx = viewport.screen_to_idx(sample_pos);
        let sample_surface = surfaces[sample_idx];

        if !surface.is_similar_to(&sample_surface, params.similarity) {
            continue;
        }

        let reservoir = reservoirs[sample_idx];

        if reservoir.is_empty() {
            continue;
        }

        let visible = resampler.mode != BiasCorrection::Raytraced
            || !scene.is_occluded(reservoir.sample.origin(), surface.position);

        neighbours.push(Neighbour {
            reservoir,
            surface: sample_surface,
            visible,
        });
    }

    // -------------------------------------------------------------------------

    *out = resampler.resample(&mut wnoise, &canonical, &surface, neighbours);
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const VIEWPORT: Viewport = Viewport::new(uvec2(8, 8));

    fn params(bias_correction: BiasCorrection) -> SpatialResamplingPassParams {
        SpatialResamplingPassParams {
            seed: 1,
            samples: 4,
            boost_samples: 8,
            radius: 3.0,
            similarity: SimilarityThresholds {
                normal: 0.9,
                depth: 0.1,
            },
            resampler: ResamplerParams {
                bias_correction: bias_correction.encode(),
                central_weight: 0.1,
                max_luminance: 1000.0,
                min_contribution: 0.0,
            },
            flags: SpatialResamplingPassParams::FLAG_ALL_PIXELS,
        }
    }

    fn surface() -> Surface {
        Surface {
            position: Vec3::ZERO,
            normal: Vec3::Y,
            roughness: 1.0,
            albedo: Vec3::ONE,
            view_dir: Vec3::Y,
            depth: 1.0,
        }
    }

    fn reservoir(radiance: f32) -> FgReservoir {
        let sample = FgSample {
            position: vec3(0.0, 0.0, 0.0),
            normal: Vec3::Y,
            radiance: Vec3::splat(radiance),
            count: 1.0,
        };

        let p_hat = sample.target(&surface());

        Reservoir {
            sample,
            w_sum: 2.0 * p_hat,
            p_hat,
            m: 2.0,
            age: 0,
        }
    }

    fn run(
        params: &SpatialResamplingPassParams,
        scene: &Primitives,
        surfaces: &[Surface],
        reservoirs: &[FgReservoir],
        disoccluded: bool,
    ) -> FgReservoir {
        let mut out = FgReservoir::default();

        main(
            uvec2(4, 4),
            params,
            VIEWPORT,
            scene,
            surfaces,
            reservoirs,
            disoccluded,
            &mut Vec::new(),
            &mut out,
        );

        out
    }

    #[test]
    fn merges_neighbours() {
        let surfaces = vec![surface(); VIEWPORT.len()];
        let reservoirs = vec![reservoir(1.0); VIEWPORT.len()];

        for mode in [BiasCorrection::Basic, BiasCorrection::Pairwise] {
            let actual = run(
                &params(mode),
                &Primitives::default(),
                &surfaces,
                &reservoirs,
                false,
            );

            assert!(actual.m > 2.0);
            assert!(actual.m <= 10.0);

            assert_relative_eq!(
                actual.contribution_weight(),
                1.0,
                epsilon = 0.0001
            );
        }
    }

    #[test]
    fn boost() {
        let surfaces = vec![surface(); VIEWPORT.len()];
        let reservoirs = vec![reservoir(1.0); VIEWPORT.len()];

        let params = SpatialResamplingPassParams {
            flags: 0,
            ..params(BiasCorrection::Basic)
        };

        let actual = run(
            &params,
            &Primitives::default(),
            &surfaces,
            &reservoirs,
            false,
        );

        assert_eq!(reservoir(1.0), actual);

        let actual = run(
            &params,
            &Primitives::default(),
            &surfaces,
            &reservoirs,
            true,
        );

        assert!(actual.m > 2.0);
    }

    #[test]
    fn skips_dissimilar_neighbours() {
        let mut surfaces = vec![
            Surface {
                depth: 5.0,
                ..surface()
            };
            VIEWPORT.len()
        ];

        surfaces[VIEWPORT.screen_to_idx(uvec2(4, 4))] = surface();

        let reservoirs = vec![reservoir(1.0); VIEWPORT.len()];

        let actual = run(
            &params(BiasCorrection::Basic),
            &Primitives::default(),
            &surfaces,
            &reservoirs,
            false,
        );

        assert_eq!(reservoir(1.0), actual);
    }

    #[test]
    fn raytraced_visibility() {
        // Neighbours' samples lie beneath an opaque floor, so none of them can
        // reach our surface
        let scene = Primitives::new([Primitive::Plane {
            point: vec3(0.0, 0.5, 0.0),
            normal: Vec3::Y,
            material: Material::diffuse(Vec3::ONE, 1.0),
        }]);

        let surfaces = vec![
            Surface {
                position: vec3(0.0, 1.0, 0.0),
                ..surface()
            };
            VIEWPORT.len()
        ];

        let mut reservoirs = vec![reservoir(100.0); VIEWPORT.len()];

        reservoirs[VIEWPORT.screen_to_idx(uvec2(4, 4))] = reservoir(1.0);

        let actual = run(
            &params(BiasCorrection::Raytraced),
            &scene,
            &surfaces,
            &reservoirs,
            false,
        );

        assert_eq!(reservoir(1.0).sample, actual.sample);
        assert_relative_eq!(actual.contribution_weight(), 1.0, epsilon = 0.0001);
    }
}
