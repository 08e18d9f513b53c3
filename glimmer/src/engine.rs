use std::marker::PhantomData;

use glam::{UVec2, Vec3};
use glimmer_gpu::{Frame, GBufferEntry, Lights, PhotonIndex, Scene};
use log::{debug, info, warn};

use crate::utils::measure;
use crate::{Buffers, Config, FrameContext, Image, Passes, PhotonGrid};

/// Entry point of the pipeline.
///
/// Each call to [`Engine::render()`] traces a fresh batch of photons, gathers
/// them around the GBuffer's surfaces and resamples the gathered reservoirs
/// against their history and their neighbours.
///
/// `I` selects the spatial index built over photons; since default type
/// parameters don't take part in inference, it's easiest to spell the type
/// out, e.g. `let engine: Engine = Engine::new(config);`.
pub struct Engine<I = PhotonGrid> {
    config: Config,
    passes: Passes,
    buffers: Option<Buffers>,
    frame: Frame,
    has_history: bool,
    enabled: bool,
    _index: PhantomData<fn() -> I>,
}

impl<I> Engine<I>
where
    I: PhotonIndex,
{
    pub fn new(config: Config) -> Self {
        info!("Initializing");

        let config = config.clamped();
        let passes = Passes::new(&config);

        Self {
            config,
            passes,
            buffers: None,
            frame: Frame::default(),
            has_history: false,
            enabled: true,
            _index: PhantomData,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replaces the configuration; takes effect starting from the next
    /// frame.
    pub fn set_config(&mut self, config: Config) {
        let config = config.clamped();

        if config == self.config {
            return;
        }

        debug!("Updating config");

        self.passes = Passes::new(&config);

        if let Some(buffers) = &mut self.buffers {
            buffers.set_photon_capacity(config.photons_per_frame as usize);
        }

        self.config = config;
    }

    /// Returns number of the next frame to be rendered.
    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Returns whether the next frame will be able to reuse reservoirs from
    /// the previous one.
    pub fn has_history(&self) -> bool {
        self.has_history
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables rendering; when disabled, [`Engine::render()`]
    /// doesn't do anything and outputs keep their last values.
    ///
    /// Re-enabling starts from a cold state, since whatever's left in the
    /// buffers doesn't correspond to the previous frame anymore.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled == self.enabled {
            return;
        }

        if enabled {
            info!("Enabling");
            self.has_history = false;
        } else {
            info!("Disabling");
        }

        self.enabled = enabled;
    }

    /// Discards history, e.g. after the camera got teleported.
    pub fn reset(&mut self) {
        debug!("Resetting history");

        self.has_history = false;
    }

    /// Renders a frame using a random seed.
    pub fn render<S>(
        &mut self,
        scene: &S,
        lights: &Lights,
        gbuffer: &Image<GBufferEntry>,
    ) where
        S: Scene + ?Sized,
    {
        self.render_with_seed(scene, lights, gbuffer, rand::random());
    }

    /// Renders a frame; its resolution is the GBuffer's size.
    pub fn render_with_seed<S>(
        &mut self,
        scene: &S,
        lights: &Lights,
        gbuffer: &Image<GBufferEntry>,
        seed: u32,
    ) where
        S: Scene + ?Sized,
    {
        if !self.enabled {
            return;
        }

        let size = gbuffer.size();

        if size.x == 0 || size.y == 0 {
            warn!("Skipping frame; GBuffer is empty ({}x{})", size.x, size.y);
            return;
        }

        self.ensure_buffers(size);

        let Some(buffers) = &mut self.buffers else {
            return;
        };

        let ctx = FrameContext {
            frame: self.frame,
            seed,
            has_history: self.has_history,
        };

        let passes = &self.passes;

        debug!(
            "Rendering frame {}; has_history = {}",
            ctx.frame.get(),
            ctx.has_history,
        );

        measure("photon_tracing", || {
            passes.photon_tracing.run(&ctx, scene, lights, buffers);
        });

        let maps = measure("photon_indexing", || {
            passes.photon_indexing.run::<I>(buffers)
        });

        measure("photon_collection", || {
            passes.photon_collection.run(&ctx, gbuffer, &maps, buffers);
        });

        if ctx.has_history {
            // Without photons in a stream, nothing in its history can be
            // trusted anymore and the frame's contribution is empty
            if maps.global.is_empty() {
                debug!("No global photons; skipping final-gather resampling");

                buffers.disocclusions.clear();
            } else {
                measure("fg_resampling", || {
                    passes.fg_resampling.run(&ctx, scene, gbuffer, buffers);
                });
            }

            if maps.caustic.is_empty() {
                debug!("No caustic photons; skipping caustic resampling");
            } else {
                measure("caustic_resampling", || {
                    passes
                        .caustic_resampling
                        .run(&ctx, scene, gbuffer, buffers);
                });
            }
        } else {
            debug!("Cold start; skipping resampling");

            buffers.disocclusions.clear();
        }

        measure("final_shading", || {
            passes.final_shading.run(&ctx, buffers);
        });

        self.frame = self.frame.next();
        self.has_history = true;
    }

    fn ensure_buffers(&mut self, size: UVec2) {
        let is_stale = self
            .buffers
            .as_ref()
            .map_or(true, |buffers| buffers.viewport().size() != size);

        if is_stale {
            info!("Resolution changed to {}x{}", size.x, size.y);

            self.buffers = Some(Buffers::new(&self.config, size));
            self.has_history = false;
        }
    }

    /// Returns diffuse indirect lighting of the last rendered frame.
    pub fn diffuse(&self) -> Option<&Image<Vec3>> {
        self.buffers.as_ref().map(|buffers| &buffers.diffuse)
    }

    /// Returns caustic lighting of the last rendered frame.
    pub fn caustic(&self) -> Option<&Image<Vec3>> {
        self.buffers.as_ref().map(|buffers| &buffers.caustic)
    }

    /// Returns plain (unresampled) density estimate of all photons gathered
    /// in the last rendered frame; useful for debugging.
    pub fn photon_density(&self) -> Option<&Image<Vec3>> {
        self.buffers.as_ref().map(|buffers| &buffers.photon_density)
    }

    pub fn photon_stats(&self) -> Option<PhotonStats> {
        self.buffers.as_ref().map(|buffers| PhotonStats {
            global: buffers.global_photons.len(),
            caustic: buffers.caustic_photons.len(),
            dropped: buffers.global_photons.dropped()
                + buffers.caustic_photons.dropped(),
        })
    }
}

/// Number of photons stored during the last rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhotonStats {
    pub global: usize,
    pub caustic: usize,

    /// Photons that didn't fit into their stream
    pub dropped: usize,
}

#[cfg(test)]
mod tests {
    use core::f32::consts::PI;

    use approx::assert_relative_eq;
    use glam::{uvec2, vec2, vec3};
    use glimmer_gpu::{
        BiasCorrection, CausticMode, Light, Material, Primitive, Primitives,
        ResamplingMode,
    };

    use super::*;
    use crate::PhotonBvh;

    const LIGHT_INTENSITY: f32 = 2.0;

    fn scene() -> Primitives {
        Primitives::new([Primitive::Plane {
            point: Vec3::ZERO,
            normal: Vec3::Y,
            material: Material::diffuse(Vec3::ONE, 1.0),
        }])
    }

    fn lights() -> Lights {
        Lights::new(vec![Light::point(
            Vec3::Y,
            Vec3::splat(LIGHT_INTENSITY),
        )])
    }

    /// Camera hanging at (0, 10, 0), looking straight down at a 0.2x0.2
    /// patch of the plane.
    fn gbuffer(size: UVec2) -> Image<GBufferEntry> {
        let camera = vec3(0.0, 10.0, 0.0);

        Image::from_fn(size, |pos| {
            let uv = (pos.as_vec2() + 0.5) / size.as_vec2();
            let xz = (uv - 0.5) * 0.2;
            let position = vec3(xz.x, 0.0, xz.y);

            GBufferEntry {
                position,
                normal: Vec3::Y,
                roughness: 1.0,
                albedo: Vec3::ONE,
                view_dir: (camera - position).normalize(),
                motion: vec2(0.0, 0.0),
                depth: camera.distance(position),
            }
        })
    }

    /// Radiance reflected by a white Lambertian plane lit by the point light
    /// hanging 1 unit above the origin.
    fn expected_radiance(position: Vec3) -> f32 {
        let height = 1.0f32;
        let rho2 = position.x * position.x + position.z * position.z;

        LIGHT_INTENSITY * height / (height * height + rho2).powf(1.5) / PI
    }

    fn config() -> Config {
        Config {
            photons_per_frame: 100_000,
            photon_radius: 0.05,
            global_photon_rejection_probability: 0.0,
            roughness_threshold: 1.0,
            caustic_mode: CausticMode::None,
            min_photon_contribution: 0.0001,
            ..Default::default()
        }
    }

    /// Returns the mean ratio between the rendered and the expected
    /// radiance, together with the mean squared error.
    fn errors(
        gbuffer: &Image<GBufferEntry>,
        diffuse: &Image<Vec3>,
    ) -> (f32, f32) {
        let mut actual_sum = 0.0;
        let mut expected_sum = 0.0;
        let mut mse = 0.0;

        for (entry, radiance) in gbuffer.iter().zip(diffuse.iter()) {
            let expected = expected_radiance(entry.position);

            actual_sum += radiance.y;
            expected_sum += expected;
            mse += (radiance.y - expected).powi(2);
        }

        (actual_sum / expected_sum, mse / diffuse.as_slice().len() as f32)
    }

    /// Renders a couple of frames and returns [`errors()`] of the last one.
    fn render(config: Config, frames: u32) -> (f32, f32) {
        let scene = scene();
        let lights = lights();
        let gbuffer = gbuffer(uvec2(16, 16));
        let mut target: Engine = Engine::new(config);

        for frame in 0..frames {
            target.render_with_seed(&scene, &lights, &gbuffer, 1000 + frame);
        }

        errors(&gbuffer, target.diffuse().unwrap())
    }

    /// Renders `warmup + frames` frames and returns the mean squared error
    /// averaged over the last `frames` of them.
    fn mean_mse(config: Config, warmup: u32, frames: u32) -> f32 {
        let scene = scene();
        let lights = lights();
        let gbuffer = gbuffer(uvec2(32, 32));
        let mut target: Engine = Engine::new(config);
        let mut mse = 0.0;

        for frame in 0..(warmup + frames) {
            target.render_with_seed(&scene, &lights, &gbuffer, 2000 + frame);

            if frame >= warmup {
                mse += errors(&gbuffer, target.diffuse().unwrap()).1;
            }
        }

        mse / frames as f32
    }

    /// Smaller photons and count-based weights, so that every pixel's
    /// estimate is noisy and each reused reservoir counts.
    fn sweep_config() -> Config {
        Config {
            photon_radius: 0.02,
            bias_correction: BiasCorrection::Basic,
            ..config()
        }
    }

    fn assert_non_increasing(name: &str, mses: &[(u32, f32)]) {
        for pair in mses.windows(2) {
            let (lhs_value, lhs_mse) = pair[0];
            let (rhs_value, rhs_mse) = pair[1];

            assert!(
                rhs_mse <= lhs_mse,
                "{name} = {rhs_value} gave mse = {rhs_mse}, \
                 but {name} = {lhs_value} gave mse = {lhs_mse}",
            );
        }
    }

    #[test]
    fn cold_start() {
        let mut target: Engine = Engine::new(config());

        assert_eq!(0, target.frame().get());
        assert!(!target.has_history());
        assert!(target.diffuse().is_none());

        target.render_with_seed(&scene(), &lights(), &gbuffer(uvec2(4, 4)), 1);

        assert_eq!(1, target.frame().get());
        assert!(target.has_history());

        let diffuse = target.diffuse().unwrap();

        assert_eq!(uvec2(4, 4), diffuse.size());
        assert!(diffuse.iter().all(|pixel| pixel.y > 0.0));

        // ---

        target.reset();

        assert!(!target.has_history());
        assert_eq!(1, target.frame().get());
    }

    #[test]
    fn disabled() {
        let mut target: Engine = Engine::new(config());

        target.set_enabled(false);
        target.render_with_seed(&scene(), &lights(), &gbuffer(uvec2(4, 4)), 1);

        assert!(target.diffuse().is_none());
        assert_eq!(0, target.frame().get());

        // ---

        target.set_enabled(true);
        target.render_with_seed(&scene(), &lights(), &gbuffer(uvec2(4, 4)), 1);
        target.set_enabled(false);
        target.set_enabled(true);

        assert!(!target.has_history());
        assert_eq!(1, target.frame().get());
    }

    #[test]
    fn resolution_change() {
        let mut target: Engine = Engine::new(config());

        target.render_with_seed(&scene(), &lights(), &gbuffer(uvec2(4, 4)), 1);
        target.render_with_seed(&scene(), &lights(), &gbuffer(uvec2(4, 4)), 2);
        target.render_with_seed(&scene(), &lights(), &gbuffer(uvec2(6, 3)), 3);

        assert_eq!(3, target.frame().get());
        assert_eq!(uvec2(6, 3), target.diffuse().unwrap().size());
        assert_eq!(uvec2(6, 3), target.caustic().unwrap().size());
        assert_eq!(uvec2(6, 3), target.photon_density().unwrap().size());
        assert!(target.diffuse().unwrap().iter().all(|pixel| pixel.y > 0.0));
    }

    #[test]
    fn stale_photons() {
        let config = Config {
            resampling_mode: ResamplingMode::Spatial,
            ..config()
        };

        let mut target: Engine = Engine::new(config);
        let gbuffer = gbuffer(uvec2(4, 4));

        target.render_with_seed(&scene(), &lights(), &gbuffer, 1);

        assert!(target.photon_stats().unwrap().global > 0);

        // ---

        target.render_with_seed(&scene(), &Lights::new(vec![]), &gbuffer, 2);

        assert_eq!(PhotonStats::default(), target.photon_stats().unwrap());

        assert!(target
            .diffuse()
            .unwrap()
            .iter()
            .all(|&pixel| pixel == Vec3::ZERO));

        assert!(target
            .photon_density()
            .unwrap()
            .iter()
            .all(|&pixel| pixel == Vec3::ZERO));
    }

    #[test]
    fn set_config() {
        let mut target: Engine = Engine::new(config());

        target.render_with_seed(&scene(), &lights(), &gbuffer(uvec2(4, 4)), 1);

        target.set_config(Config {
            photons_per_frame: 5,
            ..config()
        });

        // Clamped to the valid range
        assert_eq!(10_000, target.config().photons_per_frame);

        target.render_with_seed(&scene(), &lights(), &gbuffer(uvec2(4, 4)), 2);

        let stats = target.photon_stats().unwrap();

        assert!(stats.global > 0);
        assert!(stats.global <= 10_000);
    }

    #[test]
    fn converges_to_analytic_radiance() {
        let (ratio, _) = render(config(), 4);

        assert_relative_eq!(ratio, 1.0, epsilon = 0.05);
    }

    #[test]
    fn converges_to_analytic_radiance_with_bvh() {
        let scene = scene();
        let lights = lights();
        let gbuffer = gbuffer(uvec2(8, 8));
        let mut target = Engine::<PhotonBvh>::new(config());

        target.render_with_seed(&scene, &lights, &gbuffer, 1);
        target.render_with_seed(&scene, &lights, &gbuffer, 2);

        let expected: f32 = gbuffer
            .iter()
            .map(|entry| expected_radiance(entry.position))
            .sum();

        let actual: f32 =
            target.diffuse().unwrap().iter().map(|pixel| pixel.y).sum();

        assert_relative_eq!(actual / expected, 1.0, epsilon = 0.05);
    }

    #[test]
    fn reuse_reduces_error() {
        let (ratio, mse_with_reuse) = render(
            Config {
                spatial_samples: 16,
                temporal_history_length: 100,
                ..config()
            },
            6,
        );

        assert_relative_eq!(ratio, 1.0, epsilon = 0.05);

        let (_, mse_without_reuse) = render(
            Config {
                spatial_samples: 1,
                temporal_history_length: 1,
                ..config()
            },
            6,
        );

        assert!(
            mse_with_reuse < mse_without_reuse,
            "{mse_with_reuse} >= {mse_without_reuse}",
        );
    }

    #[test]
    fn spatial_reuse_reduces_error() {
        let mses: Vec<_> = [1, 4, 16]
            .into_iter()
            .map(|spatial_samples| {
                let config = Config {
                    resampling_mode: ResamplingMode::Spatial,
                    spatial_samples,
                    ..sweep_config()
                };

                (spatial_samples, mean_mse(config, 1, 6))
            })
            .collect();

        assert_non_increasing("spatial_samples", &mses);
    }

    #[test]
    fn temporal_reuse_reduces_error() {
        let mses: Vec<_> = [1, 10, 100]
            .into_iter()
            .map(|temporal_history_length| {
                let config = Config {
                    resampling_mode: ResamplingMode::Temporal,
                    temporal_history_length,
                    ..sweep_config()
                };

                (temporal_history_length, mean_mse(config, 12, 4))
            })
            .collect();

        assert_non_increasing("temporal_history_length", &mses);
    }

    #[test]
    fn history_goes_dark_with_lights() {
        let mut target: Engine = Engine::new(config());
        let gbuffer = gbuffer(uvec2(4, 4));

        assert_eq!(
            ResamplingMode::SpatioTemporal,
            target.config().resampling_mode
        );

        for seed in 0..3 {
            target.render_with_seed(&scene(), &lights(), &gbuffer, seed);
        }

        assert!(target.diffuse().unwrap().iter().all(|pixel| pixel.y > 0.0));

        // ---

        for seed in 3..10 {
            target.render_with_seed(
                &scene(),
                &Lights::new(vec![]),
                &gbuffer,
                seed,
            );

            assert!(target
                .diffuse()
                .unwrap()
                .iter()
                .all(|&pixel| pixel == Vec3::ZERO));
        }

        // ---

        for seed in 10..12 {
            target.render_with_seed(&scene(), &lights(), &gbuffer, seed);
        }

        assert!(target.diffuse().unwrap().iter().all(|pixel| pixel.y > 0.0));
    }

    #[test]
    fn empty_gbuffer_is_skipped() {
        let mut target: Engine = Engine::new(config());

        target.render_with_seed(
            &scene(),
            &lights(),
            &Image::new(uvec2(0, 0)),
            1,
        );

        assert_eq!(0, target.frame().get());
        assert!(!target.has_history());
        assert!(target.diffuse().is_none());

        // ---

        target.render_with_seed(&scene(), &lights(), &gbuffer(uvec2(4, 4)), 2);
        target.render_with_seed(
            &scene(),
            &lights(),
            &Image::new(uvec2(4, 0)),
            3,
        );

        assert_eq!(1, target.frame().get());
        assert!(target.has_history());
        assert_eq!(uvec2(4, 4), target.diffuse().unwrap().size());
    }
}
