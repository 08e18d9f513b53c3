use glimmer_gpu::{Lights, PhotonTracingPassParams, Scene};
use glimmer_kernels::photon_tracing;
use log::trace;
use rayon::prelude::*;

use crate::{Buffers, Config, FrameContext};

#[derive(Debug)]
pub struct PhotonTracingPass {
    params: PhotonTracingPassParams,
}

impl PhotonTracingPass {
    pub fn new(config: &Config) -> Self {
        let mut flags = 0;

        if config.caustic_mode.is_enabled() {
            flags |= PhotonTracingPassParams::FLAG_CAUSTICS;
        }

        if config.use_photon_culling {
            flags |= PhotonTracingPassParams::FLAG_CULLING;
        }

        let params = PhotonTracingPassParams {
            seed: 0,
            photon_count: config.photons_per_frame,
            max_bounces: config.max_photon_bounces,
            max_gather_bounces: config.max_final_gather_bounces,
            rejection_probability: config.global_photon_rejection_probability,
            roughness_threshold: config.roughness_threshold,
            min_contribution: config.min_photon_contribution,
            photon_radius: config.photon_radius,
            caustic_radius: config.caustic_photon_radius,
            flags,
        };

        Self { params }
    }

    pub fn run<S>(
        &self,
        ctx: &FrameContext,
        scene: &S,
        lights: &Lights,
        buffers: &mut Buffers,
    ) where
        S: Scene + ?Sized,
    {
        // Photons from previous frames must not leak into this one, even if
        // this frame ends up emitting fewer of them
        buffers.global_photons.clear();
        buffers.caustic_photons.clear();

        let params = PhotonTracingPassParams {
            seed: ctx.seed_for("photon_tracing"),
            ..self.params
        };

        let global_photons = &buffers.global_photons;
        let caustic_photons = &buffers.caustic_photons;

        (0..params.photon_count).into_par_iter().for_each(|global_id| {
            photon_tracing::main(
                global_id,
                &params,
                scene,
                lights,
                global_photons,
                caustic_photons,
            );
        });

        trace!(
            "Photons traced; global = {}, caustic = {}, dropped = {}",
            global_photons.len(),
            caustic_photons.len(),
            global_photons.dropped() + caustic_photons.dropped(),
        );
    }
}
