use glimmer_gpu::{GBufferEntry, PhotonCollectionPassParams, PhotonIndex};
use glimmer_kernels::photon_collection;
use log::debug;
use rayon::prelude::*;

use crate::{Buffers, Config, FrameContext, Image, PhotonMaps};

#[derive(Debug)]
pub struct PhotonCollectionPass {
    params: PhotonCollectionPassParams,
    split: bool,
}

impl PhotonCollectionPass {
    pub fn new(config: &Config) -> Self {
        let mut flags = 0;

        if config.use_final_gather_ris {
            flags |= PhotonCollectionPassParams::FLAG_RIS;
        }

        if config.use_stochastic_collection {
            flags |= PhotonCollectionPassParams::FLAG_STOCHASTIC;
        }

        let params = PhotonCollectionPassParams {
            seed: 0,
            roughness_threshold: config.roughness_threshold,
            max_luminance: config.max_luminance,
            min_contribution: config.min_photon_contribution,
            flags,
        };

        Self {
            params,
            split: config.use_split_collection,
        }
    }

    /// Caches this frame's surfaces and seeds the current generation of
    /// reservoirs with photons gathered around them.
    pub fn run<I>(
        &self,
        ctx: &FrameContext,
        gbuffer: &Image<GBufferEntry>,
        maps: &PhotonMaps<I>,
        buffers: &mut Buffers,
    ) where
        I: PhotonIndex,
    {
        buffers
            .surfaces
            .curr_mut(ctx)
            .as_mut_slice()
            .par_iter_mut()
            .zip(gbuffer.as_slice().par_iter())
            .for_each(|(surface, gbuffer)| {
                *surface = gbuffer.surface();
            });

        buffers.photon_density.clear();

        // Both strategies draw the same noise for the same stream, so they
        // yield the same reservoirs
        let global_params = PhotonCollectionPassParams {
            seed: ctx.seed_for("photon_collection:global"),
            ..self.params
        };

        let caustic_params = PhotonCollectionPassParams {
            seed: ctx.seed_for("photon_collection:caustic"),
            ..self.params
        };

        let viewport = gbuffer.viewport();
        let surfaces = buffers.surfaces.curr(ctx).as_slice();
        let fg_reservoirs = buffers.fg_reservoirs.curr_mut(ctx).as_mut_slice();
        let density = buffers.photon_density.as_mut_slice();

        let caustic_reservoirs =
            buffers.caustic_reservoirs.curr_mut(ctx).as_mut_slice();

        if self.split {
            debug!("Collecting photons (split)");

            fg_reservoirs
                .par_iter_mut()
                .zip(density.par_iter_mut())
                .enumerate()
                .for_each_init(Vec::new, |candidates, (idx, (fg, density))| {
                    photon_collection::main(
                        viewport.idx_to_screen(idx),
                        &global_params,
                        &surfaces[idx],
                        &maps.global,
                        candidates,
                        fg,
                        density,
                    );
                });

            caustic_reservoirs
                .par_iter_mut()
                .zip(density.par_iter_mut())
                .enumerate()
                .for_each_init(
                    Vec::new,
                    |candidates, (idx, (caustic, density))| {
                        photon_collection::main(
                            viewport.idx_to_screen(idx),
                            &caustic_params,
                            &surfaces[idx],
                            &maps.caustic,
                            candidates,
                            caustic,
                            density,
                        );
                    },
                );
        } else {
            debug!("Collecting photons");

            fg_reservoirs
                .par_iter_mut()
                .zip(caustic_reservoirs.par_iter_mut())
                .zip(density.par_iter_mut())
                .enumerate()
                .for_each_init(
                    Vec::new,
                    |candidates, (idx, ((fg, caustic), density))| {
                        let screen_pos = viewport.idx_to_screen(idx);
                        let surface = &surfaces[idx];

                        photon_collection::main(
                            screen_pos,
                            &global_params,
                            surface,
                            &maps.global,
                            candidates,
                            fg,
                            density,
                        );

                        photon_collection::main(
                            screen_pos,
                            &caustic_params,
                            surface,
                            &maps.caustic,
                            candidates,
                            caustic,
                            density,
                        );
                    },
                );
        }
    }
}
