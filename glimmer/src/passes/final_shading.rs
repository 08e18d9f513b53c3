use glimmer_kernels::final_shading;
use log::debug;
use rayon::prelude::*;

use crate::{Buffers, Config, FrameContext};

#[derive(Debug)]
pub struct FinalShadingPass;

impl FinalShadingPass {
    pub fn new(_: &Config) -> Self {
        Self
    }

    pub fn run(&self, ctx: &FrameContext, buffers: &mut Buffers) {
        debug!("Shading");

        let surfaces = buffers.surfaces.curr(ctx).as_slice();
        let fg_reservoirs = buffers.fg_reservoirs.curr(ctx).as_slice();
        let caustic_reservoirs = buffers.caustic_reservoirs.curr(ctx).as_slice();

        buffers
            .diffuse
            .as_mut_slice()
            .par_iter_mut()
            .zip(buffers.caustic.as_mut_slice().par_iter_mut())
            .enumerate()
            .for_each(|(idx, (diffuse, caustic))| {
                final_shading::main(
                    &surfaces[idx],
                    &fg_reservoirs[idx],
                    &caustic_reservoirs[idx],
                    diffuse,
                    caustic,
                );
            });
    }
}
