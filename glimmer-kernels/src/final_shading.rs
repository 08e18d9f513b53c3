use glimmer_gpu::prelude::*;

pub fn main(
    surface: &Surface,
    fg_reservoir: &FgReservoir,
    caustic_reservoir: &CausticReservoir,
    diffuse: &mut Vec3,
    caustic: &mut Vec3,
) {
    *diffuse = fg_reservoir.resolve(surface);
    *caustic = caustic_reservoir.resolve(surface);
}
