mod double_buffered;
mod image;

use glam::{UVec2, Vec3};
use glimmer_gpu::{
    CausticReservoir, FgReservoir, PhotonBuffer, Surface, Viewport,
};
use log::debug;

pub use self::double_buffered::*;
pub use self::image::*;
use crate::Config;

/// All the state the pipeline carries, both within a frame and across
/// frames.
#[derive(Debug)]
pub struct Buffers {
    pub global_photons: PhotonBuffer,
    pub caustic_photons: PhotonBuffer,

    pub surfaces: DoubleBuffered<Image<Surface>>,
    pub fg_reservoirs: DoubleBuffered<Image<FgReservoir>>,
    pub caustic_reservoirs: DoubleBuffered<Image<CausticReservoir>>,

    /// Outputs of the spatial resampling, swapped with the current
    /// reservoirs once the pass completes
    pub fg_scratch: Image<FgReservoir>,
    pub caustic_scratch: Image<CausticReservoir>,

    /// Pixels whose history got discarded in this frame
    pub disocclusions: Image<bool>,

    pub diffuse: Image<Vec3>,
    pub caustic: Image<Vec3>,
    pub photon_density: Image<Vec3>,
}

impl Buffers {
    pub fn new(config: &Config, size: UVec2) -> Self {
        debug!("Allocating buffers; size = {}x{}", size.x, size.y);

        let capacity = config.photons_per_frame as usize;

        Self {
            global_photons: PhotonBuffer::new(capacity),
            caustic_photons: PhotonBuffer::new(capacity),
            surfaces: DoubleBuffered::from_fn(|| Image::new(size)),
            fg_reservoirs: DoubleBuffered::from_fn(|| Image::new(size)),
            caustic_reservoirs: DoubleBuffered::from_fn(|| Image::new(size)),
            fg_scratch: Image::new(size),
            caustic_scratch: Image::new(size),
            disocclusions: Image::new(size),
            diffuse: Image::new(size),
            caustic: Image::new(size),
            photon_density: Image::new(size),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.diffuse.viewport()
    }

    pub fn set_photon_capacity(&mut self, capacity: usize) {
        if self.global_photons.capacity() != capacity {
            debug!("Resizing photon buffers; capacity = {capacity}");

            self.global_photons.resize(capacity);
            self.caustic_photons.resize(capacity);
        }
    }
}
