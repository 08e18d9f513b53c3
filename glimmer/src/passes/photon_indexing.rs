use glimmer_gpu::{PhotonIndex, PhotonMap};

use crate::{Buffers, Config};

#[derive(Debug)]
pub struct PhotonIndexingPass {
    photon_radius: f32,
    caustic_photon_radius: f32,
}

impl PhotonIndexingPass {
    pub fn new(config: &Config) -> Self {
        Self {
            photon_radius: config.photon_radius,
            caustic_photon_radius: config.caustic_photon_radius,
        }
    }

    /// Builds photon maps over photons traced in this frame.
    pub fn run<I>(&self, buffers: &Buffers) -> PhotonMaps<I>
    where
        I: PhotonIndex,
    {
        let (global, caustic) = rayon::join(
            || {
                PhotonMap::build(
                    buffers.global_photons.to_vec(),
                    self.photon_radius,
                )
            },
            || {
                PhotonMap::build(
                    buffers.caustic_photons.to_vec(),
                    self.caustic_photon_radius,
                )
            },
        );

        PhotonMaps { global, caustic }
    }
}

#[derive(Debug)]
pub struct PhotonMaps<I> {
    pub global: PhotonMap<I>,
    pub caustic: PhotonMap<I>,
}
