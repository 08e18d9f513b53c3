use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::Normal;

/// Light-carrying sample recorded where a traced photon landed.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Photon {
    pub position: Vec3,

    /// Direction of travel at the moment of landing, packed through
    /// [`Normal::pack()`]
    pub direction: u32,

    pub flux: Vec3,

    /// See: [`PhotonStream`]
    pub stream: u32,
}

impl Photon {
    pub fn new(
        position: Vec3,
        direction: Vec3,
        flux: Vec3,
        stream: PhotonStream,
    ) -> Self {
        Self {
            position,
            direction: Normal::pack(direction),
            flux,
            stream: stream as u32,
        }
    }

    pub fn direction(&self) -> Vec3 {
        Normal::unpack(self.direction)
    }

    pub fn stream(&self) -> PhotonStream {
        if self.stream == PhotonStream::Caustic as u32 {
            PhotonStream::Caustic
        } else {
            PhotonStream::Global
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PhotonStream {
    /// Photons that bounced off a diffuse surface at least once (or landed
    /// straight from the light); they feed the final gather
    #[default]
    Global = 0,

    /// Photons that got to a diffuse surface through specular bounces only
    Caustic = 1,
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::vec3;

    use super::*;

    #[test]
    fn layout() {
        assert_eq!(32, core::mem::size_of::<Photon>());
    }

    #[test]
    fn new() {
        let dir = vec3(1.0, -2.0, 0.5).normalize();

        let target = Photon::new(
            vec3(1.0, 2.0, 3.0),
            dir,
            vec3(0.5, 0.25, 0.125),
            PhotonStream::Caustic,
        );

        assert_eq!(PhotonStream::Caustic, target.stream());
        assert_eq!(vec3(0.5, 0.25, 0.125), target.flux);
        assert_relative_eq!(target.direction().dot(dir), 1.0, epsilon = 0.0001);
    }
}
