use glam::Vec3;

use crate::Photon;

/// Spatial index over photon positions.
///
/// Implementations are free to return false positives from [`Self::query()`]
/// (the caller refines candidates by the exact distance), but must never miss
/// a photon whose bounding volume contains the queried point.
pub trait PhotonIndex: Send + Sync {
    /// Builds index over given photons, each surrounded by a sphere of given
    /// radius.
    fn build(photons: &[Photon], radius: f32) -> Self
    where
        Self: Sized;

    /// Appends ids of photons that might lie within `radius` of `point`.
    fn query(&self, point: Vec3, radius: f32, out: &mut Vec<u32>);
}

/// Photons of a single stream, together with an index built over them.
#[derive(Debug)]
pub struct PhotonMap<I> {
    photons: Vec<Photon>,
    index: I,
    radius: f32,
}

impl<I> PhotonMap<I>
where
    I: PhotonIndex,
{
    pub fn build(photons: Vec<Photon>, radius: f32) -> Self {
        let index = I::build(&photons, radius);

        Self {
            photons,
            index,
            radius,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.photons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photons.is_empty()
    }

    pub fn get(&self, id: u32) -> Photon {
        self.photons[id as usize]
    }

    /// Fills `out` with ids of photons within the map's radius from given
    /// point, arriving on the front side of a surface oriented along
    /// `normal`.
    pub fn gather(&self, point: Vec3, normal: Vec3, out: &mut Vec<u32>) {
        out.clear();

        if self.photons.is_empty() {
            return;
        }

        self.index.query(point, self.radius, out);

        let radius_sq = self.radius * self.radius;

        out.retain(|&id| {
            let photon = &self.photons[id as usize];

            photon.position.distance_squared(point) <= radius_sq
                && photon.direction().dot(normal) < 0.0
        });
    }
}
