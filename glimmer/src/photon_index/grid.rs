use fxhash::FxHashMap;
use glam::{IVec3, Vec3};
use glimmer_gpu::{Photon, PhotonIndex};

/// Uniform hash grid with cells as large as the gather radius, so that a
/// typical query visits 3x3x3 cells.
#[derive(Debug, Default)]
pub struct PhotonGrid {
    cell_size: f32,
    cells: FxHashMap<IVec3, Vec<u32>>,
}

impl PhotonGrid {
    fn cell(&self, point: Vec3) -> IVec3 {
        (point / self.cell_size).floor().as_ivec3()
    }
}

impl PhotonIndex for PhotonGrid {
    fn build(photons: &[Photon], radius: f32) -> Self {
        let mut this = Self {
            cell_size: radius.max(0.0001),
            cells: Default::default(),
        };

        for (id, photon) in photons.iter().enumerate() {
            if !photon.position.is_finite() {
                continue;
            }

            this.cells
                .entry(this.cell(photon.position))
                .or_default()
                .push(id as u32);
        }

        this
    }

    fn query(&self, point: Vec3, radius: f32, out: &mut Vec<u32>) {
        if self.cells.is_empty() || !point.is_finite() {
            return;
        }

        let min = self.cell(point - radius);
        let max = self.cell(point + radius);

        for z in min.z..=max.z {
            for y in min.y..=max.y {
                for x in min.x..=max.x {
                    if let Some(ids) = self.cells.get(&IVec3::new(x, y, z)) {
                        out.extend_from_slice(ids);
                    }
                }
            }
        }
    }
}
