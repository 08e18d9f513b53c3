use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Geometry of a pixel, cached for resampling.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Surface {
    pub position: Vec3,
    pub normal: Vec3,
    pub roughness: f32,
    pub albedo: Vec3,

    /// Direction from the surface towards the camera
    pub view_dir: Vec3,

    /// Distance from the camera; zero if the pixel has no geometry
    pub depth: f32,
}

impl Surface {
    pub fn is_some(&self) -> bool {
        self.depth > 0.0
    }

    /// Returns whether photons get gathered on this surface.
    pub fn accepts_photons(&self, roughness_threshold: f32) -> bool {
        self.is_some() && self.roughness <= roughness_threshold
    }

    /// Returns whether reservoirs can be reused between both surfaces.
    pub fn is_similar_to(
        &self,
        other: &Self,
        thresholds: SimilarityThresholds,
    ) -> bool {
        if !self.is_some() || !other.is_some() {
            return false;
        }

        let normal_cosine = self.normal.dot(other.normal);
        let depth_diff = (self.depth - other.depth).abs() / self.depth;

        normal_cosine >= thresholds.normal && depth_diff <= thresholds.depth
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SimilarityThresholds {
    /// Minimum cosine between normals
    pub normal: f32,

    /// Maximum relative difference between depths
    pub depth: f32,
}
