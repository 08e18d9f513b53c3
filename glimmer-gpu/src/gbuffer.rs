use glam::{Vec2, Vec3};

use crate::Surface;

/// Per-pixel attributes of the primary hit, as resolved by the host renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GBufferEntry {
    /// World-space position
    pub position: Vec3,

    /// Shading normal
    pub normal: Vec3,

    pub roughness: f32,
    pub albedo: Vec3,

    /// Direction from the surface towards the camera
    pub view_dir: Vec3,

    /// Offset (in pixels) from this pixel to its position in the previous
    /// frame
    pub motion: Vec2,

    /// Distance from the camera; zero if the pixel has no geometry
    pub depth: f32,
}

impl GBufferEntry {
    pub fn is_some(&self) -> bool {
        self.depth > 0.0 && self.depth.is_finite()
    }

    pub fn surface(&self) -> Surface {
        if !self.is_some() {
            return Surface::default();
        }

        Surface {
            position: self.position,
            normal: self.normal.normalize_or_zero(),
            roughness: self.roughness.clamp(0.0, 1.0),
            albedo: self.albedo,
            view_dir: self.view_dir.normalize_or_zero(),
            depth: self.depth,
        }
    }
}
