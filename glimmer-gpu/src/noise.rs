use core::f32::consts::PI;

use glam::{vec2, vec3, UVec2, Vec2, Vec3};

use crate::GOLDEN_ANGLE;

/// PCG-based white noise, seeded per work item.
#[derive(Clone, Copy, Debug)]
pub struct WhiteNoise {
    state: u32,
}

impl WhiteNoise {
    pub fn new(seed: u32, id: UVec2) -> Self {
        Self {
            state: seed
                ^ 48619u32.wrapping_mul(id.x)
                ^ 95461u32.wrapping_mul(id.y),
        }
    }

    /// Generates a uniform sample in range `<0.0, 1.0>`.
    pub fn sample(&mut self) -> f32 {
        (self.sample_int() as f32) / (u32::MAX as f32)
    }

    /// Generates a uniform sample in range `<0, u32::MAX>`.
    pub fn sample_int(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(747796405)
            .wrapping_add(2891336453);

        let word = ((self.state >> ((self.state >> 28) + 4)) ^ self.state)
            .wrapping_mul(277803737);

        (word >> 22) ^ word
    }

    /// Generates a uniform index in range `0..len`.
    pub fn sample_index(&mut self, len: usize) -> usize {
        ((self.sample() * len as f32) as usize).min(len.saturating_sub(1))
    }

    /// Generates a uniform sample on a circle.
    pub fn sample_circle(&mut self) -> Vec2 {
        let angle = self.sample() * PI * 2.0;

        vec2(angle.cos(), angle.sin())
    }

    /// Generates a uniform sample inside of a disk.
    pub fn sample_disk(&mut self) -> Vec2 {
        let radius = self.sample().sqrt();

        self.sample_circle() * radius
    }

    /// Generates a uniform direction.
    pub fn sample_sphere(&mut self) -> Vec3 {
        let cos_theta = 1.0 - 2.0 * self.sample();
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
        let circle = self.sample_circle();

        vec3(circle.x * sin_theta, circle.y * sin_theta, cos_theta)
    }

    /// Generates a uniform direction within a cone around given axis.
    pub fn sample_cone(&mut self, axis: Vec3, cos_max: f32) -> Vec3 {
        let cos_theta = 1.0 - self.sample() * (1.0 - cos_max);
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
        let circle = self.sample_circle();
        let (t, b) = axis.any_orthonormal_pair();

        (t * (circle.x * sin_theta)
            + b * (circle.y * sin_theta)
            + axis * cos_theta)
            .normalize()
    }

    /// Generates a cosine-weighted direction on a hemisphere around given
    /// normal.
    pub fn sample_cosine_hemisphere(&mut self, normal: Vec3) -> Vec3 {
        let disk = self.sample_disk();
        let z = (1.0 - disk.length_squared()).max(0.0).sqrt();
        let (t, b) = normal.any_orthonormal_pair();

        (t * disk.x + b * disk.y + normal * z).normalize()
    }
}

/// Returns `idx`-th out of `count` points of a golden-angle spiral covering a
/// disk of given radius, rotated by `rotation` radians.
///
/// Consecutive points are spread evenly over the disk, which makes this a
/// cheap low-discrepancy pattern for picking neighbouring pixels.
pub fn golden_spiral(idx: u32, count: u32, radius: f32, rotation: f32) -> Vec2 {
    let distance = radius * ((idx as f32 + 0.5) / count.max(1) as f32).sqrt();
    let angle = rotation + (idx as f32) * GOLDEN_ANGLE;

    vec2(angle.cos(), angle.sin()) * distance
}
