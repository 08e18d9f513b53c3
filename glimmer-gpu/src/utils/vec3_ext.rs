use glam::{vec3, Vec3};

pub trait Vec3Ext
where
    Self: Sized,
{
    /// Reflects this direction-vector around `normal`.
    fn reflect(self, normal: Self) -> Self;

    /// Refracts this direction-vector through a surface with given normal,
    /// where `eta` is the ratio of refractive indices (incident over
    /// transmitted); returns `None` on total internal reflection.
    ///
    /// `normal` must point against this vector.
    fn refract(self, normal: Self, eta: f32) -> Option<Self>;

    /// Returns luminance of this color-vector.
    fn luma(self) -> f32;
}

impl Vec3Ext for Vec3 {
    fn reflect(self, normal: Self) -> Self {
        self - 2.0 * normal.dot(self) * normal
    }

    fn refract(self, normal: Self, eta: f32) -> Option<Self> {
        let cos_i = -normal.dot(self);
        let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);

        if k < 0.0 {
            None
        } else {
            Some((eta * self + (eta * cos_i - k.sqrt()) * normal).normalize())
        }
    }

    fn luma(self) -> f32 {
        self.dot(vec3(0.2126, 0.7152, 0.0722))
    }
}
