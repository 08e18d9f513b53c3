use std::ops::{Add, AddAssign};

use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    min: Vec3,
    max: Vec3,
}

impl BoundingBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Returns the box enclosing a sphere.
    pub fn around(center: Vec3, radius: f32) -> Self {
        Self::new(center - radius, center + radius)
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    pub fn extent(&self) -> Vec3 {
        self.max() - self.min()
    }

    pub fn is_set(&self) -> bool {
        self.min.x != Self::default().min.x
    }

    pub fn grow(&self, amount: f32) -> Self {
        Self::new(self.min - amount, self.max + amount)
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Maps `p` from `self.min() ..= self.max()` to `0.0 ..= 1.0`.
    pub fn map(&self, mut p: Vec3) -> Vec3 {
        p = (p - self.min()) / self.extent();

        // Happens for flat boxes (e.g. all points lying on a plane); any value
        // works then, as long as it's the same for all points
        if p.x.is_nan() {
            p.x = 0.0;
        }

        if p.y.is_nan() {
            p.y = 0.0;
        }

        if p.z.is_nan() {
            p.z = 0.0;
        }

        p.clamp(Vec3::ZERO, Vec3::ONE)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new(Vec3::MAX, Vec3::MIN)
    }
}

impl AddAssign<Vec3> for BoundingBox {
    fn add_assign(&mut self, rhs: Vec3) {
        self.min = self.min.min(rhs);
        self.max = self.max.max(rhs);
    }
}

impl FromIterator<Vec3> for BoundingBox {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Vec3>,
    {
        let mut this = Self::default();

        for item in iter {
            this += item;
        }

        this
    }
}

impl Add<Self> for BoundingBox {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign<Self> for BoundingBox {
    fn add_assign(&mut self, rhs: Self) {
        *self += rhs.min;
        *self += rhs.max;
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;

    #[test]
    fn map() {
        let target: BoundingBox =
            [vec3(-1.0, 0.0, 2.0), vec3(1.0, 0.0, 4.0)].into_iter().collect();

        assert!(target.is_set());
        assert!(!BoundingBox::default().is_set());

        assert_eq!(vec3(0.5, 0.0, 0.5), target.map(vec3(0.0, 0.0, 3.0)));
        assert_eq!(vec3(1.0, 0.0, 0.0), target.map(vec3(5.0, 0.0, 0.0)));
    }

    #[test]
    fn contains() {
        let target = BoundingBox::around(Vec3::ZERO, 1.0);

        assert!(target.contains(vec3(1.0, -1.0, 0.5)));
        assert!(!target.contains(vec3(1.1, 0.0, 0.0)));
        assert!(target.grow(0.1).contains(vec3(1.1, 0.0, 0.0)));
    }
}
