use std::ops::BitXor;

use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct MortonCode(u64);

impl MortonCode {
    /// Transforms given point into a Morton code.
    ///
    /// Point's coordinates should be within range 0.0..=1.0; anything outside
    /// of it gets clamped.
    pub fn new(point: Vec3) -> Self {
        /// Expands a 21-bit number into a 64-bit one by inserting zeros
        /// between bits.
        fn expand_bits(mut x: u64) -> u64 {
            x &= 0x1fffff;
            x = (x | x << 32) & 0x1f00000000ffff;
            x = (x | x << 16) & 0x1f0000ff0000ff;
            x = (x | x << 8) & 0x100f00f00f00f00f;
            x = (x | x << 4) & 0x10c30c30c30c30c3;
            x = (x | x << 2) & 0x1249249249249249;
            x
        }

        let point = point.clamp(Vec3::ZERO, Vec3::ONE) * 2.0f32.powi(20);

        let xs = expand_bits(point.x as u64);
        let ys = expand_bits(point.y as u64) << 2;
        let zs = expand_bits(point.z as u64) << 1;

        Self(xs | ys | zs)
    }

    pub fn leading_zeros(self) -> u32 {
        self.0.leading_zeros()
    }
}

impl BitXor for MortonCode {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;

    #[test]
    fn ordering() {
        let a = MortonCode::new(vec3(0.1, 0.1, 0.1));
        let b = MortonCode::new(vec3(0.11, 0.1, 0.1));
        let c = MortonCode::new(vec3(0.9, 0.9, 0.9));

        assert!(a < c);
        assert!(b < c);

        // Nearby points share a longer prefix
        assert!((a ^ b).leading_zeros() > (a ^ c).leading_zeros());

        assert_eq!(MortonCode(0), MortonCode::new(Vec3::ZERO));
        assert_eq!(MortonCode::new(Vec3::ONE), MortonCode::new(Vec3::splat(5.0)));
    }
}
