use glam::{vec2, vec3, Vec2, Vec3, Vec3Swizzles};

pub struct Normal;

impl Normal {
    /// Compresses normal from Vec3 into Vec2 using octahedron-normal mapping.
    pub fn encode(n: Vec3) -> Vec2 {
        let n = n / (n.x.abs() + n.y.abs() + n.z.abs());

        let n = if n.z >= 0.0 {
            n.xy()
        } else {
            let t = 1.0 - n.yx().abs();

            vec2(t.x.copysign(n.x), t.y.copysign(n.y))
        };

        n * 0.5 + 0.5
    }

    /// See: [`Self::encode()`].
    pub fn decode(n: Vec2) -> Vec3 {
        let n = n * 2.0 - 1.0;
        let mut n = vec3(n.x, n.y, 1.0 - n.x.abs() - n.y.abs());
        let t = (-n.z).max(0.0);

        n.x -= t.copysign(n.x);
        n.y -= t.copysign(n.y);
        n.normalize()
    }

    /// Packs normal into 32 bits, 16 per each octahedral coordinate.
    pub fn pack(n: Vec3) -> u32 {
        let n = (Self::encode(n).clamp(Vec2::ZERO, Vec2::ONE) * 65535.0)
            .round()
            .as_uvec2();

        n.x | (n.y << 16)
    }

    /// See: [`Self::pack()`].
    pub fn unpack(n: u32) -> Vec3 {
        let x = (n & 0xffff) as f32 / 65535.0;
        let y = (n >> 16) as f32 / 65535.0;

        Self::decode(vec2(x, y))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn packing() {
        let normals = [
            vec3(0.0, 1.0, 0.0),
            vec3(0.0, -1.0, 0.0),
            vec3(0.0, 0.0, -1.0),
            vec3(0.26, 0.53, 0.80).normalize(),
            vec3(-0.7, -0.1, -0.7).normalize(),
        ];

        for normal in normals {
            let actual = Normal::unpack(Normal::pack(normal));

            assert_relative_eq!(actual.x, normal.x, epsilon = 0.001);
            assert_relative_eq!(actual.y, normal.y, epsilon = 0.001);
            assert_relative_eq!(actual.z, normal.z, epsilon = 0.001);
        }
    }
}
