use glam::{vec3, Vec2, Vec3, Vec3Swizzles};
#[cfg(target_arch = "spirv")]
use spirv_std::num_traits::Float;

pub struct Normal;

impl Normal {
    /// Compresses normal from Vec3 into Vec2 using octahedron-normal mapping.
    pub fn encode(n: Vec3) -> Vec2 {
        let n = n / (n.x.abs() + n.y.abs() + n.z.abs());

        let n = if n.z >= 0.0 {
            n.xy()
        } else {
            let mut t = 1.0 - n.yx().abs();

            t.x = t.x.copysign(n.x);
            t.y = t.y.copysign(n.y);
            t
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
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::vec2;

    use super::*;

    #[test]
    fn encode_decode() {
        let targets = [
            vec3(1.0, 0.0, 0.0),
            vec3(0.0, -1.0, 0.0),
            vec3(0.0, 0.0, 1.0),
            vec3(0.26, 0.53, 0.80),
            vec3(-0.26, 0.53, -0.80),
        ];

        for target in targets {
            let decoded = Normal::decode(Normal::encode(target));

            assert_relative_eq!(target.x, decoded.x, epsilon = 0.001);
            assert_relative_eq!(target.y, decoded.y, epsilon = 0.001);
            assert_relative_eq!(target.z, decoded.z, epsilon = 0.001);
        }
    }

    #[test]
    fn decode_is_normalized() {
        let decoded = Normal::decode(vec2(0.33, 0.77));

        assert_relative_eq!(1.0, decoded.length(), epsilon = 0.001);
    }
}
