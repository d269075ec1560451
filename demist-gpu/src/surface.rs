use glam::{ivec2, IVec2, UVec2, Vec3, Vec4Swizzles};
#[cfg(target_arch = "spirv")]
use spirv_std::num_traits::Float;

use crate::{Normal, TexRgba32};

/// Geometric proxy of a single pixel, read back from the G-buffer's surface
/// map; `depth == 0.0` marks pixels where the rasterizer found no geometry.
#[derive(Clone, Copy, Default)]
pub struct Surface {
    pub normal: Vec3,
    pub depth: f32,
}

impl Surface {
    pub fn is_sky(&self) -> bool {
        self.depth == 0.0
    }

    /// Returns whether `other` plausibly shows the same surface as `self`;
    /// used to validate reprojected history taps (disocclusion detection).
    ///
    /// `depth_tolerance` bounds the relative depth difference and
    /// `normal_tolerance` is the minimum allowed normal cosine.
    pub fn is_consistent_with(
        &self,
        other: &Self,
        depth_tolerance: f32,
        normal_tolerance: f32,
    ) -> bool {
        if self.is_sky() || other.is_sky() {
            return false;
        }

        let depth_diff = (self.depth - other.depth).abs() / self.depth;

        if depth_diff > depth_tolerance {
            return false;
        }

        self.normal.dot(other.normal) >= normal_tolerance
    }
}

#[derive(Clone, Copy)]
pub struct SurfaceMap<'a> {
    tex: TexRgba32<'a>,
}

impl<'a> SurfaceMap<'a> {
    pub fn new(tex: TexRgba32<'a>) -> Self {
        Self { tex }
    }

    pub fn get(&self, screen_pos: UVec2) -> Surface {
        let d0 = self.tex.read(screen_pos);

        Surface {
            normal: Normal::decode(d0.xy()),
            depth: d0.z,
        }
    }

    /// Magnitude of the local screen-space depth gradient; keeps the filter's
    /// depth weight scale-invariant across slanted surfaces.
    pub fn depth_gradient(&self, screen_pos: UVec2, screen_size: UVec2) -> f32 {
        let max = (screen_size.as_ivec2() - 1).max(IVec2::ZERO);

        let at = |offset: IVec2| {
            let pos = (screen_pos.as_ivec2() + offset)
                .clamp(IVec2::ZERO, max)
                .as_uvec2();

            self.get(pos).depth
        };

        let center = self.get(screen_pos).depth;

        (at(ivec2(1, 0)) - center).abs().max((at(ivec2(0, 1)) - center).abs())
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;

    fn surface(normal: Vec3, depth: f32) -> Surface {
        Surface { normal, depth }
    }

    #[test]
    fn consistency_accepts_same_surface() {
        let lhs = surface(vec3(0.0, 1.0, 0.0), 10.0);
        let rhs = surface(vec3(0.0, 1.0, 0.0), 10.05);

        assert!(lhs.is_consistent_with(&rhs, 0.1, 0.9));
    }

    #[test]
    fn consistency_rejects_depth_discontinuity() {
        let lhs = surface(vec3(0.0, 1.0, 0.0), 10.0);
        let rhs = surface(vec3(0.0, 1.0, 0.0), 15.0);

        assert!(!lhs.is_consistent_with(&rhs, 0.1, 0.9));
    }

    #[test]
    fn consistency_rejects_normal_divergence() {
        let lhs = surface(vec3(0.0, 1.0, 0.0), 10.0);
        let rhs = surface(vec3(1.0, 0.0, 0.0), 10.0);

        assert!(!lhs.is_consistent_with(&rhs, 0.1, 0.9));
    }

    #[test]
    fn consistency_rejects_sky() {
        let lhs = surface(vec3(0.0, 1.0, 0.0), 10.0);
        let rhs = surface(Vec3::ZERO, 0.0);

        assert!(!lhs.is_consistent_with(&rhs, 0.1, 0.9));
        assert!(!rhs.is_consistent_with(&lhs, 0.1, 0.9));
    }
}
