use glam::{IVec2, Vec3};
#[cfg(target_arch = "spirv")]
use spirv_std::num_traits::Float;

use crate::{F32Ext, Surface, DEMIST_EPSILON};

/// B3-spline falloff of the à-trous kernel, indexed by per-axis offset and
/// normalized so the center tap weighs 1; the kernel keeps this fixed
/// footprint while the sample spacing between taps doubles every iteration.
const KERNEL: [f32; 3] = [1.0, 2.0 / 3.0, 1.0 / 6.0];

pub fn kernel_weight(offset: IVec2) -> f32 {
    let x = (offset.x.unsigned_abs() as usize).min(KERNEL.len() - 1);
    let y = (offset.y.unsigned_abs() as usize).min(KERNEL.len() - 1);

    KERNEL[x] * KERNEL[y]
}

/// Edge-stopping weight of a single neighbor tap.
///
/// Combines color similarity (Gaussian falloff over the squared color
/// distance), normal similarity (powered cosine) and depth similarity
/// (difference scaled by the local depth gradient, so slanted surfaces
/// don't self-reject).
#[allow(clippy::too_many_arguments)]
pub fn eval_sample_weight(
    center_color: Vec3,
    center_surface: Surface,
    sample_color: Vec3,
    sample_surface: Surface,
    depth_gradient: f32,
    offset_len: f32,
    phi_color: f32,
    phi_normal: f32,
    sigma_depth: f32,
) -> f32 {
    let color_weight = {
        let diff = (center_color - sample_color).length_squared();

        (-diff / phi_color.max(DEMIST_EPSILON)).exp()
    };

    let normal_weight = sample_surface
        .normal
        .dot(center_surface.normal)
        .max(0.0)
        .powf(phi_normal);

    let depth_weight = {
        let diff = (center_surface.depth - sample_surface.depth).abs();
        let leeway =
            sigma_depth * depth_gradient * offset_len + DEMIST_EPSILON;

        (-diff / leeway).exp()
    };

    color_weight * normal_weight * depth_weight
}

/// Contribution of the filtered variance; variance propagates through a
/// weighted average with squared weights.
pub fn variance_weight(weight: f32) -> f32 {
    weight.sqr()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::{ivec2, vec3};

    use super::*;

    fn surface(normal: Vec3, depth: f32) -> Surface {
        Surface { normal, depth }
    }

    fn weight_between(center: Surface, sample: Surface) -> f32 {
        eval_sample_weight(
            vec3(0.5, 0.5, 0.5),
            center,
            vec3(0.5, 0.5, 0.5),
            sample,
            0.01,
            1.0,
            10.0,
            32.0,
            1.0,
        )
    }

    #[test]
    fn kernel_is_symmetric_and_peaks_at_center() {
        assert_eq!(kernel_weight(ivec2(1, 0)), kernel_weight(ivec2(-1, 0)));
        assert_eq!(kernel_weight(ivec2(0, 2)), kernel_weight(ivec2(0, -2)));
        assert!(kernel_weight(ivec2(0, 0)) > kernel_weight(ivec2(1, 0)));
        assert!(kernel_weight(ivec2(1, 0)) > kernel_weight(ivec2(2, 0)));
    }

    #[test]
    fn identical_samples_get_full_weight() {
        let center = surface(vec3(0.0, 1.0, 0.0), 10.0);

        assert_relative_eq!(
            1.0,
            weight_between(center, center),
            epsilon = 0.01
        );
    }

    #[test]
    fn perpendicular_normals_get_zero_weight() {
        let center = surface(vec3(0.0, 1.0, 0.0), 10.0);
        let sample = surface(vec3(1.0, 0.0, 0.0), 10.0);

        assert_eq!(0.0, weight_between(center, sample));
    }

    #[test]
    fn depth_discontinuities_are_suppressed() {
        let center = surface(vec3(0.0, 1.0, 0.0), 10.0);
        let near = surface(vec3(0.0, 1.0, 0.0), 10.01);
        let far = surface(vec3(0.0, 1.0, 0.0), 14.0);

        assert!(weight_between(center, near) > weight_between(center, far));
        assert!(weight_between(center, far) < 0.01);
    }

    #[test]
    fn color_distance_attenuates_weight() {
        let center = surface(vec3(0.0, 1.0, 0.0), 10.0);

        let near = eval_sample_weight(
            vec3(0.5, 0.5, 0.5),
            center,
            vec3(0.6, 0.5, 0.5),
            center,
            0.01,
            1.0,
            0.1,
            32.0,
            1.0,
        );

        let far = eval_sample_weight(
            vec3(0.5, 0.5, 0.5),
            center,
            vec3(3.5, 0.5, 0.5),
            center,
            0.01,
            1.0,
            0.1,
            32.0,
            1.0,
        );

        assert!(near > far);
    }

    #[test]
    fn variance_propagates_with_squared_weights() {
        assert_eq!(0.25, variance_weight(0.5));
    }
}
