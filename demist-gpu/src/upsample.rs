use glam::{vec2, vec4, Vec2, Vec4};
#[cfg(target_arch = "spirv")]
use spirv_std::num_traits::Float;

use crate::{Surface, DEMIST_EPSILON};

const PHI_NORMAL: f32 = 32.0;

/// One low-resolution tap considered by the guided upsampler.
#[derive(Clone, Copy, Default)]
pub struct UpsampleTap {
    pub color: Vec4,
    pub surface: Surface,
}

/// Position of the 2x2 low-resolution footprint for a full-resolution pixel.
///
/// Returns the top-left tap coordinate (unclamped, can be -1 on the border)
/// and the fractional position inside the footprint.
pub fn upsample_footprint(full_pos: Vec2, divisor: f32) -> (Vec2, Vec2) {
    let low_pos = (full_pos + 0.5) / divisor - 0.5;
    let base = vec2(low_pos.x.floor(), low_pos.y.floor());

    (base, low_pos - base)
}

pub fn bilinear_weights(frac: Vec2) -> Vec4 {
    vec4(
        (1.0 - frac.x) * (1.0 - frac.y),
        frac.x * (1.0 - frac.y),
        (1.0 - frac.x) * frac.y,
        frac.x * frac.y,
    )
}

/// Similarity of a low-resolution tap to the full-resolution guide surface;
/// taps that lay across a geometric edge get suppressed so the upsampled
/// image keeps the full-resolution silhouettes.
pub fn eval_tap_weight(guide: Surface, tap: Surface) -> f32 {
    let normal_weight = tap.normal.dot(guide.normal).max(0.0).powf(PHI_NORMAL);

    let depth_weight =
        1.0 / (DEMIST_EPSILON + (guide.depth - tap.depth).abs());

    normal_weight * depth_weight
}

/// Resolves the 2x2 footprint into one full-resolution value.
///
/// When every guided weight vanishes (e.g. thin geometry that only exists at
/// full resolution), falls back to the plain bilinear combination so the
/// output stays defined.
pub fn filter_taps(
    guide: Surface,
    taps: &[UpsampleTap; 4],
    bilinear: Vec4,
) -> Vec4 {
    let mut sum = Vec4::ZERO;
    let mut sum_weights = 0.0;

    let mut idx = 0;

    while idx < 4 {
        let tap = taps[idx];
        let weight = bilinear[idx] * eval_tap_weight(guide, tap.surface);

        sum += tap.color * weight;
        sum_weights += weight;
        idx += 1;
    }

    if sum_weights > DEMIST_EPSILON {
        return sum / sum_weights;
    }

    let mut sum = Vec4::ZERO;
    let mut sum_weights = 0.0;

    let mut idx = 0;

    while idx < 4 {
        sum += taps[idx].color * bilinear[idx];
        sum_weights += bilinear[idx];
        idx += 1;
    }

    sum / sum_weights.max(DEMIST_EPSILON)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::vec3;

    use super::*;

    fn tap(color: f32, normal: glam::Vec3, depth: f32) -> UpsampleTap {
        UpsampleTap {
            color: Vec4::splat(color),
            surface: Surface { normal, depth },
        }
    }

    #[test]
    fn footprint_is_aligned_at_half_scale() {
        let (base, frac) = upsample_footprint(vec2(4.0, 4.0), 2.0);

        assert_eq!(vec2(1.0, 1.0), base);
        assert_eq!(vec2(0.75, 0.75), frac);
    }

    #[test]
    fn bilinear_weights_sum_to_one() {
        let weights = bilinear_weights(vec2(0.25, 0.75));

        assert_relative_eq!(1.0, weights.dot(Vec4::ONE), epsilon = 0.0001);
    }

    #[test]
    fn uniform_taps_pass_through() {
        let guide = Surface {
            normal: vec3(0.0, 1.0, 0.0),
            depth: 10.0,
        };

        let taps = [
            tap(0.5, guide.normal, guide.depth),
            tap(0.5, guide.normal, guide.depth),
            tap(0.5, guide.normal, guide.depth),
            tap(0.5, guide.normal, guide.depth),
        ];

        let value = filter_taps(guide, &taps, bilinear_weights(vec2(0.5, 0.5)));

        assert_relative_eq!(0.5, value.x, epsilon = 0.0001);
    }

    #[test]
    fn edge_taps_are_suppressed() {
        let guide = Surface {
            normal: vec3(0.0, 1.0, 0.0),
            depth: 10.0,
        };

        // three taps share the guide's surface, one lays past a depth edge
        // with a flipped normal; its color must not leak in
        let taps = [
            tap(0.5, guide.normal, guide.depth),
            tap(0.5, guide.normal, guide.depth),
            tap(0.5, guide.normal, guide.depth),
            tap(100.0, vec3(1.0, 0.0, 0.0), 50.0),
        ];

        let value = filter_taps(guide, &taps, bilinear_weights(vec2(0.5, 0.5)));

        assert_relative_eq!(0.5, value.x, epsilon = 0.001);
    }

    #[test]
    fn all_rejected_taps_fall_back_to_bilinear() {
        let guide = Surface {
            normal: vec3(0.0, 1.0, 0.0),
            depth: 10.0,
        };

        let other = vec3(1.0, 0.0, 0.0);

        let taps = [
            tap(0.25, other, 50.0),
            tap(0.25, other, 50.0),
            tap(0.25, other, 50.0),
            tap(0.25, other, 50.0),
        ];

        let value = filter_taps(guide, &taps, bilinear_weights(vec2(0.5, 0.5)));

        assert_relative_eq!(0.25, value.x, epsilon = 0.0001);
    }
}
