use glam::{vec4, Vec4};

use crate::{lerp, MAX_HISTORY_LEN};

/// Running first and second moment of a pixel's ray-traced luminance,
/// together with the number of frames that contributed to them; packed into
/// one texel of the moments surface.
#[derive(Clone, Copy, Default)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub struct Moments {
    pub history_len: f32,
    pub m1: f32,
    pub m2: f32,
}

impl Moments {
    /// Starts accumulation from scratch, as if `luma` was the only sample
    /// ever seen; used on the first frame and after disocclusion.
    pub fn reset(luma: f32) -> Self {
        Self {
            history_len: 1.0,
            m1: luma,
            m2: luma * luma,
        }
    }

    /// Folds a new luminance sample into the history.
    ///
    /// Young histories blend with `1 / history_len` so that the estimate
    /// warms up as a cumulative average before settling into the configured
    /// exponential moving average.
    pub fn accumulate(&self, luma: f32, moments_alpha: f32) -> Self {
        let history_len = (self.history_len + 1.0).min(MAX_HISTORY_LEN);
        let alpha = moments_alpha.max(1.0 / history_len);

        Self {
            history_len,
            m1: lerp(self.m1, luma, alpha),
            m2: lerp(self.m2, luma * luma, alpha),
        }
    }

    /// Unbiased variance estimate; clamped because the subtraction of
    /// squares can go slightly negative in floating point.
    pub fn variance(&self) -> f32 {
        (self.m2 - self.m1 * self.m1).max(0.0)
    }

    pub fn serialize(&self) -> Vec4 {
        vec4(self.history_len, self.m1, self.m2, 0.0)
    }

    pub fn deserialize(d0: Vec4) -> Self {
        Self {
            history_len: d0.x,
            m1: d0.y,
            m2: d0.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn serialization() {
        let target = Moments {
            history_len: 4.0,
            m1: 0.5,
            m2: 0.3,
        };

        let target = Moments::deserialize(target.serialize());

        assert_eq!(4.0, target.history_len);
        assert_eq!(0.5, target.m1);
        assert_eq!(0.3, target.m2);
    }

    #[test]
    fn reset_has_zero_variance() {
        let target = Moments::reset(0.75);

        assert_eq!(1.0, target.history_len);
        assert_eq!(0.0, target.variance());
    }

    #[test]
    fn variance_is_clamped_non_negative() {
        // m2 < m1^2 can happen after lossy storage; the estimate must clamp
        // instead of going negative
        let target = Moments {
            history_len: 8.0,
            m1: 1.0,
            m2: 0.99,
        };

        assert_eq!(0.0, target.variance());
    }

    #[test]
    fn variance_converges_on_static_input() {
        let mut target = Moments {
            history_len: 2.0,
            m1: 0.5,
            m2: 0.5,
        };

        let mut prev_variance = target.variance();

        for _ in 0..64 {
            target = target.accumulate(0.5, 0.2);

            let variance = target.variance();

            assert!(variance <= prev_variance);

            prev_variance = variance;
        }

        assert_relative_eq!(0.0, prev_variance, epsilon = 0.001);
    }

    #[test]
    fn history_len_is_capped() {
        let mut target = Moments::reset(1.0);

        for _ in 0..100 {
            target = target.accumulate(1.0, 0.2);
        }

        assert_eq!(MAX_HISTORY_LEN, target.history_len);
    }
}
