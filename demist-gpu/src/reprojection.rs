use glam::{vec2, UVec2, Vec2};
#[cfg(target_arch = "spirv")]
use spirv_std::num_traits::Float;

/// Where a pixel was on the previous frame's screen, together with which of
/// its four bilinear history taps survived the geometric consistency check.
///
/// `tap_mask == 0` means the pixel got disoccluded - it has no usable
/// history this frame and must start accumulating from scratch.
#[derive(Clone, Copy, Default)]
pub struct Reprojection {
    pub prev_x: f32,
    pub prev_y: f32,
    pub tap_mask: u32,
}

impl Reprojection {
    pub fn invalid() -> Self {
        Self::default()
    }

    pub fn is_some(&self) -> bool {
        self.tap_mask != 0
    }

    pub fn is_none(&self) -> bool {
        !self.is_some()
    }

    pub fn prev_pos(&self) -> Vec2 {
        vec2(self.prev_x, self.prev_y)
    }

    pub fn prev_pos_round(&self) -> UVec2 {
        self.prev_pos().round().as_uvec2()
    }

    pub fn is_exact(&self) -> bool {
        self.tap_mask == 0b1111
            && self.prev_pos().fract().length_squared() == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_has_no_history() {
        assert!(Reprojection::invalid().is_none());
    }

    #[test]
    fn partially_validated_taps_still_count_as_history() {
        let target = Reprojection {
            prev_x: 12.5,
            prev_y: 34.5,
            tap_mask: 0b0010,
        };

        assert!(target.is_some());
        assert!(!target.is_exact());
    }

    #[test]
    fn exact() {
        let target = Reprojection {
            prev_x: 12.0,
            prev_y: 34.0,
            tap_mask: 0b1111,
        };

        assert!(target.is_exact());
        assert_eq!(UVec2::new(12, 34), target.prev_pos_round());
    }
}
