use bytemuck::{Pod, Zeroable};
use glam::{IVec2, Mat4, UVec2, Vec4, Vec4Swizzles};

/// Camera state as the compute passes see it; one uniform per denoiser
/// instance, with `screen` carrying the denoiser's (possibly reduced)
/// resolution rather than the display's.
#[repr(C)]
#[derive(Clone, Copy, Default, Pod, Zeroable)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub struct Camera {
    pub projection_view: Mat4,
    pub ndc_to_world: Mat4,
    pub origin: Vec4,
    pub screen: Vec4,
}

impl Camera {
    pub fn screen_size(&self) -> UVec2 {
        self.screen.xy().as_uvec2()
    }

    /// Returns whether given point lays inside the screen.
    pub fn contains(&self, pos: IVec2) -> bool {
        let screen_size = self.screen.xy().as_ivec2();

        pos.x >= 0
            && pos.y >= 0
            && pos.x < screen_size.x
            && pos.y < screen_size.y
    }
}

#[cfg(test)]
mod tests {
    use glam::{ivec2, uvec2, vec4};

    use super::*;

    #[test]
    fn contains() {
        let camera = Camera {
            screen: vec4(640.0, 480.0, 0.0, 0.0),
            ..Default::default()
        };

        assert_eq!(uvec2(640, 480), camera.screen_size());

        assert!(camera.contains(ivec2(0, 0)));
        assert!(camera.contains(ivec2(639, 479)));
        assert!(!camera.contains(ivec2(640, 479)));
        assert!(!camera.contains(ivec2(639, 480)));
        assert!(!camera.contains(ivec2(-1, 0)));
    }
}
