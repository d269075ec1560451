use demist_gpu as gpu;
use glam::{Mat4, UVec2, Vec3};

/// CPU-side camera description, serialized into [`gpu::Camera`] for the
/// compute passes.
#[derive(Clone, Debug)]
pub struct Camera {
    pub projection_view: Mat4,
    pub ndc_to_world: Mat4,
    pub origin: Vec3,
    pub viewport_size: UVec2,
}

impl Camera {
    /// Serializes at an explicit resolution, since the denoiser can run
    /// below the camera's own viewport resolution.
    pub fn serialize(&self, viewport_size: UVec2) -> gpu::Camera {
        gpu::Camera {
            projection_view: self.projection_view,
            ndc_to_world: self.ndc_to_world,
            origin: self.origin.extend(0.0),
            screen: viewport_size.as_vec2().extend(0.0).extend(0.0),
        }
    }

    /// Returns whether changing the camera into `rhs` invalidates surfaces
    /// sized after this camera.
    pub fn is_invalidated_by(&self, rhs: &Self) -> bool {
        self.viewport_size != rhs.viewport_size
    }

    pub fn describe(&self) -> String {
        format!("{}x{}", self.viewport_size.x, self.viewport_size.y)
    }
}

#[cfg(test)]
mod tests {
    use glam::uvec2;

    use super::*;

    #[test]
    fn invalidation_tracks_the_viewport() {
        let camera = Camera {
            projection_view: Mat4::IDENTITY,
            ndc_to_world: Mat4::IDENTITY,
            origin: Vec3::ZERO,
            viewport_size: uvec2(640, 480),
        };

        let mut moved = camera.clone();
        moved.origin = Vec3::ONE;

        let mut resized = camera.clone();
        resized.viewport_size = uvec2(800, 600);

        assert!(!camera.is_invalidated_by(&moved));
        assert!(camera.is_invalidated_by(&resized));
    }
}
