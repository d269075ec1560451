use log::info;

use crate::Shaders;

/// Device-wide context shared by all denoiser instances; holds the compiled
/// shader modules, which only have to exist once per device.
pub struct Engine {
    pub(crate) shaders: Shaders,
}

impl Engine {
    pub fn new(device: &wgpu::Device) -> Self {
        info!("Initializing");

        Self {
            shaders: Shaders::new(device),
        }
    }

    /// Features the device has to be created with: push constants carry the
    /// per-pass parameters and texture clears implement the history resets.
    pub fn required_features() -> wgpu::Features {
        wgpu::Features::PUSH_CONSTANTS | wgpu::Features::CLEAR_TEXTURE
    }

    /// See: [`Self::required_features()`].
    pub fn required_limits() -> wgpu::Limits {
        wgpu::Limits {
            max_push_constant_size: 128,
            ..Default::default()
        }
    }
}
