//! Spatiotemporal denoiser for hybrid rasterization + ray-tracing renderers.
//!
//! Reconstructs a clean image from a single noisy ray-traced sample per
//! pixel per frame: reprojected temporal accumulation with a per-pixel
//! variance estimate, a tile-compacted edge-avoiding à-trous filter, and a
//! depth/normal-guided upsampler for reduced-resolution ray tracing.
//!
//! The scene, G-buffer rasterization, ray generation and composition are
//! external; they meet this crate at three surfaces: the [`GBuffer`] reader,
//! the noisy-sample texture ([`Denoiser::samples()`]) and the denoised
//! output ([`Denoiser::output()`]).

mod buffers;
mod camera;
mod config;
mod denoiser;
mod engine;
mod gbuffer;
mod shaders;

pub use demist_gpu as gpu;

pub use self::buffers::*;
pub use self::camera::*;
pub use self::config::*;
pub use self::denoiser::*;
pub use self::engine::*;
pub use self::gbuffer::*;
pub(crate) use self::shaders::*;
