use glam::UVec2;

use crate::{
    ComputePass, Denoiser, DenoiserBuffers, DenoiserConfig, Engine, GBuffer,
};

/// Rearms both tile lists' indirect-dispatch arguments; must run before the
/// temporal pass appends anything, every frame.
#[derive(Debug)]
pub struct TileResetPass {
    pass: ComputePass,
}

impl TileResetPass {
    pub fn new(
        engine: &Engine,
        device: &wgpu::Device,
        _: &DenoiserConfig,
        _: &GBuffer,
        buffers: &DenoiserBuffers,
    ) -> Self {
        let pass = ComputePass::builder("tile_reset")
            .bind([
                &buffers.filter_args.bind_writable(),
                &buffers.copy_args.bind_writable(),
            ])
            .build(device, &engine.shaders.tile_reset);

        Self { pass }
    }

    pub fn run(
        &self,
        denoiser: &Denoiser,
        encoder: &mut wgpu::CommandEncoder,
    ) {
        self.pass
            .run(denoiser.is_alternate(), encoder, UVec2::ONE, ());
    }
}
