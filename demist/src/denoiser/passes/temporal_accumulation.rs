use demist_gpu as gpu;

use crate::{
    ComputePass, Denoiser, DenoiserBuffers, DenoiserConfig,
    DoubleBufferedBindable, Engine, GBuffer,
};

/// Reprojects and blends the previous frame's history with the new noisy
/// sample, and schedules each tile onto the filter or copy list.
///
/// Built in two variants that differ only in where the color history comes
/// from: last frame's raw accumulation, or the filter-feedback surface
/// ("blur as temporal input"); the variant is picked per frame from the
/// config, so toggling the flag costs nothing.
#[derive(Debug)]
pub struct TemporalAccumulationPass {
    from_accum: ComputePass<gpu::TemporalAccumulationPassParams>,
    from_history: ComputePass<gpu::TemporalAccumulationPassParams>,
}

impl TemporalAccumulationPass {
    pub fn new(
        engine: &Engine,
        device: &wgpu::Device,
        _: &DenoiserConfig,
        gbuffer: &GBuffer,
        buffers: &DenoiserBuffers,
    ) -> Self {
        let from_accum = Self::build(
            engine,
            device,
            gbuffer,
            buffers,
            &buffers.accum_colors.past().bind_readable(),
        );

        let from_history = Self::build(
            engine,
            device,
            gbuffer,
            buffers,
            &buffers.history.bind_readable(),
        );

        Self {
            from_accum,
            from_history,
        }
    }

    fn build(
        engine: &Engine,
        device: &wgpu::Device,
        gbuffer: &GBuffer,
        buffers: &DenoiserBuffers,
        history: &dyn DoubleBufferedBindable,
    ) -> ComputePass<gpu::TemporalAccumulationPassParams> {
        ComputePass::builder("temporal_accumulation")
            .bind([
                &buffers.camera.bind_readable(),
                &gbuffer.scaled_surface_map().curr().bind_readable(),
                &gbuffer.scaled_surface_map().past().bind_readable(),
                &gbuffer.velocity_map().bind_readable(),
            ])
            .bind([
                &buffers.samples.bind_readable(),
                history,
                &buffers.moments.past().bind_readable(),
                &buffers.accum_colors.curr().bind_writable(),
                &buffers.moments.curr().bind_writable(),
            ])
            .bind([
                &buffers.filter_tiles.bind_writable(),
                &buffers.filter_args.bind_writable(),
                &buffers.copy_tiles.bind_writable(),
                &buffers.copy_args.bind_writable(),
            ])
            .build(device, &engine.shaders.temporal_accumulation)
    }

    pub fn run(
        &self,
        denoiser: &Denoiser,
        encoder: &mut wgpu::CommandEncoder,
    ) {
        let config = denoiser.config();

        // This pass uses 8x8 warps, one per tile:
        let size = gpu::tile_grid(denoiser.size());

        let params = gpu::TemporalAccumulationPassParams {
            alpha: config.alpha,
            moments_alpha: config.moments_alpha,
            variance_threshold: config.variance_threshold,
            depth_tolerance: config.depth_tolerance,
            normal_tolerance: config.normal_tolerance,
        };

        let pass = if config.blur_as_input {
            &self.from_history
        } else {
            &self.from_accum
        };

        pass.run(denoiser.is_alternate(), encoder, size, params);
    }
}
