use demist_gpu as gpu;

use crate::{
    ComputePass, Denoiser, DenoiserBuffers, DenoiserConfig,
    DoubleBufferedBindable, Engine, GBuffer,
};

/// Reconstructs the full-resolution result from the low-resolution filtered
/// color, guided by the full-resolution surface map; only recorded when the
/// denoiser runs below display resolution.
#[derive(Debug)]
pub struct UpsamplePass {
    from_wavelet_0: ComputePass<gpu::UpsamplePassParams>,
    from_wavelet_1: ComputePass<gpu::UpsamplePassParams>,
}

impl UpsamplePass {
    pub fn new(
        engine: &Engine,
        device: &wgpu::Device,
        _: &DenoiserConfig,
        gbuffer: &GBuffer,
        buffers: &DenoiserBuffers,
    ) -> Self {
        let from_wavelet_0 = Self::build(
            engine,
            device,
            gbuffer,
            buffers,
            &buffers.wavelets[0].bind_readable(),
        );

        let from_wavelet_1 = Self::build(
            engine,
            device,
            gbuffer,
            buffers,
            &buffers.wavelets[1].bind_readable(),
        );

        Self {
            from_wavelet_0,
            from_wavelet_1,
        }
    }

    fn build(
        engine: &Engine,
        device: &wgpu::Device,
        gbuffer: &GBuffer,
        buffers: &DenoiserBuffers,
        input: &dyn DoubleBufferedBindable,
    ) -> ComputePass<gpu::UpsamplePassParams> {
        ComputePass::builder("upsample")
            .bind([
                &gbuffer.surface_map().curr().bind_readable(),
                &gbuffer.scaled_surface_map().curr().bind_readable(),
            ])
            .bind([input, &buffers.upsample.bind_writable()])
            .build(device, &engine.shaders.upsample)
    }

    pub fn run(
        &self,
        denoiser: &Denoiser,
        encoder: &mut wgpu::CommandEncoder,
        output_index: usize,
    ) {
        let full_size = denoiser.full_size();
        let size = denoiser.size();

        let params = gpu::UpsamplePassParams {
            divisor: denoiser.config().scale.divisor(),
            low_width: size.x,
            low_height: size.y,
            full_width: full_size.x,
            full_height: full_size.y,
        };

        let pass = if output_index == 0 {
            &self.from_wavelet_0
        } else {
            &self.from_wavelet_1
        };

        pass.run(
            denoiser.is_alternate(),
            encoder,
            gpu::tile_grid(full_size),
            params,
        );
    }
}
