use demist_gpu as gpu;

use crate::{
    ComputePass, Denoiser, DenoiserBuffers, DenoiserConfig,
    DoubleBufferedBindable, Engine, FilterStep, GBuffer,
};

/// One iteration of the edge-avoiding à-trous filter over the tiles the
/// temporal pass scheduled; dispatched indirectly, so converged frames cost
/// next to nothing.
#[derive(Debug)]
pub struct WaveletPass {
    from_accum: ComputePass<gpu::WaveletFilterPassParams>,
    from_wavelet_0: ComputePass<gpu::WaveletFilterPassParams>,
    from_wavelet_1: ComputePass<gpu::WaveletFilterPassParams>,
}

impl WaveletPass {
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
            &buffers.accum_colors.curr().bind_readable(),
            &buffers.wavelets[1].bind_writable(),
        );

        let from_wavelet_0 = Self::build(
            engine,
            device,
            gbuffer,
            buffers,
            &buffers.wavelets[0].bind_readable(),
            &buffers.wavelets[1].bind_writable(),
        );

        let from_wavelet_1 = Self::build(
            engine,
            device,
            gbuffer,
            buffers,
            &buffers.wavelets[1].bind_readable(),
            &buffers.wavelets[0].bind_writable(),
        );

        Self {
            from_accum,
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
        output: &dyn DoubleBufferedBindable,
    ) -> ComputePass<gpu::WaveletFilterPassParams> {
        ComputePass::builder("wavelet")
            .bind([
                &buffers.camera.bind_readable(),
                &gbuffer.scaled_surface_map().curr().bind_readable(),
            ])
            .bind([input, output])
            .bind([&buffers.filter_tiles.bind_readable()])
            .build(device, &engine.shaders.wavelet)
    }

    pub fn run(
        &self,
        denoiser: &Denoiser,
        encoder: &mut wgpu::CommandEncoder,
        step: &FilterStep,
    ) {
        let config = denoiser.config();

        let params = gpu::WaveletFilterPassParams {
            step_size: step.step_size,
            radius: config.filter_radius,
            phi_color: config.phi_color,
            phi_normal: config.phi_normal,
            sigma_depth: config.sigma_depth,
        };

        let pass = if step.reads_accumulation {
            &self.from_accum
        } else if step.read == 0 {
            &self.from_wavelet_0
        } else {
            &self.from_wavelet_1
        };

        pass.run_indirect(
            denoiser.is_alternate(),
            encoder,
            &denoiser.buffers().filter_args,
            params,
        );
    }
}
