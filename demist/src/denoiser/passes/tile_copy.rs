use crate::{
    ComputePass, Denoiser, DenoiserBuffers, DenoiserConfig,
    DoubleBufferedBindable, Engine, FilterStep, GBuffer,
};

/// Propagates converged tiles unchanged into the current iteration's write
/// buffer, so the filter pass can skip them without leaving the output
/// surface partially undefined.
///
/// One variant per possible input of an iteration (the accumulation output
/// for iteration 0, then either ping-pong buffer).
#[derive(Debug)]
pub struct TileCopyPass {
    from_accum: ComputePass,
    from_wavelet_0: ComputePass,
    from_wavelet_1: ComputePass,
}

impl TileCopyPass {
    pub fn new(
        engine: &Engine,
        device: &wgpu::Device,
        _: &DenoiserConfig,
        _: &GBuffer,
        buffers: &DenoiserBuffers,
    ) -> Self {
        let from_accum = Self::build(
            engine,
            device,
            buffers,
            &buffers.accum_colors.curr().bind_readable(),
            &buffers.wavelets[1].bind_writable(),
        );

        let from_wavelet_0 = Self::build(
            engine,
            device,
            buffers,
            &buffers.wavelets[0].bind_readable(),
            &buffers.wavelets[1].bind_writable(),
        );

        let from_wavelet_1 = Self::build(
            engine,
            device,
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
        buffers: &DenoiserBuffers,
        input: &dyn DoubleBufferedBindable,
        output: &dyn DoubleBufferedBindable,
    ) -> ComputePass {
        ComputePass::builder("tile_copy")
            .bind([&buffers.camera.bind_readable(), input, output])
            .bind([&buffers.copy_tiles.bind_readable()])
            .build(device, &engine.shaders.tile_copy)
    }

    pub fn run(
        &self,
        denoiser: &Denoiser,
        encoder: &mut wgpu::CommandEncoder,
        step: &FilterStep,
    ) {
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
            &denoiser.buffers().copy_args,
            (),
        );
    }
}
