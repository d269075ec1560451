mod buffers;
mod pass;
mod passes;
mod plan;

use std::mem;
use std::ops::DerefMut;

use anyhow::Result;
use glam::UVec2;
use log::{debug, info};

pub use self::buffers::*;
pub use self::pass::*;
pub use self::passes::*;
pub use self::plan::*;
use crate::config::{resolve_output, OutputSurface};
use crate::{
    Camera, DenoiserConfig, Engine, GBuffer, OutputMode, ResolutionScale,
    Texture,
};

/// Spatiotemporal denoiser instance for one ray-traced effect.
///
/// Owns every surface it writes; the G-buffer is borrowed read-only. The
/// per-frame protocol is:
///
/// 1. [`Self::update()`] with this frame's camera,
/// 2. [`Self::flush()`] - advances the frame parity and uploads uniforms,
/// 3. the external ray tracer writes into [`Self::samples()`],
/// 4. [`Self::denoise()`] records the compute passes,
/// 5. composition reads [`Self::output()`].
///
/// All passes land in one command encoder in stage order; cross-stage
/// visibility (including the indirect-argument reads) comes from wgpu's
/// usage tracking over the declared bindings.
pub struct Denoiser {
    camera: Camera,
    config: DenoiserConfig,
    output_mode: OutputMode,
    enabled: bool,
    buffers: DenoiserBuffers,
    passes: DenoiserPasses,
    full_size: UVec2,
    size: UVec2,
    frame: u32,
    first_frame: bool,
}

impl Denoiser {
    pub fn new(
        engine: &Engine,
        device: &wgpu::Device,
        gbuffer: &GBuffer,
        camera: Camera,
        config: DenoiserConfig,
    ) -> Result<Self> {
        config.validate()?;

        info!("Creating denoiser: {}", camera.describe());

        let full_size = camera.viewport_size;
        let size = config.scale.scale_size(full_size);
        let buffers = DenoiserBuffers::new(device, &camera, full_size, size)?;

        let passes =
            DenoiserPasses::new(engine, device, &config, gbuffer, &buffers);

        debug!("Denoiser created");

        Ok(Self {
            camera,
            config,
            output_mode: Default::default(),
            enabled: true,
            buffers,
            passes,
            full_size,
            size,
            frame: 0,
            first_frame: true,
        })
    }

    /// Applies this frame's camera; a viewport change tears all surfaces
    /// down and recreates them.
    pub fn update(
        &mut self,
        engine: &Engine,
        device: &wgpu::Device,
        gbuffer: &GBuffer,
        camera: Camera,
    ) -> Result<()> {
        let needs_rebuilding = self.camera.is_invalidated_by(&camera);

        self.camera = camera;

        if needs_rebuilding {
            self.rebuild(engine, device, gbuffer)?;
        }

        *self.buffers.camera.deref_mut() = self.camera.serialize(self.size);

        Ok(())
    }

    /// Applies a new configuration; a scale change tears all surfaces down
    /// and recreates them, everything else takes effect next frame.
    pub fn set_config(
        &mut self,
        engine: &Engine,
        device: &wgpu::Device,
        gbuffer: &GBuffer,
        config: DenoiserConfig,
    ) -> Result<()> {
        config.validate()?;

        let needs_rebuilding = config.scale != self.config.scale;

        self.config = config;

        if needs_rebuilding {
            self.rebuild(engine, device, gbuffer)?;
        }

        Ok(())
    }

    fn rebuild(
        &mut self,
        engine: &Engine,
        device: &wgpu::Device,
        gbuffer: &GBuffer,
    ) -> Result<()> {
        debug!("Rebuilding denoiser: {}", self.camera.describe());

        // Frames in flight may still read the old surfaces; recreation must
        // not race them
        device.poll(wgpu::Maintain::Wait);

        self.full_size = self.camera.viewport_size;
        self.size = self.config.scale.scale_size(self.full_size);

        self.buffers = DenoiserBuffers::new(
            device,
            &self.camera,
            self.full_size,
            self.size,
        )?;

        self.passes = DenoiserPasses::new(
            engine,
            device,
            &self.config,
            gbuffer,
            &self.buffers,
        );

        self.first_frame = true;

        Ok(())
    }

    /// Routing the noisy input straight to the output; history surfaces stay
    /// alive, so re-enabling doesn't start from scratch.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_output_mode(&mut self, output_mode: OutputMode) {
        self.output_mode = output_mode;
    }

    pub fn config(&self) -> &DenoiserConfig {
        &self.config
    }

    /// Advances the frame; the parity flip is what swaps "current" and
    /// "previous" in every double-buffered resource.
    pub fn flush(&mut self, queue: &wgpu::Queue) {
        self.frame += 1;
        self.buffers.camera.flush(queue);
    }

    /// Records this frame's denoising work.
    pub fn denoise(&mut self, encoder: &mut wgpu::CommandEncoder) {
        if !self.enabled {
            return;
        }

        if mem::take(&mut self.first_frame) {
            debug!("Clearing history surfaces");

            let alternate = self.is_alternate();

            self.buffers.history.clear(encoder);
            self.buffers.accum_colors.get(!alternate).clear(encoder);
            self.buffers.moments.get(!alternate).clear(encoder);
        }

        self.passes.tile_reset.run(self, encoder);
        self.passes.temporal_accumulation.run(self, encoder);

        let plan = FilterPlan::new(
            self.config.filter_iterations,
            self.config.feedback_iteration,
            self.config.blur_as_input,
        );

        for step in plan.steps() {
            self.passes.tile_copy.run(self, encoder, &step);
            self.passes.wavelet.run(self, encoder, &step);

            if step.feedback {
                self.buffers.wavelets[step.write]
                    .copy_to(&self.buffers.history, encoder);
            }
        }

        if self.config.scale != ResolutionScale::Full {
            self.passes.upsample.run(self, encoder, plan.output_index());
        }
    }

    /// Target for the external ray tracer's noisy output.
    pub fn samples(&self) -> &Texture {
        &self.buffers.samples
    }

    /// The current best denoised estimate, per the configured output mode.
    pub fn output(&self) -> &Texture {
        let surface = resolve_output(
            self.enabled,
            self.output_mode,
            self.config.scale,
            self.config.filter_iterations,
        );

        match surface {
            OutputSurface::Samples => &self.buffers.samples,
            OutputSurface::Accumulation => {
                self.buffers.accum_colors.get(self.is_alternate())
            }
            OutputSurface::Wavelet(idx) => &self.buffers.wavelets[idx],
            OutputSurface::Upsample => &self.buffers.upsample,
        }
    }

    /// Frame parity; selects which half of every double-buffered resource is
    /// "current" this frame.
    pub fn is_alternate(&self) -> bool {
        self.frame % 2 == 1
    }

    pub(crate) fn buffers(&self) -> &DenoiserBuffers {
        &self.buffers
    }

    pub(crate) fn size(&self) -> UVec2 {
        self.size
    }

    pub(crate) fn full_size(&self) -> UVec2 {
        self.full_size
    }
}

impl Drop for Denoiser {
    fn drop(&mut self) {
        info!("Deleting denoiser: {}", self.camera.describe());
    }
}
