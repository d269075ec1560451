use anyhow::{ensure, Result};
use glam::UVec2;
use log::debug;

use crate::{DoubleBuffered, ResolutionScale, Texture};

/// Read surface of the external G-buffer component.
///
/// The rasterizer fills these textures each frame through [`Self::views`];
/// the denoiser only ever borrows them read-only. The surface map packs the
/// octahedral-encoded normal into `.xy` and the linear depth into `.z`
/// (depth 0 marks sky); the velocity map holds the screen-space motion
/// vector in pixels, `current_pos - previous_pos`, in `.xy`.
///
/// When the denoiser runs below display resolution, a second, downsampled
/// surface map at that resolution acts as the "chosen mip" of the G-buffer;
/// at full scale both roles are served by the same textures.
#[derive(Debug)]
pub struct GBuffer {
    surface_map: DoubleBuffered<Texture>,
    scaled_surface_map: Option<DoubleBuffered<Texture>>,
    velocity_map: Texture,
    size: UVec2,
    scale: ResolutionScale,
}

impl GBuffer {
    pub fn new(
        device: &wgpu::Device,
        size: UVec2,
        scale: ResolutionScale,
    ) -> Result<Self> {
        debug!("Initializing g-buffer; size={size:?} scale={scale:?}");

        let limit = device.limits().max_texture_dimension_2d;

        ensure!(
            size.x > 0 && size.y > 0,
            "g-buffer cannot be empty: {}x{}",
            size.x,
            size.y
        );

        ensure!(
            size.x <= limit && size.y <= limit,
            "g-buffer of {}x{} exceeds the device limit of {}",
            size.x,
            size.y,
            limit
        );

        let surface_map = DoubleBuffered::<Texture>::new(
            device,
            "demist_surface_map",
            size,
            wgpu::TextureFormat::Rgba32Float,
        );

        let scaled_surface_map = if scale == ResolutionScale::Full {
            None
        } else {
            Some(DoubleBuffered::<Texture>::new(
                device,
                "demist_scaled_surface_map",
                scale.scale_size(size),
                wgpu::TextureFormat::Rgba32Float,
            ))
        };

        let velocity_map = Texture::new(
            device,
            "demist_velocity_map",
            scale.scale_size(size),
            wgpu::TextureFormat::Rgba32Float,
        );

        Ok(Self {
            surface_map,
            scaled_surface_map,
            velocity_map,
            size,
            scale,
        })
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn scale(&self) -> ResolutionScale {
        self.scale
    }

    /// Full-resolution surface map; guides the upsampler.
    pub fn surface_map(&self) -> &DoubleBuffered<Texture> {
        &self.surface_map
    }

    /// Surface map at the denoiser's resolution.
    pub fn scaled_surface_map(&self) -> &DoubleBuffered<Texture> {
        self.scaled_surface_map.as_ref().unwrap_or(&self.surface_map)
    }

    pub fn velocity_map(&self) -> &Texture {
        &self.velocity_map
    }

    /// Views for the external rasterizer to render into; `alternate` is the
    /// frame parity (see [`crate::Denoiser::is_alternate()`]).
    pub fn views(&self, alternate: bool) -> GBufferViews {
        GBufferViews {
            surface_map: self.surface_map.get(alternate).view(),
            scaled_surface_map: self
                .scaled_surface_map
                .as_ref()
                .map(|map| map.get(alternate).view()),
            velocity_map: self.velocity_map.view(),
        }
    }
}

pub struct GBufferViews<'a> {
    pub surface_map: &'a wgpu::TextureView,
    pub scaled_surface_map: Option<&'a wgpu::TextureView>,
    pub velocity_map: &'a wgpu::TextureView,
}
