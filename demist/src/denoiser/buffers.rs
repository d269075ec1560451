use std::mem;

use anyhow::{ensure, Result};
use demist_gpu as gpu;
use glam::UVec2;
use log::debug;

use crate::{
    Camera, DoubleBuffered, MappedUniformBuffer, Texture,
    UnmappedStorageBuffer,
};

const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
const MOMENTS_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba32Float;

/// Surfaces and buffers owned by one denoiser instance.
///
/// Everything here is created once, sized to the configured resolution
/// scale, and only ever recreated wholesale on a resolution or scale change;
/// frames allocate nothing.
#[derive(Debug)]
pub struct DenoiserBuffers {
    /// Denoiser-resolution camera; bounds-checks every pass.
    pub camera: MappedUniformBuffer<gpu::Camera>,

    /// Noisy per-pixel samples, written by the external ray tracer.
    pub samples: Texture,

    /// Temporally accumulated color, variance estimate in `.w`;
    /// double-buffered so frame `F` can read frame `F-1`'s result.
    pub accum_colors: DoubleBuffered<Texture>,

    /// Accumulated luminance moments plus history length.
    pub moments: DoubleBuffered<Texture>,

    /// Color history consumed by the next frame when "blur as temporal
    /// input" is on; receives an intermediate à-trous iteration's output.
    pub history: Texture,

    /// À-trous ping-pong pair.
    pub wavelets: [Texture; 2],

    /// Full-resolution output of the guided upsampler.
    pub upsample: Texture,

    pub filter_tiles: UnmappedStorageBuffer,
    pub filter_args: UnmappedStorageBuffer,
    pub copy_tiles: UnmappedStorageBuffer,
    pub copy_args: UnmappedStorageBuffer,
}

impl DenoiserBuffers {
    pub fn new(
        device: &wgpu::Device,
        camera: &Camera,
        full_size: UVec2,
        size: UVec2,
    ) -> Result<Self> {
        debug!("Initializing denoiser buffers; size={size:?}");

        let limit = device.limits().max_texture_dimension_2d;

        ensure!(
            full_size.x <= limit && full_size.y <= limit,
            "viewport of {}x{} exceeds the device limit of {}",
            full_size.x,
            full_size.y,
            limit
        );

        let camera = MappedUniformBuffer::new(
            device,
            "demist_camera",
            camera.serialize(size),
        );

        let samples =
            Texture::new(device, "demist_samples", size, COLOR_FORMAT);

        let accum_colors = DoubleBuffered::<Texture>::new(
            device,
            "demist_accum_colors",
            size,
            COLOR_FORMAT,
        );

        let moments = DoubleBuffered::<Texture>::new(
            device,
            "demist_moments",
            size,
            MOMENTS_FORMAT,
        );

        let history =
            Texture::new(device, "demist_history", size, COLOR_FORMAT);

        let wavelets = [
            Texture::new(device, "demist_wavelet_0", size, COLOR_FORMAT),
            Texture::new(device, "demist_wavelet_1", size, COLOR_FORMAT),
        ];

        let upsample =
            Texture::new(device, "demist_upsample", full_size, COLOR_FORMAT);

        let tiles_size =
            (gpu::tile_count(size) as usize) * mem::size_of::<UVec2>();

        let args_size = mem::size_of::<gpu::DispatchArgs>();

        let filter_tiles = UnmappedStorageBuffer::new(
            device,
            "demist_filter_tiles",
            tiles_size,
        );

        let filter_args = UnmappedStorageBuffer::new_indirect(
            device,
            "demist_filter_args",
            args_size,
        );

        let copy_tiles =
            UnmappedStorageBuffer::new(device, "demist_copy_tiles", tiles_size);

        let copy_args = UnmappedStorageBuffer::new_indirect(
            device,
            "demist_copy_args",
            args_size,
        );

        Ok(Self {
            camera,
            samples,
            accum_colors,
            moments,
            history,
            wavelets,
            upsample,
            filter_tiles,
            filter_args,
            copy_tiles,
            copy_args,
        })
    }
}
