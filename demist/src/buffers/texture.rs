use glam::UVec2;
use log::debug;

use super::Bindable;

/// Storage texture with an attached view and nearest-neighbor sampler.
///
/// All of the denoiser's surfaces go through here; the attached usages allow
/// compute reads/writes, whole-surface clears (history resets) and
/// texture-to-texture copies (the filter-feedback path).
#[derive(Debug)]
pub struct Texture {
    tex: wgpu::Texture,
    tex_view: wgpu::TextureView,
    sampler: wgpu::Sampler,
    size: UVec2,
    format: wgpu::TextureFormat,
}

impl Texture {
    pub fn new(
        device: &wgpu::Device,
        label: impl AsRef<str>,
        size: UVec2,
        format: wgpu::TextureFormat,
    ) -> Self {
        let label = label.as_ref();

        debug!("Allocating texture `{label}`; size={size:?} format={format:?}");

        assert!(size.x > 0);
        assert!(size.y > 0);

        let tex = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&format!("{label}_tex")),
            size: wgpu::Extent3d {
                width: size.x,
                height: size.y,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::STORAGE_BINDING
                | wgpu::TextureUsages::COPY_SRC
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let tex_view = tex.create_view(&Default::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{label}_sampler")),
            ..Default::default()
        });

        Self {
            tex,
            tex_view,
            sampler,
            size,
            format,
        }
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// View for external writers, e.g. the rasterizer filling the G-buffer.
    pub fn view(&self) -> &wgpu::TextureView {
        &self.tex_view
    }

    /// Zeroes the whole surface; requires [`wgpu::Features::CLEAR_TEXTURE`].
    pub fn clear(&self, encoder: &mut wgpu::CommandEncoder) {
        encoder.clear_texture(&self.tex, &Default::default());
    }

    /// Copies this surface into `target`; both must agree on size and format.
    pub fn copy_to(&self, target: &Self, encoder: &mut wgpu::CommandEncoder) {
        assert_eq!(self.size, target.size);
        assert_eq!(self.format, target.format);

        encoder.copy_texture_to_texture(
            self.tex.as_image_copy(),
            target.tex.as_image_copy(),
            wgpu::Extent3d {
                width: self.size.x,
                height: self.size.y,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Binds as a sampled texture + nearest sampler; for the composition /
    /// presentation side, which reads the output through a shader sampler.
    pub fn bind_sampled(&self) -> impl Bindable + '_ {
        TextureBinder {
            parent: self,
            kind: TextureBinderKind::Sampled,
        }
    }

    /// Binds as a read-only storage texture.
    pub fn bind_readable(&self) -> impl Bindable + '_ {
        TextureBinder {
            parent: self,
            kind: TextureBinderKind::Readable,
        }
    }

    /// Binds as a write-only storage texture.
    pub fn bind_writable(&self) -> impl Bindable + '_ {
        TextureBinder {
            parent: self,
            kind: TextureBinderKind::Writable,
        }
    }
}

#[derive(Clone, Copy)]
enum TextureBinderKind {
    Sampled,
    Readable,
    Writable,
}

struct TextureBinder<'a> {
    parent: &'a Texture,
    kind: TextureBinderKind,
}

impl Bindable for TextureBinder<'_> {
    fn bind(
        &self,
        binding: u32,
    ) -> Vec<(wgpu::BindGroupLayoutEntry, wgpu::BindingResource)> {
        let tex_resource =
            wgpu::BindingResource::TextureView(&self.parent.tex_view);

        match self.kind {
            TextureBinderKind::Sampled => {
                let tex_layout = wgpu::BindGroupLayoutEntry {
                    binding,
                    visibility: wgpu::ShaderStages::FRAGMENT
                        | wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float {
                            filterable: false,
                        },
                    },
                    count: None,
                };

                let sampler_layout = wgpu::BindGroupLayoutEntry {
                    binding: binding + 1,
                    visibility: wgpu::ShaderStages::FRAGMENT
                        | wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Sampler(
                        wgpu::SamplerBindingType::NonFiltering,
                    ),
                    count: None,
                };

                let sampler_resource =
                    wgpu::BindingResource::Sampler(&self.parent.sampler);

                vec![
                    (tex_layout, tex_resource),
                    (sampler_layout, sampler_resource),
                ]
            }

            TextureBinderKind::Readable | TextureBinderKind::Writable => {
                let access = match self.kind {
                    TextureBinderKind::Readable => {
                        wgpu::StorageTextureAccess::ReadOnly
                    }
                    _ => wgpu::StorageTextureAccess::WriteOnly,
                };

                let tex_layout = wgpu::BindGroupLayoutEntry {
                    binding,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::StorageTexture {
                        access,
                        format: self.parent.format,
                        view_dimension: wgpu::TextureViewDimension::D2,
                    },
                    count: None,
                };

                vec![(tex_layout, tex_resource)]
            }
        }
    }
}
