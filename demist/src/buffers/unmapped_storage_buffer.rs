use log::debug;

use super::{pad_size, Bindable};

/// Storage buffer that exists only in VRAM.
///
/// Holds data structures the host never reads back - tile lists and
/// indirect-dispatch arguments; the latter additionally carry the INDIRECT
/// usage so the GPU can consume them as dispatch parameters.
#[derive(Debug)]
pub struct UnmappedStorageBuffer {
    buffer: wgpu::Buffer,
}

impl UnmappedStorageBuffer {
    pub fn new(
        device: &wgpu::Device,
        label: impl AsRef<str>,
        size: usize,
    ) -> Self {
        Self::new_ex(device, label, size, wgpu::BufferUsages::STORAGE)
    }

    /// See: [`Self::new()`]; also usable as an indirect-dispatch source.
    pub fn new_indirect(
        device: &wgpu::Device,
        label: impl AsRef<str>,
        size: usize,
    ) -> Self {
        Self::new_ex(
            device,
            label,
            size,
            wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::INDIRECT,
        )
    }

    fn new_ex(
        device: &wgpu::Device,
        label: impl AsRef<str>,
        size: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let label = label.as_ref();
        let size = pad_size(size);

        debug!("Allocating storage buffer `{label}`; size={size}");

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            usage,
            size: size as _,
            mapped_at_creation: false,
        });

        Self { buffer }
    }

    /// Raw buffer handle; feeds `dispatch_workgroups_indirect()`.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn bind_readable(&self) -> impl Bindable + '_ {
        UnmappedStorageBufferBinder {
            parent: self,
            read_only: true,
        }
    }

    pub fn bind_writable(&self) -> impl Bindable + '_ {
        UnmappedStorageBufferBinder {
            parent: self,
            read_only: false,
        }
    }
}

struct UnmappedStorageBufferBinder<'a> {
    parent: &'a UnmappedStorageBuffer,
    read_only: bool,
}

impl Bindable for UnmappedStorageBufferBinder<'_> {
    fn bind(
        &self,
        binding: u32,
    ) -> Vec<(wgpu::BindGroupLayoutEntry, wgpu::BindingResource)> {
        let layout = wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::COMPUTE,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Storage {
                    read_only: self.read_only,
                },
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let resource = self.parent.buffer.as_entire_binding();

        vec![(layout, resource)]
    }
}
