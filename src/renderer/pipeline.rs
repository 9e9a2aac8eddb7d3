//! Bind group layouts, uniform buffers and the render pipeline.

use std::num::NonZeroU64;

use wgpu::util::DeviceExt;

use crate::renderer::context::DEPTH_FORMAT;
use crate::renderer::shader::{self, FRAGMENT_ENTRY, VERTEX_ENTRY};
use crate::renderer::uniforms::{GlobalUniforms, MaterialUniforms, material_stride};
use crate::scene::deindex::Vertex;

/// GPU state shared by every pipeline variant: the shader module, the layouts,
/// and the uniform buffers with their bind groups.
pub struct ShadingResources {
    pub shader: wgpu::ShaderModule,
    pub pipeline_layout: wgpu::PipelineLayout,

    pub global_buffer: wgpu::Buffer,
    pub global_bind_group: wgpu::BindGroup,

    material_layout: wgpu::BindGroupLayout,
    pub material_buffer: wgpu::Buffer,
    pub material_bind_group: wgpu::BindGroup,
    pub material_stride: wgpu::BufferAddress,
    material_capacity: usize,
}

impl ShadingResources {
    pub fn new(device: &wgpu::Device, material_slots: usize) -> Self {
        let shader = shader::create_module(device);

        let global_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Global Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<GlobalUniforms>() as u64),
                },
                count: None,
            }],
        });

        let material_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Material Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<MaterialUniforms>() as u64),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Cornell Pipeline Layout"),
            bind_group_layouts: &[Some(&global_layout), Some(&material_layout)],
            immediate_size: 0,
        });

        let global_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Global Uniforms"),
            contents: bytemuck::bytes_of(&GlobalUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let global_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Global BindGroup"),
            layout: &global_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: global_buffer.as_entire_binding(),
            }],
        });

        let stride = material_stride(device.limits().min_uniform_buffer_offset_alignment);
        let capacity = material_slots.max(1);
        let (material_buffer, material_bind_group) =
            Self::create_material_storage(device, &material_layout, stride, capacity);

        Self {
            shader,
            pipeline_layout,
            global_buffer,
            global_bind_group,
            material_layout,
            material_buffer,
            material_bind_group,
            material_stride: stride,
            material_capacity: capacity,
        }
    }

    fn create_material_storage(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        stride: wgpu::BufferAddress,
        capacity: usize,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Material Uniforms"),
            size: stride * capacity as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Material BindGroup"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: NonZeroU64::new(std::mem::size_of::<MaterialUniforms>() as u64),
                }),
            }],
        });

        (buffer, bind_group)
    }

    /// Grows the material buffer so it holds at least `slots` entries.
    pub fn reserve_materials(&mut self, device: &wgpu::Device, slots: usize) {
        if slots <= self.material_capacity {
            return;
        }
        let capacity = slots.next_power_of_two();
        log::debug!("Growing material buffer: {} -> {capacity} slots", self.material_capacity);

        let (buffer, bind_group) =
            Self::create_material_storage(device, &self.material_layout, self.material_stride, capacity);
        self.material_buffer = buffer;
        self.material_bind_group = bind_group;
        self.material_capacity = capacity;
    }

    /// Packs materials at `material_stride` intervals.
    #[must_use]
    pub fn pack_materials(&self, materials: &[MaterialUniforms]) -> Vec<u8> {
        let stride = self.material_stride as usize;
        let mut bytes = vec![0u8; stride * materials.len()];
        for (slot, material) in bytes.chunks_exact_mut(stride).zip(materials) {
            slot[..std::mem::size_of::<MaterialUniforms>()].copy_from_slice(bytemuck::bytes_of(material));
        }
        bytes
    }

    /// Creates the render pipeline for a color target format.
    pub fn create_pipeline(&self, device: &wgpu::Device, color_format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Cornell Pipeline"),
            layout: Some(&self.pipeline_layout),
            vertex: wgpu::VertexState {
                module: &self.shader,
                entry_point: Some(VERTEX_ENTRY),
                buffers: &[Vertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &self.shader,
                entry_point: Some(FRAGMENT_ENTRY),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: Some(true),
                depth_compare: Some(wgpu::CompareFunction::Less),
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }
}
