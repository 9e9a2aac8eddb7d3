use wgpu::util::DeviceExt;

use crate::scene::deindex::DeindexedMesh;
use crate::scene::mesh::MeshAllocator;

/// Static vertex and index buffers of one mesh.
#[derive(Debug)]
pub struct GpuMeshBuffers {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
}

/// Allocates mesh buffers on a wgpu device.
pub struct WgpuMeshAllocator<'a> {
    device: &'a wgpu::Device,
}

impl<'a> WgpuMeshAllocator<'a> {
    #[must_use]
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }
}

impl MeshAllocator for WgpuMeshAllocator<'_> {
    type Buffers = GpuMeshBuffers;

    fn allocate(&mut self, label: &str, geometry: &DeindexedMesh) -> GpuMeshBuffers {
        let vertex_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertices")),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Indices")),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!(
            "Uploaded mesh '{label}': {} vertices, {} indices",
            geometry.vertices.len(),
            geometry.indices.len()
        );

        GpuMeshBuffers {
            vertex_buffer,
            index_buffer,
        }
    }
}
