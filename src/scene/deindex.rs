//! Geometry deindexing.
//!
//! OBJ-style data indexes positions and normals separately per face-vertex.
//! GPUs want a single index per vertex, so every face-vertex is expanded into
//! its own interleaved [`Vertex`]. No deduplication takes place: a shape with
//! `F` face-vertices always yields `F` vertices and the index list `0..F`.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::errors::{AttributeKind, CornellError, Result};
use crate::scene::source::{FaceVertex, ShapeDesc};

/// Interleaved GPU vertex: position followed by normal.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    /// Number of `f32` components per vertex.
    pub const STRIDE_COMPONENTS: usize = 6;
    /// Component offset of the normal inside a vertex.
    pub const NORMAL_OFFSET_COMPONENTS: usize = 3;

    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    /// Vertex buffer layout: position at location 0, normal at location 1.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    #[inline]
    #[must_use]
    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }
}

/// Flat vertex and index buffers for one shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeindexedMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl DeindexedMesh {
    #[inline]
    #[must_use]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Expands a shape's face-vertices into one vertex each.
///
/// `shape_index` is only used to label errors.
pub fn deindex(
    positions: &[f32],
    normals: &[f32],
    shape: &ShapeDesc,
    shape_index: usize,
) -> Result<DeindexedMesh> {
    let count = shape.face_vertices.len();
    let mut vertices = Vec::with_capacity(count);

    for (face_vertex, &FaceVertex { position, normal }) in shape.face_vertices.iter().enumerate() {
        let locate = |attribute: AttributeKind, index: usize| CornellError::IndexOutOfRange {
            shape: shape_index,
            face_vertex,
            attribute,
            index,
            len: match attribute {
                AttributeKind::Position => positions.len() / 3,
                AttributeKind::Normal => normals.len() / 3,
            },
        };

        let position = fetch3(positions, position)
            .ok_or_else(|| locate(AttributeKind::Position, position))?;
        let normal =
            fetch3(normals, normal).ok_or_else(|| locate(AttributeKind::Normal, normal))?;

        vertices.push(Vertex { position, normal });
    }

    let indices = (0..count as u32).collect();

    Ok(DeindexedMesh { vertices, indices })
}

#[inline]
fn fetch3(stream: &[f32], index: usize) -> Option<[f32; 3]> {
    let start = index.checked_mul(3)?;
    let slice = stream.get(start..start.checked_add(3)?)?;
    Some([slice[0], slice[1], slice[2]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_matches_interleaved_format() {
        assert_eq!(std::mem::size_of::<Vertex>(), Vertex::STRIDE_COMPONENTS * 4);

        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(
            layout.attributes[1].offset,
            (Vertex::NORMAL_OFFSET_COMPONENTS * 4) as u64
        );
        assert_eq!(layout.attributes[1].shader_location, 1);
    }

    #[test]
    fn fetch3_rejects_partial_elements() {
        let stream = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(fetch3(&stream, 0), Some([0.0, 1.0, 2.0]));
        assert_eq!(fetch3(&stream, 1), None);
        assert_eq!(fetch3(&stream, usize::MAX), None);
    }
}
