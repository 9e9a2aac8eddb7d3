//! Parsed scene description.
//!
//! This is the shape of the data handed over by a model parser: flat attribute
//! streams, shapes made of independently indexed face-vertices, and the
//! material list. Nothing here has been validated yet; see
//! [`deindex`](super::deindex) and [`MaterialTable`](super::MaterialTable)
//! for the checked conversions.

use glam::Vec3;

/// Index into [`ParsedScene::materials`].
pub type MaterialId = usize;

/// One polygon corner: a position index and a normal index, each addressing
/// its own attribute stream in units of whole 3-component elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceVertex {
    pub position: usize,
    pub normal: usize,
}

impl FaceVertex {
    #[inline]
    #[must_use]
    pub const fn new(position: usize, normal: usize) -> Self {
        Self { position, normal }
    }
}

/// A named group of triangles. Every three consecutive face-vertices form one
/// triangle; `material_ids` holds one entry per triangle.
#[derive(Debug, Clone, Default)]
pub struct ShapeDesc {
    pub name: String,
    pub face_vertices: Vec<FaceVertex>,
    pub material_ids: Vec<Option<MaterialId>>,
}

impl ShapeDesc {
    /// The material of the first face.
    ///
    /// This is the only material a shape is drawn with. Shapes whose faces
    /// switch materials part way through lose every material but the first.
    #[inline]
    #[must_use]
    pub fn first_material(&self) -> Option<Option<MaterialId>> {
        self.material_ids.first().copied()
    }
}

/// Reflectance description of a material as read from the material library.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MaterialDesc {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub emission: Vec3,
    pub shininess: f32,
}

/// Complete result of parsing a model file.
#[derive(Debug, Clone, Default)]
pub struct ParsedScene {
    /// Flat `x, y, z` position stream.
    pub positions: Vec<f32>,
    /// Flat `x, y, z` normal stream. Normals are used exactly as authored.
    pub normals: Vec<f32>,
    pub shapes: Vec<ShapeDesc>,
    pub materials: Vec<MaterialDesc>,
    /// Non-fatal parser diagnostics.
    pub warnings: Vec<String>,
}

impl ParsedScene {
    /// Number of whole position elements.
    #[inline]
    #[must_use]
    pub fn position_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of whole normal elements.
    #[inline]
    #[must_use]
    pub fn normal_count(&self) -> usize {
        self.normals.len() / 3
    }
}
