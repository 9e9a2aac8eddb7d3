use glam::Vec3;

use crate::errors::{CornellError, Result};
use crate::scene::source::{MaterialDesc, MaterialId};

/// Fixed-function style reflectance parameters of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Material {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub emissive: Vec3,
    pub shininess: f32,
}

impl From<&MaterialDesc> for Material {
    fn from(desc: &MaterialDesc) -> Self {
        Self {
            ambient: desc.ambient,
            diffuse: desc.diffuse,
            specular: desc.specular,
            emissive: desc.emission,
            shininess: desc.shininess,
        }
    }
}

/// Read-only material lookup, indexed by the ids the parser assigned.
#[derive(Debug, Clone, Default)]
pub struct MaterialTable {
    materials: Vec<Material>,
}

impl MaterialTable {
    #[must_use]
    pub fn new(materials: Vec<Material>) -> Self {
        Self { materials }
    }

    #[must_use]
    pub fn from_descs(descs: &[MaterialDesc]) -> Self {
        Self::new(descs.iter().map(Material::from).collect())
    }

    /// Returns the material for `id`.
    pub fn lookup(&self, id: MaterialId) -> Result<&Material> {
        self.materials.get(id).ok_or(CornellError::InvalidMaterialId {
            id: Some(id),
            len: self.materials.len(),
        })
    }

    /// Resolves an optional face material, treating "no material" as invalid.
    pub fn resolve(&self, id: Option<MaterialId>) -> Result<MaterialId> {
        match id {
            Some(id) => self.lookup(id).map(|_| id),
            None => Err(CornellError::InvalidMaterialId {
                id: None,
                len: self.materials.len(),
            }),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }
}
