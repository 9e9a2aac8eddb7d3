//! Mesh registry.
//!
//! Meshes are built in two steps. [`prepare_meshes`] runs on the CPU before any
//! window exists: it deindexes every shape and resolves its material, turning
//! every bad index into an error. [`MeshRegistry::build`] then hands the
//! prepared buffers to a [`MeshAllocator`], which owns the backend storage.
//! After that the registry is immutable for the rest of the session.

use crate::errors::{CornellError, Result};
use crate::scene::deindex::{DeindexedMesh, deindex};
use crate::scene::material::MaterialTable;
use crate::scene::source::{MaterialId, ParsedScene};

/// A shape that passed validation and is ready for upload.
#[derive(Debug, Clone)]
pub struct PreparedMesh {
    pub name: String,
    pub geometry: DeindexedMesh,
    pub material_id: MaterialId,
}

/// Deindexes every shape of `scene` and assigns each its first-face material.
pub fn prepare_meshes(scene: &ParsedScene, materials: &MaterialTable) -> Result<Vec<PreparedMesh>> {
    scene
        .shapes
        .iter()
        .enumerate()
        .map(|(index, shape)| {
            let first = shape
                .first_material()
                .ok_or(CornellError::EmptyShape { shape: index })?;

            if shape.material_ids.iter().any(|&id| id != first) {
                log::warn!(
                    "Shape '{}' uses more than one material; only the first face's material is applied",
                    shape.name
                );
            }

            let material_id = materials.resolve(first)?;
            let geometry = deindex(&scene.positions, &scene.normals, shape, index)?;

            Ok(PreparedMesh {
                name: shape.name.clone(),
                geometry,
                material_id,
            })
        })
        .collect()
}

/// Creates backend storage for a mesh's vertex and index data.
///
/// Storage is written once at creation and never resized or rewritten.
pub trait MeshAllocator {
    type Buffers;

    fn allocate(&mut self, label: &str, geometry: &DeindexedMesh) -> Self::Buffers;
}

/// A drawable mesh. `B` is the backend storage produced by a [`MeshAllocator`].
#[derive(Debug)]
pub struct Mesh<B> {
    pub name: String,
    pub buffers: B,
    pub index_count: u32,
    pub material_id: MaterialId,
}

/// All meshes of the scene, in source shape order.
#[derive(Debug)]
pub struct MeshRegistry<B> {
    meshes: Vec<Mesh<B>>,
}

impl<B> MeshRegistry<B> {
    /// Uploads every prepared mesh through `allocator`.
    pub fn build<A>(prepared: &[PreparedMesh], allocator: &mut A) -> Self
    where
        A: MeshAllocator<Buffers = B>,
    {
        let meshes = prepared
            .iter()
            .map(|mesh| Mesh {
                name: mesh.name.clone(),
                buffers: allocator.allocate(&mesh.name, &mesh.geometry),
                index_count: mesh.geometry.index_count(),
                material_id: mesh.material_id,
            })
            .collect();

        Self { meshes }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mesh<B>> {
        self.meshes.iter()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Mesh<B>> {
        self.meshes.get(index)
    }
}
