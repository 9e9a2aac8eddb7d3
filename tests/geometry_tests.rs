//! Geometry Tests
//!
//! Tests for:
//! - Face-vertex deindexing (vertex count, sequential indices, attribute fetch)
//! - Out-of-range attribute indices
//! - Mesh preparation (first-face material, empty shapes, invalid materials)
//! - Mesh registry construction through a custom allocator

use glam::Vec3;

use cornell::errors::{AttributeKind, CornellError};
use cornell::scene::deindex::{DeindexedMesh, deindex};
use cornell::scene::material::{Material, MaterialTable};
use cornell::scene::mesh::{MeshAllocator, MeshRegistry, prepare_meshes};
use cornell::scene::source::{FaceVertex, MaterialDesc, ParsedScene, ShapeDesc};

fn quad_positions() -> Vec<f32> {
    vec![
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        1.0, 1.0, 0.0, //
        0.0, 1.0, 0.0,
    ]
}

fn two_normals() -> Vec<f32> {
    vec![
        0.0, 0.0, 1.0, //
        0.0, 1.0, 0.0,
    ]
}

fn quad_shape(material: Option<usize>) -> ShapeDesc {
    ShapeDesc {
        name: "quad".into(),
        face_vertices: vec![
            FaceVertex::new(0, 0),
            FaceVertex::new(1, 0),
            FaceVertex::new(2, 1),
            FaceVertex::new(0, 0),
            FaceVertex::new(2, 1),
            FaceVertex::new(3, 0),
        ],
        material_ids: vec![material; 2],
    }
}

fn single_triangle(name: &str, material: Option<usize>) -> ShapeDesc {
    ShapeDesc {
        name: name.into(),
        face_vertices: vec![FaceVertex::new(0, 0), FaceVertex::new(1, 0), FaceVertex::new(2, 0)],
        material_ids: vec![material],
    }
}

fn scene_with(shapes: Vec<ShapeDesc>, material_count: usize) -> ParsedScene {
    ParsedScene {
        positions: quad_positions(),
        normals: two_normals(),
        shapes,
        materials: vec![MaterialDesc::default(); material_count],
        warnings: Vec::new(),
    }
}

// ============================================================================
// Deindexing
// ============================================================================

#[test]
fn deindex_emits_one_vertex_per_face_vertex() {
    let shape = quad_shape(Some(0));
    let mesh = deindex(&quad_positions(), &two_normals(), &shape, 0).unwrap();

    // Shared corners are not merged.
    assert_eq!(mesh.vertices.len(), 6);
    assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(mesh.index_count(), 6);
}

#[test]
fn deindex_combines_independent_indices() {
    let shape = quad_shape(Some(0));
    let positions = quad_positions();
    let normals = two_normals();
    let mesh = deindex(&positions, &normals, &shape, 0).unwrap();

    for (vertex, fv) in mesh.vertices.iter().zip(&shape.face_vertices) {
        let p = fv.position * 3;
        let n = fv.normal * 3;
        assert_eq!(vertex.position, [positions[p], positions[p + 1], positions[p + 2]]);
        assert_eq!(vertex.normal, [normals[n], normals[n + 1], normals[n + 2]]);
    }

    // Same position, different normals: two distinct vertices.
    assert_eq!(mesh.vertices[2].position(), Vec3::new(1.0, 1.0, 0.0));
    assert_eq!(mesh.vertices[2].normal(), Vec3::Y);
    assert_eq!(mesh.vertices[1].normal(), Vec3::Z);
}

#[test]
fn deindex_empty_shape_yields_empty_buffers() {
    let shape = ShapeDesc::default();
    let mesh = deindex(&quad_positions(), &two_normals(), &shape, 0).unwrap();
    assert_eq!(mesh, DeindexedMesh::default());
    assert!(mesh.is_empty());
}

#[test]
fn deindex_rejects_out_of_range_position() {
    let mut shape = quad_shape(Some(0));
    shape.face_vertices[4] = FaceVertex::new(4, 0);

    let err = deindex(&quad_positions(), &two_normals(), &shape, 7).unwrap_err();
    match err {
        CornellError::IndexOutOfRange {
            shape,
            face_vertex,
            attribute,
            index,
            len,
        } => {
            assert_eq!(shape, 7);
            assert_eq!(face_vertex, 4);
            assert_eq!(attribute, AttributeKind::Position);
            assert_eq!(index, 4);
            assert_eq!(len, 4);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn deindex_rejects_out_of_range_normal() {
    let mut shape = quad_shape(Some(0));
    shape.face_vertices[0] = FaceVertex::new(0, 2);

    let err = deindex(&quad_positions(), &two_normals(), &shape, 0).unwrap_err();
    assert!(matches!(
        err,
        CornellError::IndexOutOfRange {
            attribute: AttributeKind::Normal,
            index: 2,
            len: 2,
            ..
        }
    ));
}

// ============================================================================
// Mesh preparation
// ============================================================================

#[test]
fn prepare_uses_first_face_material() {
    let mut shape = quad_shape(Some(1));
    shape.material_ids[1] = Some(0);

    let scene = scene_with(vec![shape], 2);
    let table = MaterialTable::from_descs(&scene.materials);
    let prepared = prepare_meshes(&scene, &table).unwrap();

    assert_eq!(prepared.len(), 1);
    assert_eq!(prepared[0].material_id, 1);
    assert_eq!(prepared[0].geometry.vertices.len(), 6);
}

#[test]
fn prepare_rejects_out_of_range_material() {
    let scene = scene_with(vec![single_triangle("a", Some(0)), single_triangle("b", Some(3))], 2);
    let table = MaterialTable::from_descs(&scene.materials);

    let err = prepare_meshes(&scene, &table).unwrap_err();
    assert!(matches!(err, CornellError::InvalidMaterialId { id: Some(3), len: 2 }));
}

#[test]
fn prepare_rejects_missing_material() {
    let scene = scene_with(vec![single_triangle("a", None)], 1);
    let table = MaterialTable::from_descs(&scene.materials);

    let err = prepare_meshes(&scene, &table).unwrap_err();
    assert!(matches!(err, CornellError::InvalidMaterialId { id: None, .. }));
}

#[test]
fn prepare_rejects_shape_without_faces() {
    let empty = ShapeDesc {
        name: "empty".into(),
        ..Default::default()
    };
    let scene = scene_with(vec![single_triangle("a", Some(0)), empty], 1);
    let table = MaterialTable::from_descs(&scene.materials);

    let err = prepare_meshes(&scene, &table).unwrap_err();
    assert!(matches!(err, CornellError::EmptyShape { shape: 1 }));
}

// ============================================================================
// Material table
// ============================================================================

#[test]
fn material_lookup_is_bounds_checked() {
    let table = MaterialTable::new(vec![
        Material {
            diffuse: Vec3::new(0.8, 0.0, 0.0),
            ..Default::default()
        },
        Material {
            diffuse: Vec3::new(0.0, 0.8, 0.0),
            ..Default::default()
        },
    ]);

    assert_eq!(table.lookup(1).unwrap().diffuse, Vec3::new(0.0, 0.8, 0.0));
    assert!(matches!(
        table.lookup(2),
        Err(CornellError::InvalidMaterialId { id: Some(2), len: 2 })
    ));
    assert_eq!(table.resolve(Some(0)).unwrap(), 0);
}

#[test]
fn material_desc_maps_emission_to_emissive() {
    let desc = MaterialDesc {
        emission: Vec3::new(17.0, 12.0, 4.0),
        shininess: 10.0,
        ..Default::default()
    };
    let table = MaterialTable::from_descs(&[desc]);
    let material = table.lookup(0).unwrap();
    assert_eq!(material.emissive, Vec3::new(17.0, 12.0, 4.0));
    assert_eq!(material.shininess, 10.0);
}

// ============================================================================
// Mesh registry
// ============================================================================

/// Records uploads instead of creating GPU buffers.
#[derive(Default)]
struct CountingAllocator {
    uploads: Vec<(String, usize, usize)>,
}

impl MeshAllocator for CountingAllocator {
    type Buffers = usize;

    fn allocate(&mut self, label: &str, geometry: &DeindexedMesh) -> usize {
        self.uploads
            .push((label.to_string(), geometry.vertices.len(), geometry.indices.len()));
        self.uploads.len() - 1
    }
}

#[test]
fn registry_uploads_each_mesh_once_in_order() {
    let scene = scene_with(vec![quad_shape(Some(0)), single_triangle("tri", Some(1))], 2);
    let table = MaterialTable::from_descs(&scene.materials);
    let prepared = prepare_meshes(&scene, &table).unwrap();

    let mut allocator = CountingAllocator::default();
    let registry = MeshRegistry::build(&prepared, &mut allocator);

    assert_eq!(registry.len(), 2);
    assert_eq!(
        allocator.uploads,
        vec![("quad".to_string(), 6, 6), ("tri".to_string(), 3, 3)]
    );

    let meshes: Vec<_> = registry.iter().collect();
    assert_eq!(meshes[0].buffers, 0);
    assert_eq!(meshes[0].index_count, 6);
    assert_eq!(meshes[1].buffers, 1);
    assert_eq!(meshes[1].index_count, 3);
    assert_eq!(meshes[1].material_id, 1);
}
