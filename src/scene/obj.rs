//! Wavefront OBJ/MTL loading.
//!
//! Converts the parser's per-model output into a [`ParsedScene`]: one shared
//! position stream, one shared normal stream, and shapes whose face-vertices
//! index into those streams.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use glam::Vec3;

use crate::errors::{CornellError, Result};
use crate::scene::source::{FaceVertex, MaterialDesc, ParsedScene, ShapeDesc};

/// Loads `path`, resolving material libraries relative to `material_dir`.
///
/// A missing or unreadable material library is reported as a warning and
/// leaves the material list empty; the mesh preparation step then rejects
/// any shape that references a material.
pub fn load_obj(path: &Path, material_dir: &Path) -> Result<ParsedScene> {
    let file = File::open(path)
        .map_err(|e| CornellError::ModelParse(format!("{}: {e}", path.display())))?;
    let mut reader = BufReader::new(file);

    let options = tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ..Default::default()
    };

    let (models, materials) = tobj::load_obj_buf(&mut reader, &options, |mtl_path| {
        tobj::load_mtl(material_dir.join(mtl_path))
    })
    .map_err(|e| CornellError::ModelParse(format!("{}: {e}", path.display())))?;

    let mut scene = ParsedScene::default();

    match materials {
        Ok(materials) => {
            scene.materials = materials.iter().map(convert_material).collect();
        }
        Err(e) => scene.warnings.push(format!("material library: {e}")),
    }

    // The parser splits an object at every `usemtl`; the pieces are one shape
    // whose faces carry different material ids.
    let mut previous: Option<&str> = None;
    for model in &models {
        let continues_shape = previous == Some(model.name.as_str());
        append_model(&mut scene, model, continues_shape)?;
        previous = Some(&model.name);
    }

    for warning in &scene.warnings {
        log::warn!("{}: {warning}", path.display());
    }
    log::info!(
        "Loaded {}: {} shapes, {} materials, {} positions, {} normals",
        path.display(),
        scene.shapes.len(),
        scene.materials.len(),
        scene.position_count(),
        scene.normal_count()
    );

    Ok(scene)
}

fn append_model(scene: &mut ParsedScene, model: &tobj::Model, continues_shape: bool) -> Result<()> {
    let mesh = &model.mesh;

    if mesh.normal_indices.len() != mesh.indices.len() {
        return Err(CornellError::ModelParse(format!(
            "shape '{}' has {} position indices but {} normal indices",
            model.name,
            mesh.indices.len(),
            mesh.normal_indices.len()
        )));
    }

    let position_base = scene.position_count();
    let normal_base = scene.normal_count();

    if mesh.positions.len() % 3 != 0 || mesh.normals.len() % 3 != 0 {
        scene.warnings.push(format!(
            "shape '{}' has a trailing partial attribute element",
            model.name
        ));
    }
    scene.positions.extend_from_slice(&mesh.positions);
    scene.normals.extend_from_slice(&mesh.normals);

    let face_vertices = mesh
        .indices
        .iter()
        .zip(&mesh.normal_indices)
        .map(|(&p, &n)| FaceVertex::new(position_base + p as usize, normal_base + n as usize))
        .collect::<Vec<_>>();

    // Triangulated: one material entry per three face-vertices.
    let face_count = face_vertices.len() / 3;
    let material_ids = std::iter::repeat_n(mesh.material_id, face_count);

    match scene.shapes.last_mut() {
        Some(shape) if continues_shape => {
            shape.face_vertices.extend(face_vertices);
            shape.material_ids.extend(material_ids);
        }
        _ => scene.shapes.push(ShapeDesc {
            name: model.name.clone(),
            face_vertices,
            material_ids: material_ids.collect(),
        }),
    }

    Ok(())
}

fn convert_material(material: &tobj::Material) -> MaterialDesc {
    let rgb = |value: Option<[f32; 3]>| value.map_or(Vec3::ZERO, Vec3::from_array);

    MaterialDesc {
        ambient: rgb(material.ambient),
        diffuse: rgb(material.diffuse),
        specular: rgb(material.specular),
        emission: rgb(material.emissive),
        shininess: material.shininess.unwrap_or(1.0),
    }
}
