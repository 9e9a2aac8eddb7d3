//! GPU uniform layouts.
//!
//! Field order and padding mirror the `Globals` and `Material` structs in
//! `cornell.wgsl` under WGSL uniform address-space layout rules.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::scene::light::{Light, NUM_LIGHTS};
use crate::scene::lighting::LightingModel;
use crate::scene::material::Material;

/// Per-frame uniforms, bound at group 0.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GlobalUniforms {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub view_pos: [f32; 3],
    pub lighting_model: i32,
    pub num_lights: i32,
    pub _pad: [i32; 3],
    pub light_pos: [[f32; 4]; NUM_LIGHTS],
    pub light_color: [[f32; 4]; NUM_LIGHTS],
}

impl Default for GlobalUniforms {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            projection: Mat4::IDENTITY.to_cols_array_2d(),
            view_pos: [0.0; 3],
            lighting_model: LightingModel::default().as_i32(),
            num_lights: 0,
            _pad: [0; 3],
            light_pos: [[0.0; 4]; NUM_LIGHTS],
            light_color: [[0.0; 4]; NUM_LIGHTS],
        }
    }
}

impl GlobalUniforms {
    pub fn set_transforms(&mut self, model: Mat4, view: Mat4, projection: Mat4) {
        self.model = model.to_cols_array_2d();
        self.view = view.to_cols_array_2d();
        self.projection = projection.to_cols_array_2d();
    }

    pub fn set_shading(&mut self, view_pos: Vec3, lighting_model: LightingModel, num_lights: usize) {
        self.view_pos = view_pos.to_array();
        self.lighting_model = lighting_model.as_i32();
        self.num_lights = num_lights as i32;
    }

    /// Writes one light slot. Slots past [`NUM_LIGHTS`] are ignored.
    pub fn set_light(&mut self, slot: usize, light: &Light) {
        if slot < NUM_LIGHTS {
            self.light_pos[slot] = light.position.extend(1.0).to_array();
            self.light_color[slot] = light.color.extend(1.0).to_array();
        }
    }
}

/// Per-draw material uniforms, bound at group 1 with a dynamic offset.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Default)]
pub struct MaterialUniforms {
    pub ka: [f32; 3],
    pub ns: f32,
    pub kd: [f32; 3],
    pub _pad0: f32,
    pub ks: [f32; 3],
    pub _pad1: f32,
    pub ke: [f32; 3],
    pub _pad2: f32,
}

impl From<&Material> for MaterialUniforms {
    fn from(material: &Material) -> Self {
        Self {
            ka: material.ambient.to_array(),
            ns: material.shininess,
            kd: material.diffuse.to_array(),
            ks: material.specular.to_array(),
            ke: material.emissive.to_array(),
            ..Default::default()
        }
    }
}

/// Size of one material slot in the dynamic uniform buffer, rounded up to the
/// device's dynamic offset alignment.
#[must_use]
pub fn material_stride(min_uniform_buffer_offset_alignment: u32) -> wgpu::BufferAddress {
    let size = std::mem::size_of::<MaterialUniforms>() as wgpu::BufferAddress;
    let align = wgpu::BufferAddress::from(min_uniform_buffer_offset_alignment.max(1));
    size.div_ceil(align) * align
}
