//! Per-frame command recording.
//!
//! [`FrameRenderer::record`] walks one frame in a fixed order and emits every
//! state change and draw into a [`ShadingSink`]. The GPU backend turns those
//! calls into uniform writes and a render pass; tests record them instead.

use glam::{Mat4, Vec3};

use crate::errors::Result;
use crate::scene::camera::SHADING_VIEW_POS;
use crate::scene::light::Light;
use crate::scene::lighting::LightingModel;
use crate::scene::material::{Material, MaterialTable};
use crate::scene::mesh::{Mesh, MeshRegistry};
use crate::scene::state::SimulationState;

/// Receives the commands of one frame, in submission order.
///
/// Every upload must be visible to all draws issued after it in the same
/// frame.
pub trait ShadingSink<B> {
    fn clear(&mut self, color: wgpu::Color);

    fn bind_program(&mut self);

    fn set_transforms(&mut self, model: Mat4, view: Mat4, projection: Mat4);

    fn set_shading(&mut self, view_pos: Vec3, lighting_model: LightingModel, num_lights: usize);

    fn set_light(&mut self, slot: usize, light: &Light);

    fn set_material(&mut self, material: &Material);

    /// Indexed triangle draw of `mesh`, the `index`-th registry entry.
    fn draw(&mut self, index: usize, mesh: &Mesh<B>);
}

/// Records frames against a fixed registry and material table.
#[derive(Debug, Clone, Copy)]
pub struct FrameRenderer {
    pub clear_color: wgpu::Color,
}

impl FrameRenderer {
    #[must_use]
    pub fn new(clear_color: wgpu::Color) -> Self {
        Self { clear_color }
    }

    pub fn record<B, S>(
        &self,
        sink: &mut S,
        state: &SimulationState,
        registry: &MeshRegistry<B>,
        materials: &MaterialTable,
    ) -> Result<()>
    where
        S: ShadingSink<B>,
    {
        sink.clear(self.clear_color);
        sink.bind_program();

        let camera = &state.camera;
        sink.set_transforms(Mat4::IDENTITY, camera.view_matrix(), camera.projection_matrix());

        let lights = state.lights();
        sink.set_shading(SHADING_VIEW_POS, state.lighting_model(), lights.len());
        for (slot, light) in lights.iter().enumerate() {
            sink.set_light(slot, light);
        }

        for (index, mesh) in registry.iter().enumerate() {
            let material = materials.lookup(mesh.material_id)?;
            sink.set_material(material);
            sink.draw(index, mesh);
        }

        Ok(())
    }
}
