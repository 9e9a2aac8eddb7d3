//! Rendering Module
//!
//! - [`context`]: device, queue, surface and depth buffer
//! - [`shader`]: the embedded WGSL program and its startup validation
//! - [`uniforms`]: uniform buffer layouts shared with the shader
//! - [`pipeline`]: bind groups, uniform buffers and pipeline creation
//! - [`frame`]: backend-agnostic frame recording
//! - [`gpu_mesh`]: static mesh buffers on the device
//! - [`capture`]: final frame readback and PNG output
//!
//! [`Renderer`] ties these together. Each frame is first recorded into a
//! [`GpuFrame`] through [`FrameRenderer::record`], then uploaded and encoded
//! as one render pass.

pub mod capture;
pub mod context;
pub mod frame;
pub mod gpu_mesh;
pub mod pipeline;
pub mod shader;
pub mod uniforms;

use glam::{Mat4, Vec3};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::errors::Result;
use crate::scene::light::Light;
use crate::scene::lighting::LightingModel;
use crate::scene::material::{Material, MaterialTable};
use crate::scene::mesh::{Mesh, MeshRegistry, PreparedMesh};
use crate::scene::state::SimulationState;
use crate::settings::ViewerSettings;

use self::capture::{CapturedFrame, RowOrigin, CAPTURE_FORMAT};
use self::context::WgpuContext;
use self::frame::{FrameRenderer, ShadingSink};
use self::gpu_mesh::{GpuMeshBuffers, WgpuMeshAllocator};
use self::pipeline::ShadingResources;
use self::uniforms::{GlobalUniforms, MaterialUniforms};

/// One recorded draw: registry index and material slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DrawCall {
    mesh: usize,
    material_slot: usize,
}

/// Frame commands collected on the CPU, ready for upload.
///
/// Materials are appended per draw, so each draw reads the material that was
/// current when it was issued.
#[derive(Debug, Default)]
pub struct GpuFrame {
    clear_color: wgpu::Color,
    program_bound: bool,
    globals: GlobalUniforms,
    materials: Vec<MaterialUniforms>,
    draws: Vec<DrawCall>,
}

impl GpuFrame {
    fn reset(&mut self) {
        self.program_bound = false;
        self.materials.clear();
        self.draws.clear();
    }
}

impl<B> ShadingSink<B> for GpuFrame {
    fn clear(&mut self, color: wgpu::Color) {
        self.clear_color = color;
    }

    fn bind_program(&mut self) {
        self.program_bound = true;
    }

    fn set_transforms(&mut self, model: Mat4, view: Mat4, projection: Mat4) {
        self.globals.set_transforms(model, view, projection);
    }

    fn set_shading(&mut self, view_pos: Vec3, lighting_model: LightingModel, num_lights: usize) {
        self.globals.set_shading(view_pos, lighting_model, num_lights);
    }

    fn set_light(&mut self, slot: usize, light: &Light) {
        self.globals.set_light(slot, light);
    }

    fn set_material(&mut self, material: &Material) {
        self.materials.push(MaterialUniforms::from(material));
    }

    fn draw(&mut self, index: usize, _mesh: &Mesh<B>) {
        debug_assert!(
            !self.materials.is_empty(),
            "draw {index} issued before any material was set"
        );
        self.draws.push(DrawCall {
            mesh: index,
            material_slot: self.materials.len().saturating_sub(1),
        });
    }
}

/// Owns every GPU resource of the viewer.
pub struct Renderer {
    context: WgpuContext,
    resources: ShadingResources,
    surface_pipeline: wgpu::RenderPipeline,
    registry: MeshRegistry<GpuMeshBuffers>,
    materials: MaterialTable,
    frame_renderer: FrameRenderer,
    frame: GpuFrame,
}

impl Renderer {
    /// Creates the device, uploads every mesh and builds the pipeline.
    pub async fn new<W>(
        window: W,
        settings: &ViewerSettings,
        size: (u32, u32),
        prepared: &[PreparedMesh],
        materials: MaterialTable,
    ) -> Result<Self>
    where
        W: HasWindowHandle + HasDisplayHandle + Send + Sync + 'static,
    {
        let context = WgpuContext::new(window, settings, size.0, size.1).await?;

        let registry = MeshRegistry::build(prepared, &mut WgpuMeshAllocator::new(&context.device));
        log::info!("Mesh registry: {} meshes", registry.len());

        let resources = ShadingResources::new(&context.device, registry.len());
        let surface_pipeline = resources.create_pipeline(&context.device, context.color_format());

        Ok(Self {
            context,
            resources,
            surface_pipeline,
            registry,
            materials,
            frame_renderer: FrameRenderer::new(settings.clear_color),
            frame: GpuFrame::default(),
        })
    }

    #[must_use]
    pub fn registry(&self) -> &MeshRegistry<GpuMeshBuffers> {
        &self.registry
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.context.size()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
    }

    /// Acquires the next surface texture.
    ///
    /// Returns `None` when the frame has to be skipped; a lost or outdated
    /// surface is reconfigured first.
    pub fn acquire(&mut self) -> Result<Option<wgpu::SurfaceTexture>> {
        match self.context.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(output)
            | wgpu::CurrentSurfaceTexture::Suboptimal(output) => Ok(Some(output)),
            wgpu::CurrentSurfaceTexture::Lost | wgpu::CurrentSurfaceTexture::Outdated => {
                let (width, height) = self.context.size();
                self.context.resize(width, height);
                Ok(None)
            }
            e @ (wgpu::CurrentSurfaceTexture::Timeout
            | wgpu::CurrentSurfaceTexture::Occluded
            | wgpu::CurrentSurfaceTexture::Validation) => {
                log::warn!("Skipping frame: {e:?}");
                Ok(None)
            }
        }
    }

    /// Renders `state` into an acquired surface texture and presents it.
    pub fn present(&mut self, output: wgpu::SurfaceTexture, state: &SimulationState) -> Result<()> {
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        self.record(state)?;
        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });
        self.encode(&mut encoder, &view, &self.context.depth_texture_view, &self.surface_pipeline);
        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Renders `state` into an offscreen target of the surface size and reads
    /// it back.
    pub fn capture(&mut self, state: &SimulationState) -> Result<CapturedFrame> {
        self.record(state)?;

        let (width, height) = self.context.size();
        let device = &self.context.device;

        let target = capture::create_capture_target(device, width, height);
        let view = target.create_view(&wgpu::TextureViewDescriptor::default());
        let depth_view = WgpuContext::create_depth_texture(device, width, height);
        let pipeline = self.resources.create_pipeline(device, CAPTURE_FORMAT);

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Capture Frame Encoder"),
        });
        self.encode(&mut encoder, &view, &depth_view, &pipeline);
        self.context.queue.submit(std::iter::once(encoder.finish()));

        let rgba = capture::read_texture_rgba(device, &self.context.queue, &target)?;
        CapturedFrame::from_rgba(width, height, RowOrigin::TopLeft, &rgba)
    }

    /// Records the frame and uploads its uniforms.
    fn record(&mut self, state: &SimulationState) -> Result<()> {
        self.frame.reset();
        self.frame_renderer
            .record(&mut self.frame, state, &self.registry, &self.materials)?;

        let queue = &self.context.queue;
        queue.write_buffer(&self.resources.global_buffer, 0, bytemuck::bytes_of(&self.frame.globals));

        self.resources
            .reserve_materials(&self.context.device, self.frame.materials.len());
        let packed = self.resources.pack_materials(&self.frame.materials);
        if !packed.is_empty() {
            queue.write_buffer(&self.resources.material_buffer, 0, &packed);
        }

        Ok(())
    }

    fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        pipeline: &wgpu::RenderPipeline,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Cornell Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.frame.clear_color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if !self.frame.program_bound {
            return;
        }

        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, &self.resources.global_bind_group, &[]);

        for draw in &self.frame.draws {
            let Some(mesh) = self.registry.get(draw.mesh) else {
                continue;
            };
            let offset = draw.material_slot as wgpu::BufferAddress * self.resources.material_stride;
            pass.set_bind_group(1, &self.resources.material_bind_group, &[offset as wgpu::DynamicOffset]);
            pass.set_vertex_buffer(0, mesh.buffers.vertex_buffer.slice(..));
            pass.set_index_buffer(mesh.buffers.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }
}
