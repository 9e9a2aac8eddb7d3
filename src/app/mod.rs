//! Winit-based viewer application
//!
//! - [`App`]: builder that loads the scene and runs the event loop
//! - `AppRunner`: winit `ApplicationHandler` driving the render loop
//!
//! Startup happens in two phases. Everything that does not need a window
//! (model parsing, mesh validation, shader validation) runs in [`App::run`]
//! before the event loop is created, so bad input fails before a window ever
//! appears. The device, surface and mesh buffers are created once the event
//! loop resumes and a window exists.
//!
//! ```rust,ignore
//! use cornell::app::App;
//! use cornell::settings::ViewerSettings;
//!
//! fn main() -> cornell::errors::Result<()> {
//!     App::new(ViewerSettings::default()).run()
//! }
//! ```

pub mod input;
pub mod input_adapter;

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::errors::{CornellError, Result};
use crate::renderer::{Renderer, shader};
use crate::scene::camera::Camera;
use crate::scene::material::MaterialTable;
use crate::scene::mesh::{PreparedMesh, prepare_meshes};
use crate::scene::obj;
use crate::scene::state::SimulationState;
use crate::settings::ViewerSettings;
use crate::utils::FpsCounter;

use self::input::Input;

/// CPU-side scene data, validated and ready for upload.
#[derive(Debug, Clone)]
pub struct SceneAssets {
    pub meshes: Vec<PreparedMesh>,
    pub materials: MaterialTable,
}

impl SceneAssets {
    /// Parses the model and material library and validates every shape.
    pub fn load(settings: &ViewerSettings) -> Result<Self> {
        let parsed = obj::load_obj(&settings.model_path, &settings.material_dir)?;
        let materials = MaterialTable::from_descs(&parsed.materials);
        let meshes = prepare_meshes(&parsed, &materials)?;
        Ok(Self { meshes, materials })
    }
}

/// Application builder.
pub struct App {
    settings: ViewerSettings,
}

impl App {
    #[must_use]
    pub fn new(settings: ViewerSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    /// Loads the scene, runs the render loop until the window closes, then
    /// writes the final frame to [`ViewerSettings::capture_path`].
    pub fn run(self) -> Result<()> {
        let assets = SceneAssets::load(&self.settings)?;
        shader::validate(shader::SHADER_SOURCE)?;

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut runner = AppRunner::new(self.settings, assets);
        event_loop.run_app(&mut runner)?;

        runner.finish()
    }
}

/// Event loop handler. Owns the window, the renderer and the simulation state.
struct AppRunner {
    settings: ViewerSettings,
    assets: Option<SceneAssets>,

    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    state: Option<SimulationState>,

    input: Input,
    fps: FpsCounter,

    /// First fatal error; reported once the loop has exited.
    error: Option<CornellError>,
    captured: bool,
}

impl AppRunner {
    fn new(settings: ViewerSettings, assets: SceneAssets) -> Self {
        Self {
            settings,
            assets: Some(assets),
            window: None,
            renderer: None,
            state: None,
            input: Input::new(),
            fps: FpsCounter::new(),
            error: None,
            captured: false,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: CornellError) {
        log::error!("{error}");
        if self.error.is_none() {
            self.error = Some(error);
        }
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let Some(assets) = self.assets.take() else {
            return Ok(());
        };

        let attributes = Window::default_attributes()
            .with_title(&self.settings.title)
            .with_inner_size(PhysicalSize::new(self.settings.width, self.settings.height))
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(attributes)?);

        let size = window.inner_size();
        let size = (size.width.max(1), size.height.max(1));

        log::info!("Initializing Renderer Backend...");
        let renderer = pollster::block_on(Renderer::new(
            window.clone(),
            &self.settings,
            size,
            &assets.meshes,
            assets.materials,
        ))?;

        let (width, height) = renderer.size();
        let camera = Camera::cornell(width as f32 / height as f32);

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.state = Some(SimulationState::new(camera));
        Ok(())
    }

    /// Per-frame work: acquire, animate, sample input, render.
    ///
    /// Skipped frames leave the simulation untouched.
    fn frame(&mut self) -> Result<()> {
        let (Some(renderer), Some(state)) = (&mut self.renderer, &mut self.state) else {
            return Ok(());
        };
        let Some(output) = renderer.acquire()? else {
            return Ok(());
        };

        self.fps.update();
        state.step(&self.input);
        renderer.present(output, state)
    }

    fn capture(&mut self) -> Result<()> {
        let (Some(renderer), Some(state)) = (&mut self.renderer, &self.state) else {
            return Ok(());
        };

        log::info!(
            "Capturing final frame after {} frames ({})",
            state.animator.frames(),
            state.lighting_model().name()
        );
        let frame = renderer.capture(state)?;
        frame.save_png(&self.settings.capture_path)
    }

    /// Runs the capture if the loop ended normally and reports the outcome.
    fn finish(mut self) -> Result<()> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        if !self.captured {
            self.captured = true;
            self.capture()?;
        }
        Ok(())
    }
}

impl ApplicationHandler for AppRunner {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        input_adapter::process_window_event(&mut self.input, &event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                    if let Some(state) = &mut self.state {
                        let (width, height) = renderer.size();
                        state.resize(width, height);
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.frame() {
                    self.fail(event_loop, e);
                    return;
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.renderer.is_some()
            && let Some(window) = &self.window
        {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // The window and surface are still alive here.
        if self.error.is_none() && !self.captured {
            self.captured = true;
            if let Err(e) = self.capture() {
                log::error!("{e}");
                self.error = Some(e);
            }
        }
    }
}
