//! Real-time Cornell box viewer.
//!
//! Loads an OBJ scene, lights it with two orbiting point lights using one of
//! three selectable shading models, and writes the last frame to a PNG when
//! the window closes.
//!
//! - [`scene`]: model data, deindexing, materials, lights and per-frame state
//! - [`renderer`]: wgpu device, pipeline, frame recording and capture
//! - [`app`]: winit event loop and keyboard input

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod app;
pub mod errors;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod utils;

pub use app::App;
pub use errors::{CornellError, Result};
pub use renderer::Renderer;
pub use scene::{Camera, Light, LightAnimator, LightingModel, LightingSelector, Material, MaterialTable, SimulationState};
pub use settings::ViewerSettings;
