//! Viewer Settings
//!
//! Every fixed constant the viewer runs with: surface size, asset paths,
//! capture path and presentation options.
//!
//! ```rust,ignore
//! use cornell::settings::ViewerSettings;
//!
//! let settings = ViewerSettings::default()
//!     .with_model_path("scene/CornellBox-Original.obj")
//!     .with_capture_path("original.png");
//! ```

use std::path::PathBuf;

/// Default surface width in physical pixels.
pub const DEFAULT_WIDTH: u32 = 800;
/// Default surface height in physical pixels.
pub const DEFAULT_HEIGHT: u32 = 600;

/// Configuration for a viewer session.
#[derive(Debug, Clone)]
pub struct ViewerSettings {
    /// Window title.
    pub title: String,
    /// Fixed surface width. The window is not resizable.
    pub width: u32,
    /// Fixed surface height.
    pub height: u32,

    /// OBJ file holding the scene geometry.
    pub model_path: PathBuf,
    /// Directory searched for the OBJ's material library.
    pub material_dir: PathBuf,
    /// Where the final frame is written on exit.
    pub capture_path: PathBuf,

    /// Clear color of every frame.
    pub clear_color: wgpu::Color,
    /// Present with vertical sync. This is the loop's only blocking point.
    pub vsync: bool,
    /// GPU power preference for adapter selection.
    pub power_preference: wgpu::PowerPreference,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            title: "Cornell Box".into(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            model_path: PathBuf::from("scene/CornellBox-Sphere.obj"),
            material_dir: PathBuf::from("scene/"),
            capture_path: PathBuf::from("final_render.png"),
            clear_color: wgpu::Color {
                r: 0.1,
                g: 0.1,
                b: 0.1,
                a: 1.0,
            },
            vsync: true,
            power_preference: wgpu::PowerPreference::HighPerformance,
        }
    }
}

impl ViewerSettings {
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    #[must_use]
    pub fn with_material_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.material_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_capture_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.capture_path = path.into();
        self
    }

    #[must_use]
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Surface aspect ratio used by the projection.
    #[inline]
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}
