//! Error Types
//!
//! This module defines the error type shared by every stage of the viewer.
//!
//! # Overview
//!
//! [`CornellError`] covers all failure modes, grouped by where they occur:
//! - GPU, surface and window initialization
//! - Shader validation
//! - Model parsing and mesh construction
//! - Final frame capture and image encoding
//!
//! Everything except the capture variants can only be produced during startup.
//! Once the render loop is running, per-frame work only touches resources that
//! were validated and created successfully beforehand.
//!
//! ```rust,ignore
//! use std::path::Path;
//! use cornell::errors::Result;
//!
//! fn startup() -> Result<()> {
//!     let scene = cornell::scene::obj::load_obj(
//!         Path::new("scene/CornellBox-Sphere.obj"),
//!         Path::new("scene/"),
//!     )?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Which attribute stream a face-vertex index referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Position,
    Normal,
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Position => f.write_str("position"),
            Self::Normal => f.write_str("normal"),
        }
    }
}

/// The main error type for the viewer.
#[derive(Error, Debug)]
pub enum CornellError {
    // ========================================================================
    // GPU, Surface & Window Errors
    // ========================================================================
    /// Surface, adapter or context creation failed.
    #[error("Resource initialization failed: {0}")]
    ResourceInit(String),

    /// Failed to create the GPU device.
    #[error("Failed to create WGPU device: {0}")]
    DeviceCreateFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create the presentation surface.
    #[error("Failed to create surface: {0}")]
    SurfaceCreateFailed(#[from] wgpu::CreateSurfaceError),

    /// Window handle error.
    #[error("Window system error: {0}")]
    WindowError(#[from] raw_window_handle::HandleError),

    /// Window creation error (winit).
    #[error("Window creation error: {0}")]
    WindowCreateFailed(#[from] winit::error::OsError),

    /// Event loop error (winit).
    #[error("Event loop error: {0}")]
    EventLoopError(#[from] winit::error::EventLoopError),

    // ========================================================================
    // Shader Errors
    // ========================================================================
    /// The shading program failed to parse or validate.
    #[error("Shader compile error ({stage}):\n{diagnostic}")]
    ShaderCompile {
        /// Which stage of compilation rejected the source
        stage: &'static str,
        /// Human-readable diagnostic, including source spans
        diagnostic: String,
    },

    // ========================================================================
    // Model & Geometry Errors
    // ========================================================================
    /// The model file could not be parsed at all.
    #[error("Model parse error: {0}")]
    ModelParse(String),

    /// A face-vertex referenced an attribute element that does not exist.
    #[error(
        "Index out of range in shape {shape}, face-vertex {face_vertex}: {attribute} index {index} (len: {len})"
    )]
    IndexOutOfRange {
        /// Shape position in the source shape list
        shape: usize,
        /// Face-vertex position within the shape
        face_vertex: usize,
        /// Attribute stream that was indexed
        attribute: AttributeKind,
        /// The offending element index
        index: usize,
        /// Number of elements in the attribute stream
        len: usize,
    },

    /// A material id does not address an entry of the material table.
    #[error("Invalid material id: {id:?} (material count: {len})")]
    InvalidMaterialId {
        /// The offending id, `None` when the face carried no material at all
        id: Option<usize>,
        /// Number of materials in the table
        len: usize,
    },

    /// A shape has no faces, so it has no first-face material.
    #[error("Shape {shape} has no faces")]
    EmptyShape {
        /// Shape position in the source shape list
        shape: usize,
    },

    // ========================================================================
    // Capture Errors
    // ========================================================================
    /// Reading the final frame back from the GPU failed.
    #[error("Capture error: {0}")]
    Capture(String),

    /// PNG encoding error.
    #[error("Image encode error: {0}")]
    ImageEncode(#[from] image::ImageError),

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<wgpu::BufferAsyncError> for CornellError {
    fn from(err: wgpu::BufferAsyncError) -> Self {
        CornellError::Capture(err.to_string())
    }
}

/// Alias for `Result<T, CornellError>`.
pub type Result<T> = std::result::Result<T, CornellError>;
