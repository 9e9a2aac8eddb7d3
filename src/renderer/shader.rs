//! Shading program
//!
//! The WGSL source is embedded at build time. It is parsed and validated with
//! naga during startup, before any window or device exists, so a broken
//! program is reported with source spans instead of as a device error on the
//! first pipeline creation.

use std::borrow::Cow;

use naga::valid::{Capabilities, ValidationFlags, Validator};

use crate::errors::{CornellError, Result};

/// WGSL source of the forward shading program.
pub const SHADER_SOURCE: &str = include_str!("../shaders/cornell.wgsl");

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Parses and validates `source`.
pub fn validate(source: &str) -> Result<naga::Module> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| CornellError::ShaderCompile {
        stage: "parse",
        diagnostic: e.emit_to_string(source),
    })?;

    Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .map_err(|e| CornellError::ShaderCompile {
            stage: "validate",
            diagnostic: e.emit_to_string(source),
        })?;

    for entry in [VERTEX_ENTRY, FRAGMENT_ENTRY] {
        if !module.entry_points.iter().any(|ep| ep.name == entry) {
            return Err(CornellError::ShaderCompile {
                stage: "link",
                diagnostic: format!("missing entry point `{entry}`"),
            });
        }
    }

    log::debug!("Shader validated: {} entry points", module.entry_points.len());
    Ok(module)
}

pub fn create_module(device: &wgpu::Device) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Cornell Shader"),
        source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(SHADER_SOURCE)),
    })
}
