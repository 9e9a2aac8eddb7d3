//! Final frame capture
//!
//! Reads an RGBA8 render target back to the CPU, drops alpha, and writes the
//! result as an 8-bit RGB PNG with the top row first.

use std::path::Path;

use crate::errors::{CornellError, Result};

/// Format of capture targets. Readback assumes 4 bytes per pixel.
pub const CAPTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

const RGBA_BYTES: usize = 4;
const RGB_BYTES: usize = 3;

/// Which row a pixel buffer starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrigin {
    /// First row is the top of the image (wgpu texture copies).
    TopLeft,
    /// First row is the bottom of the image (GL-style framebuffer reads).
    BottomLeft,
}

/// Tightly packed RGB pixels of one frame, in read order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    width: u32,
    height: u32,
    origin: RowOrigin,
    rgb: Vec<u8>,
}

impl CapturedFrame {
    /// Builds a frame from tightly packed RGBA rows, discarding alpha.
    pub fn from_rgba(width: u32, height: u32, origin: RowOrigin, rgba: &[u8]) -> Result<Self> {
        let pixels = width as usize * height as usize;
        if rgba.len() != pixels * RGBA_BYTES {
            return Err(CornellError::Capture(format!(
                "expected {} RGBA bytes for {width}x{height}, got {}",
                pixels * RGBA_BYTES,
                rgba.len()
            )));
        }

        let rgb = rgba
            .chunks_exact(RGBA_BYTES)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();

        Ok(Self {
            width,
            height,
            origin,
            rgb,
        })
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pixels in read order.
    #[inline]
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.rgb
    }

    /// Pixels with the top row first, `width * height * 3` bytes.
    #[must_use]
    pub fn top_down(&self) -> Vec<u8> {
        match self.origin {
            RowOrigin::TopLeft => self.rgb.clone(),
            RowOrigin::BottomLeft => {
                let row = self.width as usize * RGB_BYTES;
                self.rgb.chunks_exact(row).rev().flatten().copied().collect()
            }
        }
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        image::save_buffer_with_format(
            path,
            &self.top_down(),
            self.width,
            self.height,
            image::ExtendedColorType::Rgb8,
            image::ImageFormat::Png,
        )?;
        log::info!("Saved {}x{} capture to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Creates a single-sample render target that can be copied out.
#[must_use]
pub fn create_capture_target(device: &wgpu::Device, width: u32, height: u32) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Capture Target"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: CAPTURE_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    })
}

/// Row pitch of a texture-to-buffer copy, rounded up to the copy alignment.
#[must_use]
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let tight = width * RGBA_BYTES as u32;
    tight.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT) * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT
}

/// Copies `texture` into a staging buffer and returns tight RGBA rows, top
/// row first. Blocks until the GPU has finished.
pub fn read_texture_rgba(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
) -> Result<Vec<u8>> {
    let (width, height) = (texture.width(), texture.height());
    if width == 0 || height == 0 {
        return Err(CornellError::Capture("capture size must be positive".to_string()));
    }
    if texture.format() != CAPTURE_FORMAT {
        return Err(CornellError::Capture(format!(
            "unsupported capture format {:?}",
            texture.format()
        )));
    }

    let tight_bpr = width as usize * RGBA_BYTES;
    let padded_bpr = padded_bytes_per_row(width);

    let staging = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Capture Staging"),
        size: wgpu::BufferAddress::from(padded_bpr) * wgpu::BufferAddress::from(height),
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Capture Encoder"),
    });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &staging,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_bpr),
                rows_per_image: Some(height),
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    queue.submit(std::iter::once(encoder.finish()));

    let slice = staging.slice(..);
    let (sender, receiver) = flume::bounded(1);
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = sender.send(result);
    });
    device
        .poll(wgpu::PollType::Wait {
            submission_index: None,
            timeout: None,
        })
        .map_err(|e| CornellError::Capture(e.to_string()))?;

    receiver
        .recv()
        .map_err(|_| CornellError::Capture("map_async callback dropped".to_string()))??;

    let data = slice.get_mapped_range();
    let mut tight = Vec::with_capacity(tight_bpr * height as usize);
    for row in data.chunks_exact(padded_bpr as usize) {
        tight.extend_from_slice(&row[..tight_bpr]);
    }
    drop(data);
    staging.unmap();

    Ok(tight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_rows_respect_copy_alignment() {
        assert_eq!(padded_bytes_per_row(800), 3328);
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(1), 256);
    }

    #[test]
    fn rejects_short_buffers() {
        let err = CapturedFrame::from_rgba(2, 2, RowOrigin::TopLeft, &[0; 15]).unwrap_err();
        assert!(matches!(err, CornellError::Capture(_)));
    }
}
