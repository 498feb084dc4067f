//! Image textures, off-screen render targets, and depth buffers.

use std::path::Path;

use crate::error::GlearnError;

/// A sampled RGBA8 (sRGB) texture with its view and sampler.
pub struct Texture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
    /// Repeat + Linear sampler.
    pub sampler: wgpu::Sampler,
}

impl Texture {
    /// Upload tightly packed RGBA8 pixels, rows top to bottom.
    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = super::pipeline_helpers::repeat_sampler(
            device,
            &format!("{label} Sampler"),
        );
        Self {
            texture,
            view,
            sampler,
        }
    }

    /// Decode an image file (PNG or JPEG) and upload it.
    ///
    /// The image is flipped vertically so that `v = 0` samples its bottom
    /// row, matching the texture coordinates in the scene geometry.
    ///
    /// # Errors
    ///
    /// Returns [`GlearnError::Texture`] if the file cannot be opened or
    /// decoded.
    pub fn from_path(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &Path,
    ) -> Result<Self, GlearnError> {
        let image = image::open(path).map_err(|e| GlearnError::Texture {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let rgba = image.flipv().into_rgba8();
        let (width, height) = rgba.dimensions();
        log::debug!("loaded texture {} ({width}x{height})", path.display());

        Ok(Self::from_rgba8(
            device,
            queue,
            &path.display().to_string(),
            width,
            height,
            &rgba,
        ))
    }

    /// Load `path`, or substitute a checkerboard (logged as a warning) if it
    /// cannot be read.
    pub fn load_or_fallback(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &Path,
    ) -> Self {
        Self::from_path(device, queue, path).unwrap_or_else(|e| {
            log::warn!("{e}; using checkerboard");
            Self::checkerboard(device, queue, &path.display().to_string())
        })
    }

    /// 64x64 magenta/black checkerboard with 8x8 cells.
    pub fn checkerboard(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
    ) -> Self {
        const SIZE: u32 = 64;
        let pixels = checkerboard_pixels(
            SIZE,
            8,
            [255, 0, 255, 255],
            [0, 0, 0, 255],
        );
        Self::from_rgba8(device, queue, label, SIZE, SIZE, &pixels)
    }
}

/// RGBA8 pixels for a `size` x `size` checkerboard with `cells` cells per
/// side, starting with `a` in the top-left corner.
pub fn checkerboard_pixels(
    size: u32,
    cells: u32,
    a: [u8; 4],
    b: [u8; 4],
) -> Vec<u8> {
    let cell = (size / cells.max(1)).max(1);
    (0..size)
        .flat_map(|y| (0..size).map(move |x| (x, y)))
        .flat_map(|(x, y)| if (x / cell + y / cell) % 2 == 0 { a } else { b })
        .collect()
}

/// A render-target texture and its default view.
///
/// The texture is created with `RENDER_ATTACHMENT | TEXTURE_BINDING`
/// usage flags, making it suitable for off-screen rendering followed by
/// compositing.
pub struct RenderTarget {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
    format: wgpu::TextureFormat,
}

impl RenderTarget {
    /// Create a new render-target texture with the given dimensions and format.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("RenderTarget"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            format,
        }
    }

    /// Recreate at a new size. Contents are lost.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::new(device, width, height, self.format);
    }
}

/// Depth attachment sized to the surface.
pub struct DepthTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl DepthTexture {
    /// Depth format used by every depth-tested pipeline.
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Depth texture of the given size.
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    /// Attachment that clears depth to 1.0 and keeps it for the pass.
    pub fn attachment(&self) -> wgpu::RenderPassDepthStencilAttachment<'_> {
        wgpu::RenderPassDepthStencilAttachment {
            view: &self.view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: [u8; 4] = [255, 255, 255, 255];
    const B: [u8; 4] = [0, 0, 0, 255];

    fn pixel(pixels: &[u8], size: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * size + x) * 4) as usize;
        [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
    }

    #[test]
    fn checkerboard_alternates_cells() {
        let pixels = checkerboard_pixels(8, 2, A, B);
        assert_eq!(pixels.len(), 8 * 8 * 4);
        assert_eq!(pixel(&pixels, 8, 0, 0), A);
        assert_eq!(pixel(&pixels, 8, 3, 3), A);
        assert_eq!(pixel(&pixels, 8, 4, 0), B);
        assert_eq!(pixel(&pixels, 8, 0, 4), B);
        assert_eq!(pixel(&pixels, 8, 7, 7), A);
    }

    #[test]
    fn checkerboard_tolerates_zero_cells() {
        let pixels = checkerboard_pixels(4, 0, A, B);
        assert_eq!(pixels.len(), 4 * 4 * 4);
    }
}
