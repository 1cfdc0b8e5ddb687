use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::Resolution;
use crate::foundation::error::{LensError, LensResult};

/// A composited frame as RGBA8 pixels, tightly packed and row-major.
///
/// Channels are quantized from the kernel's float output with clamping. Alpha follows the
/// content field's convention (straight for PNG-loaded backgrounds).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LensFrame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes.
    pub data: Vec<u8>,
}

impl LensFrame {
    /// Zeroed frame for `resolution`.
    pub fn new(resolution: Resolution) -> LensResult<Self> {
        let len = frame_len(resolution)?;
        Ok(Self {
            width: resolution.width,
            height: resolution.height,
            data: vec![0u8; len],
        })
    }

    pub fn resolution(&self) -> Resolution {
        Resolution {
            width: self.width,
            height: self.height,
        }
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * 4
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.stride() + x as usize * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn to_image(&self) -> LensResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| LensError::render("frame buffer does not match its dimensions"))
    }

    /// Write the frame as a PNG, creating parent directories as needed.
    pub fn save_png(&self, path: impl AsRef<Path>) -> LensResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

pub(crate) fn frame_len(resolution: Resolution) -> LensResult<usize> {
    if resolution.width == 0 || resolution.height == 0 {
        return Err(LensError::validation("frame width/height must be > 0"));
    }
    (resolution.width as usize)
        .checked_mul(resolution.height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| LensError::render("frame buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
