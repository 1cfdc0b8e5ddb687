use std::path::Path;

use crate::content::sampler::ContentSampler;
use crate::foundation::core::{Point, Rgba};
use crate::foundation::error::{LensError, LensResult};

/// What a raster field returns for coordinates outside its pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMode {
    /// Repeat the nearest edge pixel.
    #[default]
    Clamp,
    /// Fully transparent black.
    Transparent,
}

/// How a raster field reconstructs values between pixel centers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleFilter {
    /// The pixel containing the coordinate.
    Nearest,
    /// Bilinear blend of the four surrounding pixel centers.
    #[default]
    Bilinear,
}

/// A background snapshot held as a float RGBA raster.
#[derive(Clone, Debug)]
pub struct ImageField {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    edge: EdgeMode,
    filter: SampleFilter,
}

impl ImageField {
    /// Build from tightly packed row-major RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, data: &[u8]) -> LensResult<Self> {
        let expected_len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| LensError::sampling("content buffer size overflow"))?;
        if width == 0 || height == 0 {
            return Err(LensError::validation("content field must be non-empty"));
        }
        if data.len() != expected_len {
            return Err(LensError::sampling(
                "content field expects data matching width*height*4",
            ));
        }
        let pixels = data
            .chunks_exact(4)
            .map(|px| Rgba::from_rgba8([px[0], px[1], px[2], px[3]]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
            edge: EdgeMode::default(),
            filter: SampleFilter::default(),
        })
    }

    pub fn from_image(img: &image::RgbaImage) -> LensResult<Self> {
        Self::from_rgba8(img.width(), img.height(), img.as_raw())
    }

    /// Decode an image file (any format `image` supports) into a field.
    pub fn open(path: impl AsRef<Path>) -> LensResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|e| {
            LensError::sampling(format!("decode background '{}': {e}", path.display()))
        })?;
        tracing::debug!(
            path = %path.display(),
            width = img.width(),
            height = img.height(),
            "loaded background"
        );
        Self::from_image(&img.to_rgba8())
    }

    /// Uniformly colored field.
    pub fn solid(width: u32, height: u32, color: Rgba) -> LensResult<Self> {
        if width == 0 || height == 0 {
            return Err(LensError::validation("content field must be non-empty"));
        }
        Ok(Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
            edge: EdgeMode::default(),
            filter: SampleFilter::default(),
        })
    }

    /// Rasterize any sampler at pixel centers.
    pub fn capture<S: ContentSampler + ?Sized>(width: u32, height: u32, src: &S) -> LensResult<Self> {
        let mut field = Self::solid(width, height, Rgba::TRANSPARENT)?;
        for y in 0..height {
            for x in 0..width {
                let pos = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                field.pixels[y as usize * width as usize + x as usize] = src.sample(pos);
            }
        }
        Ok(field)
    }

    pub fn with_edge_mode(mut self, edge: EdgeMode) -> Self {
        self.edge = edge;
        self
    }

    pub fn with_filter(mut self, filter: SampleFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Value of pixel `(x, y)`, applying the edge mode outside the raster.
    pub fn texel(&self, x: i64, y: i64) -> Rgba {
        let (w, h) = (i64::from(self.width), i64::from(self.height));
        let inside = (0..w).contains(&x) && (0..h).contains(&y);
        if !inside && self.edge == EdgeMode::Transparent {
            return Rgba::TRANSPARENT;
        }
        let x = x.clamp(0, w - 1);
        let y = y.clamp(0, h - 1);
        self.pixels[(y * w + x) as usize]
    }

    fn sample_bilinear(&self, pos: Point) -> Rgba {
        // Past one texel outside the raster every tap reads the same edge value, so far
        // coordinates are pulled in before the integer cast.
        let fx = (pos.x - 0.5).clamp(-1.0, f64::from(self.width));
        let fy = (pos.y - 0.5).clamp(-1.0, f64::from(self.height));
        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = (fx - x0) as f32;
        let ty = (fy - y0) as f32;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let top = self.texel(x0, y0).mix(self.texel(x0 + 1, y0), tx);
        let bottom = self.texel(x0, y0 + 1).mix(self.texel(x0 + 1, y0 + 1), tx);
        top.mix(bottom, ty)
    }
}

impl ContentSampler for ImageField {
    fn sample(&self, pos: Point) -> Rgba {
        if !pos.x.is_finite() || !pos.y.is_finite() {
            return Rgba::TRANSPARENT;
        }
        match self.filter {
            SampleFilter::Nearest => self.texel(pos.x.floor() as i64, pos.y.floor() as i64),
            SampleFilter::Bilinear => self.sample_bilinear(pos),
        }
    }
}

/// Infinite procedural checkerboard, used when the host supplies no background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Checkerboard {
    /// Cell edge length in pixels.
    pub cell_px: f64,
    pub even: Rgba,
    pub odd: Rgba,
}

impl Default for Checkerboard {
    fn default() -> Self {
        Self {
            cell_px: 32.0,
            even: Rgba::new(0.93, 0.93, 0.95, 1.0),
            odd: Rgba::new(0.16, 0.32, 0.62, 1.0),
        }
    }
}

impl ContentSampler for Checkerboard {
    fn sample(&self, pos: Point) -> Rgba {
        let cell = self.cell_px.max(f64::MIN_POSITIVE);
        let cx = (pos.x / cell).floor() as i64;
        let cy = (pos.y / cell).floor() as i64;
        if (cx.rem_euclid(2) + cy.rem_euclid(2)) % 2 == 0 {
            self.even
        } else {
            self.odd
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/field.rs"]
mod tests;
