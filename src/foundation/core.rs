use crate::foundation::error::{LensError, LensResult};
use crate::foundation::math::mix;

pub use kurbo::{Point, Vec2};

/// Output surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> LensResult<Self> {
        if width == 0 || height == 0 {
            return Err(LensError::validation("resolution width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Width over height; the factor applied to lens-space x.
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(f64::from(self.width), f64::from(self.height))
    }

    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Sample position of pixel `(x, y)`: its center.
    pub fn pixel_center(x: u32, y: u32) -> Point {
        Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5)
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
        }
    }
}

/// Floating-point RGBA color with channels nominally in `[0, 1]`.
///
/// Channels are processed independently, so the kernel works the same on straight or
/// premultiplied content. Highlights may push RGB above 1; quantization clamps.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(px: [u8; 4]) -> Self {
        Self::new(
            f32::from(px[0]) / 255.0,
            f32::from(px[1]) / 255.0,
            f32::from(px[2]) / 255.0,
            f32::from(px[3]) / 255.0,
        )
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        fn q(c: f32) -> u8 {
            if c.is_nan() {
                return 0;
            }
            (c.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Per-channel `self + (other - self) * t`.
    pub fn mix(self, other: Self, t: f32) -> Self {
        Self::new(
            mix(self.r, other.r, t),
            mix(self.g, other.g, t),
            mix(self.b, other.b, t),
            mix(self.a, other.a, t),
        )
    }

    /// Opaque-black shadow color that keeps this color's alpha.
    pub fn shadow_of(self) -> Self {
        Self::new(0.0, 0.0, 0.0, self.a)
    }

    /// Add `v` to the color channels, leaving alpha untouched.
    pub fn add_rgb(self, v: f32) -> Self {
        Self::new(self.r + v, self.g + v, self.b + v, self.a)
    }

    pub fn scale(self, s: f32) -> Self {
        Self::new(self.r * s, self.g * s, self.b * s, self.a * s)
    }

    pub fn max_abs_diff(self, other: Self) -> f32 {
        (self.r - other.r)
            .abs()
            .max((self.g - other.g).abs())
            .max((self.b - other.b).abs())
            .max((self.a - other.a).abs())
    }
}

impl std::ops::Add for Rgba {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.r + rhs.r,
            self.g + rhs.g,
            self.b + rhs.b,
            self.a + rhs.a,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
