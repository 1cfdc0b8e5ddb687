use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::{Point, Resolution};
use crate::foundation::error::{LensError, LensResult};

/// Smallest radius `sanitized` will produce.
pub const MIN_RADIUS: f64 = 1e-4;
/// Largest normalized radius accepted by validation.
pub const MAX_RADIUS: f64 = 0.5;

/// Per-frame snapshot of every control the lens kernel reads.
///
/// All lengths except `resolution` are normalized: `center` is in `[0,1]²` of the surface,
/// and `radius`, `bevel_width`, `thickness`, `chromatic_aberration_strength` and
/// `frosted_blur_radius` are fractions of the surface height.
///
/// The kernel assumes a validated snapshot (see [`LensParams::validate`]). It stays finite on
/// out-of-range values but does not clamp them.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LensParams {
    /// Output surface size in pixels.
    pub resolution: Resolution,
    /// Lens radius in aspect-corrected normalized units.
    pub radius: f64,
    /// Lens center in normalized surface coordinates.
    pub center: Point,
    /// Index of refraction of the glass (1.0 is air).
    pub index_of_refraction: f64,
    /// Additive specular rim intensity.
    pub highlight_strength: f64,
    /// Width of the rounded rim band.
    pub bevel_width: f64,
    /// Perceived glass thickness; scales sample offsets.
    pub thickness: f64,
    /// Drop shadow opacity in `[0, 1]`.
    pub shadow_intensity: f64,
    /// Lateral red/blue split along the refracted ray.
    pub chromatic_aberration_strength: f64,
    /// Frosted box-blur radius; zero disables the blur.
    pub frosted_blur_radius: f64,
}

impl Default for LensParams {
    fn default() -> Self {
        Self {
            resolution: Resolution::default(),
            radius: 0.15,
            center: Point::new(0.5, 0.5),
            index_of_refraction: 1.33,
            highlight_strength: 1.0,
            bevel_width: 0.02,
            thickness: 0.05,
            shadow_intensity: 0.1,
            chromatic_aberration_strength: 0.001,
            frosted_blur_radius: 0.0,
        }
    }
}

impl LensParams {
    /// Parse parameters from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> LensResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| LensError::serde(format!("parse lens params JSON: {e}")))
    }

    /// Parse parameters from a JSON string.
    pub fn from_json_str(s: &str) -> LensResult<Self> {
        serde_json::from_str(s).map_err(|e| LensError::serde(format!("parse lens params JSON: {e}")))
    }

    /// Parse parameters from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> LensResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            LensError::validation(format!("open lens params JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> LensResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| LensError::serde(format!("serialize lens params: {e}")))
    }

    /// Replace the resolution, e.g. after the host surface was resized.
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Inner edge of the bevel band. Never negative, even when `bevel_width > radius`.
    pub fn inner_radius(&self) -> f64 {
        (self.radius - self.bevel_width).max(0.0)
    }

    /// Check the host-side preconditions of the kernel.
    pub fn validate(&self) -> LensResult<()> {
        if self.resolution.width == 0 || self.resolution.height == 0 {
            return Err(LensError::validation("resolution width/height must be > 0"));
        }

        for (name, value) in self.scalars() {
            if !value.is_finite() {
                return Err(LensError::validation(format!("{name} must be finite")));
            }
        }

        if !(self.radius > 0.0 && self.radius <= MAX_RADIUS) {
            return Err(LensError::validation(format!(
                "radius must be in (0, {MAX_RADIUS}]"
            )));
        }
        if !(0.0..=1.0).contains(&self.center.x) || !(0.0..=1.0).contains(&self.center.y) {
            return Err(LensError::validation("center must be within [0,1]x[0,1]"));
        }
        if self.index_of_refraction < 1.0 {
            return Err(LensError::validation("index_of_refraction must be >= 1.0"));
        }
        if self.bevel_width < 0.0 || self.bevel_width > self.radius {
            return Err(LensError::validation("bevel_width must be in [0, radius]"));
        }
        if !(0.0..=1.0).contains(&self.shadow_intensity) {
            return Err(LensError::validation("shadow_intensity must be in [0, 1]"));
        }
        for (name, value) in [
            ("highlight_strength", self.highlight_strength),
            ("thickness", self.thickness),
            (
                "chromatic_aberration_strength",
                self.chromatic_aberration_strength,
            ),
            ("frosted_blur_radius", self.frosted_blur_radius),
        ] {
            if value < 0.0 {
                return Err(LensError::validation(format!("{name} must be >= 0")));
            }
        }
        Ok(())
    }

    /// Coerce every field into its valid range, the way a host clamps gesture and slider input.
    ///
    /// Non-finite values fall back to the default. The result always passes
    /// [`LensParams::validate`] when the resolution is non-zero.
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        let pick = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };

        let radius = pick(self.radius, d.radius).clamp(MIN_RADIUS, MAX_RADIUS);
        Self {
            resolution: self.resolution,
            radius,
            center: Point::new(
                pick(self.center.x, d.center.x).clamp(0.0, 1.0),
                pick(self.center.y, d.center.y).clamp(0.0, 1.0),
            ),
            index_of_refraction: pick(self.index_of_refraction, d.index_of_refraction).max(1.0),
            highlight_strength: pick(self.highlight_strength, d.highlight_strength).max(0.0),
            bevel_width: pick(self.bevel_width, d.bevel_width).clamp(0.0, radius),
            thickness: pick(self.thickness, d.thickness).max(0.0),
            shadow_intensity: pick(self.shadow_intensity, d.shadow_intensity).clamp(0.0, 1.0),
            chromatic_aberration_strength: pick(
                self.chromatic_aberration_strength,
                d.chromatic_aberration_strength,
            )
            .max(0.0),
            frosted_blur_radius: pick(self.frosted_blur_radius, d.frosted_blur_radius).max(0.0),
        }
    }

    fn scalars(&self) -> [(&'static str, f64); 10] {
        [
            ("radius", self.radius),
            ("center.x", self.center.x),
            ("center.y", self.center.y),
            ("index_of_refraction", self.index_of_refraction),
            ("highlight_strength", self.highlight_strength),
            ("bevel_width", self.bevel_width),
            ("thickness", self.thickness),
            ("shadow_intensity", self.shadow_intensity),
            (
                "chromatic_aberration_strength",
                self.chromatic_aberration_strength,
            ),
            ("frosted_blur_radius", self.frosted_blur_radius),
        ]
    }
}

/// Convert a pixel-space lens position (e.g. a drag point) into a normalized center.
///
/// The position is first clamped to the surface bounds.
pub fn center_from_pixels(pos: Point, resolution: Resolution) -> Point {
    let w = f64::from(resolution.width.max(1));
    let h = f64::from(resolution.height.max(1));
    let x = if pos.x.is_finite() { pos.x } else { w * 0.5 };
    let y = if pos.y.is_finite() { pos.y } else { h * 0.5 };
    Point::new(x.clamp(0.0, w) / w, y.clamp(0.0, h) / h)
}

#[cfg(test)]
#[path = "../../tests/unit/params/model.rs"]
mod tests;
