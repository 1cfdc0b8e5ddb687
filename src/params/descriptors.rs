//! Control descriptors for the host-facing lens parameters.
//!
//! Each descriptor carries the slider range and starting value a host exposes for one
//! scalar of [`LensParams`]. Ranges are UI conventions; the kernel's hard limits are
//! enforced by [`LensParams::validate`].

use crate::foundation::error::{LensError, LensResult};
use crate::params::model::LensParams;

/// Descriptor for one floating-point lens control.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ControlDescriptor {
    /// Field name in [`LensParams`] and its JSON form.
    pub name: &'static str,
    /// Short label suitable for a slider.
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    /// Number of discrete slider steps between `min` and `max`.
    pub steps: u32,
    pub description: &'static str,
}

pub const RADIUS: ControlDescriptor = ControlDescriptor {
    name: "radius",
    label: "Radius",
    min: 0.05,
    max: 0.5,
    default: 0.15,
    steps: 100,
    description: "Normalized lens radius",
};

pub const INDEX_OF_REFRACTION: ControlDescriptor = ControlDescriptor {
    name: "index_of_refraction",
    label: "IOR",
    min: 1.0,
    max: 2.0,
    default: 1.33,
    steps: 100,
    description: "Index of refraction (1.0 air, 1.33 water, ~1.5 glass)",
};

pub const HIGHLIGHT_STRENGTH: ControlDescriptor = ControlDescriptor {
    name: "highlight_strength",
    label: "Highlight",
    min: 0.0,
    max: 2.0,
    default: 1.0,
    steps: 100,
    description: "Intensity of the specular rim highlight",
};

pub const BEVEL_WIDTH: ControlDescriptor = ControlDescriptor {
    name: "bevel_width",
    label: "Bevel",
    min: 0.0,
    max: 0.1,
    default: 0.02,
    steps: 100,
    description: "Normalized width of the rounded rim band",
};

pub const THICKNESS: ControlDescriptor = ControlDescriptor {
    name: "thickness",
    label: "Thickness",
    min: 0.0,
    max: 0.1,
    default: 0.05,
    steps: 100,
    description: "Perceived glass thickness scaling the distortion",
};

pub const SHADOW_INTENSITY: ControlDescriptor = ControlDescriptor {
    name: "shadow_intensity",
    label: "Shadow",
    min: 0.0,
    max: 1.0,
    default: 0.1,
    steps: 100,
    description: "Opacity of the cast drop shadow",
};

pub const CHROMATIC_ABERRATION_STRENGTH: ControlDescriptor = ControlDescriptor {
    name: "chromatic_aberration_strength",
    label: "Chromatic",
    min: 0.0,
    max: 0.005,
    default: 0.001,
    steps: 100,
    description: "Red/blue channel split along the refracted ray",
};

pub const FROSTED_BLUR_RADIUS: ControlDescriptor = ControlDescriptor {
    name: "frosted_blur_radius",
    label: "Frosted",
    min: 0.0,
    max: 0.02,
    default: 0.0,
    steps: 100,
    description: "Normalized box-blur radius applied to refraction samples",
};

/// All scalar controls in display order.
pub static CONTROLS: [ControlDescriptor; 8] = [
    RADIUS,
    INDEX_OF_REFRACTION,
    HIGHLIGHT_STRENGTH,
    BEVEL_WIDTH,
    THICKNESS,
    SHADOW_INTENSITY,
    CHROMATIC_ABERRATION_STRENGTH,
    FROSTED_BLUR_RADIUS,
];

impl ControlDescriptor {
    /// Find a control by field name or (case-insensitive) label.
    pub fn lookup(name: &str) -> Option<&'static ControlDescriptor> {
        CONTROLS
            .iter()
            .find(|c| c.name == name || c.label.eq_ignore_ascii_case(name))
    }

    /// Clamp `value` into the control range.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

impl LensParams {
    /// Read a scalar control by name.
    pub fn control(&self, name: &str) -> Option<f64> {
        let desc = ControlDescriptor::lookup(name)?;
        Some(*self.slot(desc.name)?)
    }

    /// Apply a slider update: the value is clamped into the control range and, for the
    /// bevel, to the current radius.
    pub fn set_control(&mut self, name: &str, value: f64) -> LensResult<()> {
        let desc = ControlDescriptor::lookup(name)
            .ok_or_else(|| LensError::validation(format!("unknown lens control '{name}'")))?;
        if !value.is_finite() {
            return Err(LensError::validation(format!(
                "lens control '{}' must be finite",
                desc.name
            )));
        }

        let value = desc.clamp(value);
        let slot = self
            .slot_mut(desc.name)
            .ok_or_else(|| LensError::validation(format!("unknown lens control '{name}'")))?;
        *slot = value;
        self.bevel_width = self.bevel_width.min(self.radius);
        Ok(())
    }

    fn slot(&self, name: &str) -> Option<&f64> {
        Some(match name {
            "radius" => &self.radius,
            "index_of_refraction" => &self.index_of_refraction,
            "highlight_strength" => &self.highlight_strength,
            "bevel_width" => &self.bevel_width,
            "thickness" => &self.thickness,
            "shadow_intensity" => &self.shadow_intensity,
            "chromatic_aberration_strength" => &self.chromatic_aberration_strength,
            "frosted_blur_radius" => &self.frosted_blur_radius,
            _ => return None,
        })
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut f64> {
        Some(match name {
            "radius" => &mut self.radius,
            "index_of_refraction" => &mut self.index_of_refraction,
            "highlight_strength" => &mut self.highlight_strength,
            "bevel_width" => &mut self.bevel_width,
            "thickness" => &mut self.thickness,
            "shadow_intensity" => &mut self.shadow_intensity,
            "chromatic_aberration_strength" => &mut self.chromatic_aberration_strength,
            "frosted_blur_radius" => &mut self.frosted_blur_radius,
            _ => return None,
        })
    }
}

/// Parse a `name=value` control assignment.
pub fn parse_assignment(s: &str) -> LensResult<(String, f64)> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| LensError::validation(format!("expected name=value, got '{s}'")))?;
    let value: f64 = value.trim().parse().map_err(|e| {
        LensError::validation(format!("invalid value for control '{}': {e}", name.trim()))
    })?;
    Ok((name.trim().to_string(), value))
}

#[cfg(test)]
#[path = "../../tests/unit/params/descriptors.rs"]
mod tests;
