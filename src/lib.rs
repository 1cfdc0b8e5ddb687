//! glasslens composites a physically-inspired glass lens over arbitrary background content.
//!
//! The lens is a beveled disc that refracts, reflects, shadows and optically distorts
//! whatever lies beneath it. Everything happens in one per-pixel function with no shared
//! mutable state, so frames can be shaded serially, row-parallel, or on any other
//! data-parallel executor without changing results.
//!
//! # Pipeline overview
//!
//! 1. **Snapshot**: the host builds a [`LensParams`] for the frame (validated or sanitized)
//! 2. **Derive**: [`LensKernel::new`] folds the snapshot into per-frame constants
//! 3. **Shade**: [`LensKernel::compose`] maps `(pixel, ContentSampler) -> Rgba`
//! 4. **Assemble** (optional): [`render_frame`] / [`FrameRenderer`] fill a [`LensFrame`]
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure kernel**: identical inputs produce bit-identical pixels.
//! - **No faults in the kernel**: total internal reflection, grazing normals and zero-width
//!   bevels degrade gracefully instead of producing NaN.
//! - **Whole frames only**: a superseded render is dropped, never partially committed.
#![forbid(unsafe_code)]

mod content;
mod foundation;
mod optics;
mod params;
mod render;

pub use content::field::{Checkerboard, EdgeMode, ImageField, SampleFilter};
pub use content::sampler::{ContentSampler, dispersed_sample, frosted_sample};
pub use foundation::core::{Point, Resolution, Rgba, Vec2};
pub use foundation::error::{LensError, LensResult};
pub use foundation::math::{Vec3, mix, smoothstep};
pub use optics::fresnel::{facing_normal, normal_reflectance, reflect, refract, schlick};
pub use optics::geometry::{FLAT_NORMAL, bevel_progress, lens_position, surface_normal};
pub use optics::kernel::{LensKernel, OpticsConstants, SurfacePoint, compose};
pub use optics::shading::{apply_shadow, shadow_amount, shadow_offset, specular};
pub use params::descriptors::{CONTROLS, ControlDescriptor, parse_assignment};
pub use params::model::{LensParams, MAX_RADIUS, MIN_RADIUS, center_from_pixels};
pub use render::frame::LensFrame;
pub use render::pipeline::{
    FrameGate, FrameRenderer, RenderThreading, render_frame, render_frame_gated,
};
