//! The per-pixel lens compositor.
//!
//! [`LensKernel`] derives everything that is constant across a frame once, then evaluates
//! pixels independently: no pixel reads another pixel's result and nothing is mutated, so
//! any number of threads may call [`LensKernel::compose`] on a shared kernel.

use crate::content::sampler::{ContentSampler, dispersed_sample, frosted_sample};
use crate::foundation::core::{Point, Rgba, Vec2};
use crate::foundation::math::{Vec3, smoothstep};
use crate::optics::fresnel::{facing_normal, normal_reflectance, reflect, refract, schlick};
use crate::optics::geometry::{lens_position, surface_normal};
use crate::optics::shading::{apply_shadow, shadow_amount, shadow_offset, specular};
use crate::params::model::LensParams;

/// Fixed optical constants of the lens model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpticsConstants {
    /// Viewing direction; orthographic, straight into the screen.
    pub view_dir: Vec3,
    /// Unit direction toward the light casting the drop shadow.
    pub shadow_light_dir: Vec3,
    /// Unit direction toward the light producing the rim highlight.
    pub highlight_light_dir: Vec3,
    /// Specular exponent of the rim highlight.
    pub shininess: f64,
    /// Distance the shadow circle is pushed away from the light.
    pub shadow_offset: f64,
    /// Width of the shadow ramp past the shadow circle.
    pub shadow_softness: f64,
    /// Half-width of the anti-aliased disc boundary.
    pub edge_softness: f64,
    /// Frosting grid half-size `N`; the grid has `(2N+1)²` taps.
    pub blur_taps: u32,
    /// Floor for the normal's z component when scaling sample offsets.
    pub grazing_floor: f64,
}

impl Default for OpticsConstants {
    fn default() -> Self {
        let light = Vec3::new(0.5, 0.5, 1.0).normalize_or_zero();
        Self {
            view_dir: Vec3::new(0.0, 0.0, -1.0),
            shadow_light_dir: light,
            highlight_light_dir: light,
            shininess: 200.0,
            shadow_offset: 0.04,
            shadow_softness: 0.15,
            edge_softness: 0.01,
            blur_taps: 12,
            grazing_floor: 0.001,
        }
    }
}

/// Geometry and optics of one output pixel, before any content is sampled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfacePoint {
    /// Pixel coordinate being shaded.
    pub frag: Point,
    /// Aspect-corrected offset from the lens center.
    pub p: Vec2,
    /// `|p|`.
    pub d: f64,
    /// Viewer-facing surface normal.
    pub normal: Vec3,
    /// `dot(-view, normal)`, in `[0, 1]`.
    pub cos_theta_i: f64,
    /// Refracted ray; zero on total internal reflection.
    pub refracted: Vec3,
    /// Mirror-reflected ray.
    pub reflected: Vec3,
    /// Schlick reflectance weight.
    pub fresnel: f64,
    /// Offset ramp, 0 in the interior and 1 at the rim.
    pub distortion: f64,
    /// Where refraction samples the content.
    pub refract_coord: Point,
    /// Where reflection samples the content.
    pub reflect_coord: Point,
    /// Highlight mask, concentrated in the bevel band.
    pub bevel_mask: f64,
    /// Weight of the glass color against the backdrop.
    pub edge_weight: f64,
}

/// Per-frame lens kernel: the parameter snapshot plus values derived from it.
#[derive(Clone, Copy, Debug)]
pub struct LensKernel {
    params: LensParams,
    consts: OpticsConstants,
    resolution: Vec2,
    inner_radius: f64,
    eta: f64,
    r0: f64,
    shadow_offset: Vec2,
    blur_radius_px: f64,
}

impl LensKernel {
    /// Kernel with the default optical constants.
    pub fn new(params: &LensParams) -> Self {
        Self::with_constants(params, OpticsConstants::default())
    }

    pub fn with_constants(params: &LensParams, consts: OpticsConstants) -> Self {
        let resolution = params.resolution.as_vec2();
        Self {
            params: *params,
            consts,
            resolution,
            inner_radius: params.inner_radius(),
            eta: 1.0 / params.index_of_refraction,
            r0: normal_reflectance(params.index_of_refraction),
            shadow_offset: shadow_offset(
                consts.shadow_light_dir,
                params.resolution.aspect(),
                consts.shadow_offset,
            ),
            blur_radius_px: params.frosted_blur_radius * resolution.y,
        }
    }

    pub fn params(&self) -> &LensParams {
        &self.params
    }

    pub fn constants(&self) -> &OpticsConstants {
        &self.consts
    }

    /// Normal-incidence reflectance `R0` for this frame's index of refraction.
    pub fn normal_reflectance(&self) -> f64 {
        self.r0
    }

    /// Lens-space offset of the shadow circle.
    pub fn shadow_circle_offset(&self) -> Vec2 {
        self.shadow_offset
    }

    /// Radius beyond which a pixel is pure backdrop.
    pub fn glass_extent(&self) -> f64 {
        self.params.radius + self.consts.edge_softness
    }

    pub fn lens_position(&self, frag: Point) -> Vec2 {
        lens_position(frag, self.resolution, self.params.center)
    }

    /// Evaluate the lens geometry and optics at `frag` without sampling content.
    pub fn surface(&self, frag: Point) -> SurfacePoint {
        let p = self.lens_position(frag);
        self.surface_at(frag, p, p.hypot())
    }

    fn surface_at(&self, frag: Point, p: Vec2, d: f64) -> SurfacePoint {
        let LensParams {
            radius,
            bevel_width,
            ..
        } = self.params;
        let view = self.consts.view_dir;

        let normal = surface_normal(p, d, self.inner_radius, bevel_width);
        let (normal, cos_theta_i) = facing_normal(normal, view);

        let refracted = refract(view, normal, cos_theta_i, self.eta);
        let reflected = reflect(view, normal);
        let fresnel = schlick(cos_theta_i, self.r0);

        let distortion = smoothstep(self.inner_radius, radius, d);
        let scale = self.params.thickness * self.resolution.y
            / normal.z.max(self.consts.grazing_floor)
            * distortion;

        SurfacePoint {
            frag,
            p,
            d,
            normal,
            cos_theta_i,
            refracted,
            reflected,
            fresnel,
            distortion,
            refract_coord: frag + refracted.xy() * scale,
            reflect_coord: frag + reflected.xy() * scale,
            bevel_mask: smoothstep(radius - bevel_width, radius, d),
            edge_weight: smoothstep(
                self.consts.edge_softness,
                -self.consts.edge_softness,
                d - radius,
            ),
        }
    }

    /// Background at `frag` darkened by the drop shadow.
    pub fn backdrop<S: ContentSampler + ?Sized>(&self, frag: Point, p: Vec2, content: &S) -> Rgba {
        let bg = content.sample(frag);
        let amount = shadow_amount(
            p,
            self.shadow_offset,
            self.params.radius,
            self.consts.shadow_softness,
            self.params.shadow_intensity,
        );
        apply_shadow(bg, amount)
    }

    /// Refracted content at the surface point: frosted, and split per channel when
    /// chromatic aberration is enabled.
    pub fn refraction_sample<S: ContentSampler + ?Sized>(
        &self,
        surface: &SurfacePoint,
        content: &S,
    ) -> Rgba {
        let taps = self.consts.blur_taps;
        let strength = self.params.chromatic_aberration_strength;
        if strength > 0.0 {
            let split = surface.refracted.xy() * (strength * self.resolution.y);
            dispersed_sample(content, surface.refract_coord, split, self.blur_radius_px, taps)
        } else {
            frosted_sample(content, surface.refract_coord, self.blur_radius_px, taps)
        }
    }

    /// Glass color at the surface point: Fresnel blend of refraction and reflection plus the
    /// rim highlight. Alpha comes from the refraction sample.
    pub fn glass_color<S: ContentSampler + ?Sized>(&self, surface: &SurfacePoint, content: &S) -> Rgba {
        let refracted = self.refraction_sample(surface, content);
        let reflected = content.sample(surface.reflect_coord);

        let highlight = specular(
            surface.normal,
            self.consts.highlight_light_dir,
            self.consts.view_dir,
            self.consts.shininess,
        ) * self.params.highlight_strength
            * surface.bevel_mask;

        let blend = refracted.mix(reflected, surface.fresnel as f32);
        Rgba::new(blend.r, blend.g, blend.b, refracted.a).add_rgb(highlight as f32)
    }

    /// Final color of the output pixel at `frag`.
    pub fn compose<S: ContentSampler + ?Sized>(&self, frag: Point, content: &S) -> Rgba {
        let p = self.lens_position(frag);
        let d = p.hypot();
        let backdrop = self.backdrop(frag, p, content);
        if d >= self.glass_extent() {
            return backdrop;
        }

        let surface = self.surface_at(frag, p, d);
        let glass = self.glass_color(&surface, content);
        if surface.edge_weight >= 1.0 {
            return glass;
        }
        backdrop.mix(glass, surface.edge_weight as f32)
    }
}

/// Composite a single pixel: the kernel's input contract in one call.
///
/// Prefer building a [`LensKernel`] once per frame when shading many pixels.
pub fn compose<S: ContentSampler + ?Sized>(frag: Point, params: &LensParams, content: &S) -> Rgba {
    LensKernel::new(params).compose(frag, content)
}

#[cfg(test)]
#[path = "../../tests/unit/optics/kernel.rs"]
mod tests;
