use crate::foundation::core::{Point, Rgba, Vec2};

/// Read-only background color source addressed in output pixel coordinates.
///
/// Implementations define their own out-of-bounds behaviour; the kernel samples freely
/// outside the surface when refraction or blur offsets push past an edge.
pub trait ContentSampler {
    /// Color of the background at `pos` (pixel units, pixel centers at `+0.5`).
    fn sample(&self, pos: Point) -> Rgba;
}

impl<F> ContentSampler for F
where
    F: Fn(Point) -> Rgba,
{
    fn sample(&self, pos: Point) -> Rgba {
        self(pos)
    }
}

/// Box-blurred sample: the equal-weight mean of a `(2N+1)²` grid spaced `radius_px / N`.
///
/// A non-positive radius (or `taps == 0`) reads a single direct sample without touching
/// the grid.
pub fn frosted_sample<S: ContentSampler + ?Sized>(
    content: &S,
    pos: Point,
    radius_px: f64,
    taps: u32,
) -> Rgba {
    if radius_px <= 0.0 || radius_px.is_nan() || taps == 0 {
        return content.sample(pos);
    }

    let n = taps as i32;
    let step = radius_px / f64::from(taps);
    let mut sum = Rgba::TRANSPARENT;
    let mut count = 0u32;
    for i in -n..=n {
        for j in -n..=n {
            let offset = Vec2::new(f64::from(i), f64::from(j)) * step;
            sum = sum + content.sample(pos + offset);
            count += 1;
        }
    }
    sum.scale(1.0 / count as f32)
}

/// Chromatic-aberration sample: red is read at `pos + split`, green at `pos`, blue at
/// `pos - split`. Alpha comes from the green read. Each read is frosted independently.
pub fn dispersed_sample<S: ContentSampler + ?Sized>(
    content: &S,
    pos: Point,
    split: Vec2,
    radius_px: f64,
    taps: u32,
) -> Rgba {
    let r = frosted_sample(content, pos + split, radius_px, taps);
    let g = frosted_sample(content, pos, radius_px, taps);
    let b = frosted_sample(content, pos - split, radius_px, taps);
    Rgba::new(r.r, g.g, b.b, g.a)
}

#[cfg(test)]
#[path = "../../tests/unit/content/sampler.rs"]
mod tests;
