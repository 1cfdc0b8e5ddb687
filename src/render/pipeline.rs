use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;

use crate::content::sampler::ContentSampler;
use crate::foundation::core::Resolution;
use crate::foundation::error::{LensError, LensResult};
use crate::optics::kernel::LensKernel;
use crate::params::model::LensParams;
use crate::render::frame::LensFrame;

/// How whole frames are scheduled across threads.
#[derive(Clone, Debug, Default)]
pub struct RenderThreading {
    /// Shade rows in parallel on a dedicated rayon pool.
    pub parallel: bool,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// Generation counter shared between a host and in-flight renders.
///
/// The host calls [`FrameGate::request`] whenever a new parameter or content snapshot
/// arrives; a render started for an older generation notices between rows and is dropped
/// whole.
#[derive(Clone, Debug, Default)]
pub struct FrameGate {
    latest: Arc<AtomicU64>,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Announce a new frame and return its generation.
    pub fn request(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Most recently requested generation.
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.latest() == generation
    }
}

/// Reusable frame renderer; owns the worker pool when rendering in parallel.
pub struct FrameRenderer {
    threading: RenderThreading,
    pool: Option<rayon::ThreadPool>,
}

impl std::fmt::Debug for FrameRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameRenderer")
            .field("threading", &self.threading)
            .field("pool_threads", &self.pool.as_ref().map(|p| p.current_num_threads()))
            .finish()
    }
}

struct Stale;

impl FrameRenderer {
    pub fn new(threading: RenderThreading) -> LensResult<Self> {
        let pool = if threading.parallel {
            Some(build_thread_pool(threading.threads)?)
        } else {
            None
        };
        Ok(Self { threading, pool })
    }

    pub fn threading(&self) -> &RenderThreading {
        &self.threading
    }

    /// Composite every pixel of one frame.
    pub fn render<S>(&self, params: &LensParams, content: &S) -> LensResult<LensFrame>
    where
        S: ContentSampler + Sync + ?Sized,
    {
        let mut frame = self.prepare(params)?;
        let kernel = LensKernel::new(params);
        match self.shade_rows(&kernel, content, &mut frame, || true) {
            Ok(()) => Ok(frame),
            Err(Stale) => Err(LensError::render("ungated frame was abandoned mid-render")),
        }
    }

    /// Like [`FrameRenderer::render`], but gives up with `Ok(None)` as soon as `gate` has moved
    /// past `generation`. A returned frame is always complete.
    pub fn render_gated<S>(
        &self,
        params: &LensParams,
        content: &S,
        gate: &FrameGate,
        generation: u64,
    ) -> LensResult<Option<LensFrame>>
    where
        S: ContentSampler + Sync + ?Sized,
    {
        let mut frame = self.prepare(params)?;
        let kernel = LensKernel::new(params);
        match self.shade_rows(&kernel, content, &mut frame, || gate.is_current(generation)) {
            Ok(()) => Ok(Some(frame)),
            Err(Stale) => {
                tracing::debug!(generation, latest = gate.latest(), "dropping stale frame");
                Ok(None)
            }
        }
    }

    fn prepare(&self, params: &LensParams) -> LensResult<LensFrame> {
        params.validate()?;
        LensFrame::new(params.resolution)
    }

    fn shade_rows<S, G>(
        &self,
        kernel: &LensKernel,
        content: &S,
        frame: &mut LensFrame,
        still_wanted: G,
    ) -> Result<(), Stale>
    where
        S: ContentSampler + Sync + ?Sized,
        G: Fn() -> bool + Sync,
    {
        let stride = frame.stride();
        let visit = |(y, row): (usize, &mut [u8])| -> Result<(), Stale> {
            if !still_wanted() {
                return Err(Stale);
            }
            shade_row(kernel, content, y as u32, row);
            Ok(())
        };

        match &self.pool {
            Some(pool) => pool.install(|| {
                frame
                    .data
                    .par_chunks_mut(stride)
                    .enumerate()
                    .try_for_each(visit)
            }),
            None => frame.data.chunks_mut(stride).enumerate().try_for_each(visit),
        }
    }
}

/// Render one frame with a throwaway [`FrameRenderer`].
#[tracing::instrument(skip(content))]
pub fn render_frame<S>(
    params: &LensParams,
    content: &S,
    threading: &RenderThreading,
) -> LensResult<LensFrame>
where
    S: ContentSampler + Sync + ?Sized,
{
    FrameRenderer::new(threading.clone())?.render(params, content)
}

/// Render one frame for `generation`, or `Ok(None)` if `gate` moved on before it finished.
#[tracing::instrument(skip(content, gate))]
pub fn render_frame_gated<S>(
    params: &LensParams,
    content: &S,
    threading: &RenderThreading,
    gate: &FrameGate,
    generation: u64,
) -> LensResult<Option<LensFrame>>
where
    S: ContentSampler + Sync + ?Sized,
{
    FrameRenderer::new(threading.clone())?.render_gated(params, content, gate, generation)
}

fn shade_row<S>(kernel: &LensKernel, content: &S, y: u32, row: &mut [u8])
where
    S: ContentSampler + ?Sized,
{
    for (x, px) in row.chunks_exact_mut(4).enumerate() {
        let frag = Resolution::pixel_center(x as u32, y);
        px.copy_from_slice(&kernel.compose(frag, content).to_rgba8());
    }
}

fn build_thread_pool(threads: Option<usize>) -> LensResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(LensError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| LensError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
