/// Convenience result type used across glasslens.
pub type LensResult<T> = Result<T, LensError>;

/// Top-level error taxonomy for everything around the per-pixel kernel.
///
/// The kernel itself never fails; these cover parameter loading, frame buffers and the
/// render pipeline.
#[derive(thiserror::Error, Debug)]
pub enum LensError {
    /// Invalid host-provided parameters or buffer dimensions.
    #[error("validation error: {0}")]
    Validation(String),

    /// Content field construction or sampling setup failed.
    #[error("sampling error: {0}")]
    Sampling(String),

    /// Frame rendering failed (thread pool, buffer sizing).
    #[error("render error: {0}")]
    Render(String),

    /// Parameter files could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LensError {
    /// Build a [`LensError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LensError::Sampling`] value.
    pub fn sampling(msg: impl Into<String>) -> Self {
        Self::Sampling(msg.into())
    }

    /// Build a [`LensError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`LensError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
