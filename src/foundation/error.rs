//! Error type shared by setup and accessor APIs.

/// Result alias used across the crate.
pub type RasterResult<T> = Result<T, RasterError>;

/// Errors raised by setup and accessor APIs.
///
/// Drawing entry points never return this; they log and draw nothing instead.
#[derive(thiserror::Error, Debug)]
pub enum RasterError {
    /// Invalid caller-provided value.
    #[error("validation error: {0}")]
    Validation(String),

    /// Color format or bit depth the operation cannot handle.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Coordinate or index outside its container.
    #[error("out of bounds: {0}")]
    OutOfBounds(String),

    /// Anything else, with its source chain.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RasterError {
    /// Build a [`RasterError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RasterError::UnsupportedFormat`].
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    /// Build a [`RasterError::OutOfBounds`].
    pub fn out_of_bounds(msg: impl Into<String>) -> Self {
        Self::OutOfBounds(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
