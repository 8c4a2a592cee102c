//! Error types for style parsing and rendering.
//!
//! Two families are kept apart: [`StyleError`] and [`FontError`] describe
//! bad input handed in from outside, while [`InternalError`] marks a broken
//! invariant inside the pipeline (a layer with the wrong canvas size, a
//! negative blur radius reaching the blur engine). The latter is never the
//! user's fault and is not meant to be recovered from.

use thiserror::Error;

use crate::layer_effects::ZOrder;

/// A style description that failed to parse or validate.
#[derive(Debug, Error)]
pub enum StyleError {
    #[error("malformed style JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field}: {reason}")]
    Invalid { field: String, reason: String },

    #[error("cannot read style file: {0}")]
    Io(#[from] std::io::Error),
}

impl StyleError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        StyleError::Invalid { field: field.into(), reason: reason.into() }
    }
}

/// Font bytes that could not be loaded into a rasterizer.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("cannot read font file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse font: {0}")]
    Parse(String),
}

/// Broken pipeline invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InternalError {
    #[error("{layer:?} layer canvas is {found:?} at {found_origin:?}, expected {expected:?} at {expected_origin:?}")]
    CanvasMismatch {
        layer: ZOrder,
        expected: (usize, usize),
        expected_origin: (i32, i32),
        found: (usize, usize),
        found_origin: (i32, i32),
    },

    #[error("blur radius must be non-negative, got {0}")]
    NegativeBlurRadius(f32),

    #[error("effect offset {0:?} exceeds {1} pixels")]
    EffectOffsetOutOfRange([i32; 2], i32),

    #[error("gradient needs at least two colour stops, got {0}")]
    EmptyGradient(usize),

    #[error("base image must be (height, width, 4), got {0:?}")]
    BaseImageShape(Vec<usize>),
}

/// Top-level error returned by the render entry points.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Style(#[from] StyleError),

    #[error(transparent)]
    Font(#[from] FontError),

    #[error("internal consistency error: {0}")]
    Internal(#[from] InternalError),
}

impl RenderError {
    /// True for defects in the pipeline rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, RenderError::Internal(_))
    }
}
