//! ImageStag Text
//!
//! Renders a block of styled text onto a photo with Photoshop-style layer
//! effects (fill, stroke, drop shadow, outer glow, inner shadow), with
//! Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Pipeline
//!
//! 1. **Layout** (`text`) - display-ordered text to per-line coverage masks,
//!    centred on the style's anchor
//! 2. **Effects** (`layer_effects`) - one RGBA layer per enabled effect, all
//!    on the same working canvas
//! 3. **Compositing** (`compositor`) - fixed z-order stacking, global
//!    opacity, rotation around the anchor, blend onto the base image
//!
//! ## Image Format
//! - Base image: `Array3<u8>` shaped (height, width, 4), RGBA 0-255
//! - Working rasters: `Array3<f32>`, straight alpha 0.0-1.0
//! - Coverage masks: `Array2<f32>`, 0.0-1.0
//!
//! Rendering is synchronous and deterministic: the same image, text and
//! style always give a bit-identical result.

pub mod color;
pub mod compositor;
pub mod error;
pub mod filters;
pub mod layer_effects;
pub mod logging;
pub mod pipeline;
pub mod style;
pub mod text;

#[doc(hidden)]
pub mod testing;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use color::Rgba;
pub use compositor::{Compositor, RenderResult};
pub use error::{FontError, InternalError, RenderError, StyleError};
pub use layer_effects::{Layer, LayerEffect, ZOrder};
pub use pipeline::{render_text, render_text_with_style_font};
pub use style::{EffectSpec, FillSpec, Paint, StrokeSpec, StyleConfig};
pub use text::{CoverageMask, FontdueRasterizer, GlyphRasterizer};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::{PyRuntimeError, PyValueError};
    use pyo3::prelude::*;

    use crate::error::RenderError;
    use crate::logging::{init_logging as init_logging_impl, LoggingConfig};
    use crate::pipeline::render_text_with_style_font;
    use crate::style::StyleConfig;
    use crate::text::bidi::display_order;

    fn to_py_err(err: RenderError) -> PyErr {
        if err.is_internal() {
            PyRuntimeError::new_err(err.to_string())
        } else {
            PyValueError::new_err(err.to_string())
        }
    }

    /// Render styled text onto an RGBA u8 image.
    ///
    /// # Arguments
    /// * `image` - Base image (height, width, 4) as u8
    /// * `text` - Text to draw; `\n` starts a new line
    /// * `style_json` - Style description as JSON text
    /// * `reorder` - Apply bidi reordering (disable if already in display order)
    ///
    /// # Returns
    /// New image with the text blended in, same shape as `image`
    #[pyfunction]
    #[pyo3(signature = (image, text, style_json, reorder=true))]
    pub fn render_text<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        text: &str,
        style_json: &str,
        reorder: bool,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let style = StyleConfig::from_json_str(style_json).map_err(|e| to_py_err(e.into()))?;
        let base = image.as_array().to_owned();
        let text = if reorder { display_order(text) } else { text.to_string() };

        let result = py
            .allow_threads(|| render_text_with_style_font(&base, &text, &style))
            .map_err(to_py_err)?;
        Ok(result.image.into_pyarray(py))
    }

    /// Route Rust log output to stderr.
    ///
    /// `filter` uses env_logger syntax ("debug", "imagestag_text=trace").
    #[pyfunction]
    #[pyo3(signature = (filter=None))]
    pub fn init_logging(filter: Option<String>) {
        init_logging_impl(LoggingConfig { env_filter: filter });
    }

    #[pymodule]
    pub fn imagestag_text(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(render_text, m)?)?;
        m.add_function(wrap_pyfunction!(init_logging, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::imagestag_text;
