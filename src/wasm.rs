//! WebAssembly exports.
//!
//! Images cross the boundary as flat RGBA u8 buffers
//! (length = width * height * 4). The font is passed as raw bytes since
//! there is no file system to load `font_path` from.

use ndarray::Array3;
use wasm_bindgen::prelude::*;

use crate::pipeline::render_text;
use crate::style::StyleConfig;
use crate::text::bidi::display_order;
use crate::text::FontdueRasterizer;

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Render styled text onto an RGBA image.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `text` - Text in logical order; reordered for display here
/// * `style_json` - Style description (`font_path` is ignored)
/// * `font_bytes` - TrueType/OpenType font file contents
///
/// # Returns
/// Flat array of RGBA bytes, same size as `data`
#[wasm_bindgen]
pub fn render_text_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    text: &str,
    style_json: &str,
    font_bytes: &[u8],
) -> Result<Vec<u8>, JsValue> {
    let base = Array3::from_shape_vec((height, width, 4), data.to_vec()).map_err(js_err)?;
    let style = StyleConfig::from_json_str(style_json).map_err(js_err)?;
    let rasterizer = FontdueRasterizer::from_bytes(font_bytes).map_err(js_err)?;

    let result = render_text(&base, &display_order(text), &style, &rasterizer).map_err(js_err)?;
    Ok(result.image.into_raw_vec_and_offset().0)
}
