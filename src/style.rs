//! Style description: the typed form of the style JSON.
//!
//! ```json
//! {
//!   "font_path": "fonts/Vazir.ttf",
//!   "font_size": 90,
//!   "center": [800, 450],
//!   "fill": {"type": "gradient", "colors": ["#ff0000", "#0000ff"], "direction": "vertical"},
//!   "stroke": {"enabled": true, "width": 4, "color": "#000000"},
//!   "shadow": {"enabled": true, "offset": [5, 5], "blur": 8, "color": "#000000", "opacity": 0.6},
//!   "outer_glow": {"enabled": false, "offset": [0, 0], "blur": 20, "color": "#ffff00", "opacity": 0.5},
//!   "inner_shadow": {"enabled": false, "offset": [2, 2], "blur": 4, "color": "#000000", "opacity": 0.5},
//!   "letter_spacing": 2,
//!   "line_height": 1.2,
//!   "rotation": 0,
//!   "opacity": 1.0
//! }
//! ```
//!
//! Unknown keys are rejected. [`StyleConfig::validate`] checks numeric
//! ranges; once a config has passed it, the renderer trusts it.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::color::Rgba;
use crate::error::StyleError;
use crate::filters::gradient::GradientDirection;
use crate::text::LayoutParams;

const MAX_FONT_SIZE: u32 = 500;
const MAX_STROKE_WIDTH: u32 = 100;
const MAX_BLUR: f32 = 200.0;
/// Largest shadow/glow displacement along either axis, in pixels.
pub const MAX_EFFECT_OFFSET: i32 = 500;
const MAX_LETTER_SPACING: i32 = 100;
const MAX_LINE_HEIGHT: f32 = 5.0;
const MAX_ROTATION: f32 = 360.0;

/// What the glyph interior is painted with.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Gradient {
        colors: Vec<Rgba>,
        direction: GradientDirection,
    },
}

/// Fill of the glyph interior.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "FillModel")]
pub struct FillSpec {
    pub enabled: bool,
    pub paint: Paint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum FillKind {
    Solid,
    Gradient,
}

/// Flat wire shape of `fill`, checked into [`FillSpec`].
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct FillModel {
    #[serde(default = "enabled_by_default")]
    enabled: bool,
    #[serde(rename = "type")]
    kind: FillKind,
    color: Option<Rgba>,
    colors: Option<Vec<Rgba>>,
    direction: Option<GradientDirection>,
}

fn enabled_by_default() -> bool {
    true
}

impl TryFrom<FillModel> for FillSpec {
    type Error = StyleError;

    fn try_from(model: FillModel) -> Result<Self, Self::Error> {
        let paint = match model.kind {
            FillKind::Solid => {
                let color = model
                    .color
                    .ok_or_else(|| StyleError::invalid("fill.color", "required for solid fills"))?;
                Paint::Solid(color)
            }
            FillKind::Gradient => {
                let colors = model.colors.unwrap_or_default();
                if colors.len() < 2 {
                    return Err(StyleError::invalid(
                        "fill.colors",
                        format!("gradient needs at least 2 colors, got {}", colors.len()),
                    ));
                }
                Paint::Gradient { colors, direction: model.direction.unwrap_or_default() }
            }
        };
        Ok(FillSpec { enabled: model.enabled, paint })
    }
}

/// Outline drawn beneath the fill.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrokeSpec {
    pub enabled: bool,
    /// Outline thickness in pixels.
    pub width: u32,
    pub color: Rgba,
}

/// Shared shape of drop shadow, outer glow and inner shadow.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EffectSpec {
    pub enabled: bool,
    /// `[dx, dy]` in pixels.
    pub offset: [i32; 2],
    /// Visible blur extent in pixels.
    pub blur: f32,
    pub color: Rgba,
    pub opacity: f32,
}

/// Complete style of one text block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    pub font_path: PathBuf,
    pub font_size: u32,
    /// Anchor `[x, y]`: the block is centred here and rotates around it.
    pub center: [i32; 2],
    pub fill: FillSpec,
    pub stroke: StrokeSpec,
    pub shadow: EffectSpec,
    pub outer_glow: EffectSpec,
    pub inner_shadow: EffectSpec,
    pub letter_spacing: i32,
    pub line_height: f32,
    /// Degrees, counter-clockwise.
    pub rotation: f32,
    /// Opacity of the whole block.
    pub opacity: f32,
}

fn check_unit(field: &str, v: f32) -> Result<(), StyleError> {
    if !(0.0..=1.0).contains(&v) {
        return Err(StyleError::invalid(field, format!("must be between 0 and 1, got {v}")));
    }
    Ok(())
}

impl EffectSpec {
    fn validate(&self, name: &str) -> Result<(), StyleError> {
        if !(0.0..=MAX_BLUR).contains(&self.blur) {
            return Err(StyleError::invalid(
                format!("{name}.blur"),
                format!("must be between 0 and {MAX_BLUR}, got {}", self.blur),
            ));
        }
        if self.offset.iter().any(|v| v.unsigned_abs() > MAX_EFFECT_OFFSET as u32) {
            return Err(StyleError::invalid(
                format!("{name}.offset"),
                format!(
                    "each component must be between -{MAX_EFFECT_OFFSET} and {MAX_EFFECT_OFFSET}, got {:?}",
                    self.offset
                ),
            ));
        }
        check_unit(&format!("{name}.opacity"), self.opacity)
    }
}

impl StyleConfig {
    /// Parse and validate a style from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, StyleError> {
        let style: StyleConfig = serde_json::from_str(json)?;
        style.validate()?;
        Ok(style)
    }

    /// Parse and validate a style from JSON bytes.
    pub fn from_json_slice(json: &[u8]) -> Result<Self, StyleError> {
        let style: StyleConfig = serde_json::from_slice(json)?;
        style.validate()?;
        Ok(style)
    }

    /// Read, parse and validate a style file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StyleError> {
        let bytes = std::fs::read(path.as_ref())?;
        log::debug!("loading style {}", path.as_ref().display());
        Self::from_json_slice(&bytes)
    }

    /// Check every numeric range.
    pub fn validate(&self) -> Result<(), StyleError> {
        if self.font_size == 0 || self.font_size > MAX_FONT_SIZE {
            return Err(StyleError::invalid(
                "font_size",
                format!("must be between 1 and {MAX_FONT_SIZE}, got {}", self.font_size),
            ));
        }
        if self.stroke.width > MAX_STROKE_WIDTH {
            return Err(StyleError::invalid(
                "stroke.width",
                format!("must be at most {MAX_STROKE_WIDTH}, got {}", self.stroke.width),
            ));
        }
        self.shadow.validate("shadow")?;
        self.outer_glow.validate("outer_glow")?;
        self.inner_shadow.validate("inner_shadow")?;

        if !(0..=MAX_LETTER_SPACING).contains(&self.letter_spacing) {
            return Err(StyleError::invalid(
                "letter_spacing",
                format!("must be between 0 and {MAX_LETTER_SPACING}, got {}", self.letter_spacing),
            ));
        }
        if !(self.line_height > 0.0 && self.line_height <= MAX_LINE_HEIGHT) {
            return Err(StyleError::invalid(
                "line_height",
                format!("must be in (0, {MAX_LINE_HEIGHT}], got {}", self.line_height),
            ));
        }
        if !(-MAX_ROTATION..=MAX_ROTATION).contains(&self.rotation) {
            return Err(StyleError::invalid(
                "rotation",
                format!("must be between -{MAX_ROTATION} and {MAX_ROTATION}, got {}", self.rotation),
            ));
        }
        check_unit("opacity", self.opacity)
    }

    /// Anchor as a tuple.
    pub fn anchor(&self) -> (i32, i32) {
        (self.center[0], self.center[1])
    }

    /// Layout sub-spec.
    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            font_size: self.font_size as f32,
            letter_spacing: self.letter_spacing as f32,
            line_height: self.line_height,
            anchor: self.anchor(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_style_json;

    #[test]
    fn test_parse_full_style() {
        let style = StyleConfig::from_json_str(&sample_style_json()).unwrap();
        assert_eq!(style.font_size, 90);
        assert_eq!(style.anchor(), (800, 450));
        assert!(style.stroke.enabled);
        assert_eq!(style.stroke.width, 4);
        assert_eq!(style.shadow.offset, [5, 5]);
        assert!(matches!(style.fill.paint, Paint::Solid(_)));
        assert!(style.fill.enabled);
    }

    #[test]
    fn test_gradient_fill_defaults_horizontal() {
        let json = sample_style_json().replace(
            r##""fill": {"type": "solid", "color": "#ffffff"}"##,
            r##""fill": {"type": "gradient", "colors": ["#ff0000", "#00ff00", "#0000ff"]}"##,
        );
        let style = StyleConfig::from_json_str(&json).unwrap();
        match style.fill.paint {
            Paint::Gradient { colors, direction } => {
                assert_eq!(colors.len(), 3);
                assert_eq!(direction, GradientDirection::Horizontal);
            }
            other => panic!("expected gradient, got {other:?}"),
        }
    }

    #[test]
    fn test_gradient_needs_two_colors() {
        let json = sample_style_json().replace(
            r##""fill": {"type": "solid", "color": "#ffffff"}"##,
            r##""fill": {"type": "gradient", "colors": ["#ff0000"], "direction": "diagonal"}"##,
        );
        let err = StyleConfig::from_json_str(&json).unwrap_err();
        assert!(err.to_string().contains("fill.colors"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let json = sample_style_json().replacen('{', r#"{"bogus": 1, "#, 1);
        assert!(matches!(StyleConfig::from_json_str(&json), Err(StyleError::Json(_))));
    }

    #[test]
    fn test_bad_color_rejected() {
        let json = sample_style_json().replace(r##""color": "#000000""##, r##""color": "black""##);
        assert!(StyleConfig::from_json_str(&json).is_err());
    }

    #[test]
    fn test_range_errors_name_the_field() {
        let mut style = StyleConfig::from_json_str(&sample_style_json()).unwrap();
        style.shadow.opacity = 1.5;
        let err = style.validate().unwrap_err();
        assert_eq!(err.to_string(), "shadow.opacity: must be between 0 and 1, got 1.5");

        let mut style = StyleConfig::from_json_str(&sample_style_json()).unwrap();
        style.line_height = 0.0;
        assert!(style.validate().unwrap_err().to_string().starts_with("line_height"));

        let mut style = StyleConfig::from_json_str(&sample_style_json()).unwrap();
        style.font_size = 0;
        assert!(style.validate().is_err());
    }

    #[test]
    fn test_offset_is_bounded() {
        let mut style = StyleConfig::from_json_str(&sample_style_json()).unwrap();
        style.shadow.offset = [MAX_EFFECT_OFFSET, -MAX_EFFECT_OFFSET];
        assert!(style.validate().is_ok());

        style.shadow.offset = [4000, 0];
        let err = style.validate().unwrap_err();
        assert!(err.to_string().starts_with("shadow.offset"));

        let json = sample_style_json().replace("\"offset\": [0, 0]", "\"offset\": [0, -501]");
        let err = StyleConfig::from_json_str(&json).unwrap_err();
        assert!(err.to_string().starts_with("outer_glow.offset"));
    }

    #[test]
    fn test_layout_params_follow_style() {
        let style = StyleConfig::from_json_str(&sample_style_json()).unwrap();
        let p = style.layout_params();
        assert_eq!(p.font_size, 90.0);
        assert_eq!(p.anchor, (800, 450));
        assert_eq!(p.line_height, style.line_height);
    }
}
