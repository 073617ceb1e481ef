use crate::{
    config::device::DeviceConfig,
    foundation::error::{FrameshotError, FrameshotResult},
};

/// Horizontal alignment of caption lines inside the caption box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Align {
    /// Flush left.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Flush right.
    Right,
}

/// Where the caption sits relative to the device.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaptionPosition {
    /// Above the device.
    #[default]
    Above,
    /// Below the device.
    Below,
    /// Anchored to the canvas bottom, drawn over the device.
    Overlay,
}

impl CaptionPosition {
    /// Lowercase name used in logs and debug info.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Above => "above",
            Self::Below => "below",
            Self::Overlay => "overlay",
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Sizing rules for the caption box.
pub struct CaptionBoxConfig {
    /// Re-wrap and shrink to fit the space next to the device.
    #[serde(default = "default_true")]
    pub auto_size: bool,
    /// Maximum number of wrapped lines.
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,
    /// Lower bound on the box height.
    #[serde(default)]
    pub min_height: Option<f64>,
    /// Upper bound on the box height.
    #[serde(default)]
    pub max_height: Option<f64>,
    /// Line height as a multiple of the font size.
    #[serde(default = "default_line_height")]
    pub line_height: f64,
    /// Space above the caption box.
    #[serde(default)]
    pub margin_top: Option<f64>,
    /// Space below the caption box.
    #[serde(default)]
    pub margin_bottom: Option<f64>,
}

impl Default for CaptionBoxConfig {
    fn default() -> Self {
        Self {
            auto_size: true,
            max_lines: default_max_lines(),
            min_height: None,
            max_height: None,
            line_height: default_line_height(),
            margin_top: None,
            margin_bottom: None,
        }
    }
}

/// Per-device partial override of [`CaptionBoxConfig`]; unset fields keep the global value.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionBoxOverride {
    /// See [`CaptionBoxConfig::auto_size`].
    #[serde(default)]
    pub auto_size: Option<bool>,
    /// See [`CaptionBoxConfig::max_lines`].
    #[serde(default)]
    pub max_lines: Option<usize>,
    /// See [`CaptionBoxConfig::min_height`].
    #[serde(default)]
    pub min_height: Option<f64>,
    /// See [`CaptionBoxConfig::max_height`].
    #[serde(default)]
    pub max_height: Option<f64>,
    /// See [`CaptionBoxConfig::line_height`].
    #[serde(default)]
    pub line_height: Option<f64>,
    /// See [`CaptionBoxConfig::margin_top`].
    #[serde(default)]
    pub margin_top: Option<f64>,
    /// See [`CaptionBoxConfig::margin_bottom`].
    #[serde(default)]
    pub margin_bottom: Option<f64>,
}

impl CaptionBoxConfig {
    /// Apply the fields set in `ov`.
    pub fn merged_with(&self, ov: &CaptionBoxOverride) -> Self {
        Self {
            auto_size: ov.auto_size.unwrap_or(self.auto_size),
            max_lines: ov.max_lines.unwrap_or(self.max_lines),
            min_height: ov.min_height.or(self.min_height),
            max_height: ov.max_height.or(self.max_height),
            line_height: ov.line_height.unwrap_or(self.line_height),
            margin_top: ov.margin_top.or(self.margin_top),
            margin_bottom: ov.margin_bottom.or(self.margin_bottom),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Filled panel behind the caption text.
pub struct CaptionBackground {
    /// Panel color. Invalid values fall back to black.
    #[serde(default = "default_panel_color")]
    pub color: String,
    /// Panel opacity in `[0, 1]`.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Inner padding between panel edge and text, on every side.
    #[serde(default = "default_panel_padding")]
    pub padding: f64,
    /// Distance from the canvas sides to the panel.
    #[serde(default = "default_side_margin")]
    pub side_margin: f64,
}

impl Default for CaptionBackground {
    fn default() -> Self {
        Self {
            color: default_panel_color(),
            opacity: default_opacity(),
            padding: default_panel_padding(),
            side_margin: default_side_margin(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Stroke around the caption panel.
pub struct CaptionBorder {
    /// Stroke color. Invalid values fall back to white.
    #[serde(default = "default_border_color")]
    pub color: String,
    /// Stroke width in pixels, centered on the panel edge.
    #[serde(default = "default_border_width")]
    pub width: f64,
    /// Corner radius of the panel.
    #[serde(default)]
    pub radius: f64,
}

impl Default for CaptionBorder {
    fn default() -> Self {
        Self {
            color: default_border_color(),
            width: default_border_width(),
            radius: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Caption styling and placement.
pub struct CaptionConfig {
    /// Font family name, or a path to a `.ttf`/`.otf`/`.ttc` file.
    #[serde(default = "default_font")]
    pub font: String,
    /// Font size in pixels.
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Text color. Invalid values fall back to black.
    #[serde(default = "default_text_color")]
    pub color: String,
    /// Line alignment.
    #[serde(default)]
    pub align: Align,
    /// Placement relative to the device.
    #[serde(default)]
    pub position: CaptionPosition,
    /// Space between the canvas top and the caption (above mode).
    #[serde(default = "default_padding")]
    pub padding_top: f64,
    /// Space between the caption and the canvas bottom (below and overlay modes).
    #[serde(default = "default_padding")]
    pub padding_bottom: f64,
    /// Horizontal inset of the text when there is no panel.
    #[serde(default = "default_padding")]
    pub padding_sides: f64,
    /// Box sizing rules.
    #[serde(default, rename = "box")]
    pub caption_box: CaptionBoxConfig,
    /// Optional panel.
    #[serde(default)]
    pub background: Option<CaptionBackground>,
    /// Optional panel stroke.
    #[serde(default)]
    pub border: Option<CaptionBorder>,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            font: default_font(),
            font_size: default_font_size(),
            color: default_text_color(),
            align: Align::default(),
            position: CaptionPosition::default(),
            padding_top: default_padding(),
            padding_bottom: default_padding(),
            padding_sides: default_padding(),
            caption_box: CaptionBoxConfig::default(),
            background: None,
            border: None,
        }
    }
}

impl CaptionConfig {
    /// Copy with the caption fields of a device override applied.
    pub fn with_device_overrides(&self, device: &DeviceConfig) -> Self {
        let mut out = self.clone();
        if let Some(position) = device.caption_position {
            out.position = position;
        }
        if let Some(size) = device.caption_size {
            out.font_size = size;
        }
        if let Some(ov) = &device.caption_box {
            out.caption_box = out.caption_box.merged_with(ov);
        }
        out
    }

    /// Stroke width of the border, zero without one.
    pub fn stroke_width(&self) -> f64 {
        self.border.as_ref().map_or(0.0, |b| b.width.max(0.0))
    }

    /// Validate numeric fields.
    pub fn validate(&self) -> FrameshotResult<()> {
        if self.font.trim().is_empty() {
            return Err(FrameshotError::validation("caption font must be non-empty"));
        }
        positive("caption fontSize", self.font_size)?;
        for (name, value) in [
            ("caption paddingTop", self.padding_top),
            ("caption paddingBottom", self.padding_bottom),
            ("caption paddingSides", self.padding_sides),
        ] {
            non_negative(name, value)?;
        }

        let b = &self.caption_box;
        if b.max_lines == 0 {
            return Err(FrameshotError::validation("caption box maxLines must be > 0"));
        }
        positive("caption box lineHeight", b.line_height)?;
        for (name, value) in [
            ("caption box minHeight", b.min_height),
            ("caption box maxHeight", b.max_height),
            ("caption box marginTop", b.margin_top),
            ("caption box marginBottom", b.margin_bottom),
        ] {
            if let Some(v) = value {
                non_negative(name, v)?;
            }
        }

        if let Some(bg) = &self.background {
            if !bg.opacity.is_finite() || !(0.0..=1.0).contains(&bg.opacity) {
                return Err(FrameshotError::validation(
                    "caption background opacity must be within [0, 1]",
                ));
            }
            non_negative("caption background padding", bg.padding)?;
            non_negative("caption background sideMargin", bg.side_margin)?;
        }
        if let Some(border) = &self.border {
            non_negative("caption border width", border.width)?;
            non_negative("caption border radius", border.radius)?;
        }
        Ok(())
    }
}

pub(crate) fn positive(name: &str, value: f64) -> FrameshotResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(FrameshotError::validation(format!(
            "{name} must be finite and > 0"
        )));
    }
    Ok(())
}

pub(crate) fn non_negative(name: &str, value: f64) -> FrameshotResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(FrameshotError::validation(format!(
            "{name} must be finite and >= 0"
        )));
    }
    Ok(())
}

fn default_true() -> bool {
    true
}

fn default_max_lines() -> usize {
    3
}

fn default_line_height() -> f64 {
    1.2
}

fn default_font() -> String {
    "SF Pro Display".to_owned()
}

fn default_font_size() -> f64 {
    64.0
}

fn default_text_color() -> String {
    "#000000".to_owned()
}

fn default_padding() -> f64 {
    100.0
}

fn default_panel_color() -> String {
    "#000000".to_owned()
}

fn default_opacity() -> f64 {
    1.0
}

fn default_panel_padding() -> f64 {
    24.0
}

fn default_side_margin() -> f64 {
    60.0
}

fn default_border_color() -> String {
    "#FFFFFF".to_owned()
}

fn default_border_width() -> f64 {
    2.0
}

#[cfg(test)]
#[path = "../../tests/unit/config/caption.rs"]
mod tests;
