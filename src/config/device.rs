use std::fmt;

use crate::{
    config::background::BackgroundOverride,
    config::caption::{CaptionBoxOverride, CaptionPosition, non_negative},
    foundation::core::{Canvas, DeviceCategory},
    foundation::error::{FrameshotError, FrameshotResult},
};

/// Default share of the canvas the device occupies.
pub const DEFAULT_FRAME_SCALE: f64 = 0.9;

/// Named vertical anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamedPosition {
    /// 0%.
    Top,
    /// 50%.
    Center,
    /// 100%.
    Bottom,
}

/// Vertical position: a named anchor or a percentage in `[0, 100]`.
///
/// 0 puts the device flush with the canvas top, 100 flush with the bottom.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum FramePosition {
    /// `top`, `center` or `bottom`.
    Named(NamedPosition),
    /// Percentage.
    Percent(f64),
}

impl FramePosition {
    /// Position as a percentage clamped to `[0, 100]`.
    pub fn percent(self) -> f64 {
        match self {
            Self::Named(NamedPosition::Top) => 0.0,
            Self::Named(NamedPosition::Center) => 50.0,
            Self::Named(NamedPosition::Bottom) => 100.0,
            Self::Percent(p) if p.is_finite() => p.clamp(0.0, 100.0),
            Self::Percent(_) => 50.0,
        }
    }
}

impl fmt::Display for FramePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(NamedPosition::Top) => f.write_str("top"),
            Self::Named(NamedPosition::Center) => f.write_str("center"),
            Self::Named(NamedPosition::Bottom) => f.write_str("bottom"),
            Self::Percent(p) => write!(f, "{p}%"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Per-device settings and overrides.
pub struct DeviceConfig {
    /// Output size for this device.
    #[serde(default)]
    pub resolution: Option<Canvas>,
    /// Device size relative to the fit-to-canvas scale.
    #[serde(default = "default_frame_scale")]
    pub frame_scale: f64,
    /// Vertical device position; derived from the caption when unset.
    #[serde(default)]
    pub frame_position: Option<FramePosition>,
    /// Let the device run off the canvas bottom.
    #[serde(default)]
    pub partial_frame: bool,
    /// Percent of the device height hidden below the canvas bottom when `partial_frame` is set.
    #[serde(default)]
    pub frame_offset: f64,
    /// Caption position override.
    #[serde(default)]
    pub caption_position: Option<CaptionPosition>,
    /// Caption font size override.
    #[serde(default)]
    pub caption_size: Option<f64>,
    /// Caption box override.
    #[serde(default)]
    pub caption_box: Option<CaptionBoxOverride>,
    /// Background override.
    #[serde(default)]
    pub background: Option<BackgroundOverride>,
    /// Device category, for screenshots the classifier cannot place.
    #[serde(default)]
    pub category: Option<DeviceCategory>,
    /// Preferred frame, by name or display name.
    #[serde(default)]
    pub frame: Option<String>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            resolution: None,
            frame_scale: DEFAULT_FRAME_SCALE,
            frame_position: None,
            partial_frame: false,
            frame_offset: 0.0,
            caption_position: None,
            caption_size: None,
            caption_box: None,
            background: None,
            category: None,
            frame: None,
        }
    }
}

impl DeviceConfig {
    /// Validate numeric fields.
    pub fn validate(&self) -> FrameshotResult<()> {
        if !self.frame_scale.is_finite() || self.frame_scale <= 0.0 || self.frame_scale > 1.0 {
            return Err(FrameshotError::validation(
                "device frameScale must be within (0, 1]",
            ));
        }
        if let Some(FramePosition::Percent(p)) = self.frame_position
            && (!p.is_finite() || !(0.0..=100.0).contains(&p))
        {
            return Err(FrameshotError::validation(
                "device framePosition percentage must be within [0, 100]",
            ));
        }
        if !self.frame_offset.is_finite() || !(0.0..100.0).contains(&self.frame_offset) {
            return Err(FrameshotError::validation(
                "device frameOffset must be within [0, 100)",
            ));
        }
        if let Some(size) = self.caption_size {
            crate::config::caption::positive("device captionSize", size)?;
        }
        if let Some(res) = self.resolution
            && (res.width == 0 || res.height == 0)
        {
            return Err(FrameshotError::validation("device resolution must be > 0"));
        }
        if let Some(ov) = &self.caption_box {
            for (name, value) in [
                ("device captionBox minHeight", ov.min_height),
                ("device captionBox maxHeight", ov.max_height),
                ("device captionBox marginTop", ov.margin_top),
                ("device captionBox marginBottom", ov.margin_bottom),
            ] {
                if let Some(v) = value {
                    non_negative(name, v)?;
                }
            }
        }
        Ok(())
    }
}

fn default_frame_scale() -> f64 {
    DEFAULT_FRAME_SCALE
}

#[cfg(test)]
#[path = "../../tests/unit/config/device.rs"]
mod tests;
