use std::path::PathBuf;

use crate::{
    assets::color::Color,
    foundation::error::{FrameshotError, FrameshotResult},
};

/// Which background source is tried first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundMode {
    /// The configured image.
    Image,
    /// The configured gradient.
    Gradient,
    /// A `background.{png,jpg,jpeg}` next to the screenshot.
    #[default]
    Auto,
}

/// Axis along which a gradient runs, from the first color to the last.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientDirection {
    /// First color at the top.
    #[default]
    TopBottom,
    /// First color at the bottom.
    BottomTop,
    /// First color on the left.
    LeftRight,
    /// First color on the right.
    RightLeft,
    /// First color in the top-left corner.
    Diagonal,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Linear gradient definition.
pub struct GradientConfig {
    /// Color stops; at least two. Only the first and last are blended.
    pub colors: Vec<String>,
    /// Gradient axis.
    #[serde(default)]
    pub direction: GradientDirection,
}

/// How a background image is mapped onto the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitMode {
    /// Scale to fill, cropping the overflow.
    #[default]
    Cover,
    /// Scale to fit inside, letterboxing over the fill color.
    Contain,
    /// Stretch to the canvas, ignoring aspect.
    Fill,
    /// Like contain, but never enlarge.
    ScaleDown,
}

/// Last resort before the flat color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundFallback {
    /// Render the configured gradient.
    Gradient,
    /// Go straight to the flat color.
    Solid,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Background settings.
pub struct BackgroundConfig {
    /// Preferred source.
    #[serde(default)]
    pub mode: BackgroundMode,
    /// Background image path.
    #[serde(default)]
    pub image: Option<PathBuf>,
    /// Gradient definition.
    #[serde(default)]
    pub gradient: Option<GradientConfig>,
    /// Image fit.
    #[serde(default)]
    pub fit: FitMode,
    /// What to try after the images.
    #[serde(default)]
    pub fallback: Option<BackgroundFallback>,
    /// Flat color used last and for letterboxing.
    #[serde(default)]
    pub color: Option<String>,
    /// Warn when the image aspect differs from the canvas by more than 5%.
    #[serde(default)]
    pub warn_on_mismatch: bool,
}

/// Per-device partial override of [`BackgroundConfig`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundOverride {
    /// See [`BackgroundConfig::mode`].
    #[serde(default)]
    pub mode: Option<BackgroundMode>,
    /// Device-specific image.
    #[serde(default)]
    pub image: Option<PathBuf>,
    /// See [`BackgroundConfig::gradient`].
    #[serde(default)]
    pub gradient: Option<GradientConfig>,
    /// See [`BackgroundConfig::fit`].
    #[serde(default)]
    pub fit: Option<FitMode>,
    /// See [`BackgroundConfig::fallback`].
    #[serde(default)]
    pub fallback: Option<BackgroundFallback>,
    /// See [`BackgroundConfig::color`].
    #[serde(default)]
    pub color: Option<String>,
    /// See [`BackgroundConfig::warn_on_mismatch`].
    #[serde(default)]
    pub warn_on_mismatch: Option<bool>,
}

impl BackgroundConfig {
    /// Flat background color that always works.
    pub fn solid(color: impl Into<String>) -> Self {
        Self {
            mode: BackgroundMode::Image,
            color: Some(color.into()),
            ..Self::default()
        }
    }

    /// Gradient-only background.
    pub fn gradient(colors: &[&str], direction: GradientDirection) -> Self {
        Self {
            mode: BackgroundMode::Gradient,
            gradient: Some(GradientConfig {
                colors: colors.iter().map(|c| (*c).to_owned()).collect(),
                direction,
            }),
            ..Self::default()
        }
    }

    /// Effective settings with a device override applied. The device image, when set, replaces
    /// the global one here; the resolution chain still sees both.
    pub fn merged_with(&self, ov: &BackgroundOverride) -> Self {
        Self {
            mode: ov.mode.unwrap_or(self.mode),
            image: ov.image.clone().or_else(|| self.image.clone()),
            gradient: ov.gradient.clone().or_else(|| self.gradient.clone()),
            fit: ov.fit.unwrap_or(self.fit),
            fallback: ov.fallback.or(self.fallback),
            color: ov.color.clone().or_else(|| self.color.clone()),
            warn_on_mismatch: ov.warn_on_mismatch.unwrap_or(self.warn_on_mismatch),
        }
    }

    /// Validate the gradient and color strings.
    pub fn validate(&self) -> FrameshotResult<()> {
        if let Some(g) = &self.gradient {
            if g.colors.len() < 2 {
                return Err(FrameshotError::validation(
                    "background gradient needs at least 2 colors",
                ));
            }
            for c in &g.colors {
                Color::parse(c).map_err(|e| {
                    FrameshotError::validation(format!("background gradient color: {e}"))
                })?;
            }
        }
        if let Some(c) = &self.color {
            Color::parse(c)
                .map_err(|e| FrameshotError::validation(format!("background color: {e}")))?;
        }
        if self.mode == BackgroundMode::Gradient && self.gradient.is_none() {
            return Err(FrameshotError::validation(
                "background mode 'gradient' requires a gradient",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/background.rs"]
mod tests;
