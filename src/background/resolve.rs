use std::path::{Path, PathBuf};

use crate::{
    assets::color::{Color, color_or_default},
    assets::decode::decode_image_file,
    background::fit::fit_image,
    background::gradient::render_gradient_config,
    config::background::{
        BackgroundConfig, BackgroundFallback, BackgroundMode, BackgroundOverride, GradientConfig,
    },
    foundation::core::Canvas,
    render::surface::Surface,
};

/// File stem looked up next to the screenshot in `auto` mode.
pub const COLOCATED_STEM: &str = "background";
/// Extensions tried for the colocated background, in order.
pub const COLOCATED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Where an image candidate came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageOrigin {
    /// `background.*` next to the screenshot.
    Colocated,
    /// The device override's image.
    Device,
    /// The global image.
    Global,
}

/// One step of the background resolution chain.
#[derive(Clone, Debug, PartialEq)]
pub enum BackgroundSource {
    /// Decode and fit an image file.
    Image {
        /// Image path.
        path: PathBuf,
        /// Which setting produced it.
        origin: ImageOrigin,
    },
    /// Render a gradient.
    Gradient(GradientConfig),
    /// Flat fill; always succeeds.
    Solid(Color),
}

/// Background settings after device overrides, plus the ordered sources to try.
#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundPlan {
    /// Effective settings.
    pub config: BackgroundConfig,
    /// Sources in priority order; the last one is always [`BackgroundSource::Solid`].
    pub chain: Vec<BackgroundSource>,
}

impl BackgroundPlan {
    /// Fill color for the flat fallback and letterboxing.
    pub fn fill(&self) -> Color {
        color_or_default(self.config.color.as_deref(), Color::WHITE, "background.color")
    }
}

/// Build the background resolution chain.
///
/// `mode = gradient` renders the gradient outright. Otherwise: `mode = image` tries the device
/// image, `mode = auto` tries `background.{png,jpg,jpeg}` beside the screenshot and then the
/// device image; then the global image; then the gradient when `fallback = gradient`; then the
/// configured color, else white.
pub fn resolve_background_chain(
    global: &BackgroundConfig,
    device: Option<&BackgroundOverride>,
    screenshot_path: Option<&Path>,
) -> BackgroundPlan {
    let config = device.map_or_else(|| global.clone(), |ov| global.merged_with(ov));
    let fill = color_or_default(config.color.as_deref(), Color::WHITE, "background.color");
    let device_image = device.and_then(|d| d.image.clone());

    let mut chain = Vec::new();
    if config.mode == BackgroundMode::Gradient {
        match &config.gradient {
            Some(g) => chain.push(BackgroundSource::Gradient(g.clone())),
            None => tracing::warn!("background mode is 'gradient' but no gradient is configured"),
        }
    } else {
        if config.mode == BackgroundMode::Auto
            && let Some(path) = screenshot_path.and_then(colocated_background)
        {
            chain.push(BackgroundSource::Image {
                path,
                origin: ImageOrigin::Colocated,
            });
        }
        if let Some(path) = device_image {
            chain.push(BackgroundSource::Image {
                path,
                origin: ImageOrigin::Device,
            });
        }
        if let Some(path) = global.image.clone() {
            chain.push(BackgroundSource::Image {
                path,
                origin: ImageOrigin::Global,
            });
        }
        if config.fallback == Some(BackgroundFallback::Gradient) {
            match &config.gradient {
                Some(g) => chain.push(BackgroundSource::Gradient(g.clone())),
                None => tracing::warn!("background fallback is 'gradient' but no gradient is configured"),
            }
        }
    }
    chain.push(BackgroundSource::Solid(fill));

    tracing::debug!(?chain, "background chain resolved");
    BackgroundPlan { config, chain }
}

/// First existing `background.{png,jpg,jpeg}` in the screenshot's directory.
pub fn colocated_background(screenshot_path: &Path) -> Option<PathBuf> {
    let dir = screenshot_path.parent()?;
    COLOCATED_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{COLOCATED_STEM}.{ext}")))
        .find(|p| p.is_file())
}

/// Render the first source of `plan` that works. Never fails.
#[tracing::instrument(skip(plan))]
pub fn render_background(plan: &BackgroundPlan, canvas: Canvas) -> Surface {
    let fill = plan.fill();
    for source in &plan.chain {
        match source {
            BackgroundSource::Image { path, origin } => match decode_image_file(path) {
                Ok(img) => match fit_image(&img, canvas, plan.config.fit, fill, plan.config.warn_on_mismatch) {
                    Ok(fitted) => {
                        tracing::debug!(path = %path.display(), ?origin, "using background image");
                        return fitted;
                    }
                    Err(err) => {
                        tracing::warn!(path = %path.display(), ?origin, "background image could not be fitted, trying next source: {err}");
                    }
                },
                Err(err) => {
                    tracing::warn!(path = %path.display(), ?origin, "background image unusable, trying next source: {err}");
                }
            },
            BackgroundSource::Gradient(g) => {
                if g.colors.len() < 2 {
                    tracing::warn!(stops = g.colors.len(), "gradient needs at least 2 colors, trying next source");
                    continue;
                }
                return render_gradient_config(canvas, g);
            }
            BackgroundSource::Solid(color) => {
                return Surface::filled(canvas.width, canvas.height, color.to_premul());
            }
        }
    }
    Surface::filled(canvas.width, canvas.height, fill.to_premul())
}

#[cfg(test)]
#[path = "../../tests/unit/background/resolve.rs"]
mod tests;
