use std::path::Path;

use crate::{
    assets::decode::image_dimensions,
    foundation::core::{Canvas, DeviceCategory, Orientation},
    foundation::error::FrameshotResult,
    frames::catalog::DeviceFrame,
    frames::classify::classify_device_category,
    frames::registry::{FrameRegistry, frame_matches},
};

/// Outcome of frame selection.
///
/// `metadata` is `None` when no frame qualifies. The byte buffers hold the encoded bezel and mask
/// images and stay empty in dry-run mode or when a file could not be read.
#[derive(Clone, Debug, Default)]
pub struct FrameSelection {
    /// Chosen frame.
    pub metadata: Option<DeviceFrame>,
    /// Encoded bezel image.
    pub frame_bytes: Option<Vec<u8>>,
    /// Encoded mask image.
    pub mask_bytes: Option<Vec<u8>>,
}

/// Choose a frame for the screenshot at `screenshot_path`.
///
/// Only the image header is read. The category is `category` when given, otherwise the
/// classifier's guess; an unclassified screenshot gets no frame. Frame and mask files are loaded
/// from `frames_dir` unless `dry_run` is set.
#[tracing::instrument(skip(registry), fields(screenshot = %screenshot_path.display()))]
pub fn select_frame(
    registry: &FrameRegistry,
    screenshot_path: &Path,
    frames_dir: &Path,
    category: Option<DeviceCategory>,
    preferred_frame: Option<&str>,
    dry_run: bool,
) -> FrameshotResult<FrameSelection> {
    let dims = image_dimensions(screenshot_path)?;
    let Some(frame) = pick_frame(registry, dims, category, preferred_frame) else {
        return Ok(FrameSelection::default());
    };
    if dry_run {
        return Ok(FrameSelection {
            metadata: Some(frame.clone()),
            ..FrameSelection::default()
        });
    }

    let frame_bytes = read_optional(&frames_dir.join(&frame.file), "frame");
    let mask_bytes = frame
        .mask
        .as_ref()
        .and_then(|mask| read_optional(&frames_dir.join(mask), "mask"));
    Ok(FrameSelection {
        metadata: Some(frame.clone()),
        frame_bytes,
        mask_bytes,
    })
}

/// Pure part of [`select_frame`]: pick metadata for a screenshot of the given size.
pub fn pick_frame<'a>(
    registry: &'a FrameRegistry,
    screenshot: Canvas,
    category: Option<DeviceCategory>,
    preferred_frame: Option<&str>,
) -> Option<&'a DeviceFrame> {
    let orientation = Orientation::of(screenshot.width, screenshot.height);
    let Some(category) =
        category.or_else(|| classify_device_category(screenshot.width, screenshot.height))
    else {
        tracing::warn!(
            width = screenshot.width,
            height = screenshot.height,
            "screenshot size matches no device category, continuing without a frame"
        );
        return None;
    };

    let candidates = registry.frames(category, orientation);
    if candidates.is_empty() {
        tracing::warn!(
            category = %category,
            orientation = orientation.catalog_key(),
            "no frames in catalog for this device, continuing without a frame"
        );
        return None;
    }

    if let Some(preferred) = preferred_frame {
        if let Some(hit) = candidates.iter().find(|f| frame_matches(f, preferred)) {
            return Some(hit);
        }
        tracing::warn!(
            preferred,
            category = %category,
            orientation = orientation.catalog_key(),
            "preferred frame not available, choosing by aspect ratio"
        );
    }

    let target = screenshot.aspect();
    let mut best: Option<(&DeviceFrame, f64)> = None;
    for frame in candidates {
        let delta = (frame.screen_rect.aspect() - target).abs();
        // Strict comparison keeps the earliest entry on ties.
        if best.is_none_or(|(_, d)| delta < d) {
            best = Some((frame, delta));
        }
    }
    let chosen = best.map(|(f, _)| f);
    if let Some(f) = chosen {
        tracing::debug!(frame = %f.name, "selected frame by aspect ratio");
    }
    chosen
}

fn read_optional(path: &Path, what: &str) -> Option<Vec<u8>> {
    match std::fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            tracing::warn!(path = %path.display(), "cannot read {what} image: {err}");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/select.rs"]
mod tests;
