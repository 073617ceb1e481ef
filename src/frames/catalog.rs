use crate::foundation::core::{DeviceCategory, Orientation, Rect};

/// Smallest share of the frame area the screen rectangle may cover.
pub const MIN_SCREEN_AREA_RATIO: f64 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Screen opening inside a bezel image, in frame pixels.
pub struct ScreenRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl ScreenRect {
    /// Width divided by height.
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height.max(1))
    }

    /// Area in square pixels.
    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// As a kurbo rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.x) + f64::from(self.width),
            f64::from(self.y) + f64::from(self.height),
        )
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Metadata of one device bezel.
pub struct DeviceFrame {
    /// Stable identifier, unique within the catalog.
    pub name: String,
    /// Human-readable device name.
    pub display_name: String,
    /// Device family.
    pub category: DeviceCategory,
    /// Orientation of the bezel artwork.
    pub orientation: Orientation,
    /// Bezel image width.
    pub frame_width: u32,
    /// Bezel image height.
    pub frame_height: u32,
    /// Where the screenshot goes inside the bezel.
    pub screen_rect: ScreenRect,
    /// Mask image file, relative to the frames directory.
    pub mask: Option<String>,
    /// Bezel image file, relative to the frames directory.
    pub file: String,
}

impl DeviceFrame {
    /// Check that the screen rectangle lies inside the frame and covers enough of it.
    pub fn check_screen_rect(&self) -> Result<(), String> {
        let r = self.screen_rect;
        if self.frame_width == 0 || self.frame_height == 0 {
            return Err("frame dimensions must be > 0".to_owned());
        }
        if r.width == 0 || r.height == 0 {
            return Err("screen rect must have a non-zero size".to_owned());
        }
        let right = u64::from(r.x) + u64::from(r.width);
        let bottom = u64::from(r.y) + u64::from(r.height);
        if right > u64::from(self.frame_width) || bottom > u64::from(self.frame_height) {
            return Err(format!(
                "screen rect {}x{}+{}+{} exceeds frame {}x{}",
                r.width, r.height, r.x, r.y, self.frame_width, self.frame_height
            ));
        }
        let frame_area = u64::from(self.frame_width) * u64::from(self.frame_height);
        let ratio = (r.area() as f64) / (frame_area as f64);
        if ratio < MIN_SCREEN_AREA_RATIO {
            return Err(format!(
                "screen rect covers {:.1}% of the frame (minimum {:.0}%)",
                ratio * 100.0,
                MIN_SCREEN_AREA_RATIO * 100.0
            ));
        }
        Ok(())
    }
}

/// One entry as written in the catalog JSON.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CatalogEntry {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub file: String,
    pub frame_width: u32,
    pub frame_height: u32,
    pub screen: ScreenRect,
    #[serde(default)]
    pub mask: Option<String>,
}

impl CatalogEntry {
    pub(crate) fn into_frame(self, category: DeviceCategory, orientation: Orientation) -> DeviceFrame {
        DeviceFrame {
            display_name: self.display_name.unwrap_or_else(|| self.name.clone()),
            name: self.name,
            category,
            orientation,
            frame_width: self.frame_width,
            frame_height: self.frame_height,
            screen_rect: self.screen,
            mask: self.mask.filter(|m| !m.trim().is_empty()),
            file: self.file,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/catalog.rs"]
mod tests;
