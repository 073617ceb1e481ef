use crate::foundation::core::DeviceCategory;

const EPS: f64 = 1e-9;

/// One classification rule: an inclusive aspect band plus a pixel-count condition.
#[derive(Clone, Copy, Debug)]
struct Band {
    category: DeviceCategory,
    min_aspect: f64,
    max_aspect: f64,
    pixels: PixelBound,
}

#[derive(Clone, Copy, Debug)]
enum PixelBound {
    Below(u64),
    AtMost(u64),
    AtLeast(u64),
}

impl PixelBound {
    fn holds(self, pixels: u64) -> bool {
        match self {
            Self::Below(n) => pixels < n,
            Self::AtMost(n) => pixels <= n,
            Self::AtLeast(n) => pixels >= n,
        }
    }
}

/// Ordered; the first matching band wins.
const BANDS: [Band; 4] = [
    Band {
        category: DeviceCategory::Watch,
        min_aspect: 1.0,
        max_aspect: 1.3,
        pixels: PixelBound::Below(775_000),
    },
    Band {
        category: DeviceCategory::Iphone,
        min_aspect: 1.6,
        max_aspect: 2.4,
        pixels: PixelBound::AtMost(5_000_000),
    },
    Band {
        category: DeviceCategory::Ipad,
        min_aspect: 1.2,
        max_aspect: 1.4,
        pixels: PixelBound::AtLeast(1_500_000),
    },
    Band {
        category: DeviceCategory::Mac,
        min_aspect: 1.5,
        max_aspect: 1.85,
        pixels: PixelBound::AtLeast(2_000_000),
    },
];

/// Anything above this pixel count is treated as a Mac capture regardless of aspect.
const MAC_PIXEL_OVERRIDE: u64 = 8_000_000;

/// Guess the device family of a `width x height` screenshot.
///
/// Orientation does not matter: the aspect ratio is always long side over short side. Returns
/// `None` when no band matches, in which case the caller has to name the category explicitly.
pub fn classify_device_category(width: u32, height: u32) -> Option<DeviceCategory> {
    if width == 0 || height == 0 {
        return None;
    }
    let long = f64::from(width.max(height));
    let short = f64::from(width.min(height));
    let aspect = long / short;
    let pixels = u64::from(width) * u64::from(height);

    let hit = BANDS.iter().find(|band| {
        aspect >= band.min_aspect - EPS && aspect <= band.max_aspect + EPS && band.pixels.holds(pixels)
    });
    if let Some(band) = hit {
        return Some(band.category);
    }
    if pixels > MAC_PIXEL_OVERRIDE {
        return Some(DeviceCategory::Mac);
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/frames/classify.rs"]
mod tests;
