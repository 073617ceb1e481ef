use crate::foundation::error::{FrameshotError, FrameshotResult};

pub use kurbo::{Point, Rect, RoundedRect, Vec2};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> FrameshotResult<Self> {
        if width == 0 || height == 0 {
            return Err(FrameshotError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Orientation implied by the canvas dimensions.
    pub fn orientation(self) -> Orientation {
        Orientation::of(self.width, self.height)
    }

    /// Canvas with width and height exchanged.
    pub fn swapped(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Return a canvas whose orientation matches `orientation`, swapping axes when needed.
    pub fn oriented(self, orientation: Orientation) -> Self {
        if self.orientation() == orientation {
            self
        } else {
            self.swapped()
        }
    }

    /// Width divided by height.
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height.max(1))
    }

    /// Total pixel count.
    pub fn pixels(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Screen orientation derived from pixel dimensions.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Height is at least the width. Square inputs count as portrait.
    Portrait,
    /// Width exceeds height.
    Landscape,
}

impl Orientation {
    /// Orientation of a `width x height` image.
    pub fn of(width: u32, height: u32) -> Self {
        if width > height {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }

    /// Key used by the frame catalog (`Portrait` / `Landscape`).
    pub fn catalog_key(self) -> &'static str {
        match self {
            Self::Portrait => "Portrait",
            Self::Landscape => "Landscape",
        }
    }

    /// Parse a frame catalog orientation key.
    pub fn from_catalog_key(key: &str) -> Option<Self> {
        match key {
            "Portrait" => Some(Self::Portrait),
            "Landscape" => Some(Self::Landscape),
            _ => None,
        }
    }
}

/// Device family a screenshot belongs to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DeviceCategory {
    /// iPhone-class phones.
    Iphone,
    /// iPad-class tablets.
    Ipad,
    /// Mac desktops and laptops.
    Mac,
    /// Apple Watch.
    Watch,
}

impl DeviceCategory {
    /// All categories in catalog order.
    pub const ALL: [DeviceCategory; 4] = [Self::Iphone, Self::Ipad, Self::Mac, Self::Watch];

    /// Key used by the frame catalog (`iPhone`, `iPad`, `Mac`, `Watch`).
    pub fn catalog_key(self) -> &'static str {
        match self {
            Self::Iphone => "iPhone",
            Self::Ipad => "iPad",
            Self::Mac => "Mac",
            Self::Watch => "Watch",
        }
    }

    /// Parse a frame catalog category key.
    pub fn from_catalog_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.catalog_key() == key)
    }
}

impl std::fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Iphone => "iphone",
            Self::Ipad => "ipad",
            Self::Mac => "mac",
            Self::Watch => "watch",
        };
        f.write_str(s)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Pixel bytes in `[r, g, b, a]` order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
