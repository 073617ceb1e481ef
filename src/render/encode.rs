use std::io::Cursor;

use crate::{
    foundation::error::{FrameshotError, FrameshotResult},
    render::surface::Surface,
};

/// Default JPEG quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Encoded output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum OutputFormat {
    /// Lossless PNG with alpha.
    #[default]
    Png,
    /// Baseline JPEG; alpha is dropped.
    Jpeg {
        /// Quality in `1..=100`.
        #[serde(default = "default_jpeg_quality")]
        quality: u8,
    },
}

impl OutputFormat {
    /// JPEG at the default quality.
    pub fn jpeg() -> Self {
        Self::Jpeg {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg { .. } => "jpg",
        }
    }
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

/// Encode a premultiplied surface.
pub fn encode_surface(surface: &Surface, format: OutputFormat) -> FrameshotResult<Vec<u8>> {
    let rgba = surface.to_rgba_image();
    match format {
        OutputFormat::Png => {
            let mut out = Vec::new();
            image::DynamicImage::ImageRgba8(rgba)
                .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
                .map_err(|e| FrameshotError::encode(format!("png encoding failed: {e}")))?;
            Ok(out)
        }
        OutputFormat::Jpeg { quality } => {
            let rgb = image::DynamicImage::ImageRgba8(rgba).to_rgb8();
            let mut out = Vec::new();
            let mut encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100));
            encoder
                .encode(
                    rgb.as_raw(),
                    surface.width,
                    surface.height,
                    image::ExtendedColorType::Rgb8,
                )
                .map_err(|e| FrameshotError::encode(format!("jpeg encoding failed: {e}")))?;
            Ok(out)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/encode.rs"]
mod tests;
