use std::path::Path;

use crate::{
    foundation::core::Canvas,
    foundation::error::{FrameshotError, FrameshotResult},
    render::surface::Surface,
};

/// Decode encoded image bytes (PNG, JPEG, ...) into a premultiplied surface.
pub fn decode_image(bytes: &[u8]) -> FrameshotResult<Surface> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| FrameshotError::decode(format!("decode image from memory: {e}")))?;
    Ok(Surface::from_rgba_image(dyn_img.to_rgba8()))
}

/// Read and decode an image file.
pub fn decode_image_file(path: &Path) -> FrameshotResult<Surface> {
    let bytes = std::fs::read(path).map_err(|e| {
        FrameshotError::decode(format!("read image '{}': {e}", path.display()))
    })?;
    decode_image(&bytes)
}

/// Pixel dimensions of an image file, reading only its header.
pub fn image_dimensions(path: &Path) -> FrameshotResult<Canvas> {
    let (width, height) = image::image_dimensions(path).map_err(|e| {
        FrameshotError::decode(format!("read dimensions of '{}': {e}", path.display()))
    })?;
    Canvas::new(width, height)
}

/// Decode a mask image into one coverage byte per pixel.
///
/// Masks with any transparency use their alpha channel; fully opaque masks use luminance, so
/// both "white on transparent" and "white on black" masks work.
pub fn decode_mask(bytes: &[u8]) -> FrameshotResult<image::GrayImage> {
    let rgba = image::load_from_memory(bytes)
        .map_err(|e| FrameshotError::decode(format!("decode mask from memory: {e}")))?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    let has_alpha = rgba.pixels().any(|p| p.0[3] != 255);
    let coverage = rgba
        .pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            if has_alpha {
                a
            } else {
                ((u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114 + 500) / 1000) as u8
            }
        })
        .collect::<Vec<u8>>();
    image::GrayImage::from_raw(width, height, coverage)
        .ok_or_else(|| FrameshotError::decode("mask buffer size mismatch"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
