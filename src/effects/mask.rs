use image::imageops::FilterType;
use kurbo::Shape;

use crate::{
    foundation::core::{Point, RoundedRect},
    frames::catalog::DeviceFrame,
};

/// Screen corner radius used for iPhone frames without a mask, relative to the screen width.
pub const IPHONE_SCREEN_CORNER_RATIO: f64 = 0.12;

const SUBSAMPLES: [(f64, f64); 4] = [(0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75)];

/// Coverage of a `width x height` rounded rectangle, one byte per pixel.
///
/// Only pixels touching a corner square are sampled (2x2 per pixel); the rest are fully covered.
pub fn rounded_rect_coverage(width: u32, height: u32, radius: f64) -> Vec<u8> {
    let (w, h) = (f64::from(width), f64::from(height));
    let r = radius.max(0.0).min(w / 2.0).min(h / 2.0);
    let mut out = vec![255u8; (width as usize) * (height as usize)];
    if r <= 0.0 {
        return out;
    }
    let shape = RoundedRect::new(0.0, 0.0, w, h, r);

    for y in 0..height {
        let py = f64::from(y);
        if py >= r && py + 1.0 <= h - r {
            continue;
        }
        for x in 0..width {
            let px = f64::from(x);
            if px >= r && px + 1.0 <= w - r {
                continue;
            }
            let hits = SUBSAMPLES
                .iter()
                .filter(|(dx, dy)| shape.contains(Point::new(px + dx, py + dy)))
                .count();
            out[(y as usize) * (width as usize) + x as usize] = (hits * 255 / SUBSAMPLES.len()) as u8;
        }
    }
    out
}

/// Coverage for the screen area of `frame`, resampled to `width x height`.
///
/// A mask the size of the whole bezel is cropped to the screen rectangle first; any other mask
/// is taken to describe the screen alone.
pub fn screen_mask_coverage(
    mask: &image::GrayImage,
    frame: &DeviceFrame,
    width: u32,
    height: u32,
) -> Vec<u8> {
    let region = if mask.dimensions() == (frame.frame_width, frame.frame_height) {
        let s = frame.screen_rect;
        image::imageops::crop_imm(mask, s.x, s.y, s.width, s.height).to_image()
    } else {
        mask.clone()
    };
    if region.dimensions() == (width, height) {
        return region.into_raw();
    }
    image::imageops::resize(&region, width.max(1), height.max(1), FilterType::Triangle).into_raw()
}

#[cfg(test)]
#[path = "../../tests/unit/effects/mask.rs"]
mod tests;
