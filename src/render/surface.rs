use image::imageops::FilterType;

use crate::{
    effects::composite::{BlitParams, apply_coverage_in_place, blit_over_in_place},
    foundation::core::Rgba8Premul,
    foundation::error::{FrameshotError, FrameshotResult},
    foundation::math::{clamp_premul_in_place, premultiply_rgba8_in_place, unpremultiply_rgba8_in_place},
};

/// A raster layer as premultiplied RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl Surface {
    /// Fully transparent surface.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    /// Surface filled with a single premultiplied color.
    pub fn filled(width: u32, height: u32, color: Rgba8Premul) -> Self {
        Self {
            width,
            height,
            data: color
                .to_array()
                .repeat((width as usize) * (height as usize)),
        }
    }

    /// Wrap premultiplied bytes, checking the buffer length.
    pub fn from_premul(width: u32, height: u32, data: Vec<u8>) -> FrameshotResult<Self> {
        if data.len() != (width as usize) * (height as usize) * 4 {
            return Err(FrameshotError::validation(format!(
                "surface buffer length {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build from a straight-alpha image, premultiplying it.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut data = img.into_raw();
        premultiply_rgba8_in_place(&mut data);
        Self {
            width,
            height,
            data,
        }
    }

    /// Convert to a straight-alpha image.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let mut data = self.data.clone();
        unpremultiply_rgba8_in_place(&mut data);
        // Length is guaranteed by construction.
        image::RgbaImage::from_raw(self.width, self.height, data)
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Resample to exactly `width x height`.
    pub fn resized(&self, width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        if width == self.width && height == self.height {
            return self.clone();
        }
        let Some(src) = image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
        else {
            return Self::transparent(width, height);
        };
        // Filtering premultiplied data avoids dark fringes around transparent edges.
        let mut data = image::imageops::resize(&src, width, height, FilterType::Triangle).into_raw();
        clamp_premul_in_place(&mut data);
        Self {
            width,
            height,
            data,
        }
    }

    /// Copy out the `width x height` region starting at `(x, y)`, clipped to the surface.
    pub fn cropped(&self, x: u32, y: u32, width: u32, height: u32) -> Self {
        let x = x.min(self.width);
        let y = y.min(self.height);
        let width = width.min(self.width - x);
        let height = height.min(self.height - y);
        let mut out = Self::transparent(width, height);
        for row in 0..height {
            let s = (((y + row) as usize) * (self.width as usize) + x as usize) * 4;
            let d = (row as usize) * (width as usize) * 4;
            let n = (width as usize) * 4;
            out.data[d..d + n].copy_from_slice(&self.data[s..s + n]);
        }
        out
    }

    /// Source-over `src` at `(x, y)` with clipping.
    pub fn draw_over(&mut self, src: &Surface, x: i64, y: i64, opacity: f32) -> FrameshotResult<()> {
        blit_over_in_place(
            &mut self.data,
            &src.data,
            BlitParams {
                dst_width: self.width,
                dst_height: self.height,
                src_width: src.width,
                src_height: src.height,
                x,
                y,
                opacity,
            },
        )
    }

    /// Multiply pixels by a coverage mask of the same dimensions.
    pub fn apply_coverage(&mut self, coverage: &[u8]) -> FrameshotResult<()> {
        apply_coverage_in_place(&mut self.data, coverage)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
