use crate::foundation::error::{FrameshotError, FrameshotResult};
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Placement of a source buffer over a larger destination buffer.
#[derive(Clone, Copy, Debug)]
pub struct BlitParams {
    pub dst_width: u32,
    pub dst_height: u32,
    pub src_width: u32,
    pub src_height: u32,
    /// Destination x of the source's top-left pixel; may be negative.
    pub x: i64,
    /// Destination y of the source's top-left pixel; may be negative.
    pub y: i64,
    pub opacity: f32,
}

/// Source-over `src` onto `dst` at an offset, clipping to the destination bounds.
pub fn blit_over_in_place(dst: &mut [u8], src: &[u8], params: BlitParams) -> FrameshotResult<()> {
    let BlitParams {
        dst_width,
        dst_height,
        src_width,
        src_height,
        x,
        y,
        opacity,
    } = params;
    let dst_len = (dst_width as usize) * (dst_height as usize) * 4;
    let src_len = (src_width as usize) * (src_height as usize) * 4;
    if dst.len() != dst_len || src.len() != src_len {
        return Err(FrameshotError::validation(
            "blit_over_in_place expects buffers matching width*height*4",
        ));
    }

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + i64::from(src_width)).min(i64::from(dst_width));
    let y1 = (y + i64::from(src_height)).min(i64::from(dst_height));
    if x0 >= x1 || y0 >= y1 {
        return Ok(());
    }

    for dy in y0..y1 {
        let sy = (dy - y) as usize;
        let d_row = (dy as usize) * (dst_width as usize);
        let s_row = sy * (src_width as usize);
        for dx in x0..x1 {
            let sx = (dx - x) as usize;
            let di = (d_row + dx as usize) * 4;
            let si = (s_row + sx) * 4;
            let out = over(
                [dst[di], dst[di + 1], dst[di + 2], dst[di + 3]],
                [src[si], src[si + 1], src[si + 2], src[si + 3]],
                opacity,
            );
            dst[di..di + 4].copy_from_slice(&out);
        }
    }
    Ok(())
}

/// Multiply every premultiplied pixel by a per-pixel coverage value.
pub fn apply_coverage_in_place(rgba: &mut [u8], coverage: &[u8]) -> FrameshotResult<()> {
    if rgba.len() != coverage.len() * 4 {
        return Err(FrameshotError::validation(
            "apply_coverage_in_place expects one coverage byte per pixel",
        ));
    }
    for (px, &c) in rgba.chunks_exact_mut(4).zip(coverage) {
        if c == 255 {
            continue;
        }
        let c = u16::from(c);
        for ch in px.iter_mut() {
            *ch = mul_div255_u8(u16::from(*ch), c);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
