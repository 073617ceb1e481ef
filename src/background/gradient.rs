use rayon::prelude::*;

use crate::{
    assets::color::{Color, color_or_default},
    config::background::{GradientConfig, GradientDirection},
    foundation::core::Canvas,
    foundation::math::lerp_u8,
    render::surface::Surface,
};

/// Interpolation position of pixel `(x, y)` along `direction`, in `[0, 1)`.
pub fn gradient_t(direction: GradientDirection, x: u32, y: u32, width: u32, height: u32) -> f64 {
    let w = f64::from(width.max(1));
    let h = f64::from(height.max(1));
    let x = f64::from(x);
    let y = f64::from(y);
    match direction {
        GradientDirection::TopBottom => y / h,
        GradientDirection::BottomTop => (h - 1.0 - y).max(0.0) / h,
        GradientDirection::LeftRight => x / w,
        GradientDirection::RightLeft => (w - 1.0 - x).max(0.0) / w,
        GradientDirection::Diagonal => (x + y) / (w + h),
    }
}

/// First and last stops of a gradient; invalid colors fall back to black and white.
///
/// Intermediate stops are ignored.
pub fn gradient_endpoints(config: &GradientConfig) -> (Color, Color) {
    let first = color_or_default(
        config.colors.first().map(String::as_str),
        Color::BLACK,
        "background.gradient.colors[0]",
    );
    let last = color_or_default(
        config.colors.last().map(String::as_str),
        Color::WHITE,
        "background.gradient.colors[-1]",
    );
    if config.colors.len() > 2 {
        tracing::debug!(
            stops = config.colors.len(),
            "gradient blends its first and last stops only"
        );
    }
    (first, last)
}

/// Rasterize a two-stop linear gradient, one row per rayon task.
pub fn render_gradient(canvas: Canvas, from: Color, to: Color, direction: GradientDirection) -> Surface {
    let Canvas { width, height } = canvas;
    let mut surface = Surface::transparent(width, height);
    let row_len = (width as usize) * 4;
    if row_len == 0 {
        return surface;
    }
    surface
        .data
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as u32;
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let t = gradient_t(direction, x as u32, y, width, height);
                let c = Color::rgba(
                    lerp_u8(from.r, to.r, t),
                    lerp_u8(from.g, to.g, t),
                    lerp_u8(from.b, to.b, t),
                    lerp_u8(from.a, to.a, t),
                );
                px.copy_from_slice(&c.to_premul().to_array());
            }
        });
    surface
}

/// Render a configured gradient.
pub fn render_gradient_config(canvas: Canvas, config: &GradientConfig) -> Surface {
    let (from, to) = gradient_endpoints(config);
    render_gradient(canvas, from, to, config.direction)
}

#[cfg(test)]
#[path = "../../tests/unit/background/gradient.rs"]
mod tests;
