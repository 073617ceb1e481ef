use crate::{
    assets::color::Color,
    config::background::FitMode,
    foundation::{core::Canvas, error::FrameshotResult},
    render::surface::Surface,
};

/// Relative aspect difference above which `warn_on_mismatch` complains.
pub const ASPECT_MISMATCH_TOLERANCE: f64 = 0.05;

/// True when the aspect ratios of `src` and `canvas` differ by more than 5%.
pub fn aspect_mismatch(src_width: u32, src_height: u32, canvas: Canvas) -> bool {
    let src = f64::from(src_width) / f64::from(src_height.max(1));
    let dst = canvas.aspect();
    ((src - dst) / dst).abs() > ASPECT_MISMATCH_TOLERANCE
}

/// Map a background image onto the canvas.
///
/// Uncovered areas (contain and scale-down) show `fill`. Fails on a surface whose buffer does not
/// match its dimensions.
pub fn fit_image(
    src: &Surface,
    canvas: Canvas,
    mode: FitMode,
    fill: Color,
    warn_on_mismatch: bool,
) -> FrameshotResult<Surface> {
    if warn_on_mismatch && aspect_mismatch(src.width, src.height, canvas) {
        tracing::warn!(
            image_width = src.width,
            image_height = src.height,
            canvas_width = canvas.width,
            canvas_height = canvas.height,
            "background image aspect ratio differs from the canvas by more than 5%"
        );
    }

    let (cw, ch) = (canvas.width, canvas.height);
    let sx = f64::from(cw) / f64::from(src.width.max(1));
    let sy = f64::from(ch) / f64::from(src.height.max(1));

    match mode {
        FitMode::Fill => Ok(src.resized(cw, ch)),
        FitMode::Cover => {
            let scale = sx.max(sy);
            let w = scaled_dim(src.width, scale).max(cw);
            let h = scaled_dim(src.height, scale).max(ch);
            let scaled = src.resized(w, h);
            Ok(scaled.cropped((w - cw) / 2, (h - ch) / 2, cw, ch))
        }
        FitMode::Contain => letterbox(src, canvas, sx.min(sy), fill),
        FitMode::ScaleDown => letterbox(src, canvas, sx.min(sy).min(1.0), fill),
    }
}

fn scaled_dim(v: u32, scale: f64) -> u32 {
    ((f64::from(v) * scale).round() as u32).max(1)
}

fn letterbox(src: &Surface, canvas: Canvas, scale: f64, fill: Color) -> FrameshotResult<Surface> {
    let w = scaled_dim(src.width, scale).min(canvas.width);
    let h = scaled_dim(src.height, scale).min(canvas.height);
    let scaled = src.resized(w, h);
    let mut out = Surface::filled(canvas.width, canvas.height, fill.to_premul());
    let x = i64::from((canvas.width - w) / 2);
    let y = i64::from((canvas.height - h) / 2);
    out.draw_over(&scaled, x, y, 1.0)?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/background/fit.rs"]
mod tests;
