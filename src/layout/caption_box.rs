use crate::{
    config::caption::{CaptionConfig, CaptionPosition},
    config::device::FramePosition,
    foundation::core::{Canvas, Rect},
    text::wrap::wrap_text,
};

/// Default gap between the caption box and the device.
pub const DEFAULT_CAPTION_GAP: f64 = 40.0;
/// The device may move by at most this share of the canvas height to make room for a caption.
pub const MAX_DEVICE_NUDGE: f64 = 0.1;
/// Auto-sizing never shrinks the font below this share of the configured size.
pub const MIN_FONT_SCALE: f64 = 0.5;

const EPS: f64 = 1e-6;

/// Inputs to [`caption_height`] besides the text itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptionHeightOptions {
    /// Lower bound on the result.
    pub min_height: Option<f64>,
    /// Upper bound on the result. Wins over `min_height` when they conflict.
    pub max_height: Option<f64>,
    /// Line height as a multiple of the font size.
    pub line_height: f64,
    /// Maximum wrapped lines.
    pub max_lines: usize,
    /// Added once to the text block height (panel padding, top plus bottom).
    pub vertical_padding: f64,
}

impl Default for CaptionHeightOptions {
    fn default() -> Self {
        Self {
            min_height: None,
            max_height: None,
            line_height: 1.2,
            max_lines: 3,
            vertical_padding: 0.0,
        }
    }
}

impl CaptionHeightOptions {
    /// Options implied by a caption configuration.
    pub fn from_config(config: &CaptionConfig) -> Self {
        Self {
            min_height: config.caption_box.min_height,
            max_height: config.caption_box.max_height,
            line_height: config.caption_box.line_height,
            max_lines: config.caption_box.max_lines,
            vertical_padding: 2.0 * config.background.as_ref().map_or(0.0, |b| b.padding),
        }
    }

    fn clamp(&self, height: f64) -> f64 {
        let mut h = height;
        if let Some(min) = self.min_height {
            h = h.max(min);
        }
        if let Some(max) = self.max_height {
            h = h.min(max);
        }
        h
    }
}

/// Height of the caption box for `text` wrapped into `width` pixels.
///
/// `lines * font_size * line_height + vertical_padding`, clamped into the optional bounds.
pub fn caption_height(text: &str, font_size: f64, width: f64, opts: &CaptionHeightOptions) -> f64 {
    let lines = wrap_text(text, width, font_size, opts.max_lines);
    opts.clamp(block_height(lines.len(), font_size, opts))
}

fn block_height(lines: usize, font_size: f64, opts: &CaptionHeightOptions) -> f64 {
    (lines as f64) * font_size * opts.line_height + opts.vertical_padding
}

/// Wrapped caption text with its final font size and box height.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionBlock {
    /// Wrapped lines, as they will be drawn.
    pub lines: Vec<String>,
    /// Font size after any shrinking.
    pub font_size: f64,
    /// Box height including vertical padding.
    pub height: f64,
}

fn natural_block(text: &str, font_size: f64, width: f64, opts: &CaptionHeightOptions) -> CaptionBlock {
    let lines = wrap_text(text, width, font_size, opts.max_lines);
    let height = opts.clamp(block_height(lines.len(), font_size, opts));
    CaptionBlock {
        lines,
        font_size,
        height,
    }
}

/// Fit `text` into a box of at most `budget` pixels height.
///
/// Tries the full line allowance first, then fewer lines, then a single line with a smaller font
/// (down to [`MIN_FONT_SCALE`]). `None` when nothing fits.
fn fit_block(
    text: &str,
    font_size: f64,
    width: f64,
    budget: f64,
    opts: &CaptionHeightOptions,
) -> Option<CaptionBlock> {
    let natural = natural_block(text, font_size, width, opts);
    if natural.lines.is_empty() {
        return None;
    }
    if natural.height <= budget + EPS {
        return Some(natural);
    }

    let text_budget = budget - opts.vertical_padding;
    if !text_budget.is_finite() || text_budget <= 0.0 {
        return None;
    }
    let line_px = font_size * opts.line_height;
    let fit_lines = ((text_budget + EPS) / line_px).floor() as usize;
    if fit_lines >= 1 {
        let lines = wrap_text(text, width, font_size, fit_lines.min(opts.max_lines));
        let raw = block_height(lines.len(), font_size, opts);
        let height = opts.clamp(raw).min(budget).max(raw);
        return Some(CaptionBlock {
            lines,
            font_size,
            height,
        });
    }

    let shrunk = text_budget / opts.line_height;
    if shrunk < font_size * MIN_FONT_SCALE {
        return None;
    }
    let lines = wrap_text(text, width, shrunk, 1);
    let height = block_height(lines.len(), shrunk, opts);
    Some(CaptionBlock {
        lines,
        font_size: shrunk,
        height,
    })
}

/// Caption block sized to the space left next to a device.
///
/// `position` is the device's vertical position. At under 50% the device sits high and the
/// caption uses the gap below it; above 50% it uses the gap above; at exactly 50% the larger gap
/// wins. The text is re-wrapped with fewer lines, or a smaller font, until it fits that gap.
/// Returns `None` when it cannot fit even at the minimum font scale.
#[allow(clippy::too_many_arguments)]
pub fn adaptive_caption_height(
    text: &str,
    font_size: f64,
    canvas: Canvas,
    text_width: f64,
    device_top: f64,
    device_height: f64,
    position: FramePosition,
    opts: &CaptionHeightOptions,
) -> Option<CaptionBlock> {
    let canvas_h = f64::from(canvas.height);
    let gap_above = device_top.max(0.0);
    let gap_below = (canvas_h - (device_top + device_height)).max(0.0);
    let p = position.percent();
    let available = if p < 50.0 {
        gap_below
    } else if p > 50.0 {
        gap_above
    } else {
        gap_above.max(gap_below)
    };
    fit_block(text, font_size, text_width, available, opts)
}

/// Geometry recorded for every caption layout decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutDebugInfo {
    /// Layout mode.
    pub mode: CaptionPosition,
    /// Device top on the canvas, after any nudge.
    pub device_top: f64,
    /// Device bottom on the canvas, after any nudge.
    pub device_bottom: f64,
    /// Top of the caption box including its stroke.
    pub caption_top: f64,
    /// Height of the caption box including its stroke.
    pub caption_height: f64,
    /// Bottom of the caption panel, excluding its stroke.
    pub rect_bottom: f64,
    /// Space between the stroked caption box and the canvas bottom.
    pub bottom_spacing: f64,
}

/// Receives caption layout diagnostics.
pub trait LayoutObserver: Send + Sync {
    /// Called once per laid-out caption.
    fn on_layout(&self, info: &LayoutDebugInfo);
}

impl<F> LayoutObserver for F
where
    F: Fn(&LayoutDebugInfo) + Send + Sync,
{
    fn on_layout(&self, info: &LayoutDebugInfo) {
        self(info)
    }
}

/// Where a caption ended up.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionLayout {
    /// Caption panel on the canvas, excluding the stroke.
    pub rect: Rect,
    /// Wrapped lines to draw.
    pub lines: Vec<String>,
    /// Font size to draw them at.
    pub font_size: f64,
    /// Line advance in pixels.
    pub line_advance: f64,
    /// Inner padding between panel edge and text.
    pub inner_padding: f64,
    /// Vertical distance the device has to move (positive is down).
    pub device_shift: f64,
    /// Diagnostics.
    pub debug: LayoutDebugInfo,
}

impl CaptionLayout {
    /// Panel rectangle grown by half the stroke width on every side.
    pub fn outer_rect(&self, stroke_width: f64) -> Rect {
        self.rect.inflate(stroke_width / 2.0, stroke_width / 2.0)
    }
}

/// Everything [`layout_caption_box`] needs to know about the scene.
#[derive(Clone, Copy, Debug)]
pub struct CaptionLayoutRequest<'a> {
    /// Caption text; blank text produces no layout.
    pub text: &'a str,
    /// Effective caption configuration.
    pub config: &'a CaptionConfig,
    /// Output canvas.
    pub canvas: Canvas,
    /// Device top on the canvas.
    pub device_top: f64,
    /// Device height on the canvas.
    pub device_height: f64,
}

/// Horizontal extent and text width of the caption box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptionColumn {
    /// Left edge of the panel.
    pub x: f64,
    /// Panel width.
    pub width: f64,
    /// Width available to the text.
    pub text_width: f64,
    /// Inner padding.
    pub padding: f64,
}

impl CaptionColumn {
    /// Column implied by `config` on a canvas `canvas_width` pixels wide.
    ///
    /// With a panel the box spans the canvas minus the side margins and the text is inset by
    /// the panel padding; without one the box spans the canvas minus the side padding.
    pub fn for_config(config: &CaptionConfig, canvas_width: f64) -> Self {
        let (inset, padding) = match &config.background {
            Some(bg) => (bg.side_margin.max(0.0), bg.padding.max(0.0)),
            None => (config.padding_sides.max(0.0), 0.0),
        };
        let width = (canvas_width - 2.0 * inset).max(1.0);
        Self {
            x: (canvas_width - width) / 2.0,
            width,
            text_width: (width - 2.0 * padding).max(1.0),
            padding,
        }
    }
}

/// Natural caption block for `config`, used to reserve room before the device is placed.
pub fn estimate_caption_block(text: &str, config: &CaptionConfig, canvas: Canvas) -> Option<CaptionBlock> {
    let column = CaptionColumn::for_config(config, f64::from(canvas.width));
    let opts = CaptionHeightOptions::from_config(config);
    let block = natural_block(text, config.font_size, column.text_width, &opts);
    (!block.lines.is_empty()).then_some(block)
}

/// Vertical margins of the caption box for `config` in its position mode, as `(top, bottom)`.
///
/// The side facing the device defaults to [`DEFAULT_CAPTION_GAP`]; the side facing the canvas
/// edge defaults to the matching caption padding.
pub fn caption_margins(config: &CaptionConfig) -> (f64, f64) {
    let b = &config.caption_box;
    let (top, bottom) = match config.position {
        CaptionPosition::Above => (
            b.margin_top.unwrap_or(config.padding_top),
            b.margin_bottom.unwrap_or(DEFAULT_CAPTION_GAP),
        ),
        CaptionPosition::Below => (
            b.margin_top.unwrap_or(DEFAULT_CAPTION_GAP),
            b.margin_bottom.unwrap_or(config.padding_bottom),
        ),
        CaptionPosition::Overlay => (
            b.margin_top.unwrap_or(0.0),
            b.margin_bottom.unwrap_or(config.padding_bottom),
        ),
    };
    (top.max(0.0), bottom.max(0.0))
}

/// Place the caption box relative to the device.
///
/// * `above`: the box ends `margin_bottom` above the device and should start no higher than
///   `margin_top`. Without room the device moves down by up to [`MAX_DEVICE_NUDGE`] of the canvas
///   height, then the text is re-fitted.
/// * `below`: the box starts `margin_top` below the device, keeping `margin_bottom` free at the
///   canvas bottom, with the mirrored upward nudge. The box never starts above the device bottom.
/// * `overlay`: the stroked box ends `margin_bottom` (or `padding_bottom`) above the canvas bottom.
///
/// The stroked box always stays inside the canvas vertically. The margin facing the canvas edge
/// is enforced only with `auto_size`, and is dropped for a second attempt when the caption does
/// not fit within it. Returns `None`, with a warning, for blank text or a caption that cannot fit
/// inside the canvas at all.
#[tracing::instrument(skip_all, fields(mode = req.config.position.as_str()))]
pub fn layout_caption_box(
    req: &CaptionLayoutRequest<'_>,
    observer: Option<&dyn LayoutObserver>,
) -> Option<CaptionLayout> {
    let config = req.config;
    if req.text.trim().is_empty() {
        tracing::warn!("empty caption, skipping");
        return None;
    }

    let canvas_h = f64::from(req.canvas.height);
    let stroke = config.stroke_width();
    let half = stroke / 2.0;
    let column = CaptionColumn::for_config(config, f64::from(req.canvas.width));
    let opts = CaptionHeightOptions::from_config(config);
    let (margin_top, margin_bottom) = caption_margins(config);
    let auto = config.caption_box.auto_size;
    let max_nudge = MAX_DEVICE_NUDGE * canvas_h;
    let natural = natural_block(req.text, config.font_size, column.text_width, &opts);

    // `edge` is the margin kept free against the canvas edge opposite the device.
    let attempt = |edge: f64| -> Option<(f64, f64, CaptionBlock)> {
        match config.position {
            CaptionPosition::Above => {
                let budget = |device_top: f64| device_top - margin_bottom - stroke - edge;
                let shortfall = natural.height - budget(req.device_top);
                let shift = if shortfall > 0.0 { shortfall.min(max_nudge) } else { 0.0 };
                let device_top = req.device_top + shift;
                fit_block(req.text, config.font_size, column.text_width, budget(device_top), &opts)
                    .map(|block| {
                        let rect_bottom = device_top - margin_bottom - half;
                        (shift, rect_bottom - block.height, block)
                    })
            }
            CaptionPosition::Below => {
                let budget =
                    |device_bottom: f64| canvas_h - edge - device_bottom - margin_top - stroke;
                let shortfall = natural.height - budget(req.device_top + req.device_height);
                let shift = if shortfall > 0.0 { -shortfall.min(max_nudge) } else { 0.0 };
                let device_bottom = req.device_top + shift + req.device_height;
                fit_block(req.text, config.font_size, column.text_width, budget(device_bottom), &opts)
                    .map(|block| (shift, device_bottom + margin_top + half, block))
            }
            CaptionPosition::Overlay => {
                let rect_bottom = canvas_h - (margin_bottom + half);
                let budget = rect_bottom - half - edge;
                fit_block(req.text, config.font_size, column.text_width, budget, &opts)
                    .map(|block| (0.0, rect_bottom - block.height, block))
            }
        }
    };

    let edge = match (auto, config.position) {
        (false, _) => 0.0,
        (true, CaptionPosition::Above | CaptionPosition::Overlay) => margin_top,
        (true, CaptionPosition::Below) => margin_bottom,
    };
    let placed = attempt(edge).or_else(|| {
        if edge <= 0.0 {
            return None;
        }
        tracing::debug!(edge, "caption does not fit inside its margins, retrying without them");
        attempt(0.0)
    });

    let Some((device_shift, rect_top, block)) = placed else {
        tracing::warn!(
            canvas_height = canvas_h,
            device_top = req.device_top,
            device_height = req.device_height,
            "caption does not fit next to the device, skipping"
        );
        return None;
    };

    // Keep the stroked box within [0, canvas_h].
    let rect_top = rect_top.max(half);
    let rect_bottom = (rect_top + block.height).min(canvas_h - half);
    let rect = Rect::new(column.x, rect_top, column.x + column.width, rect_bottom);

    let device_top = req.device_top + device_shift;
    let debug_info = LayoutDebugInfo {
        mode: config.position,
        device_top,
        device_bottom: device_top + req.device_height,
        caption_top: rect.y0 - half,
        caption_height: rect.height() + stroke,
        rect_bottom: rect.y1,
        bottom_spacing: canvas_h - (rect.y1 + half),
    };
    tracing::debug!(info = ?debug_info, lines = block.lines.len(), font_size = block.font_size, "caption laid out");
    if let Some(observer) = observer {
        observer.on_layout(&debug_info);
    }

    Some(CaptionLayout {
        rect,
        line_advance: block.font_size * opts.line_height,
        lines: block.lines,
        font_size: block.font_size,
        inner_padding: column.padding,
        device_shift,
        debug: debug_info,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/caption_box.rs"]
mod tests;
