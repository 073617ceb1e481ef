use crate::{
    config::caption::{CaptionConfig, CaptionPosition},
    config::device::DeviceConfig,
    foundation::core::{Canvas, Rect},
    frames::catalog::ScreenRect,
    layout::caption_box::{caption_margins, estimate_caption_block},
};

/// Device rectangle on the output canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DevicePlacement {
    /// Native width of the placed artwork (frame, or bare screenshot).
    pub native_width: u32,
    /// Native height of the placed artwork.
    pub native_height: u32,
    /// Native-to-canvas scale factor.
    pub scale: f64,
    /// Left edge on the canvas.
    pub x: f64,
    /// Top edge on the canvas; may be negative or run past the bottom.
    pub y: f64,
}

impl DevicePlacement {
    /// Scaled width.
    pub fn width(&self) -> f64 {
        f64::from(self.native_width) * self.scale
    }

    /// Scaled height.
    pub fn height(&self) -> f64 {
        f64::from(self.native_height) * self.scale
    }

    /// Top edge.
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height()
    }

    /// Device bounds on the canvas.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width(), self.bottom())
    }

    /// A frame's screen opening mapped onto the canvas.
    pub fn screen_rect_on_canvas(&self, screen: ScreenRect) -> Rect {
        let r = screen.to_rect();
        Rect::new(
            self.x + r.x0 * self.scale,
            self.y + r.y0 * self.scale,
            self.x + r.x1 * self.scale,
            self.y + r.y1 * self.scale,
        )
    }

    /// Same placement moved vertically by `dy`.
    pub fn shifted(self, dy: f64) -> Self {
        Self {
            y: self.y + dy,
            ..self
        }
    }
}

/// Uniform scale that fits `native` inside the canvas, times `frame_scale`.
pub fn device_scale(canvas: Canvas, native_width: u32, native_height: u32, frame_scale: f64) -> f64 {
    let fit_w = f64::from(canvas.width) / f64::from(native_width.max(1));
    let fit_h = f64::from(canvas.height) / f64::from(native_height.max(1));
    frame_scale * fit_w.min(fit_h)
}

/// Device top given explicitly by the device configuration, if any.
///
/// `partial_frame` hides `frame_offset` percent of the device below the canvas bottom; otherwise
/// `frame_position` maps 0..100 onto the free vertical space.
pub fn configured_device_top(canvas_height: f64, device_height: f64, device: &DeviceConfig) -> Option<f64> {
    if device.partial_frame {
        let visible = 1.0 - device.frame_offset.clamp(0.0, 100.0) / 100.0;
        return Some(canvas_height - device_height * visible);
    }
    device
        .frame_position
        .map(|pos| (canvas_height - device_height) * pos.percent() / 100.0)
}

/// Device top when the configuration leaves it open: the device is centered in whatever the
/// caption leaves free.
///
/// Above captions reserve their natural height plus margins at the top, below captions at the
/// bottom. If the device is taller than the free space it stays flush against the caption and
/// runs off the opposite edge.
pub fn derived_device_top(
    canvas: Canvas,
    device_height: f64,
    caption: Option<(&str, &CaptionConfig)>,
) -> f64 {
    let canvas_h = f64::from(canvas.height);
    let centered = (canvas_h - device_height) / 2.0;
    let Some((text, config)) = caption else {
        return centered;
    };
    let Some(block) = estimate_caption_block(text, config, canvas) else {
        return centered;
    };
    let (margin_top, margin_bottom) = caption_margins(config);
    let reserved = margin_top + block.height + config.stroke_width() + margin_bottom;
    let free = canvas_h - reserved;
    match config.position {
        CaptionPosition::Above => {
            if device_height <= free {
                reserved + (free - device_height) / 2.0
            } else {
                reserved
            }
        }
        CaptionPosition::Below => {
            if device_height <= free {
                (free - device_height) / 2.0
            } else {
                free - device_height
            }
        }
        CaptionPosition::Overlay => centered,
    }
}

/// Scale and position the device on the canvas.
///
/// The device is centered horizontally. Vertically it follows [`configured_device_top`] and
/// falls back to [`derived_device_top`].
pub fn place_device(
    canvas: Canvas,
    native_width: u32,
    native_height: u32,
    device: &DeviceConfig,
    caption: Option<(&str, &CaptionConfig)>,
) -> DevicePlacement {
    let scale = device_scale(canvas, native_width, native_height, device.frame_scale);
    let width = f64::from(native_width) * scale;
    let height = f64::from(native_height) * scale;
    let canvas_h = f64::from(canvas.height);
    let y = configured_device_top(canvas_h, height, device)
        .unwrap_or_else(|| derived_device_top(canvas, height, caption));
    DevicePlacement {
        native_width,
        native_height,
        scale,
        x: (f64::from(canvas.width) - width) / 2.0,
        y,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/placement.rs"]
mod tests;
