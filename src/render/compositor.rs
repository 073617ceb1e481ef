use std::{fmt, path::PathBuf, sync::Arc};

use crate::{
    assets::decode::{decode_image, decode_mask},
    assets::svg_raster::FontSet,
    background::resolve::{render_background, resolve_background_chain},
    config::background::BackgroundConfig,
    config::caption::CaptionConfig,
    config::device::DeviceConfig,
    effects::mask::{IPHONE_SCREEN_CORNER_RATIO, rounded_rect_coverage, screen_mask_coverage},
    foundation::core::{Canvas, DeviceCategory, Orientation, Rect},
    foundation::error::{FrameshotError, FrameshotResult},
    frames::catalog::DeviceFrame,
    frames::select::FrameSelection,
    layout::caption_box::{CaptionLayoutRequest, LayoutObserver, layout_caption_box},
    layout::placement::{DevicePlacement, place_device},
    render::caption::draw_caption,
    render::encode::{OutputFormat, encode_surface},
    render::surface::Surface,
};

/// Inputs of one composition.
#[derive(Clone)]
pub struct ComposeRequest {
    /// Encoded screenshot.
    pub screenshot: Vec<u8>,
    /// Screenshot location, used to find a colocated background image.
    pub screenshot_path: Option<PathBuf>,
    /// Device frame; an empty selection composes the bare screenshot.
    pub frame: FrameSelection,
    /// Caption text.
    pub caption: Option<String>,
    /// Global caption settings; device overrides are applied on top.
    pub caption_config: CaptionConfig,
    /// Global background settings; device overrides are applied on top.
    pub background: BackgroundConfig,
    /// Per-device settings.
    pub device: DeviceConfig,
    /// Requested output size.
    pub output: Canvas,
    /// Output encoding.
    pub format: OutputFormat,
    /// Receives caption layout diagnostics.
    pub observer: Option<Arc<dyn LayoutObserver>>,
}

impl ComposeRequest {
    /// Request with default settings, no frame and no caption.
    pub fn new(screenshot: Vec<u8>, output: Canvas) -> Self {
        Self {
            screenshot,
            screenshot_path: None,
            frame: FrameSelection::default(),
            caption: None,
            caption_config: CaptionConfig::default(),
            background: BackgroundConfig::default(),
            device: DeviceConfig::default(),
            output,
            format: OutputFormat::default(),
            observer: None,
        }
    }

    /// Set the screenshot path.
    pub fn with_screenshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.screenshot_path = Some(path.into());
        self
    }

    /// Set the device frame.
    pub fn with_frame(mut self, frame: FrameSelection) -> Self {
        self.frame = frame;
        self
    }

    /// Set the caption text and its settings.
    pub fn with_caption(mut self, text: impl Into<String>, config: CaptionConfig) -> Self {
        self.caption = Some(text.into());
        self.caption_config = config;
        self
    }

    /// Set the background settings.
    pub fn with_background(mut self, background: BackgroundConfig) -> Self {
        self.background = background;
        self
    }

    /// Set the per-device settings.
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }

    /// Set the output encoding.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Attach a layout observer.
    pub fn with_observer(mut self, observer: Arc<dyn LayoutObserver>) -> Self {
        self.observer = Some(observer);
        self
    }
}

impl fmt::Debug for ComposeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposeRequest")
            .field("screenshot_len", &self.screenshot.len())
            .field("screenshot_path", &self.screenshot_path)
            .field("frame", &self.frame.metadata.as_ref().map(|m| m.name.as_str()))
            .field("caption", &self.caption)
            .field("output", &self.output)
            .field("format", &self.format)
            .field("observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

/// An encoded output image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Encoding of `bytes`.
    pub format: OutputFormat,
    /// Encoded image.
    pub bytes: Vec<u8>,
}

/// Composes screenshots, bezels, captions and backgrounds.
///
/// Holds only the font database, so one instance can be shared across threads.
#[derive(Clone, Debug)]
pub struct Compositor {
    fonts: FontSet,
}

impl Compositor {
    /// Compositor drawing captions with `fonts`.
    pub fn new(fonts: FontSet) -> Self {
        Self { fonts }
    }

    /// Fonts used for captions.
    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    /// Compose and encode.
    pub fn compose(&self, req: &ComposeRequest) -> FrameshotResult<ComposedImage> {
        let surface = self.compose_surface(req)?;
        let bytes = encode_surface(&surface, req.format)?;
        Ok(ComposedImage {
            width: surface.width,
            height: surface.height,
            format: req.format,
            bytes,
        })
    }

    /// Compose without encoding.
    ///
    /// Layers, bottom to top: background, masked screenshot, bezel, caption. Only an unusable
    /// screenshot is fatal; every other problem degrades with a warning.
    #[tracing::instrument(skip_all, fields(width = req.output.width, height = req.output.height))]
    pub fn compose_surface(&self, req: &ComposeRequest) -> FrameshotResult<Surface> {
        let screenshot = decode_image(&req.screenshot)?;
        let canvas = output_canvas(req.output, &screenshot);
        let caption_config = req.caption_config.with_device_overrides(&req.device);
        let caption = req
            .caption
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty());
        if caption.is_none() && req.caption.is_some() {
            tracing::warn!("empty caption, composing without one");
        }

        let plan = resolve_background_chain(
            &req.background,
            req.device.background.as_ref(),
            req.screenshot_path.as_deref(),
        );
        let mut out = render_background(&plan, canvas);

        let art = DeviceArt::prepare(&screenshot, &req.frame);
        let (native_width, native_height) = art.native_size();
        let mut placement = place_device(
            canvas,
            native_width,
            native_height,
            &req.device,
            caption.map(|text| (text, &caption_config)),
        );

        let layout = caption.and_then(|text| {
            layout_caption_box(
                &CaptionLayoutRequest {
                    text,
                    config: &caption_config,
                    canvas,
                    device_top: placement.top(),
                    device_height: placement.height(),
                },
                req.observer.as_deref(),
            )
        });
        if let Some(layout) = &layout {
            placement = placement.shifted(layout.device_shift);
        }
        tracing::debug!(
            scale = placement.scale,
            x = placement.x,
            y = placement.y,
            framed = art.frame.is_some(),
            "device placed"
        );

        art.draw(&mut out, &placement)?;

        if let Some(layout) = &layout
            && let Err(err) = draw_caption(&mut out, layout, &caption_config, &self.fonts)
        {
            tracing::warn!("caption rendering failed, composing without it: {err}");
        }
        Ok(out)
    }

    /// Screenshot inside its bezel on a transparent canvas of the frame's native size.
    #[tracing::instrument(skip_all)]
    pub fn compose_frame_only(
        &self,
        screenshot: &[u8],
        frame: &FrameSelection,
        format: OutputFormat,
    ) -> FrameshotResult<ComposedImage> {
        let meta = frame
            .metadata
            .as_ref()
            .ok_or_else(|| FrameshotError::validation("frame-only output needs a device frame"))?;
        let bytes = frame.frame_bytes.as_deref().ok_or_else(|| {
            FrameshotError::validation(format!("frame image for '{}' is not loaded", meta.name))
        })?;
        let screenshot = decode_image(screenshot)?;
        let art = DeviceArt {
            screenshot: &screenshot,
            frame: Some(FrameArt::load(meta, bytes, frame.mask_bytes.as_deref())?),
        };

        let mut out = Surface::transparent(meta.frame_width, meta.frame_height);
        let placement = DevicePlacement {
            native_width: meta.frame_width,
            native_height: meta.frame_height,
            scale: 1.0,
            x: 0.0,
            y: 0.0,
        };
        art.draw(&mut out, &placement)?;
        let bytes = encode_surface(&out, format)?;
        Ok(ComposedImage {
            width: out.width,
            height: out.height,
            format,
            bytes,
        })
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(FontSet::default())
    }
}

fn output_canvas(requested: Canvas, screenshot: &Surface) -> Canvas {
    let orientation = Orientation::of(screenshot.width, screenshot.height);
    if requested.orientation() == orientation {
        return requested;
    }
    tracing::warn!(
        requested_width = requested.width,
        requested_height = requested.height,
        screenshot_width = screenshot.width,
        screenshot_height = screenshot.height,
        "output orientation does not match the screenshot, swapping dimensions"
    );
    requested.oriented(orientation)
}

struct FrameArt<'a> {
    meta: &'a DeviceFrame,
    bezel: Surface,
    mask: Option<image::GrayImage>,
}

impl<'a> FrameArt<'a> {
    fn load(meta: &'a DeviceFrame, bytes: &[u8], mask: Option<&[u8]>) -> FrameshotResult<Self> {
        let mut bezel = decode_image(bytes)?;
        if (bezel.width, bezel.height) != (meta.frame_width, meta.frame_height) {
            tracing::debug!(
                frame = %meta.name,
                actual_width = bezel.width,
                actual_height = bezel.height,
                "bezel image size differs from catalog, resampling"
            );
            bezel = bezel.resized(meta.frame_width, meta.frame_height);
        }
        let mask = mask.and_then(|bytes| match decode_mask(bytes) {
            Ok(mask) => Some(mask),
            Err(err) => {
                tracing::warn!(frame = %meta.name, "unusable screen mask, ignoring it: {err}");
                None
            }
        });
        Ok(Self { meta, bezel, mask })
    }
}

struct DeviceArt<'a> {
    screenshot: &'a Surface,
    frame: Option<FrameArt<'a>>,
}

impl<'a> DeviceArt<'a> {
    fn prepare(screenshot: &'a Surface, selection: &'a FrameSelection) -> Self {
        let frame = selection.metadata.as_ref().and_then(|meta| {
            let Some(bytes) = selection.frame_bytes.as_deref() else {
                tracing::warn!(frame = %meta.name, "frame image not loaded, composing without frame");
                return None;
            };
            match FrameArt::load(meta, bytes, selection.mask_bytes.as_deref()) {
                Ok(art) => Some(art),
                Err(err) => {
                    tracing::warn!(frame = %meta.name, "unusable frame image, composing without frame: {err}");
                    None
                }
            }
        });
        Self { screenshot, frame }
    }

    fn native_size(&self) -> (u32, u32) {
        match &self.frame {
            Some(f) => (f.meta.frame_width, f.meta.frame_height),
            None => (self.screenshot.width, self.screenshot.height),
        }
    }

    fn draw(&self, canvas: &mut Surface, placement: &DevicePlacement) -> FrameshotResult<()> {
        let screen = match &self.frame {
            Some(f) => placement.screen_rect_on_canvas(f.meta.screen_rect),
            None => placement.rect(),
        };
        let (sx, sy, sw, sh) = snap(screen);
        if sw > 0 && sh > 0 {
            let mut shot = self.screenshot.resized(sw, sh);
            let coverage = match &self.frame {
                Some(FrameArt {
                    mask: Some(mask),
                    meta,
                    ..
                }) => Some(screen_mask_coverage(mask, meta, sw, sh)),
                Some(f) if f.meta.category == DeviceCategory::Iphone => Some(rounded_rect_coverage(
                    sw,
                    sh,
                    f64::from(sw) * IPHONE_SCREEN_CORNER_RATIO,
                )),
                _ => None,
            };
            if let Some(coverage) = coverage {
                shot.apply_coverage(&coverage)?;
            }
            canvas.draw_over(&shot, sx, sy, 1.0)?;
        }

        if let Some(frame) = &self.frame {
            let (bx, by, bw, bh) = snap(placement.rect());
            if bw > 0 && bh > 0 {
                canvas.draw_over(&frame.bezel.resized(bw, bh), bx, by, 1.0)?;
            }
        }
        Ok(())
    }
}

/// Round a canvas rectangle to whole pixels as `(x, y, width, height)`.
fn snap(rect: Rect) -> (i64, i64, u32, u32) {
    let x0 = rect.x0.round();
    let y0 = rect.y0.round();
    let w = (rect.x1.round() - x0).max(0.0);
    let h = (rect.y1.round() - y0).max(0.0);
    (x0 as i64, y0 as i64, w as u32, h as u32)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
