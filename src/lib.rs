//! Frameshot turns raw application screenshots into finished store marketing images.
//!
//! A composition stacks four layers on a canvas of the requested output size:
//!
//! 1. **Background**: resolved through a fallback chain (colocated file, device image, global
//!    image, gradient, flat color) and fitted to the canvas.
//! 2. **Screenshot**: scaled into the screen opening of a device bezel and clipped by its mask.
//! 3. **Bezel**: a device frame picked from a [`FrameRegistry`] by screen aspect ratio.
//! 4. **Caption**: wrapped text in an optional panel, laid out above, below or over the device.
//!
//! Text width is estimated (`chars * font_size * CHAR_WIDTH_FACTOR`) for layout decisions, and
//! the resulting wrap points are then rasterized with resvg.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure compositions**: a [`Compositor`] holds only its font database; each compose call is a
//!   function of its [`ComposeRequest`].
//! - **Premultiplied RGBA8** end-to-end until encoding.
//!
//! # Getting started
//!
//! Load a catalog with [`FrameRegistry::from_path`], pick a frame with [`select_frame`], then call
//! [`Compositor::compose`]. [`compose_all`] runs many requests on a rayon pool.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod assets;
mod background;
mod batch;
mod config;
mod effects;
mod foundation;
mod frames;
mod layout;
mod render;
mod text;

pub use assets::color::{Color, color_or_default};
pub use assets::decode::{decode_image, decode_image_file, decode_mask, image_dimensions};
pub use assets::svg_raster::{FontSet, parse_svg, rasterize_svg};
pub use background::fit::{ASPECT_MISMATCH_TOLERANCE, aspect_mismatch, fit_image};
pub use background::gradient::{gradient_endpoints, gradient_t, render_gradient, render_gradient_config};
pub use background::resolve::{
    BackgroundPlan, BackgroundSource, ImageOrigin, colocated_background, render_background,
    resolve_background_chain,
};
pub use batch::{BatchItem, BatchJob, BatchReport, compose_all};
pub use config::background::{
    BackgroundConfig, BackgroundFallback, BackgroundMode, BackgroundOverride, FitMode,
    GradientConfig, GradientDirection,
};
pub use config::caption::{
    Align, CaptionBackground, CaptionBorder, CaptionBoxConfig, CaptionBoxOverride, CaptionConfig,
    CaptionPosition,
};
pub use config::captions::{CaptionEntry, CaptionMap, FALLBACK_LANGUAGE, caption_for};
pub use config::device::{DEFAULT_FRAME_SCALE, DeviceConfig, FramePosition, NamedPosition};
pub use config::project::ProjectConfig;
pub use effects::mask::{IPHONE_SCREEN_CORNER_RATIO, rounded_rect_coverage, screen_mask_coverage};
pub use foundation::core::{
    Canvas, DeviceCategory, Orientation, Point, Rect, Rgba8Premul, RoundedRect, Vec2,
};
pub use foundation::error::{FrameshotError, FrameshotResult};
pub use frames::catalog::{DeviceFrame, MIN_SCREEN_AREA_RATIO, ScreenRect};
pub use frames::classify::classify_device_category;
pub use frames::registry::FrameRegistry;
pub use frames::select::{FrameSelection, pick_frame, select_frame};
pub use layout::caption_box::{
    CaptionBlock, CaptionColumn, CaptionHeightOptions, CaptionLayout, CaptionLayoutRequest,
    DEFAULT_CAPTION_GAP, LayoutDebugInfo, LayoutObserver, MAX_DEVICE_NUDGE, MIN_FONT_SCALE,
    adaptive_caption_height, caption_height, caption_margins, estimate_caption_block,
    layout_caption_box,
};
pub use layout::placement::{
    DevicePlacement, configured_device_top, derived_device_top, device_scale, place_device,
};
pub use render::caption::{CaptionDocument, caption_document, draw_caption};
pub use render::compositor::{ComposeRequest, ComposedImage, Compositor};
pub use render::encode::{DEFAULT_JPEG_QUALITY, OutputFormat, encode_surface};
pub use render::surface::Surface;
pub use text::metrics::{CHAR_WIDTH_FACTOR, chars_per_line, estimate_text_width};
pub use text::wrap::{ELLIPSIS, wrap_text, wrap_to_budget};
