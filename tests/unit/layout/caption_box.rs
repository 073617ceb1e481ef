use std::sync::Mutex;

use super::*;
use crate::config::caption::CaptionBorder;
use crate::config::device::NamedPosition;
use crate::text::wrap::ELLIPSIS;

const TEXT: &str = "Track every habit with ease";
const LONG: &str = "Plan your week with smart reminders that adapt to the way you actually work every single day of the year";

fn canvas() -> Canvas {
    Canvas::new(1000, 2000).unwrap()
}

fn config(position: CaptionPosition) -> CaptionConfig {
    CaptionConfig {
        position,
        ..CaptionConfig::default()
    }
}

fn layout(cfg: &CaptionConfig, device_top: f64, device_height: f64) -> Option<CaptionLayout> {
    layout_caption_box(
        &CaptionLayoutRequest {
            text: TEXT,
            config: cfg,
            canvas: canvas(),
            device_top,
            device_height,
        },
        None,
    )
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn caption_height_counts_lines() {
    let opts = CaptionHeightOptions {
        line_height: 1.2,
        max_lines: 3,
        ..CaptionHeightOptions::default()
    };
    // 800 / (64 * 0.55) = 22 chars per line, so two lines.
    assert!(approx(caption_height(TEXT, 64.0, 800.0, &opts), 153.6));
    let padded = CaptionHeightOptions {
        vertical_padding: 40.0,
        ..opts
    };
    assert!(approx(caption_height(LONG, 64.0, 800.0, &padded), 3.0 * 76.8 + 40.0));
}

#[test]
fn caption_height_is_clamped() {
    let base = CaptionHeightOptions::default();
    for text in [TEXT, LONG, "x"] {
        let h = caption_height(
            text,
            64.0,
            800.0,
            &CaptionHeightOptions {
                min_height: Some(100.0),
                max_height: Some(200.0),
                ..base
            },
        );
        assert!((100.0..=200.0).contains(&h), "{text}: {h}");
    }
    let inverted = CaptionHeightOptions {
        min_height: Some(300.0),
        max_height: Some(200.0),
        ..base
    };
    assert_eq!(caption_height(TEXT, 64.0, 800.0, &inverted), 200.0);
}

#[test]
fn adaptive_uses_gap_on_open_side() {
    let opts = CaptionHeightOptions::default();
    let top = FramePosition::Named(NamedPosition::Top);
    let bottom = FramePosition::Named(NamedPosition::Bottom);
    let center = FramePosition::Named(NamedPosition::Center);

    // Gap above 100, gap below 400.
    let below = adaptive_caption_height(TEXT, 64.0, canvas(), 800.0, 100.0, 1500.0, top, &opts).unwrap();
    assert_eq!(below.lines.len(), 2);
    let above = adaptive_caption_height(TEXT, 64.0, canvas(), 800.0, 100.0, 1500.0, bottom, &opts).unwrap();
    assert_eq!(above.lines.len(), 1);
    assert!(above.lines[0].ends_with(ELLIPSIS));
    assert!(approx(above.height, 76.8));
    let mid = adaptive_caption_height(TEXT, 64.0, canvas(), 800.0, 100.0, 1500.0, center, &opts).unwrap();
    assert_eq!(mid.lines.len(), 2);
}

#[test]
fn adaptive_gives_up_below_min_font_scale() {
    let opts = CaptionHeightOptions::default();
    let center = FramePosition::Named(NamedPosition::Center);
    assert!(adaptive_caption_height(TEXT, 64.0, canvas(), 800.0, 0.0, 1990.0, center, &opts).is_none());
}

#[test]
fn above_sits_margin_bottom_over_device() {
    let cfg = config(CaptionPosition::Above);
    let l = layout(&cfg, 600.0, 1200.0).unwrap();
    assert_eq!(l.device_shift, 0.0);
    assert!(approx(l.rect.y1, 600.0 - DEFAULT_CAPTION_GAP));
    assert!(approx(l.rect.height(), 153.6));
    assert_eq!(l.lines.len(), 2);
    assert!(approx(l.rect.x0, 100.0));
    assert!(approx(l.rect.width(), 800.0));
}

#[test]
fn above_nudges_device_down_to_make_room() {
    let cfg = config(CaptionPosition::Above);
    let l = layout(&cfg, 200.0, 1200.0).unwrap();
    assert!(approx(l.device_shift, 93.6));
    assert_eq!(l.lines.len(), 2);
    assert!(approx(l.rect.y0, 100.0));
    assert!(approx(l.debug.device_top, 293.6));
}

#[test]
fn above_nudge_is_bounded_then_text_refits() {
    let cfg = config(CaptionPosition::Above);
    let l = layout(&cfg, 50.0, 1200.0).unwrap();
    assert!(approx(l.device_shift, 200.0));
    assert_eq!(l.lines.len(), 1);
    assert!(l.lines[0].ends_with(ELLIPSIS));
    assert!(l.debug.caption_top >= 0.0);
}

#[test]
fn above_shrinks_font_when_no_line_fits() {
    let cfg = config(CaptionPosition::Above);
    let l = layout(&cfg, 0.0, 1200.0).unwrap();
    assert!(approx(l.font_size, 50.0));
    assert_eq!(l.lines, vec![TEXT.to_owned()]);
}

#[test]
fn caption_that_cannot_fit_is_skipped() {
    let cfg = config(CaptionPosition::Above);
    assert!(layout(&cfg, -300.0, 1200.0).is_none());
}

fn big_caption(position: CaptionPosition) -> CaptionConfig {
    CaptionConfig {
        font_size: 200.0,
        ..config(position)
    }
}

fn layout_text(
    cfg: &CaptionConfig,
    text: &str,
    device_top: f64,
    device_height: f64,
) -> Option<CaptionLayout> {
    layout_caption_box(
        &CaptionLayoutRequest {
            text,
            config: cfg,
            canvas: canvas(),
            device_top,
            device_height,
        },
        None,
    )
}

#[test]
fn above_gives_up_top_margin_before_skipping() {
    // Within padding_top the shrunk font would be 50, under half of 200.
    let cfg = big_caption(CaptionPosition::Above);
    let l = layout_text(&cfg, "Hi", 0.0, 1500.0).unwrap();
    assert!(approx(l.device_shift, 200.0));
    assert!(approx(l.rect.y0, 0.0));
    assert!(approx(l.rect.y1, 200.0 - DEFAULT_CAPTION_GAP));
    assert!(approx(l.font_size, 160.0 / 1.2));
}

#[test]
fn below_gives_up_bottom_margin_before_skipping() {
    let cfg = big_caption(CaptionPosition::Below);
    let l = layout_text(&cfg, "Hi", 500.0, 1500.0).unwrap();
    assert!(approx(l.device_shift, -200.0));
    assert!(approx(l.rect.y0, 1800.0 + DEFAULT_CAPTION_GAP));
    assert!(approx(l.rect.y1, 2000.0));
    assert!(approx(l.font_size, 160.0 / 1.2));
    assert!(l.debug.caption_top >= l.debug.device_bottom);
}

#[test]
fn overlay_gives_up_top_margin_before_skipping() {
    let mut cfg = big_caption(CaptionPosition::Overlay);
    cfg.caption_box.margin_top = Some(1850.0);
    let l = layout_text(&cfg, "Hi", 200.0, 1200.0).unwrap();
    assert!(approx(l.rect.y1, 1900.0));
    assert!(approx(l.rect.height(), 240.0));
    assert!(approx(l.font_size, 200.0));
}

#[test]
fn blank_caption_is_skipped() {
    let cfg = config(CaptionPosition::Below);
    let req = CaptionLayoutRequest {
        text: "  ",
        config: &cfg,
        canvas: canvas(),
        device_top: 100.0,
        device_height: 1000.0,
    };
    assert!(layout_caption_box(&req, None).is_none());
}

#[test]
fn below_starts_margin_top_under_device() {
    let cfg = config(CaptionPosition::Below);
    let l = layout(&cfg, 200.0, 1200.0).unwrap();
    assert!(approx(l.rect.y0, 1400.0 + DEFAULT_CAPTION_GAP));
    assert_eq!(l.device_shift, 0.0);
}

#[test]
fn below_caption_never_starts_above_device_bottom() {
    let mut cfg = config(CaptionPosition::Below);
    cfg.border = Some(CaptionBorder {
        width: 8.0,
        ..CaptionBorder::default()
    });
    for text in [TEXT, LONG, "Hi"] {
        for step in 0..48 {
            let device_top = -500.0 + 50.0 * f64::from(step);
            let req = CaptionLayoutRequest {
                text,
                config: &cfg,
                canvas: canvas(),
                device_top,
                device_height: 1200.0,
            };
            if let Some(l) = layout_caption_box(&req, None) {
                assert!(
                    l.debug.caption_top >= l.debug.device_bottom - 1e-9,
                    "device_top={device_top}: {:?}",
                    l.debug
                );
                assert!(l.debug.caption_top + l.debug.caption_height <= 2000.0 + 1e-9);
            }
        }
    }
}

#[test]
fn above_caption_stays_between_canvas_top_and_device() {
    let mut cfg = config(CaptionPosition::Above);
    cfg.border = Some(CaptionBorder {
        width: 8.0,
        ..CaptionBorder::default()
    });
    for text in [TEXT, LONG, "Hi"] {
        for step in 0..48 {
            let device_top = -500.0 + 50.0 * f64::from(step);
            if let Some(l) = layout_text(&cfg, text, device_top, 1200.0) {
                assert!(l.debug.caption_top >= -1e-6, "device_top={device_top}: {:?}", l.debug);
                assert!(
                    l.debug.caption_top + l.debug.caption_height
                        <= l.debug.device_top - DEFAULT_CAPTION_GAP + 1e-6,
                    "device_top={device_top}: {:?}",
                    l.debug
                );
                assert!(l.device_shift >= 0.0 && l.device_shift <= 200.0 + 1e-9);
            }
        }
    }
}

#[test]
fn overlay_rect_bottom_honors_bottom_spacing_and_stroke() {
    let mut cfg = config(CaptionPosition::Overlay);
    cfg.padding_bottom = 80.0;
    cfg.border = Some(CaptionBorder {
        width: 6.0,
        ..CaptionBorder::default()
    });
    let l = layout(&cfg, 100.0, 1800.0).unwrap();
    assert!(approx(l.debug.rect_bottom, 2000.0 - (80.0 + 3.0)));
    assert!(approx(l.debug.bottom_spacing, 80.0));

    cfg.caption_box.margin_bottom = Some(0.0);
    let l = layout(&cfg, 100.0, 1800.0).unwrap();
    assert!(approx(l.debug.rect_bottom, 2000.0 - 3.0));
    assert!(approx(l.debug.bottom_spacing, 0.0));
}

#[test]
fn panel_narrows_box_to_side_margins() {
    let mut cfg = config(CaptionPosition::Overlay);
    cfg.background = Some(crate::config::caption::CaptionBackground {
        side_margin: 50.0,
        padding: 20.0,
        ..Default::default()
    });
    let l = layout(&cfg, 100.0, 1800.0).unwrap();
    assert!(approx(l.rect.x0, 50.0));
    assert!(approx(l.rect.width(), 900.0));
    assert_eq!(l.inner_padding, 20.0);
    // Text height plus padding on both sides.
    assert!(approx(l.rect.height(), (l.lines.len() as f64) * l.line_advance + 40.0));
}

#[test]
fn observer_sees_each_layout() {
    let seen = Mutex::new(Vec::<LayoutDebugInfo>::new());
    let observer = |info: &LayoutDebugInfo| seen.lock().unwrap().push(*info);
    let cfg = config(CaptionPosition::Below);
    let req = CaptionLayoutRequest {
        text: TEXT,
        config: &cfg,
        canvas: canvas(),
        device_top: 200.0,
        device_height: 1200.0,
    };
    let l = layout_caption_box(&req, Some(&observer)).unwrap();
    let seen = seen.into_inner().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], l.debug);
    assert_eq!(seen[0].mode, CaptionPosition::Below);
}
