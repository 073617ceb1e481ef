use super::*;
use crate::config::device::{FramePosition, NamedPosition};

fn canvas() -> Canvas {
    Canvas::new(1000, 2000).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn scale_is_frame_scale_times_fit() {
    assert!(approx(device_scale(canvas(), 500, 1000, 0.9), 1.8));
    // Width-limited.
    assert!(approx(device_scale(canvas(), 2000, 1000, 1.0), 0.5));
}

#[test]
fn named_positions_map_onto_free_space() {
    let mut device = DeviceConfig {
        frame_position: Some(FramePosition::Named(NamedPosition::Top)),
        ..DeviceConfig::default()
    };
    let p = place_device(canvas(), 500, 1000, &device, None);
    assert!(approx(p.x, 50.0));
    assert!(approx(p.top(), 0.0));
    assert!(approx(p.height(), 1800.0));

    device.frame_position = Some(FramePosition::Named(NamedPosition::Bottom));
    let p = place_device(canvas(), 500, 1000, &device, None);
    assert!(approx(p.bottom(), 2000.0));

    device.frame_position = Some(FramePosition::Percent(25.0));
    let p = place_device(canvas(), 500, 1000, &device, None);
    assert!(approx(p.top(), 50.0));
}

#[test]
fn partial_frame_hides_offset_below_canvas() {
    let device = DeviceConfig {
        partial_frame: true,
        frame_offset: 25.0,
        frame_position: Some(FramePosition::Named(NamedPosition::Top)),
        ..DeviceConfig::default()
    };
    let p = place_device(canvas(), 500, 1000, &device, None);
    assert!(approx(p.top(), 2000.0 - 0.75 * 1800.0));
    assert!(approx(p.bottom() - 2000.0, 0.25 * 1800.0));
}

#[test]
fn unset_position_without_caption_centers() {
    let device = DeviceConfig {
        frame_scale: 0.5,
        ..DeviceConfig::default()
    };
    let p = place_device(canvas(), 500, 1000, &device, None);
    assert!(approx(p.top(), 500.0));
}

#[test]
fn unset_position_reserves_room_for_caption_above() {
    let caption = CaptionConfig::default();
    let text = "Track every habit with ease";
    let p = place_device(canvas(), 500, 1000, &DeviceConfig::default(), Some((text, &caption)));
    // 100 top margin + 153.6 caption + 40 gap; the 1800px device does not fit the rest.
    assert!(approx(p.top(), 293.6));
}

#[test]
fn unset_position_centers_below_caption_room() {
    let caption = CaptionConfig {
        position: CaptionPosition::Below,
        ..CaptionConfig::default()
    };
    let text = "Track every habit with ease";
    let device = DeviceConfig {
        frame_scale: 0.5,
        ..DeviceConfig::default()
    };
    let p = place_device(canvas(), 500, 1000, &device, Some((text, &caption)));
    assert!(approx(p.top(), (2000.0 - 293.6 - 1000.0) / 2.0));
}

#[test]
fn screen_rect_maps_through_scale() {
    let p = DevicePlacement {
        native_width: 100,
        native_height: 200,
        scale: 2.0,
        x: 10.0,
        y: 20.0,
    };
    let r = p.screen_rect_on_canvas(ScreenRect {
        x: 5,
        y: 10,
        width: 90,
        height: 180,
    });
    assert!(approx(r.x0, 20.0));
    assert!(approx(r.y0, 40.0));
    assert!(approx(r.width(), 180.0));
    assert!(approx(r.height(), 360.0));
    assert!(approx(p.shifted(5.0).top(), 25.0));
}
