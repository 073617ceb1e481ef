use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert_eq!(Canvas::new(3, 4).unwrap().pixels(), 12);
}

#[test]
fn orientation_treats_square_as_portrait() {
    assert_eq!(Orientation::of(100, 100), Orientation::Portrait);
    assert_eq!(Orientation::of(1290, 2796), Orientation::Portrait);
    assert_eq!(Orientation::of(2880, 1800), Orientation::Landscape);
}

#[test]
fn oriented_swaps_only_on_mismatch() {
    let c = Canvas::new(1290, 2796).unwrap();
    assert_eq!(c.oriented(Orientation::Portrait), c);
    assert_eq!(
        c.oriented(Orientation::Landscape),
        Canvas {
            width: 2796,
            height: 1290
        }
    );
}

#[test]
fn catalog_keys_are_stable() {
    for cat in DeviceCategory::ALL {
        assert_eq!(DeviceCategory::from_catalog_key(cat.catalog_key()), Some(cat));
    }
    assert_eq!(DeviceCategory::from_catalog_key("iphone"), None);
    assert_eq!(
        Orientation::from_catalog_key("Landscape"),
        Some(Orientation::Landscape)
    );
    assert_eq!(Orientation::from_catalog_key("landscape"), None);
}

#[test]
fn premultiply_rounds_half_up() {
    let px = Rgba8Premul::from_straight_rgba(100, 50, 200, 128);
    assert_eq!(
        px.to_array(),
        [
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
}
