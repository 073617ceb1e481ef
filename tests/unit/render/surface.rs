use super::*;

#[test]
fn from_premul_checks_length() {
    assert!(Surface::from_premul(2, 2, vec![0; 15]).is_err());
    assert!(Surface::from_premul(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn filled_surface_has_uniform_pixels() {
    let s = Surface::filled(3, 2, Rgba8Premul::from_straight_rgba(10, 20, 30, 255));
    assert_eq!(s.pixel(2, 1), Some([10, 20, 30, 255]));
    assert_eq!(s.pixel(3, 0), None);
}

#[test]
fn resize_of_uniform_surface_stays_uniform() {
    let s = Surface::filled(10, 10, Rgba8Premul::from_straight_rgba(0, 128, 255, 255));
    let r = s.resized(4, 7);
    assert_eq!((r.width, r.height), (4, 7));
    assert!(r.data.chunks_exact(4).all(|px| px == [0, 128, 255, 255]));
}

#[test]
fn crop_clips_to_bounds() {
    let mut s = Surface::transparent(4, 4);
    let i = (4 + 3) * 4;
    s.data[i..i + 4].copy_from_slice(&[9, 9, 9, 9]);
    let c = s.cropped(2, 1, 10, 10);
    assert_eq!((c.width, c.height), (2, 3));
    assert_eq!(c.pixel(1, 0), Some([9, 9, 9, 9]));
}

#[test]
fn rgba_image_roundtrip_keeps_opaque_pixels() {
    let img = image::RgbaImage::from_raw(1, 1, vec![12, 34, 56, 255]).unwrap();
    let s = Surface::from_rgba_image(img.clone());
    assert_eq!(s.to_rgba_image(), img);
}
