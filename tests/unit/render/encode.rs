use super::*;
use crate::foundation::core::Rgba8Premul;

fn surface() -> Surface {
    Surface::filled(6, 4, Rgba8Premul::from_straight_rgba(200, 100, 50, 255))
}

#[test]
fn png_keeps_exact_pixels() {
    let bytes = encode_surface(&surface(), OutputFormat::Png).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Png);
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (6, 4));
    assert_eq!(img.get_pixel(3, 2).0, [200, 100, 50, 255]);
}

#[test]
fn jpeg_is_jpeg_and_lossy_close() {
    let bytes = encode_surface(&surface(), OutputFormat::jpeg()).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Jpeg);
    let img = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (6, 4));
    let px = img.get_pixel(3, 2).0;
    assert!(px[0].abs_diff(200) < 12 && px[1].abs_diff(100) < 12 && px[2].abs_diff(50) < 12, "{px:?}");
}

#[test]
fn output_format_serde_and_extension() {
    let f: OutputFormat = serde_json::from_value(serde_json::json!({ "kind": "jpeg" })).unwrap();
    assert_eq!(f, OutputFormat::jpeg());
    let f: OutputFormat = serde_json::from_value(serde_json::json!({ "kind": "jpeg", "quality": 70 })).unwrap();
    assert_eq!(f, OutputFormat::Jpeg { quality: 70 });
    assert_eq!(OutputFormat::default().extension(), "png");
    assert_eq!(f.extension(), "jpg");
}
