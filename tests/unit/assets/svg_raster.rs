use super::*;

fn empty_fonts() -> FontSet {
    FontSet::isolated(&[], &[])
}

#[test]
fn rasterize_solid_rect_is_opaque_premul() {
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"><rect x="0" y="0" width="4" height="4" fill="#ff0000"/></svg>"##;
    let tree = parse_svg(svg, &empty_fonts()).unwrap();
    let surface = rasterize_svg(&tree, 4, 4).unwrap();
    assert_eq!(surface.width, 4);
    assert_eq!(surface.pixel(2, 2), Some([255, 0, 0, 255]));
}

#[test]
fn rasterize_scales_viewport_to_target() {
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="2"><rect x="0" y="0" width="1" height="2" fill="#0000ff"/></svg>"##;
    let tree = parse_svg(svg, &empty_fonts()).unwrap();
    let surface = rasterize_svg(&tree, 8, 8).unwrap();
    assert_eq!(surface.pixel(1, 4), Some([0, 0, 255, 255]));
    assert_eq!(surface.pixel(6, 4), Some([0, 0, 0, 0]));
}

#[test]
fn rasterize_rejects_zero_size() {
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="2"><rect width="2" height="2" fill="#000"/></svg>"##;
    let tree = parse_svg(svg, &empty_fonts()).unwrap();
    assert!(rasterize_svg(&tree, 0, 4).is_err());
}

#[test]
fn invalid_svg_is_an_error() {
    assert!(parse_svg("<svg", &empty_fonts()).is_err());
}

#[test]
fn resolve_family_passes_names_through() {
    let fonts = empty_fonts();
    assert_eq!(fonts.resolve_family("Helvetica Neue"), "Helvetica Neue");
    assert_eq!(fonts.face_count(), 0);
}

#[test]
fn unregistered_font_file_falls_back_to_sans_serif() {
    assert_eq!(empty_fonts().resolve_family("/nowhere/Brand.ttf"), "sans-serif");
}
