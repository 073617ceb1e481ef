use super::*;

#[test]
fn parses_hex_forms() {
    assert_eq!(Color::parse("#ff0000").unwrap(), Color::rgb(255, 0, 0));
    assert_eq!(Color::parse("#0F0").unwrap(), Color::rgb(0, 255, 0));
    assert_eq!(
        Color::parse("#0000ff80").unwrap(),
        Color::rgba(0, 0, 255, 128)
    );
    assert!(Color::parse("#12345").is_err());
    assert!(Color::parse("#gg0000").is_err());
}

#[test]
fn hex_rejects_signs_inside_digits() {
    for bad in ["#+f+f+f", "#+fff", "#+ff+ff+f", "#-1-1-1", "#+f+f+f+f"] {
        assert!(Color::parse(bad).is_err(), "{bad}");
    }
    assert_eq!(
        color_or_default(Some("#+f+f+f"), Color::BLACK, "caption.color"),
        Color::BLACK
    );
}

#[test]
fn parses_functional_and_named_forms() {
    assert_eq!(
        Color::parse("rgb(10, 20, 30)").unwrap(),
        Color::rgb(10, 20, 30)
    );
    assert_eq!(
        Color::parse("rgba(10,20,30,0.5)").unwrap(),
        Color::rgba(10, 20, 30, 128)
    );
    assert_eq!(
        Color::parse("hsl(0, 100%, 50%)").unwrap(),
        Color::rgb(255, 0, 0)
    );
    assert_eq!(Color::parse(" White ").unwrap(), Color::WHITE);
    assert!(Color::parse("not-a-color").is_err());
}

#[test]
fn invalid_color_falls_back_to_default() {
    let c = color_or_default(Some("nope"), Color::BLACK, "caption.color");
    assert_eq!(c, Color::BLACK);
    let c = color_or_default(None, Color::WHITE, "caption.color");
    assert_eq!(c, Color::WHITE);
    let c = color_or_default(Some("#112233"), Color::WHITE, "caption.color");
    assert_eq!(c, Color::rgb(0x11, 0x22, 0x33));
}

#[test]
fn opacity_scales_alpha_only() {
    let c = Color::rgb(200, 100, 50).with_opacity(0.5);
    assert_eq!(c, Color::rgba(200, 100, 50, 128));
    assert_eq!(c.to_hex_rgb(), "#c86432");
}
