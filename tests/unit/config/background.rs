use super::*;

#[test]
fn kebab_case_enums() {
    let cfg: BackgroundConfig = serde_json::from_value(serde_json::json!({
        "mode": "gradient",
        "gradient": { "colors": ["#000", "#fff"], "direction": "bottom-top" },
        "fit": "scale-down",
        "fallback": "solid",
        "warnOnMismatch": true
    }))
    .unwrap();
    assert_eq!(cfg.mode, BackgroundMode::Gradient);
    assert_eq!(cfg.fit, FitMode::ScaleDown);
    assert_eq!(cfg.fallback, Some(BackgroundFallback::Solid));
    assert_eq!(
        cfg.gradient.as_ref().map(|g| g.direction),
        Some(GradientDirection::BottomTop)
    );
    assert!(cfg.warn_on_mismatch);
    assert!(cfg.validate().is_ok());
}

#[test]
fn defaults() {
    let cfg = BackgroundConfig::default();
    assert_eq!(cfg.mode, BackgroundMode::Auto);
    assert_eq!(cfg.fit, FitMode::Cover);
    assert!(cfg.validate().is_ok());
}

#[test]
fn merge_prefers_override_fields() {
    let global = BackgroundConfig {
        image: Some("global.png".into()),
        color: Some("#101010".to_owned()),
        ..BackgroundConfig::default()
    };
    let ov = BackgroundOverride {
        mode: Some(BackgroundMode::Image),
        image: Some("device.png".into()),
        fit: Some(FitMode::Contain),
        ..BackgroundOverride::default()
    };
    let merged = global.merged_with(&ov);
    assert_eq!(merged.mode, BackgroundMode::Image);
    assert_eq!(merged.image, Some("device.png".into()));
    assert_eq!(merged.fit, FitMode::Contain);
    assert_eq!(merged.color.as_deref(), Some("#101010"));
}

#[test]
fn validate_rejects_short_gradient_and_bad_color() {
    let cfg = BackgroundConfig::gradient(&["#000"], GradientDirection::TopBottom);
    assert!(cfg.validate().is_err());
    let cfg = BackgroundConfig::solid("not-a-color");
    assert!(cfg.validate().is_err());
    let cfg = BackgroundConfig {
        mode: BackgroundMode::Gradient,
        ..BackgroundConfig::default()
    };
    assert!(cfg.validate().is_err());
}
