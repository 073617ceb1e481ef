use super::*;
use crate::config::background::GradientDirection;

fn gradient() -> GradientConfig {
    GradientConfig {
        colors: vec!["#000000".to_owned(), "#FFFFFF".to_owned()],
        direction: GradientDirection::TopBottom,
    }
}

fn base(image: Option<&str>, fallback: Option<BackgroundFallback>) -> BackgroundConfig {
    BackgroundConfig {
        mode: BackgroundMode::Image,
        image: image.map(PathBuf::from),
        gradient: Some(gradient()),
        fallback,
        color: Some("#336699".to_owned()),
        ..BackgroundConfig::default()
    }
}

fn kinds(plan: &BackgroundPlan) -> Vec<&'static str> {
    plan.chain
        .iter()
        .map(|s| match s {
            BackgroundSource::Image { .. } => "image",
            BackgroundSource::Gradient(_) => "gradient",
            BackgroundSource::Solid(_) => "solid",
        })
        .collect()
}

#[test]
fn image_then_gradient_fallback() {
    let plan = resolve_background_chain(&base(Some("bg.png"), Some(BackgroundFallback::Gradient)), None, None);
    assert_eq!(kinds(&plan), ["image", "gradient", "solid"]);
}

#[test]
fn no_image_with_gradient_fallback() {
    let plan = resolve_background_chain(&base(None, Some(BackgroundFallback::Gradient)), None, None);
    assert_eq!(kinds(&plan), ["gradient", "solid"]);
}

#[test]
fn image_with_solid_fallback() {
    let plan = resolve_background_chain(&base(Some("bg.png"), Some(BackgroundFallback::Solid)), None, None);
    assert_eq!(kinds(&plan), ["image", "solid"]);
}

#[test]
fn nothing_but_color() {
    let plan = resolve_background_chain(&base(None, None), None, None);
    assert_eq!(plan.chain, vec![BackgroundSource::Solid(Color::rgb(0x33, 0x66, 0x99))]);
}

#[test]
fn neutral_fill_without_color() {
    let plan = resolve_background_chain(&BackgroundConfig::default(), None, None);
    assert_eq!(plan.chain, vec![BackgroundSource::Solid(Color::WHITE)]);
}

#[test]
fn gradient_mode_wins_outright() {
    let mut cfg = base(Some("bg.png"), None);
    cfg.mode = BackgroundMode::Gradient;
    let plan = resolve_background_chain(&cfg, None, None);
    assert_eq!(kinds(&plan), ["gradient", "solid"]);
}

#[test]
fn device_image_precedes_global_image() {
    let ov = BackgroundOverride {
        image: Some("device.png".into()),
        ..BackgroundOverride::default()
    };
    let plan = resolve_background_chain(&base(Some("global.png"), None), Some(&ov), None);
    let origins: Vec<_> = plan
        .chain
        .iter()
        .filter_map(|s| match s {
            BackgroundSource::Image { origin, .. } => Some(*origin),
            _ => None,
        })
        .collect();
    assert_eq!(origins, [ImageOrigin::Device, ImageOrigin::Global]);
}

struct TempDir(PathBuf);

impl TempDir {
    fn new(tag: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("frameshot-bg-{tag}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        Self(dir)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

#[test]
fn auto_mode_finds_colocated_background() {
    let tmp = TempDir::new("auto");
    image::RgbImage::from_pixel(4, 4, image::Rgb([0, 200, 0]))
        .save(tmp.0.join("background.jpg"))
        .unwrap();
    let shot = tmp.0.join("01.png");
    let cfg = BackgroundConfig::default();
    let plan = resolve_background_chain(&cfg, None, Some(&shot));
    assert_eq!(
        plan.chain[0],
        BackgroundSource::Image {
            path: tmp.0.join("background.jpg"),
            origin: ImageOrigin::Colocated,
        }
    );
    let out = render_background(&plan, Canvas::new(8, 8).unwrap());
    let px = out.pixel(4, 4).unwrap();
    assert!(px[1] > 150 && px[0] < 40, "{px:?}");
}

#[test]
fn unreadable_images_fall_through_to_gradient() {
    let tmp = TempDir::new("fallthrough");
    let corrupt = tmp.0.join("corrupt.png");
    std::fs::write(&corrupt, b"not a png").unwrap();
    let mut cfg = base(Some(corrupt.to_str().unwrap()), Some(BackgroundFallback::Gradient));
    let ov = BackgroundOverride {
        image: Some(tmp.0.join("missing.png")),
        ..BackgroundOverride::default()
    };
    cfg.warn_on_mismatch = true;
    let plan = resolve_background_chain(&cfg, Some(&ov), None);
    assert_eq!(kinds(&plan), ["image", "image", "gradient", "solid"]);
    let out = render_background(&plan, Canvas::new(10, 10).unwrap());
    assert_eq!(out.pixel(0, 0), Some([0, 0, 0, 255]));
}

#[test]
fn solid_fill_renders_configured_color() {
    let plan = resolve_background_chain(&base(None, None), None, None);
    let out = render_background(&plan, Canvas::new(3, 2).unwrap());
    assert_eq!(out.pixel(2, 1), Some([0x33, 0x66, 0x99, 255]));
}
