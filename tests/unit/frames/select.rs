use std::path::PathBuf;

use super::*;

fn entry(name: &str, display: &str, sw: u32, sh: u32) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "displayName": display,
        "file": format!("{name}.png"),
        "frameWidth": sw + 20,
        "frameHeight": sh + 20,
        "screen": { "x": 10, "y": 10, "width": sw, "height": sh },
        "mask": format!("{name}-mask.png")
    })
}

fn registry() -> FrameRegistry {
    let json = serde_json::json!({
        "version": "1",
        "iPhone": {
            "Portrait": [
                entry("wide", "Wide Phone", 600, 1000),
                entry("tall", "Tall Phone", 500, 1100),
                entry("tall-twin", "Tall Twin", 500, 1100)
            ],
            "Landscape": [ entry("land", "Land Phone", 1100, 500) ]
        }
    });
    FrameRegistry::from_json_str(&json.to_string()).unwrap()
}

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::new(w, h).unwrap()
}

#[test]
fn closest_aspect_wins_and_ties_keep_catalog_order() {
    let reg = registry();
    // 1290 / 2796 = 0.461, closest to 500/1100 = 0.4545.
    let f = pick_frame(&reg, canvas(1290, 2796), None, None).unwrap();
    assert_eq!(f.name, "tall");
}

#[test]
fn preferred_frame_wins_when_present() {
    let reg = registry();
    let f = pick_frame(&reg, canvas(1290, 2796), None, Some("wide phone")).unwrap();
    assert_eq!(f.name, "wide");
}

#[test]
fn missing_preferred_frame_falls_back_to_aspect() {
    let reg = registry();
    let f = pick_frame(&reg, canvas(1290, 2796), None, Some("land")).unwrap();
    assert_eq!(f.name, "tall");
}

#[test]
fn orientation_comes_from_screenshot() {
    let reg = registry();
    let f = pick_frame(&reg, canvas(2796, 1290), None, None).unwrap();
    assert_eq!(f.name, "land");
}

#[test]
fn unclassified_or_empty_category_yields_none() {
    let reg = registry();
    assert!(pick_frame(&reg, canvas(5000, 500), None, None).is_none());
    assert!(pick_frame(&reg, canvas(2064, 2752), None, None).is_none());
}

#[test]
fn explicit_category_overrides_classifier() {
    let reg = registry();
    // Unclassifiable on its own, but the caller knows it is a phone.
    let f = pick_frame(&reg, canvas(500, 5000), Some(DeviceCategory::Iphone), None).unwrap();
    assert_eq!(f.name, "tall");
}

struct TempDir(PathBuf);

impl TempDir {
    fn new(tag: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("frameshot-select-{tag}-{}", std::process::id()));
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

fn write_png(path: &std::path::Path, w: u32, h: u32) {
    image::RgbaImage::new(w, h).save(path).unwrap();
}

#[test]
fn select_frame_loads_frame_bytes_and_tolerates_missing_mask() {
    let tmp = TempDir::new("load");
    let shot = tmp.0.join("shot.png");
    write_png(&shot, 129, 280);
    write_png(&tmp.0.join("tall.png"), 4, 4);

    let reg = registry();
    let sel = select_frame(&reg, &shot, &tmp.0, None, None, false).unwrap();
    assert_eq!(sel.metadata.as_ref().map(|f| f.name.as_str()), Some("tall"));
    assert!(sel.frame_bytes.is_some());
    assert!(sel.mask_bytes.is_none());
}

#[test]
fn select_frame_dry_run_skips_buffers() {
    let tmp = TempDir::new("dry");
    let shot = tmp.0.join("shot.png");
    write_png(&shot, 129, 280);
    write_png(&tmp.0.join("tall.png"), 4, 4);

    let sel = select_frame(&registry(), &shot, &tmp.0, None, None, true).unwrap();
    assert!(sel.metadata.is_some());
    assert!(sel.frame_bytes.is_none());
    assert!(sel.mask_bytes.is_none());
}

#[test]
fn select_frame_unreadable_screenshot_is_an_error() {
    let tmp = TempDir::new("missing");
    let missing = tmp.0.join("nope.png");
    assert!(select_frame(&registry(), &missing, &tmp.0, None, None, true).is_err());
}
