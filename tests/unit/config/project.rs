use super::*;
use crate::config::caption::CaptionPosition;

fn project_json() -> serde_json::Value {
    serde_json::json!({
        "caption": { "fontSize": 60, "position": "above" },
        "background": { "mode": "gradient", "gradient": { "colors": ["#123456", "#abcdef"] } },
        "framesDir": "frames",
        "devices": {
            "iphone": { "captionPosition": "below", "framePosition": 40 },
            "ipad": { "frameScale": 0.75 }
        },
        "captions": {
            "iphone": { "01.png": "First", "02.png": { "en": "Second" } }
        }
    })
}

#[test]
fn parses_full_project() {
    let cfg = ProjectConfig::from_reader(project_json().to_string().as_bytes()).unwrap();
    assert_eq!(cfg.frames_dir.as_deref(), Some(Path::new("frames")));
    assert_eq!(cfg.devices.len(), 2);
    assert_eq!(cfg.captions["iphone"].len(), 2);
    assert!(cfg.validate().is_ok());
}

#[test]
fn caption_for_device_applies_overrides() {
    let cfg = ProjectConfig::from_reader(project_json().to_string().as_bytes()).unwrap();
    assert_eq!(cfg.caption_for_device("iphone").position, CaptionPosition::Below);
    assert_eq!(cfg.caption_for_device("watch").position, CaptionPosition::Above);
    assert_eq!(cfg.device("ipad").frame_scale, 0.75);
}

#[test]
fn invalid_json_is_a_serde_error() {
    let err = ProjectConfig::from_reader("{ nope".as_bytes()).unwrap_err();
    assert!(matches!(err, FrameshotError::Serde(_)));
}

#[test]
fn validate_names_the_offending_device() {
    let mut cfg = ProjectConfig::default();
    cfg.devices.insert(
        "mac".to_owned(),
        DeviceConfig {
            frame_scale: 0.0,
            ..DeviceConfig::default()
        },
    );
    let msg = cfg.validate().unwrap_err().to_string();
    assert!(msg.contains("device 'mac'"), "{msg}");
}

#[test]
fn missing_file_is_an_error() {
    assert!(ProjectConfig::from_path(Path::new("/definitely/missing/frameshot.json")).is_err());
}
