use std::io::Cursor;

use super::*;
use crate::foundation::color::Rgba8;

#[test]
fn empty_object_is_the_default_config() {
    let cfg = PosterConfig::from_reader(Cursor::new("{}")).unwrap();
    assert_eq!(cfg, PosterConfig::default());
    assert_eq!(cfg.export_file_name, "sweet of madeena 2025.png");
    assert_eq!(cfg.device_pixel_ratio, 1.0);
    assert!(cfg.validate().is_ok());
}

#[test]
fn nested_sections_override_fields() {
    let json = r##"{
        "device_pixel_ratio": 2,
        "preview_max_width": 320,
        "layout": { "name_baseline_y": 0.8 },
        "text": { "size_px": 64, "color": "#ff0000", "shadow": { "blur": 8 } }
    }"##;
    let cfg = PosterConfig::from_reader(Cursor::new(json)).unwrap();
    assert_eq!(cfg.device_pixel_ratio, 2.0);
    assert_eq!(cfg.preview_max_width, Some(320.0));
    assert_eq!(cfg.layout.name_baseline_y, 0.8);
    assert_eq!(cfg.layout.photo_center_y, 0.59);
    assert_eq!(cfg.text.size_px, 64.0);
    assert_eq!(cfg.text.color, Rgba8::rgba(255, 0, 0, 255));
    let shadow = cfg.text.shadow.unwrap();
    assert_eq!(shadow.blur, 8.0);
    assert_eq!(shadow.offset_x, 2.0);
}

#[test]
fn parse_errors_are_serde_errors() {
    let err = PosterConfig::from_reader(Cursor::new("{ nope")).unwrap_err();
    assert!(matches!(err, PosterError::Serde(_)));
    let err = PosterConfig::from_reader(Cursor::new(r#"{ "dpi": 2 }"#)).unwrap_err();
    assert!(matches!(err, PosterError::Serde(_)));
}

#[test]
fn validate_rejects_bad_values() {
    let cfg = PosterConfig {
        device_pixel_ratio: 0.0,
        ..PosterConfig::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = PosterConfig {
        preview_max_width: Some(-1.0),
        ..PosterConfig::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = PosterConfig {
        export_file_name: "../escape.png".to_owned(),
        ..PosterConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn from_path_resolves_relative_paths() {
    let dir = std::env::temp_dir().join(format!("posterkit-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("poster.json");
    std::fs::write(
        &path,
        r#"{ "poster": "bg.png", "text": { "font_path": "fonts/a.ttf" } }"#,
    )
    .unwrap();

    let cfg = PosterConfig::from_path(&path).unwrap();
    assert_eq!(cfg.poster, Some(dir.join("bg.png")));
    assert_eq!(cfg.text.font_path, Some(dir.join("fonts/a.ttf")));
    let _ = std::fs::remove_dir_all(&dir);
}
