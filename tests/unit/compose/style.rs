use super::*;

#[test]
fn defaults_match_title_card_look() {
    let s = TextStyle::default();
    assert_eq!(s.size_px, 106.0);
    assert!(s.bold);
    assert_eq!(s.color, Rgba8::WHITE);
    assert_eq!(s.family, "sans-serif");
    let shadow = s.shadow.unwrap();
    assert_eq!(shadow.color, Rgba8::rgba(0, 0, 0, 128));
    assert_eq!((shadow.blur, shadow.offset_x, shadow.offset_y), (4.0, 2.0, 2.0));
    assert!(s.validate().is_ok());
}

#[test]
fn shadow_can_be_disabled_with_null() {
    let s: TextStyle = serde_json::from_str(r#"{ "shadow": null, "size_px": 40 }"#).unwrap();
    assert_eq!(s.shadow, None);
    assert_eq!(s.size_px, 40.0);
}

#[test]
fn validate_rejects_bad_values() {
    let s = TextStyle {
        size_px: 0.0,
        ..TextStyle::default()
    };
    assert!(s.validate().is_err());

    let s = TextStyle {
        family: String::new(),
        ..TextStyle::default()
    };
    assert!(s.validate().is_err());

    let s = TextStyle {
        family: String::new(),
        font_path: Some(PathBuf::from("font.ttf")),
        ..TextStyle::default()
    };
    assert!(s.validate().is_ok());

    let s = TextStyle {
        shadow: Some(ShadowStyle {
            blur: -1.0,
            ..ShadowStyle::default()
        }),
        ..TextStyle::default()
    };
    assert!(s.validate().is_err());
}
