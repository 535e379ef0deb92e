use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Rgba8 = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Rgba8::rgba(255, 0, 0, 255));

    let c: Rgba8 = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert_eq!(c, Rgba8::rgba(0, 0, 255, 128));

    assert!(Rgba8::parse("#12345").is_err());
}

#[test]
fn parses_css_rgba_string() {
    assert_eq!(
        Rgba8::parse("rgba(0, 0, 0, 0.5)").unwrap(),
        Rgba8::rgba(0, 0, 0, 128)
    );
    assert_eq!(
        Rgba8::parse("rgb(10,20,30)").unwrap(),
        Rgba8::rgba(10, 20, 30, 255)
    );
    assert!(Rgba8::parse("rgba(0, 0, 0, 2)").is_err());
    assert_eq!(Rgba8::parse("white").unwrap(), Rgba8::WHITE);
}

#[test]
fn parses_object_and_array() {
    let c: Rgba8 = serde_json::from_value(json!({"r": 1, "g": 2, "b": 3})).unwrap();
    assert_eq!(c, Rgba8::rgba(1, 2, 3, 255));

    let c: Rgba8 = serde_json::from_value(json!([1, 2, 3, 0.0])).unwrap();
    assert_eq!(c, Rgba8::rgba(1, 2, 3, 0));

    assert!(serde_json::from_value::<Rgba8>(json!([1, 2])).is_err());
}

#[test]
fn serializes_as_hex() {
    let v = serde_json::to_value(Rgba8::rgba(0, 0, 0, 128)).unwrap();
    assert_eq!(v, json!("#00000080"));
    let back: Rgba8 = serde_json::from_value(v).unwrap();
    assert_eq!(back, Rgba8::rgba(0, 0, 0, 128));
}
