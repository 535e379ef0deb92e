use super::*;

#[test]
fn default_anchors_on_square_poster() {
    let poster = PixelSize::new(1000, 1000).unwrap();
    let r = PosterLayout::default().resolve(poster);

    assert!((r.photo_center.x - 1000.0 * 212.0 / 530.0).abs() < 1e-9);
    assert!((r.photo_center.x - 400.0).abs() < 1e-9);
    assert!((r.photo_center.y - 590.0).abs() < 1e-9);
    assert!((r.photo_diameter - 367.346_938_775_510_2).abs() < 1e-6);
    assert_eq!(r.name_anchor.x, r.photo_center.x);
    assert!((r.name_anchor.y - 770.0).abs() < 1e-9);
}

#[test]
fn photo_square_bounds_the_circle() {
    let r = PosterLayout::default().resolve(PixelSize::new(490, 600).unwrap());
    let sq = r.photo_square();
    assert!((sq.width() - 180.0).abs() < 1e-9);
    assert!((sq.height() - 180.0).abs() < 1e-9);
    assert!((sq.center() - r.photo_center).hypot() < 1e-9);
    assert!((r.photo_circle().radius - 90.0).abs() < 1e-9);
}

#[test]
fn validate_rejects_out_of_range_fractions() {
    assert!(PosterLayout::default().validate().is_ok());

    let bad = PosterLayout {
        photo_center_y: 1.5,
        ..PosterLayout::default()
    };
    assert!(bad.validate().is_err());

    let bad = PosterLayout {
        photo_diameter: 0.0,
        ..PosterLayout::default()
    };
    assert!(bad.validate().is_err());

    let bad = PosterLayout {
        name_baseline_y: f64::NAN,
        ..PosterLayout::default()
    };
    assert!(bad.validate().is_err());
}

#[test]
fn partial_json_keeps_defaults() {
    let layout: PosterLayout = serde_json::from_str(r#"{ "name_baseline_y": 0.5 }"#).unwrap();
    assert_eq!(layout.name_baseline_y, 0.5);
    assert_eq!(layout.photo_center_y, 0.59);
    assert!(serde_json::from_str::<PosterLayout>(r#"{ "bogus": 1 }"#).is_err());
}
