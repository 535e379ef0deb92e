use super::*;

fn display(w: f64, h: f64) -> DisplaySize {
    DisplaySize {
        width: w,
        height: h,
    }
}

#[test]
fn default_crop_is_centered_square_of_shorter_side() {
    let d = default_square_crop(display(400.0, 300.0));
    assert_eq!(d.pixels.width, d.pixels.height);
    assert!((d.pixels.width - 270.0).abs() < 1e-9);
    assert!((d.pixels.x - 65.0).abs() < 1e-9);
    assert!((d.pixels.y - 15.0).abs() < 1e-9);
    assert!(d.pixels.is_within(display(400.0, 300.0)));
}

#[test]
fn default_crop_percent_matches_pixels() {
    let disp = display(300.0, 600.0);
    let d = default_square_crop(disp);
    assert!((d.percent.width - 90.0).abs() < 1e-9);
    assert!((d.percent.height - 45.0).abs() < 1e-9);

    let back = d.percent.to_pixels(disp);
    assert!((back.x - d.pixels.x).abs() < 1e-9);
    assert!((back.y - d.pixels.y).abs() < 1e-9);
    assert!((back.width - d.pixels.width).abs() < 1e-9);
}

#[test]
fn degenerate_regions() {
    assert!(CropRegion::square(0.0, 0.0, 0.0).is_degenerate());
    assert!(CropRegion::new(0.0, 0.0, 10.0, -1.0).is_degenerate());
    assert!(CropRegion::new(f64::NAN, 0.0, 10.0, 10.0).is_degenerate());
    assert!(!CropRegion::square(1.0, 1.0, 2.0).is_degenerate());
}

#[test]
fn within_bounds_check() {
    let disp = display(100.0, 50.0);
    assert!(CropRegion::square(50.0, 0.0, 50.0).is_within(disp));
    assert!(!CropRegion::square(60.0, 0.0, 50.0).is_within(disp));
    assert!(!CropRegion::square(-1.0, 0.0, 10.0).is_within(disp));
}
