use super::*;
use crate::crop::region::default_square_crop;

/// Left half red, right half blue.
fn split_bitmap(w: u32, h: u32) -> Bitmap {
    let mut bytes = Vec::with_capacity((w * h * 4) as usize);
    for _y in 0..h {
        for x in 0..w {
            if x < w / 2 {
                bytes.extend_from_slice(&[255, 0, 0, 255]);
            } else {
                bytes.extend_from_slice(&[0, 0, 255, 255]);
            }
        }
    }
    Bitmap::from_premul_rgba8(w, h, bytes).unwrap()
}

fn assert_close(actual: Option<[u8; 4]>, expected: [u8; 4]) {
    let actual = actual.unwrap();
    for (a, e) in actual.iter().zip(expected) {
        assert!(a.abs_diff(e) <= 2, "{actual:?} != {expected:?}");
    }
}

#[test]
fn default_crop_is_square_at_source_resolution() {
    let source = split_bitmap(400, 300);
    let display = source.natural_size().as_display();
    let region = default_square_crop(display).pixels;

    let out = rasterize_crop(&source, display, &region, 1.0).unwrap();
    assert_eq!((out.width, out.height), (270, 270));
}

#[test]
fn scaled_preview_maps_back_to_natural_pixels() {
    let source = split_bitmap(400, 300);
    let display = DisplaySize {
        width: 200.0,
        height: 150.0,
    };
    let region = default_square_crop(display).pixels;

    let out = rasterize_crop(&source, display, &region, 1.0).unwrap();
    assert_eq!((out.width, out.height), (270, 270));
}

#[test]
fn device_pixel_ratio_scales_the_surface() {
    let source = split_bitmap(400, 300);
    let display = source.natural_size().as_display();
    let region = CropRegion::square(10.0, 10.0, 50.0);

    let out = rasterize_crop(&source, display, &region, 2.0).unwrap();
    assert_eq!((out.width, out.height), (100, 100));
}

#[test]
fn crop_picks_the_selected_pixels() {
    let source = split_bitmap(100, 100);
    let display = source.natural_size().as_display();

    let left = rasterize_crop(&source, display, &CropRegion::square(5.0, 5.0, 30.0), 1.0).unwrap();
    assert_close(left.pixel(15, 15), [255, 0, 0, 255]);

    let right =
        rasterize_crop(&source, display, &CropRegion::square(60.0, 5.0, 30.0), 1.0).unwrap();
    assert_close(right.pixel(15, 15), [0, 0, 255, 255]);
}

#[test]
fn degenerate_inputs_are_rejected() {
    let source = split_bitmap(10, 10);
    let display = source.natural_size().as_display();

    let err = rasterize_crop(&source, display, &CropRegion::square(0.0, 0.0, 0.0), 1.0)
        .unwrap_err();
    assert!(matches!(err, PosterError::Validation(_)));

    assert!(
        rasterize_crop(
            &source,
            DisplaySize {
                width: 0.0,
                height: 10.0
            },
            &CropRegion::square(0.0, 0.0, 5.0),
            1.0
        )
        .is_err()
    );
    assert!(rasterize_crop(&source, display, &CropRegion::square(0.0, 0.0, 5.0), 0.0).is_err());
    assert!(
        rasterize_crop(&source, display, &CropRegion::square(0.0, 0.0, 0.2), 1.0).is_err()
    );
}

#[test]
fn rasterize_runs_inside_an_active_subscriber() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        let source = split_bitmap(40, 20);
        let display = DisplaySize {
            width: 20.0,
            height: 10.0,
        };
        let out = rasterize_crop(&source, display, &CropRegion::square(0.0, 0.0, 10.0), 1.0)
            .unwrap();
        assert_eq!((out.width, out.height), (20, 20));
    });
}
