use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_half_black_darkens_white() {
    let dst = [255, 255, 255, 255];
    let src = [0, 0, 0, 128];
    assert_eq!(over(dst, src, 1.0), [127, 127, 127, 255]);
}

#[test]
fn over_in_place_checks_lengths() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());

    let src = vec![9u8, 8, 7, 255, 0, 0, 0, 0];
    let mut dst = vec![1u8, 1, 1, 255, 5, 5, 5, 255];
    over_in_place(&mut dst, &src, 1.0).unwrap();
    assert_eq!(dst, vec![9, 8, 7, 255, 5, 5, 5, 255]);
}

#[test]
fn layer_rect_grows_to_whole_pixels_and_clips_to_frame() {
    let frame = PixelSize::new(100, 50).unwrap();
    let r = LayerRect::covering(Rect::new(10.4, -3.0, 20.1, 12.5), frame).unwrap();
    assert_eq!((r.x, r.y), (10, 0));
    assert_eq!((r.size.width, r.size.height), (11, 13));

    let r = LayerRect::covering(Rect::new(90.0, 40.0, 130.0, 80.0), frame).unwrap();
    assert_eq!((r.x, r.y, r.size.width, r.size.height), (90, 40, 10, 10));

    assert!(LayerRect::covering(Rect::new(120.0, 0.0, 140.0, 10.0), frame).is_none());
    assert!(LayerRect::covering(Rect::new(f64::NAN, 0.0, 5.0, 5.0), frame).is_none());
}

#[test]
fn over_rect_matches_full_frame_composite() {
    let frame = PixelSize::new(6, 5).unwrap();
    let mut base: Vec<u8> = (0..frame.rgba8_len())
        .map(|i| if i % 4 == 3 { 255 } else { (i * 7 % 200) as u8 })
        .collect();
    let rect = LayerRect {
        x: 2,
        y: 1,
        size: PixelSize::new(3, 2).unwrap(),
    };
    let layer: Vec<u8> = [0u8, 0, 0, 128, 40, 0, 0, 64, 0, 0, 0, 0].repeat(2);

    let mut full = vec![0u8; frame.rgba8_len()];
    for row in 0..2usize {
        let start = ((rect.y as usize + row) * 6 + rect.x as usize) * 4;
        full[start..start + 12].copy_from_slice(&layer[row * 12..row * 12 + 12]);
    }
    let mut expected = base.clone();
    over_in_place(&mut expected, &full, 1.0).unwrap();

    over_rect_in_place(&mut base, frame, &layer, rect, 1.0).unwrap();
    assert_eq!(base, expected);
}

#[test]
fn over_rect_rejects_rect_past_frame() {
    let frame = PixelSize::new(4, 4).unwrap();
    let mut dst = vec![0u8; frame.rgba8_len()];
    let rect = LayerRect {
        x: 3,
        y: 0,
        size: PixelSize::new(2, 1).unwrap(),
    };
    assert!(over_rect_in_place(&mut dst, frame, &[0u8; 8], rect, 1.0).is_err());
}
