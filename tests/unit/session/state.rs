use super::*;

fn photo(w: u32, h: u32) -> Arc<Bitmap> {
    Arc::new(Bitmap::from_premul_rgba8(w, h, vec![255; (w * h * 4) as usize]).unwrap())
}

fn decoded(state: UiState, bitmap: Arc<Bitmap>) -> UiState {
    let state = state.reduce(UiEvent::UploadStarted);
    let seq = state.decode_seq;
    let display = bitmap.natural_size().as_display();
    state.reduce(UiEvent::PhotoDecoded {
        seq,
        bitmap,
        display,
    })
}

#[test]
fn decode_enters_cropping_with_default_selection() {
    let state = decoded(UiState::default(), photo(400, 300));
    assert_eq!(state.screen, Screen::Cropping);
    let region = state.completed_region().unwrap();
    assert!((region.width - 270.0).abs() < 1e-9);
    assert!((region.x - 65.0).abs() < 1e-9);
    assert!((region.y - 15.0).abs() < 1e-9);
}

#[test]
fn stale_decode_is_discarded() {
    let state = UiState::default().reduce(UiEvent::UploadStarted);
    let first = state.decode_seq;
    let state = state.reduce(UiEvent::UploadStarted);
    let second = state.decode_seq;

    let fast = photo(10, 10);
    let slow = photo(20, 20);
    let state = state.reduce(UiEvent::PhotoDecoded {
        seq: second,
        bitmap: fast.clone(),
        display: fast.natural_size().as_display(),
    });
    let state = state.reduce(UiEvent::PhotoDecoded {
        seq: first,
        bitmap: slow.clone(),
        display: slow.natural_size().as_display(),
    });
    assert_eq!(state.uploaded, Some(fast));
}

#[test]
fn region_events_only_touch_selection_while_cropping() {
    let idle = UiState::default();
    let after = idle
        .clone()
        .reduce(UiEvent::RegionCompleted(CropRegion::square(0.0, 0.0, 5.0)));
    assert_eq!(after, idle);

    let state = decoded(UiState::default(), photo(100, 100));
    let state = state.reduce(UiEvent::RegionChanged(CropRegion::square(1.0, 2.0, 30.0)));
    let sel = state.selection.clone().unwrap();
    assert_eq!(sel.in_progress(), Some(CropRegion::square(1.0, 2.0, 30.0)));
    assert_ne!(sel.completed(), sel.in_progress());

    let state = state.reduce(UiEvent::RegionCompleted(CropRegion::square(1.0, 2.0, 30.0)));
    assert_eq!(state.completed_region(), Some(CropRegion::square(1.0, 2.0, 30.0)));
}

#[test]
fn crop_applied_returns_to_idle_and_clears_selection() {
    let state = decoded(UiState::default(), photo(100, 80));
    let cropped = photo(72, 72);
    let state = state.reduce(UiEvent::CropApplied(cropped.clone()));
    assert_eq!(state.screen, Screen::Idle);
    assert_eq!(state.selection, None);
    assert_eq!(state.uploaded, Some(cropped));
    assert_eq!(state.completed_region(), None);

    // Not cropping any more: a second apply is ignored.
    let again = state.clone().reduce(UiEvent::CropApplied(photo(1, 1)));
    assert_eq!(again, state);
}

#[test]
fn name_is_stored_verbatim() {
    let name = "  <b>Ava</b> \u{1F600} ".repeat(50);
    let state = UiState::default().reduce(UiEvent::NameChanged(name.clone()));
    assert_eq!(state.entered_name, name);
    let state = state.reduce(UiEvent::NameChanged(String::new()));
    assert_eq!(state.entered_name, "");
}
