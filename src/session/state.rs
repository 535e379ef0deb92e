use std::sync::Arc;

use crate::assets::decode::Bitmap;
use crate::crop::region::CropRegion;
use crate::crop::selection::CropSelection;
use crate::foundation::core::DisplaySize;

/// Which screen the tool is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    /// Name entry and download.
    #[default]
    Idle,
    /// Crop dialog over the freshly uploaded photo.
    Cropping,
}

/// Everything the page shows, minus the poster.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiState {
    /// Name as typed, verbatim.
    pub entered_name: String,
    /// Current photo: the raw upload while cropping, the cropped square afterwards.
    pub uploaded: Option<Arc<Bitmap>>,
    /// Crop selector state; present only while cropping.
    pub selection: Option<CropSelection>,
    /// Active screen.
    pub screen: Screen,
    /// Sequence number of the most recent upload; older decodes are stale.
    pub decode_seq: u64,
}

/// Input to [`UiState::reduce`].
#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    /// A new file was picked and its decode started.
    UploadStarted,
    /// A decode finished. Applied only when `seq` is still the latest upload.
    PhotoDecoded {
        /// Sequence number handed out when the upload started.
        seq: u64,
        /// The decoded photo.
        bitmap: Arc<Bitmap>,
        /// Size the photo is displayed at under the crop selector.
        display: DisplaySize,
    },
    /// The selector is being dragged.
    RegionChanged(CropRegion),
    /// A drag finished.
    RegionCompleted(CropRegion),
    /// The crop was rasterized; the result replaces the uploaded photo.
    CropApplied(Arc<Bitmap>),
    /// The name field changed.
    NameChanged(String),
}

impl UiState {
    /// Apply `event`, returning the next state. Events that do not apply in the current state
    /// leave it unchanged.
    pub fn reduce(mut self, event: UiEvent) -> Self {
        match event {
            UiEvent::UploadStarted => {
                self.decode_seq += 1;
            }
            UiEvent::PhotoDecoded {
                seq,
                bitmap,
                display,
            } => {
                if seq != self.decode_seq {
                    return self;
                }
                self.uploaded = Some(bitmap);
                self.selection = Some(CropSelection::with_default(display));
                self.screen = Screen::Cropping;
            }
            UiEvent::RegionChanged(region) => {
                if let Some(sel) = self.selection.as_mut() {
                    sel.update(region);
                }
            }
            UiEvent::RegionCompleted(region) => {
                if let Some(sel) = self.selection.as_mut() {
                    sel.complete(region);
                }
            }
            UiEvent::CropApplied(bitmap) => {
                if self.screen != Screen::Cropping {
                    return self;
                }
                self.uploaded = Some(bitmap);
                self.selection = None;
                self.screen = Screen::Idle;
            }
            UiEvent::NameChanged(name) => {
                self.entered_name = name;
            }
        }
        self
    }

    /// The completed crop region, when cropping.
    pub fn completed_region(&self) -> Option<CropRegion> {
        match self.screen {
            Screen::Cropping => self.selection.as_ref().and_then(CropSelection::completed),
            Screen::Idle => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/state.rs"]
mod tests;
