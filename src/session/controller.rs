use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::decode::{Bitmap, decode_image, decode_image_file};
use crate::assets::poster::{PosterHandle, PosterState};
use crate::compose::compositor::PosterCompositor;
use crate::config::PosterConfig;
use crate::crop::rasterize::rasterize_crop;
use crate::crop::region::CropRegion;
use crate::export::png::encode_png;
use crate::export::sink::ExportSink;
use crate::foundation::core::DisplaySize;
use crate::foundation::error::{PosterError, PosterResult};
use crate::session::state::{Screen, UiEvent, UiState};

/// Handle for one in-flight photo decode, returned by [`PosterSession::begin_upload`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UploadTicket(u64);

/// Result of [`PosterSession::download`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The poster was composited and handed to the sink.
    Saved {
        /// Name the file was saved under.
        file_name: String,
        /// Location reported by the sink.
        path: PathBuf,
        /// Output width in pixels.
        width: u32,
        /// Output height in pixels.
        height: u32,
    },
    /// Nothing was saved; the reason says which input is missing.
    NotReady(String),
}

/// The poster tool: UI state plus the poster, compositor and export settings.
#[derive(Debug)]
pub struct PosterSession {
    poster: PosterHandle,
    state: UiState,
    compositor: PosterCompositor,
    device_pixel_ratio: f64,
    preview_max_width: Option<f64>,
    export_file_name: String,
}

impl PosterSession {
    /// Build a session from `config`. The poster starts out pending; see
    /// [`PosterSession::load_poster`].
    pub fn new(config: &PosterConfig) -> PosterResult<Self> {
        config.validate()?;
        Ok(Self {
            poster: PosterHandle::pending(),
            state: UiState::default(),
            compositor: PosterCompositor::new(config.layout, config.text.clone())?,
            device_pixel_ratio: config.device_pixel_ratio,
            preview_max_width: config.preview_max_width,
            export_file_name: config.export_file_name.clone(),
        })
    }

    /// Current UI state.
    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Active screen.
    pub fn screen(&self) -> Screen {
        self.state.screen
    }

    /// Background poster handle.
    pub fn poster(&self) -> &PosterHandle {
        &self.poster
    }

    /// Current photo, if one has been uploaded.
    pub fn uploaded(&self) -> Option<&Arc<Bitmap>> {
        self.state.uploaded.as_ref()
    }

    /// File name used by [`PosterSession::download`].
    pub fn export_file_name(&self) -> &str {
        &self.export_file_name
    }

    /// Decode the poster. Only the first load has any effect; returns whether the poster is ready.
    pub fn load_poster(&mut self, bytes: &[u8]) -> bool {
        matches!(self.poster.load_bytes(bytes), PosterState::Ready(_))
    }

    /// [`PosterSession::load_poster`] from a file.
    pub fn load_poster_file(&mut self, path: &Path) -> bool {
        matches!(self.poster.load_file(path), PosterState::Ready(_))
    }

    /// Register a new upload. Any decode started before this one becomes stale.
    pub fn begin_upload(&mut self) -> UploadTicket {
        self.apply(UiEvent::UploadStarted);
        UploadTicket(self.state.decode_seq)
    }

    /// Deliver the decode result for `ticket`.
    ///
    /// Returns `true` when the photo was accepted and the crop screen opened. Failed and stale
    /// decodes are logged and leave the state unchanged.
    pub fn finish_upload(&mut self, ticket: UploadTicket, decoded: PosterResult<Bitmap>) -> bool {
        let bitmap = match decoded {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring photo that failed to decode");
                return false;
            }
        };
        if ticket.0 != self.state.decode_seq {
            tracing::debug!(
                seq = ticket.0,
                latest = self.state.decode_seq,
                "discarding stale photo decode"
            );
            return false;
        }

        let preview = DisplaySize::fit_width(bitmap.natural_size(), self.preview_max_width);
        tracing::info!(
            width = bitmap.width,
            height = bitmap.height,
            preview_w = preview.width,
            preview_h = preview.height,
            "photo uploaded"
        );
        self.apply(UiEvent::PhotoDecoded {
            seq: ticket.0,
            bitmap: Arc::new(bitmap),
            display: preview,
        });
        true
    }

    /// Upload a photo from encoded bytes.
    pub fn select_file(&mut self, bytes: &[u8]) -> bool {
        let ticket = self.begin_upload();
        self.finish_upload(ticket, decode_image(bytes))
    }

    /// Upload a photo from a file.
    pub fn select_file_path(&mut self, path: &Path) -> bool {
        let ticket = self.begin_upload();
        self.finish_upload(ticket, decode_image_file(path))
    }

    /// Track an in-progress drag of the crop selector.
    pub fn update_crop_region(&mut self, region: CropRegion) {
        self.apply(UiEvent::RegionChanged(region));
    }

    /// Record a finished drag of the crop selector.
    pub fn complete_crop_region(&mut self, region: CropRegion) {
        self.apply(UiEvent::RegionCompleted(region));
    }

    /// Rasterize the completed selection and make it the current photo.
    ///
    /// Returns `Ok(false)` without touching state when there is nothing to apply: not cropping,
    /// no completed region, or a region with no area.
    pub fn apply_crop(&mut self) -> PosterResult<bool> {
        let Some(region) = self.state.completed_region() else {
            tracing::debug!("apply_crop: no completed region");
            return Ok(false);
        };
        if region.is_degenerate() {
            tracing::debug!(?region, "apply_crop: ignoring degenerate region");
            return Ok(false);
        }
        let (Some(source), Some(selection)) = (&self.state.uploaded, &self.state.selection) else {
            return Ok(false);
        };

        let cropped = rasterize_crop(source, selection.display(), &region, self.device_pixel_ratio)?;
        tracing::info!(width = cropped.width, height = cropped.height, "crop applied");
        self.apply(UiEvent::CropApplied(Arc::new(cropped)));
        Ok(true)
    }

    /// Store the name exactly as typed.
    pub fn set_name(&mut self, text: impl Into<String>) {
        self.apply(UiEvent::NameChanged(text.into()));
    }

    /// Composite the current photo and name onto the poster and encode it as PNG.
    ///
    /// Fails with [`PosterError::NotReady`] when the poster or the photo is missing.
    pub fn render_png(&mut self) -> PosterResult<Vec<u8>> {
        let poster = Arc::clone(self.poster.bitmap()?);
        let photo = self
            .state
            .uploaded
            .clone()
            .ok_or_else(|| PosterError::not_ready("no photo has been uploaded"))?;
        let frame = self
            .compositor
            .compose(&poster, &photo, &self.state.entered_name)?;
        encode_png(&frame)
    }

    /// Render and hand the PNG to `sink` under the configured file name.
    ///
    /// A missing poster or photo is reported as [`DownloadOutcome::NotReady`] and nothing is
    /// saved.
    pub fn download(&mut self, sink: &mut dyn ExportSink) -> PosterResult<DownloadOutcome> {
        let png = match self.render_png() {
            Ok(png) => png,
            Err(PosterError::NotReady(reason)) => {
                tracing::warn!(%reason, "download unavailable");
                return Ok(DownloadOutcome::NotReady(reason));
            }
            Err(e) => return Err(e),
        };
        let size = self.poster.bitmap()?.natural_size();
        let path = sink.save(&self.export_file_name, &png)?;
        Ok(DownloadOutcome::Saved {
            file_name: self.export_file_name.clone(),
            path,
            width: size.width,
            height: size.height,
        })
    }

    fn apply(&mut self, event: UiEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(event);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/controller.rs"]
mod tests;
