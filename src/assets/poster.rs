use std::path::Path;
use std::sync::Arc;

use crate::assets::decode::{Bitmap, decode_image, decode_image_file};
use crate::foundation::error::{PosterError, PosterResult};

/// Load state of the fixed background poster.
#[derive(Clone, Debug, Default)]
pub enum PosterState {
    /// No load has completed yet.
    #[default]
    Pending,
    /// Poster decoded and available for compositing.
    Ready(Arc<Bitmap>),
    /// Decoding failed; export stays unavailable for this handle.
    Failed(String),
}

/// Read-only handle to the background poster, loaded at most once.
///
/// Cloning the handle shares the decoded bitmap.
#[derive(Clone, Debug, Default)]
pub struct PosterHandle {
    state: PosterState,
}

impl PosterHandle {
    /// A handle whose poster has not been loaded.
    pub fn pending() -> Self {
        Self::default()
    }

    /// A handle that is immediately ready with `bitmap`.
    pub fn ready(bitmap: Bitmap) -> Self {
        Self {
            state: PosterState::Ready(Arc::new(bitmap)),
        }
    }

    /// Current load state.
    pub fn state(&self) -> &PosterState {
        &self.state
    }

    /// Return `true` when the poster can be composited.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, PosterState::Ready(_))
    }

    /// The decoded poster, or a `NotReady` error describing why it is unavailable.
    pub fn bitmap(&self) -> PosterResult<&Arc<Bitmap>> {
        match &self.state {
            PosterState::Ready(b) => Ok(b),
            PosterState::Pending => Err(PosterError::not_ready("poster has not been loaded")),
            PosterState::Failed(reason) => Err(PosterError::not_ready(format!(
                "poster failed to load: {reason}"
            ))),
        }
    }

    /// Decode poster bytes. Only the first completed load takes effect.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> &PosterState {
        self.complete(|| decode_image(bytes))
    }

    /// Decode the poster from a file. Only the first completed load takes effect.
    pub fn load_file(&mut self, path: &Path) -> &PosterState {
        self.complete(|| decode_image_file(path))
    }

    fn complete(&mut self, decode: impl FnOnce() -> PosterResult<Bitmap>) -> &PosterState {
        if !matches!(self.state, PosterState::Pending) {
            tracing::debug!("poster already loaded; ignoring reload");
            return &self.state;
        }
        self.state = match decode() {
            Ok(bitmap) => {
                tracing::info!(width = bitmap.width, height = bitmap.height, "poster ready");
                PosterState::Ready(Arc::new(bitmap))
            }
            Err(e) => {
                tracing::warn!(error = %e, "poster failed to load; download disabled");
                PosterState::Failed(e.to_string())
            }
        };
        &self.state
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/poster.rs"]
mod tests;
